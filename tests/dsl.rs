//! DSL unit tests: lexer behavior, value type system, and pass-1 syntax and
//! semantic validation (success/failure per error variant).

use pktsig::lexer::Lexer;
use pktsig::value::{
    decode_ipv4, decode_quoted, decode_unsigned, fits_width, is_decimal, is_hex, is_ipv4,
    is_quoted,
};
use pktsig::{check_source, compile, AddrClass, AddrValue, CompileError, IntWidth, ValueKind};

fn lex_all(src: &str) -> Vec<String> {
    let mut lexer = Lexer::new(src);
    let mut out = Vec::new();
    while let Some(t) = lexer.next_token() {
        out.push(t.text);
    }
    out
}

// ==================== Lexer ====================

#[test]
fn lex_single_char_and_word_tokens() {
    let toks = lex_all("[ ip.version = 4 , tcp.src = 80 ]");
    assert_eq!(
        toks,
        vec!["[", "ip.version", "=", "4", ",", "tcp.src", "=", "80", "]"]
    );
}

#[test]
fn lex_no_spaces_around_punctuation() {
    // `=` and `,` terminate a word without being consumed into it
    let toks = lex_all("[ip.version=4,tcp.src=80]");
    assert_eq!(
        toks,
        vec!["[", "ip.version", "=", "4", ",", "tcp.src", "=", "80", "]"]
    );
}

#[test]
fn lex_empty_source() {
    assert!(lex_all("").is_empty());
    assert!(lex_all(" \t\r\n").is_empty());
}

#[test]
fn lex_comment_at_start_of_buffer() {
    let toks = lex_all("# leading note\n[ ip.ttl = 1 ]");
    assert_eq!(toks, vec!["[", "ip.ttl", "=", "1", "]"]);
}

#[test]
fn lex_comment_between_tokens() {
    let toks = lex_all("[ ip.ttl = 1 , # inline\n  ip.tos = 2 ]");
    assert_eq!(toks, vec!["[", "ip.ttl", "=", "1", ",", "ip.tos", "=", "2", "]"]);
}

#[test]
fn lex_comment_at_end_without_newline() {
    let toks = lex_all("[ ip.ttl = 1 ] # trailing");
    assert_eq!(toks, vec!["[", "ip.ttl", "=", "1", "]"]);
}

#[test]
fn lex_crlf_line_endings() {
    let toks = lex_all("# note\r\n[ ip.ttl = 1 ]\r\n");
    assert_eq!(toks, vec!["[", "ip.ttl", "=", "1", "]"]);
}

#[test]
fn lex_quoted_string_kept_verbatim() {
    let toks = lex_all(r#"signature = "abc def""#);
    assert_eq!(toks, vec!["signature", "=", "\"abc def\""]);
}

#[test]
fn lex_quoted_string_with_escaped_quote() {
    // the escaped quote must not terminate the token
    let toks = lex_all(r#"tcp.payload = "a\"b""#);
    assert_eq!(toks, vec!["tcp.payload", "=", r#""a\"b""#]);
}

#[test]
fn lex_unterminated_quote_runs_to_end() {
    let toks = lex_all(r#""abc"#);
    assert_eq!(toks, vec!["\"abc"]);
}

#[test]
fn lex_hash_inside_token_is_content() {
    // `#` only opens a comment where whitespace is being skipped
    let toks = lex_all("ab#cd efg");
    assert_eq!(toks, vec!["ab#cd", "efg"]);
}

#[test]
fn lex_token_offsets() {
    let mut lexer = Lexer::new("  [ ip.ttl");
    assert_eq!(lexer.next_token().unwrap().offset, 2);
    assert_eq!(lexer.next_token().unwrap().offset, 4);
    assert!(lexer.next_token().is_none());
}

// ==================== Value type system ====================

#[test]
fn decimal_and_hex_predicates() {
    assert!(is_decimal("0"));
    assert!(is_decimal("65535"));
    assert!(!is_decimal(""));
    assert!(!is_decimal("12a"));
    assert!(!is_decimal("-1"));

    assert!(is_hex("0x0"));
    assert!(is_hex("0xfF"));
    assert!(!is_hex("0x"));
    assert!(!is_hex("12"));
    assert!(!is_hex("0xg1"));
}

#[test]
fn hex_wins_over_ipv4() {
    // precedence: `0x10` is a hex integer, never an address attempt
    assert!(is_hex("0x10"));
    assert_eq!(decode_unsigned("0x10"), Some(16));
    assert!(!is_ipv4("0x10"));
}

#[test]
fn ipv4_literals() {
    assert!(is_ipv4("192.168.0.1"));
    assert!(is_ipv4("0.0.0.0"));
    assert!(is_ipv4("255.255.255.255"));
    assert!(!is_ipv4("256.1.1.1"));
    assert!(!is_ipv4("1.1.1"));
    assert!(!is_ipv4("1.1.1.1.1"));
    assert!(!is_ipv4("abc"));
    assert!(!is_ipv4("1.2.3.4x"));
}

#[test]
fn ipv4_literal_may_be_quoted() {
    // signature files quote address literals; the verifier unwraps the
    // quotes before applying the dotted rules
    assert!(is_ipv4("\"192.168.0.1\""));
    assert_eq!(
        decode_ipv4("\"10.0.0.1\""),
        Some(AddrValue::Literal([10, 0, 0, 1]))
    );
    assert!(!is_ipv4("\"abc\""));
    assert!(!is_ipv4("\"256.1.1.1\""));
    // symbolic classes are bare tokens only
    assert!(!is_ipv4("\"european-ip\""));
}

#[test]
fn ipv4_symbolic_classes() {
    for label in [
        "north-american-ip",
        "south-american-ip",
        "asian-ip",
        "european-ip",
        "user-defined-ip",
    ] {
        assert!(is_ipv4(label), "{} must be accepted", label);
    }
    assert_eq!(
        decode_ipv4("european-ip"),
        Some(AddrValue::Class(AddrClass::European))
    );
    assert!(!is_ipv4("african-ip"));
}

#[test]
fn ipv4_empty_octet_runs_accumulate_to_zero() {
    // the octet accumulator treats an empty run as 0
    assert_eq!(decode_ipv4("1..2.3"), Some(AddrValue::Literal([1, 0, 2, 3])));
    assert_eq!(decode_ipv4("1.2.3."), Some(AddrValue::Literal([1, 2, 3, 0])));
}

#[test]
fn ipv4_decode_literal() {
    assert_eq!(
        decode_ipv4("192.168.0.1"),
        Some(AddrValue::Literal([192, 168, 0, 1]))
    );
}

#[test]
fn quoted_predicate_is_permissive_on_lone_quote() {
    assert!(is_quoted("\"abc\""));
    assert!(!is_quoted("abc"));
    assert!(!is_quoted("\"abc"));
    // a single `"` satisfies both the first- and last-character checks;
    // this lax acceptance is intentional and kept
    assert!(is_quoted("\""));
}

#[test]
fn width_bounds_u8() {
    assert!(fits_width("255", IntWidth::U8));
    assert!(fits_width("0xff", IntWidth::U8));
    assert!(!fits_width("256", IntWidth::U8));
    assert!(!fits_width("0x100", IntWidth::U8));
}

#[test]
fn width_bounds_u1() {
    for ok in ["0", "1", "0x0", "0x1"] {
        assert!(fits_width(ok, IntWidth::U1), "{} must fit u1", ok);
    }
    for bad in ["2", "0x2", "10"] {
        assert!(!fits_width(bad, IntWidth::U1), "{} must not fit u1", bad);
    }
}

#[test]
fn width_bounds_narrow_classes() {
    assert!(fits_width("7", IntWidth::U3));
    assert!(!fits_width("8", IntWidth::U3));
    assert!(fits_width("15", IntWidth::U4));
    assert!(!fits_width("16", IntWidth::U4));
    assert!(fits_width("63", IntWidth::U6));
    assert!(!fits_width("64", IntWidth::U6));
    assert!(fits_width("0x1fff", IntWidth::U13));
    assert!(!fits_width("0x2000", IntWidth::U13));
    assert!(fits_width("65535", IntWidth::U16));
    assert!(!fits_width("65536", IntWidth::U16));
}

#[test]
fn width_bounds_u32_and_overflow() {
    assert!(fits_width("4294967295", IntWidth::U32));
    assert!(fits_width("0xffffffff", IntWidth::U32));
    assert!(!fits_width("4294967296", IntWidth::U32));
    assert!(!fits_width("0x100000000", IntWidth::U32));
}

#[test]
fn ip_version_kind_accepts_only_four() {
    let kind = ValueKind::IpVersion;
    assert!(kind.verify("4"));
    assert!(kind.verify("0x4"));
    assert!(!kind.verify("6"));
    assert!(!kind.verify("0"));
    assert!(!kind.verify("16"));
}

#[test]
fn decode_quoted_strips_and_unescapes() {
    assert_eq!(decode_quoted("\"abc\""), "abc");
    assert_eq!(decode_quoted(r#""a\"b""#), "a\"b");
    assert_eq!(decode_quoted(r#""a\\b""#), "a\\b");
    assert_eq!(decode_quoted(r#""line\nbreak""#), "line\nbreak");
    assert_eq!(decode_quoted("\""), "");
}

// ==================== Pass 1: syntax & semantics ====================

fn check_err(src: &str) -> CompileError {
    check_source(src).expect_err("source must be rejected")
}

#[test]
fn check_accepts_well_formed_entries() {
    let src = r#"
# two signatures
[ signature = "a", ip.version = 4, ip.src = "1.2.3.4", ip.dst = "5.6.7.8",
  ip.protocol = 6 ]
[ signature = "b", ip.version = 4, ip.src = asian-ip, ip.dst = user-defined-ip,
  ip.protocol = 17, udp.src = 53, udp.dst = 53 ]
"#;
    check_source(src).expect("check");
}

#[test]
fn check_accepts_empty_source() {
    check_source("").expect("empty source is well-formed");
    check_source("# only a comment\n").expect("comment-only source is well-formed");
}

#[test]
fn check_rejects_entry_not_opened_with_bracket() {
    let err = check_err("signature = \"x\" ]");
    assert!(matches!(err, CompileError::MalformedEntryOpen { entry: 0, .. }), "{err}");
}

#[test]
fn check_rejects_unknown_field() {
    let err = check_err("[ ip.bogus = 1 ]");
    match err {
        CompileError::UnknownField { entry, token } => {
            assert_eq!(entry, 0);
            assert_eq!(token, "ip.bogus");
        }
        other => panic!("expected UnknownField, got {other}"),
    }
}

#[test]
fn check_rejects_empty_entry() {
    // `]` in field position is an unknown field, matching the table lookup
    let err = check_err("[]");
    assert!(matches!(err, CompileError::UnknownField { .. }), "{err}");
}

#[test]
fn check_rejects_duplicate_field() {
    let err = check_err("[ ip.ttl = 1, ip.ttl = 2 ]");
    match err {
        CompileError::DuplicateField { entry, label } => {
            assert_eq!(entry, 0);
            assert_eq!(label, "ip.ttl");
        }
        other => panic!("expected DuplicateField, got {other}"),
    }
}

#[test]
fn check_rejects_missing_equals() {
    let err = check_err("[ signature \"x\" ]");
    assert!(matches!(
        err,
        CompileError::MissingEquals { label: "signature", .. }
    ), "{err}");
}

#[test]
fn check_rejects_invalid_field_value() {
    let err = check_err("[ ip.ttl = 256 ]");
    match err {
        CompileError::InvalidFieldValue { label, token, .. } => {
            assert_eq!(label, "ip.ttl");
            assert_eq!(token, "256");
        }
        other => panic!("expected InvalidFieldValue, got {other}"),
    }
}

#[test]
fn check_rejects_ip_version_six() {
    let err = check_err("[ ip.version = 6 ]");
    assert!(matches!(
        err,
        CompileError::InvalidFieldValue { label: "ip.version", .. }
    ), "{err}");
}

#[test]
fn check_rejects_missing_separator() {
    let err = check_err("[ ip.version = 4 ip.ttl = 1 ]");
    assert!(matches!(err, CompileError::MissingSeparator { .. }), "{err}");
}

#[test]
fn check_rejects_truncated_entry() {
    for src in [
        "[",
        "[ ip.ttl",
        "[ ip.ttl =",
        "[ ip.ttl = 1",
        "[ ip.ttl = 1,",
    ] {
        let err = check_err(src);
        assert!(matches!(err, CompileError::UnexpectedEnd { entry: 0 }), "{src}: {err}");
    }
}

#[test]
fn check_reports_entry_index_of_later_entry() {
    let src = "[ ip.version = 4, ip.ttl = 1 ] [ ip.bogus = 1 ]";
    let err = check_err(src);
    assert!(matches!(err, CompileError::UnknownField { entry: 1, .. }), "{err}");
}

#[test]
fn check_allows_same_field_across_entries() {
    // the duplicate-field set is per entry
    let src = "[ ip.ttl = 1 ] [ ip.ttl = 2 ]";
    check_source(src).expect("check");
}

#[test]
fn compile_surfaces_pass1_error_unchanged() {
    let err = compile("[ ip.ttl = 999 ]").expect_err("compile must fail");
    assert!(matches!(err, CompileError::InvalidFieldValue { .. }), "{err}");
}
