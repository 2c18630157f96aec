//! Value type system: classify and decode field value tokens.
//!
//! Classification precedence is fixed: decimal integer, hex integer, IPv4
//! (symbolic class or dotted literal), quoted string. `0x10` therefore
//! classifies as hex before any IPv4 attempt is made.

use crate::ast::{AddrClass, AddrValue, IntWidth};

const SYMBOLIC_CLASSES: &[(&str, AddrClass)] = &[
    ("north-american-ip", AddrClass::NorthAmerican),
    ("south-american-ip", AddrClass::SouthAmerican),
    ("asian-ip", AddrClass::Asian),
    ("european-ip", AddrClass::European),
    ("user-defined-ip", AddrClass::UserDefined),
];

/// Non-empty run of ASCII digits.
pub fn is_decimal(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// `0x` followed by one or more hex digits.
pub fn is_hex(token: &str) -> bool {
    match token.strip_prefix("0x") {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Symbolic address class or dotted literal with four octet runs in 0..=255.
pub fn is_ipv4(token: &str) -> bool {
    decode_ipv4(token).is_some()
}

/// First and last character are `"`. A lone `"` passes: the two quotes are
/// not required to be distinct characters.
pub fn is_quoted(token: &str) -> bool {
    token.starts_with('"') && token.ends_with('"')
}

/// Decode a hex or decimal token, hex first. `None` when the token is
/// neither form or does not fit in 32 bits.
pub fn decode_unsigned(token: &str) -> Option<u32> {
    if is_hex(token) {
        u32::from_str_radix(&token[2..], 16).ok()
    } else if is_decimal(token) {
        token.parse::<u32>().ok()
    } else {
        None
    }
}

/// Decoded value exists and fits `width`.
pub fn fits_width(token: &str, width: IntWidth) -> bool {
    decode_unsigned(token).is_some_and(|v| v <= width.max_value())
}

/// Decode an IPv4 token: a symbolic class tag (always bare), or four
/// dot-separated octet runs, written bare or surrounded by quotes. An empty
/// run accumulates to 0 (`1..2.3` is `1.0.2.3`), matching the accumulator
/// the dotted form is defined by; the last run is checked at end-of-string
/// like any other.
pub fn decode_ipv4(token: &str) -> Option<AddrValue> {
    for (label, class) in SYMBOLIC_CLASSES {
        if token == *label {
            return Some(AddrValue::Class(*class));
        }
    }
    let token = match token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => inner,
        None => token,
    };
    if token.is_empty() || token.bytes().any(|b| b != b'.' && !b.is_ascii_digit()) {
        return None;
    }
    let mut octets = [0u8; 4];
    let mut count = 0usize;
    for run in token.split('.') {
        if count == 4 {
            return None;
        }
        let n: u32 = if run.is_empty() { 0 } else { run.parse().ok()? };
        if n > 255 {
            return None;
        }
        octets[count] = n as u8;
        count += 1;
    }
    if count != 4 {
        return None;
    }
    Some(AddrValue::Literal(octets))
}

/// Strip the surrounding quotes and resolve escapes: `\n`, `\t`, `\r` map to
/// their control characters, any other `\c` to `c`.
pub fn decode_quoted(token: &str) -> String {
    let inner = token.strip_prefix('"').unwrap_or(token);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
