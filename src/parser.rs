//! Two-pass compiler front end.
//!
//! Pass 1 walks the token stream entry by entry and enforces the grammar
//! (`[ field = value , ... ]`), field-name legality, per-entry duplication,
//! and per-field value types without building anything. Pass 2 re-lexes the
//! buffer, by then known valid, and materializes the typed signature set,
//! enforcing file-wide name uniqueness. Both passes abort on the first
//! violation, so a caller only ever sees a fully valid [`CompiledSet`] or a
//! [`CompileError`].

use std::collections::HashSet;
use std::path::Path;

use crate::ast::{CompiledSet, FieldValue, Signature};
use crate::error::CompileError;
use crate::fields::{self, FieldId};
use crate::lexer::Lexer;
use crate::validate;
use crate::value;

/// Compile signature source text into a validated [`CompiledSet`].
///
/// Runs the syntax/semantic check, materializes the signatures, then applies
/// the cross-field policies. Either the full set is returned or nothing is.
pub fn compile(source: &str) -> Result<CompiledSet, CompileError> {
    check_source(source)?;
    let set = materialize(source)?;
    validate::check_policies(&set)?;
    Ok(set)
}

/// Compile a signature file. An unreadable file is fatal like any other
/// error; no partial read is attempted.
pub fn compile_file<P: AsRef<Path>>(path: P) -> Result<CompiledSet, CompileError> {
    let source = std::fs::read_to_string(path)?;
    compile(&source)
}

/// Pass 1: validate grammar and per-entry field legality without allocating
/// any output. An empty buffer, or one holding only blanks and comments, is
/// well-formed (no signatures).
pub fn check_source(source: &str) -> Result<(), CompileError> {
    let mut lexer = Lexer::new(source);
    let mut entry = 0usize;
    while let Some(open) = lexer.next_token() {
        if open.as_str() != "[" {
            return Err(CompileError::MalformedEntryOpen {
                entry,
                token: open.text,
            });
        }
        check_entry(&mut lexer, entry)?;
        entry += 1;
    }
    Ok(())
}

/// One entry: `field = value` pairs separated by `,`, closed by `]`. Each
/// loop iteration consumes one pair and its separator.
fn check_entry(lexer: &mut Lexer, entry: usize) -> Result<(), CompileError> {
    let mut seen: HashSet<FieldId> = HashSet::new();
    loop {
        let token = next_or_end(lexer, entry)?;
        let desc = match fields::lookup(token.as_str()) {
            Some(d) => d,
            None => {
                return Err(CompileError::UnknownField {
                    entry,
                    token: token.text,
                })
            }
        };
        if !seen.insert(desc.id) {
            return Err(CompileError::DuplicateField {
                entry,
                label: desc.label,
            });
        }

        let token = next_or_end(lexer, entry)?;
        if token.as_str() != "=" {
            return Err(CompileError::MissingEquals {
                entry,
                label: desc.label,
                token: token.text,
            });
        }

        let token = next_or_end(lexer, entry)?;
        if !desc.kind.verify(token.as_str()) {
            return Err(CompileError::InvalidFieldValue {
                entry,
                label: desc.label,
                token: token.text,
            });
        }

        let token = next_or_end(lexer, entry)?;
        match token.as_str() {
            "," => continue,
            "]" => return Ok(()),
            _ => {
                return Err(CompileError::MissingSeparator {
                    entry,
                    token: token.text,
                })
            }
        }
    }
}

fn next_or_end(lexer: &mut Lexer, entry: usize) -> Result<crate::lexer::Token, CompileError> {
    lexer
        .next_token()
        .ok_or(CompileError::UnexpectedEnd { entry })
}

/// Pass 2: re-lex the validated buffer and build the signature set. Private
/// so the pass-1 invariants (grammar shape, no duplicate fields per entry)
/// hold structurally; decode failures are still propagated, never unwrapped.
fn materialize(source: &str) -> Result<CompiledSet, CompileError> {
    let mut lexer = Lexer::new(source);
    let mut set = CompiledSet::new();
    let mut entry = 0usize;
    // each iteration consumes one `[` and the entry behind it
    while lexer.next_token().is_some() {
        let signature = materialize_entry(&mut lexer, entry)?;
        set.push(signature)?;
        entry += 1;
    }
    Ok(set)
}

fn materialize_entry(lexer: &mut Lexer, entry: usize) -> Result<Signature, CompileError> {
    let mut name: Option<String> = None;
    let mut values: Vec<FieldValue> = Vec::new();
    loop {
        let label = match lexer.next_token() {
            Some(t) if t.as_str() != "]" => t,
            _ => break,
        };
        let desc = match fields::lookup(label.as_str()) {
            Some(d) => d,
            None => {
                return Err(CompileError::UnknownField {
                    entry,
                    token: label.text,
                })
            }
        };
        let _equals = next_or_end(lexer, entry)?;
        let token = next_or_end(lexer, entry)?;
        if desc.id == FieldId::Signature {
            name = Some(value::decode_quoted(token.as_str()));
        } else {
            let value = match desc.kind.decode(token.as_str()) {
                Some(v) => v,
                None => {
                    return Err(CompileError::InvalidFieldValue {
                        entry,
                        label: desc.label,
                        token: token.text,
                    })
                }
            };
            values.push(FieldValue {
                id: desc.id,
                value,
            });
        }
        match lexer.next_token() {
            Some(t) if t.as_str() == "," => continue,
            _ => break,
        }
    }
    let name = name.ok_or(CompileError::MissingSignatureName { entry })?;
    Ok(Signature {
        name,
        fields: values,
    })
}
