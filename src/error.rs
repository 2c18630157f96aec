//! Compilation errors.
//!
//! Every variant is fatal to the current run: the first violation is
//! returned and nothing materialized for that run survives. Errors are not
//! aggregated; recompiling after a fix surfaces the next one.

use thiserror::Error;

/// Any failure while compiling signature source.
///
/// Entry indices are zero-based source order of the `[ ... ]` blocks. Once a
/// signature name is known (pass 2 onward), diagnostics carry the name
/// instead.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("entry {entry}: expected `[` to open a signature, got {token:?}")]
    MalformedEntryOpen { entry: usize, token: String },

    #[error("entry {entry}: unknown field {token:?}")]
    UnknownField { entry: usize, token: String },

    #[error("entry {entry}: field {label:?} redeclared")]
    DuplicateField { entry: usize, label: &'static str },

    #[error("entry {entry}: expected `=` after field {label:?}, got {token:?}")]
    MissingEquals {
        entry: usize,
        label: &'static str,
        token: String,
    },

    #[error("entry {entry}: field {label:?} has invalid data ({token:?})")]
    InvalidFieldValue {
        entry: usize,
        label: &'static str,
        token: String,
    },

    #[error("entry {entry}: expected `,` or `]`, got {token:?}")]
    MissingSeparator { entry: usize, token: String },

    #[error("entry {entry}: source ends inside the signature block")]
    UnexpectedEnd { entry: usize },

    #[error("entry {entry}: signature field missing")]
    MissingSignatureName { entry: usize },

    #[error("signature {name:?} redeclared")]
    DuplicateSignatureName { name: String },

    #[error("signature {signature:?}: ip.version missing or unsupported")]
    MissingOrUnsupportedIpVersion { signature: String },

    #[error("signature {signature:?}: field {label:?} is required")]
    MissingRequiredIpv4Field {
        signature: String,
        label: &'static str,
    },

    #[error("signature {signature:?}: transport field {label:?} without ip.protocol")]
    TransportFieldWithoutProtocol {
        signature: String,
        label: &'static str,
    },
}
