//! Loader errors.

use std::io;

use crate::symbols::Namespace;

/// Error raised while loading a module.
///
/// Every variant is terminal for the current load: malformed bytecode is not
/// transient, so nothing is retried and no partial module ever escapes the
/// loader. Variants carry the byte offset or entity index needed to render
/// an actionable diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("bad magic {found:#010x} (expected {expected:#010x})")]
    BadMagic { expected: u32, found: u32 },

    #[error("unsupported version {found} (supported {min}..={max})")]
    UnsupportedVersion { found: u16, min: u16, max: u16 },

    #[error("malformed header: {detail}")]
    MalformedHeader { detail: String },

    #[error("truncated input at offset {offset}: wanted {wanted} bytes, {remaining} remain")]
    TruncatedInput {
        offset: usize,
        wanted: usize,
        remaining: usize,
    },

    #[error("constant {index}: unknown tag {tag:#04x}")]
    UnknownConstantTag { index: u32, tag: u8 },

    #[error("invalid utf-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("symbol {index}: duplicate '{name}' in {namespace} namespace")]
    DuplicateSymbol {
        index: u32,
        namespace: Namespace,
        name: String,
    },

    #[error("procedure {index}: arity {arity} exceeds {local_slots} local slots")]
    InvalidArity {
        index: u32,
        arity: u16,
        local_slots: u16,
    },

    #[error("procedure {index}: empty body")]
    EmptyProcedureBody { index: u32 },

    #[error("unresolved symbol '{name}' in {namespace} namespace")]
    UnresolvedSymbol { namespace: Namespace, name: String },

    #[error("symbol {index}: {detail}")]
    SymbolKindMismatch { index: u32, detail: String },

    #[error("{what} index {found} out of range (limit {limit})")]
    IndexOutOfRange {
        what: &'static str,
        found: u32,
        limit: u32,
    },
}
