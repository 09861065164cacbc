use thiserror::Error;

/// A malformed schema. Every variant carries the offending text so the
/// diagnostic can be acted on without re-reading the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("expected 'struct <name> {{ ... }};'")]
    MissingStructHeader,

    #[error("unexpected content before struct (only optional 'package <name>;' allowed): {0}")]
    UnexpectedPreamble(String),

    #[error("unterminated '{{' in struct {0}")]
    UnterminatedBrace(String),

    #[error("expected ';' after closing '}}' of struct {0}")]
    MissingSemicolon(String),

    #[error("unexpected trailing content after struct definition: {0}")]
    TrailingContent(String),

    #[error("invalid field declaration: {0}")]
    InvalidField(String),

    #[error("unsupported type {type_name} for field {field}")]
    UnsupportedType {
        field:     String,
        type_name: String,
    },

    #[error("array length of field {field} must be > 0, found {length}")]
    NonPositiveArrayLength {
        field:  String,
        length: String,
    },

    #[error("struct {0} has no fields")]
    NoFields(String),

    #[error("field {field} is declared twice")]
    DuplicateField {
        field: String,
    },

    #[error("payload of struct {struct_name} is {size} bytes, above the {max} byte limit")]
    PayloadTooLarge {
        struct_name: String,
        size:        u64,
        max:         u64,
    },

    #[error("fields {first} and {second} both map to Rust name {rust_name}")]
    RustNameCollision {
        first:     String,
        second:    String,
        rust_name: String,
    },

    #[error("struct name {0} has no Rust spelling")]
    InvalidRustName(String),
}

#[derive(Debug, Error)]
pub enum UmsgError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {error}", .path.as_deref().unwrap_or("<input>"))]
    Grammar {
        path:  Option<String>,
        error: GrammarError,
    },
}

impl From<GrammarError> for UmsgError {
    fn from(error: GrammarError) -> Self {
        UmsgError::Grammar { path: None, error }
    }
}

impl UmsgError {
    /// Attach the path of the schema being compiled to a grammar error.
    pub fn with_path(self, path: impl Into<String>) -> Self {
        match self {
            UmsgError::Grammar { error, .. } => UmsgError::Grammar {
                path: Some(path.into()),
                error,
            },
            other => other,
        }
    }
}
