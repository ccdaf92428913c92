use std::fmt;

use crate::parser::lexer::TokenKind;

/// What the parser wanted to see when it rejected a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected {
    pub kind: TokenKind,
    /// The exact lexeme required, or `None` when any token of `kind` will do.
    pub text: Option<String>,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} '{}'", self.kind, text),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Errors from the schema tokenizer and parser.
///
/// Every error is fatal to the current parse: no partial schema is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("syntax error at line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("line {line}: expected {expected}, found {found_kind} '{found_text}'")]
    InvalidToken {
        line: usize,
        expected: Expected,
        found_kind: TokenKind,
        found_text: String,
    },

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("invalid type at line {line}: map key must be String, found '{found}'")]
    InvalidType { line: usize, found: String },

    #[error("invalid representation at line {line}: {message}")]
    InvalidRepresentation { line: usize, message: String },

    #[error("invalid union representation at line {line}: {message}")]
    InvalidUnionRepresentation { line: usize, message: String },

    #[error("inline {kind} definition not allowed at line {line}")]
    InlineComplexTypeNotAllowed { line: usize, kind: String },

    #[error("nesting deeper than {limit} levels at line {line}")]
    NestingTooDeep { line: usize, limit: usize },

    #[error("redefined type '{name}' at line {line}")]
    DuplicateType { name: String, line: usize },
}

impl SchemaError {
    /// Source line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            SchemaError::InvalidSyntax { line, .. }
            | SchemaError::InvalidToken { line, .. }
            | SchemaError::InvalidType { line, .. }
            | SchemaError::InvalidRepresentation { line, .. }
            | SchemaError::InvalidUnionRepresentation { line, .. }
            | SchemaError::InlineComplexTypeNotAllowed { line, .. }
            | SchemaError::NestingTooDeep { line, .. }
            | SchemaError::DuplicateType { line, .. } => Some(*line),
            SchemaError::UnexpectedEndOfInput => None,
        }
    }
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
