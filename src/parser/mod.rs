pub mod lexer;
pub mod ast;
pub mod grammar;
pub mod schema_builder;

use crate::error::Result;
use crate::types::ParsedSchema;

pub use grammar::Parser;

/// What to do when the same type name is declared more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later definition replaces the earlier one.
    #[default]
    LastWins,
    /// Fail with `SchemaError::DuplicateType`.
    Reject,
}

/// Default limit on nested list and map values.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub duplicate_types: DuplicatePolicy,
    /// Deepest allowed nesting of node values (list elements, map values,
    /// field types). Deeper input fails with `SchemaError::NestingTooDeep`.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            duplicate_types: DuplicatePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duplicate_types(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_types = policy;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse schema text into a `ParsedSchema` with default options.
///
/// This is the main entry point for the parser module.
pub fn parse(schema_text: &str) -> Result<ParsedSchema> {
    parse_with_options(schema_text, ParseOptions::default())
}

/// Parse schema text with explicit options.
pub fn parse_with_options(schema_text: &str, options: ParseOptions) -> Result<ParsedSchema> {
    Parser::from_source(schema_text)?
        .with_options(options)
        .parse()
}
