//! Intermediate records produced by the grammar before the schema is assembled.

use crate::types::TypeDefinition;

/// A single `type <Name> <Definition>` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub definition: TypeDefinition,
    /// Line of the `type` keyword.
    pub line: usize,
}
