use super::ast::TypeDecl;
use super::{DuplicatePolicy, ParseOptions};
use crate::error::{Result, SchemaError};
use crate::types::ParsedSchema;

/// Build a `ParsedSchema` from parsed declarations.
///
/// Names are not resolved: references to undeclared types are kept as written.
pub fn build_schema(decls: Vec<TypeDecl>, options: &ParseOptions) -> Result<ParsedSchema> {
    let mut schema = ParsedSchema::new();

    for decl in decls {
        if schema.types.contains_key(&decl.name) {
            match options.duplicate_types {
                DuplicatePolicy::Reject => {
                    return Err(SchemaError::DuplicateType {
                        name: decl.name,
                        line: decl.line,
                    });
                }
                DuplicatePolicy::LastWins => {
                    tracing::warn!(name = %decl.name, line = decl.line, "type redefined, replacing earlier definition");
                }
            }
        }
        // `insert` on an existing key keeps the first declaration's position.
        schema.types.insert(decl.name, decl.definition);
    }

    tracing::debug!(types = schema.len(), "parsed schema");
    Ok(schema)
}
