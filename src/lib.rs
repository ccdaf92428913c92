//! A parser for a subset of the IPLD Schema language.
//!
//! Schema text is tokenized in one pass and then parsed by a recursive-descent
//! parser into a map from type name to [`TypeDefinition`]. Supported kinds are
//! the five scalars, structs with `optional`/`nullable` fields, enums, lists,
//! maps with `String` keys, links, and references to other named types.
//! Lists and maps may carry a `representation advanced RMT` annotation.
//!
//! Type references are stored by name and never resolved, so forward and
//! cyclic references parse without complaint.
//!
//! # Quick Start
//!
//! ```rust
//! use ipld_schema::{parse, FieldDefinition, ScalarKind, SchemaNode, TypeDefinition};
//!
//! let schema = parse(r#"
//!     type Person struct {
//!         name String
//!         age optional Int
//!         friends [&Person]
//!     }
//! "#).unwrap();
//!
//! let TypeDefinition::Struct { fields } = schema.get_type("Person").unwrap() else {
//!     panic!("expected a struct");
//! };
//! assert_eq!(fields["age"], FieldDefinition::new(SchemaNode::Scalar(ScalarKind::Int), true, false));
//! assert_eq!(fields["friends"].field_type, SchemaNode::list(SchemaNode::link("Person"), false));
//! ```

pub mod error;
pub mod types;
pub mod parser;

pub use error::{Result, SchemaError};
pub use parser::{parse, parse_with_options, DuplicatePolicy, ParseOptions, Parser};
pub use types::{FieldDefinition, ParsedSchema, ScalarKind, SchemaNode, TypeDefinition};
