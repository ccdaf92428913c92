use std::fmt;

use indexmap::IndexMap;

/// A built-in scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    String,
    Bytes,
}

impl ScalarKind {
    /// The schema keyword spelling of this scalar.
    pub fn keyword(self) -> &'static str {
        match self {
            ScalarKind::Bool => "Bool",
            ScalarKind::Int => "Int",
            ScalarKind::Float => "Float",
            ScalarKind::String => "String",
            ScalarKind::Bytes => "Bytes",
        }
    }

    /// Look up a scalar by its schema keyword. Matching is case-sensitive.
    pub fn from_keyword(text: &str) -> Option<ScalarKind> {
        match text {
            "Bool" => Some(ScalarKind::Bool),
            "Int" => Some(ScalarKind::Int),
            "Float" => Some(ScalarKind::Float),
            "String" => Some(ScalarKind::String),
            "Bytes" => Some(ScalarKind::Bytes),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A structural type expression: the type of a struct field, list element,
/// map value, or the body of a named alias.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchemaNode {
    Scalar(ScalarKind),
    /// A link whose target is expected to be of the named type.
    /// The name is recorded as written and never resolved.
    Link { expected_type: String },
    /// A reference to another named type, possibly declared later or not at all.
    Type { name: String },
    List {
        value_type: Box<SchemaNode>,
        value_nullable: bool,
    },
    /// Map keys are always `String`, so only the value type is kept.
    Map {
        value_type: Box<SchemaNode>,
        value_nullable: bool,
    },
}

impl SchemaNode {
    /// A list node with the given element type.
    pub fn list(value_type: SchemaNode, value_nullable: bool) -> Self {
        SchemaNode::List {
            value_type: Box::new(value_type),
            value_nullable,
        }
    }

    /// A `String`-keyed map node with the given value type.
    pub fn map(value_type: SchemaNode, value_nullable: bool) -> Self {
        SchemaNode::Map {
            value_type: Box::new(value_type),
            value_nullable,
        }
    }

    /// A link expected to point at `expected_type`.
    pub fn link(expected_type: impl Into<String>) -> Self {
        SchemaNode::Link {
            expected_type: expected_type.into(),
        }
    }

    /// A reference to the type called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        SchemaNode::Type { name: name.into() }
    }

    /// The type name this node points at directly, for `Type` and `Link` nodes.
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            SchemaNode::Type { name } => Some(name.as_str()),
            SchemaNode::Link { expected_type } => Some(expected_type.as_str()),
            SchemaNode::Scalar(_) | SchemaNode::List { .. } | SchemaNode::Map { .. } => None,
        }
    }
}

/// A struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub field_type: SchemaNode,
    /// The field may be absent.
    pub optional: bool,
    /// The field may be present with a null value.
    pub value_nullable: bool,
}

impl FieldDefinition {
    /// A field with explicit modifier flags.
    pub fn new(field_type: SchemaNode, optional: bool, value_nullable: bool) -> Self {
        FieldDefinition {
            field_type,
            optional,
            value_nullable,
        }
    }

    /// A required, non-nullable field.
    pub fn required(field_type: SchemaNode) -> Self {
        Self::new(field_type, false, false)
    }
}

/// The definition bound to a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDefinition {
    Scalar(ScalarKind),
    /// Fields in declaration order.
    Struct { fields: IndexMap<String, FieldDefinition> },
    /// Members in declaration order.
    Enum { values: Vec<String> },
    /// An alias for a structural node. `advanced` is set when the body was
    /// followed by `representation advanced RMT`.
    Node { value: SchemaNode, advanced: bool },
}

impl TypeDefinition {
    pub fn is_advanced(&self) -> bool {
        matches!(self, TypeDefinition::Node { advanced: true, .. })
    }
}

/// The result of parsing a schema: type definitions keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedSchema {
    /// Types in the order their names were first declared.
    pub types: IndexMap<String, TypeDefinition>,
}

impl ParsedSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a type definition by name.
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Whether a type called `name` was declared.
    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of distinct type names.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types were declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDefinition)> {
        self.types.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Type names in declaration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Consume the schema, returning the underlying ordered map.
    pub fn into_types(self) -> IndexMap<String, TypeDefinition> {
        self.types
    }
}
