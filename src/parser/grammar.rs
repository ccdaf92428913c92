use indexmap::IndexMap;

use super::ast::TypeDecl;
use super::lexer::{self, Token, TokenKind};
use super::schema_builder;
use super::ParseOptions;
use crate::error::{Expected, Result, SchemaError};
use crate::types::{FieldDefinition, ParsedSchema, ScalarKind, SchemaNode, TypeDefinition};

const REPRESENTATION_ADVANCED: [(TokenKind, &str); 3] = [
    (TokenKind::Keyword, "representation"),
    (TokenKind::Keyword, "advanced"),
    (TokenKind::Keyword, "RMT"),
];

/// Recursive-descent parser over a fully tokenized schema.
///
/// The parser owns its token list and a cursor that only moves forward,
/// except inside [`Parser::match_sequence`], which rewinds when a
/// multi-token match fails partway.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Node values currently being parsed.
    depth: usize,
    options: ParseOptions,
}

impl Parser {
    /// Create a parser over `tokens` with default options.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            options: ParseOptions::default(),
        }
    }

    /// Tokenize `source` and build a parser over the result.
    pub fn from_source(source: &str) -> Result<Self> {
        Ok(Self::new(lexer::tokenize(source)?))
    }

    /// Replace the parser's options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse every declaration and assemble the schema.
    pub fn parse(mut self) -> Result<ParsedSchema> {
        let decls = self.parse_declarations()?;
        schema_builder::build_schema(decls, &self.options)
    }

    /// Parse `type <Name> <Definition>` repeatedly until the tokens run out.
    pub fn parse_declarations(&mut self) -> Result<Vec<TypeDecl>> {
        let mut decls = Vec::new();
        while !self.is_at_end() {
            decls.push(self.parse_type_decl()?);
        }
        Ok(decls)
    }

    fn parse_type_decl(&mut self) -> Result<TypeDecl> {
        let line = self.consume(TokenKind::Keyword, Some("type"))?.line;
        let name = self.consume(TokenKind::Identifier, None)?.text;
        let definition = self.parse_type_definition()?;
        tracing::trace!(%name, line, "parsed type declaration");
        Ok(TypeDecl {
            name,
            definition,
            line,
        })
    }

    fn parse_type_definition(&mut self) -> Result<TypeDefinition> {
        let token = self.peek()?.clone();

        if let Some(scalar) = scalar_keyword(&token) {
            self.advance();
            return Ok(TypeDefinition::Scalar(scalar));
        }

        match (token.kind, token.text.as_str()) {
            (TokenKind::Keyword, "struct") => {
                self.advance();
                let fields = self.parse_struct_body()?;
                Ok(TypeDefinition::Struct { fields })
            }
            (TokenKind::Keyword, "enum") => {
                self.advance();
                let values = self.parse_enum_body()?;
                Ok(TypeDefinition::Enum { values })
            }
            (TokenKind::Keyword, "map") => {
                self.advance();
                let node = self.parse_map()?;
                self.finish_representable(node)
            }
            (TokenKind::Symbol, "{") => {
                let node = self.parse_map()?;
                self.finish_representable(node)
            }
            (TokenKind::Keyword, "list") => {
                self.advance();
                let node = self.parse_list_body()?;
                self.finish_representable(node)
            }
            (TokenKind::Symbol, "[") => {
                let node = self.parse_inline_list()?;
                self.finish_representable(node)
            }
            (TokenKind::Keyword, "link") | (TokenKind::Symbol, "&") => {
                self.advance();
                Ok(TypeDefinition::Node {
                    value: self.parse_link()?,
                    advanced: false,
                })
            }
            _ => {
                let name = self.consume(TokenKind::Identifier, None)?.text;
                Ok(TypeDefinition::Node {
                    value: SchemaNode::Type { name },
                    advanced: false,
                })
            }
        }
    }

    /// Wrap a map or list body, consuming a trailing `representation advanced RMT`.
    fn finish_representable(&mut self, value: SchemaNode) -> Result<TypeDefinition> {
        if self.match_sequence(&REPRESENTATION_ADVANCED) {
            return Ok(TypeDefinition::Node {
                value,
                advanced: true,
            });
        }

        if self.check(TokenKind::Keyword, Some("representation")) {
            let line = self.tokens[self.pos].line;
            let message = match self.tokens.get(self.pos + 1) {
                Some(next) => format!(
                    "expected 'advanced RMT' after 'representation', found {} '{}'",
                    next.kind, next.text
                ),
                None => "expected 'advanced RMT' after 'representation'".to_string(),
            };
            return Err(SchemaError::InvalidRepresentation { line, message });
        }

        Ok(TypeDefinition::Node {
            value,
            advanced: false,
        })
    }

    fn parse_struct_body(&mut self) -> Result<IndexMap<String, FieldDefinition>> {
        self.consume(TokenKind::Symbol, Some("{"))?;

        let mut fields = IndexMap::new();
        while !self.check(TokenKind::Symbol, Some("}")) {
            let name = self.consume(TokenKind::Identifier, None)?.text;
            // Modifiers are only recognized in this order.
            let optional = self.match_token(TokenKind::Keyword, Some("optional"));
            let value_nullable = self.match_token(TokenKind::Keyword, Some("nullable"));
            let field_type = self.parse_node_value()?;
            fields.insert(
                name,
                FieldDefinition {
                    field_type,
                    optional,
                    value_nullable,
                },
            );
        }

        self.consume(TokenKind::Symbol, Some("}"))?;
        Ok(fields)
    }

    fn parse_enum_body(&mut self) -> Result<Vec<String>> {
        self.consume(TokenKind::Symbol, Some("{"))?;

        let mut values = Vec::new();
        while !self.check(TokenKind::Symbol, Some("}")) {
            values.push(self.consume(TokenKind::Identifier, None)?.text);
            if !self.check(TokenKind::Symbol, Some("}")) {
                self.consume(TokenKind::Symbol, Some(","))?;
            }
        }

        self.consume(TokenKind::Symbol, Some("}"))?;
        Ok(values)
    }

    /// A type expression in field, list element or map value position.
    /// Never yields an inline struct or enum.
    fn parse_node_value(&mut self) -> Result<SchemaNode> {
        let line = self.peek()?.line;
        if self.depth >= self.options.max_depth {
            return Err(SchemaError::NestingTooDeep {
                line,
                limit: self.options.max_depth,
            });
        }

        self.depth += 1;
        let node = self.parse_node_body();
        self.depth -= 1;
        node
    }

    fn parse_node_body(&mut self) -> Result<SchemaNode> {
        let token = self.peek()?.clone();

        if let Some(scalar) = scalar_keyword(&token) {
            self.advance();
            return Ok(SchemaNode::Scalar(scalar));
        }

        match (token.kind, token.text.as_str()) {
            (TokenKind::Symbol, "[") => self.parse_inline_list(),
            (TokenKind::Symbol, "{") => self.parse_map(),
            (TokenKind::Symbol, "&") => {
                self.advance();
                self.parse_link()
            }
            (TokenKind::Keyword, kind @ ("struct" | "enum")) => {
                Err(SchemaError::InlineComplexTypeNotAllowed {
                    line: token.line,
                    kind: kind.to_string(),
                })
            }
            _ => {
                let name = self.consume(TokenKind::Identifier, None)?.text;
                Ok(SchemaNode::Type { name })
            }
        }
    }

    fn parse_link(&mut self) -> Result<SchemaNode> {
        let expected_type = self.consume(TokenKind::Identifier, None)?.text;
        Ok(SchemaNode::Link { expected_type })
    }

    /// `{ String : [nullable] <node> }`
    fn parse_map(&mut self) -> Result<SchemaNode> {
        self.consume(TokenKind::Symbol, Some("{"))?;

        if !self.match_token(TokenKind::Keyword, Some("String")) {
            let found = self.peek()?;
            return Err(SchemaError::InvalidType {
                line: found.line,
                found: found.text.clone(),
            });
        }

        self.consume(TokenKind::Symbol, Some(":"))?;
        let value_nullable = self.match_token(TokenKind::Keyword, Some("nullable"));
        let value_type = self.parse_node_value()?;
        self.consume(TokenKind::Symbol, Some("}"))?;

        Ok(SchemaNode::map(value_type, value_nullable))
    }

    /// Body after the `list` keyword: `[nullable] <node>`
    fn parse_list_body(&mut self) -> Result<SchemaNode> {
        let value_nullable = self.match_token(TokenKind::Keyword, Some("nullable"));
        let value_type = self.parse_node_value()?;
        Ok(SchemaNode::list(value_type, value_nullable))
    }

    /// `[ [nullable] <node> ]`
    fn parse_inline_list(&mut self) -> Result<SchemaNode> {
        self.consume(TokenKind::Symbol, Some("["))?;
        let value_nullable = self.match_token(TokenKind::Keyword, Some("nullable"));
        let value_type = self.parse_node_value()?;
        self.consume(TokenKind::Symbol, Some("]"))?;
        Ok(SchemaNode::list(value_type, value_nullable))
    }

    // Cursor primitives

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The current token, without consuming it.
    pub fn peek(&self) -> Result<&Token> {
        self.tokens
            .get(self.pos)
            .ok_or(SchemaError::UnexpectedEndOfInput)
    }

    /// Move past the current token, returning the position it was at.
    pub fn advance(&mut self) -> usize {
        let current = self.pos;
        self.pos += 1;
        current
    }

    /// Whether the current token has `kind` (and `text`, if given).
    pub fn check(&self, kind: TokenKind, text: Option<&str>) -> bool {
        match self.tokens.get(self.pos) {
            Some(token) => token.kind == kind && text.map_or(true, |t| token.text == t),
            None => false,
        }
    }

    /// Consume the current token if it passes [`Parser::check`].
    pub fn match_token(&mut self, kind: TokenKind, text: Option<&str>) -> bool {
        if self.check(kind, text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a run of tokens only if all of them match; otherwise leave the
    /// cursor where it started.
    pub fn match_sequence(&mut self, expected: &[(TokenKind, &str)]) -> bool {
        let saved = self.pos;
        for &(kind, text) in expected {
            if !self.match_token(kind, Some(text)) {
                self.pos = saved;
                return false;
            }
        }
        true
    }

    /// Consume the current token, which must pass [`Parser::check`].
    pub fn consume(&mut self, kind: TokenKind, text: Option<&str>) -> Result<Token> {
        if self.check(kind, text) {
            let idx = self.advance();
            return Ok(self.tokens[idx].clone());
        }

        let found = self.peek()?;
        Err(SchemaError::InvalidToken {
            line: found.line,
            expected: Expected {
                kind,
                text: text.map(str::to_string),
            },
            found_kind: found.kind,
            found_text: found.text.clone(),
        })
    }
}

fn scalar_keyword(token: &Token) -> Option<ScalarKind> {
    if token.kind == TokenKind::Keyword {
        ScalarKind::from_keyword(&token.text)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser {
        Parser::from_source(source).unwrap()
    }

    #[test]
    fn test_peek_at_end() {
        let p = parser("");
        assert!(p.is_at_end());
        assert_eq!(p.peek().unwrap_err(), SchemaError::UnexpectedEndOfInput);
    }

    #[test]
    fn test_advance_returns_previous_position() {
        let mut p = parser("type T Int");
        assert_eq!(p.advance(), 0);
        assert_eq!(p.advance(), 1);
        assert_eq!(p.peek().unwrap().text, "Int");
    }

    #[test]
    fn test_check_does_not_consume() {
        let p = parser("type T");
        assert!(p.check(TokenKind::Keyword, Some("type")));
        assert!(p.check(TokenKind::Keyword, None));
        assert!(!p.check(TokenKind::Identifier, None));
        assert!(!p.check(TokenKind::Keyword, Some("struct")));
        assert_eq!(p.peek().unwrap().text, "type");
    }

    #[test]
    fn test_match_token() {
        let mut p = parser("optional nullable");
        assert!(!p.match_token(TokenKind::Keyword, Some("nullable")));
        assert!(p.match_token(TokenKind::Keyword, Some("optional")));
        assert!(p.match_token(TokenKind::Keyword, Some("nullable")));
        assert!(!p.match_token(TokenKind::Keyword, None));
    }

    #[test]
    fn test_match_sequence_rewinds_on_partial_match() {
        let mut p = parser("representation advanced Foo");
        assert!(!p.match_sequence(&REPRESENTATION_ADVANCED));
        assert_eq!(p.peek().unwrap().text, "representation");
    }

    #[test]
    fn test_match_sequence_consumes_on_full_match() {
        let mut p = parser("representation advanced RMT");
        assert!(p.match_sequence(&REPRESENTATION_ADVANCED));
        assert!(p.is_at_end());
    }

    #[test]
    fn test_consume_reports_expected_and_found() {
        let mut p = parser("\n\nstruct");
        let err = p.consume(TokenKind::Keyword, Some("type")).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidToken {
                line: 3,
                expected: Expected {
                    kind: TokenKind::Keyword,
                    text: Some("type".into()),
                },
                found_kind: TokenKind::Keyword,
                found_text: "struct".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "line 3: expected keyword 'type', found keyword 'struct'"
        );
    }

    #[test]
    fn test_consume_at_end() {
        let mut p = parser("type");
        p.advance();
        assert_eq!(
            p.consume(TokenKind::Identifier, None).unwrap_err(),
            SchemaError::UnexpectedEndOfInput
        );
    }

    #[test]
    fn test_parse_declarations_keeps_lines() {
        let mut p = parser("type A Int\n\ntype B [A]");
        let decls = p.parse_declarations().unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "A");
        assert_eq!(decls[0].line, 1);
        assert_eq!(decls[1].name, "B");
        assert_eq!(decls[1].line, 3);
        assert_eq!(
            decls[1].definition,
            TypeDefinition::Node {
                value: SchemaNode::list(SchemaNode::named("A"), false),
                advanced: false,
            }
        );
    }

    #[test]
    fn test_nested_node_values() {
        let mut p = parser("type T [{ String : nullable [&Block] }]");
        let decls = p.parse_declarations().unwrap();
        assert_eq!(
            decls[0].definition,
            TypeDefinition::Node {
                value: SchemaNode::list(
                    SchemaNode::map(SchemaNode::list(SchemaNode::link("Block"), false), true),
                    false,
                ),
                advanced: false,
            }
        );
    }

    #[test]
    fn test_depth_is_restored_after_node_values() {
        let mut p = parser("type A [[Int]] type B { String : [Int] }")
            .with_options(ParseOptions::new().max_depth(2));
        let decls = p.parse_declarations().unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(p.depth, 0);
    }

    #[test]
    fn test_list_keyword_with_nullable() {
        let mut p = parser("type T list nullable Int");
        let decls = p.parse_declarations().unwrap();
        assert_eq!(
            decls[0].definition,
            TypeDefinition::Node {
                value: SchemaNode::list(SchemaNode::Scalar(ScalarKind::Int), true),
                advanced: false,
            }
        );
    }
}
