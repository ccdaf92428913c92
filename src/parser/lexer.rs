use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;

use crate::error::{Result, SchemaError};

lazy_static! {
    /// Reserved words. Only whole identifier-shaped lexemes are matched.
    static ref KEYWORDS: HashSet<&'static str> = [
        "type",
        "representation",
        "advanced",
        "optional",
        "nullable",
        "struct",
        "enum",
        "Bool",
        "String",
        "Bytes",
        "Int",
        "Float",
        "map",
        "list",
        "link",
        "RMT",
    ]
    .into_iter()
    .collect();
}

/// Whether `text` is a reserved word.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(text)
}

/// Token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    /// One of `{ } [ ] : , &`
    Symbol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Symbol => "symbol",
        })
    }
}

/// A token with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

/// Tokenizer for schema text.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next_char(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    fn read_word(&mut self) -> Token {
        let line = self.line;
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if Self::is_word_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.input[start..self.pos];
        let kind = if is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, line)
    }

    fn skip_line_comment(&mut self) {
        // Leave the newline for the main loop.
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        let start_line = self.line;
        // Skip "/*"
        self.advance();
        self.advance();
        while let Some(c) = self.advance() {
            if c == '*' && self.peek_char() == Some('/') {
                self.advance();
                return Ok(());
            }
        }
        Err(SchemaError::InvalidSyntax {
            line: start_line,
            message: "unterminated block comment".into(),
        })
    }

    /// Scan the whole input. Fails on the first bad character; no partial
    /// token list is returned.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '{' | '}' | '[' | ']' | ':' | ',' | '&' => {
                    tokens.push(Token::new(TokenKind::Symbol, c.to_string(), self.line));
                    self.advance();
                }
                '/' => match self.peek_next_char() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment()?,
                    _ => {
                        return Err(SchemaError::InvalidSyntax {
                            line: self.line,
                            message: "unexpected character '/'".into(),
                        });
                    }
                },
                c if Self::is_word_char(c) => tokens.push(self.read_word()),
                c => {
                    return Err(SchemaError::InvalidSyntax {
                        line: self.line,
                        message: format!("unexpected character '{}'", c),
                    });
                }
            }
        }

        tracing::debug!(tokens = tokens.len(), lines = self.line, "tokenized schema");
        Ok(tokens)
    }
}

/// Tokenize schema text.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
