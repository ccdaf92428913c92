use ipld_schema::parser::lexer::{is_keyword, tokenize, Lexer, TokenKind};
use pretty_assertions::assert_eq;

#[test]
fn test_scalar_declarations() {
    for source in [
        "type BasicBool Bool",
        "type BasicString String",
        "type BasicBytes Bytes",
        "type BasicInt Int",
        "type BasicFloat Float",
    ] {
        let tokens = Lexer::new(source).tokenize().unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[0].is(TokenKind::Keyword, "type"));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Keyword);
    }
}

// The tokenizer accepts separators and modifier orders the parser later rejects.
#[test]
fn test_struct_with_commas_and_modifiers() {
    let source = r#"
        type Person struct {
        name String,
        age optional Int,
        bio nullable optional String
    }
    "#;
    let tokens = tokenize(source).unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "type", "Person", "struct", "{", "name", "String", ",", "age", "optional", "Int", ",",
            "bio", "nullable", "optional", "String", "}",
        ]
    );

    use TokenKind::*;
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            Keyword, Identifier, Keyword, Symbol, Identifier, Keyword, Symbol, Identifier,
            Keyword, Keyword, Symbol, Identifier, Keyword, Keyword, Keyword, Symbol,
        ]
    );

    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![2, 2, 2, 2, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6]);
}

#[test]
fn test_keyword_set() {
    for word in [
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
    ] {
        assert!(is_keyword(word), "{} should be a keyword", word);
    }
    for word in ["union", "bool", "Map", "rmt", "Link", "any"] {
        assert!(!is_keyword(word), "{} should not be a keyword", word);
    }
}

#[test]
fn test_identifiers_may_start_with_digits_and_underscores() {
    let tokens = tokenize("_private 2fa field_3").unwrap();
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[1].text, "2fa");
}

#[test]
fn test_unicode_identifiers() {
    let tokens = tokenize("type Größe Int").unwrap();
    assert_eq!(tokens[1].text, "Größe");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}
