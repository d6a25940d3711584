#[cfg(test)]
use super::*;

#[test]
fn test_module_block_tokens() {
    let input = "module a:\n\tb = c";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Module,
        Token::Ident("a".into()),
        Token::Colon,
        Token::Newline,
        Token::Indent,
        Token::Ident("b".into()),
        Token::Equals,
        Token::Ident("c".into()),
        Token::Dedent,
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        println!("{:?}", tok);
        assert_eq!(tok, Ok(expected));
    }
}

#[test]
fn test_all_separators() {
    let input = "a = b\nc -> d\ne : f\ng => h";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Ident("a".into()),
        Token::Equals,
        Token::Ident("b".into()),
        Token::Newline,
        Token::Ident("c".into()),
        Token::Arrow,
        Token::Ident("d".into()),
        Token::Newline,
        Token::Ident("e".into()),
        Token::Colon,
        Token::Ident("f".into()),
        Token::Newline,
        Token::Ident("g".into()),
        Token::FatArrow,
        Token::Ident("h".into()),
        Token::Eof,
    ];

    for expected in expected_tokens {
        assert_eq!(lexer.next_token(), Ok(expected));
    }
}

#[test]
fn test_brackets_suspend_layout() {
    let input = "a = [1,\n\n      2]\nb = 3";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Ident("a".into()),
        Token::Equals,
        Token::LBracket,
        Token::Int(1),
        Token::Int(2),
        Token::RBracket,
        Token::Newline,
        Token::Ident("b".into()),
        Token::Equals,
        Token::Int(3),
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        println!("{:?}", tok);
        assert_eq!(tok, Ok(expected));
    }
}

#[test]
fn test_blank_lines_and_comments_ignored() {
    let input = "a = 1\n\n# a comment\n   # indented comment\n\nb = 2";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Ident("a".into()),
        Token::Equals,
        Token::Int(1),
        Token::Newline,
        Token::Ident("b".into()),
        Token::Equals,
        Token::Int(2),
        Token::Eof,
    ];

    for expected in expected_tokens {
        assert_eq!(lexer.next_token(), Ok(expected));
    }
}

#[test]
fn test_string_escapes_decoded() {
    let input = r#"escaped "\n\t\\\"\x41\u00e9""#;
    let mut lexer = Lexer::new(input);

    assert_eq!(lexer.next_token(), Ok(Token::Ident("escaped".into())));
    assert_eq!(
        lexer.next_token(),
        Ok(Token::Str("\n\t\\\"A\u{e9}".into()))
    );
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_unrecognized_escape_passes_through() {
    // \x without two hex digits stays literal
    let input = r#"'\x'"#;
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Str("\\x".into())));

    let input = r#"'\q'"#;
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Str("\\q".into())));
}

#[test]
fn test_raw_prefix_skips_decoding() {
    let input = r#"r'\n\t'"#;
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Str("\\n\\t".into())));

    // 'l' and 't' prefixes are accepted but change nothing
    let input = r#"l"plain" t"plain""#;
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Str("plain".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Str("plain".into())));
}

#[test]
fn test_prefix_letters_without_quote_are_identifiers() {
    let input = "rhello";
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Ident("rhello".into())));
}

#[test]
fn test_triple_quoted_spans_lines() {
    let input = "'''first\nsecond'''";
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Str("first\nsecond".into())));
}

#[test]
fn test_unclosed_string_error() {
    let input = "\"no closing quote\nnext";
    let mut lexer = Lexer::new(input);
    let result = lexer.next_token();
    assert!(matches!(result, Err(ModcfgError::UnclosedString { .. })));
}

#[test]
fn test_enum_reference_tokens() {
    let input = "personality: :is_cool\nstory = :Enum1.duck_typing";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Ident("personality".into()),
        Token::Colon,
        Token::EnumRef { class: None, member: "is_cool".into() },
        Token::Newline,
        Token::Ident("story".into()),
        Token::Equals,
        Token::EnumRef { class: Some("Enum1".into()), member: "duck_typing".into() },
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        println!("{:?}", tok);
        assert_eq!(tok, Ok(expected));
    }
}

#[test]
fn test_dash_vs_negative_integer() {
    let input = "- 5\n- -7";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Dash,
        Token::Int(5),
        Token::Newline,
        Token::Dash,
        Token::Int(-7),
        Token::Eof,
    ];

    for expected in expected_tokens {
        assert_eq!(lexer.next_token(), Ok(expected));
    }
}

#[test]
fn test_date_literal_raw_capture() {
    let input = "today = datetime(2021-04-18 14:50:55.016922)\ntomorrow = date(2021-04-19)";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Ident("today".into()),
        Token::Equals,
        Token::DateTimeLit("2021-04-18 14:50:55.016922".into()),
        Token::Newline,
        Token::Ident("tomorrow".into()),
        Token::Equals,
        Token::DateLit("2021-04-19".into()),
        Token::Eof,
    ];

    for expected in expected_tokens {
        assert_eq!(lexer.next_token(), Ok(expected));
    }
}

#[test]
fn test_date_keyword_without_parens_is_identifier() {
    let input = "date = 5";
    let mut lexer = Lexer::new(input);
    assert_eq!(lexer.next_token(), Ok(Token::Ident("date".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Equals));
    assert_eq!(lexer.next_token(), Ok(Token::Int(5)));
}

#[test]
fn test_module_and_mod_are_one_keyword() {
    let mut lexer = Lexer::new("module mod");
    assert_eq!(lexer.next_token(), Ok(Token::Module));
    assert_eq!(lexer.next_token(), Ok(Token::Module));
}

#[test]
fn test_bad_dedent_is_an_error() {
    let input = "a:\n        b = 1\n    c = 2";
    let mut lexer = Lexer::new(input);

    let mut result = lexer.next_token();
    while let Ok(tok) = &result {
        if *tok == Token::Eof {
            panic!("Expected an indentation error");
        }
        result = lexer.next_token();
    }
    assert!(matches!(result, Err(ModcfgError::IndentationError { .. })));
}

#[test]
fn test_nested_indent_levels() {
    let input = "a:\n    b:\n        c = 1\nd = 2";
    let mut lexer = Lexer::new(input);

    let expected_tokens = vec![
        Token::Ident("a".into()),
        Token::Colon,
        Token::Newline,
        Token::Indent,
        Token::Ident("b".into()),
        Token::Colon,
        Token::Newline,
        Token::Indent,
        Token::Ident("c".into()),
        Token::Equals,
        Token::Int(1),
        Token::Newline,
        Token::Dedent,
        Token::Dedent,
        Token::Ident("d".into()),
        Token::Equals,
        Token::Int(2),
        Token::Eof,
    ];

    for expected in expected_tokens {
        let tok = lexer.next_token();
        println!("{:?}", tok);
        assert_eq!(tok, Ok(expected));
    }
}
