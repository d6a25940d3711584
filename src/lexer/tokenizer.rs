use super::*;
use super::scanner::{bump, handle_line_start, skip_inline_trivia};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, ModcfgError> {
    loop {
        if let Some(token) = lexer.pending.pop_front() {
            return Ok(token);
        }

        if lexer.at_line_start {
            if lexer.bracket_depth == 0 {
                handle_line_start(lexer)?;
            }
            lexer.at_line_start = false;
            if !lexer.pending.is_empty() {
                continue;
            }
        }

        skip_inline_trivia(lexer);

        let Some(c) = lexer.peek else {
            // close any open blocks before the final Eof
            while lexer.indent_stack.len() > 1 {
                lexer.indent_stack.pop();
                lexer.pending.push_back(Token::Dedent);
            }
            lexer.pending.push_back(Token::Eof);
            continue;
        };

        match c {
            '\n' => {
                bump(lexer);
                lexer.at_line_start = true;
                // newlines inside brackets are plain whitespace
                if lexer.bracket_depth == 0 {
                    return Ok(Token::Newline);
                }
            }
            ',' => {
                // commas are trivia, like the whitespace around them
                bump(lexer);
            }
            '{' => {
                bump(lexer);
                lexer.bracket_depth += 1;
                return Ok(Token::LBrace);
            }
            '}' => {
                bump(lexer);
                lexer.bracket_depth = lexer.bracket_depth.saturating_sub(1);
                return Ok(Token::RBrace);
            }
            '[' => {
                bump(lexer);
                lexer.bracket_depth += 1;
                return Ok(Token::LBracket);
            }
            ']' => {
                bump(lexer);
                lexer.bracket_depth = lexer.bracket_depth.saturating_sub(1);
                return Ok(Token::RBracket);
            }
            ':' => return tokenize_colon_or_enum_ref(lexer),
            '=' => {
                bump(lexer);
                if lexer.peek == Some('>') {
                    bump(lexer);
                    return Ok(Token::FatArrow);
                }
                return Ok(Token::Equals);
            }
            '-' => return tokenize_dash(lexer),
            '"' | '\'' => return tokenize_string(lexer, false),
            c if c.is_ascii_digit() => return tokenize_number(lexer, false),
            c if c.is_alphabetic() || c == '_' => return tokenize_word(lexer),
            ch => {
                bump(lexer);
                return Err(ModcfgError::UnexpectedCharacter {
                    character: ch,
                    line: lexer.line,
                    column: lexer.column,
                    hint: Some("Unexpected character in input".into()),
                    code: Some(101),
                });
            }
        }
    }
}

fn scan_ident(lexer: &mut Lexer) -> String {
    let mut ident = String::new();
    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }
    ident
}

/// A lone `:` is a key/value separator; `:name` and `:Class.name` are enum
/// references.
fn tokenize_colon_or_enum_ref(lexer: &mut Lexer) -> Result<Token, ModcfgError> {
    bump(lexer); // consume ':'

    match lexer.peek {
        Some(c) if c.is_alphabetic() || c == '_' => {
            let first = scan_ident(lexer);
            if lexer.peek == Some('.') {
                bump(lexer); // consume '.'
                match lexer.peek {
                    Some(c) if c.is_alphabetic() || c == '_' => {
                        let member = scan_ident(lexer);
                        Ok(Token::EnumRef { class: Some(first), member })
                    }
                    _ => Err(ModcfgError::SyntaxError {
                        message: "Expected member name after '.' in enum reference".into(),
                        line: lexer.line,
                        column: lexer.column,
                        hint: Some("Qualified references look like :Class.member".into()),
                        code: Some(106),
                    }),
                }
            } else {
                Ok(Token::EnumRef { class: None, member: first })
            }
        }
        _ => Ok(Token::Colon),
    }
}

/// `->` is a separator, `-5` a negative integer, a bare `-` a sequence item.
fn tokenize_dash(lexer: &mut Lexer) -> Result<Token, ModcfgError> {
    bump(lexer); // consume '-'

    match lexer.peek {
        Some('>') => {
            bump(lexer);
            Ok(Token::Arrow)
        }
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer, true),
        _ => Ok(Token::Dash),
    }
}

fn tokenize_number(lexer: &mut Lexer, negative: bool) -> Result<Token, ModcfgError> {
    let mut num = String::new();
    if negative {
        num.push('-');
    }

    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    num.parse::<i64>()
        .map(Token::Int)
        .map_err(|_| ModcfgError::TypeError {
            message: format!("Invalid integer '{}'", num),
            line: lexer.line,
            column: lexer.column,
            hint: None,
            code: Some(102),
        })
}

fn tokenize_word(lexer: &mut Lexer) -> Result<Token, ModcfgError> {
    let ident = scan_ident(lexer);

    // prefix letters directly before a quote open a prefixed string;
    // only 'r' (raw) has confirmed semantics, 'l'/'t' are accepted and ignored
    if matches!(lexer.peek, Some('"') | Some('\'')) && is_string_prefix(&ident) {
        return tokenize_string(lexer, ident.contains('r'));
    }

    match ident.as_str() {
        "module" | "mod" => Ok(Token::Module),
        "true" => Ok(Token::Bool(true)),
        "false" => Ok(Token::Bool(false)),
        "date" if lexer.peek == Some('(') => tokenize_date_literal(lexer, false),
        "datetime" if lexer.peek == Some('(') => tokenize_date_literal(lexer, true),
        // every other bare word (yes, no, None, ...) stays an identifier
        _ => Ok(Token::Ident(ident)),
    }
}

fn is_string_prefix(ident: &str) -> bool {
    !ident.is_empty()
        && ident.len() <= 3
        && ident.chars().all(|c| matches!(c, 'r' | 'l' | 't'))
}

/// Capture the raw text between the parentheses of `date(...)`/`datetime(...)`.
/// Validation happens in the parser, atomically.
fn tokenize_date_literal(lexer: &mut Lexer, datetime: bool) -> Result<Token, ModcfgError> {
    bump(lexer); // consume '('

    let mut content = String::new();
    loop {
        match bump(lexer) {
            Some(')') => break,
            Some(ch) => content.push(ch),
            None => {
                return Err(ModcfgError::UnexpectedEof {
                    message: "Unterminated date literal".into(),
                    line: lexer.line,
                    column: lexer.column,
                    hint: Some("Close the literal with ')'".into()),
                    code: Some(105),
                });
            }
        }
    }

    if datetime {
        Ok(Token::DateTimeLit(content))
    } else {
        Ok(Token::DateLit(content))
    }
}

fn tokenize_string(lexer: &mut Lexer, raw: bool) -> Result<Token, ModcfgError> {
    let quote = match bump(lexer) {
        Some(q) => q,
        None => {
            return Err(ModcfgError::UnexpectedEof {
                message: "Expected string literal".into(),
                line: lexer.line,
                column: lexer.column,
                hint: None,
                code: Some(103),
            });
        }
    };

    let mut triple = false;
    if lexer.peek == Some(quote) {
        bump(lexer);
        if lexer.peek == Some(quote) {
            bump(lexer);
            triple = true;
        } else {
            // two quotes in a row: the empty string
            return Ok(Token::Str(String::new()));
        }
    }

    let mut content = String::new();
    loop {
        let Some(ch) = lexer.peek else {
            return Err(ModcfgError::UnclosedString {
                quote,
                line: lexer.line,
                column: lexer.column,
                hint: Some("String literal not closed".into()),
                code: Some(103),
            });
        };

        if ch == quote {
            bump(lexer);
            if !triple {
                break;
            }
            // triple-quoted strings need three closers in a row
            if lexer.peek == Some(quote) {
                bump(lexer);
                if lexer.peek == Some(quote) {
                    bump(lexer);
                    break;
                }
                content.push(quote);
                content.push(quote);
            } else {
                content.push(quote);
            }
            continue;
        }

        if ch == '\n' && !triple {
            return Err(ModcfgError::UnclosedString {
                quote,
                line: lexer.line,
                column: lexer.column,
                hint: Some("Use triple quotes for multi-line strings".into()),
                code: Some(103),
            });
        }

        if ch == '\\' {
            bump(lexer); // consume '\'
            if raw {
                // raw mode preserves the backslash and the next char as-is
                content.push('\\');
                match bump(lexer) {
                    Some(next) => content.push(next),
                    None => {
                        return Err(ModcfgError::UnclosedString {
                            quote,
                            line: lexer.line,
                            column: lexer.column,
                            hint: Some("Trailing backslash in string".into()),
                            code: Some(103),
                        });
                    }
                }
            } else {
                decode_escape(lexer, quote, &mut content)?;
            }
            continue;
        }

        content.push(ch);
        bump(lexer);
    }

    Ok(Token::Str(content))
}

/// Decode one backslash escape (the backslash is already consumed).
/// Unrecognized escapes are not an error: the backslash and the following
/// character pass through literally.
fn decode_escape(lexer: &mut Lexer, quote: char, content: &mut String) -> Result<(), ModcfgError> {
    let Some(ch) = bump(lexer) else {
        return Err(ModcfgError::UnclosedString {
            quote,
            line: lexer.line,
            column: lexer.column,
            hint: Some("Trailing backslash in string".into()),
            code: Some(103),
        });
    };

    match ch {
        'n' => content.push('\n'),
        't' => content.push('\t'),
        'r' => content.push('\r'),
        '\\' => content.push('\\'),
        '\'' => content.push('\''),
        '"' => content.push('"'),
        'a' => content.push('\u{07}'),
        'b' => content.push('\u{08}'),
        'f' => content.push('\u{0C}'),
        'v' => content.push('\u{0B}'),
        '0' => content.push('\0'),
        'x' => push_codepoint_escape(lexer, content, 'x', 2),
        'u' => push_codepoint_escape(lexer, content, 'u', 4),
        'U' => push_codepoint_escape(lexer, content, 'U', 8),
        other => {
            content.push('\\');
            content.push(other);
        }
    }
    Ok(())
}

/// Decode `\xHH`, `\uHHHH`, or `\UHHHHHHHH`. Too few hex digits or an invalid
/// code point keep the whole sequence literal instead of failing.
fn push_codepoint_escape(lexer: &mut Lexer, content: &mut String, marker: char, len: usize) {
    let mut digits = String::new();
    while digits.len() < len {
        match lexer.peek {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(d);
                bump(lexer);
            }
            _ => break,
        }
    }

    if digits.len() == len {
        if let Some(decoded) = u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
            content.push(decoded);
            return;
        }
    }

    content.push('\\');
    content.push(marker);
    content.push_str(&digits);
}
