use super::*;
use crate::ast::{insert_entry, EnumRef, Value};
use crate::datetime;

pub(super) fn is_separator(token: Option<&Token>) -> bool {
    matches!(
        token,
        Some(Token::Colon) | Some(Token::Equals) | Some(Token::Arrow) | Some(Token::FatArrow)
    )
}

pub(super) fn parse_mapping_entry(parser: &mut Parser) -> Result<(String, Value), ModcfgError> {
    let key = match parser.bump()? {
        Token::Ident(key) | Token::Str(key) => key,
        other => {
            return Err(ModcfgError::SyntaxError {
                message: format!("Expected key, got {:?}", other),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Keys are identifiers or quoted strings".into()),
                code: Some(208),
            });
        }
    };

    if !is_separator(parser.peek()) {
        return Err(ModcfgError::SyntaxError {
            message: format!("Expected separator after key '{}'", key),
            line: parser.line(),
            column: parser.column(),
            hint: Some("Use one of '=', '->', ':', '=>'".into()),
            code: Some(206),
        });
    }
    parser.bump()?; // consume separator

    let val = parse_value_or_block(parser)?;
    Ok((key, val))
}

/// A value on the same line, or one carried over to the following lines at a
/// deeper indentation. Blank lines in between are ignored by the lexer.
pub(super) fn parse_value_or_block(parser: &mut Parser) -> Result<Value, ModcfgError> {
    if let Some(Token::Newline) = parser.peek() {
        while let Some(Token::Newline) = parser.peek() {
            parser.bump()?;
        }
        parser.expect(Token::Indent)?;
        return parse_block(parser);
    }
    parse_value(parser)
}

/// Everything between one Indent and its matching Dedent: a run of mapping
/// entries (-> Object), a run of `-` items (-> Array), or a single value.
/// Sequence items one level deeper continue the same sequence.
fn parse_block(parser: &mut Parser) -> Result<Value, ModcfgError> {
    parser.descend()?;

    let mut map_items: Vec<(String, Value)> = Vec::new();
    let mut seq_items: Vec<Value> = Vec::new();
    let mut single: Option<Value> = None;

    loop {
        match parser.peek() {
            Some(Token::Newline) => {
                parser.bump()?;
            }
            Some(Token::Dedent) => {
                parser.bump()?;
                break;
            }
            Some(Token::Eof) | None => break,
            Some(Token::Dash) => {
                if single.is_some() {
                    return Err(ModcfgError::SyntaxError {
                        message: "Unexpected '-' item after a scalar block value".into(),
                        line: parser.line(),
                        column: parser.column(),
                        hint: None,
                        code: Some(209),
                    });
                }
                parser.bump()?;
                seq_items.push(parse_value_or_block(parser)?);
            }
            Some(Token::Indent) => {
                if seq_items.is_empty() {
                    return Err(ModcfgError::IndentationError {
                        message: "Unexpected indentation inside block".into(),
                        line: parser.line(),
                        column: parser.column(),
                        hint: None,
                        code: Some(204),
                    });
                }
                // deeper continuation lines extend the sequence in place
                parser.bump()?;
                match parse_block(parser)? {
                    Value::Array(items) => seq_items.extend(items),
                    other => seq_items.push(other),
                }
            }
            Some(Token::Ident(_)) | Some(Token::Str(_)) => {
                let text = match parser.bump()? {
                    Token::Ident(s) | Token::Str(s) => s,
                    _ => unreachable!(),
                };
                if is_separator(parser.peek()) {
                    if single.is_some() {
                        return Err(ModcfgError::SyntaxError {
                            message: format!(
                                "Unexpected entry '{}' after a scalar block value",
                                text
                            ),
                            line: parser.line(),
                            column: parser.column(),
                            hint: None,
                            code: Some(209),
                        });
                    }
                    parser.bump()?;
                    let val = parse_value_or_block(parser)?;
                    insert_entry(&mut map_items, text, val);
                } else {
                    if !map_items.is_empty() || !seq_items.is_empty() || single.is_some() {
                        return Err(ModcfgError::SyntaxError {
                            message: format!("Unexpected bare value '{}' inside block", text),
                            line: parser.line(),
                            column: parser.column(),
                            hint: None,
                            code: Some(209),
                        });
                    }
                    single = Some(Value::String(text));
                }
            }
            Some(_) => {
                if !map_items.is_empty() || !seq_items.is_empty() || single.is_some() {
                    let token = parser.bump()?;
                    return Err(ModcfgError::InvalidToken {
                        token: format!("{:?}", token),
                        line: parser.line(),
                        column: parser.column(),
                        hint: Some("Expected a key or '-' item".into()),
                        code: Some(207),
                    });
                }
                single = Some(parse_value(parser)?);
            }
        }
    }

    parser.ascend();

    if let Some(val) = single {
        return Ok(val);
    }
    if !map_items.is_empty() && !seq_items.is_empty() {
        return Err(ModcfgError::SyntaxError {
            message: "Block mixes key/value entries and '-' items".into(),
            line: parser.line(),
            column: parser.column(),
            hint: None,
            code: Some(209),
        });
    }
    if !seq_items.is_empty() {
        return Ok(Value::Array(seq_items));
    }
    Ok(Value::Object(map_items))
}

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, ModcfgError> {
    match parser.peek() {
        Some(Token::Ident(_)) | Some(Token::Str(_)) => parse_scalar_or_pair(parser),
        Some(Token::Int(_)) => {
            if let Token::Int(i) = parser.bump()? {
                Ok(Value::Int(i))
            } else {
                unreachable!()
            }
        }
        Some(Token::Bool(_)) => {
            if let Token::Bool(b) = parser.bump()? {
                Ok(Value::Bool(b))
            } else {
                unreachable!()
            }
        }
        Some(Token::DateLit(_)) | Some(Token::DateTimeLit(_)) => parse_date_value(parser),
        Some(Token::EnumRef { .. }) => parse_enum_ref_value(parser),
        Some(Token::LBracket) => parse_inline_array(parser),
        Some(Token::LBrace) => parse_inline_object(parser),
        _ => {
            let token = parser.bump()?;
            Err(ModcfgError::InvalidToken {
                token: format!("{:?}", token),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Unexpected token in value position".into()),
                code: Some(210),
            })
        }
    }
}

/// A bare word or quoted string in value position is a plain string scalar —
/// unless a separator follows, in which case it keys a single-entry mapping
/// (`a: b: c` nests as `{a: {b: c}}`).
fn parse_scalar_or_pair(parser: &mut Parser) -> Result<Value, ModcfgError> {
    let text = match parser.bump()? {
        Token::Ident(s) | Token::Str(s) => s,
        _ => unreachable!(),
    };

    if is_separator(parser.peek()) {
        parser.descend()?;
        parser.bump()?; // consume separator
        let val = parse_value_or_block(parser)?;
        parser.ascend();
        return Ok(Value::Object(vec![(text, val)]));
    }

    Ok(Value::String(text))
}

fn parse_date_value(parser: &mut Parser) -> Result<Value, ModcfgError> {
    let (line, column) = (parser.line(), parser.column());
    match parser.bump()? {
        Token::DateLit(raw) | Token::DateTimeLit(raw) => {
            datetime::parse_date_literal(&raw, line, column)
        }
        _ => unreachable!(),
    }
}

fn parse_enum_ref_value(parser: &mut Parser) -> Result<Value, ModcfgError> {
    match parser.bump()? {
        Token::EnumRef { class, member } => Ok(Value::EnumRef(EnumRef { class, member })),
        _ => unreachable!(),
    }
}

fn parse_inline_array(parser: &mut Parser) -> Result<Value, ModcfgError> {
    parser.descend()?;
    parser.bump()?; // consume '['

    let mut items = Vec::new();
    loop {
        match parser.peek() {
            Some(Token::RBracket) => {
                parser.bump()?;
                break;
            }
            Some(Token::Eof) | None => {
                return Err(ModcfgError::UnexpectedEof {
                    message: "Unclosed '['".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Close the sequence with ']'".into()),
                    code: Some(211),
                });
            }
            _ => items.push(parse_value(parser)?),
        }
    }

    parser.ascend();
    Ok(Value::Array(items))
}

fn parse_inline_object(parser: &mut Parser) -> Result<Value, ModcfgError> {
    parser.descend()?;
    parser.bump()?; // consume '{'

    let mut items = Vec::new();
    loop {
        match parser.peek() {
            Some(Token::RBrace) => {
                parser.bump()?;
                break;
            }
            Some(Token::Ident(_)) | Some(Token::Str(_)) => {
                let key = match parser.bump()? {
                    Token::Ident(s) | Token::Str(s) => s,
                    _ => unreachable!(),
                };
                if !is_separator(parser.peek()) {
                    return Err(ModcfgError::SyntaxError {
                        message: format!("Expected separator after key '{}'", key),
                        line: parser.line(),
                        column: parser.column(),
                        hint: Some("Use one of '=', '->', ':', '=>'".into()),
                        code: Some(206),
                    });
                }
                parser.bump()?;
                // `key: - a - b` is the bracketed spelling of a nested list
                let val = if let Some(Token::Dash) = parser.peek() {
                    parse_dash_run(parser)?
                } else {
                    parse_value(parser)?
                };
                insert_entry(&mut items, key, val);
            }
            Some(Token::Eof) | None => {
                return Err(ModcfgError::UnexpectedEof {
                    message: "Unclosed '{'".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Close the mapping with '}'".into()),
                    code: Some(212),
                });
            }
            Some(tok) => {
                return Err(ModcfgError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected a key in inline mapping".into()),
                    code: Some(207),
                });
            }
        }
    }

    parser.ascend();
    Ok(Value::Object(items))
}

fn parse_dash_run(parser: &mut Parser) -> Result<Value, ModcfgError> {
    let mut items = Vec::new();
    while let Some(Token::Dash) = parser.peek() {
        parser.bump()?;
        items.push(parse_value(parser)?);
    }
    Ok(Value::Array(items))
}
