use super::*;
use crate::ast::{insert_entry, Module, ModuleContents, Value};

/// `("module"|"mod") name ":" NEWLINE INDENT body DEDENT`
///
/// The body must be homogeneous: all mapping entries or all sequence items.
/// A body with no indented block at all is an empty mapping.
pub(super) fn parse_module(parser: &mut Parser) -> Result<Module, ModcfgError> {
    parser.bump()?; // consume 'module' / 'mod'

    let name = match parser.bump()? {
        Token::Ident(name) | Token::Str(name) => name,
        other => {
            return Err(ModcfgError::SyntaxError {
                message: format!("Expected module name, got {:?}", other),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Module names are identifiers or quoted strings".into()),
                code: Some(203),
            });
        }
    };

    parser.expect(Token::Colon)?;

    match parser.peek() {
        Some(Token::Newline) => {
            parser.bump()?;
        }
        Some(Token::Eof) | None => {
            return Ok(Module { name, contents: ModuleContents::Map(Vec::new()) });
        }
        Some(tok) => {
            return Err(ModcfgError::InvalidToken {
                token: format!("{:?}", tok),
                line: parser.line(),
                column: parser.column(),
                hint: Some("The module body starts on the next line".into()),
                code: Some(205),
            });
        }
    }

    let mut map_items: Vec<(String, Value)> = Vec::new();
    let mut seq_items: Vec<Value> = Vec::new();

    if let Some(Token::Indent) = parser.peek() {
        parser.bump()?;
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
                    parser.bump()?;
                    seq_items.push(value::parse_value_or_block(parser)?);
                }
                Some(Token::Ident(_)) | Some(Token::Str(_)) => {
                    let (key, val) = value::parse_mapping_entry(parser)?;
                    insert_entry(&mut map_items, key, val);
                }
                Some(tok) => {
                    return Err(ModcfgError::InvalidToken {
                        token: format!("{:?}", tok),
                        line: parser.line(),
                        column: parser.column(),
                        hint: Some("Expected a key or '-' item in module body".into()),
                        code: Some(207),
                    });
                }
            }
        }
    }

    // homogeneity is checked at body close so either order is caught
    if !map_items.is_empty() && !seq_items.is_empty() {
        return Err(ModcfgError::MixedModuleContents {
            module: name,
            line: parser.line(),
            column: parser.column(),
            hint: Some("A module body is either all key/value entries or all '-' items".into()),
            code: Some(216),
        });
    }

    let contents = if !seq_items.is_empty() {
        ModuleContents::Seq(seq_items)
    } else {
        ModuleContents::Map(map_items)
    };

    Ok(Module { name, contents })
}
