use super::*;
use crate::ast::{insert_entry, Value};

/// Top level: an interleaved run of module blocks, mapping entries, sequence
/// items, and bare inline values. Consecutive block-style mapping entries
/// coalesce into one mapping, consecutive `-` items into one sequence; inline
/// values and module blocks stand on their own.
pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, ModcfgError> {
    let mut entries: Vec<Value> = Vec::new();
    let mut open_map: Vec<(String, Value)> = Vec::new();
    let mut open_seq: Vec<Value> = Vec::new();

    loop {
        match parser.peek() {
            Some(Token::Newline) => {
                parser.bump()?;
            }
            Some(Token::Eof) | None => break,
            Some(Token::Module) => {
                flush_map(&mut entries, &mut open_map);
                flush_seq(&mut entries, &mut open_seq);
                let module = module::parse_module(parser)?;
                entries.push(Value::Module(module));
            }
            Some(Token::Dash) => {
                flush_map(&mut entries, &mut open_map);
                parser.bump()?; // consume '-'
                let item = value::parse_value_or_block(parser)?;
                open_seq.push(item);
            }
            Some(Token::Indent) | Some(Token::Dedent) => {
                return Err(ModcfgError::IndentationError {
                    message: "Unexpected indentation at top level".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Top-level entries start at column zero".into()),
                    code: Some(204),
                });
            }
            Some(Token::Ident(_)) | Some(Token::Str(_)) => {
                let text = match parser.bump()? {
                    Token::Ident(s) | Token::Str(s) => s,
                    _ => unreachable!(),
                };
                if value::is_separator(parser.peek()) {
                    parser.bump()?; // consume separator
                    let val = value::parse_value_or_block(parser)?;
                    flush_seq(&mut entries, &mut open_seq);
                    insert_entry(&mut open_map, text, val);
                } else {
                    // a lone bare word is a plain string entry
                    flush_map(&mut entries, &mut open_map);
                    flush_seq(&mut entries, &mut open_seq);
                    entries.push(Value::String(text));
                }
            }
            Some(_) => {
                let val = value::parse_value(parser)?;
                flush_map(&mut entries, &mut open_map);
                flush_seq(&mut entries, &mut open_seq);
                entries.push(val);
            }
        }
    }

    flush_map(&mut entries, &mut open_map);
    flush_seq(&mut entries, &mut open_seq);

    Ok(Document { entries })
}

fn flush_map(entries: &mut Vec<Value>, open_map: &mut Vec<(String, Value)>) {
    if !open_map.is_empty() {
        entries.push(Value::Object(std::mem::take(open_map)));
    }
}

fn flush_seq(entries: &mut Vec<Value>, open_seq: &mut Vec<Value>) {
    if !open_seq.is_empty() {
        entries.push(Value::Array(std::mem::take(open_seq)));
    }
}
