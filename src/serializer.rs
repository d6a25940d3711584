// Author: Dustin Pilgrim
// License: MIT

use chrono::Timelike;

use crate::ast::{Module, ModuleContents, Value};
use crate::ModcfgError;

const INDENT: &str = "    ";
const KEYWORDS: &[&str] = &["module", "mod", "true", "false", "date", "datetime"];

/// Render a value tree back to canonical MODCFG text.
///
/// A top-level `Array` is treated as a document: one entry per line, with
/// module entries as indented blocks and everything else inline. Re-parsing
/// the output with the same options reproduces an equal tree; resolved enum
/// values come back as unqualified references, so reproducing them requires
/// supplying an equivalent catalog.
pub fn serialize(value: &Value) -> Result<String, ModcfgError> {
    let mut out = String::new();
    match value {
        Value::Array(entries) => {
            for entry in entries {
                serialize_entry(entry, &mut out)?;
            }
        }
        other => serialize_entry(other, &mut out)?,
    }
    Ok(out)
}

fn serialize_entry(value: &Value, out: &mut String) -> Result<(), ModcfgError> {
    match value {
        Value::Module(module) => serialize_module(module, out),
        other => {
            write_inline(other, out)?;
            out.push('\n');
            Ok(())
        }
    }
}

fn serialize_module(module: &Module, out: &mut String) -> Result<(), ModcfgError> {
    out.push_str("module ");
    write_text(&module.name, out);
    out.push_str(":\n");

    match &module.contents {
        ModuleContents::Map(items) => {
            for (key, val) in items {
                out.push_str(INDENT);
                write_text(key, out);
                out.push_str(" = ");
                write_inline(val, out)?;
                out.push('\n');
            }
        }
        ModuleContents::Seq(items) => {
            for item in items {
                out.push_str(INDENT);
                out.push_str("- ");
                write_inline(item, out)?;
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn write_inline(value: &Value, out: &mut String) -> Result<(), ModcfgError> {
    match value {
        Value::String(s) => write_text(s, out),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Date(date) => {
            out.push_str(&format!("date({})", date.format("%Y-%m-%d")));
        }
        Value::DateTime(dt) => {
            let micros = dt.nanosecond() / 1_000;
            if micros == 0 {
                out.push_str(&format!("datetime({})", dt.format("%Y-%m-%d %H:%M:%S")));
            } else {
                out.push_str(&format!(
                    "datetime({}.{:06})",
                    dt.format("%Y-%m-%d %H:%M:%S"),
                    micros
                ));
            }
        }
        Value::EnumRef(reference) => out.push_str(&reference.literal()),
        Value::Enum(member) => {
            out.push(':');
            out.push_str(&member.name);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline(item, out)?;
            }
            out.push(']');
        }
        Value::Object(items) => {
            out.push('{');
            for (i, (key, val)) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_text(key, out);
                out.push_str(": ");
                write_inline(val, out)?;
            }
            out.push('}');
        }
        Value::Module(module) => {
            return Err(ModcfgError::TypeError {
                message: format!(
                    "Module '{}' cannot be serialized in a nested position",
                    module.name
                ),
                line: 0,
                column: 0,
                hint: Some("Module blocks are only valid at the top level".into()),
                code: Some(500),
            });
        }
    }
    Ok(())
}

/// Strings, keys, and module names render bare when they already lex as a
/// single identifier, quoted otherwise.
fn write_text(text: &str, out: &mut String) {
    if is_bare_ident(text) {
        out.push_str(text);
    } else {
        write_quoted(text, out);
    }
}

fn is_bare_ident(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }
    !KEYWORDS.contains(&text)
}

/// Double-quoted form with the tokenizer's escape table inverted: printable
/// ASCII passes through, everything else becomes `\xHH`, `\uHHHH`, or
/// `\UHHHHHHHH`, so the output is always valid tokenizer input.
fn write_quoted(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            ' '..='~' => out.push(c),
            c => {
                let cp = c as u32;
                if cp <= 0xFF {
                    out.push_str(&format!("\\x{:02x}", cp));
                } else if cp <= 0xFFFF {
                    out.push_str(&format!("\\u{:04x}", cp));
                } else {
                    out.push_str(&format!("\\U{:08x}", cp));
                }
            }
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{EnumMember, EnumRef};
    use crate::{parse, parse_with_options, ParseOptions};
    use chrono::NaiveDate;

    #[test]
    fn test_module_block_rendering() {
        let module = Value::Module(Module {
            name: "a".into(),
            contents: ModuleContents::Map(vec![("b".into(), Value::String("c".into()))]),
        });
        let text = serialize(&module).expect("Failed to serialize");
        assert_eq!(text, "module a:\n    b = c\n");
    }

    #[test]
    fn test_sequence_module_rendering() {
        let module = Value::Module(Module {
            name: "list".into(),
            contents: ModuleContents::Seq(vec![Value::Int(1), Value::Int(-2)]),
        });
        let text = serialize(&module).expect("Failed to serialize");
        assert_eq!(text, "module list:\n    - 1\n    - -2\n");
    }

    #[test]
    fn test_quoted_module_name() {
        let module = Value::Module(Module {
            name: "Date example".into(),
            contents: ModuleContents::Map(vec![]),
        });
        let text = serialize(&module).expect("Failed to serialize");
        assert_eq!(text, "module \"Date example\":\n");
    }

    #[test]
    fn test_top_level_values_are_inline() {
        let doc = Value::Array(vec![
            Value::Object(vec![("a".into(), Value::Int(1))]),
            Value::Array(vec![Value::String("x".into()), Value::Bool(true)]),
        ]);
        let text = serialize(&doc).expect("Failed to serialize");
        assert_eq!(text, "{a: 1}\n[x, true]\n");
    }

    #[test]
    fn test_keyword_strings_are_quoted() {
        let text = serialize(&Value::String("mod".into())).expect("Failed to serialize");
        assert_eq!(text, "\"mod\"\n");
        let text = serialize(&Value::String("true".into())).expect("Failed to serialize");
        assert_eq!(text, "\"true\"\n");
    }

    #[test]
    fn test_exotic_code_points_are_escaped() {
        let text = serialize(&Value::String("a\u{7}\u{e9}\u{1F600}b".into()))
            .expect("Failed to serialize");
        assert_eq!(text, "\"a\\x07\\xe9\\U0001f600b\"\n");

        // and they survive the trip back
        let reparsed = parse(&text).expect("Failed to reparse");
        assert_eq!(
            reparsed,
            Value::Array(vec![Value::String("a\u{7}\u{e9}\u{1F600}b".into())])
        );
    }

    #[test]
    fn test_date_rendering() {
        let date = NaiveDate::from_ymd_opt(2021, 4, 19).unwrap();
        assert_eq!(
            serialize(&Value::Date(date)).expect("Failed to serialize"),
            "date(2021-04-19)\n"
        );

        let dt = NaiveDate::from_ymd_opt(2021, 4, 18)
            .unwrap()
            .and_hms_micro_opt(14, 50, 55, 16922)
            .unwrap();
        assert_eq!(
            serialize(&Value::DateTime(dt)).expect("Failed to serialize"),
            "datetime(2021-04-18 14:50:55.016922)\n"
        );

        let dt = NaiveDate::from_ymd_opt(2021, 4, 18)
            .unwrap()
            .and_hms_opt(14, 50, 55)
            .unwrap();
        assert_eq!(
            serialize(&Value::DateTime(dt)).expect("Failed to serialize"),
            "datetime(2021-04-18 14:50:55)\n"
        );
    }

    #[test]
    fn test_enum_values_render_as_references() {
        let member = Value::Enum(EnumMember {
            class: "Enum1".into(),
            name: "duck_typing".into(),
            value: Box::new(Value::String("is cool".into())),
        });
        assert_eq!(serialize(&member).expect("Failed to serialize"), ":duck_typing\n");

        let reference = Value::EnumRef(EnumRef {
            class: Some("Enum2".into()),
            member: "x".into(),
        });
        assert_eq!(serialize(&reference).expect("Failed to serialize"), ":Enum2.x\n");
    }

    #[test]
    fn test_nested_module_is_rejected() {
        let bad = Value::Array(vec![Value::Array(vec![Value::Module(Module {
            name: "inner".into(),
            contents: ModuleContents::Map(vec![]),
        })])]);
        assert!(serialize(&bad).is_err());
    }

    #[test]
    fn test_serialize_parse_round_trip() {
        let doc = Value::Array(vec![
            Value::Module(Module {
                name: "hello_world".into(),
                contents: ModuleContents::Map(vec![
                    ("hello".into(), Value::String("world".into())),
                    ("nested".into(), Value::Object(vec![
                        ("some".into(), Value::Array(vec![
                            Value::String("very".into()),
                            Value::Int(-3),
                            Value::Bool(false),
                        ])),
                    ])),
                ]),
            }),
            Value::Object(vec![("main".into(), Value::String("plain text".into()))]),
            Value::Int(42),
        ]);

        let text = serialize(&doc).expect("Failed to serialize");
        println!("--- Serialized ---\n{}", text);
        let reparsed = parse_with_options(&text, &ParseOptions::default())
            .expect("Failed to reparse serialized output");
        assert_eq!(reparsed, doc);
    }
}
