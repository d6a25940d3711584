// Author: Dustin Pilgrim
// License: MIT

use crate::ast::{Document, EnumMember, EnumRef, Module, ModuleContents, Value};
use crate::{ModcfgError, ParseOptions};

/// Rewrite every `Value::EnumRef` in the document against the caller's
/// catalog. Runs once, after parsing. Either every reference resolves (or
/// falls back to its literal text) or the first failure aborts the pass —
/// no partially-resolved tree escapes.
pub fn resolve_document(document: Document, options: &ParseOptions) -> Result<Document, ModcfgError> {
    let mut entries = Vec::with_capacity(document.entries.len());
    for entry in document.entries {
        entries.push(resolve_value(entry, options)?);
    }
    Ok(Document { entries })
}

fn resolve_value(value: Value, options: &ParseOptions) -> Result<Value, ModcfgError> {
    match value {
        Value::EnumRef(reference) => resolve_reference(reference, options),
        Value::Array(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for item in items {
                resolved.push(resolve_value(item, options)?);
            }
            Ok(Value::Array(resolved))
        }
        Value::Object(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for (key, val) in items {
                resolved.push((key, resolve_value(val, options)?));
            }
            Ok(Value::Object(resolved))
        }
        Value::Module(module) => {
            let contents = match module.contents {
                ModuleContents::Seq(items) => {
                    let mut resolved = Vec::with_capacity(items.len());
                    for item in items {
                        resolved.push(resolve_value(item, options)?);
                    }
                    ModuleContents::Seq(resolved)
                }
                ModuleContents::Map(items) => {
                    let mut resolved = Vec::with_capacity(items.len());
                    for (key, val) in items {
                        resolved.push((key, resolve_value(val, options)?));
                    }
                    ModuleContents::Map(resolved)
                }
            };
            Ok(Value::Module(Module { name: module.name, contents }))
        }
        other => Ok(other),
    }
}

fn resolve_reference(reference: EnumRef, options: &ParseOptions) -> Result<Value, ModcfgError> {
    match lookup(&reference, options) {
        Ok(member) => Ok(Value::Enum(member)),
        Err(_) if options.enum_resolve_fail_silently => {
            // the reference collapses back into its source text
            Ok(Value::String(reference.literal()))
        }
        Err(error) => Err(error),
    }
}

fn lookup(reference: &EnumRef, options: &ParseOptions) -> Result<EnumMember, ModcfgError> {
    let catalog = &options.enums;

    if let Some(class_name) = &reference.class {
        let class = catalog
            .iter()
            .find(|c| c.name == *class_name)
            .ok_or_else(|| ModcfgError::EnumResolveError {
                reference: reference.literal(),
                message: format!("No enum class named '{}' in the catalog", class_name),
                hint: Some("Pass the class in the `enums` option".into()),
                code: Some(511),
            })?;
        let value = class
            .members
            .get(&reference.member)
            .ok_or_else(|| ModcfgError::EnumResolveError {
                reference: reference.literal(),
                message: format!(
                    "Enum class '{}' has no member '{}'",
                    class_name, reference.member
                ),
                hint: None,
                code: Some(510),
            })?;
        return Ok(EnumMember {
            class: class.name.clone(),
            name: reference.member.clone(),
            value: Box::new(value.clone()),
        });
    }

    let mut matches = catalog
        .iter()
        .filter(|c| c.members.contains_key(&reference.member));
    let first = matches.next();
    let ambiguous = matches.next().is_some();

    match first {
        None => Err(ModcfgError::EnumResolveError {
            reference: reference.literal(),
            message: format!("No enum class defines a member '{}'", reference.member),
            hint: Some("Pass a catalog in the `enums` option".into()),
            code: Some(510),
        }),
        Some(_) if ambiguous && options.enum_ambiguity_check => {
            Err(ModcfgError::EnumResolveError {
                reference: reference.literal(),
                message: format!(
                    "Member '{}' is defined by more than one enum class",
                    reference.member
                ),
                hint: Some(
                    "Qualify the reference as :Class.member or disable enum_ambiguity_check".into(),
                ),
                code: Some(512),
            })
        }
        // with the check disabled, the first class in catalog order wins
        Some(class) => {
            let value = class
                .members
                .get(&reference.member)
                .cloned()
                .unwrap_or(Value::String(reference.member.clone()));
            Ok(EnumMember {
                class: class.name.clone(),
                name: reference.member.clone(),
                value: Box::new(value),
            })
        }
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::EnumClass;
    use crate::{parse_with_options, ParseOptions};

    fn catalog() -> Vec<EnumClass> {
        vec![
            EnumClass::new("Enum1")
                .member("duck_typing", Value::String("DUCKS CAN TYPE!!?".into()))
                .member("human_typing", Value::String("Much better".into())),
            EnumClass::new("Enum2")
                .member("polymorphism", Value::String("sucks".into()))
                .member("duck_typing", Value::String("is cool".into())),
        ]
    }

    fn doc() -> &'static str {
        "module Story:\n    is_made_by_a: :duck_typing\nmod Python:\n    has = :duck_typing\n"
    }

    fn member_of(value: &Value) -> &EnumMember {
        match value {
            Value::Module(module) => match &module.contents {
                ModuleContents::Map(items) => match &items[0].1 {
                    Value::Enum(member) => member,
                    other => panic!("Expected enum value, got {:?}", other),
                },
                other => panic!("Expected map contents, got {:?}", other),
            },
            other => panic!("Expected module, got {:?}", other),
        }
    }

    #[test]
    fn test_ambiguity_is_an_error_by_default() {
        let options = ParseOptions { enums: catalog(), ..ParseOptions::default() };
        let err = parse_with_options(doc(), &options).unwrap_err();
        assert!(matches!(err, ModcfgError::EnumResolveError { .. }));
    }

    #[test]
    fn test_ignore_ambiguity_is_deterministic() {
        let options = ParseOptions {
            enums: catalog(),
            enum_ambiguity_check: false,
            ..ParseOptions::default()
        };
        let value = parse_with_options(doc(), &options).expect("Failed to resolve");
        let entries = value.as_array().expect("Expected document entries");
        assert_eq!(member_of(&entries[0]).class, "Enum1");
        assert_eq!(member_of(&entries[1]).class, "Enum1");

        // reordering the catalog changes which class wins
        let mut reversed = catalog();
        reversed.reverse();
        let options = ParseOptions {
            enums: reversed,
            enum_ambiguity_check: false,
            ..ParseOptions::default()
        };
        let value = parse_with_options(doc(), &options).expect("Failed to resolve");
        let entries = value.as_array().expect("Expected document entries");
        assert_eq!(member_of(&entries[0]).class, "Enum2");
        assert_eq!(member_of(&entries[1]).class, "Enum2");
    }

    #[test]
    fn test_unique_member_resolves() {
        let options = ParseOptions { enums: catalog(), ..ParseOptions::default() };
        let value = parse_with_options("module Python:\n    hates = :polymorphism\n", &options)
            .expect("Failed to resolve");
        let entries = value.as_array().expect("Expected document entries");
        let member = member_of(&entries[0]);
        assert_eq!(member.class, "Enum2");
        assert_eq!(member.name, "polymorphism");
        assert_eq!(*member.value, Value::String("sucks".into()));
    }

    #[test]
    fn test_qualified_reference() {
        let options = ParseOptions { enums: catalog(), ..ParseOptions::default() };
        let value = parse_with_options(
            "module Story:\n    is_made_by_a: :Enum1.duck_typing\n",
            &options,
        )
        .expect("Failed to resolve");
        let entries = value.as_array().expect("Expected document entries");
        let member = member_of(&entries[0]);
        assert_eq!(member.class, "Enum1");
        assert_eq!(*member.value, Value::String("DUCKS CAN TYPE!!?".into()));
    }

    #[test]
    fn test_qualified_reference_missing_class_or_member() {
        let options = ParseOptions { enums: catalog(), ..ParseOptions::default() };
        let err = parse_with_options("a = :Nope.duck_typing\n", &options).unwrap_err();
        assert!(matches!(err, ModcfgError::EnumResolveError { code: Some(511), .. }));

        let err = parse_with_options("a = :Enum1.polymorphism\n", &options).unwrap_err();
        assert!(matches!(err, ModcfgError::EnumResolveError { code: Some(510), .. }));
    }

    #[test]
    fn test_empty_catalog_fails() {
        let err = parse_with_options(doc(), &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ModcfgError::EnumResolveError { .. }));
    }

    #[test]
    fn test_silent_fallback_keeps_literal_text() {
        let options = ParseOptions {
            enum_resolve_fail_silently: true,
            ..ParseOptions::default()
        };
        let value = parse_with_options(doc(), &options).expect("Fallback should not fail");
        let entries = value.as_array().expect("Expected document entries");
        match &entries[0] {
            Value::Module(module) => match &module.contents {
                ModuleContents::Map(items) => {
                    assert_eq!(items[0].1, Value::String(":duck_typing".into()));
                }
                other => panic!("Expected map contents, got {:?}", other),
            },
            other => panic!("Expected module, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_qualified_miss() {
        let err = parse_with_options("{main: :e.e}", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ModcfgError::EnumResolveError { .. }));

        let options = ParseOptions {
            enum_resolve_fail_silently: true,
            inline: true,
            ..ParseOptions::default()
        };
        let value = parse_with_options("{main: :e.e}", &options).expect("Fallback should not fail");
        assert_eq!(
            value,
            Value::Object(vec![("main".into(), Value::String(":e.e".into()))])
        );
    }
}
