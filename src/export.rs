// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use serde_json::json;

use crate::ast::{Module, ModuleContents, Value};
use crate::{parse, ModcfgError};

/// Export parsed MODCFG values to JSON format.
///
/// Converts all values to their JSON equivalents:
/// - Strings, integers, booleans → direct mapping
/// - Arrays, objects → nested JSON structures
/// - Dates, datetimes → ISO-8601 strings
/// - Resolved enums → `{"class": ..., "name": ..., "value": ...}`
/// - Unresolved enum references → their literal text (`":name"`)
/// - Modules → `{"module": name, "contents": ...}`
///
/// # Examples
/// ```no_run
/// use modcfg::export::export_file_to_json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let json = export_file_to_json("config.modcfg")?;
/// println!("{}", json);
/// # Ok(())
/// # }
/// ```
pub fn export_value_to_json(value: &Value) -> Result<String, ModcfgError> {
    fn value_to_json(v: &Value) -> serde_json::Value {
        match v {
            Value::String(s) => json!(s),
            Value::Int(i) => json!(i),
            Value::Bool(b) => json!(b),
            Value::Date(date) => json!(date.format("%Y-%m-%d").to_string()),
            Value::DateTime(dt) => json!(dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string()),
            Value::EnumRef(reference) => json!(reference.literal()),
            Value::Enum(member) => json!({
                "class": member.class,
                "name": member.name,
                "value": value_to_json(&member.value),
            }),
            Value::Array(items) => {
                json!(items.iter().map(value_to_json).collect::<Vec<_>>())
            }
            Value::Object(items) => entries_to_json(items),
            Value::Module(module) => module_to_json(module),
        }
    }

    fn entries_to_json(items: &[(String, Value)]) -> serde_json::Value {
        let map = items
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    fn module_to_json(module: &Module) -> serde_json::Value {
        let contents = match &module.contents {
            ModuleContents::Seq(items) => {
                json!(items.iter().map(value_to_json).collect::<Vec<_>>())
            }
            ModuleContents::Map(items) => entries_to_json(items),
        };
        json!({ "module": module.name, "contents": contents })
    }

    Ok(serde_json::to_string_pretty(&value_to_json(value)).unwrap())
}

/// Export a MODCFG file directly to JSON.
///
/// Convenience function that reads, parses, and exports in one call.
///
/// # Errors
/// Returns error if the file doesn't exist or contains invalid MODCFG syntax.
pub fn export_file_to_json(path: &str) -> Result<String, ModcfgError> {
    let input = fs::read_to_string(path).map_err(|e| ModcfgError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })?;

    let value = parse(&input)?;
    export_value_to_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::EnumMember;
    use crate::parse;

    #[test]
    fn test_export_document_to_json() {
        let value = parse("module app:\n    name = demo\n    port = 8080\n{flag: true}\n")
            .expect("Failed to parse");
        let json_output = export_value_to_json(&value).expect("Failed to export");

        println!("--- Exported JSON ---\n{}", json_output);

        let deserialized: serde_json::Value = serde_json::from_str(&json_output).unwrap();
        assert_eq!(deserialized[0]["module"], "app");
        assert_eq!(deserialized[0]["contents"]["name"], "demo");
        assert_eq!(deserialized[0]["contents"]["port"], 8080);
        assert_eq!(deserialized[1]["flag"], true);
    }

    #[test]
    fn test_export_dates_as_iso_strings() {
        let value = parse("{d: date(2021-04-19), t: datetime(2021-04-18 14:50:55.016922)}")
            .expect("Failed to parse");
        let json_output = export_value_to_json(&value).expect("Failed to export");
        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        assert_eq!(v[0]["d"], "2021-04-19");
        assert_eq!(v[0]["t"], "2021-04-18 14:50:55.016922");
    }

    #[test]
    fn test_export_enum_member() {
        let value = Value::Enum(EnumMember {
            class: "Enum2".into(),
            name: "duck_typing".into(),
            value: Box::new(Value::String("is cool".into())),
        });
        let json_output = export_value_to_json(&value).expect("Failed to export");
        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        assert_eq!(v["class"], "Enum2");
        assert_eq!(v["name"], "duck_typing");
        assert_eq!(v["value"], "is cool");
    }
}
