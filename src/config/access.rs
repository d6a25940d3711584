use super::*;
use crate::ast::ModuleContents;

impl ModcfgConfig {
    /// Get a typed value from the configuration using dot notation.
    ///
    /// Path segments address mapping keys and module names; numeric segments
    /// index into sequences.
    ///
    /// # Examples
    /// ```no_run
    /// # use modcfg::ModcfgConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = ModcfgConfig::from_file("config.modcfg")?;
    /// let host: String = config.get("server.host")?;
    /// let port: u16 = config.get("server.port")?;
    /// let debug: bool = config.get("debug")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if the path doesn't exist or the value can't be
    /// converted to type T.
    pub fn get<T>(&self, path: &str) -> Result<T, ModcfgError>
    where
        T: TryFrom<Value, Error = ModcfgError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content))
    }

    /// Get an optional typed value - returns `None` if the key doesn't exist.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, ModcfgError>
    where
        T: TryFrom<Value, Error = ModcfgError>,
    {
        match self.get_value(path) {
            Ok(value) => Ok(Some(T::try_from(value)?)),
            Err(ModcfgError::SyntaxError { code: Some(304), .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use modcfg::ModcfgConfig;
    /// # let config = ModcfgConfig::from_file("config.modcfg").unwrap();
    /// let timeout = config.get_or("server.timeout", 30u64);
    /// let debug = config.get_or("debug", false);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = ModcfgError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value` from the configuration. An empty path returns the
    /// whole document as an array of entries.
    pub fn get_value(&self, path: &str) -> Result<Value, ModcfgError> {
        if path.trim().is_empty() {
            return Ok(Value::Array(self.entries.clone()));
        }

        let mut current: Option<Value> = None;
        for segment in path.split('.') {
            let next = match &current {
                None => lookup_top_level(&self.entries, segment),
                Some(value) => lookup_in_value(value, segment),
            };
            current = Some(next.ok_or_else(|| not_found_error(path, &self.raw_content))?);
        }

        current.ok_or_else(|| not_found_error(path, &self.raw_content))
    }

    /// Get all keys at a given path level.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, ModcfgError> {
        let value = self.get_value(path)?;
        match value {
            Value::Object(items) => Ok(items.iter().map(|(k, _)| k.clone()).collect()),
            Value::Module(module) => match module.contents {
                ModuleContents::Map(items) => {
                    Ok(items.iter().map(|(k, _)| k.clone()).collect())
                }
                ModuleContents::Seq(_) => Err(ModcfgError::TypeError {
                    message: format!("Module '{}' holds a sequence, not keys", path),
                    line: 0,
                    column: 0,
                    hint: Some("Index sequence modules numerically".into()),
                    code: Some(305),
                }),
            },
            _ => Err(ModcfgError::TypeError {
                message: format!("Path '{}' is not an object", path),
                line: 0,
                column: 0,
                hint: Some("Only objects have keys".into()),
                code: Some(305),
            }),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }
}

fn lookup_top_level(entries: &[Value], segment: &str) -> Option<Value> {
    for entry in entries {
        match entry {
            Value::Module(module) if module.name == segment => return Some(entry.clone()),
            Value::Object(items) => {
                if let Some((_, v)) = items.iter().find(|(k, _)| k == segment) {
                    return Some(v.clone());
                }
            }
            _ => {}
        }
    }
    None
}

fn lookup_in_value(value: &Value, segment: &str) -> Option<Value> {
    match value {
        Value::Object(items) => items
            .iter()
            .find(|(k, _)| k == segment)
            .map(|(_, v)| v.clone()),
        Value::Module(module) => match &module.contents {
            ModuleContents::Map(items) => items
                .iter()
                .find(|(k, _)| k == segment)
                .map(|(_, v)| v.clone()),
            ModuleContents::Seq(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i).cloned()),
        },
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get(i).cloned()),
        _ => None,
    }
}

fn not_found_error(path: &str, raw_content: &str) -> ModcfgError {
    let (line, snippet) = helpers::find_config_line(path, raw_content);
    if line > 0 {
        ModcfgError::SyntaxError {
            message: format!(
                "Path '{}' found but could not be resolved on line {}",
                path, line
            ),
            line,
            column: 0,
            hint: Some(format!("Check the value at: {}", snippet)),
            code: Some(304),
        }
    } else {
        ModcfgError::SyntaxError {
            message: format!("Path '{}' not found in configuration", path),
            line: 0,
            column: 0,
            hint: Some("Check that the path exists in your config file".into()),
            code: Some(304),
        }
    }
}

/// Enhance type/validation errors with line number information from the file.
fn enhance_error_with_line_info(e: ModcfgError, path: &str, raw_content: &str) -> ModcfgError {
    match e {
        ModcfgError::TypeError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_config_line(path, raw_content);
            if line > 0 {
                ModcfgError::TypeError {
                    message: format!("{}\n  → {}", message, snippet),
                    line,
                    column: 0,
                    hint,
                    code,
                }
            } else {
                ModcfgError::TypeError { message, line: 0, column: 0, hint, code }
            }
        }
        ModcfgError::ValidationError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_config_line(path, raw_content);
            if line > 0 {
                ModcfgError::ValidationError {
                    message: format!("{}\n  → {}", message, snippet),
                    line,
                    column: 0,
                    hint,
                    code,
                }
            } else {
                ModcfgError::ValidationError { message, line: 0, column: 0, hint, code }
            }
        }
        other => other,
    }
}
