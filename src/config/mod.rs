// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use crate::ast::Value;
use crate::{parse_with_options, ModcfgError, ParseOptions};

mod access;
mod conversion;
mod validation;
mod helpers;

/// High-level handle over one parsed MODCFG document: dot-path typed access
/// across top-level mappings and module blocks.
#[derive(Debug)]
pub struct ModcfgConfig {
    entries: Vec<Value>,
    raw_content: String, // kept for error reporting
}

impl ModcfgConfig {
    /// Load a MODCFG file with default parse options.
    ///
    /// # Example
    /// ```ignore
    /// let config = ModcfgConfig::from_file("config.modcfg")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModcfgError> {
        Self::from_file_with_options(path, &ParseOptions::default())
    }

    /// Load a MODCFG file, resolving enum references against `options.enums`.
    /// A leading `~/` in the path expands to the home directory.
    pub fn from_file_with_options<P: AsRef<Path>>(
        path: P,
        options: &ParseOptions,
    ) -> Result<Self, ModcfgError> {
        let resolved = helpers::expand_home(path.as_ref());
        let content = fs::read_to_string(&resolved).map_err(|e| ModcfgError::FileError {
            message: format!("Failed to read file: {}", e),
            path: resolved.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;
        Self::from_str_with_options(&content, options)
    }

    /// Load a MODCFG file with fallback support.
    ///
    /// Tries to load from the primary path first. If that fails (file not
    /// found), attempts to load from the fallback path.
    pub fn from_file_with_fallback<P: AsRef<Path>>(
        primary: P,
        fallback: P,
    ) -> Result<Self, ModcfgError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(ModcfgError::FileError { .. }) => {
                Self::from_file(&fallback).map_err(|e| match e {
                    ModcfgError::FileError { message, .. } => ModcfgError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(302),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other), // pass through non-file errors
        }
    }

    /// Parse a MODCFG config from a string (no file I/O).
    pub fn from_str(content: &str) -> Result<Self, ModcfgError> {
        Self::from_str_with_options(content, &ParseOptions::default())
    }

    pub fn from_str_with_options(
        content: &str,
        options: &ParseOptions,
    ) -> Result<Self, ModcfgError> {
        // the full entry list is kept; inline collapsing is an entry-point
        // concern, not a config-access one
        let mut options = options.clone();
        options.inline = false;

        let value = parse_with_options(content, &options)?;
        let entries = match value {
            Value::Array(entries) => entries,
            other => vec![other],
        };

        Ok(Self { entries, raw_content: content.to_string() })
    }

    /// The document's top-level entries, in source order.
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Names of the module blocks in the document, in source order.
    pub fn module_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| entry.as_module().map(|m| m.name.clone()))
            .collect()
    }
}
