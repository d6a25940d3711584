use std::path::{Path, PathBuf};

/// Expand a leading "~/" against the user's home directory.
pub(super) fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Best-effort lookup of the line where `key` is assigned, for error messages.
/// Matches on the last path segment so nested keys still land somewhere useful.
pub(super) fn find_config_line(key: &str, raw_content: &str) -> (usize, String) {
    let simple_key = key.rsplit('.').next().unwrap_or(key);

    for (idx, line) in raw_content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let stripped = trimmed.strip_prefix("- ").unwrap_or(trimmed);
        let line_key = stripped
            .split(|c: char| c == '=' || c == ':' || c.is_whitespace())
            .next()
            .unwrap_or("")
            .trim_matches(|c| c == '"' || c == '\'');

        if !line_key.is_empty() && line_key == simple_key {
            return (idx + 1, trimmed.to_string());
        }
    }

    (0, "<key not found>".into())
}
