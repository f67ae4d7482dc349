//! Path utilities: expand ~, resolve output templates, avoid collisions.

use std::path::{Path, PathBuf};

/// Placeholder replaced by the session start timestamp.
pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Render an output template for a given timestamp.
///
/// A template without `{timestamp}` gets `_<stamp>` inserted before the
/// extension, so two sessions never share a name by default.
pub fn render_template(template: &str, stamp: &str) -> PathBuf {
    if template.contains(TIMESTAMP_PLACEHOLDER) {
        return expand_tilde(&template.replace(TIMESTAMP_PLACEHOLDER, stamp));
    }

    let path = expand_tilde(template);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{stamp}"),
    };
    path.with_file_name(name)
}

/// First of `path`, `path_1`, `path_2`, ... that does not exist yet.
pub fn first_free(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().to_string());

    let mut n = 1u32;
    loop {
        let name = match &ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        };
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
