// src/export/fs_utils.rs

use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::path::first_free;
use std::fs;
use std::path::{Path, PathBuf};

/// Make sure `path` can be written without destroying anything.
///
/// - Missing parent directories are created.
/// - If the file already exists a numbered sibling is chosen instead.
///   Teardown can't stop to ask, so this never prompts.
pub fn prepare_output_path(path: &Path) -> AppResult<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let free = first_free(path);
    if free != path {
        warning(format!(
            "The file '{}' already exists, saving to '{}' instead.",
            path.display(),
            free.display()
        ));
    }
    Ok(free)
}
