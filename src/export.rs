//! Plain-text export of a grown tree.

use crate::canvas::Canvas;
use crate::error::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// `bonsai_YYYYmmdd_HHMMSS.txt`
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("bonsai_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// An explicit path wins; otherwise a timestamped name inside `directory`
/// (or the working directory).
pub fn resolve_save_path(requested: Option<PathBuf>, directory: Option<&Path>, now: DateTime<Local>) -> PathBuf {
    match requested {
        Some(path) => path,
        None => directory
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(default_file_name(now)),
    }
}

/// Write the canvas rows joined by newlines, creating parent directories.
pub fn save_text(canvas: &Canvas, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, canvas.to_text())?;
    tracing::debug!(path = %path.display(), "saved bonsai");
    Ok(())
}
