use super::ensure_dir;
use super::sanitizer::{SCRIPT_EXTENSIONS, sanitize_dir};
use crate::error::{PerfScriptError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write `content` to `path` through a temp file in the same directory, then rename
///
/// Readers never observe a partially written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| PerfScriptError::IoError(e.error))?;
    Ok(())
}

/// Persists generated scripts and cleans code fences out of the target directory
pub struct ArtifactWriter {
    extensions: Vec<String>,
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new(SCRIPT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl ArtifactWriter {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Write the artifact, then sanitize every matching file in its directory
    pub fn write(&self, dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
        if file_name.contains(['/', '\\']) || file_name.trim().is_empty() {
            return Err(PerfScriptError::InvalidRequest(format!(
                "Invalid output file name: {}",
                file_name
            )));
        }

        ensure_dir(dir)?;

        let path = dir.join(file_name);
        if path.is_dir() {
            return Err(PerfScriptError::LayoutConflict(format!(
                "{} exists and is a directory",
                path.display()
            )));
        }

        write_atomic(&path, content)?;
        tracing::info!(path = %path.display(), bytes = content.len(), "Script written");

        let cleaned = sanitize_dir(dir, &self.extensions)?;
        if !cleaned.is_empty() {
            tracing::debug!(files = cleaned.len(), dir = %dir.display(), "Stripped code fences");
        }

        Ok(path)
    }
}
