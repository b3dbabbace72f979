//! Markdown code-fence removal
//!
//! Models often wrap source in ```` ```js ... ``` ```` even when told not to.
//! Only fences at the very start or end of a file are stripped (together with
//! the blank lines around them); fences inside the body are left alone.

use super::write_atomic;
use crate::error::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Extensions cleaned after a script is written
pub const SCRIPT_EXTENSIONS: [&str; 3] = [".js", ".ts", ".java"];

/// Extensions cleaned by the `clean` command when none are given
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".js", ".ts", ".java", ".json"];

static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```(js|javascript|javascripts|ts|typescript|java|python|json)?$")
        .expect("opening fence pattern is valid")
});

const CLOSING_FENCE: &str = "```";

/// Strip leading/trailing fences. Returns `None` when nothing was removed.
pub fn strip_fences(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let mut start = 0;
    let mut end = lines.len();
    let mut removed = false;

    loop {
        let Some(first) = lines[start..end].iter().position(|l| !l.trim().is_empty()) else {
            break;
        };
        if !OPENING_FENCE.is_match(lines[start + first].trim()) {
            break;
        }
        start += first + 1;
        removed = true;
    }

    loop {
        let Some(last) = lines[start..end].iter().rposition(|l| !l.trim().is_empty()) else {
            break;
        };
        if lines[start + last].trim() != CLOSING_FENCE {
            break;
        }
        end = start + last;
        removed = true;
    }

    if !removed {
        return None;
    }

    // 前後の空行も除去
    while start < end && lines[start].trim().is_empty() {
        start += 1;
    }
    while end > start && lines[end - 1].trim().is_empty() {
        end -= 1;
    }

    let mut cleaned = lines[start..end].join("\n");
    if content.ends_with('\n') && !cleaned.is_empty() {
        cleaned.push('\n');
    }
    Some(cleaned)
}

fn has_extension(path: &Path, extensions: &[impl AsRef<str>]) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    extensions.iter().any(|ext| name.ends_with(ext.as_ref()))
}

/// Walk `root` recursively and clean every file with a matching extension
///
/// Returns the files that were rewritten. Running it twice rewrites nothing the second time.
pub fn sanitize_dir(root: &Path, extensions: &[impl AsRef<str>]) -> Result<Vec<PathBuf>> {
    let mut cleaned = Vec::new();
    walk(root, extensions, &mut cleaned)?;
    Ok(cleaned)
}

fn walk(dir: &Path, extensions: &[impl AsRef<str>], cleaned: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // symlinks are not followed
        entries.push((entry.path(), entry.file_type()?));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in entries {
        if file_type.is_dir() {
            walk(&path, extensions, cleaned)?;
        } else if file_type.is_file() && has_extension(&path, extensions) {
            let Ok(content) = String::from_utf8(fs::read(&path)?) else {
                tracing::warn!(path = %path.display(), "Skipping file that is not valid UTF-8");
                continue;
            };
            if let Some(stripped) = strip_fences(&content) {
                write_atomic(&path, &stripped)?;
                tracing::debug!(path = %path.display(), "Removed code fences");
                cleaned.push(path);
            }
        }
    }
    Ok(())
}
