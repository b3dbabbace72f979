use crate::error::{PerfScriptError, Result};
use crate::output::{DEFAULT_EXTENSIONS, sanitize_dir};
use colored::Colorize;
use std::path::Path;

/// Execute the clean command
pub fn execute_clean(dir: &Path, extensions: &[String]) -> Result<()> {
    if !dir.is_dir() {
        return Err(PerfScriptError::InvalidRequest(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let extensions: Vec<String> = if extensions.is_empty() {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    } else {
        extensions.iter().map(|e| normalize_extension(e)).collect()
    };

    let cleaned = sanitize_dir(dir, &extensions)?;

    if cleaned.is_empty() {
        println!("{} No code fences found in {}", "✓".green(), dir.display());
    } else {
        for path in &cleaned {
            println!("  {} {}", "cleaned".yellow(), path.display());
        }
        println!("{} Cleaned {} file(s)", "✓".green(), cleaned.len());
    }

    Ok(())
}

/// "js" and ".js" both mean ".js"
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
