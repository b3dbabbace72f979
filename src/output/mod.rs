//! File-system side effects of a generation run
//!
//! - `writer`: atomic artifact write followed by a fence clean-up pass
//! - `sanitizer`: strips Markdown code fences from generated sources
//! - `workflow`: CI workflow files, created once and never overwritten
//! - `project`: k6 project scaffold (`src/`, `package.json`, `tsconfig.json`)

pub mod project;
pub mod sanitizer;
pub mod workflow;
pub mod writer;

pub use project::ensure_project_layout;
pub use sanitizer::{DEFAULT_EXTENSIONS, SCRIPT_EXTENSIONS, sanitize_dir, strip_fences};
pub use workflow::{WorkflowFile, provision_workflow};
pub use writer::{ArtifactWriter, write_atomic};

use crate::error::{PerfScriptError, Result};
use std::fs;
use std::path::Path;

/// Create `dir` (and parents) unless it exists. An existing non-directory is a layout conflict.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PerfScriptError::LayoutConflict(format!(
                "{} exists and is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }

    fs::create_dir_all(dir)?;
    tracing::debug!(dir = %dir.display(), "Created directory");
    Ok(())
}
