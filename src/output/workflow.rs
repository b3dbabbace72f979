use super::ensure_dir;
use crate::error::Result;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A CI workflow definition shipped with generated scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowFile {
    pub file_name: &'static str,
    pub content: &'static str,
}

pub const K6_WORKFLOW: WorkflowFile = WorkflowFile {
    file_name: "k6.yml",
    content: include_str!("../../templates/workflows/k6.yml"),
};

pub const JMETER_WORKFLOW: WorkflowFile = WorkflowFile {
    file_name: "Jmeter.yml",
    content: include_str!("../../templates/workflows/jmeter.yml"),
};

/// Ensure `<root>/.github/workflows/<file>` exists
///
/// An existing workflow file is left byte-for-byte untouched. Returns the
/// path and whether the file was created by this call.
pub fn provision_workflow(root: &Path, workflow: &WorkflowFile) -> Result<(PathBuf, bool)> {
    let dir = root.join(".github").join("workflows");
    ensure_dir(&dir)?;

    let path = dir.join(workflow.file_name);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "Workflow already exists, skipped");
            return Ok((path, false));
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(file, "{}", workflow.content.trim())?;
    tracing::info!(path = %path.display(), "Workflow added");
    Ok((path, true))
}
