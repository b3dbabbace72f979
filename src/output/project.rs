use super::ensure_dir;
use crate::error::Result;
use crate::models::K6Language;
use std::fs;
use std::path::{Path, PathBuf};

const PACKAGE_JSON: &str = include_str!("../../templates/project/package.json");
const TSCONFIG_JSON: &str = include_str!("../../templates/project/tsconfig.json");

/// Ensure the k6 project skeleton exists and return its `src/` directory
///
/// Only missing pieces are created; nothing already on disk is rewritten.
/// No package manager is executed.
pub fn ensure_project_layout(project: &Path, language: K6Language) -> Result<PathBuf> {
    ensure_dir(project)?;
    let src = project.join("src");
    ensure_dir(&src)?;

    create_if_absent(&project.join("package.json"), PACKAGE_JSON)?;
    if language == K6Language::TypeScript {
        create_if_absent(&project.join("tsconfig.json"), TSCONFIG_JSON)?;
    }

    Ok(src)
}

fn create_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "Created project file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PerfScriptError;
    use tempfile::TempDir;

    #[test]
    fn test_typescript_scaffold() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("shop-perf");

        let src = ensure_project_layout(&project, K6Language::TypeScript).unwrap();
        assert_eq!(src, project.join("src"));
        assert!(src.is_dir());
        assert!(project.join("package.json").is_file());
        assert!(project.join("tsconfig.json").is_file());
    }

    #[test]
    fn test_javascript_scaffold_skips_tsconfig_and_keeps_existing_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("package.json"), "{\"name\":\"mine\"}").unwrap();

        ensure_project_layout(tmp.path(), K6Language::JavaScript).unwrap();
        assert!(!tmp.path().join("tsconfig.json").exists());
        assert_eq!(
            fs::read_to_string(tmp.path().join("package.json")).unwrap(),
            "{\"name\":\"mine\"}"
        );
    }

    #[test]
    fn test_src_file_is_layout_conflict() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("src"), "").unwrap();

        assert!(matches!(
            ensure_project_layout(tmp.path(), K6Language::JavaScript),
            Err(PerfScriptError::LayoutConflict(_))
        ));
    }

    #[test]
    fn test_templates_are_valid_json() {
        serde_json::from_str::<serde_json::Value>(PACKAGE_JSON).unwrap();
        serde_json::from_str::<serde_json::Value>(TSCONFIG_JSON).unwrap();
    }
}
