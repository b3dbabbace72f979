use crate::error::{PerfScriptError, Result};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed Swagger/OpenAPI document together with the file it came from
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerDocument {
    pub file: PathBuf,
    pub content: Value,
}

/// Source of parsed Swagger documents
pub trait SwaggerSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSwaggerSource;

impl SwaggerSource for FsSwaggerSource {
    fn load(&self, path: &Path) -> Result<Value> {
        load_swagger(path)
    }
}

/// Load a Swagger/OpenAPI document (YAML or JSON, chosen by extension)
pub fn load_swagger<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PerfScriptError::SwaggerNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    let content = fs::read_to_string(path)?;

    let parse_error = |message: String| PerfScriptError::SwaggerParse {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_str() {
        "yaml" | "yml" => {
            tracing::debug!(path = %path.display(), "Parsing YAML Swagger file");
            // YAMLは整数キー ('200' ではなく 200) を許すため一度 YAML の値として読む
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
            serde_json::to_value(yaml).map_err(|e| parse_error(e.to_string()))
        }
        "json" => {
            tracing::debug!(path = %path.display(), "Parsing JSON Swagger file");
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
        }
        other => Err(PerfScriptError::UnsupportedSwaggerFormat(format!(".{}", other))),
    }
}

/// Resolve a Swagger reference against the base directory
///
/// The result is canonical, so different spellings of the same file compare equal.
pub fn resolve_swagger_path(base: &Path, file: &str) -> Result<PathBuf> {
    if file.trim().is_empty() {
        return Err(PerfScriptError::SwaggerFileMissing);
    }

    let joined = base.join(file);
    if !joined.exists() {
        return Err(PerfScriptError::SwaggerNotFound(joined));
    }

    Ok(fs::canonicalize(&joined)?)
}

/// Resolve every reference and drop duplicates, keeping first-seen order
pub fn resolve_swagger_paths<'a, I>(base: &Path, files: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut resolved = IndexSet::new();
    for file in files {
        resolved.insert(resolve_swagger_path(base, file)?);
    }

    if resolved.is_empty() {
        return Err(PerfScriptError::SwaggerFileMissing);
    }

    Ok(resolved.into_iter().collect())
}

/// Load each (already deduplicated) document once
pub fn load_documents(source: &dyn SwaggerSource, paths: &[PathBuf]) -> Result<Vec<SwaggerDocument>> {
    paths
        .iter()
        .map(|path| {
            Ok(SwaggerDocument {
                file: path.clone(),
                content: source.load(path)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    const PETSTORE_YAML: &str = r#"
openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        200:
          description: OK
"#;

    #[test]
    fn test_load_yaml_with_integer_response_keys() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(PETSTORE_YAML.as_bytes()).unwrap();

        let doc = load_swagger(file.path()).unwrap();
        assert_eq!(doc["info"]["title"], "Petstore");
        assert_eq!(
            doc["paths"]["/pets"]["get"]["responses"]["200"]["description"],
            "OK"
        );
    }

    #[test]
    fn test_load_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"openapi": "3.0.0", "paths": {"/a": {}}}"#)
            .unwrap();

        let doc = load_swagger(file.path()).unwrap();
        assert_eq!(doc["openapi"], "3.0.0");
    }

    #[test]
    fn test_unsupported_extension() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"openapi: 3.0.0").unwrap();

        let result = load_swagger(file.path());
        assert!(matches!(
            result,
            Err(PerfScriptError::UnsupportedSwaggerFormat(ext)) if ext == ".txt"
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_swagger("/nonexistent/petstore.yaml");
        assert!(matches!(result, Err(PerfScriptError::SwaggerNotFound(_))));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(matches!(
            load_swagger(file.path()),
            Err(PerfScriptError::SwaggerParse { .. })
        ));
    }

    #[test]
    fn test_resolve_deduplicates_equivalent_paths() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("petstore.yaml"), PETSTORE_YAML).unwrap();
        fs::write(dir.path().join("users.json"), "{}").unwrap();

        let paths = resolve_swagger_paths(
            dir.path(),
            ["petstore.yaml", "users.json", "./petstore.yaml"],
        )
        .unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("petstore.yaml"));
        assert!(paths[1].ends_with("users.json"));
    }

    #[test]
    fn test_resolve_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = resolve_swagger_paths(dir.path(), ["missing.yaml"]);
        assert!(matches!(result, Err(PerfScriptError::SwaggerNotFound(_))));
    }

    #[test]
    fn test_resolve_requires_at_least_one_reference() {
        let dir = TempDir::new().unwrap();
        let result = resolve_swagger_paths(dir.path(), std::iter::empty());
        assert!(matches!(result, Err(PerfScriptError::SwaggerFileMissing)));
    }
}
