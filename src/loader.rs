//! Schema loading: one fragment per file, keyed by file name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::types::{json_type_name, Registry};

/// Load a schema fragment from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::InvalidJson` if the file isn't valid JSON, or
/// `LoadError::NotASchema` if the document is not an object or boolean.
pub fn load_fragment(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    parse_fragment(&content, path)
}

/// Load a schema fragment from a JSON string.
pub fn load_fragment_str(content: &str) -> Result<Value, LoadError> {
    parse_fragment(content, Path::new("<string>"))
}

fn parse_fragment(content: &str, path: &Path) -> Result<Value, LoadError> {
    let value: Value = serde_json::from_str(content).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(_) | Value::Bool(_) => Ok(value),
        other => Err(LoadError::NotASchema {
            path: path.to_path_buf(),
            actual: json_type_name(&other).to_string(),
        }),
    }
}

/// Registry key for a fragment file: the file name up to the first `.`.
///
/// `httpRequest.schema.json` becomes `httpRequest`.
pub fn registry_key(path: &Path) -> Result<String, LoadError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoadError::InvalidKey {
            path: path.to_path_buf(),
        })?;

    let key = name.split('.').next().unwrap_or_default();
    if key.is_empty() {
        return Err(LoadError::InvalidKey {
            path: path.to_path_buf(),
        });
    }
    Ok(key.to_string())
}

/// Drop a top-level `oneOf` from a fragment that also declares `type`.
///
/// Downstream tooling reads `type` + `oneOf` as contradictory; `type` wins.
/// Returns true if `oneOf` was removed.
pub fn strip_conflicting_one_of(fragment: &mut Value) -> bool {
    match fragment {
        Value::Object(map) if map.contains_key("type") => map.remove("oneOf").is_some(),
        _ => false,
    }
}

/// Load every file in `dir` into a registry.
///
/// Files are visited in file-name order so repeated runs see the same
/// registry. Subdirectories are skipped; files are not filtered by extension.
///
/// # Errors
///
/// The first unreadable or malformed file aborts the load. Two files that
/// yield the same key produce `LoadError::DuplicateFile`.
pub fn load_registry(dir: &Path) -> Result<Registry, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut registry = Registry::new();
    let mut origins: HashMap<String, PathBuf> = HashMap::new();

    for path in collect_fragment_files(dir)? {
        let key = registry_key(&path)?;
        if let Some(first) = origins.get(&key) {
            return Err(LoadError::DuplicateFile {
                key,
                first: first.clone(),
                second: path,
            });
        }

        let mut fragment = load_fragment(&path)?;
        if strip_conflicting_one_of(&mut fragment) {
            debug!(key = %key, "Dropped oneOf alongside type");
        }
        debug!(key = %key, path = %path.display(), "Loaded fragment");

        registry.insert(key.clone(), fragment)?;
        origins.insert(key, path);
    }

    Ok(registry)
}

/// List the regular files directly inside `dir`, sorted by name.
fn collect_fragment_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::ReadError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::ReadError {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn load_fragment_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type": "object"}}"#).unwrap();

        let fragment = load_fragment(file.path()).unwrap();
        assert_eq!(fragment["type"], "object");
    }

    #[test]
    fn load_fragment_file_not_found() {
        let result = load_fragment(Path::new("/nonexistent/path.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_fragment_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let result = load_fragment(file.path());
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_fragment_str_rejects_non_schema() {
        let result = load_fragment_str("[1, 2]");
        assert!(matches!(result, Err(LoadError::NotASchema { actual, .. }) if actual == "array"));

        assert_eq!(load_fragment_str("true").unwrap(), json!(true));
    }

    #[test]
    fn registry_key_uses_text_before_first_dot() {
        assert_eq!(
            registry_key(Path::new("schema/httpRequest.schema.json")).unwrap(),
            "httpRequest"
        );
        assert_eq!(registry_key(Path::new("times.json")).unwrap(), "times");
        assert_eq!(registry_key(Path::new("README")).unwrap(), "README");
    }

    #[test]
    fn registry_key_rejects_leading_dot() {
        let result = registry_key(Path::new(".hidden.json"));
        assert!(matches!(result, Err(LoadError::InvalidKey { .. })));
    }

    #[test]
    fn strip_one_of_only_when_type_present() {
        let mut with_type = json!({"type": "object", "oneOf": [{"required": ["a"]}]});
        assert!(strip_conflicting_one_of(&mut with_type));
        assert_eq!(with_type, json!({"type": "object"}));

        let mut without_type = json!({"oneOf": [{"type": "string"}, {"type": "number"}]});
        assert!(!strip_conflicting_one_of(&mut without_type));
        assert!(without_type.get("oneOf").is_some());
    }

    #[test]
    fn strip_one_of_leaves_nested_unions() {
        let mut fragment = json!({
            "type": "object",
            "properties": {
                "body": {"type": "object", "oneOf": [{"type": "string"}]}
            }
        });
        assert!(!strip_conflicting_one_of(&mut fragment));
        assert!(fragment["properties"]["body"].get("oneOf").is_some());
    }

    #[test]
    fn load_registry_builds_one_entry_per_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("times.schema.json"), r#"{"type":"object"}"#).unwrap();
        fs::write(
            dir.path().join("action.schema.json"),
            r##"{"$ref":"#/definitions/times"}"##,
        )
        .unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let registry = load_registry(dir.path()).unwrap();
        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, ["action", "times"]);
    }

    #[test]
    fn load_registry_strips_one_of() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("matcher.schema.json"),
            r#"{"type":"object","oneOf":[{"required":["path"]}]}"#,
        )
        .unwrap();

        let registry = load_registry(dir.path()).unwrap();
        assert_eq!(registry.get("matcher"), Some(&json!({"type": "object"})));
    }

    #[test]
    fn load_registry_duplicate_key_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("times.json"), "{}").unwrap();
        fs::write(dir.path().join("times.schema.json"), "{}").unwrap();

        let result = load_registry(dir.path());
        match result {
            Err(LoadError::DuplicateFile { key, first, second }) => {
                assert_eq!(key, "times");
                assert!(first.ends_with("times.json"));
                assert!(second.ends_with("times.schema.json"));
            }
            other => panic!("expected duplicate file error, got {:?}", other),
        }
    }

    #[test]
    fn load_registry_aborts_on_malformed_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not json").unwrap();

        let result = load_registry(dir.path());
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_registry_missing_directory() {
        let result = load_registry(Path::new("/nonexistent/schema/dir"));
        assert!(matches!(result, Err(LoadError::DirectoryNotFound { .. })));
    }

    #[test]
    fn load_registry_empty_directory() {
        let dir = tempdir().unwrap();
        let registry = load_registry(dir.path()).unwrap();
        assert!(registry.is_empty());
    }
}
