//! Controller YAML rewriting
//!
//! The controller file maps robot identifiers to controller configuration
//! blocks. Rewriting scopes the configuration under a root key equal to the
//! robot id and writes the result to a temporary file that is handed to the
//! xacro invocation.

use crate::error::{LaunchError, Result};
use serde_yaml::Value;
use std::{fs, io::Write, path::Path};
use tempfile::NamedTempFile;

/// Rewrite a controller file so its effective root scope is `root_key`.
///
/// Returns the temp file holding the rewritten YAML; it is deleted when the
/// returned handle is dropped, so the caller must keep it alive until the
/// consumer has read it.
pub fn rewrite_controllers(source: &Path, root_key: &str) -> Result<NamedTempFile> {
    let content = fs::read_to_string(source)?;
    let yaml: Value = serde_yaml::from_str(&content).map_err(|e| LaunchError::Yaml {
        file: source.display().to_string(),
        message: e.to_string(),
    })?;

    let mut scoped = scope_under_root(yaml, root_key);
    convert_scalar_strings(&mut scoped);

    let rewritten = serde_yaml::to_string(&scoped).map_err(|e| LaunchError::Yaml {
        file: source.display().to_string(),
        message: e.to_string(),
    })?;

    let mut file = NamedTempFile::new()?;
    file.write_all(rewritten.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Scope a document under `root_key`.
///
/// If the document already has `root_key` at top level (the controller file
/// convention: top-level keys are robot identifiers), only that entry is
/// kept. Otherwise the whole document is nested under the new root key.
fn scope_under_root(yaml: Value, root_key: &str) -> Value {
    let key = Value::String(root_key.to_string());

    if let Value::Mapping(map) = &yaml {
        if let Some(existing) = map.get(&key) {
            let mut root = serde_yaml::Mapping::new();
            root.insert(key, existing.clone());
            return Value::Mapping(root);
        }
    }

    let mut root = serde_yaml::Mapping::new();
    root.insert(key, yaml);
    Value::Mapping(root)
}

/// Convert string scalars that parse as bool/int/float into typed values
fn convert_scalar_strings(value: &mut Value) {
    match value {
        Value::String(s) => {
            *value = string_to_yaml_value(s);
        }
        Value::Mapping(map) => {
            for (_, v) in map.iter_mut() {
                convert_scalar_strings(v);
            }
        }
        Value::Sequence(seq) => {
            for item in seq.iter_mut() {
                convert_scalar_strings(item);
            }
        }
        _ => {}
    }
}

fn string_to_yaml_value(s: &str) -> Value {
    match s {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = s.parse::<f64>() {
        if let Ok(value) = serde_yaml::to_value(n) {
            return value;
        }
    }

    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn parse_rewritten(file: &NamedTempFile) -> Value {
        let content = fs::read_to_string(file.path()).unwrap();
        serde_yaml::from_str(&content).unwrap()
    }

    #[test]
    fn test_root_scope_is_robot_id() {
        let source = write_temp_yaml(
            r#"
alpha:
  controller_manager:
    ros__parameters:
      update_rate: "100"
"#,
        );

        let rewritten = rewrite_controllers(source.path(), "alpha").unwrap();
        let yaml = parse_rewritten(&rewritten);

        let root = yaml.as_mapping().unwrap();
        assert_eq!(root.len(), 1);
        assert!(root.contains_key(&Value::String("alpha".to_string())));
    }

    #[test]
    fn test_matching_key_selected_others_dropped() {
        let source = write_temp_yaml(
            r#"
alpha:
  controller_manager:
    ros__parameters:
      update_rate: 100
beta:
  controller_manager:
    ros__parameters:
      update_rate: 50
"#,
        );

        let rewritten = rewrite_controllers(source.path(), "alpha").unwrap();
        let yaml = parse_rewritten(&rewritten);

        let root = yaml.as_mapping().unwrap();
        assert_eq!(root.len(), 1);
        assert!(root.contains_key(&Value::String("alpha".to_string())));
        assert!(!root.contains_key(&Value::String("beta".to_string())));
    }

    #[test]
    fn test_unscoped_document_nested_under_root() {
        let source = write_temp_yaml(
            r#"
controller_manager:
  ros__parameters:
    update_rate: 100
"#,
        );

        let rewritten = rewrite_controllers(source.path(), "robot").unwrap();
        let yaml = parse_rewritten(&rewritten);

        let scoped = &yaml["robot"]["controller_manager"]["ros__parameters"]["update_rate"];
        assert_eq!(scoped.as_i64(), Some(100));
    }

    #[test]
    fn test_scalar_strings_converted() {
        let source = write_temp_yaml(
            r#"
robot:
  params:
    rate: "100"
    gain: "0.5"
    enabled: "true"
    name: "diff_drive"
"#,
        );

        let rewritten = rewrite_controllers(source.path(), "robot").unwrap();
        let yaml = parse_rewritten(&rewritten);

        let params = &yaml["robot"]["params"];
        assert_eq!(params["rate"].as_i64(), Some(100));
        assert_eq!(params["gain"].as_f64(), Some(0.5));
        assert_eq!(params["enabled"].as_bool(), Some(true));
        assert_eq!(params["name"].as_str(), Some("diff_drive"));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let source = write_temp_yaml("key: [unclosed");
        let result = rewrite_controllers(source.path(), "robot");
        assert!(matches!(result, Err(LaunchError::Yaml { .. })));
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = rewrite_controllers(Path::new("/nonexistent/controller.yml"), "robot");
        assert!(matches!(result, Err(LaunchError::IoError(_))));
    }
}
