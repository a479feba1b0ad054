//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use evgen_core::SourceModel;

/// Reads a structural model serialized as JSON.
pub fn load_model(path: &Path) -> Result<SourceModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model file {}", path.display()))?;
    let model: SourceModel = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse model file {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        interfaces = model.interfaces.len(),
        "loaded structural model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_minimal_model() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("model.json");
        std::fs::write(
            &path,
            r#"{ "interfaces": [{ "qualified_name": "a.Event", "methods": [] }] }"#,
        )
        .unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.interfaces.len(), 1);
    }

    #[test]
    fn test_reports_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = load_model(&temp.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read model file"));
    }

    #[test]
    fn test_reports_malformed_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("model.json");
        std::fs::write(&path, r#"{ "interfaces": [{ "qualified_name": "" }] }"#).unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse model file"));
    }
}
