//! Configuration loading and management.

use std::path::{Path, PathBuf};

use evgen_core::AnalysisConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Qualified name of the annotation carrying explicit field lists.
    /// Empty disables explicit fields.
    #[serde(default)]
    pub override_annotation: String,

    /// Regexes an interface's source file must match to be analysed.
    /// Empty means every interface is a candidate.
    #[serde(default)]
    pub include: Vec<String>,

    /// Regexes that exclude an interface even when it is included.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Infer interfaces in parallel.
    #[serde(default)]
    pub parallel: bool,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // EVGEN_OVERRIDE_ANNOTATION, EVGEN_PARALLEL, ...
        figment = figment.merge(Env::prefixed("EVGEN_"));

        figment.extract()
    }

    /// The core analysis settings this configuration describes.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::default()
            .with_override_annotation(self.override_annotation.clone())
            .with_parallel(self.parallel)
    }
}

/// Returns the platform-specific config directory for evgen.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("evgen"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_disables_overrides() {
        let config = Config::default();
        assert!(config.override_annotation.is_empty());
        assert_eq!(config.analysis_config().override_annotation, None);
        assert!(!config.analysis_config().parallel);
    }

    #[test]
    fn test_load_from_file_merges_over_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("evgen.toml");
        std::fs::write(
            &path,
            r#"
override_annotation = "org.example.ImplementedFields"
include = ["src/main/java/org/example/event/"]
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();

        assert_eq!(config.override_annotation, "org.example.ImplementedFields");
        assert_eq!(config.include, vec!["src/main/java/org/example/event/"]);
        assert!(config.exclude.is_empty());
        assert_eq!(
            config.analysis_config().override_annotation.as_deref(),
            Some("org.example.ImplementedFields")
        );
    }

    #[test]
    fn test_dirs_config_path_ends_with_evgen() {
        if let Some(path) = dirs_config_path() {
            assert_eq!(path.file_name().unwrap(), "evgen");
        }
    }
}
