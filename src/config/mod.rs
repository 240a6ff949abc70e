//! Engine options.
//!
//! Options can be built in code or read from a YAML document such as:
//!
//! ```yaml
//! min_query_chars: 3
//! normalization: singular
//! ```

use crate::model::Normalization;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables shared by the facet extractor and the filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Shortest free-text query (in characters) that narrows the results;
    /// anything shorter counts as no query at all.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default)]
    pub normalization: Normalization,
}

fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            normalization: Normalization::default(),
        }
    }
}

impl EngineOptions {
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: EngineOptions = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_yaml_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_query_chars == 0 {
            return Err(ConfigError::Invalid(
                "min_query_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.min_query_chars, 3);
        assert_eq!(options.normalization, Normalization::Exact);
    }

    #[test]
    fn test_from_yaml_str() {
        let options = EngineOptions::from_yaml_str(indoc! {"
            min_query_chars: 2
            normalization: singular
        "})
        .unwrap();
        assert_eq!(options.min_query_chars, 2);
        assert_eq!(options.normalization, Normalization::Singular);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let options = EngineOptions::from_yaml_str("normalization: singular").unwrap();
        assert_eq!(options.min_query_chars, DEFAULT_MIN_QUERY_CHARS);

        let options = EngineOptions::from_yaml_str("").unwrap();
        assert_eq!(options, EngineOptions::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = EngineOptions::from_yaml_str("normalization: stemmed");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));

        let result = EngineOptions::from_yaml_str("min_query_chars: 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("options.yaml")).unwrap();
        std::fs::write(&path, "min_query_chars: 4\n").unwrap();

        let options = EngineOptions::from_yaml_file(&path).unwrap();
        assert_eq!(options.min_query_chars, 4);

        let missing = EngineOptions::from_yaml_file(&path.with_file_name("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}
