//! Engine configuration
//!
//! Limits on the precomputation and selection validation policy. Loaded from
//! TOML; every field falls back to its default when absent.

use crate::error::{SkuErrorContext, SkuResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default ceiling on the number of dimensions
pub const DEFAULT_MAX_DIMENSIONS: usize = 12;

/// Default ceiling on the cartesian product size
pub const DEFAULT_MAX_COMBINATIONS: usize = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkuConfig {
    /// Each complete combination expands into 2^D - 2 partial keys
    pub max_dimensions: usize,

    /// Upper bound on complete combinations (product of value counts)
    pub max_combinations: usize,

    /// Reject `select` calls whose value is not part of the dimension
    pub validate_selection: bool,
}

impl Default for SkuConfig {
    fn default() -> Self {
        Self {
            max_dimensions: DEFAULT_MAX_DIMENSIONS,
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            validate_selection: true,
        }
    }
}

impl SkuConfig {
    /// Parse a TOML document
    pub fn from_toml_str(raw: &str) -> SkuResult<Self> {
        toml::from_str(raw).config_context("invalid TOML")
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> SkuResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::debug!("Loaded SKU config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkuError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SkuConfig::default();
        assert_eq!(config.max_dimensions, 12);
        assert_eq!(config.max_combinations, 65_536);
        assert!(config.validate_selection);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SkuConfig::from_toml_str("max_dimensions = 4\n").unwrap();
        assert_eq!(config.max_dimensions, 4);
        assert_eq!(config.max_combinations, DEFAULT_MAX_COMBINATIONS);
        assert!(config.validate_selection);
    }

    #[test]
    fn test_invalid_toml() {
        let result = SkuConfig::from_toml_str("max_dimensions = \"many\"");
        assert!(matches!(result, Err(SkuError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_combinations = 100").unwrap();
        writeln!(file, "validate_selection = false").unwrap();

        let config = SkuConfig::load(file.path()).unwrap();
        assert_eq!(config.max_combinations, 100);
        assert!(!config.validate_selection);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SkuConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(SkuError::Io(_))));
    }
}
