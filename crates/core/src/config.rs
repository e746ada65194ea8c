//! Marker and base URL configuration for listing extraction.
//!
//! The defaults describe the wg-gesucht.de result list. A TOML file can
//! override any subset of them:
//!
//! ```toml
//! base_url = "https://example.org/"
//!
//! [markers]
//! listing = "offer-card"
//! currency = "EUR"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{FlatscoutError, Result};

/// Base URL relative detail links are resolved against by default.
pub const DEFAULT_BASE_URL: &str = "https://www.wg-gesucht.de/";

/// Class substrings and symbols the matcher predicates test for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Class substring of a listing block.
    pub listing: String,
    /// Class substring of a hidden or templated listing block.
    pub hidden: String,
    /// Exact class of the price and title anchors.
    pub detail_link: String,
    /// Class substring required on the title anchor's parent.
    pub headline: String,
    /// Second class substring required on the title anchor's parent.
    pub no_print: String,
    /// Symbol following the price digits.
    pub currency: String,
    /// Unit following the area digits.
    pub area_unit: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            listing: "list-details-ad-border".to_string(),
            hidden: "panel-hidden".to_string(),
            detail_link: "detailansicht".to_string(),
            headline: "headline-list-view".to_string(),
            no_print: "noprint".to_string(),
            currency: "€".to_string(),
            area_unit: "m".to_string(),
        }
    }
}

/// Configuration for listing extraction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Prefix for detail links that carry no scheme
    pub base_url: String,
    /// Markers used to recognise containers, price and title nodes
    pub markers: Markers,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), markers: Markers::default() }
    }
}

impl ExtractConfig {
    /// Creates the default configuration with a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Parses a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults. Empty markers are rejected
    /// since an empty substring would match every node.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| FlatscoutError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FlatscoutError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        let m = &self.markers;
        let named = [
            ("listing", &m.listing),
            ("hidden", &m.hidden),
            ("detail_link", &m.detail_link),
            ("headline", &m.headline),
            ("no_print", &m.no_print),
            ("currency", &m.currency),
            ("area_unit", &m.area_unit),
        ];
        for (name, value) in named {
            if value.is_empty() {
                return Err(FlatscoutError::ConfigError(format!("marker `{}` must not be empty", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.markers.currency, "€");
        assert_eq!(config.markers.detail_link, "detailansicht");
    }

    #[test]
    fn test_partial_override() {
        let config = ExtractConfig::from_toml(
            r#"
            base_url = "https://example.org/"

            [markers]
            currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://example.org/");
        assert_eq!(config.markers.currency, "EUR");
        assert_eq!(config.markers.listing, "list-details-ad-border");
    }

    #[test]
    fn test_empty_marker_rejected() {
        let result = ExtractConfig::from_toml("[markers]\nlisting = \"\"\n");
        assert!(matches!(result, Err(FlatscoutError::ConfigError(msg)) if msg.contains("listing")));
    }

    #[test]
    fn test_malformed_toml() {
        let result = ExtractConfig::from_toml("base_url = ");
        assert!(matches!(result, Err(FlatscoutError::ConfigError(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[markers]\nhidden = \"is-template\"").unwrap();

        let config = ExtractConfig::load(file.path()).unwrap();
        assert_eq!(config.markers.hidden, "is-template");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ExtractConfig::load(Path::new("/nonexistent/flatscout.toml"));
        assert!(matches!(result, Err(FlatscoutError::FileNotFound(_))));
    }
}
