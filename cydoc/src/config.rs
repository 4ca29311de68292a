//! Site configuration types.
//!
//! Configuration is stored in an optional `docsite.toml` at the project
//! root; every field has a default so a missing file yields a fully
//! usable configuration.
//!
//! # Configuration File Format
//!
//! ```toml
//! site_url = "https://docs.cyoda.net"
//! site_title = "Cyoda Documentation"
//! section_order = ["Getting Started", "Guides"]
//!
//! [section_names]
//! getting-started = "Getting Started"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Site-wide configuration for the exporters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Public base URL of the site, without a trailing slash.
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Title used as the llms.txt heading.
    #[serde(default = "default_site_title")]
    pub site_title: String,
    /// Display names for top-level content directories.
    #[serde(default = "default_section_names")]
    pub section_names: HashMap<String, String>,
    /// Preferred section order for the llms.txt index; sections not
    /// listed here follow alphabetically.
    #[serde(default = "default_section_order")]
    pub section_order: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            site_title: default_site_title(),
            section_names: default_section_names(),
            section_order: default_section_order(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults are returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<SiteConfig> {
        if !path.exists() {
            return Ok(SiteConfig::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Display name for a top-level content directory.
    ///
    /// Falls back to capitalizing the first letter of the directory name.
    pub fn section_name(&self, dir: &str) -> String {
        if let Some(name) = self.section_names.get(dir) {
            return name.clone();
        }
        capitalize(dir)
    }
}

/// Capitalize the first character of a name.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn default_site_url() -> String {
    "https://docs.cyoda.net".to_string()
}

fn default_site_title() -> String {
    "Cyoda Documentation".to_string()
}

fn default_section_names() -> HashMap<String, String> {
    [
        ("getting-started", "Getting Started"),
        ("guides", "Guides"),
        ("concepts", "Concepts"),
        ("architecture", "Architecture"),
        ("platform", "Platform"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_section_order() -> Vec<String> {
    [
        "Getting Started",
        "Guides",
        "Concepts",
        "Architecture",
        "Platform",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_name_lookup_and_fallback() {
        let config = SiteConfig::default();
        assert_eq!(config.section_name("getting-started"), "Getting Started");
        assert_eq!(config.section_name("tutorials"), "Tutorials");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = SiteConfig::load(Path::new("/nonexistent/docsite.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SiteConfig = toml::from_str("site_url = \"https://example.test\"").unwrap();
        assert_eq!(config.site_url, "https://example.test");
        assert_eq!(config.site_title, "Cyoda Documentation");
        assert!(!config.section_order.is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("entity"), "Entity");
        assert_eq!(capitalize(""), "");
    }
}
