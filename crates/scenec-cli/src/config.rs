//! Optional `scenec.toml` configuration.

use anyhow::{Context, Result};
use scenec::CompileOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file contents. Compile options sit at the top level.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output directory, relative to the working directory
    pub out_dir: Option<PathBuf>,
    #[serde(flatten)]
    pub options: CompileOptions,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Whether the file named a component explicitly.
    pub fn has_component_name(&self) -> bool {
        self.options.component_name != CompileOptions::default().component_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenec::MarkupFlavor;

    #[test]
    fn test_parse_config() {
        let config = Config::parse(
            r#"
out_dir = "dist"
class_prefix = "pc-"
flavor = "html"
include_hidden = false
"#,
        )
        .unwrap();
        assert_eq!(config.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(config.options.class_prefix.as_deref(), Some("pc-"));
        assert_eq!(config.options.flavor, MarkupFlavor::Html);
        assert!(!config.options.include_hidden);
        assert!(!config.has_component_name());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").unwrap();
        assert!(config.out_dir.is_none());
        assert_eq!(config.options, CompileOptions::default());
    }

    #[test]
    fn test_component_name() {
        let config = Config::parse("component_name = \"PricingCard\"").unwrap();
        assert!(config.has_component_name());
    }

    #[test]
    fn test_bad_flavor_is_an_error() {
        assert!(Config::parse("flavor = \"svg\"").is_err());
    }
}
