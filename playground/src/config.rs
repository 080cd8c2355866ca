//! Playground configuration.
//!
//! Settings are stored in `.playground.toml` next to where the playground is
//! started. Every field has a default, so a partial file (or no file at all)
//! is fine.
//!
//! # Configuration File Format
//!
//! ```toml
//! color = true
//! show_keys = false
//! initial_example = "dashboard-layout"
//! form_title = "Form preview"
//! component_title = "Component preview"
//! ```

use std::path::Path;

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uischema::PanelTitles;

/// Default config file name.
pub const CONFIG_FILE: &str = ".playground.toml";

/// Root playground configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Colorize terminal output.
    pub color: bool,
    /// Print sibling keys next to each widget in the tree view.
    pub show_keys: bool,
    /// Catalog example loaded at startup. Empty selects the first example.
    pub initial_example: String,
    /// Title of the form panel.
    pub form_title: String,
    /// Title of the component panel.
    pub component_title: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        let titles = PanelTitles::default();
        Self {
            color: true,
            show_keys: false,
            initial_example: String::new(),
            form_title: titles.form,
            component_title: titles.component,
        }
    }
}

impl PlaygroundConfig {
    /// Load the config at `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Write the config to `path` as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("config saved to {}", path.display());
        Ok(())
    }

    /// JSON Schema of the config, as a form schema document.
    pub fn schema() -> anyhow::Result<Value> {
        let schema = schemars::schema_for!(PlaygroundConfig);
        Ok(serde_json::to_value(&schema)?)
    }

    pub fn titles(&self) -> PanelTitles {
        PanelTitles {
            form: self.form_title.clone(),
            component: self.component_title.clone(),
        }
    }

    /// The configured startup example, if one is set.
    pub fn initial_example(&self) -> Option<&str> {
        Some(self.initial_example.as_str()).filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uischema::data::is_form_schema;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlaygroundConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, PlaygroundConfig::default());
        assert_eq!(config.initial_example(), None);
    }

    #[test]
    fn test_partial_file_and_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "show_keys = true\ninitial_example = \"data-table\"\n").unwrap();

        let mut config = PlaygroundConfig::load(&path).unwrap();
        assert!(config.show_keys);
        assert!(config.color, "unset fields keep their defaults");
        assert_eq!(config.initial_example(), Some("data-table"));

        config.form_title = "Forms".into();
        config.save(&path).unwrap();
        assert_eq!(PlaygroundConfig::load(&path).unwrap(), config);
        assert_eq!(config.titles().form, "Forms");
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "color = \"maybe\"").unwrap();
        let err = PlaygroundConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_schema_is_a_form() {
        let schema = PlaygroundConfig::schema().unwrap();
        assert!(is_form_schema(&schema));
        assert_eq!(schema["properties"]["color"]["type"], "boolean");
    }
}
