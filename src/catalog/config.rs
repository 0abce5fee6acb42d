use crate::units::quantity::DEFAULT_FORMAT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    // Catalog-wide settings
    #[serde(default)]
    pub defaults: CatalogDefaults,

    // Unit definitions in declaration order
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogDefaults {
    // Format for units that do not declare one
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UnitDefinition {
    pub name: String,

    #[serde(default)]
    pub symbols: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl CatalogConfig {
    pub fn load_from_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: CatalogConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self {
            defaults: CatalogDefaults::default(),
            units: Vec::new(),
        }
    }
}
