// Registry of units loaded from a catalog file

use crate::catalog::config::*;
use crate::units::quantity::Unit;
use std::collections::HashMap;
use std::path::Path;

pub struct UnitCatalog {
    units: Vec<Unit>,
    definitions: Vec<UnitDefinition>,
    by_name: HashMap<String, usize>,
    by_symbol: HashMap<String, usize>,
}

impl UnitCatalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let catalog = Self::from_config(CatalogConfig::load_from_file(path)?)?;
        log::info!(
            "Loaded {} units from {}",
            catalog.units.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_config(CatalogConfig::from_toml_str(content)?)
    }

    /// Compile every unit's format and index names and symbols.
    /// Fails on the first invalid or duplicate definition.
    pub fn from_config(config: CatalogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut units = Vec::with_capacity(config.units.len());
        let mut definitions = Vec::with_capacity(config.units.len());
        let mut by_name = HashMap::new();
        let mut by_symbol = HashMap::new();

        for definition in config.units {
            let name = definition.name.trim();
            if name.is_empty() {
                return Err("Unit definition with an empty name".into());
            }

            let format = definition
                .format
                .clone()
                .unwrap_or_else(|| config.defaults.format.clone());
            let symbols: Vec<&str> = definition.symbols.iter().map(String::as_str).collect();
            let mut unit = Unit::new(name, &symbols, &format)
                .map_err(|e| {
                    format!("Unit '{}' has an invalid format {:?}: {}", name, format, e)
                })?;
            if let Some(dimension) = &definition.dimension {
                unit = unit.with_dimension(dimension);
            }

            let index = units.len();
            if by_name.insert(name.to_string(), index).is_some() {
                return Err(format!("Duplicate unit name '{}'", name).into());
            }
            for symbol in &definition.symbols {
                if by_symbol.insert(symbol.clone(), index).is_some() {
                    let owner = units
                        .iter()
                        .find(|u: &&Unit| u.has_symbol(symbol))
                        .map(Unit::name)
                        .unwrap_or(name);
                    return Err(format!(
                        "Symbol '{}' of unit '{}' is already used by '{}'",
                        symbol, name, owner
                    )
                    .into());
                }
            }

            units.push(unit);
            definitions.push(UnitDefinition {
                name: name.to_string(),
                format: Some(format),
                ..definition
            });
        }

        Ok(Self {
            units,
            definitions,
            by_name,
            by_symbol,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.by_name.get(name).map(|&i| &self.units[i])
    }

    pub fn find_by_symbol(&self, symbol: &str) -> Option<&Unit> {
        self.by_symbol.get(symbol).map(|&i| &self.units[i])
    }

    /// Look up by name first, then by symbol
    pub fn resolve(&self, key: &str) -> Option<&Unit> {
        self.get(key).or_else(|| self.find_by_symbol(key))
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Definitions as loaded, with the effective format filled in
    pub fn definitions(&self) -> &[UnitDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
