use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::text::normalize;
use crate::ConfigError;

/// Tables compiled into the binary, used when no override file is configured.
const BUILTIN_TABLES: &str = include_str!("../../../config/discovery.yaml");

/// A canonical district and the normalized neighborhood names that map to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationGroup {
    pub name: String,
    pub aliases: Vec<String>,
}

/// A parent cuisine category and the lowercase substrings that qualify a
/// specific cuisine label as belonging to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisineCategory {
    pub name: String,
    pub children: Vec<String>,
}

/// A one-click cuisine shortcut. `value` is the filter applied on click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickFilter {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryTables {
    pub location_groups: Vec<LocationGroup>,
    pub cuisine_categories: Vec<CuisineCategory>,
    #[serde(default)]
    pub quick_filters: Vec<QuickFilter>,
}

impl DiscoveryTables {
    /// The built-in Prague tables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        parse_tables(BUILTIN_TABLES)
    }

    /// Looks up a cuisine category by name, case-insensitively.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CuisineCategory> {
        let lower = name.trim().to_lowercase();
        self.cuisine_categories
            .iter()
            .find(|c| c.name.to_lowercase() == lower)
    }
}

/// Load and validate discovery tables from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_tables(path: &Path) -> Result<DiscoveryTables, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TablesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_tables(&content)
}

/// Load tables from `path` when given, otherwise the built-in set.
///
/// # Errors
///
/// Returns `ConfigError` if the chosen tables fail to load or validate.
pub fn load_tables_or_builtin(path: Option<&Path>) -> Result<DiscoveryTables, ConfigError> {
    match path {
        Some(path) => load_tables(path),
        None => DiscoveryTables::builtin(),
    }
}

fn parse_tables(content: &str) -> Result<DiscoveryTables, ConfigError> {
    let tables: DiscoveryTables =
        serde_yaml::from_str(content).map_err(ConfigError::TablesFileParse)?;

    validate_tables(&tables)?;

    Ok(tables)
}

fn validate_tables(tables: &DiscoveryTables) -> Result<(), ConfigError> {
    validate_location_groups(&tables.location_groups)?;
    validate_cuisine_categories(&tables.cuisine_categories)?;

    for filter in &tables.quick_filters {
        if filter.label.trim().is_empty() || filter.value.trim().is_empty() {
            return Err(ConfigError::Validation(
                "quick filter label and value must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_location_groups(groups: &[LocationGroup]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_aliases = HashSet::new();

    for group in groups {
        if group.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location group name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(group.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate location group: '{}'",
                group.name
            )));
        }

        for alias in &group.aliases {
            let normalized = normalize(alias);
            if normalized.is_empty() || normalized != *alias {
                return Err(ConfigError::Validation(format!(
                    "alias '{alias}' in group '{}' is not normalized (expected '{normalized}')",
                    group.name
                )));
            }

            if !seen_aliases.insert(normalized) {
                return Err(ConfigError::Validation(format!(
                    "alias '{alias}' appears in more than one location group"
                )));
            }
        }
    }

    Ok(())
}

fn validate_cuisine_categories(categories: &[CuisineCategory]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for category in categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cuisine category name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(category.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate cuisine category: '{}'",
                category.name
            )));
        }

        for child in &category.children {
            let well_formed = !child.trim().is_empty()
                && child.trim() == child.as_str()
                && child.to_lowercase() == *child;
            if !well_formed {
                return Err(ConfigError::Validation(format!(
                    "child '{child}' of category '{}' must be trimmed, lowercase and non-empty",
                    category.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
