//! Maps raw neighborhood strings onto canonical Prague district groups.

use std::collections::HashMap;

use kamjdes_core::{normalize, title_case, LocationGroup};

/// Alias lookup built once from the location group table.
#[derive(Debug, Clone)]
pub struct LocationGroupResolver {
    groups: Vec<String>,
    alias_index: HashMap<String, usize>,
}

impl LocationGroupResolver {
    #[must_use]
    pub fn new(groups: &[LocationGroup]) -> Self {
        let mut alias_index = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for alias in &group.aliases {
                // Earlier groups win when an alias is listed twice.
                alias_index.entry(normalize(alias)).or_insert(idx);
            }
        }

        Self {
            groups: groups.iter().map(|g| g.name.clone()).collect(),
            alias_index,
        }
    }

    /// Canonical group name for `raw`.
    ///
    /// Matching is case- and diacritic-insensitive. Unknown neighborhoods are
    /// kept as their own group in [`title_case`] form; empty input yields an
    /// empty string.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> String {
        let key = normalize(raw);
        match self.alias_index.get(&key) {
            Some(&idx) => self.groups[idx].clone(),
            None => title_case(raw),
        }
    }

    /// Whether `raw` maps onto one of the configured groups.
    #[must_use]
    pub fn is_known(&self, raw: &str) -> bool {
        self.alias_index.contains_key(&normalize(raw))
    }

    /// Configured group names in table order.
    #[must_use]
    pub fn group_names(&self) -> &[String] {
        &self.groups
    }
}
