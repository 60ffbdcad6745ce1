//! Read-only access to the entity collections.
//!
//! [`EntitySource`] is the boundary to whatever owns the records; the
//! discovery engine only ever sees the `Vec<Entity>` it returns.
//! [`SnapshotSource`] serves a JSON export of the data layer.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::entities::{Entity, EntityKind};
use crate::multi_value::split_normalized_display;
use crate::text::compare_cs;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read side of the data layer.
pub trait EntitySource {
    /// All entities of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the backing store cannot be read.
    fn list_entities(&self, kind: EntityKind) -> Result<Vec<Entity>, SourceError>;

    /// Distinct restaurant locations in display form, Czech-collated.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the backing store cannot be read.
    fn list_distinct_locations(&self) -> Result<Vec<String>, SourceError> {
        let restaurants = self.list_entities(EntityKind::Restaurant)?;
        Ok(distinct_display_values(
            restaurants.iter().map(|e| e.location.raw()),
        ))
    }

    /// Distinct restaurant cuisine labels in display form, Czech-collated.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the backing store cannot be read.
    fn list_distinct_cuisine_types(&self) -> Result<Vec<String>, SourceError> {
        let restaurants = self.list_entities(EntityKind::Restaurant)?;
        Ok(distinct_display_values(
            restaurants
                .iter()
                .filter_map(|e| e.cuisine_type.as_ref().map(|c| c.raw())),
        ))
    }
}

/// Splits each field into display tokens, deduplicates case-insensitively
/// (first spelling wins) and sorts with Czech collation.
#[must_use]
pub fn distinct_display_values<'a, I>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut values = Vec::new();

    for field in fields {
        for token in split_normalized_display(field) {
            if seen.insert(token.to_lowercase()) {
                values.push(token);
            }
        }
    }

    values.sort_by(|a, b| compare_cs(a, b));
    values
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    restaurants: Vec<Entity>,
    #[serde(default)]
    bakeries: Vec<Entity>,
    #[serde(default)]
    trendings: Vec<Entity>,
}

/// An in-memory snapshot of all three collections.
#[derive(Debug, Default)]
pub struct SnapshotSource {
    restaurants: Vec<Entity>,
    bakeries: Vec<Entity>,
    trendings: Vec<Entity>,
}

impl SnapshotSource {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from a JSON document.
    ///
    /// Each record's `kind` is set from the collection it was listed under.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` if the document is malformed.
    pub fn from_json(content: &str) -> Result<Self, SourceError> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        Ok(Self {
            restaurants: with_kind(file.restaurants, EntityKind::Restaurant),
            bakeries: with_kind(file.bakeries, EntityKind::Bakery),
            trendings: with_kind(file.trendings, EntityKind::Trending),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.restaurants.len() + self.bakeries.len() + self.trendings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn with_kind(mut entities: Vec<Entity>, kind: EntityKind) -> Vec<Entity> {
    for entity in &mut entities {
        entity.kind = kind;
    }
    entities
}

impl EntitySource for SnapshotSource {
    fn list_entities(&self, kind: EntityKind) -> Result<Vec<Entity>, SourceError> {
        let entities = match kind {
            EntityKind::Restaurant => &self.restaurants,
            EntityKind::Bakery => &self.bakeries,
            EntityKind::Trending => &self.trendings,
        };
        Ok(entities.clone())
    }
}
