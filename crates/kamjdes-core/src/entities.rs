use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::multi_value::MultiValueField;

/// Which listing an [`Entity`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Restaurant,
    Bakery,
    Trending,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Restaurant => write!(f, "restaurant"),
            EntityKind::Bakery => write!(f, "bakery"),
            EntityKind::Trending => write!(f, "trending"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "restaurant" | "restaurants" => Ok(EntityKind::Restaurant),
            "bakery" | "bakeries" => Ok(EntityKind::Bakery),
            "trending" | "trendings" => Ok(EntityKind::Trending),
            other => Err(format!("unknown entity kind '{other}'")),
        }
    }
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A restaurant, bakery or trending record as served by the data layer.
///
/// `addresses` and `coordinates` are keyed by branch name, which is expected
/// to be one of the `location` tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    #[serde(default)]
    pub kind: EntityKind,
    pub name: String,
    pub location: MultiValueField,
    /// Restaurants only.
    #[serde(default)]
    pub cuisine_type: Option<MultiValueField>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub addresses: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub coordinates: Option<BTreeMap<String, Coordinates>>,
    /// Typical spend per person in CZK.
    #[serde(default)]
    pub price: Option<f64>,
    /// Editorial rating, conventionally 1–10.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity {
    /// Location tokens in source order.
    #[must_use]
    pub fn location_tokens(&self) -> &[String] {
        self.location.tokens()
    }

    /// Cuisine tokens in source order; empty for entities without a cuisine.
    #[must_use]
    pub fn cuisine_tokens(&self) -> &[String] {
        match &self.cuisine_type {
            Some(field) => field.tokens(),
            None => &[],
        }
    }

    /// Street address of the branch at `location`.
    ///
    /// Tries the exact key first, then falls back to a case-insensitive key
    /// match, since imported keys do not always share the token's casing.
    #[must_use]
    pub fn address_for(&self, location: &str) -> Option<&str> {
        let addresses = self.addresses.as_ref()?;
        if let Some(address) = addresses.get(location) {
            return Some(address.as_str());
        }
        let lower = location.to_lowercase();
        addresses
            .iter()
            .find(|(key, _)| key.to_lowercase() == lower)
            .map(|(_, address)| address.as_str())
    }

    /// Geocoded point of the branch at `location`, exact key match only.
    #[must_use]
    pub fn coordinate_for(&self, location: &str) -> Option<Coordinates> {
        self.coordinates.as_ref()?.get(location).copied()
    }
}
