//! Filter selection, cross-filter option calculation and listing order.
//!
//! Location options are recomputed from the entities that survive the cuisine
//! filter, and cuisine options from those that survive the location filter.
//! Each side ignores its own filter, so picking a value never starves the
//! other dropdown of the choice that got the user there.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Serialize;

use kamjdes_core::{compare_cs, distinct_display_values, Entity, QuickFilter};

use crate::cuisine::CuisineMatcher;
use crate::location_groups::LocationGroupResolver;

/// Active filters. `None` and blank strings both mean "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection<'s> {
    pub cuisine: Option<&'s str>,
    pub location: Option<&'s str>,
}

impl<'s> Selection<'s> {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cuisine(mut self, cuisine: &'s str) -> Self {
        self.cuisine = Some(cuisine);
        self
    }

    #[must_use]
    pub fn location(mut self, location: &'s str) -> Self {
        self.location = Some(location);
        self
    }

    fn active_cuisine(&self) -> Option<&'s str> {
        self.cuisine.filter(|c| !c.trim().is_empty())
    }

    fn active_location(&self) -> Option<&'s str> {
        self.location.filter(|l| !l.trim().is_empty())
    }
}

/// Values that can still be selected in each dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub cuisine_types: Vec<String>,
}

/// Listing order for a flat or grouped entity list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortStrategy {
    /// Highest rating first; unrated entries last.
    Rating,
    /// Cheapest first; unpriced entries last.
    Price,
    /// Alphabetical by name, Czech collation.
    #[default]
    Name,
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(SortStrategy::Rating),
            "price" => Ok(SortStrategy::Price),
            "name" => Ok(SortStrategy::Name),
            other => Err(format!("unknown sort '{other}'; expected rating, price or name")),
        }
    }
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortStrategy::Rating => write!(f, "rating"),
            SortStrategy::Price => write!(f, "price"),
            SortStrategy::Name => write!(f, "name"),
        }
    }
}

/// Whether any of the entity's location tokens equals `filter`, either
/// directly or through its canonical group. Case-insensitive.
#[must_use]
pub fn location_matches(entity: &Entity, filter: &str, resolver: &LocationGroupResolver) -> bool {
    let wanted = filter.trim().to_lowercase();
    entity.location_tokens().iter().any(|token| {
        token.to_lowercase() == wanted || resolver.resolve(token).to_lowercase() == wanted
    })
}

/// Computes the options each dropdown should offer under `selection`.
#[must_use]
pub fn compute_available_options(
    entities: &[Entity],
    selection: &Selection<'_>,
    resolver: &LocationGroupResolver,
    matcher: &CuisineMatcher,
) -> FilterOptions {
    let by_cuisine: Vec<&Entity> = match selection.active_cuisine() {
        Some(cuisine) => entities
            .iter()
            .filter(|e| matcher.entity_matches(e, cuisine))
            .collect(),
        None => entities.iter().collect(),
    };

    let by_location: Vec<&Entity> = match selection.active_location() {
        Some(location) => entities
            .iter()
            .filter(|e| location_matches(e, location, resolver))
            .collect(),
        None => entities.iter().collect(),
    };

    tracing::trace!(
        total = entities.len(),
        by_cuisine = by_cuisine.len(),
        by_location = by_location.len(),
        "computed filter option basis"
    );

    FilterOptions {
        locations: location_options(&by_cuisine),
        cuisine_types: cuisine_options(&by_location, matcher),
    }
}

fn location_options(entities: &[&Entity]) -> Vec<String> {
    distinct_display_values(entities.iter().map(|e| e.location.raw()))
}

/// Display-form cuisine labels plus every parent category that at least one
/// entity falls under.
fn cuisine_options(entities: &[&Entity], matcher: &CuisineMatcher) -> Vec<String> {
    let mut options = distinct_display_values(
        entities
            .iter()
            .filter_map(|e| e.cuisine_type.as_ref().map(|c| c.raw())),
    );
    let mut seen: HashSet<String> = options.iter().map(|o| o.to_lowercase()).collect();

    for category in matcher.category_names() {
        let has_member = entities.iter().any(|e| matcher.entity_matches(e, category));
        if has_member && seen.insert(category.to_lowercase()) {
            options.push(category.to_string());
        }
    }

    options.sort_by(|a, b| compare_cs(a, b));
    options
}

/// Entities that satisfy every active filter in `selection`, in input order.
#[must_use]
pub fn filter_entities<'a>(
    entities: &'a [Entity],
    selection: &Selection<'_>,
    resolver: &LocationGroupResolver,
    matcher: &CuisineMatcher,
) -> Vec<&'a Entity> {
    let location = selection.active_location();
    let cuisine = selection.active_cuisine();

    entities
        .iter()
        .filter(|e| location.is_none_or(|l| location_matches(e, l, resolver)))
        .filter(|e| cuisine.is_none_or(|c| matcher.entity_matches(e, c)))
        .collect()
}

/// Stable in-place sort by `strategy`.
pub fn sort_entities(entities: &mut [&Entity], strategy: SortStrategy) {
    match strategy {
        SortStrategy::Rating => entities.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortStrategy::Price => entities.sort_by(|a, b| match (a.price, b.price) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortStrategy::Name => entities.sort_by(|a, b| compare_cs(&a.name, &b.name)),
    }
}

/// Quick filters that match at least `min_count` entities, in table order.
#[must_use]
pub fn visible_quick_filters<'q>(
    entities: &[Entity],
    quick_filters: &'q [QuickFilter],
    matcher: &CuisineMatcher,
    min_count: usize,
) -> Vec<&'q QuickFilter> {
    quick_filters
        .iter()
        .filter(|filter| {
            let count = entities
                .iter()
                .filter(|e| matcher.entity_matches(e, &filter.value))
                .count();
            count >= min_count
        })
        .collect()
}

#[cfg(test)]
#[path = "filter_options_test.rs"]
mod tests;
