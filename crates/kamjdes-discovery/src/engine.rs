use kamjdes_core::{Coordinates, DiscoveryTables, Entity, QuickFilter};

use crate::cuisine::CuisineMatcher;
use crate::error::DiscoveryError;
use crate::filter_options::{
    compute_available_options, filter_entities, sort_entities, visible_quick_filters,
    FilterOptions, Selection, SortStrategy,
};
use crate::grouping::{group_by_cuisine, group_by_cuisine_labels, group_by_location, EntityGroups};
use crate::location_groups::LocationGroupResolver;
use crate::proximity::{find_nearby, NearbyMatch};

/// The discovery engine for one set of tables.
///
/// Build it once at startup; every operation is a pure function of its
/// arguments and the tables captured here.
#[derive(Debug, Clone)]
pub struct Discovery {
    resolver: LocationGroupResolver,
    matcher: CuisineMatcher,
    quick_filters: Vec<QuickFilter>,
}

impl Discovery {
    #[must_use]
    pub fn new(tables: &DiscoveryTables) -> Self {
        tracing::debug!(
            location_groups = tables.location_groups.len(),
            cuisine_categories = tables.cuisine_categories.len(),
            quick_filters = tables.quick_filters.len(),
            "discovery engine ready"
        );
        Self {
            resolver: LocationGroupResolver::new(&tables.location_groups),
            matcher: CuisineMatcher::new(&tables.cuisine_categories),
            quick_filters: tables.quick_filters.clone(),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &LocationGroupResolver {
        &self.resolver
    }

    #[must_use]
    pub fn matcher(&self) -> &CuisineMatcher {
        &self.matcher
    }

    #[must_use]
    pub fn resolve_location(&self, raw: &str) -> String {
        self.resolver.resolve(raw)
    }

    #[must_use]
    pub fn cuisine_matches(&self, label: &str, filter: &str) -> bool {
        self.matcher.matches(label, filter)
    }

    #[must_use]
    pub fn available_options(&self, entities: &[Entity], selection: &Selection<'_>) -> FilterOptions {
        compute_available_options(entities, selection, &self.resolver, &self.matcher)
    }

    /// Entities passing `selection`, ordered by `sort`.
    #[must_use]
    pub fn list<'a>(
        &self,
        entities: &'a [Entity],
        selection: &Selection<'_>,
        sort: SortStrategy,
    ) -> Vec<&'a Entity> {
        let mut hits = filter_entities(entities, selection, &self.resolver, &self.matcher);
        sort_entities(&mut hits, sort);
        hits
    }

    #[must_use]
    pub fn group_by_location<'a>(&self, entities: &'a [Entity], sort: SortStrategy) -> EntityGroups<'a> {
        group_by_location(entities, &self.resolver, sort)
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn group_by_cuisine<'a>(&self, entities: &'a [Entity], sort: SortStrategy) -> EntityGroups<'a> {
        group_by_cuisine(entities, sort)
    }

    /// Groups by each label under the category hierarchy.
    #[must_use]
    pub fn group_by_cuisine_labels<'a, S: AsRef<str>>(
        &self,
        entities: &'a [Entity],
        labels: &[S],
        sort: SortStrategy,
    ) -> EntityGroups<'a> {
        group_by_cuisine_labels(entities, labels, &self.matcher, sort)
    }

    /// # Errors
    ///
    /// See [`find_nearby`].
    #[allow(clippy::unused_self)]
    pub fn nearby<'a>(
        &self,
        entities: &'a [Entity],
        user: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<NearbyMatch<'a>>, DiscoveryError> {
        find_nearby(entities, user, radius_km)
    }

    #[must_use]
    pub fn quick_filters(&self, entities: &[Entity], min_count: usize) -> Vec<&QuickFilter> {
        visible_quick_filters(entities, &self.quick_filters, &self.matcher, min_count)
    }
}
