//! Grouped listings: entities bucketed by district or cuisine, sorted inside
//! each bucket, then filtered and ordered for display by a [`GroupPolicy`].

use std::collections::HashMap;

use serde::Serialize;

use kamjdes_core::{compare_cs, Entity};

use crate::cuisine::CuisineMatcher;
use crate::filter_options::{sort_entities, SortStrategy};
use crate::location_groups::LocationGroupResolver;

#[derive(Debug, Clone, Serialize)]
pub struct EntityGroup<'a> {
    pub name: String,
    pub entities: Vec<&'a Entity>,
}

impl EntityGroup<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Groups in the order they were first seen, with lookup by name.
#[derive(Debug, Clone, Default)]
pub struct EntityGroups<'a> {
    groups: Vec<EntityGroup<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> EntityGroups<'a> {
    /// Appends `entity` to the group `name`, creating it if needed. An entity
    /// is recorded at most once per group.
    fn push(&mut self, name: &str, entity: &'a Entity) {
        if name.is_empty() {
            return;
        }
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.groups.push(EntityGroup {
                    name: name.to_string(),
                    entities: Vec::new(),
                });
                self.index.insert(name.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let members = &mut self.groups[idx].entities;
        if !members.iter().any(|m| std::ptr::eq(*m, entity)) {
            members.push(entity);
        }
    }

    fn sort_members(&mut self, strategy: SortStrategy) {
        for group in &mut self.groups {
            sort_entities(&mut group.entities, strategy);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityGroup<'a>> {
        self.index.get(name).map(|&idx| &self.groups[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityGroup<'a>> {
        self.groups.iter()
    }

    /// Groups accepted by `predicate`, ordered by name with Czech collation.
    #[must_use]
    pub fn visible_with<F>(&self, predicate: F) -> Vec<&EntityGroup<'a>>
    where
        F: Fn(&EntityGroup<'a>) -> bool,
    {
        let mut visible: Vec<&EntityGroup<'a>> =
            self.groups.iter().filter(|g| predicate(g)).collect();
        visible.sort_by(|a, b| compare_cs(&a.name, &b.name));
        visible
    }

    #[must_use]
    pub fn visible(&self, policy: &GroupPolicy) -> Vec<&EntityGroup<'a>> {
        self.visible_with(|group| policy.admits(group))
    }
}

impl<'g, 'a> IntoIterator for &'g EntityGroups<'a> {
    type Item = &'g EntityGroup<'a>;
    type IntoIter = std::slice::Iter<'g, EntityGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Minimum membership a group needs before it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPolicy {
    pub min_members: usize,
}

impl GroupPolicy {
    /// Every non-empty group.
    #[must_use]
    pub fn all() -> Self {
        Self { min_members: 1 }
    }

    #[must_use]
    pub fn min_members(min_members: usize) -> Self {
        Self { min_members }
    }

    #[must_use]
    pub fn admits(&self, group: &EntityGroup<'_>) -> bool {
        !group.is_empty() && group.len() >= self.min_members
    }
}

impl Default for GroupPolicy {
    fn default() -> Self {
        Self::all()
    }
}

/// Buckets entities by the canonical district of each location token.
///
/// An entity listed in two districts lands in both groups; two tokens that
/// resolve to the same district count once.
#[must_use]
pub fn group_by_location<'a>(
    entities: &'a [Entity],
    resolver: &LocationGroupResolver,
    sort: SortStrategy,
) -> EntityGroups<'a> {
    let mut groups = EntityGroups::default();
    for entity in entities {
        for token in entity.location_tokens() {
            groups.push(&resolver.resolve(token), entity);
        }
    }
    groups.sort_members(sort);
    groups
}

/// Buckets entities by their exact cuisine tokens.
#[must_use]
pub fn group_by_cuisine(entities: &[Entity], sort: SortStrategy) -> EntityGroups<'_> {
    let mut groups = EntityGroups::default();
    for entity in entities {
        for token in entity.cuisine_tokens() {
            groups.push(token, entity);
        }
    }
    groups.sort_members(sort);
    groups
}

/// One group per label, holding the entities whose cuisine satisfies the
/// label under the category hierarchy. Labels without members are skipped.
#[must_use]
pub fn group_by_cuisine_labels<'a, S>(
    entities: &'a [Entity],
    labels: &[S],
    matcher: &CuisineMatcher,
    sort: SortStrategy,
) -> EntityGroups<'a>
where
    S: AsRef<str>,
{
    let mut groups = EntityGroups::default();
    for label in labels {
        let label = label.as_ref().trim();
        for entity in entities.iter().filter(|e| matcher.entity_matches(e, label)) {
            groups.push(label, entity);
        }
    }
    groups.sort_members(sort);
    groups
}

#[cfg(test)]
#[path = "grouping_test.rs"]
mod tests;
