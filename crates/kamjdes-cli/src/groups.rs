//! Grouped listing commands.

use kamjdes_core::{distinct_display_values, EntityKind, EntitySource};
use kamjdes_discovery::{EntityGroups, GroupPolicy, SortStrategy};

use crate::browse::{print_entity_header, print_entity_row};
use crate::Context;

/// Print entities grouped by canonical district.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub(crate) fn run_location_groups(
    ctx: &Context,
    kind: EntityKind,
    min_count: usize,
    sort: SortStrategy,
) -> anyhow::Result<()> {
    let entities = ctx.source.list_entities(kind)?;
    let groups = ctx.discovery.group_by_location(&entities, sort);
    print_groups(&groups, min_count);
    Ok(())
}

/// Print entities grouped by cuisine.
///
/// With `hierarchy` set, every category and every distinct label becomes a
/// group whose members are matched through the category hierarchy, so
/// "Italská" also collects pizzerias. Otherwise groups are exact labels.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub(crate) fn run_cuisine_groups(
    ctx: &Context,
    kind: EntityKind,
    min_count: usize,
    sort: SortStrategy,
    hierarchy: bool,
) -> anyhow::Result<()> {
    let entities = ctx.source.list_entities(kind)?;

    let groups = if hierarchy {
        let mut labels: Vec<String> = ctx
            .tables
            .cuisine_categories
            .iter()
            .map(|c| c.name.clone())
            .collect();
        labels.extend(distinct_display_values(
            entities
                .iter()
                .filter_map(|e| e.cuisine_type.as_ref().map(|c| c.raw())),
        ));
        ctx.discovery.group_by_cuisine_labels(&entities, &labels, sort)
    } else {
        ctx.discovery.group_by_cuisine(&entities, sort)
    };

    print_groups(&groups, min_count);
    Ok(())
}

fn print_groups(groups: &EntityGroups<'_>, min_count: usize) {
    let visible = groups.visible(&GroupPolicy::min_members(min_count));
    tracing::debug!(
        total = groups.len(),
        visible = visible.len(),
        min_count,
        "groups computed"
    );

    if visible.is_empty() {
        println!("no group has at least {min_count} members");
        return;
    }

    for group in visible {
        println!("== {} ({}) ==", group.name, group.len());
        print_entity_header();
        for entity in &group.entities {
            print_entity_row(entity);
        }
        println!();
    }
}
