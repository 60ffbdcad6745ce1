//! Filter, listing, quick-filter and tables commands.

use kamjdes_core::{DiscoveryTables, Entity, EntityKind, EntitySource};
use kamjdes_discovery::{Selection, SortStrategy};

use crate::Context;

fn selection<'s>(cuisine: Option<&'s str>, location: Option<&'s str>) -> Selection<'s> {
    Selection { cuisine, location }
}

/// Print the still-selectable filter values as JSON.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or serialization fails.
pub(crate) fn run_options(
    ctx: &Context,
    kind: EntityKind,
    cuisine: Option<&str>,
    location: Option<&str>,
) -> anyhow::Result<()> {
    let entities = ctx.source.list_entities(kind)?;
    let options = ctx
        .discovery
        .available_options(&entities, &selection(cuisine, location));
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

/// Print entities matching the filters in `sort` order.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub(crate) fn run_list(
    ctx: &Context,
    kind: EntityKind,
    cuisine: Option<&str>,
    location: Option<&str>,
    sort: SortStrategy,
) -> anyhow::Result<()> {
    let entities = ctx.source.list_entities(kind)?;
    let listed = ctx
        .discovery
        .list(&entities, &selection(cuisine, location), sort);

    if listed.is_empty() {
        println!("no {kind} entries match the current filters");
        return Ok(());
    }

    print_entity_header();
    for entity in &listed {
        print_entity_row(entity);
    }
    println!();
    println!("{} of {} {kind} entries", listed.len(), entities.len());
    Ok(())
}

/// Print quick filters that match at least `min_count` restaurants.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub(crate) fn run_quick_filters(ctx: &Context, min_count: usize) -> anyhow::Result<()> {
    let restaurants = ctx.source.list_entities(EntityKind::Restaurant)?;
    let visible = ctx.discovery.quick_filters(&restaurants, min_count);

    if visible.is_empty() {
        println!("no quick filter has at least {min_count} matches");
        return Ok(());
    }

    for filter in visible {
        println!("{:<16}{}", filter.label, filter.value);
    }
    Ok(())
}

pub(crate) fn print_tables(tables: &DiscoveryTables) {
    println!("Location groups ({}):", tables.location_groups.len());
    for group in &tables.location_groups {
        println!("  {:<26}{}", group.name, group.aliases.join(", "));
    }
    println!();
    println!("Cuisine categories ({}):", tables.cuisine_categories.len());
    for category in &tables.cuisine_categories {
        println!("  {:<26}{}", category.name, category.children.join(", "));
    }
    println!();
    println!("Quick filters ({}):", tables.quick_filters.len());
    for filter in &tables.quick_filters {
        println!("  {:<26}{}", filter.label, filter.value);
    }
}

pub(crate) fn print_entity_header() {
    println!(
        "{:<6}{:<32}{:<28}{:<24}{:>8}{:>8}",
        "ID", "NAME", "LOCATION", "CUISINE", "RATING", "PRICE"
    );
}

pub(crate) fn print_entity_row(entity: &Entity) {
    let cuisine = entity
        .cuisine_type
        .as_ref()
        .map(|c| c.raw().to_string())
        .or_else(|| entity.specialty.clone())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<6}{:<32}{:<28}{:<24}{:>8}{:>8}",
        entity.id,
        truncate(&entity.name, 30),
        truncate(entity.location.raw(), 26),
        truncate(&cuisine, 22),
        fmt_number(entity.rating),
        fmt_number(entity.price),
    );
}

/// Format an optional number for display, returning `"-"` when `None`.
pub(crate) fn fmt_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars.saturating_sub(3)).collect::<String>())
    } else {
        text.to_string()
    }
}
