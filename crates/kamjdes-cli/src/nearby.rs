use std::time::Duration;

use kamjdes_core::{Coordinates, EntityKind, EntitySource};
use kamjdes_discovery::{can_widen, format_distance, locate, next_radius, FixedCoordinateSource};

use crate::browse::truncate;
use crate::Context;

/// Print branches within `radius_km` of the given coordinate, nearest first.
///
/// The coordinate goes through the same acquisition path a device location
/// would, including the configured timeout.
///
/// # Errors
///
/// Returns an error if the coordinate is invalid, the radius is not positive,
/// or the snapshot cannot be read.
pub(crate) async fn run_nearby(
    ctx: &Context,
    lat: f64,
    lng: f64,
    radius_km: f64,
    kind: EntityKind,
) -> anyhow::Result<()> {
    let source = FixedCoordinateSource::new(Coordinates::new(lat, lng));
    let timeout = Duration::from_secs(ctx.config.geolocation_timeout_secs);
    let user = locate(&source, timeout).await?;

    let entities = ctx.source.list_entities(kind)?;
    let found = ctx.discovery.nearby(&entities, user, radius_km)?;

    if found.is_empty() {
        println!("no {kind} entries within {radius_km} km");
        if can_widen(radius_km) {
            println!("try --radius {}", next_radius(radius_km));
        }
        return Ok(());
    }

    println!("{:<10}{:<32}{:<24}ADDRESS", "DISTANCE", "NAME", "BRANCH");
    for hit in &found {
        let address = hit.entity.address_for(hit.branch).unwrap_or("-");
        println!(
            "{:<10}{:<32}{:<24}{}",
            format_distance(hit.distance_km),
            truncate(&hit.entity.name, 30),
            truncate(hit.branch, 22),
            address
        );
    }
    println!();
    println!("{} branches within {radius_km} km", found.len());
    Ok(())
}
