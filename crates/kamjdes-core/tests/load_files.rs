//! Loading the shipped tables and sample snapshot from disk.

use std::path::PathBuf;

use kamjdes_core::{
    load_tables, load_tables_or_builtin, EntityKind, EntitySource, SnapshotSource, SourceError,
};

fn repo_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(relative)
}

#[test]
fn shipped_tables_file_matches_builtin() {
    let from_file = load_tables(&repo_file("config/discovery.yaml")).unwrap();
    let builtin = load_tables_or_builtin(None).unwrap();

    assert_eq!(from_file.location_groups.len(), builtin.location_groups.len());
    assert_eq!(from_file.location_groups.len(), 14);
    assert_eq!(from_file.cuisine_categories.len(), 3);
    assert!(from_file.category("asijská").is_some());
}

#[test]
fn sample_snapshot_loads_all_collections() {
    let source = SnapshotSource::load(&repo_file("data/sample_snapshot.json")).unwrap();
    assert_eq!(source.list_entities(EntityKind::Restaurant).unwrap().len(), 10);
    assert_eq!(source.list_entities(EntityKind::Bakery).unwrap().len(), 3);
    assert_eq!(source.list_entities(EntityKind::Trending).unwrap().len(), 1);
    assert_eq!(source.len(), 14);
}

#[test]
fn sample_snapshot_keeps_optional_fields() {
    let source = SnapshotSource::load(&repo_file("data/sample_snapshot.json")).unwrap();
    let restaurants = source.list_entities(EntityKind::Restaurant).unwrap();

    let first = &restaurants[0];
    assert_eq!(first.name, "Pizzeria Karlín");
    assert_eq!(first.rating, Some(8.5));
    assert!(first.created_at.is_some());

    let neapol = restaurants.iter().find(|e| e.id == 7).unwrap();
    assert!(neapol.rating.is_none());

    let bakeries = source.list_entities(EntityKind::Bakery).unwrap();
    assert_eq!(bakeries[0].specialty.as_deref(), Some("Kváskový chléb"));
}

#[test]
fn missing_snapshot_is_io_error() {
    let err = SnapshotSource::load(&repo_file("data/missing.json")).unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
}
