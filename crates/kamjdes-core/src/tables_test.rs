use std::path::Path;

use super::*;

fn group(name: &str, aliases: &[&str]) -> LocationGroup {
    LocationGroup {
        name: name.to_string(),
        aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
    }
}

fn category(name: &str, children: &[&str]) -> CuisineCategory {
    CuisineCategory {
        name: name.to_string(),
        children: children.iter().map(|c| (*c).to_string()).collect(),
    }
}

fn tables(groups: Vec<LocationGroup>, categories: Vec<CuisineCategory>) -> DiscoveryTables {
    DiscoveryTables {
        location_groups: groups,
        cuisine_categories: categories,
        quick_filters: vec![],
    }
}

#[test]
fn builtin_tables_load_and_validate() {
    let tables = DiscoveryTables::builtin().expect("builtin tables must validate");
    assert!(!tables.location_groups.is_empty());
    assert!(!tables.cuisine_categories.is_empty());
    assert!(!tables.quick_filters.is_empty());
}

#[test]
fn builtin_tables_keep_file_order() {
    let tables = DiscoveryTables::builtin().unwrap();
    assert_eq!(tables.location_groups[0].name, "Centrum");
    assert!(tables
        .location_groups
        .iter()
        .any(|g| g.name == "Smíchov & Anděl" && g.aliases.contains(&"andel".to_string())));
}

#[test]
fn category_lookup_is_case_insensitive() {
    let tables = DiscoveryTables::builtin().unwrap();
    let italian = tables.category("italská").expect("Italská category");
    assert!(italian.children.contains(&"pizza".to_string()));
    assert!(tables.category("Pizza").is_none());
}

#[test]
fn validate_rejects_empty_group_name() {
    let t = tables(vec![group("  ", &["andel"])], vec![]);
    let err = validate_tables(&t).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_duplicate_group_name() {
    let t = tables(
        vec![group("Žižkov", &["zizkov"]), group("žižkov", &["flora"])],
        vec![],
    );
    let err = validate_tables(&t).unwrap_err();
    assert!(err.to_string().contains("duplicate location group"));
}

#[test]
fn validate_rejects_unnormalized_alias() {
    let t = tables(vec![group("Smíchov & Anděl", &["Anděl"])], vec![]);
    let err = validate_tables(&t).unwrap_err();
    assert!(err.to_string().contains("not normalized"));
}

#[test]
fn validate_rejects_alias_in_two_groups() {
    let t = tables(
        vec![group("Centrum", &["florenc"]), group("Karlín", &["florenc"])],
        vec![],
    );
    let err = validate_tables(&t).unwrap_err();
    assert!(err.to_string().contains("more than one location group"));
}

#[test]
fn validate_rejects_uppercase_child() {
    let t = tables(vec![], vec![category("Italská", &["Pizza"])]);
    let err = validate_tables(&t).unwrap_err();
    assert!(err.to_string().contains("lowercase"));
}

#[test]
fn validate_rejects_duplicate_category() {
    let t = tables(
        vec![],
        vec![category("Asijská", &["thajská"]), category("ASIJSKÁ", &["sushi"])],
    );
    let err = validate_tables(&t).unwrap_err();
    assert!(err.to_string().contains("duplicate cuisine category"));
}

#[test]
fn validate_rejects_blank_quick_filter() {
    let mut t = tables(vec![], vec![]);
    t.quick_filters.push(QuickFilter {
        label: "Pizza".to_string(),
        value: " ".to_string(),
    });
    assert!(validate_tables(&t).is_err());
}

#[test]
fn parse_tables_reports_yaml_errors() {
    let err = parse_tables("location_groups: [").unwrap_err();
    assert!(matches!(err, ConfigError::TablesFileParse(_)));
}

#[test]
fn load_tables_missing_file_is_io_error() {
    let err = load_tables(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::TablesFileIo { .. }));
}

#[test]
fn load_tables_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("discovery.yaml");
    assert!(
        path.exists(),
        "discovery.yaml missing at {path:?}, required for this test"
    );
    let result = load_tables(&path);
    assert!(result.is_ok(), "failed to load discovery.yaml: {result:?}");
}

#[test]
fn load_tables_or_builtin_without_path_uses_builtin() {
    let tables = load_tables_or_builtin(None).unwrap();
    assert_eq!(
        tables.location_groups.len(),
        DiscoveryTables::builtin().unwrap().location_groups.len()
    );
}
