//! Integration tests for compiling catalogs from disk

use std::fs;
use std::path::Path;

use convcat_entities::{CatalogCompiler, CompileOptions};
use convcat_foundation::{EnforcementPolicy, ErrorKind};
use convcat_naming::{NamingConfig, RuleChain};
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn options(policy: EnforcementPolicy) -> CompileOptions {
    CompileOptions::new(NamingConfig::new(policy))
}

fn names(catalog: &convcat_entities::EntityCatalog) -> Vec<&str> {
    catalog.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn no_paths_is_missing_source() {
    let paths: [&Path; 0] = [];
    let err = CatalogCompiler::compile_paths(options(EnforcementPolicy::Hard), &paths).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingCatalogSource));
    assert_eq!(err.to_string(), "entities parameter is not defined");
}

#[test]
fn missing_directory_yields_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = CatalogCompiler::compile_paths(
        options(EnforcementPolicy::Hard),
        &[dir.path().join("nowhere")],
    )
    .unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn files_are_compiled_in_sorted_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "zeta.csv", "z\n");
    write(dir.path(), "nested/beta.csv", "b\n");
    write(dir.path(), "alpha.csv", "a\n");

    let catalog =
        CatalogCompiler::compile_paths(options(EnforcementPolicy::Hard), &[dir.path()]).unwrap();
    assert_eq!(names(&catalog), ["alpha", "beta", "zeta"]);
}

#[test]
fn sibling_directories_sort_by_full_path_string() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "entities/zeta.csv", "z\n");
    write(dir.path(), "entities-gen/alpha.csv", "a\n");

    let catalog = CatalogCompiler::compile_paths(
        options(EnforcementPolicy::Hard),
        &[dir.path().join("entities"), dir.path().join("entities-gen")],
    )
    .unwrap();
    assert_eq!(names(&catalog), ["alpha", "zeta"]);
}

#[test]
fn system_entities_are_deduplicated_across_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/system_entities.csv", "sys-currency\nsys-number\n");
    write(dir.path(), "b/system_entities.csv", "SYS-CURRENCY # again\n\nsys-date\n");

    let catalog =
        CatalogCompiler::compile_paths(options(EnforcementPolicy::Hard), &[dir.path()]).unwrap();
    assert_eq!(names(&catalog), ["sys-currency", "sys-number", "sys-date"]);
    assert!(catalog.iter().all(|e| e.values.is_empty()));
}

#[test]
fn system_entity_names_skip_naming_rules() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "system_entities.csv", "sys-person.name\n");

    let catalog =
        CatalogCompiler::compile_paths(options(EnforcementPolicy::Hard), &[dir.path()]).unwrap();
    assert_eq!(names(&catalog), ["sys-person.name"]);
}

#[test]
fn global_fuzzy_flag_applies_to_every_entity() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "animal.csv", "dog;puppy\n");
    write(dir.path(), "system_entities.csv", "sys-number\n");

    let catalog = CatalogCompiler::compile_paths(
        options(EnforcementPolicy::Hard).with_fuzzy_match(true),
        &[dir.path()],
    )
    .unwrap();
    assert!(catalog.iter().all(|e| e.fuzzy_match));
}

#[test]
fn fuzzy_marker_applies_to_its_file_only() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "animal.csv", "__fuzzy_match__\ndog;puppy\n");
    write(dir.path(), "color.csv", "red;crimson\n");

    let catalog =
        CatalogCompiler::compile_paths(options(EnforcementPolicy::Hard), &[dir.path()]).unwrap();
    assert!(catalog.get("animal").unwrap().fuzzy_match);
    assert!(!catalog.get("color").unwrap().fuzzy_match);
    assert_eq!(catalog.get("animal").unwrap().values.len(), 1);
}

#[test]
fn file_stem_follows_naming_policy() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Pizza Size.csv", "small\n");

    let err = CatalogCompiler::compile_paths(options(EnforcementPolicy::Hard), &[dir.path()])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NamingViolation { .. }));

    let naming = NamingConfig::new(EnforcementPolicy::Soft)
        .with_entity_rules(RuleChain::from_pairs([("$special", r"\L")]).unwrap());
    let catalog =
        CatalogCompiler::compile_paths(CompileOptions::new(naming), &[dir.path()]).unwrap();
    assert_eq!(names(&catalog), ["pizza_size"]);
}

#[test]
fn patterns_filter_file_names() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "animal.csv", "dog\n");
    write(dir.path(), "notes.txt", "not a catalog\n");

    let catalog = CatalogCompiler::compile_paths(
        options(EnforcementPolicy::Hard).with_patterns(["*.csv"]),
        &[dir.path()],
    )
    .unwrap();
    assert_eq!(names(&catalog), ["animal"]);
}

#[test]
fn bad_value_line_reports_file_and_line() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "animal.csv", "dog\n;orphan\n");

    let err = CatalogCompiler::compile_paths(options(EnforcementPolicy::Hard), &[dir.path()])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidValueLine { .. }));
    let context = err.context.unwrap();
    assert_eq!(context.line, Some(2));
    assert!(context.source.unwrap().ends_with("animal.csv"));
}
