//! Integration tests for the CLI commands

use std::fs;
use std::path::{Path, PathBuf};

use convcat_foundation::{EnforcementPolicy, ErrorKind};
use convcat_runtime::{RunConfig, entities_to_csv, run_entities};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn config_for(dir: &Path) -> RunConfig {
    RunConfig {
        entities: Some(vec![dir.join("entities")]),
        ..RunConfig::default()
    }
}

#[test]
fn entities_go_to_stdout_without_output_file() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("entities/animal.csv"), "dog;puppy\n");

    let mut stdout = Vec::new();
    let catalog = run_entities(&config_for(dir.path()), &mut stdout).unwrap();
    assert_eq!(catalog.len(), 1);

    let text = String::from_utf8(stdout).unwrap();
    assert!(text.ends_with("]\n"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["entity"], "animal");
    assert_eq!(value[0]["values"][0]["synonyms"][0], "puppy");
}

#[test]
fn entities_go_to_output_file_when_configured() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("entities/animal.csv"), "dog\n");
    write(&dir.path().join("generated/color.csv"), "red\n");

    let config = RunConfig {
        generated_entities: vec![dir.path().join("generated")],
        outputs_directory: Some(dir.path().join("outputs")),
        outputs_entities: Some("entities.json".into()),
        ..config_for(dir.path())
    };

    let mut stdout = Vec::new();
    run_entities(&config, &mut stdout).unwrap();
    assert!(stdout.is_empty());

    let text = fs::read_to_string(dir.path().join("outputs/entities.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn unconfigured_entities_is_an_error() {
    let mut stdout = Vec::new();
    let err = run_entities(&RunConfig::default(), &mut stdout).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingCatalogSource));
}

#[test]
fn config_files_are_merged_in_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("base.toml");
    let second = dir.path().join("local.toml");
    write(
        &first,
        "[common]\nentities = [\"data\"]\nname_policy = \"hard\"\n\n[entities]\nfuzzy = true\n",
    );
    write(&second, "[common]\nname_policy = \"soft\"\n");

    let config = RunConfig::load(&[first, second]).unwrap();
    assert_eq!(config.entities, Some(vec![PathBuf::from("data")]));
    assert_eq!(config.policy().unwrap(), EnforcementPolicy::Soft);
    assert!(config.fuzzy_match);
}

#[test]
fn unreadable_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    write(&path, "[common\n");

    let err = RunConfig::load(&[path]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConfigError(_)));
}

#[test]
fn entities_json_converts_back_to_catalog_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("entities.json");
    write(
        &input,
        r#"[
            { "entity": "animal", "values": [{ "value": "dog", "synonyms": ["puppy"] }], "fuzzy_match": true },
            { "entity": "sys-number", "values": [] }
        ]"#,
    );

    let out = dir.path().join("csv");
    let written = entities_to_csv(&input, &out).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(
        fs::read_to_string(out.join("animal.csv")).unwrap(),
        "__fuzzy_match__\ndog;puppy\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("system_entities.csv")).unwrap(),
        "sys-number\n"
    );
}

#[test]
fn values_with_catalog_syntax_are_not_converted() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("entities.json");
    write(
        &input,
        r#"[{ "entity": "language", "values": [{ "value": "C#", "synonyms": ["csharp"] }] }]"#,
    );

    let out = dir.path().join("csv");
    let err = entities_to_csv(&input, &out).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnrepresentableValue { .. }));
    assert!(!out.exists());
}
