//! Operations behind the CLI commands.

use std::io::Write;
use std::path::{Path, PathBuf};

use convcat_entities::{CatalogCompiler, EntityCatalog, decompile, json};
use convcat_foundation::{CanonicalName, EnforcementPolicy, Error, NameKind, Result};
use convcat_naming::{NamingConfig, normalize_code};
use tracing::info;

use crate::config::RunConfig;

/// Compiles the entity catalogs named by `config`.
///
/// # Errors
///
/// Returns `MissingCatalogSource` if no entity paths are configured, and any
/// configuration, naming, or catalog error.
pub fn compile_entities(config: &RunConfig) -> Result<EntityCatalog> {
    let paths = config.catalog_paths()?;
    let options = config.compile_options()?;
    info!(
        "Fuzzy matching turned {}",
        if options.fuzzy_match { "ON" } else { "OFF" }
    );
    CatalogCompiler::compile_paths(options, &paths)
}

/// Compiles the entity catalogs and writes the JSON.
///
/// The JSON goes to [`RunConfig::output_path`] if set, otherwise to `stdout`.
///
/// # Errors
///
/// See [`compile_entities`]; also returns `IoError` if the output cannot be
/// written.
pub fn run_entities<W: Write>(config: &RunConfig, stdout: &mut W) -> Result<EntityCatalog> {
    let catalog = compile_entities(config)?;

    match config.output_path() {
        Some(path) => {
            json::save_to_file(&catalog, &path)?;
            info!(
                "Entities json '{}' was successfully created",
                path.display()
            );
        }
        None => {
            let mut bytes = json::to_bytes(&catalog)?;
            bytes.push(b'\n');
            stdout
                .write_all(&bytes)
                .map_err(|e| Error::io(format!("failed to write entities json: {e}")))?;
            info!("Entities json was successfully created");
        }
    }
    Ok(catalog)
}

/// Converts an entities JSON file back into catalog files in `output_dir`.
///
/// Returns the paths written.
///
/// # Errors
///
/// Returns an error if the JSON cannot be read, holds a value that catalog
/// syntax cannot express, or a file cannot be written. Nothing is written in
/// the second case.
pub fn entities_to_csv(input: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let catalog = json::load_from_file(input)?;
    let files = decompile::decompile(&catalog)?;
    let written = decompile::write_files(&files, output_dir)?;
    info!(
        entities = catalog.len(),
        files = written.len(),
        "catalog files written to '{}'",
        output_dir.display()
    );
    Ok(written)
}

/// Normalizes names of one kind.
///
/// Entity names and codes are normalized one by one. Intent names are
/// treated as the subnames of a single intent and yield one result.
///
/// # Errors
///
/// Returns the first naming error.
pub fn normalize_names(
    naming: &NamingConfig,
    kind: NameKind,
    names: &[String],
) -> Result<Vec<CanonicalName>> {
    match kind {
        NameKind::Entity => names.iter().map(|n| naming.entity_name(n)).collect(),
        NameKind::Intent => Ok(vec![naming.intent_name(names)?]),
        NameKind::Code => names
            .iter()
            .map(|n| normalize_code(naming.policy, n))
            .collect(),
    }
}

/// Describes what `policy` does with a violating name, for log output.
#[must_use]
pub fn describe_policy(policy: EnforcementPolicy) -> &'static str {
    match policy {
        EnforcementPolicy::Hard => "names violating a rule are rejected",
        EnforcementPolicy::Soft => "names violating a rule are corrected silently",
        EnforcementPolicy::SoftVerbose => "names violating a rule are corrected with a warning",
    }
}
