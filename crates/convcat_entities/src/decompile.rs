//! Rendering a catalog back into catalog files.
//!
//! Entities with values become one `<entity>.csv` file each. Value-free
//! entities cannot be told apart from system entities in the JSON, so they are
//! all listed in a single `system_entities.csv`. A catalog holding text that
//! the line syntax would read back differently is refused as a whole.

use std::fs;
use std::path::{Path, PathBuf};

use convcat_foundation::{Error, Result};

use crate::compiler::SYSTEM_ENTITIES;
use crate::record::EntityCatalog;
use crate::value::{COMMENT_MARKER, EntityValueRecord};

/// Extension given to written catalog files.
pub const CATALOG_EXTENSION: &str = "csv";

/// One catalog file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    /// File stem; the entity name, or [`SYSTEM_ENTITIES`].
    pub stem: String,
    /// Lines of the file, without terminators.
    pub lines: Vec<String>,
}

impl CatalogFile {
    /// Returns the file contents with a trailing newline.
    #[must_use]
    pub fn contents(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Returns the file name, stem plus extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{CATALOG_EXTENSION}", self.stem)
    }
}

/// Splits a catalog into the files that would compile back into it.
///
/// Value files come first in catalog order; the system entity file, if any,
/// comes last.
///
/// # Errors
///
/// Returns `UnrepresentableValue` if a value, an alternate, or a system
/// entity name would be read back differently, for example a value
/// containing `#` or `;`.
pub fn decompile(catalog: &EntityCatalog) -> Result<Vec<CatalogFile>> {
    let mut files = Vec::new();
    let mut system = Vec::new();

    for entity in catalog {
        if entity.is_value_free() {
            if entity.name.contains(COMMENT_MARKER) {
                return Err(Error::unrepresentable_value(
                    SYSTEM_ENTITIES,
                    entity.name.as_str(),
                    "contains the comment marker '#'",
                ));
            }
            if !system.contains(&entity.name.as_str()) {
                system.push(entity.name.as_str());
            }
            continue;
        }

        if let Some((text, reason)) = entity.values.iter().find_map(EntityValueRecord::line_conflict)
        {
            return Err(Error::unrepresentable_value(entity.name.as_str(), text, reason));
        }
        files.push(CatalogFile {
            stem: entity.name.to_string(),
            lines: entity.to_lines(),
        });
    }

    if !system.is_empty() {
        files.push(CatalogFile {
            stem: SYSTEM_ENTITIES.to_string(),
            lines: system.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(files)
}

/// Writes catalog files into `dir`, creating it if needed.
///
/// Returns the paths written, in order.
///
/// # Errors
///
/// Returns `IoError` if the directory or a file cannot be written.
pub fn write_files(files: &[CatalogFile], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| {
        Error::io(format!("failed to create directory '{}': {e}", dir.display()))
    })?;

    files
        .iter()
        .map(|file| {
            let path = dir.join(file.file_name());
            fs::write(&path, file.contents()).map_err(|e| {
                Error::io(format!("failed to write file '{}': {e}", path.display()))
            })?;
            Ok(path)
        })
        .collect()
}
