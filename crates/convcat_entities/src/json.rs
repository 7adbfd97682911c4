//! Catalog serialization to and from the platform's entity JSON.
//!
//! Output is pretty-printed with four-space indentation and keeps non-ASCII
//! characters as UTF-8 rather than escaping them.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use convcat_foundation::{Error, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::record::EntityCatalog;

/// Serializes a catalog to JSON bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(catalog: &EntityCatalog) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut bytes, formatter);
    catalog
        .serialize(&mut serializer)
        .map_err(|e| Error::serialization(e.to_string()))?;
    Ok(bytes)
}

/// Serializes a catalog to a JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_string(catalog: &EntityCatalog) -> Result<String> {
    String::from_utf8(to_bytes(catalog)?).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes a catalog from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a valid entity array.
pub fn from_str(text: &str) -> Result<EntityCatalog> {
    serde_json::from_str(text).map_err(|e| Error::serialization(e.to_string()))
}

/// Saves a catalog to a JSON file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(catalog: &EntityCatalog, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::io(format!(
                "failed to create directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(catalog)?;

    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))?;

    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to flush file '{}': {e}", path.display())))?;

    Ok(())
}

/// Loads a catalog from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<EntityCatalog> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        Error::serialization(format!("failed to parse '{}': {e}", path.display()))
    })
}
