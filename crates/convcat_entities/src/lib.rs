//! Entity catalog compiler for convcat.
//!
//! Turns loosely formatted catalog files into the entity JSON consumed by
//! the conversational platform, and back.
//!
//! # Architecture
//!
//! ```text
//! paths ──▶ DISCOVERY ──▶ sorted files
//!                              │
//!              ┌───────────────┴────────────────┐
//!              ▼                                ▼
//!     system_entities.csv                 <entity>.csv
//!     one name per line            name ◀── file stem (naming rules)
//!     dedup across files           lines ──▶ VALUE LINE PARSER
//!              │                                │
//!              └───────────────┬────────────────┘
//!                              ▼
//!                       EntityCatalog ──▶ JSON
//! ```
//!
//! # Modules
//!
//! - [`value`] - Value line parsing and value records
//! - [`record`] - Entity records and the catalog
//! - [`compiler`] - Catalog assembly from files or in-memory sources
//! - [`discovery`] - Finding catalog files on disk
//! - [`json`] - Reading and writing the JSON interchange format
//! - [`decompile`] - Rendering a catalog back into catalog files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compiler;
pub mod decompile;
pub mod discovery;
pub mod json;
pub mod record;
pub mod value;

pub use compiler::{CatalogCompiler, CompileOptions, SYSTEM_ENTITIES};
pub use decompile::{CatalogFile, decompile};
pub use discovery::discover;
pub use record::{EntityCatalog, EntityRecord};
pub use value::{EntityValueRecord, ValueKind, ValueLine};
