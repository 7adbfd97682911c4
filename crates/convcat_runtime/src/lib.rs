//! Runtime layer for convcat: configuration, logging, and the operations
//! behind each CLI command.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{compile_entities, entities_to_csv, normalize_names, run_entities};
pub use config::{ConfigFile, RunConfig, Switch};
