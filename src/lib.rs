//! convcat - Entity catalog compiler for conversational platforms
//!
//! This crate re-exports all layers of the convcat system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: convcat_runtime     - CLI, configuration, logging
//! Layer 2: convcat_entities    - Value lines, catalog compiler, discovery, JSON
//! Layer 1: convcat_naming      - Sanitizer, rule chains, name normalization
//! Layer 0: convcat_foundation  - Core types (Error, EnforcementPolicy, CanonicalName)
//! ```

pub use convcat_entities as entities;
pub use convcat_foundation as foundation;
pub use convcat_naming as naming;
pub use convcat_runtime as runtime;
