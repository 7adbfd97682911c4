//! Core types and errors for convcat.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with source context
//! - [`EnforcementPolicy`] - How naming violations are handled
//! - [`CanonicalName`] - A name that passed normalization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod name;
pub mod policy;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use name::{CanonicalName, NameKind};
pub use policy::EnforcementPolicy;
