//! Name normalization and validation for convcat.
//!
//! Every name passes through two stages before it is written to the
//! platform: the mandatory platform rule for its [`NameKind`], then the
//! project's ordered [`RuleChain`]. The active [`EnforcementPolicy`] decides
//! whether a name that had to change is rejected, silently corrected, or
//! corrected with a warning.
//!
//! ```text
//! "Pizza Topping"  ──mandatory──▶ "Pizza_Topping" ──user rules──▶ "pizza_topping"
//!                                                                     │
//!                                         Hard: NamingViolation ◀─────┤
//!                                         Soft: accept         ◀─────┤
//!                                  SoftVerbose: accept + warn  ◀─────┘
//! ```
//!
//! # Modules
//!
//! - [`rule`] - User rules, directives, and rule chains
//! - [`mandatory`] - Platform-imposed rewrites per name kind
//! - [`sanitizer`] - Two-stage rewrite and the policy decision
//! - [`normalize`] - Entity, intent, and code name entry points
//!
//! [`NameKind`]: convcat_foundation::NameKind
//! [`EnforcementPolicy`]: convcat_foundation::EnforcementPolicy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod mandatory;
pub mod normalize;
pub mod rule;
pub mod sanitizer;

pub use mandatory::MandatoryRule;
pub use normalize::{
    NamingConfig, intent_key, normalize_code, normalize_entity_name, normalize_intent_name,
};
pub use rule::{Directive, RuleChain, UserRule};
pub use sanitizer::{Rewritten, Sanitizer, sanitize};
