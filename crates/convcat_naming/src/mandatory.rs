//! Platform-imposed naming rules.
//!
//! These always run before any user rule and cannot be configured. Each
//! [`NameKind`] has one rule: a fixed sequence of rewrites plus the message
//! cited when the rewrite changes a name.
//!
//! Allowed characters are letters (`\p{L}`), numbers (`\p{N}`) and the
//! punctuation each rule lists. Combining marks and joiners are removed.

use std::sync::LazyLock;

use convcat_foundation::NameKind;
use regex::Regex;

use crate::rule::{Directive, Rewrite};

/// A fixed rewrite sequence and its violation message.
#[derive(Debug)]
pub struct MandatoryRule {
    kind: NameKind,
    steps: Vec<Rewrite>,
    message: &'static str,
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("mandatory rule patterns are valid")
}

static ENTITY: LazyLock<MandatoryRule> = LazyLock::new(|| MandatoryRule {
    kind: NameKind::Entity,
    steps: vec![
        Rewrite::replace(pattern(" "), "_"),
        Rewrite::replace(pattern(r"[^\p{L}\p{N}_-]"), ""),
    ],
    message: "The entity name can only contain letters (in Unicode), numbers, underscores, and hyphens.",
});

static INTENT: LazyLock<MandatoryRule> = LazyLock::new(|| MandatoryRule {
    kind: NameKind::Intent,
    steps: vec![
        Rewrite::replace(pattern("[ ;]"), "_"),
        Rewrite::replace(pattern(r"[^\p{L}\p{N}_.-]"), ""),
    ],
    message: "The intent name can only contain letters (in Unicode), numbers, underscores, hyphens, and periods.",
});

static CODE: LazyLock<MandatoryRule> = LazyLock::new(|| MandatoryRule {
    kind: NameKind::Code,
    steps: vec![
        Rewrite::replace(pattern(" "), "_"),
        Rewrite::Directive(Directive::UppercaseAll),
        Rewrite::Directive(Directive::StripDiacritics),
        Rewrite::replace(pattern(r"[^\p{L}\p{N}_-]"), ""),
    ],
    message: "The code can only contain uppercase letters (in Unicode), numbers, underscores, and hyphens.",
});

impl MandatoryRule {
    /// The rule for entity names.
    #[must_use]
    pub fn entity() -> &'static Self {
        &ENTITY
    }

    /// The rule for intent names.
    #[must_use]
    pub fn intent() -> &'static Self {
        &INTENT
    }

    /// The rule for codes.
    #[must_use]
    pub fn code() -> &'static Self {
        &CODE
    }

    /// The rule for a given kind of name.
    #[must_use]
    pub fn for_kind(kind: NameKind) -> &'static Self {
        match kind {
            NameKind::Entity => Self::entity(),
            NameKind::Intent => Self::intent(),
            NameKind::Code => Self::code(),
        }
    }

    /// The kind of name this rule governs.
    #[must_use]
    pub fn kind(&self) -> NameKind {
        self.kind
    }

    /// The message cited when this rule changes a name.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Applies every step in order.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        self.steps
            .iter()
            .fold(input.to_string(), |acc, step| step.apply(&acc))
    }
}
