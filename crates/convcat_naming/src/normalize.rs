//! Entry points for normalizing entity, intent, and code names.

use convcat_foundation::{CanonicalName, EnforcementPolicy, Error, NameKind, Result};

use crate::mandatory::MandatoryRule;
use crate::rule::RuleChain;
use crate::sanitizer::Sanitizer;

/// Marker that may precede an intent name in source files.
pub const INTENT_MARKER: char = '#';

/// Separator placed between canonicalized intent subnames.
pub const INTENT_SEPARATOR: &str = "_";

/// Normalizes a single-token entity name.
///
/// # Errors
///
/// Returns `NamingViolation` under the hard policy if any rule changes the
/// name, and under every policy if the result is empty.
pub fn normalize_entity_name(
    policy: EnforcementPolicy,
    rules: Option<&RuleChain>,
    raw: &str,
) -> Result<CanonicalName> {
    Sanitizer::new(policy, MandatoryRule::entity())
        .with_rules(rules)
        .sanitize(raw)
}

/// Normalizes an intent name built from one or more subnames.
///
/// Empty subnames are skipped. A single leading [`INTENT_MARKER`] on the first
/// subname is removed before sanitizing, so `#greeting` is accepted as
/// `greeting` even under the hard policy. The canonicalized subnames are
/// joined with [`INTENT_SEPARATOR`].
///
/// # Errors
///
/// Returns `NamingViolation` if no subname is given, if any subname breaks a
/// rule under the hard policy, or if any subname canonicalizes to empty.
pub fn normalize_intent_name<I, S>(
    policy: EnforcementPolicy,
    rules: Option<&RuleChain>,
    subnames: I,
) -> Result<CanonicalName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sanitizer = Sanitizer::new(policy, MandatoryRule::intent()).with_rules(rules);
    let mut parts: Vec<String> = Vec::new();

    for subname in subnames {
        let subname = subname.as_ref();
        if subname.is_empty() {
            continue;
        }
        let trimmed = subname.trim();
        let source = if parts.is_empty() {
            trimmed.strip_prefix(INTENT_MARKER).unwrap_or(trimmed)
        } else {
            trimmed
        };
        parts.push(sanitizer.sanitize(source)?.into_string());
    }

    if parts.is_empty() {
        return Err(Error::empty_name(NameKind::Intent));
    }
    Ok(CanonicalName::new_unchecked(parts.join(INTENT_SEPARATOR)))
}

/// Normalizes a code: upper-case, unaccented, underscores for spaces.
///
/// # Errors
///
/// Returns `NamingViolation` under the hard policy if the code had to change,
/// and under every policy if the result is empty.
pub fn normalize_code(policy: EnforcementPolicy, raw: &str) -> Result<CanonicalName> {
    Sanitizer::new(policy, MandatoryRule::code()).sanitize(raw)
}

/// Returns a key for comparing intent names loosely.
///
/// Hyphens and underscores are removed and the result upper-cased, so
/// `order-status`, `ORDER_STATUS`, and `orderStatus` share a key.
#[must_use]
pub fn intent_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// The naming settings of one run.
///
/// Holds the policy and the per-kind rule chains so they can be passed
/// explicitly to whatever needs to normalize names.
#[derive(Debug, Clone, Default)]
pub struct NamingConfig {
    /// The active policy.
    pub policy: EnforcementPolicy,
    /// Rules applied to entity names.
    pub entity_rules: RuleChain,
    /// Rules applied to intent names.
    pub intent_rules: RuleChain,
}

impl NamingConfig {
    /// Creates a config with no user rules.
    #[must_use]
    pub fn new(policy: EnforcementPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Builder method to set the entity rule chain.
    #[must_use]
    pub fn with_entity_rules(mut self, rules: RuleChain) -> Self {
        self.entity_rules = rules;
        self
    }

    /// Builder method to set the intent rule chain.
    #[must_use]
    pub fn with_intent_rules(mut self, rules: RuleChain) -> Self {
        self.intent_rules = rules;
        self
    }

    /// Normalizes an entity name with this config.
    ///
    /// # Errors
    ///
    /// See [`normalize_entity_name`].
    pub fn entity_name(&self, raw: &str) -> Result<CanonicalName> {
        normalize_entity_name(self.policy, Some(&self.entity_rules), raw)
    }

    /// Normalizes an intent name with this config.
    ///
    /// # Errors
    ///
    /// See [`normalize_intent_name`].
    pub fn intent_name<I, S>(&self, subnames: I) -> Result<CanonicalName>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        normalize_intent_name(self.policy, Some(&self.intent_rules), subnames)
    }
}
