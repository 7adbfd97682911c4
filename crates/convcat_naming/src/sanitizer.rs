//! Two-stage name rewrite and the policy decision.
//!
//! [`Sanitizer::rewrite`] computes what a name would become; [`Rewritten::enforce`]
//! is the single place where the [`EnforcementPolicy`] is consulted.

use convcat_foundation::{CanonicalName, EnforcementPolicy, Error, NameKind, Result};
use tracing::{debug, warn};

use crate::mandatory::MandatoryRule;
use crate::rule::RuleChain;

/// The outcome of rewriting a name, before the policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// Which kind of name was rewritten.
    pub kind: NameKind,
    /// The trimmed input.
    pub original: String,
    /// The name after the mandatory rule and all user rules.
    pub name: String,
    /// The mandatory rule's message, if that rule changed the name.
    pub mandatory: Option<&'static str>,
    /// Descriptions of the user rules that changed the name.
    pub triggered: Vec<String>,
}

impl Rewritten {
    /// Returns true if the final name differs from the trimmed input.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.name != self.original
    }

    /// Text of every triggered restriction, mandatory first.
    #[must_use]
    pub fn restriction_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(message) = self.mandatory {
            parts.push(message.to_string());
        }
        if !self.triggered.is_empty() {
            parts.push(format!(
                "User-defined regex: '{}'.",
                self.triggered.join("', '")
            ));
        }
        parts.join(" ")
    }

    /// Accepts, corrects, or rejects the name under `policy`.
    ///
    /// # Errors
    ///
    /// Returns `NamingViolation` if the name changed under [`EnforcementPolicy::Hard`],
    /// or if it is empty after rewriting under any policy.
    pub fn enforce(self, policy: EnforcementPolicy) -> Result<CanonicalName> {
        if self.changed() {
            match policy {
                EnforcementPolicy::Hard => {
                    return Err(Error::naming_violation(
                        self.kind,
                        self.original.as_str(),
                        self.restriction_text(),
                    ));
                }
                EnforcementPolicy::Soft => {
                    debug!(
                        kind = %self.kind,
                        from = %self.original,
                        to = %self.name,
                        "name corrected"
                    );
                }
                EnforcementPolicy::SoftVerbose => {
                    warn!(
                        "Illegal value of the {} name: '{}'. {}",
                        self.kind,
                        self.original,
                        self.restriction_text()
                    );
                    warn!(
                        "{} name '{}' was changed to: '{}'",
                        capitalize(self.kind.label()),
                        self.original,
                        self.name
                    );
                }
            }
        }

        if self.name.is_empty() {
            return Err(Error::empty_name(self.kind));
        }
        Ok(CanonicalName::new_unchecked(self.name))
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Applies a mandatory rule and an optional user rule chain under a policy.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer<'a> {
    policy: EnforcementPolicy,
    mandatory: &'a MandatoryRule,
    rules: Option<&'a RuleChain>,
}

impl<'a> Sanitizer<'a> {
    /// Creates a sanitizer with no user rules.
    #[must_use]
    pub fn new(policy: EnforcementPolicy, mandatory: &'a MandatoryRule) -> Self {
        Self {
            policy,
            mandatory,
            rules: None,
        }
    }

    /// Adds a user rule chain applied after the mandatory rule.
    #[must_use]
    pub fn with_rules(mut self, rules: Option<&'a RuleChain>) -> Self {
        self.rules = rules;
        self
    }

    /// Rewrites a name without consulting the policy.
    #[must_use]
    pub fn rewrite(&self, raw: &str) -> Rewritten {
        let kind = self.mandatory.kind();
        let original = raw.trim().to_string();

        let platform = self.mandatory.apply(&original);
        let mandatory = (platform != original).then(|| self.mandatory.message());

        let (name, triggered) = match self.rules {
            Some(rules) if !rules.is_empty() => rules.apply(kind, &platform),
            _ => (platform, Vec::new()),
        };

        Rewritten {
            kind,
            original,
            name,
            mandatory,
            triggered,
        }
    }

    /// Rewrites a name and applies the policy.
    ///
    /// # Errors
    ///
    /// See [`Rewritten::enforce`].
    pub fn sanitize(&self, raw: &str) -> Result<CanonicalName> {
        self.rewrite(raw).enforce(self.policy)
    }
}

/// Sanitizes one name; shorthand for building a [`Sanitizer`].
///
/// # Errors
///
/// See [`Rewritten::enforce`].
pub fn sanitize(
    policy: EnforcementPolicy,
    mandatory: &MandatoryRule,
    rules: Option<&RuleChain>,
    raw: &str,
) -> Result<CanonicalName> {
    Sanitizer::new(policy, mandatory)
        .with_rules(rules)
        .sanitize(raw)
}
