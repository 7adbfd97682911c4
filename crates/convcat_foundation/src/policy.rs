//! Enforcement policy for naming restrictions.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How a naming violation is handled.
///
/// Exactly one policy is active per run. It is supplied by the caller and
/// never inferred from the names being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnforcementPolicy {
    /// Reject any violation.
    #[default]
    Hard,
    /// Accept the corrected name silently.
    Soft,
    /// Accept the corrected name and warn with the violated rules.
    SoftVerbose,
}

impl EnforcementPolicy {
    /// Returns the canonical configuration spelling of this policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hard => "hard",
            Self::Soft => "soft",
            Self::SoftVerbose => "soft_verbose",
        }
    }

    /// Returns true if violations are corrected rather than rejected.
    #[must_use]
    pub const fn corrects(self) -> bool {
        !matches!(self, Self::Hard)
    }
}

impl FromStr for EnforcementPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" => Ok(Self::Hard),
            "soft" => Ok(Self::Soft),
            "soft_verbose" | "soft-verbose" => Ok(Self::SoftVerbose),
            _ => Err(Error::unknown_policy(s)),
        }
    }
}

impl fmt::Display for EnforcementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EnforcementPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EnforcementPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
