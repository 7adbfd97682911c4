//! Entity value lines.
//!
//! Each non-empty line of an entity catalog file describes one value:
//!
//! ```text
//! dog;dogs;puppy            # synonyms of "dog"
//! ~colou?r;colour;color     # patterns, representative "colou?r"
//! __fuzzy_match__           # marks the whole entity for fuzzy matching
//! ```

use std::collections::BTreeSet;

use convcat_foundation::{Error, Result};
use serde::{Deserialize, Serialize};

/// Starts a comment that runs to the end of the line.
pub const COMMENT_MARKER: char = '#';

/// Separates the representative value from its synonyms or patterns.
pub const TOKEN_SEPARATOR: char = ';';

/// Leading character marking a pattern value.
pub const PATTERN_MARKER: char = '~';

/// A line consisting of exactly this token enables fuzzy matching.
pub const FUZZY_MATCH_MARKER: &str = "__fuzzy_match__";

/// Removes a trailing `#` comment and surrounding whitespace.
#[must_use]
pub fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT_MARKER)
        .map_or(line, |(head, _)| head)
        .trim()
}

/// Whether a value matches by synonyms or by patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Exact alternates.
    Synonyms,
    /// Regular-expression alternates.
    Patterns,
}

/// One value of an entity with its alternates.
///
/// # Invariants
/// - `alternates` is sorted, unique, trimmed, lower-cased and never
///   contains `value` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ValueJson", into = "ValueJson")]
pub struct EntityValueRecord {
    /// The representative value.
    pub value: String,
    /// How the alternates are matched.
    pub kind: ValueKind,
    /// Synonyms or patterns, depending on `kind`.
    pub alternates: BTreeSet<String>,
}

impl EntityValueRecord {
    /// Creates a record, normalizing the alternates.
    #[must_use]
    pub fn new<I, S>(value: impl Into<String>, kind: ValueKind, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let value = value.into();
        let alternates = alternates
            .into_iter()
            .map(|alt| alt.as_ref().trim().to_lowercase())
            .filter(|alt| !alt.is_empty() && *alt != value)
            .collect();
        Self {
            value,
            kind,
            alternates,
        }
    }

    /// Creates a synonym value.
    #[must_use]
    pub fn synonyms<I, S>(value: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(value, ValueKind::Synonyms, synonyms)
    }

    /// Creates a pattern value.
    #[must_use]
    pub fn patterns<I, S>(value: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(value, ValueKind::Patterns, patterns)
    }

    /// Finds text that would not survive a round trip through [`Self::to_line`].
    ///
    /// Returns the offending value or alternate and what it collides with.
    #[must_use]
    pub fn line_conflict(&self) -> Option<(&str, &'static str)> {
        if self.value.is_empty() || self.value.trim() != self.value {
            return Some((self.value.as_str(), "empty or padded with whitespace"));
        }
        if self.kind == ValueKind::Synonyms && self.value.starts_with(PATTERN_MARKER) {
            return Some((self.value.as_str(), "a synonym value cannot start with '~'"));
        }
        std::iter::once(&self.value)
            .chain(&self.alternates)
            .find_map(|text| {
                if text.contains(COMMENT_MARKER) {
                    Some((text.as_str(), "contains the comment marker '#'"))
                } else if text.contains(TOKEN_SEPARATOR) {
                    Some((text.as_str(), "contains the separator ';'"))
                } else {
                    None
                }
            })
    }

    /// Renders the record back into a catalog line.
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        if self.kind == ValueKind::Patterns {
            line.push(PATTERN_MARKER);
        }
        line.push_str(&self.value);
        for alt in &self.alternates {
            line.push(TOKEN_SEPARATOR);
            line.push_str(alt);
        }
        // A bare marker would read back as the fuzzy-match flag.
        if line == FUZZY_MATCH_MARKER {
            line.push(TOKEN_SEPARATOR);
        }
        line
    }
}

/// A parsed, non-empty catalog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueLine {
    /// The fuzzy-match marker.
    FuzzyMatch,
    /// A value record.
    Value(EntityValueRecord),
}

impl ValueLine {
    /// Parses one raw catalog line.
    ///
    /// Returns `Ok(None)` for lines that are empty once the comment is removed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValueLine` if the representative value is empty.
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        let line = strip_comment(raw);
        if line.is_empty() {
            return Ok(None);
        }
        if line == FUZZY_MATCH_MARKER {
            return Ok(Some(Self::FuzzyMatch));
        }

        let mut tokens = line.split(TOKEN_SEPARATOR);
        let head = tokens.next().unwrap_or_default().trim();
        let (kind, value) = match head.strip_prefix(PATTERN_MARKER) {
            Some(pattern) => (ValueKind::Patterns, pattern),
            None => (ValueKind::Synonyms, head),
        };
        if value.is_empty() {
            return Err(Error::invalid_value_line(line));
        }

        Ok(Some(Self::Value(EntityValueRecord::new(
            value, kind, tokens,
        ))))
    }
}

/// Serialized form of a value: `{ "value", "synonyms"?, "patterns"?, "type"? }`.
#[derive(Serialize, Deserialize)]
struct ValueJson {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<ValueKind>,
    value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    patterns: Vec<String>,
}

impl From<EntityValueRecord> for ValueJson {
    fn from(record: EntityValueRecord) -> Self {
        let alternates: Vec<String> = record.alternates.into_iter().collect();
        match record.kind {
            ValueKind::Synonyms => Self {
                kind: None,
                value: record.value,
                synonyms: alternates,
                patterns: Vec::new(),
            },
            ValueKind::Patterns => Self {
                kind: Some(ValueKind::Patterns),
                value: record.value,
                synonyms: Vec::new(),
                patterns: alternates,
            },
        }
    }
}

impl From<ValueJson> for EntityValueRecord {
    fn from(json: ValueJson) -> Self {
        match json.kind.unwrap_or(ValueKind::Synonyms) {
            ValueKind::Synonyms => Self::synonyms(json.value, json.synonyms),
            ValueKind::Patterns => Self::patterns(json.value, json.patterns),
        }
    }
}
