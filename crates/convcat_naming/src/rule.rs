//! User-defined naming rules.
//!
//! A rule is written as a `(pattern, replacement)` pair. Ordinary patterns
//! are regular expressions substituted across the whole name. A pattern that
//! starts with [`UserRule::DIRECTIVE_MARKER`] is a directive: the replacement
//! selects a whole-string transform instead.
//!
//! | Replacement                   | Transform                   |
//! |-------------------------------|-----------------------------|
//! | `\L` / `lowercase-all`        | lower-case the whole name   |
//! | `\U` / `uppercase-all`        | upper-case the whole name   |
//! | `\A` / `strip-diacritics`     | remove accents              |

use std::fmt;

use convcat_foundation::{Error, NameKind, Result};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A whole-string transform selected by a directive rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Lower-case every character.
    LowercaseAll,
    /// Upper-case every character.
    UppercaseAll,
    /// Remove diacritical marks, keeping base letters.
    StripDiacritics,
}

impl Directive {
    /// Resolves the replacement half of a directive rule.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRuleDirective` for anything not in the table above.
    pub fn from_replacement(replacement: &str) -> Result<Self> {
        match replacement {
            r"\L" | "lowercase-all" => Ok(Self::LowercaseAll),
            r"\U" | "uppercase-all" => Ok(Self::UppercaseAll),
            r"\A" | "strip-diacritics" => Ok(Self::StripDiacritics),
            other => Err(Error::unsupported_directive(other)),
        }
    }

    /// Applies the transform.
    #[must_use]
    pub fn apply(self, input: &str) -> String {
        match self {
            Self::LowercaseAll => input.to_lowercase(),
            Self::UppercaseAll => input.to_uppercase(),
            Self::StripDiacritics => strip_diacritics(input),
        }
    }

    /// Describes the restriction this directive enforces.
    #[must_use]
    pub fn describe(self, kind: NameKind) -> String {
        match self {
            Self::LowercaseAll => format!("{kind} name should be lowercase"),
            Self::UppercaseAll => format!("{kind} name should be uppercase"),
            Self::StripDiacritics => format!("{kind} name cannot contain accented letters"),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LowercaseAll => "lowercase-all",
            Self::UppercaseAll => "uppercase-all",
            Self::StripDiacritics => "strip-diacritics",
        })
    }
}

/// Removes combining marks after compatibility decomposition.
///
/// `"Café Crème"` becomes `"Cafe Creme"`. The result is recomposed so that
/// scripts without accents (Hangul, for instance) come back unchanged.
#[must_use]
pub fn strip_diacritics(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// A single rewrite step: either a regex substitution or a directive.
#[derive(Debug, Clone)]
pub enum Rewrite {
    /// Replace every match of `regex` with `replacement` (regex syntax).
    Replace {
        /// Compiled pattern.
        regex: Regex,
        /// Replacement in the regex engine's `${n}` syntax.
        replacement: String,
    },
    /// Apply a whole-string transform.
    Directive(Directive),
}

impl Rewrite {
    /// Builds a substitution from a pattern known to be valid.
    pub(crate) fn replace(regex: Regex, replacement: &str) -> Self {
        Self::Replace {
            regex,
            replacement: replacement.to_string(),
        }
    }

    /// Applies this step to `input`.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        match self {
            Self::Replace { regex, replacement } => {
                regex.replace_all(input, replacement.as_str()).into_owned()
            }
            Self::Directive(directive) => directive.apply(input),
        }
    }
}

/// A project-supplied rule applied after the mandatory platform rule.
#[derive(Debug, Clone)]
pub struct UserRule {
    pattern: String,
    replacement: String,
    rewrite: Rewrite,
}

impl UserRule {
    /// Leading character that turns a pattern into a directive.
    pub const DIRECTIVE_MARKER: char = '$';

    /// Parses a rule from its textual `(pattern, replacement)` form.
    ///
    /// Regex replacements may use `\1` or `\g<name>` back-references; they
    /// are translated for the regex engine and literal `$` is escaped.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRuleDirective` for an unknown directive and
    /// `InvalidRulePattern` if the regex does not compile.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let replacement = replacement.into();

        let rewrite = if pattern.starts_with(Self::DIRECTIVE_MARKER) {
            Rewrite::Directive(Directive::from_replacement(&replacement)?)
        } else {
            let regex = Regex::new(&pattern)
                .map_err(|e| Error::invalid_rule_pattern(&pattern, e.to_string()))?;
            Rewrite::replace(regex, &translate_replacement(&replacement))
        };

        Ok(Self {
            pattern,
            replacement,
            rewrite,
        })
    }

    /// Creates a directive rule directly.
    #[must_use]
    pub fn directive(directive: Directive) -> Self {
        Self {
            pattern: format!("{}special", Self::DIRECTIVE_MARKER),
            replacement: directive.to_string(),
            rewrite: Rewrite::Directive(directive),
        }
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the replacement as written.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns the directive if this is a directive rule.
    #[must_use]
    pub fn as_directive(&self) -> Option<Directive> {
        match self.rewrite {
            Rewrite::Directive(directive) => Some(directive),
            Rewrite::Replace { .. } => None,
        }
    }

    /// Applies this rule to `input`.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        self.rewrite.apply(input)
    }

    /// Describes the restriction this rule enforces, for diagnostics.
    #[must_use]
    pub fn describe(&self, kind: NameKind) -> String {
        match self.rewrite {
            Rewrite::Directive(directive) => directive.describe(kind),
            Rewrite::Replace { .. } => format!(
                "'{}' should be replaced with '{}'",
                self.pattern, self.replacement
            ),
        }
    }
}

/// An ordered list of user rules.
///
/// Rules apply in order; each rule sees the output of the previous one.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<UserRule>,
}

impl RuleChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a chain from `(pattern, replacement)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed rule.
    pub fn from_pairs<I, P, R>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(pattern, replacement)| UserRule::new(pattern, replacement))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Appends a rule to the end of the chain.
    #[must_use]
    pub fn with_rule(mut self, rule: UserRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns true if the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Iterates over the rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &UserRule> {
        self.rules.iter()
    }

    /// Applies every rule in order.
    ///
    /// Returns the rewritten name and the description of every rule whose
    /// output differed from its input.
    #[must_use]
    pub fn apply(&self, kind: NameKind, input: &str) -> (String, Vec<String>) {
        let mut current = input.to_string();
        let mut triggered = Vec::new();
        for rule in &self.rules {
            let next = rule.apply(&current);
            if next != current {
                triggered.push(rule.describe(kind));
            }
            current = next;
        }
        (current, triggered)
    }
}

impl<'a> IntoIterator for &'a RuleChain {
    type Item = &'a UserRule;
    type IntoIter = std::slice::Iter<'a, UserRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Converts `\1` / `\g<name>` back-references into `${1}` / `${name}` and
/// expands control escapes such as `\n` and `\t`.
fn translate_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    let mut group = String::new();
                    while let Some(&d) = chars.peek() {
                        if !d.is_ascii_digit() || group.len() == 2 {
                            break;
                        }
                        group.push(d);
                        chars.next();
                    }
                    out.push_str("${");
                    out.push_str(&group);
                    out.push('}');
                }
                Some('g') => {
                    chars.next();
                    if chars.peek() == Some(&'<') {
                        chars.next();
                        let name: String = chars.by_ref().take_while(|&c| c != '>').collect();
                        out.push_str("${");
                        out.push_str(&name);
                        out.push('}');
                    } else {
                        out.push_str("\\g");
                    }
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                Some(c) => match control_escape(c) {
                    Some(escaped) => {
                        chars.next();
                        out.push(escaped);
                    }
                    None => out.push('\\'),
                },
                None => out.push('\\'),
            },
            _ => out.push(ch),
        }
    }

    out
}

fn control_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'f' => Some('\x0C'),
        'v' => Some('\x0B'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        _ => None,
    }
}
