//! Error types for the convcat system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error is fatal: the compiler is a batch tool and the binary turns
//! any `Err` into a diagnostic and a non-zero exit status.

use std::fmt;

use thiserror::Error;

use crate::name::NameKind;

/// Result alias used throughout convcat.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for convcat operations.
#[derive(Debug, Error)]
#[error("{kind}{}", context_suffix(.context))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

fn context_suffix(context: &Option<ErrorContext>) -> String {
    match context {
        Some(ctx) if ctx.source.is_some() => format!(" ({ctx})"),
        _ => String::new(),
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a naming violation error.
    #[must_use]
    pub fn naming_violation(
        kind: NameKind,
        name: impl Into<String>,
        restrictions: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::NamingViolation {
            kind,
            name: name.into(),
            restrictions: restrictions.into(),
        })
    }

    /// Creates an error for a name that is empty after normalization.
    #[must_use]
    pub fn empty_name(kind: NameKind) -> Self {
        Self::naming_violation(kind, "", format!("empty {kind} name"))
    }

    /// Creates an unsupported rule directive error.
    #[must_use]
    pub fn unsupported_directive(directive: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedRuleDirective(directive.into()))
    }

    /// Creates an invalid rule pattern error.
    #[must_use]
    pub fn invalid_rule_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRulePattern {
            pattern: pattern.into(),
            message: message.into(),
        })
    }

    /// Creates an unknown policy error.
    #[must_use]
    pub fn unknown_policy(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownPolicy(value.into()))
    }

    /// Creates a missing catalog source error.
    #[must_use]
    pub fn missing_catalog_source() -> Self {
        Self::new(ErrorKind::MissingCatalogSource)
    }

    /// Creates an invalid value line error.
    #[must_use]
    pub fn invalid_value_line(line: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidValueLine { line: line.into() })
    }

    /// Creates an error for a value that catalog syntax cannot express.
    #[must_use]
    pub fn unrepresentable_value(
        entity: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnrepresentableValue {
            entity: entity.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationError(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigError(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A name broke a mandatory or user rule under the hard policy,
    /// or was empty after normalization.
    #[error("illegal value of the {kind} name: '{name}': {restrictions}")]
    NamingViolation {
        /// Which kind of name was being normalized.
        kind: NameKind,
        /// The name as it was supplied (trimmed).
        name: String,
        /// Human-readable text of every triggered restriction.
        restrictions: String,
    },

    /// A user rule used a `$` directive that is not recognized.
    #[error("unsupported special regex operation '{0}'")]
    UnsupportedRuleDirective(String),

    /// A user rule regex could not be compiled.
    #[error("invalid rule pattern '{pattern}': {message}")]
    InvalidRulePattern {
        /// The offending pattern.
        pattern: String,
        /// Message from the regex engine.
        message: String,
    },

    /// The name policy was not one of the recognized values.
    #[error(
        "unknown value of the name policy: '{0}'; it can only be set to either 'soft', 'soft_verbose' or 'hard'"
    )]
    UnknownPolicy(String),

    /// No entity catalog paths were supplied.
    #[error("entities parameter is not defined")]
    MissingCatalogSource,

    /// A catalog line had no representative value.
    #[error("catalog line has no representative value: '{line}'")]
    InvalidValueLine {
        /// The line after comment stripping.
        line: String,
    },

    /// A catalog value cannot be written back as a catalog line.
    #[error("value '{value}' of entity '{entity}' cannot be written to a catalog file: {reason}")]
    UnrepresentableValue {
        /// The entity holding the value.
        entity: String,
        /// The offending value or alternate.
        value: String,
        /// Which catalog syntax it collides with.
        reason: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Encoding or decoding JSON failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Source file the error relates to.
    pub source: Option<String>,
    /// Line number in source (1-indexed).
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}
