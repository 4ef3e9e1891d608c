//! Domain error model.
//!
//! [`DomainError`] is the only error business logic hands to a presenter. It
//! carries a kind, a human message, an optional underlying cause and, for
//! invalid input, the field-level [`ValidationIssue`]s.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::labels;

/// Any error value, as accepted by [`crate::wrap`] and carried as a cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Classification of a [`DomainError`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Something prevents the code from continuing (also the unclassified default).
    #[default]
    System,
    /// An expected resource could not be found.
    NotFound,
    /// The input was wrong in some way.
    InvalidInput,
    /// The resource already exists.
    Duplicate,
}

impl ErrorKind {
    /// Label from the process-wide table.
    pub fn label(self) -> &'static str {
        labels::current().kind(self)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where and how an input is wrong. A JSON path works well as the locator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    /// Free text; an i18n lookup code works too.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Cardinality limit (e.g. maximum number of items).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Domain-level error.
///
/// Construction never fails and performs no validation; pairing `issues`
/// with [`ErrorKind::InvalidInput`] is left to callers. The `cause` is the
/// failure this error was derived from and is exposed as the error source, so
/// chain inspection continues through it.
///
/// Renders as `<kind-label> - <message>`, followed by ` (<cause>)` when a cause
/// is present.
#[derive(Debug, Error)]
#[error("{kind} - {message}{}", CauseSuffix(.cause))]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<BoxError>,
    issues: Vec<ValidationIssue>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
            issues: Vec::new(),
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::System, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Duplicate, message)
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_issue(mut self, issue: ValidationIssue) -> Self {
        self.issues.push(issue);
        self
    }

    pub fn with_issues(mut self, issues: impl IntoIterator<Item = ValidationIssue>) -> Self {
        self.issues.extend(issues);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Render a possibly-absent domain error; `None` yields the nil sentinel.
    pub fn render(err: Option<&DomainError>) -> String {
        match err {
            Some(err) => err.to_string(),
            None => labels::current().nil_error.clone(),
        }
    }
}

/// ` (<cause>)` when a cause is present, nothing otherwise.
struct CauseSuffix<'a>(&'a Option<BoxError>);

impl fmt::Display for CauseSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(cause) => write!(f, " ({cause})"),
            None => Ok(()),
        }
    }
}
