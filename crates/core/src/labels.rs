//! Human-readable labels for error kinds and the fixed error messages.
//!
//! The table is process-wide and written exactly once: either by [`install`]
//! at startup (e.g. to localize), or with the English defaults by the first
//! read. Once anything has been rendered the table is fixed, so a given
//! error always renders the same way.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorKind;

static TABLE: OnceLock<Labels> = OnceLock::new();

/// Label table for [`ErrorKind`] plus the messages used by the wrap and
/// recovery machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub system: String,
    pub not_found: String,
    pub invalid_input: String,
    pub duplicate: String,

    /// Message of the `System` error created when a non-domain error is wrapped.
    pub converted: String,

    /// Message of the `System` error presented after a recovered panic.
    pub recovery: String,

    /// Rendering of an absent domain error.
    pub nil_error: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            system: "system".to_string(),
            not_found: "not found".to_string(),
            invalid_input: "invalid input".to_string(),
            duplicate: "duplicate".to_string(),
            converted: "converted error".to_string(),
            recovery: "wrapper recovery".to_string(),
            nil_error: "domain error was nil".to_string(),
        }
    }
}

/// Configuration failures for the label table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid label document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The table was already installed or already read; the rejected table
    /// is handed back.
    #[error("label table already fixed")]
    AlreadyInstalled(Box<Labels>),
}

impl Labels {
    /// Parse a (possibly partial) JSON document. Missing fields keep their default.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(doc)?)
    }

    /// Build a table from `CLEANFLOW_*` environment variables, defaulting
    /// anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut labels = Self::default();
        let fields: [(&str, &mut String); 7] = [
            ("CLEANFLOW_LABEL_SYSTEM", &mut labels.system),
            ("CLEANFLOW_LABEL_NOT_FOUND", &mut labels.not_found),
            ("CLEANFLOW_LABEL_INVALID_INPUT", &mut labels.invalid_input),
            ("CLEANFLOW_LABEL_DUPLICATE", &mut labels.duplicate),
            ("CLEANFLOW_MESSAGE_CONVERTED", &mut labels.converted),
            ("CLEANFLOW_MESSAGE_RECOVERY", &mut labels.recovery),
            ("CLEANFLOW_MESSAGE_NIL", &mut labels.nil_error),
        ];
        for (key, slot) in fields {
            if let Some(value) = lookup(key) {
                *slot = value;
            }
        }
        labels
    }

    /// Label for a single kind.
    pub fn kind(&self, kind: ErrorKind) -> &str {
        match kind {
            ErrorKind::System => &self.system,
            ErrorKind::NotFound => &self.not_found,
            ErrorKind::InvalidInput => &self.invalid_input,
            ErrorKind::Duplicate => &self.duplicate,
        }
    }
}

/// Install the process-wide table.
///
/// Must run before the first [`current`] read (which fixes the defaults);
/// any later call is rejected.
pub fn install(labels: Labels) -> Result<(), ConfigError> {
    TABLE.set(labels).map_err(|rejected| {
        tracing::warn!("label table already fixed; ignoring new table");
        ConfigError::AlreadyInstalled(Box::new(rejected))
    })?;
    tracing::debug!("label table installed");
    Ok(())
}

/// The active table. The first read without a prior install fixes the defaults.
pub fn current() -> &'static Labels {
    TABLE.get_or_init(Labels::default)
}
