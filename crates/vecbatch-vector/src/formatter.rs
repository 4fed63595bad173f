//! Record formatters: the text-synthesis hook of a [`DataLoader`](crate::DataLoader).
//!
//! A formatter decides what text gets embedded for a record. The record
//! itself always travels unchanged as document metadata; formatting is
//! purely additive.
//!
//! Any `Fn(&Record) -> Result<String>` closure is a formatter, so a new
//! corpus shape needs no new type:
//!
//! ```
//! use vecbatch_vector::{Record, RecordFormatter};
//!
//! let title = |record: &Record| -> vecbatch_core::Result<String> {
//!     Ok(record.get("title").and_then(|v| v.as_str()).unwrap_or("").to_string())
//! };
//! let record: Record = serde_json::from_str(r#"{"title": "Runbook"}"#).unwrap();
//! assert_eq!(title.format(&record).unwrap(), "Runbook");
//! ```

use crate::types::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use vecbatch_core::{Error, Result};

/// Placeholder used when a migration plan carries no schedule.
pub const SCHEDULE_PLACEHOLDER: &str = "Not specified";

/// Trait for turning a record into the text that gets embedded.
///
/// Implementations must be deterministic: the same record always yields the
/// same string, byte for byte.
pub trait RecordFormatter: Send + Sync {
    /// Synthesize the text for one record.
    fn format(&self, record: &Record) -> Result<String>;

    /// Returns the name of this formatter for logging.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> RecordFormatter for F
where
    F: Fn(&Record) -> Result<String> + Send + Sync,
{
    fn format(&self, record: &Record) -> Result<String> {
        self(record)
    }
}

/// The formatter of a loader that was never specialized.
///
/// Always fails with [`Error::NotImplemented`].
#[derive(Clone, Copy, Debug, Default)]
pub struct UnspecifiedFormatter;

impl RecordFormatter for UnspecifiedFormatter {
    fn format(&self, _record: &Record) -> Result<String> {
        Err(Error::not_implemented(
            "loader has no record formatter; supply one with DataLoader::with_formatter",
        ))
    }

    fn name(&self) -> &str {
        "unspecified"
    }
}

// ============================================================================
// Migration plans
// ============================================================================

/// Formatter for data-migration plan records.
///
/// ```text
/// Source: {source.type} | Destination: {destination.type} | Transformation: {transformation} | Schedule: {schedule}
/// ```
///
/// An absent, `null` or empty-string schedule renders as `Not specified`.
///
/// The layout must stay byte-identical: persisted indexes built from it
/// are matched against reference entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct MigrationFormatter;

impl RecordFormatter for MigrationFormatter {
    fn format(&self, record: &Record) -> Result<String> {
        let source = required(record, &["source", "type"])?;
        let destination = required(record, &["destination", "type"])?;
        let transformation = required(record, &["transformation"])?;
        let schedule = match record.get("schedule") {
            None | Some(Value::Null) => SCHEDULE_PLACEHOLDER.to_string(),
            Some(Value::String(s)) if s.is_empty() => SCHEDULE_PLACEHOLDER.to_string(),
            Some(value) => render(value),
        };

        Ok(format!(
            "Source: {source} | Destination: {destination} | Transformation: {transformation} | Schedule: {schedule}"
        ))
    }

    fn name(&self) -> &str {
        "migration"
    }
}

/// Look up a nested field and render it.
fn required(record: &Record, path: &[&str]) -> Result<String> {
    let (first, rest) = path
        .split_first()
        .ok_or_else(|| Error::operation("empty field path"))?;

    let mut value = record.get(*first);
    for key in rest {
        value = value.and_then(|v| v.get(*key));
    }

    value
        .map(render)
        .ok_or_else(|| Error::malformed_input(format!("missing field '{}'", path.join("."))))
}

/// Strings render raw, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Generic JSON
// ============================================================================

/// Formatter that embeds the record's compact JSON serialization.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter;

impl RecordFormatter for JsonFormatter {
    fn format(&self, record: &Record) -> Result<String> {
        Ok(serde_json::to_string(record)?)
    }

    fn name(&self) -> &str {
        "json"
    }
}

// ============================================================================
// Selection by name
// ============================================================================

/// Built-in formatter selector, as named on the command line and in config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// [`MigrationFormatter`].
    #[default]
    Migration,
    /// [`JsonFormatter`].
    Json,
}

impl FormatterKind {
    /// All selectable kinds.
    pub const ALL: [FormatterKind; 2] = [FormatterKind::Migration, FormatterKind::Json];

    /// The selector string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Migration => "migration",
            Self::Json => "json",
        }
    }
}

impl RecordFormatter for FormatterKind {
    fn format(&self, record: &Record) -> Result<String> {
        match self {
            Self::Migration => MigrationFormatter.format(record),
            Self::Json => JsonFormatter.format(record),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::config(format!(
                    "Unknown loader: '{s}'. Supported: migration, json"
                ))
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
