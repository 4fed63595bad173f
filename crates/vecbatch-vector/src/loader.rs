//! JSON corpus loading.
//!
//! A [`DataLoader`] reads a file holding a JSON array of objects and turns
//! each object into a [`Document`] through its [`RecordFormatter`].

use crate::formatter::{RecordFormatter, UnspecifiedFormatter};
use crate::types::{Document, Record};
use serde_json::Value;
use std::path::{Path, PathBuf};
use vecbatch_core::{Error, Result};

/// Loads a JSON corpus and converts records into documents.
///
/// `DataLoader::new` yields a loader without a formatter; its text hook
/// fails with [`Error::NotImplemented`] until
/// [`with_formatter`](DataLoader::with_formatter) specializes it.
#[derive(Debug, Clone)]
pub struct DataLoader<F = UnspecifiedFormatter> {
    path: PathBuf,
    formatter: F,
}

impl DataLoader<UnspecifiedFormatter> {
    /// Create a loader for the JSON file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            formatter: UnspecifiedFormatter,
        }
    }
}

impl<F: RecordFormatter> DataLoader<F> {
    /// Replace the text-synthesis hook.
    pub fn with_formatter<G: RecordFormatter>(self, formatter: G) -> DataLoader<G> {
        DataLoader {
            path: self.path,
            formatter,
        }
    }

    /// The input file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The active formatter.
    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Read and parse the input file.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedInput`] if the file is missing or unreadable, is not
    /// valid JSON, is not a top-level array, or holds a non-object element.
    pub fn load_records(&self) -> Result<Vec<Record>> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::malformed_input(format!("cannot read {}: {e}", self.path.display()))
        })?;
        parse_records(&json, &self.path.display().to_string())
    }

    /// Synthesize the embedding text for one record.
    pub fn to_text(&self, record: &Record) -> Result<String> {
        self.formatter.format(record)
    }

    /// Load records and convert them to documents in source order.
    ///
    /// `limit` keeps only the first `limit` records; `None` or a limit past
    /// the record count keeps them all.
    pub fn create_documents(&self, limit: Option<usize>) -> Result<Vec<Document>> {
        let mut records = self.load_records()?;
        let total = records.len();
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        log::info!(
            "Loaded {} of {} records from {} ({} formatter)",
            records.len(),
            total,
            self.path.display(),
            self.formatter.name()
        );

        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let text = self.to_text(&record).map_err(|e| match e {
                    Error::MalformedInput(msg) => {
                        Error::malformed_input(format!("record {i}: {msg}"))
                    }
                    other => other,
                })?;
                Ok(Document::new(text, record))
            })
            .collect()
    }
}

/// Parse a JSON array of objects.
///
/// `source` names the input in error messages.
pub fn parse_records(json: &str, source: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::malformed_input(format!("{source} is not valid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(Error::malformed_input(format!(
            "{source}: top-level value must be an array"
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(Error::malformed_input(format!(
                "{source}: element {i} is not an object"
            ))),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
