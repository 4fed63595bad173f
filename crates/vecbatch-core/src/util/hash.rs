//! Content hashing for index freshness.

use crate::{Error, Result};
use std::path::Path;

/// Incrementally builds a Blake3 content hash.
///
/// Callers feed the input file and every setting that changes the
/// resulting index, so a stored hash identifies one exact build.
#[derive(Debug, Default)]
pub struct ContentHasher {
    hasher: blake3::Hasher,
}

impl ContentHasher {
    /// Create an empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash the full contents of a file.
    pub fn file(mut self, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::io_with_path(e, path))?;
        self.hasher.update(&bytes);
        Ok(self)
    }

    /// Hash a labelled setting.
    ///
    /// Label and value are length-prefixed so adjacent fields cannot run
    /// together.
    pub fn field(mut self, label: &str, value: &str) -> Self {
        for part in [label, value] {
            self.hasher.update(&(part.len() as u64).to_le_bytes());
            self.hasher.update(part.as_bytes());
        }
        self
    }

    /// Finish and return the hex digest.
    pub fn finish(self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}
