//! Vector index traits and the in-memory simple backend.
//!
//! An [`IndexBackend`] is the index capability: it builds an index from
//! embedded documents, merges one index into another, and saves or loads
//! the backend's native files in a directory. The index it produces
//! implements [`VectorIndex`] for search.
//!
//! [`SimpleIndexBackend`] keeps every entry in memory and searches by brute
//! force. It needs no external services, which makes it the default backend
//! and the one used by tests.

use crate::types::{EmbeddedDocument, VectorSearchResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vecbatch_core::{Error, Result};

/// A searchable index of embedded documents.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `limit` entries nearest to `query`, best first.
    async fn search(&self, query: &[f32], limit: usize) -> Result<Vec<VectorSearchResult>>;

    /// Number of entries in the index.
    async fn document_count(&self) -> Result<usize>;

    /// Vector dimension of every entry.
    fn dimension(&self) -> usize;

    /// Name of the backend that owns this index.
    fn name(&self) -> &str;
}

/// An index capability: construction, merge and persistence.
#[async_trait]
pub trait IndexBackend: Send + Sync {
    /// The index type this backend produces.
    type Index: VectorIndex;

    /// Fewest documents [`create`](Self::create) accepts.
    const MIN_BUILD_SIZE: usize = 1;

    /// Backend name, recorded in index manifests.
    fn name(&self) -> &str;

    /// Build a new index holding exactly `documents`.
    async fn create(&self, documents: Vec<EmbeddedDocument>) -> Result<Self::Index>;

    /// Move every entry of `source` into `target`.
    async fn merge(&self, target: &mut Self::Index, source: Self::Index) -> Result<()>;

    /// Write `index` into the existing directory `dir`, replacing earlier files.
    async fn save(&self, index: &Self::Index, dir: &Path) -> Result<()>;

    /// Read an index of vectors of `dimension` back from `dir`.
    async fn load(&self, dir: &Path, dimension: usize) -> Result<Self::Index>;
}

/// Cosine similarity of two vectors; 0.0 when either is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn check_dimensions(documents: &[EmbeddedDocument], dimension: usize) -> Result<()> {
    match documents.iter().position(|d| d.dimension() != dimension) {
        Some(i) => Err(Error::index(format!(
            "entry {i} has dimension {}, index expects {dimension}",
            documents[i].dimension()
        ))),
        None => Ok(()),
    }
}

// ============================================================================
// Simple backend
// ============================================================================

/// File holding the simple backend's entries.
pub const SIMPLE_INDEX_FILE: &str = "vectors.json";

/// In-memory index with brute-force cosine search.
///
/// Entries keep insertion order; equal scores rank in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleVectorIndex {
    dimension: usize,
    entries: Vec<EmbeddedDocument>,
}

impl SimpleVectorIndex {
    /// All entries in insertion order.
    pub fn entries(&self) -> &[EmbeddedDocument] {
        &self.entries
    }
}

#[async_trait]
impl VectorIndex for SimpleVectorIndex {
    async fn search(&self, query: &[f32], limit: usize) -> Result<Vec<VectorSearchResult>> {
        if query.len() != self.dimension {
            return Err(Error::index(format!(
                "query has dimension {}, index expects {}",
                query.len(),
                self.dimension
            )));
        }

        let mut scored: Vec<(f32, &EmbeddedDocument)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(query, &entry.embedding), entry))
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(score, entry)| VectorSearchResult {
                text: entry.document.text.clone(),
                score,
                distance: 1.0 - score,
                metadata: entry.document.metadata.clone(),
            })
            .collect())
    }

    async fn document_count(&self) -> Result<usize> {
        Ok(self.entries.len())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "simple"
    }
}

/// Backend producing [`SimpleVectorIndex`] values persisted as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleIndexBackend;

impl SimpleIndexBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IndexBackend for SimpleIndexBackend {
    type Index = SimpleVectorIndex;

    fn name(&self) -> &str {
        "simple"
    }

    async fn create(&self, documents: Vec<EmbeddedDocument>) -> Result<SimpleVectorIndex> {
        let dimension = documents
            .first()
            .map(EmbeddedDocument::dimension)
            .ok_or_else(|| Error::index("cannot build an index from zero documents"))?;
        check_dimensions(&documents, dimension)?;

        Ok(SimpleVectorIndex {
            dimension,
            entries: documents,
        })
    }

    async fn merge(&self, target: &mut SimpleVectorIndex, source: SimpleVectorIndex) -> Result<()> {
        if source.dimension != target.dimension {
            return Err(Error::index(format!(
                "cannot merge a {}-dimensional index into a {}-dimensional one",
                source.dimension, target.dimension
            )));
        }
        target.entries.extend(source.entries);
        Ok(())
    }

    async fn save(&self, index: &SimpleVectorIndex, dir: &Path) -> Result<()> {
        let path = dir.join(SIMPLE_INDEX_FILE);
        let json = serde_json::to_string(index)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| Error::persistence(format!("cannot write {}: {e}", path.display())))
    }

    async fn load(&self, dir: &Path, dimension: usize) -> Result<SimpleVectorIndex> {
        let path = dir.join(SIMPLE_INDEX_FILE);
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::persistence(format!("cannot read {}: {e}", path.display())))?;
        let index: SimpleVectorIndex = serde_json::from_str(&json)
            .map_err(|e| Error::persistence(format!("corrupt {}: {e}", path.display())))?;

        if index.dimension != dimension {
            return Err(Error::persistence(format!(
                "{} holds {}-dimensional vectors, expected {dimension}",
                path.display(),
                index.dimension
            )));
        }
        check_dimensions(&index.entries, dimension)
            .map_err(|e| Error::persistence(format!("corrupt {}: {e}", path.display())))?;

        Ok(index)
    }
}

// ============================================================================
// Tests
// ============================================================================
