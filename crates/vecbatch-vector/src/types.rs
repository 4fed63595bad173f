//! Common types for the vector pipeline.
//!
//! These types are shared by loaders, embedding providers, index backends
//! and the CLI, and are always available regardless of feature flags.

use serde::{Deserialize, Serialize};

/// One JSON object from the input corpus, kept verbatim.
pub type Record = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Configuration
// ============================================================================

/// Vector pipeline configuration.
///
/// Controls backend selection, embedding model and batching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorConfig {
    /// Backend type: "simple" or "lancedb".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Embedding provider: "fastembed" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Embedding model name (e.g., "all-minilm-l6-v2").
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding dimension for the mock provider (fastembed probes its own).
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Path to cache directory for embedding models.
    pub cache_path: Option<String>,

    /// Documents per sub-index.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Documents in the seed index. Raised to the backend minimum if lower.
    #[serde(default)]
    pub seed_size: usize,
}

fn default_backend() -> String {
    "simple".to_string()
}

fn default_provider() -> String {
    if cfg!(feature = "vector-fastembed") {
        "fastembed".to_string()
    } else {
        "mock".to_string()
    }
}

fn default_model() -> String {
    "all-minilm-l6-v2".to_string()
}

fn default_dimension() -> usize {
    384
}

fn default_batch_size() -> usize {
    crate::builder::DEFAULT_BATCH_SIZE
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            provider: default_provider(),
            model: default_model(),
            dimension: default_dimension(),
            cache_path: None,
            batch_size: default_batch_size(),
            seed_size: 0,
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A record prepared for embedding.
///
/// `text` is synthesized by a [`RecordFormatter`](crate::RecordFormatter);
/// `metadata` is the source record, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Text to be embedded.
    pub text: String,

    /// The full source record.
    pub metadata: Record,
}

impl Document {
    /// Create a new document.
    pub fn new(text: impl Into<String>, metadata: Record) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// A document with its computed embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedDocument {
    /// The original document.
    pub document: Document,

    /// The embedding vector.
    pub embedding: Vec<f32>,
}

impl EmbeddedDocument {
    /// Create a new embedded document.
    pub fn new(document: Document, embedding: Vec<f32>) -> Self {
        Self {
            document,
            embedding,
        }
    }

    /// The embedding dimension.
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

// ============================================================================
// Search types
// ============================================================================

/// Parameters for a similarity search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorSearchParams {
    /// Search query string (will be embedded).
    pub query: String,

    /// Maximum results to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl VectorSearchParams {
    /// Create search params with a query string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A single similarity search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchResult {
    /// Text that was embedded for this entry.
    pub text: String,

    /// Similarity score, higher is more similar.
    pub score: f32,

    /// Raw distance from the query vector in the backend's metric.
    pub distance: f32,

    /// Source record of the hit.
    pub metadata: Record,
}

/// Collection of similarity search hits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchResults {
    /// Query that produced these results.
    pub query: String,

    /// Hits ordered by score (highest first).
    pub items: Vec<VectorSearchResult>,

    /// Number of hits returned.
    pub total: usize,

    /// Backend that executed the search.
    pub backend: String,
}

impl VectorSearchResults {
    /// Create empty results.
    pub fn empty(query: &str, backend: &str) -> Self {
        Self {
            query: query.to_string(),
            items: Vec::new(),
            total: 0,
            backend: backend.to_string(),
        }
    }
}

// ============================================================================
// Index statistics
// ============================================================================

/// Statistics from an index build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndexStats {
    /// Number of documents indexed.
    pub documents_indexed: usize,

    /// Number of sub-indexes merged into the seed index.
    pub batches_merged: usize,

    /// Embedding dimension used.
    pub embedding_dimension: usize,

    /// Build duration in milliseconds.
    pub build_duration_ms: u64,
}

// ============================================================================
// Tests
// ============================================================================
