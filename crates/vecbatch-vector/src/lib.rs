//! Batch embedding and vector indexing for vecbatch.
//!
//! This crate turns a JSON corpus into a persisted, similarity-searchable
//! index. Embedding and index structures come from pluggable capabilities;
//! the crate itself loads records, batches them, and saves and reloads the
//! result with a manifest.
//!
//! # Features
//!
//! - `vector-lancedb`: Enable LanceDB-based vector storage and ANN search
//! - `vector-fastembed`: Enable local embedding generation via fastembed
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     vecbatch-vector                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DataLoader + RecordFormatter (records → documents)         │
//! │  ├── MigrationFormatter, JsonFormatter, closures            │
//! │  └── UnspecifiedFormatter (unspecialized loader)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider trait                                    │
//! │  ├── MockEmbeddingProvider (always available)               │
//! │  └── FastEmbedProvider (feature: vector-fastembed)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexBackend + VectorIndex traits                          │
//! │  ├── SimpleIndexBackend (in-memory, JSON on disk)           │
//! │  └── LancedbBackend (feature: vector-lancedb)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  VectorIndexBuilder (seed + batched build and merge)        │
//! │  Persistence (manifest, compatibility and freshness)        │
//! │  similarity_search (pass-through query)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use vecbatch_vector::{
//!     DataLoader, MigrationFormatter, MockEmbeddingProvider, SimpleIndexBackend,
//!     VectorIndexBuilder, VectorSearchParams, similarity_search,
//! };
//! use std::sync::Arc;
//!
//! let documents = DataLoader::new("plans.json")
//!     .with_formatter(MigrationFormatter)
//!     .create_documents(None)?;
//!
//! let provider = Arc::new(MockEmbeddingProvider::new(384));
//! let backend = SimpleIndexBackend::new();
//! let index = VectorIndexBuilder::new(&backend, provider.clone())
//!     .build(documents)
//!     .await?;
//!
//! let params = VectorSearchParams::new("MySQL to PostgreSQL migration").with_limit(2);
//! let results = similarity_search(&index, provider.as_ref(), &params).await?;
//! for result in results.items {
//!     println!("{:.3}: {}", result.score, result.text);
//! }
//! ```

// Core modules (always available)
pub mod backend;
pub mod embedding;
pub mod types;

// Loading
pub mod formatter;
pub mod loader;

// Build, persist, query
pub mod builder;
pub mod persistence;
pub mod query;

// Feature-gated capability modules
#[cfg(feature = "vector-fastembed")]
pub mod fastembed;

#[cfg(feature = "vector-lancedb")]
pub mod lancedb;

// Re-exports: core types
pub use types::{
    Document, EmbeddedDocument, Record, VectorConfig, VectorIndexStats, VectorSearchParams,
    VectorSearchResult, VectorSearchResults,
};

// Re-exports: traits
pub use backend::{IndexBackend, VectorIndex};
pub use embedding::EmbeddingProvider;
pub use formatter::RecordFormatter;

// Re-exports: implementations
pub use backend::{SimpleIndexBackend, SimpleVectorIndex, cosine_similarity};
pub use embedding::{MockEmbeddingProvider, create_embedding_provider};
pub use formatter::{FormatterKind, JsonFormatter, MigrationFormatter, UnspecifiedFormatter};
pub use loader::{DataLoader, parse_records};

// Re-exports: build, persistence, query
pub use builder::{DEFAULT_BATCH_SIZE, VectorIndexBuilder};
pub use persistence::{IndexMetadata, is_index_fresh, load_index, save_index};
pub use query::{DEFAULT_K, DEFAULT_QUERY, similarity_search};

// Re-exports: feature-gated
#[cfg(feature = "vector-fastembed")]
pub use fastembed::FastEmbedProvider;

#[cfg(feature = "vector-lancedb")]
pub use lancedb::{LancedbBackend, LancedbIndex};
