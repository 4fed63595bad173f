//! Saving and reloading indexes.
//!
//! A persisted index is a directory holding the backend's own files plus a
//! `manifest.json` describing how the index was built. The manifest is
//! written last, so a directory without one never loads.
//!
//! Loading checks the manifest against the current backend and embedding
//! provider: vectors from one model are meaningless to another.

use crate::backend::{IndexBackend, VectorIndex};
use crate::embedding::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vecbatch_core::{Error, Result};

/// Manifest file name inside an index directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Manifest layout version this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

/// Metadata stored alongside a persisted index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Manifest layout version.
    pub format_version: u32,

    /// Backend that wrote the index files.
    pub backend: String,

    /// Embedding provider name.
    pub provider: String,

    /// Model identifier used for embeddings.
    pub model: String,

    /// Embedding dimension.
    pub embedding_dimension: usize,

    /// Number of entries in the index.
    pub document_count: usize,

    /// Content hash of the build inputs, for freshness checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    /// Build timestamp (RFC 3339).
    pub built_at: String,
}

/// Save `index` and its manifest into `dir`, creating the directory.
///
/// Saving again to the same directory replaces the previous index. The old
/// manifest is removed first, so an interrupted save never leaves a
/// manifest describing partly rewritten data.
pub async fn save_index<B: IndexBackend>(
    backend: &B,
    index: &B::Index,
    dir: &Path,
    provider: &dyn EmbeddingProvider,
    content_hash: Option<&str>,
) -> Result<IndexMetadata> {
    log::info!("Saving vector index to {}", dir.display());
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::persistence(format!("cannot create {}: {e}", dir.display())))?;

    let manifest = dir.join(MANIFEST_FILE);
    match std::fs::remove_file(&manifest) {
        Ok(()) => log::debug!("Removed previous manifest {}", manifest.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(Error::persistence(format!(
                "cannot remove {}: {e}",
                manifest.display()
            )));
        }
    }

    backend.save(index, dir).await?;

    let metadata = IndexMetadata {
        format_version: FORMAT_VERSION,
        backend: backend.name().to_string(),
        provider: provider.name().to_string(),
        model: provider.model().to_string(),
        embedding_dimension: index.dimension(),
        document_count: index.document_count().await?,
        content_hash: content_hash.map(String::from),
        built_at: chrono::Utc::now().to_rfc3339(),
    };
    save_metadata(&manifest, &metadata)?;
    log::info!("Saved {} entries", metadata.document_count);

    Ok(metadata)
}

/// Load an index saved by [`save_index`].
///
/// # Errors
///
/// - [`Error::Persistence`] if the manifest is missing, unreadable or of an
///   unsupported version, if the backend files cannot be read, or if the
///   entry count disagrees with the manifest
/// - [`Error::ConfigurationMismatch`] if the index was built by another
///   backend, provider, model, or embedding dimension
pub async fn load_index<B: IndexBackend>(
    backend: &B,
    dir: &Path,
    provider: &dyn EmbeddingProvider,
) -> Result<(B::Index, IndexMetadata)> {
    log::info!("Loading vector index from {}", dir.display());
    let metadata = load_metadata(&dir.join(MANIFEST_FILE))?;
    check_compatible(&metadata, backend.name(), provider)?;

    let index = backend.load(dir, metadata.embedding_dimension).await?;

    let count = index.document_count().await?;
    if count != metadata.document_count {
        return Err(Error::persistence(format!(
            "{} holds {count} entries, manifest records {}",
            dir.display(),
            metadata.document_count
        )));
    }

    Ok((index, metadata))
}

/// Check a manifest against the current backend and provider.
pub fn check_compatible(
    metadata: &IndexMetadata,
    backend: &str,
    provider: &dyn EmbeddingProvider,
) -> Result<()> {
    if metadata.backend != backend {
        return Err(Error::mismatch("backend", &metadata.backend, backend));
    }
    if metadata.provider != provider.name() {
        return Err(Error::mismatch(
            "provider",
            &metadata.provider,
            provider.name(),
        ));
    }
    if metadata.model != provider.model() {
        return Err(Error::mismatch("model", &metadata.model, provider.model()));
    }
    if metadata.embedding_dimension != provider.dimension() {
        return Err(Error::mismatch(
            "embedding_dimension",
            metadata.embedding_dimension.to_string(),
            provider.dimension().to_string(),
        ));
    }
    Ok(())
}

/// Check if an existing index is fresh.
///
/// Returns `true` if the manifest in `dir` exists and records
/// `current_hash`.
pub fn is_index_fresh(dir: &Path, current_hash: &str) -> bool {
    match load_metadata(&dir.join(MANIFEST_FILE)) {
        Ok(metadata) => metadata.content_hash.as_deref() == Some(current_hash),
        Err(_) => false,
    }
}

/// Save index metadata to a JSON file.
pub fn save_metadata(metadata_path: &Path, metadata: &IndexMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    std::fs::write(metadata_path, json).map_err(|e| {
        Error::persistence(format!("cannot write {}: {e}", metadata_path.display()))
    })
}

/// Load index metadata from a JSON file.
pub fn load_metadata(metadata_path: &Path) -> Result<IndexMetadata> {
    let json = std::fs::read_to_string(metadata_path).map_err(|e| {
        Error::persistence(format!("cannot read {}: {e}", metadata_path.display()))
    })?;
    let metadata: IndexMetadata = serde_json::from_str(&json).map_err(|e| {
        Error::persistence(format!("corrupt manifest {}: {e}", metadata_path.display()))
    })?;

    if metadata.format_version != FORMAT_VERSION {
        return Err(Error::persistence(format!(
            "{} has format version {}, this build reads version {FORMAT_VERSION}",
            metadata_path.display(),
            metadata.format_version
        )));
    }

    Ok(metadata)
}

// ============================================================================
// Tests
// ============================================================================
