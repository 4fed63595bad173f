//! Batch index construction.
//!
//! [`VectorIndexBuilder`] turns a document set into one index:
//!
//! 1. embed the first `seed_size` documents and build the seed index;
//! 2. split the rest, in source order, into batches of `batch_size`;
//! 3. embed each batch, build a sub-index from it, merge it into the seed.
//!
//! Bounded batches cap how much the provider and backend hold at once.
//! Every step is awaited in order, so a failure anywhere fails the whole
//! build; the partially merged seed is dropped.

use crate::backend::{IndexBackend, VectorIndex};
use crate::embedding::EmbeddingProvider;
use crate::types::{Document, EmbeddedDocument, VectorIndexStats};
use std::sync::Arc;
use std::time::Instant;
use vecbatch_core::{Error, Result};

/// Default number of documents per sub-index.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Progress callback: `(documents processed so far, total documents)`.
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Builds an index from documents in fixed-size batches.
pub struct VectorIndexBuilder<'a, B: IndexBackend> {
    backend: &'a B,
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
    seed_size: usize,
    progress: Option<ProgressFn>,
}

impl<'a, B: IndexBackend> VectorIndexBuilder<'a, B> {
    /// Create a builder with default batch and seed sizes.
    pub fn new(backend: &'a B, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            backend,
            provider,
            batch_size: DEFAULT_BATCH_SIZE,
            seed_size: B::MIN_BUILD_SIZE,
            progress: None,
        }
    }

    /// Set the number of documents per sub-index.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the number of documents in the seed index.
    ///
    /// Values below the backend's minimum build size are raised to it.
    pub fn with_seed_size(mut self, seed_size: usize) -> Self {
        self.seed_size = seed_size.max(B::MIN_BUILD_SIZE);
        self
    }

    /// Report progress after the seed and after every merged batch.
    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Build an index holding exactly one entry per document.
    pub async fn build(&self, documents: Vec<Document>) -> Result<B::Index> {
        Ok(self.build_with_stats(documents).await?.0)
    }

    /// Build an index and report statistics.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the batch size is zero
    /// - [`Error::EmptyInput`] if there are fewer documents than the
    ///   backend's minimum build size
    /// - provider and backend errors, unchanged
    pub async fn build_with_stats(
        &self,
        documents: Vec<Document>,
    ) -> Result<(B::Index, VectorIndexStats)> {
        if self.batch_size == 0 {
            return Err(Error::config("batch size must be at least 1"));
        }

        let total = documents.len();
        if total < B::MIN_BUILD_SIZE {
            return Err(Error::empty_input(format!(
                "{} backend needs at least {} documents, got {total}",
                self.backend.name(),
                B::MIN_BUILD_SIZE
            )));
        }

        let start = Instant::now();
        log::info!(
            "Building {} index from {total} documents (seed {}, batch size {})",
            self.backend.name(),
            self.seed_size.min(total),
            self.batch_size
        );

        let mut remaining = documents.into_iter();

        let seed: Vec<Document> = remaining.by_ref().take(self.seed_size).collect();
        let mut processed = seed.len();
        let mut index = self.backend.create(self.embed(seed).await?).await?;
        self.report(processed, total);

        let mut batches_merged = 0;
        loop {
            let batch: Vec<Document> = remaining.by_ref().take(self.batch_size).collect();
            if batch.is_empty() {
                break;
            }
            let batch_len = batch.len();

            let sub_index = self.backend.create(self.embed(batch).await?).await?;
            self.backend.merge(&mut index, sub_index).await?;

            processed += batch_len;
            batches_merged += 1;
            log::debug!("Merged batch {batches_merged} ({batch_len} documents, {processed}/{total})");
            self.report(processed, total);
        }

        let documents_indexed = index.document_count().await?;
        if documents_indexed != total {
            return Err(Error::index(format!(
                "index holds {documents_indexed} entries after merging {total} documents"
            )));
        }

        let stats = VectorIndexStats {
            documents_indexed,
            batches_merged,
            embedding_dimension: index.dimension(),
            build_duration_ms: start.elapsed().as_millis() as u64,
        };
        log::info!(
            "Indexed {} documents in {} ms",
            stats.documents_indexed,
            stats.build_duration_ms
        );

        Ok((index, stats))
    }

    /// Embed one batch, checking the provider's output shape.
    async fn embed(&self, documents: Vec<Document>) -> Result<Vec<EmbeddedDocument>> {
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.provider.embed_batch(&texts).await?;

        if embeddings.len() != documents.len() {
            return Err(Error::embedding(format!(
                "{} returned {} vectors for {} texts",
                self.provider.name(),
                embeddings.len(),
                documents.len()
            )));
        }

        let dimension = self.provider.dimension();
        if let Some(bad) = embeddings.iter().find(|e| e.len() != dimension) {
            return Err(Error::embedding(format!(
                "{} returned a {}-dimensional vector, expected {dimension}",
                self.provider.name(),
                bad.len()
            )));
        }

        Ok(documents
            .into_iter()
            .zip(embeddings)
            .map(|(document, embedding)| EmbeddedDocument::new(document, embedding))
            .collect())
    }

    fn report(&self, processed: usize, total: usize) {
        if let Some(progress) = &self.progress {
            progress(processed, total);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
