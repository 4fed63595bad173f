//! Embedding provider trait, mock implementation and factory.
//!
//! # Providers
//!
//! - `MockEmbeddingProvider`: Deterministic fixed-dimension vectors for testing
//! - `FastEmbedProvider`: Local embedding via fastembed (requires `vector-fastembed` feature)

use crate::types::VectorConfig;
use async_trait::async_trait;
use std::sync::Arc;
use vecbatch_core::{Error, Result};

/// Trait for generating text embeddings.
///
/// Implementations wrap specific embedding libraries and provide a uniform
/// async interface. The model identity reported by [`model`](Self::model)
/// is recorded in every persisted index and must match at load time.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for a batch of texts.
    ///
    /// Default implementation calls `embed` for each text sequentially.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The embedding dimension.
    fn dimension(&self) -> usize;

    /// The provider name ("mock", "fastembed").
    fn name(&self) -> &str;

    /// The model identifier.
    fn model(&self) -> &str;
}

/// A mock embedding provider for testing.
///
/// Expands a blake3 digest of the text into a unit vector: equal texts map
/// to equal vectors, distinct texts to nearly orthogonal ones.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimension: usize,
    model: String,
}

impl MockEmbeddingProvider {
    /// Create a new mock provider with the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            model: "mock".to_string(),
        }
    }

    /// Report a different model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn deterministic_embedding(&self, text: &str) -> Vec<f32> {
        let mut bytes = vec![0u8; self.dimension * 4];
        blake3::Hasher::new()
            .update(text.as_bytes())
            .finalize_xof()
            .fill(&mut bytes);

        let mut embedding: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| {
                let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                (word as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect();

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut embedding {
                *val /= norm;
            }
        }

        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.deterministic_embedding(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| self.deterministic_embedding(t))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Create the embedding provider named by `config.provider`.
pub fn create_embedding_provider(config: &VectorConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "mock" => {
            if config.dimension == 0 {
                return Err(Error::config("mock provider needs a non-zero dimension"));
            }
            Ok(Arc::new(
                MockEmbeddingProvider::new(config.dimension).with_model(&config.model),
            ))
        }
        "fastembed" => create_fastembed(config),
        other => Err(Error::config(format!(
            "Unknown embedding provider: '{other}'. Supported: fastembed, mock"
        ))),
    }
}

#[cfg(feature = "vector-fastembed")]
fn create_fastembed(config: &VectorConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider =
        crate::fastembed::FastEmbedProvider::new(&config.model, config.cache_path.as_deref())?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "vector-fastembed"))]
fn create_fastembed(_config: &VectorConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    Err(Error::config(
        "fastembed provider requested but vecbatch was built without the `vector-fastembed` feature",
    ))
}

// ============================================================================
// Tests
// ============================================================================
