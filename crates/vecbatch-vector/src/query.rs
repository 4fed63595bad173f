//! Similarity search over a built or reloaded index.
//!
//! Pass-through: the query text is embedded with the same provider that
//! built the index and the backend's own ranking is returned unchanged.

use crate::backend::VectorIndex;
use crate::embedding::EmbeddingProvider;
use crate::types::{VectorSearchParams, VectorSearchResults};
use vecbatch_core::{Error, Result};

/// Example query run after an index is built.
pub const DEFAULT_QUERY: &str = "MySQL to PostgreSQL migration";

/// Default number of results.
pub const DEFAULT_K: usize = 2;

/// Embed `params.query` and return the nearest entries of `index`.
///
/// `params.limit` defaults to [`DEFAULT_K`].
pub async fn similarity_search<I: VectorIndex + ?Sized>(
    index: &I,
    provider: &dyn EmbeddingProvider,
    params: &VectorSearchParams,
) -> Result<VectorSearchResults> {
    if params.query.trim().is_empty() {
        return Err(Error::config("query text must not be empty"));
    }

    let limit = params.limit.unwrap_or(DEFAULT_K);
    if limit == 0 {
        return Ok(VectorSearchResults::empty(&params.query, index.name()));
    }

    let embedding = provider.embed(&params.query).await?;
    let items = index.search(&embedding, limit).await?;
    log::debug!(
        "Query {:?} returned {} of {limit} requested results",
        params.query,
        items.len()
    );

    Ok(VectorSearchResults {
        query: params.query.clone(),
        total: items.len(),
        items,
        backend: index.name().to_string(),
    })
}
