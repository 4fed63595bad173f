//! LanceDB vector backend.
//!
//! Provides approximate nearest neighbor (ANN) search via LanceDB,
//! an embedded vector database built on Apache Arrow and Lance format.
//!
//! Sub-indexes are tables in a staging database owned by the backend and
//! removed with it. Merging appends the source table's rows to the target
//! table; saving copies the rows into a `vectors` table in the output
//! directory.
//!
//! # Schema
//!
//! | Column | Type | Purpose |
//! |--------|------|---------|
//! | `text` | Utf8 | Embedded text |
//! | `metadata` | Utf8 | JSON-serialized source record |
//! | `vector` | FixedSizeList<Float32> | Embedding vector |
//!
//! # Feature Gate
//!
//! This module requires the `vector-lancedb` feature.

use crate::backend::{IndexBackend, VectorIndex};
use crate::types::{EmbeddedDocument, Record, VectorSearchResult};
use arrow_array::{
    Array, FixedSizeListArray, Float32Array, RecordBatch, RecordBatchIterator, StringArray,
};
use arrow_schema::{DataType, Field, Schema};
use async_trait::async_trait;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use vecbatch_core::{Error, Result};

/// Table name inside a saved index directory.
pub const LANCEDB_TABLE: &str = "vectors";

/// An index stored in one LanceDB table.
#[derive(Clone)]
pub struct LancedbIndex {
    table: lancedb::Table,
    dimension: usize,
}

#[async_trait]
impl VectorIndex for LancedbIndex {
    async fn search(&self, query: &[f32], limit: usize) -> Result<Vec<VectorSearchResult>> {
        if query.len() != self.dimension {
            return Err(Error::index(format!(
                "query has dimension {}, index expects {}",
                query.len(),
                self.dimension
            )));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let results = self
            .table
            .vector_search(query.to_vec())
            .map_err(|e| Error::index(format!("Failed to create vector search: {e}")))?
            .limit(limit)
            .execute()
            .await
            .map_err(|e| Error::index(format!("Vector search failed: {e}")))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(|e| Error::index(format!("Failed to collect results: {e}")))?;

        let mut items = Vec::new();
        for batch in &batches {
            items.extend(parse_search_results(batch)?);
        }

        items.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items.truncate(limit);

        Ok(items)
    }

    async fn document_count(&self) -> Result<usize> {
        self.table
            .count_rows(None)
            .await
            .map_err(|e| Error::index(format!("Failed to count rows: {e}")))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "lancedb"
    }
}

impl std::fmt::Debug for LancedbIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LancedbIndex")
            .field("table", &self.table.name())
            .field("dimension", &self.dimension)
            .finish()
    }
}

/// LanceDB-backed index capability.
pub struct LancedbBackend {
    staging: TempDir,
    connection: lancedb::Connection,
    next_table: AtomicUsize,
}

impl LancedbBackend {
    /// Create a backend with a fresh staging database.
    pub async fn new() -> Result<Self> {
        let staging = tempfile::Builder::new()
            .prefix("vecbatch-lancedb-")
            .tempdir()?;
        let connection = connect(staging.path()).await?;

        Ok(Self {
            staging,
            connection,
            next_table: AtomicUsize::new(0),
        })
    }

    fn staging_table_name(&self) -> String {
        format!("batch_{}", self.next_table.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Debug for LancedbBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LancedbBackend")
            .field("staging", &self.staging.path())
            .field("tables", &self.next_table.load(Ordering::Relaxed))
            .finish()
    }
}

#[async_trait]
impl IndexBackend for LancedbBackend {
    type Index = LancedbIndex;

    fn name(&self) -> &str {
        "lancedb"
    }

    async fn create(&self, documents: Vec<EmbeddedDocument>) -> Result<LancedbIndex> {
        let dimension = documents
            .first()
            .map(EmbeddedDocument::dimension)
            .ok_or_else(|| Error::index("cannot build an index from zero documents"))?;

        let batch = build_record_batch(&documents, dimension)?;
        let table = create_table(
            &self.connection,
            &self.staging_table_name(),
            vec![batch],
            dimension,
        )
        .await
        .map_err(|e| Error::index(format!("Failed to create LanceDB table: {e}")))?;

        Ok(LancedbIndex { table, dimension })
    }

    async fn merge(&self, target: &mut LancedbIndex, source: LancedbIndex) -> Result<()> {
        if source.dimension != target.dimension {
            return Err(Error::index(format!(
                "cannot merge a {}-dimensional index into a {}-dimensional one",
                source.dimension, target.dimension
            )));
        }

        let batches = read_all(&source.table)
            .await
            .map_err(|e| Error::index(format!("Failed to read source table: {e}")))?;
        let reader = RecordBatchIterator::new(
            batches.into_iter().map(Ok),
            make_schema(target.dimension),
        );

        target
            .table
            .add(Box::new(reader))
            .execute()
            .await
            .map_err(|e| Error::index(format!("Failed to append rows: {e}")))?;

        Ok(())
    }

    async fn save(&self, index: &LancedbIndex, dir: &Path) -> Result<()> {
        let batches = read_all(&index.table)
            .await
            .map_err(|e| Error::persistence(format!("Failed to read index rows: {e}")))?;

        let connection = connect(dir).await?;
        create_table(&connection, LANCEDB_TABLE, batches, index.dimension)
            .await
            .map_err(|e| {
                Error::persistence(format!("Failed to write {}: {e}", dir.display()))
            })?;

        Ok(())
    }

    async fn load(&self, dir: &Path, dimension: usize) -> Result<LancedbIndex> {
        let connection = connect(dir).await?;
        let table = connection
            .open_table(LANCEDB_TABLE)
            .execute()
            .await
            .map_err(|e| {
                Error::persistence(format!("Failed to open table in {}: {e}", dir.display()))
            })?;

        let schema = table
            .schema()
            .await
            .map_err(|e| Error::persistence(format!("Failed to read table schema: {e}")))?;
        let stored = match schema.field_with_name("vector").map(|f| f.data_type()) {
            Ok(DataType::FixedSizeList(_, size)) => *size as usize,
            _ => {
                return Err(Error::persistence(format!(
                    "{} has no vector column",
                    dir.display()
                )));
            }
        };
        if stored != dimension {
            return Err(Error::persistence(format!(
                "{} holds {stored}-dimensional vectors, expected {dimension}",
                dir.display()
            )));
        }

        Ok(LancedbIndex { table, dimension })
    }
}

// ============================================================================
// Connection and table helpers
// ============================================================================

async fn connect(dir: &Path) -> Result<lancedb::Connection> {
    let uri = dir
        .to_str()
        .ok_or_else(|| Error::persistence(format!("non-UTF-8 path: {}", dir.display())))?;

    lancedb::connect(uri)
        .execute()
        .await
        .map_err(|e| Error::persistence(format!("Failed to connect to LanceDB: {e}")))
}

async fn create_table(
    connection: &lancedb::Connection,
    name: &str,
    batches: Vec<RecordBatch>,
    dimension: usize,
) -> lancedb::Result<lancedb::Table> {
    let reader = RecordBatchIterator::new(batches.into_iter().map(Ok), make_schema(dimension));

    connection
        .create_table(name, Box::new(reader))
        .mode(lancedb::database::CreateTableMode::Overwrite)
        .execute()
        .await
}

/// Read every row of a table, in storage order.
async fn read_all(table: &lancedb::Table) -> std::result::Result<Vec<RecordBatch>, String> {
    let stream = table.query().execute().await.map_err(|e| e.to_string())?;
    stream.try_collect().await.map_err(|e| e.to_string())
}

// ============================================================================
// Arrow schema and batch construction
// ============================================================================

/// Create the Arrow schema for the vector table.
fn make_schema(dimension: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("text", DataType::Utf8, false),
        Field::new("metadata", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                dimension as i32,
            ),
            false,
        ),
    ]))
}

/// Build an Arrow RecordBatch from embedded documents.
fn build_record_batch(documents: &[EmbeddedDocument], dimension: usize) -> Result<RecordBatch> {
    let schema = make_schema(dimension);

    let texts: Vec<&str> = documents.iter().map(|d| d.document.text.as_str()).collect();
    let metadata = documents
        .iter()
        .map(|d| serde_json::to_string(&d.document.metadata))
        .collect::<serde_json::Result<Vec<String>>>()?;
    let metadata_refs: Vec<&str> = metadata.iter().map(String::as_str).collect();

    // Flatten embeddings into a single Vec<f32>
    let all_values: Vec<f32> = documents
        .iter()
        .flat_map(|d| d.embedding.iter().copied())
        .collect();

    let vector_array = FixedSizeListArray::try_new(
        Arc::new(Field::new("item", DataType::Float32, true)),
        dimension as i32,
        Arc::new(Float32Array::from(all_values)),
        None,
    )
    .map_err(|e| Error::index(format!("Failed to create vector array: {e}")))?;

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(texts)),
            Arc::new(StringArray::from(metadata_refs)),
            Arc::new(vector_array),
        ],
    )
    .map_err(|e| Error::index(format!("Failed to create RecordBatch: {e}")))
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .ok_or_else(|| Error::index(format!("Missing '{name}' column in results")))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::index(format!("'{name}' column is not StringArray")))
}

/// Parse search results from a RecordBatch.
fn parse_search_results(batch: &RecordBatch) -> Result<Vec<VectorSearchResult>> {
    let text_col = string_column(batch, "text")?;
    let metadata_col = string_column(batch, "metadata")?;
    let distance_col = batch
        .column_by_name("_distance")
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>());

    let mut results = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        let metadata: Record = serde_json::from_str(metadata_col.value(i))
            .map_err(|e| Error::index(format!("corrupt metadata in row {i}: {e}")))?;

        let distance = distance_col.map(|c| c.value(i)).unwrap_or(0.0);
        // Distance-to-score normalization: 1/(1 + distance)
        let score = 1.0 / (1.0 + distance);

        results.push(VectorSearchResult {
            text: text_col.value(i).to_string(),
            score,
            distance,
            metadata,
        });
    }

    Ok(results)
}

// ============================================================================
// Tests
// ============================================================================
