//! The vecbatch application: command dispatch and the index pipeline.
//!
//! `vecbatch index` loads the corpus, builds the index in batches, saves
//! it, reloads it from disk, and runs one example query against the
//! reloaded copy. `vecbatch search` runs only the last two steps.

use crate::cli::{CliArgs, Command, IndexArgs, SearchArgs};
use crate::config::VecbatchConfig;
use crate::config_handlers;
use crate::progress::BuildProgress;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vecbatch_core::util::paths::{expand_tilde, non_empty_path};
use vecbatch_core::{ContentHasher, Error, Result};
use vecbatch_vector::{
    DataLoader, EmbeddingProvider, FormatterKind, IndexBackend, SimpleIndexBackend, VectorConfig,
    VectorIndexBuilder, VectorSearchParams, VectorSearchResults, create_embedding_provider,
    is_index_fresh, load_index, save_index, similarity_search,
};

// ============================================================================
// Resolved settings
// ============================================================================

/// Settings for one `vecbatch index` run: flags over config.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    /// JSON corpus.
    pub input: PathBuf,
    /// Index directory.
    pub output: PathBuf,
    /// Record formatter.
    pub loader: FormatterKind,
    /// Record limit.
    pub limit: Option<usize>,
    /// Provider, backend and batching.
    pub vector: VectorConfig,
    /// Example query.
    pub query: VectorSearchParams,
    /// Rebuild even when fresh.
    pub force: bool,
    /// Only report freshness.
    pub check: bool,
}

impl IndexSettings {
    /// Merge command-line flags over the loaded configuration.
    pub fn resolve(config: &VecbatchConfig, args: IndexArgs) -> Result<Self> {
        let input = args
            .input
            .map(expand_tilde)
            .or_else(|| non_empty_path(config.input.path.as_deref()))
            .ok_or_else(|| Error::config("no input file: pass --input or set input.path"))?;
        let output = args
            .output
            .map(expand_tilde)
            .or_else(|| non_empty_path(config.index.path.as_deref()))
            .ok_or_else(|| Error::config("no output directory: pass --output or set index.path"))?;

        let loader = match args.loader {
            Some(name) => name.parse::<FormatterKind>()?,
            None => config.input.loader,
        };

        let mut vector = overlay_vector(&config.vector, args.model, args.provider, args.backend);
        if let Some(batch_size) = args.batch_size {
            vector.batch_size = batch_size;
        }

        let query = VectorSearchParams::new(args.query.unwrap_or_else(|| config.query.text.clone()))
            .with_limit(args.k.unwrap_or(config.query.k));

        Ok(Self {
            input,
            output,
            loader,
            limit: args.limit.or(config.input.limit),
            vector,
            query,
            force: args.force,
            check: args.check,
        })
    }

    /// Hash of everything that determines the built index.
    ///
    /// Batch sizes are left out: they never change the index contents.
    pub fn content_hash(&self) -> Result<String> {
        let hasher = ContentHasher::new()
            .file(&self.input)
            .map_err(|e| Error::malformed_input(e.to_string()))?;

        Ok(hasher
            .field("loader", self.loader.as_str())
            .field("limit", &self.limit.map_or_else(String::new, |n| n.to_string()))
            .field("backend", &self.vector.backend)
            .field("provider", &self.vector.provider)
            .field("model", &self.vector.model)
            .field("dimension", &self.vector.dimension.to_string())
            .finish())
    }
}

/// Result of `vecbatch index`.
#[derive(Debug)]
pub enum IndexOutcome {
    /// `--check` ran; nothing was built.
    Checked {
        /// Whether the saved index matches the current inputs.
        fresh: bool,
    },
    /// The index was built (or reused because it was fresh) and queried.
    Queried {
        /// Whether a build ran.
        rebuilt: bool,
        /// Example query results against the reloaded index.
        results: VectorSearchResults,
    },
}

// ============================================================================
// Pipeline
// ============================================================================

/// Build step of the pipeline.
struct BuildJob {
    input: PathBuf,
    loader: FormatterKind,
    limit: Option<usize>,
    batch_size: usize,
    seed_size: usize,
    content_hash: String,
    quiet: bool,
}

/// One run against an index directory: optional build, then reload and query.
struct Job {
    index_dir: PathBuf,
    build: Option<BuildJob>,
    params: VectorSearchParams,
}

impl BuildJob {
    async fn run<B: IndexBackend>(
        &self,
        backend: &B,
        provider: Arc<dyn EmbeddingProvider>,
        output: &std::path::Path,
    ) -> Result<()> {
        let documents = DataLoader::new(&self.input)
            .with_formatter(self.loader)
            .create_documents(self.limit)?;

        let progress = BuildProgress::new(documents.len(), self.quiet);
        let sink = progress.clone();
        let built = VectorIndexBuilder::new(backend, provider.clone())
            .with_batch_size(self.batch_size)
            .with_seed_size(self.seed_size)
            .with_progress(move |processed, total| sink.update(processed, total))
            .build_with_stats(documents)
            .await;

        let (index, stats) = match built {
            Ok(built) => {
                progress.finish();
                built
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };
        log::info!(
            "Built {} index: {} documents, {} batches merged, {} ms",
            backend.name(),
            stats.documents_indexed,
            stats.batches_merged,
            stats.build_duration_ms
        );

        save_index(
            backend,
            &index,
            output,
            provider.as_ref(),
            Some(&self.content_hash),
        )
        .await?;
        Ok(())
    }
}

impl Job {
    async fn run<B: IndexBackend>(
        &self,
        backend: &B,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<VectorSearchResults> {
        if let Some(build) = &self.build {
            build.run(backend, provider.clone(), &self.index_dir).await?;
        }

        let (index, metadata) = load_index(backend, &self.index_dir, provider.as_ref()).await?;
        log::info!(
            "Loaded {} entries from {} (built {})",
            metadata.document_count,
            self.index_dir.display(),
            metadata.built_at
        );

        similarity_search(&index, provider.as_ref(), &self.params).await
    }

    /// Run against the backend named in `config`.
    async fn dispatch(
        &self,
        config: &VectorConfig,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<VectorSearchResults> {
        match config.backend.as_str() {
            "simple" => self.run(&SimpleIndexBackend::new(), provider).await,
            "lancedb" => self.run_lancedb(provider).await,
            other => Err(Error::config(format!(
                "Unknown backend: '{other}'. Supported: simple, lancedb"
            ))),
        }
    }

    #[cfg(feature = "vector-lancedb")]
    async fn run_lancedb(&self, provider: Arc<dyn EmbeddingProvider>) -> Result<VectorSearchResults> {
        let backend = vecbatch_vector::LancedbBackend::new().await?;
        self.run(&backend, provider).await
    }

    #[cfg(not(feature = "vector-lancedb"))]
    async fn run_lancedb(&self, _provider: Arc<dyn EmbeddingProvider>) -> Result<VectorSearchResults> {
        Err(Error::config(
            "lancedb backend requested but vecbatch was built without the `vector-lancedb` feature",
        ))
    }
}

// ============================================================================
// VecbatchCli
// ============================================================================

/// The vecbatch application.
pub struct VecbatchCli {
    config: VecbatchConfig,
    version: String,
}

impl VecbatchCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = VecbatchConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create an application with an already loaded config.
    pub fn new(config: VecbatchConfig) -> Self {
        Self {
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the loaded config.
    pub fn config(&self) -> &VecbatchConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Records from the `log` facade used by the library crates are bridged.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Index(index_args)) => {
                match self.index(index_args, args.quiet).await? {
                    IndexOutcome::Checked { fresh } => {
                        println!("{}", if fresh { "fresh" } else { "stale" });
                    }
                    IndexOutcome::Queried { results, .. } => print_results(&results)?,
                }
                Ok(())
            }
            Some(Command::Search(search_args)) => {
                let results = self.search(search_args).await?;
                print_results(&results)
            }
            Some(Command::Version) => {
                println!("vecbatch {}", self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("vecbatch {}: use --help for usage", self.version);
                Ok(())
            }
        }
    }

    /// Build (unless fresh), save, reload and query an index.
    pub async fn index(&self, args: IndexArgs, quiet: bool) -> Result<IndexOutcome> {
        let settings = IndexSettings::resolve(&self.config, args)?;
        let content_hash = settings.content_hash()?;
        let fresh = is_index_fresh(&settings.output, &content_hash);

        if settings.check {
            log::info!(
                "Index at {} is {}",
                settings.output.display(),
                if fresh { "fresh" } else { "stale" }
            );
            return Ok(IndexOutcome::Checked { fresh });
        }

        let rebuild = settings.force || !fresh;
        if !rebuild {
            log::info!(
                "Index at {} is up to date; use --force to rebuild",
                settings.output.display()
            );
        }

        let provider = create_embedding_provider(&settings.vector)?;
        let job = Job {
            index_dir: settings.output.clone(),
            build: rebuild.then(|| BuildJob {
                input: settings.input.clone(),
                loader: settings.loader,
                limit: settings.limit,
                batch_size: settings.vector.batch_size,
                seed_size: settings.vector.seed_size,
                content_hash,
                quiet,
            }),
            params: settings.query.clone(),
        };

        log::info!("Indexing into {}", settings.output.display());
        let results = job.dispatch(&settings.vector, provider).await?;
        Ok(IndexOutcome::Queried { rebuilt: rebuild, results })
    }

    /// Reload a saved index and query it.
    pub async fn search(&self, args: SearchArgs) -> Result<VectorSearchResults> {
        let index_dir = args
            .index
            .map(expand_tilde)
            .or_else(|| non_empty_path(self.config.index.path.as_deref()))
            .ok_or_else(|| Error::config("no index directory: pass --index or set index.path"))?;

        let params = VectorSearchParams::new(
            args.query
                .unwrap_or_else(|| self.config.query.text.clone()),
        )
        .with_limit(args.k.unwrap_or(self.config.query.k));

        let vector = overlay_vector(&self.config.vector, args.model, args.provider, args.backend);
        let provider = create_embedding_provider(&vector)?;
        let job = Job {
            index_dir,
            build: None,
            params,
        };
        log::info!("Searching index at {}", job.index_dir.display());
        job.dispatch(&vector, provider).await
    }
}

/// Apply `--model`, `--provider` and `--backend` over the configured values.
fn overlay_vector(
    base: &VectorConfig,
    model: Option<String>,
    provider: Option<String>,
    backend: Option<String>,
) -> VectorConfig {
    let mut vector = base.clone();
    if let Some(model) = model {
        vector.model = model;
    }
    if let Some(provider) = provider {
        vector.provider = provider;
    }
    if let Some(backend) = backend {
        vector.backend = backend;
    }
    vector
}

fn print_results(results: &VectorSearchResults) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::{Value, json};
    use std::path::Path;
    use tempfile::TempDir;
    use vecbatch_vector::persistence::{MANIFEST_FILE, load_metadata};

    fn mock_config() -> VecbatchConfig {
        VecbatchConfig {
            vector: VectorConfig {
                provider: "mock".to_string(),
                model: "mock-minilm".to_string(),
                dimension: 64,
                batch_size: 3,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn write_corpus(dir: &Path, records: usize) -> PathBuf {
        let plans: Vec<Value> = (0..records)
            .map(|i| {
                json!({
                    "id": i,
                    "source": {"type": if i % 2 == 0 { "MySQL" } else { "Oracle" }},
                    "destination": {"type": "PostgreSQL"},
                    "transformation": format!("step {i}"),
                })
            })
            .collect();
        let path = dir.join("plans.json");
        std::fs::write(&path, serde_json::to_string(&plans).unwrap()).unwrap();
        path
    }

    fn index_args(input: &Path, output: &Path) -> IndexArgs {
        IndexArgs {
            input: Some(input.to_path_buf()),
            output: Some(output.to_path_buf()),
            ..Default::default()
        }
    }

    fn queried(outcome: IndexOutcome) -> (bool, VectorSearchResults) {
        match outcome {
            IndexOutcome::Queried { rebuilt, results } => (rebuilt, results),
            other => panic!("expected query results, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let mut config = mock_config();
        config.input.path = Some("/config/plans.json".to_string());
        config.index.path = Some("/config/index".to_string());

        let args = IndexArgs {
            output: Some(PathBuf::from("/flag/index")),
            loader: Some("json".to_string()),
            batch_size: Some(9),
            k: Some(5),
            ..Default::default()
        };
        let settings = IndexSettings::resolve(&config, args).unwrap();

        assert_eq!(settings.input, PathBuf::from("/config/plans.json"));
        assert_eq!(settings.output, PathBuf::from("/flag/index"));
        assert_eq!(settings.loader, FormatterKind::Json);
        assert_eq!(settings.vector.batch_size, 9);
        assert_eq!(settings.query.limit, Some(5));
        assert_eq!(settings.query.query, "MySQL to PostgreSQL migration");
    }

    #[test]
    fn test_resolve_requires_input() {
        let args = IndexArgs {
            output: Some(PathBuf::from("out")),
            ..Default::default()
        };
        let err = IndexSettings::resolve(&mock_config(), args).unwrap_err();
        assert!(err.to_string().contains("--input"));
    }

    #[test]
    fn test_resolve_rejects_unknown_loader() {
        let args = IndexArgs {
            input: Some(PathBuf::from("in.json")),
            output: Some(PathBuf::from("out")),
            loader: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(IndexSettings::resolve(&mock_config(), args).is_err());
    }

    #[test]
    fn test_content_hash_tracks_inputs() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 4);
        let out = dir.path().join("index");

        let base = IndexSettings::resolve(&mock_config(), index_args(&input, &out)).unwrap();
        let hash = base.content_hash().unwrap();
        assert_eq!(hash, base.content_hash().unwrap());

        let limited = IndexSettings {
            limit: Some(2),
            ..base.clone()
        };
        assert_ne!(hash, limited.content_hash().unwrap());

        let mut other_model = base.clone();
        other_model.vector.model = "another".to_string();
        assert_ne!(hash, other_model.content_hash().unwrap());

        let mut rebatched = base.clone();
        rebatched.vector.batch_size = 50;
        assert_eq!(hash, rebatched.content_hash().unwrap());
    }

    #[test]
    fn test_content_hash_missing_input() {
        let settings = IndexSettings::resolve(
            &mock_config(),
            index_args(Path::new("/nonexistent/plans.json"), Path::new("out")),
        )
        .unwrap();
        assert!(matches!(
            settings.content_hash(),
            Err(Error::MalformedInput(_))
        ));
    }

    #[tokio::test]
    async fn test_index_builds_saves_and_queries() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 10);
        let out = dir.path().join("index");
        let cli = VecbatchCli::new(mock_config());

        let (rebuilt, results) = queried(cli.index(index_args(&input, &out), true).await.unwrap());
        assert!(rebuilt);
        assert_eq!(results.items.len(), 2);
        assert_eq!(results.backend, "simple");

        let metadata = load_metadata(&out.join(MANIFEST_FILE)).unwrap();
        assert_eq!(metadata.document_count, 10);
        assert_eq!(metadata.model, "mock-minilm");
        assert_eq!(metadata.embedding_dimension, 64);
    }

    #[tokio::test]
    async fn test_index_respects_limit() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 10);
        let out = dir.path().join("index");
        let cli = VecbatchCli::new(mock_config());

        let args = IndexArgs {
            limit: Some(4),
            ..index_args(&input, &out)
        };
        cli.index(args, true).await.unwrap();

        let metadata = load_metadata(&out.join(MANIFEST_FILE)).unwrap();
        assert_eq!(metadata.document_count, 4);
    }

    #[tokio::test]
    async fn test_index_skips_fresh_rebuild_unless_forced() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 5);
        let out = dir.path().join("index");
        let cli = VecbatchCli::new(mock_config());

        let (first, _) = queried(cli.index(index_args(&input, &out), true).await.unwrap());
        let (second, results) = queried(cli.index(index_args(&input, &out), true).await.unwrap());
        assert!(first);
        assert!(!second);
        assert_eq!(results.items.len(), 2);

        let forced = IndexArgs {
            force: true,
            ..index_args(&input, &out)
        };
        let (third, _) = queried(cli.index(forced, true).await.unwrap());
        assert!(third);
    }

    #[tokio::test]
    async fn test_index_check_reports_freshness() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 5);
        let out = dir.path().join("index");
        let cli = VecbatchCli::new(mock_config());

        let check = || IndexArgs {
            check: true,
            ..index_args(&input, &out)
        };

        let outcome = cli.index(check(), true).await.unwrap();
        assert!(matches!(outcome, IndexOutcome::Checked { fresh: false }));
        assert!(!out.exists());

        cli.index(index_args(&input, &out), true).await.unwrap();
        let outcome = cli.index(check(), true).await.unwrap();
        assert!(matches!(outcome, IndexOutcome::Checked { fresh: true }));

        write_corpus(dir.path(), 6);
        let outcome = cli.index(check(), true).await.unwrap();
        assert!(matches!(outcome, IndexOutcome::Checked { fresh: false }));
    }

    #[tokio::test]
    async fn test_index_malformed_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plans.json");
        std::fs::write(&input, r#"{"not": "an array"}"#).unwrap();
        let cli = VecbatchCli::new(mock_config());

        let err = cli
            .index(index_args(&input, &dir.path().join("index")), true)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_index_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 0);
        let cli = VecbatchCli::new(mock_config());

        let err = cli
            .index(index_args(&input, &dir.path().join("index")), true)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[tokio::test]
    async fn test_index_unknown_backend() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 3);
        let cli = VecbatchCli::new(mock_config());

        let args = IndexArgs {
            backend: Some("faiss".to_string()),
            ..index_args(&input, &dir.path().join("index"))
        };
        let err = cli.index(args, true).await.unwrap_err();
        assert!(err.to_string().contains("Unknown backend"));
    }

    #[tokio::test]
    async fn test_search_after_index() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 6);
        let out = dir.path().join("index");
        let cli = VecbatchCli::new(mock_config());
        cli.index(index_args(&input, &out), true).await.unwrap();

        let results = cli
            .search(SearchArgs {
                index: Some(out.clone()),
                query: Some("Oracle to PostgreSQL".to_string()),
                k: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.total, 3);
        assert_eq!(results.query, "Oracle to PostgreSQL");
    }

    #[tokio::test]
    async fn test_search_with_other_model_fails() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 4);
        let out = dir.path().join("index");
        VecbatchCli::new(mock_config())
            .index(index_args(&input, &out), true)
            .await
            .unwrap();

        let mut config = mock_config();
        config.vector.model = "different-model".to_string();
        let err = VecbatchCli::new(config)
            .search(SearchArgs {
                index: Some(out),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigurationMismatch { .. }));
    }

    #[tokio::test]
    async fn test_search_with_model_flag_matches_index_flag() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 4);
        let out = dir.path().join("index");
        let cli = VecbatchCli::new(mock_config());
        let args = IndexArgs {
            model: Some("bge-small-en-v1.5".to_string()),
            ..index_args(&input, &out)
        };
        cli.index(args, true).await.unwrap();

        let err = cli
            .search(SearchArgs {
                index: Some(out.clone()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigurationMismatch { .. }));

        let results = cli
            .search(SearchArgs {
                index: Some(out),
                model: Some("bge-small-en-v1.5".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.total, 2);
    }

    #[tokio::test]
    async fn test_search_missing_index() {
        let dir = TempDir::new().unwrap();
        let err = VecbatchCli::new(mock_config())
            .search(SearchArgs {
                index: Some(dir.path().join("nope")),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
    }

    #[tokio::test]
    async fn test_run_version_command() {
        let cli = VecbatchCli::new(mock_config()).with_version("0.1.0");
        let args = CliArgs::parse_from(["vecbatch", "version"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_no_command() {
        let cli = VecbatchCli::new(mock_config());
        let args = CliArgs::parse_from(["vecbatch"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_index_command_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = write_corpus(dir.path(), 8);
        let out = dir.path().join("index");
        let cli = VecbatchCli::new(mock_config());

        let args = CliArgs::parse_from([
            "vecbatch",
            "--quiet",
            "index",
            "--input",
            input.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--batch-size",
            "2",
        ]);
        cli.run(args).await.unwrap();
        assert!(out.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_from_args_with_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[query]\nk = 7\n").unwrap();

        let args = CliArgs::parse_from(["vecbatch", "--config", path.to_str().unwrap()]);
        let cli = VecbatchCli::from_args(&args).unwrap();
        assert_eq!(cli.config().query.k, 7);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        let cli = VecbatchCli::new(mock_config());
        cli.init_logging(false, true);
        cli.init_logging(true, false);
    }
}
