//! Configuration for the vecbatch CLI.
//!
//! Provides the [`VecbatchConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `VECBATCH_CONFIG` environment variable
//! 3. XDG default: `~/.config/vecbatch/config.toml`
//! 4. Built-in defaults
//!
//! `VECBATCH_<SECTION>_<KEY>` environment variables overlay string values
//! from any of these.

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vecbatch_core::{Error, Result};
use vecbatch_vector::{DEFAULT_K, DEFAULT_QUERY, FormatterKind, VectorConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "VECBATCH_CONFIG";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the vecbatch CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VecbatchConfig {
    /// Input corpus configuration.
    pub input: InputConfig,

    /// Output index configuration.
    pub index: IndexConfig,

    /// Embedding and backend configuration.
    pub vector: VectorConfig,

    /// Example query configuration.
    pub query: QueryConfig,
}

/// Input corpus configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the JSON corpus.
    pub path: Option<String>,

    /// Record formatter.
    pub loader: FormatterKind,

    /// Index only the first N records.
    pub limit: Option<usize>,
}

/// Output index configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory the index is saved to and loaded from.
    pub path: Option<String>,
}

/// Example query configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Query text.
    pub text: String,

    /// Number of results.
    pub k: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_QUERY.to_string(),
            k: DEFAULT_K,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl VecbatchConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("VECBATCH");
        env_opts.add_section("input");
        env_opts.add_section("index");
        env_opts.add_section("vector");
        env_opts.add_section("query");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vecbatch").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// RAII guard for env var manipulation in tests.
    struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: test-only; guarded keys are unique to each test.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: see `new`.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: see `new`.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = VecbatchConfig::default();
        assert!(config.input.path.is_none());
        assert_eq!(config.input.loader, FormatterKind::Migration);
        assert!(config.input.limit.is_none());
        assert!(config.index.path.is_none());
        assert_eq!(config.vector.backend, "simple");
        assert_eq!(config.vector.batch_size, 100);
        assert_eq!(config.query.text, "MySQL to PostgreSQL migration");
        assert_eq!(config.query.k, 2);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [input]
            path = "/data/plans.json"
            loader = "json"
            limit = 500

            [index]
            path = "/data/index"

            [vector]
            backend = "lancedb"
            provider = "mock"
            model = "bge-small-en-v1.5"
            dimension = 128
            batch_size = 25

            [query]
            text = "Kafka to S3"
            k = 4
        "#;

        let config: VecbatchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.input.path.as_deref(), Some("/data/plans.json"));
        assert_eq!(config.input.loader, FormatterKind::Json);
        assert_eq!(config.input.limit, Some(500));
        assert_eq!(config.index.path.as_deref(), Some("/data/index"));
        assert_eq!(config.vector.backend, "lancedb");
        assert_eq!(config.vector.dimension, 128);
        assert_eq!(config.vector.batch_size, 25);
        assert_eq!(config.query.text, "Kafka to S3");
        assert_eq!(config.query.k, 4);
    }

    #[test]
    fn test_config_to_toml_round_trip() {
        let config = VecbatchConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[vector]"));
        assert!(toml_str.contains("batch_size = 100"));

        let parsed: VecbatchConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [input]
                loader = "json"
                [vector]
                batch_size = 7
            "#,
        )
        .unwrap();

        let config = VecbatchConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.input.loader, FormatterKind::Json);
        assert_eq!(config.vector.batch_size, 7);
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let config = VecbatchConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.vector.batch_size, 100);
        assert_eq!(config.query.k, 2);
    }

    #[test]
    fn test_config_load_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [vector]
                model = "from-file"
            "#,
        )
        .unwrap();

        // confyg passes env values as strings, so only string fields overlay.
        let _guard = EnvGuard::new("VECBATCH_VECTOR_MODEL", "from-env");
        let config = VecbatchConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.vector.model, "from-env");
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = VecbatchConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _guard = EnvGuard::remove(CONFIG_ENV_VAR);
        let path = VecbatchConfig::resolve_config_path(None).unwrap();
        assert!(path.to_str().unwrap().contains("vecbatch"));
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }

    #[test]
    fn test_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VecbatchConfig>();
    }
}
