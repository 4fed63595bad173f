//! CLI argument parsing and command definitions.
//!
//! Flags left unset fall back to the loaded configuration; see
//! [`IndexSettings`](crate::app::IndexSettings).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vecbatch", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "VECBATCH_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an index from a JSON corpus, then run an example query.
    Index(IndexArgs),

    /// Query a saved index.
    Search(SearchArgs),

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Arguments for `vecbatch index`.
#[derive(Args, Debug, Default)]
pub struct IndexArgs {
    /// JSON file holding an array of records.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory to write the index into.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Embedding model identifier.
    #[arg(long)]
    pub model: Option<String>,

    /// Embedding provider: mock or fastembed.
    #[arg(long)]
    pub provider: Option<String>,

    /// Index backend: simple or lancedb.
    #[arg(long)]
    pub backend: Option<String>,

    /// Record formatter: migration or json.
    #[arg(long)]
    pub loader: Option<String>,

    /// Index only the first N records.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Documents per sub-index.
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Example query run after the build.
    #[arg(long)]
    pub query: Option<String>,

    /// Number of example query results.
    #[arg(short)]
    pub k: Option<usize>,

    /// Rebuild even if the saved index is fresh.
    #[arg(short, long)]
    pub force: bool,

    /// Check index freshness without rebuilding.
    #[arg(long)]
    pub check: bool,
}

/// Arguments for `vecbatch search`.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Directory holding a saved index.
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Query text.
    #[arg(long)]
    pub query: Option<String>,

    /// Number of results.
    #[arg(short)]
    pub k: Option<usize>,

    /// Embedding model the index was built with.
    #[arg(long)]
    pub model: Option<String>,

    /// Embedding provider the index was built with.
    #[arg(long)]
    pub provider: Option<String>,

    /// Backend the index was saved by.
    #[arg(long)]
    pub backend: Option<String>,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "vector.batch_size").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["vecbatch"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_flags() {
        let args = CliArgs::parse_from(["vecbatch", "--verbose", "--config", "/tmp/c.toml"]);
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("/tmp/c.toml"));
    }

    #[test]
    fn test_index_command_minimal() {
        let args = CliArgs::parse_from([
            "vecbatch", "index", "--input", "plans.json", "--output", "out",
        ]);
        match args.command {
            Some(Command::Index(index)) => {
                assert_eq!(index.input, Some(PathBuf::from("plans.json")));
                assert_eq!(index.output, Some(PathBuf::from("out")));
                assert!(index.limit.is_none());
                assert!(index.k.is_none());
                assert!(!index.force);
                assert!(!index.check);
            }
            _ => panic!("Expected Index command"),
        }
    }

    #[test]
    fn test_index_command_all_options() {
        let args = CliArgs::parse_from([
            "vecbatch",
            "index",
            "-i",
            "plans.json",
            "-o",
            "out",
            "--model",
            "bge-small-en-v1.5",
            "--provider",
            "mock",
            "--backend",
            "lancedb",
            "--loader",
            "json",
            "--limit",
            "50",
            "--batch-size",
            "10",
            "--query",
            "Oracle to Snowflake",
            "-k",
            "5",
            "--force",
        ]);
        match args.command {
            Some(Command::Index(index)) => {
                assert_eq!(index.model.as_deref(), Some("bge-small-en-v1.5"));
                assert_eq!(index.provider.as_deref(), Some("mock"));
                assert_eq!(index.backend.as_deref(), Some("lancedb"));
                assert_eq!(index.loader.as_deref(), Some("json"));
                assert_eq!(index.limit, Some(50));
                assert_eq!(index.batch_size, Some(10));
                assert_eq!(index.query.as_deref(), Some("Oracle to Snowflake"));
                assert_eq!(index.k, Some(5));
                assert!(index.force);
            }
            _ => panic!("Expected Index command"),
        }
    }

    #[test]
    fn test_index_rejects_negative_limit() {
        let result = CliArgs::try_parse_from(["vecbatch", "index", "--limit", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_command() {
        let args = CliArgs::parse_from([
            "vecbatch", "search", "--index", "out", "--query", "MySQL", "-k", "3",
        ]);
        match args.command {
            Some(Command::Search(search)) => {
                assert_eq!(search.index, Some(PathBuf::from("out")));
                assert_eq!(search.query.as_deref(), Some("MySQL"));
                assert_eq!(search.k, Some(3));
                assert!(search.model.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_embedding_flags() {
        let args = CliArgs::parse_from([
            "vecbatch",
            "search",
            "--model",
            "bge-small-en-v1.5",
            "--provider",
            "mock",
            "--backend",
            "simple",
        ]);
        match args.command {
            Some(Command::Search(search)) => {
                assert_eq!(search.model.as_deref(), Some("bge-small-en-v1.5"));
                assert_eq!(search.provider.as_deref(), Some("mock"));
                assert_eq!(search.backend.as_deref(), Some("simple"));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_version_command() {
        let args = CliArgs::parse_from(["vecbatch", "version"]);
        assert!(matches!(args.command, Some(Command::Version)));
    }

    #[test]
    fn test_config_get_command() {
        let args = CliArgs::parse_from(["vecbatch", "config", "get", "vector.model"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Get { key },
            })) => assert_eq!(key, "vector.model"),
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let args = CliArgs::parse_from(["vecbatch", "config", "init", "--force"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Init { file, force },
            })) => {
                assert!(file.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_config_path_command() {
        let args = CliArgs::parse_from(["vecbatch", "config", "path"]);
        assert!(matches!(
            args.command,
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Path
            }))
        ));
    }
}
