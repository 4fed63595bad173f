//! Command-line front end for vecbatch.
//!
//! # Key Abstractions
//!
//! - [`CliArgs`]: clap definition of the `vecbatch` command line
//! - [`VecbatchConfig`]: layered TOML + environment configuration
//! - [`VecbatchCli`]: command dispatch and the index pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod progress;

pub use app::{IndexOutcome, IndexSettings, VecbatchCli};
pub use cli::{CliArgs, Command, ConfigAction, IndexArgs, SearchArgs};
pub use config::VecbatchConfig;
