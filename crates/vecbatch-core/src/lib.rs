//! vecbatch core: shared errors and utilities.
//!
//! This crate provides the foundational types used across all vecbatch
//! crates. It has no internal vecbatch dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Path and hashing utilities

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

pub use util::hash::ContentHasher;
pub use util::paths::expand_tilde;
