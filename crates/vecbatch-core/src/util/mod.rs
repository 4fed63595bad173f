//! Utility modules for path handling and content hashing.
//!
//! # Modules
//!
//! - [`hash`]: Blake3 content hashing for freshness checks
//! - [`paths`]: Path resolution helpers (tilde expansion)

pub mod hash;
pub mod paths;
