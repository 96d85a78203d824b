//! civicross-common — Shared error type, HTTP plumbing, and gene records used
//! across all civicross crates.

pub mod error;
pub mod http;
pub mod records;

// Re-export commonly used types
pub use error::{CivicrossError, Result};
