//! Error types for the wake-refine crates.

use thiserror::Error;

/// Errors produced while preparing refinement regions.
#[derive(Debug, Error)]
pub enum Error {
    /// A polygon violates a shape invariant (e.g. fewer than 3 vertices).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result alias used across the wake-refine crates.
pub type Result<T> = std::result::Result<T, Error>;
