//! Graph build error types.

use thiserror::Error;

use crate::access::AccessError;
use crate::store::StoreError;

/// Errors that abort a graph build.
///
/// Store failures for individual directories or documents never surface
/// here; the walker logs and skips them. Access failures always do.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The access authority could not answer; the build fails closed.
    #[error("Access check failed: {0}")]
    Access(#[from] AccessError),

    /// Document store setup error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Scanner pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Export failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The build was abandoned before traversal finished.
    #[error("Graph build cancelled")]
    Cancelled,
}
