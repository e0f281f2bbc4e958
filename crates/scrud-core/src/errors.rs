//! Cross-cutting error types for Scrud.
//!
//! Store failures are `StoreError` in `scrud-db`; configuration failures are
//! `ConfigError` in `scrud-config`. The CLI converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Scrud crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (empty name, negative credit weight, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
