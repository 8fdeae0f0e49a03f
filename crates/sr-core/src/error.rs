//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! in via `#[from]` or wrap it as one variant.  Coordinate-format problems
//! are rejected here, at the parsing boundary, so the graph and search
//! code never see malformed keys.

use thiserror::Error;

/// Errors produced by `sr-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A coordinate key was not two comma-separated finite floats.
    #[error("invalid coordinate key: {0:?}")]
    InvalidCoordinate(String),
}
