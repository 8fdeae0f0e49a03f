//! Routing-subsystem error type.

use thiserror::Error;

use sr_core::NodeId;

/// Errors produced by `sr-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No path survives the per-edge danger tolerance.  An expected,
    /// recoverable outcome — callers typically retry with a larger
    /// tolerance rather than treat this as a bug.
    #[error("no safe route from {from} to {to} within tolerance")]
    NoSafeRoute { from: NodeId, to: NodeId },

    /// Nearest-node snapping over a table with zero nodes.
    #[error("routing table has no nodes")]
    EmptyNetwork,

    /// A polygon ring with fewer than 3 distinct vertices.
    #[error("polygon needs at least 3 distinct vertices, got {vertices}")]
    InvalidPolygon { vertices: usize },
}

pub type RouteResult<T> = Result<T, RouteError>;
