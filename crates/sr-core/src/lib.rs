//! `sr-core` — foundational types for the safe-route toolkit.
//!
//! This crate is a dependency of every other `sr-*` crate.  It
//! intentionally has no `sr-*` dependencies and only `thiserror`
//! externally.
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `ZoneId`                                    |
//! | [`geo`]   | `GeoPoint`, Haversine distance, canonical key codec   |
//! | [`error`] | `CoreError`                                           |

pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::CoreError;
pub use geo::GeoPoint;
pub use ids::{NodeId, ZoneId};
