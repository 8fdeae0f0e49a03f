//! `sr-graph` — road-network routing table.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`network`]  | `RoutingTable`, `Edge`, `RoadNetworkBuilder`              |
//! | [`overpass`] | Raw node/way element ingestion (`RawElement`, `from_json`)|
//! | [`persist`]  | Flat node→edges JSON format (`to_json`, `from_json`, …)   |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                            |
//!
//! Coordinate strings appear only at the ingestion and persistence
//! boundaries; everything in between works on dense [`sr_core::NodeId`]s.

pub mod error;
pub mod network;
pub mod overpass;
pub mod persist;


pub use error::{GraphError, GraphResult};
pub use network::{Edge, RoadNetworkBuilder, RoutingTable};
pub use overpass::RawElement;
