//! `sr-route` — danger zones and constrained routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`zone`]     | `DangerZoneIndex`: polygon registry + chord queries     |
//! | [`search`]   | `find_safe_route`, `SafeRoute`                          |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                          |
//! | `geometry`   | private planar polygon predicates                       |

pub mod error;
pub mod search;
pub mod zone;

mod geometry;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use search::{find_safe_route, SafeRoute};
pub use zone::DangerZoneIndex;
