//! `rn-core` — foundational types for the `roadnet` pathfinding engine.
//!
//! This crate is a dependency of every other `rn-*` crate.  It has no `rn-*`
//! dependencies and few external ones (`rand`, `rand_distr`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `IntersectionId`, `SegmentId`                            |
//! | [`geo`]       | `Coordinate`, Euclidean distance, polyline length        |
//! | [`rng`]       | `TrafficSource`, `GaussianTraffic`, traffic-factor bounds |
//! | [`config`]    | `MapConfig`, `TrafficModel`                              |
//! | [`error`]     | `RnError`, `RnResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types.      |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MapConfig, TrafficModel};
pub use error::{RnError, RnResult};
pub use geo::{Coordinate, polyline_length};
pub use ids::{IntersectionId, SegmentId};
pub use rng::{
    ConstantTraffic, GaussianTraffic, TRAFFIC_FACTOR_MAX, TRAFFIC_FACTOR_MIN, TrafficSource,
    clamp_traffic_factor,
};
