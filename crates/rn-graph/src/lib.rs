//! `rn-graph` — street-map graph, map loading, and path queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`model`]     | `Intersection`, `Block`, `RawStreet`, `RawBlock`              |
//! | [`network`]   | `Network` (per-vertex edge lists + coordinate index)          |
//! | [`builder`]   | `NetworkBuilder`: blocks → intersections → annotated network  |
//! | [`loader`]    | `BlockSource` trait, text map reader, `MapData`               |
//! | [`traversal`] | DFS reachability, BFS, least-traffic search, `PathInfo`       |
//! | [`map`]       | `RoadMap` facade tying the above together                     |
//! | [`error`]     | `GraphError`, `GraphResult<T>`                                |
//!
//! # Lifecycle
//!
//! A network is built once, fully, and never mutated afterwards.  Every query
//! allocates its own visited/cost/predecessor state, so any number of queries
//! may run concurrently against a shared `&Network`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod builder;
pub mod error;
pub mod loader;
pub mod map;
pub mod model;
pub mod network;
pub mod traversal;


pub use builder::NetworkBuilder;
pub use error::{GraphError, GraphResult};
pub use loader::{BlockSource, MapData, MapReader, load_map_file, load_map_reader};
pub use map::RoadMap;
pub use model::{Block, Intersection, RawBlock, RawBlockRecord, RawStreet};
pub use network::Network;
pub use traversal::{
    FewestIntersections, LeastTraffic, Path, PathFinder, PathInfo, fastest_path,
    minimize_intersections, path_information, reachable,
};
