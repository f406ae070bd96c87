//! [`RoadMap`]: load once, query many times.

use log::{debug, warn};

use rn_core::{MapConfig, TrafficSource};

use crate::builder::NetworkBuilder;
use crate::loader::{BlockSource, PREALLOC_LIMIT};
use crate::model::Intersection;
use crate::network::Network;
use crate::traversal::{self, Path, PathInfo};
use crate::GraphResult;

/// A street map with its finished, traffic-annotated network.
///
/// # Example
///
/// ```
/// use rn_core::{ConstantTraffic, Coordinate};
/// use rn_graph::{Intersection, RawBlock, RawStreet, RoadMap};
///
/// let streets = vec![RawStreet::new("Joyce Kilmer Ave", vec![
///     RawBlock::new(1, 8.0, vec![Coordinate::new(0, 0), Coordinate::new(0, 5)]),
///     RawBlock::new(2, 8.0, vec![Coordinate::new(0, 5), Coordinate::new(0, 9)]),
/// ])];
/// let map = RoadMap::with_traffic(streets, &mut ConstantTraffic(1.0)).unwrap();
/// let path = map
///     .minimize_intersections(Intersection::at(0, 0), Intersection::at(0, 9))
///     .unwrap();
/// assert_eq!(path.hop_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct RoadMap {
    network: Network,
}

impl RoadMap {
    /// Load streets from `source` and annotate traffic as `config` describes.
    pub fn load<S: BlockSource>(source: S, config: &MapConfig) -> GraphResult<Self> {
        let mut traffic = config.traffic_source()?;
        Self::with_traffic(source, &mut traffic)
    }

    /// Load streets from `source`, drawing traffic factors from `traffic`.
    pub fn with_traffic<S, T>(mut source: S, traffic: &mut T) -> GraphResult<Self>
    where
        S: BlockSource,
        T: TrafficSource + ?Sized,
    {
        let data = source.load_streets()?;
        debug!("loaded {} streets, {} blocks", data.streets.len(), data.block_count());

        let blocks = NetworkBuilder::initialize_blocks(&data.streets)?;
        let mut builder = NetworkBuilder::with_capacity(data.intersection_hint.min(PREALLOC_LIMIT));
        builder.initialize_intersections(blocks)?;

        if data.intersection_hint != 0 && builder.intersection_count() != data.intersection_hint {
            warn!(
                "map declares {} intersections but blocks define {}",
                data.intersection_hint,
                builder.intersection_count()
            );
        }

        Ok(Self { network: builder.build(traffic) })
    }

    /// Wrap an already built network.
    pub fn from_network(network: Network) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The intersection at `(x, y)`, if the map has one.
    pub fn intersection_at(&self, x: i32, y: i32) -> Option<Intersection> {
        let candidate = Intersection::at(x, y);
        self.network
            .find_intersection(candidate.coordinate)
            .map(|id| self.network.intersection(id))
    }

    pub fn reachable_intersections(&self, source: Intersection) -> GraphResult<Vec<Intersection>> {
        traversal::reachable(&self.network, source)
    }

    pub fn minimize_intersections(&self, start: Intersection, end: Intersection) -> GraphResult<Path> {
        traversal::minimize_intersections(&self.network, start, end)
    }

    pub fn fastest_path(&self, start: Intersection, end: Intersection) -> GraphResult<Path> {
        traversal::fastest_path(&self.network, start, end)
    }

    pub fn path_information(&self, path: &[Intersection]) -> GraphResult<PathInfo> {
        traversal::path_information(&self.network, path)
    }
}
