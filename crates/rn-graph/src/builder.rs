//! Street records → annotated [`Network`].
//!
//! Construction runs in three steps, once per map:
//!
//! 1. [`NetworkBuilder::initialize_blocks`] turns raw street records into one
//!    forward [`Block`] per physical block.  No graph interaction.
//! 2. [`NetworkBuilder::initialize_intersections`] resolves each block's end
//!    points to shared intersections (creating them on first sight) and
//!    inserts a forward and a backward directed copy.
//! 3. [`NetworkBuilder::build`] annotates every edge with length and traffic
//!    and hands back the read-only network.
//!
//! # Example
//!
//! ```
//! use rn_core::{ConstantTraffic, Coordinate};
//! use rn_graph::{NetworkBuilder, RawBlock, RawStreet};
//!
//! let street = RawStreet::new("College Ave", vec![
//!     RawBlock::new(1, 10.0, vec![Coordinate::new(0, 0), Coordinate::new(3, 4)]),
//! ]);
//! let net = NetworkBuilder::from_streets(&[street], &mut ConstantTraffic(1.0)).unwrap();
//! assert_eq!(net.intersection_count(), 2);
//! assert_eq!(net.edge_count(), 2); // forward + backward
//! ```

use std::sync::Arc;

use log::debug;

use rn_core::{IntersectionId, SegmentId, TrafficSource};

use crate::model::{Block, Intersection, RawStreet};
use crate::network::Network;
use crate::{GraphError, GraphResult};

/// Incremental network construction.  Call [`build`](Self::build) once all
/// blocks are in.
pub struct NetworkBuilder {
    network:  Network,
    segments: usize,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self { network: Network::new(), segments: 0 }
    }

    /// Pre-allocate for the expected number of intersections (map files
    /// declare this up front).
    pub fn with_capacity(intersections: usize) -> Self {
        Self { network: Network::with_capacity(intersections), segments: 0 }
    }

    /// Build and annotate a network from `streets` in one call.
    pub fn from_streets<T>(streets: &[RawStreet], traffic: &mut T) -> GraphResult<Network>
    where
        T: TrafficSource + ?Sized,
    {
        let blocks = Self::initialize_blocks(streets)?;
        let mut builder = Self::new();
        builder.initialize_intersections(blocks)?;
        Ok(builder.build(traffic))
    }

    /// One forward `Block` per physical block, in street order then block
    /// order.  Fails on a block with fewer than two points or a bad width.
    pub fn initialize_blocks(streets: &[RawStreet]) -> GraphResult<Vec<Block>> {
        let total = streets.iter().map(|s| s.blocks.len()).sum();
        let mut blocks = Vec::with_capacity(total);
        for street in streets {
            let name: Arc<str> = Arc::from(street.name.as_str());
            for raw in &street.blocks {
                raw.validate(&street.name)?;
                blocks.push(Block::from_raw(Arc::clone(&name), raw));
            }
        }
        Ok(blocks)
    }

    /// Resolve endpoints and insert both directed copies of every block.
    ///
    /// The forward copy goes into the first endpoint's edge list, then the
    /// backward copy into the last endpoint's.  A block whose first and last
    /// points coincide produces a self-loop pair on one intersection.
    /// Fails with [`GraphError::IdOverflow`] when blocks or intersections
    /// outgrow 32-bit ids.
    pub fn initialize_intersections(&mut self, blocks: Vec<Block>) -> GraphResult<()> {
        let before = self.network.intersection_count();
        let block_count = blocks.len();

        for mut block in blocks {
            block.segment = SegmentId::try_from(self.segments)
                .ok()
                .filter(|id| id.is_valid())
                .ok_or(GraphError::IdOverflow("blocks"))?;
            self.segments += 1;

            block.source = self.resolve(block.first)?;
            block.target = self.resolve(block.last)?;

            let backward = block.reversed();
            self.network.add_edge(block.source, block);
            self.network.add_edge(backward.source, backward);
        }

        debug!(
            "inserted {block_count} blocks, {} new intersections",
            self.network.intersection_count() - before
        );
        Ok(())
    }

    /// Existing vertex at `intersection`'s coordinate, or a new one.
    fn resolve(&mut self, intersection: Intersection) -> GraphResult<IntersectionId> {
        match self.network.find_intersection(intersection.coordinate) {
            Some(id) => Ok(id),
            None => self.network.add_intersection(intersection),
        }
    }

    pub fn intersection_count(&self) -> usize {
        self.network.intersection_count()
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Annotate every edge and return the finished network.
    ///
    /// One traffic factor is drawn per physical block, in insertion order,
    /// and applied to both directed copies, so a block costs the same in
    /// either direction.  Lengths come from each block's geometry.
    pub fn build<T>(mut self, traffic: &mut T) -> Network
    where
        T: TrafficSource + ?Sized,
    {
        let factors: Vec<f64> = (0..self.segments).map(|_| traffic.traffic_factor()).collect();
        for block in self.network.blocks_mut() {
            block.annotate(factors[block.segment.index()]);
        }

        debug!(
            "network built: {} intersections, {} directed edges, {} blocks",
            self.network.intersection_count(),
            self.network.edge_count(),
            self.segments
        );
        self.network
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
