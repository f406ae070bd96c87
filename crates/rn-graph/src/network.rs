//! Street network representation.
//!
//! # Data layout
//!
//! Vertices live in `intersections`, indexed by `IntersectionId` in insertion
//! order.  `adjacency[i]` holds every directed [`Block`] whose source is
//! vertex `i`.
//!
//! Edge order matters: queries visit a vertex's edges **newest first**, i.e.
//! in reverse insertion order.  Inserting pushes onto the back of the `Vec`
//! and [`Network::out_blocks`] iterates it in reverse, which gives
//! prepend-to-list semantics with O(1) insertion.  BFS and DFS tie-breaks
//! depend on this order.
//!
//! # Coordinate index
//!
//! An `FxHashMap<Coordinate, IntersectionId>` resolves a coordinate to its
//! vertex in O(1), so equal coordinates anywhere in the map always resolve
//! to the single shared intersection.

use rustc_hash::FxHashMap;

use rn_core::{Coordinate, IntersectionId};

use crate::model::{Block, Intersection};
use crate::{GraphError, GraphResult};

/// Adjacency-list graph over intersections.
///
/// Purely additive: there is no removal.  Build with
/// [`NetworkBuilder`](crate::NetworkBuilder); the finished network is
/// read-only.
#[derive(Clone, Debug, Default)]
pub struct Network {
    intersections: Vec<Intersection>,
    adjacency:     Vec<Vec<Block>>,
    index:         FxHashMap<Coordinate, IntersectionId>,
    edge_count:    usize,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of intersections.
    pub fn with_capacity(intersections: usize) -> Self {
        Self {
            intersections: Vec::with_capacity(intersections),
            adjacency:     Vec::with_capacity(intersections),
            index:         FxHashMap::with_capacity_and_hasher(intersections, Default::default()),
            edge_count:    0,
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    /// Number of directed edges (two per physical block).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of physical blocks.
    pub fn segment_count(&self) -> usize {
        self.edge_count / 2
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    /// All intersections in insertion order.
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    // ── Vertex lookup and insertion ───────────────────────────────────────

    /// Vertex index of the intersection at `coordinate`, if present.
    #[inline]
    pub fn find_intersection(&self, coordinate: Coordinate) -> Option<IntersectionId> {
        self.index.get(&coordinate).copied()
    }

    /// Like [`find_intersection`](Self::find_intersection) but fails with
    /// [`GraphError::IntersectionNotFound`].
    pub fn require(&self, intersection: Intersection) -> GraphResult<IntersectionId> {
        self.find_intersection(intersection.coordinate)
            .ok_or(GraphError::IntersectionNotFound(intersection.coordinate))
    }

    /// Intersection stored at `id`.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this network.
    #[inline]
    pub fn intersection(&self, id: IntersectionId) -> Intersection {
        self.intersections[id.index()]
    }

    /// Append a vertex with an empty edge list and return its id.
    ///
    /// Callers are expected to check [`find_intersection`](Self::find_intersection)
    /// first; adding a coordinate twice returns the existing id instead of
    /// creating a duplicate vertex.  Fails with [`GraphError::IdOverflow`]
    /// once the vertex count no longer fits an [`IntersectionId`].
    pub fn add_intersection(&mut self, intersection: Intersection) -> GraphResult<IntersectionId> {
        if let Some(id) = self.find_intersection(intersection.coordinate) {
            return Ok(id);
        }
        let id = IntersectionId::try_from(self.intersections.len())
            .ok()
            .filter(|id| id.is_valid())
            .ok_or(GraphError::IdOverflow("intersections"))?;
        self.intersections.push(intersection);
        self.adjacency.push(Vec::new());
        self.index.insert(intersection.coordinate, id);
        Ok(id)
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Insert `block` at the head of `source`'s edge list.
    ///
    /// # Panics
    ///
    /// If `source` was not issued by this network.
    pub fn add_edge(&mut self, source: IntersectionId, block: Block) {
        self.adjacency[source.index()].push(block);
        self.edge_count += 1;
    }

    /// Outgoing edges of `source`, newest first.
    #[inline]
    pub fn out_blocks(&self, source: IntersectionId) -> impl Iterator<Item = &Block> + '_ {
        self.adjacency[source.index()].iter().rev()
    }

    /// Outgoing edges of the vertex at `intersection`, newest first.  An
    /// unknown intersection has no outgoing edges.
    pub fn out_blocks_at(&self, intersection: Intersection) -> impl Iterator<Item = &Block> + '_ {
        self.find_intersection(intersection.coordinate)
            .map(|id| self.adjacency[id.index()].as_slice())
            .unwrap_or(&[])
            .iter()
            .rev()
    }

    /// Out-degree of `source`.
    #[inline]
    pub fn out_degree(&self, source: IntersectionId) -> usize {
        self.adjacency[source.index()].len()
    }

    /// First edge (newest first) from `from` whose destination is `to`.
    pub fn connecting_block(&self, from: Intersection, to: Intersection) -> Option<&Block> {
        self.out_blocks_at(from).find(|b| b.last == to)
    }

    /// Iterator over every directed edge, grouped by source vertex.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.adjacency.iter().flat_map(|edges| edges.iter().rev())
    }

    /// Mutable access to every edge, for one-time annotation by the builder.
    pub(crate) fn blocks_mut(&mut self) -> impl Iterator<Item = &mut Block> + '_ {
        self.adjacency.iter_mut().flat_map(|edges| edges.iter_mut())
    }
}
