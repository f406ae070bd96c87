//! Map entities: intersections, blocks, and the raw records they are built from.

use std::sync::Arc;

use rn_core::{Coordinate, IntersectionId, SegmentId, clamp_traffic_factor, polyline_length};

use crate::{GraphError, GraphResult};

// ── Intersection ──────────────────────────────────────────────────────────────

/// A graph vertex.  Identity is the coordinate: two intersections are equal
/// iff their coordinates are equal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    pub coordinate: Coordinate,
}

impl Intersection {
    #[inline]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    #[inline]
    pub const fn at(x: i32, y: i32) -> Self {
        Self { coordinate: Coordinate::new(x, y) }
    }
}

impl From<Coordinate> for Intersection {
    #[inline]
    fn from(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl std::fmt::Display for Intersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.coordinate.fmt(f)
    }
}

// ── Raw input records ─────────────────────────────────────────────────────────

/// One block as read from a map source, before graph construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawBlock {
    pub number:     u32,
    pub road_width: f64,
    /// Polyline geometry, first point to last point.
    pub points:     Vec<Coordinate>,
}

impl RawBlock {
    pub fn new(number: u32, road_width: f64, points: Vec<Coordinate>) -> Self {
        Self { number, road_width, points }
    }

    /// A block needs at least two points and a finite, non-negative width.
    pub fn validate(&self, street: &str) -> GraphResult<()> {
        let invalid = |reason: String| GraphError::InvalidBlock {
            street: street.to_owned(),
            block:  self.number,
            reason,
        };
        if self.points.len() < 2 {
            return Err(invalid(format!(
                "expected at least 2 points, got {}",
                self.points.len()
            )));
        }
        if !self.road_width.is_finite() || self.road_width < 0.0 {
            return Err(invalid(format!("bad road width {}", self.road_width)));
        }
        Ok(())
    }
}

/// A named street and its blocks, in file order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawStreet {
    pub name:   String,
    pub blocks: Vec<RawBlock>,
}

impl RawStreet {
    pub fn new(name: impl Into<String>, blocks: Vec<RawBlock>) -> Self {
        Self { name: name.into(), blocks }
    }
}

/// Flat per-block view of a map: one record per physical block, carrying
/// its street name.
#[derive(Clone, Debug, PartialEq)]
pub struct RawBlockRecord {
    pub street_name:  String,
    pub block_number: u32,
    pub road_width:   f64,
    pub points:       Vec<Coordinate>,
}

// ── Block ─────────────────────────────────────────────────────────────────────

/// A directed block edge.
///
/// Each physical block becomes two `Block`s in the network: the forward copy
/// (`first → last`) and the backward copy (`last → first`).  Both share the
/// street name, geometry, `segment` id, length and traffic values; only the
/// endpoint order differs.  `points` always holds the geometry in recorded
/// order, whichever direction the copy runs.
///
/// Do not construct directly; blocks come from
/// [`NetworkBuilder::initialize_blocks`](crate::NetworkBuilder::initialize_blocks).
#[derive(Clone, Debug)]
pub struct Block {
    pub street_name: Arc<str>,
    pub number:      u32,
    pub road_width:  f64,
    pub points:      Arc<[Coordinate]>,

    /// Physical block this directed copy belongs to; `INVALID` until the
    /// block enters a network.
    pub segment: SegmentId,

    /// Source endpoint of this directed copy.
    pub first: Intersection,
    /// Destination endpoint of this directed copy.
    pub last:  Intersection,

    /// Vertex index of `first`; `INVALID` until the block enters a network.
    pub source: IntersectionId,
    /// Vertex index of `last`; `INVALID` until the block enters a network.
    pub target: IntersectionId,

    pub length:         f64,
    pub traffic_factor: f64,
    /// `traffic_factor * length`; the cost minimised by `fastest_path`.
    pub traffic_cost:   f64,
}

impl Block {
    /// Forward copy of `raw`, not yet part of any network.  Caller guarantees
    /// `raw` passed validation.
    pub(crate) fn from_raw(street_name: Arc<str>, raw: &RawBlock) -> Self {
        let points: Arc<[Coordinate]> = Arc::from(raw.points.as_slice());
        let first = Intersection::new(points[0]);
        let last = Intersection::new(points[points.len() - 1]);
        Block {
            street_name,
            number: raw.number,
            road_width: raw.road_width,
            points,
            segment: SegmentId::INVALID,
            first,
            last,
            source: IntersectionId::INVALID,
            target: IntersectionId::INVALID,
            length: 0.0,
            traffic_factor: 1.0,
            traffic_cost: 0.0,
        }
    }

    /// The backward copy: same geometry, endpoints swapped.
    pub fn reversed(&self) -> Block {
        Block {
            first: self.last,
            last: self.first,
            source: self.target,
            target: self.source,
            ..self.clone()
        }
    }

    #[inline]
    pub fn first_endpoint(&self) -> Intersection {
        self.first
    }

    #[inline]
    pub fn last_endpoint(&self) -> Intersection {
        self.last
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn traffic_factor(&self) -> f64 {
        self.traffic_factor
    }

    #[inline]
    pub fn traffic_cost(&self) -> f64 {
        self.traffic_cost
    }

    /// `true` when both endpoints are the same intersection.
    #[inline]
    pub fn is_loop(&self) -> bool {
        self.first == self.last
    }

    /// Set length from geometry and traffic from `factor` (clamped).
    pub(crate) fn annotate(&mut self, factor: f64) {
        self.length = polyline_length(&self.points);
        self.traffic_factor = clamp_traffic_factor(factor);
        self.traffic_cost = self.traffic_factor * self.length;
    }
}
