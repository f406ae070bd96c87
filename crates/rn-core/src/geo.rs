//! Planar map coordinates and distance helpers.
//!
//! Map files store integer grid coordinates, so `Coordinate` is an exact
//! value type that can be hashed and compared.  Distances are computed in
//! `f64` on demand.

/// An integer point on the map grid.  Two coordinates are the same location
/// iff both components are equal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Coordinate) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Coordinate {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Sum of the distances between consecutive points.
///
/// Returns `0.0` for fewer than two points, and for any polyline whose points
/// all coincide.
pub fn polyline_length(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
