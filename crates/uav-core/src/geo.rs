//! Planar field geometry.
//!
//! The field is a square `[0, area_size) × [0, area_size)` grid.  Positions
//! are stored as `f64` even though the layout rules only ever produce whole
//! numbers, so distance arithmetic never needs a cast.

/// A point in the 2-D field.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// when only an ordering or a scoring term is needed.
    #[inline]
    pub fn distance_sq(self, other: Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// `true` if `other` lies within `radius` (inclusive).
    #[inline]
    pub fn within(self, other: Point2, radius: f64) -> bool {
        self.distance(other) <= radius
    }

    /// Clamp both coordinates into the field `[0, area_size - 1]`.
    #[inline]
    pub fn clamp_to_field(self, area_size: u32) -> Point2 {
        Point2 {
            x: clamp_coord(self.x, area_size),
            y: clamp_coord(self.y, area_size),
        }
    }
}

/// Clamp a single coordinate into `[0, area_size - 1]`.
#[inline]
pub fn clamp_coord(v: f64, area_size: u32) -> f64 {
    let max = area_size.saturating_sub(1) as f64;
    v.clamp(0.0, max)
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
