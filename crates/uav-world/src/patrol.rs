//! Cyclic patrol paths along the device border.
//!
//! All device positions, sorted by `x`, form the border.  The border is cut
//! into `uav_count` contiguous segments of `max(1, len / uav_count)` points;
//! node `i` patrols segment `i`, visiting waypoint `slot mod segment_len`.
//! Points past the last full segment are not patrolled.
//!
//! A segment that would be empty falls back to the whole border, and an empty
//! border (no devices) falls back to the node's own starting position, so
//! every path is non-empty.

use uav_core::{Point2, Slot};

/// Precomputed waypoint sequences, one per mobile node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatrolPaths {
    paths: Vec<Vec<Point2>>,
}

impl PatrolPaths {
    /// Build paths from device positions and each node's starting position.
    ///
    /// `uav_starts.len()` determines the number of paths.
    pub fn build(device_positions: &[Point2], uav_starts: &[Point2]) -> Self {
        let mut border = device_positions.to_vec();
        // Stable: devices sharing an `x` keep their creation order.
        border.sort_by(|a, b| a.x.total_cmp(&b.x));

        let uav_count = uav_starts.len();
        if uav_count == 0 {
            return Self::default();
        }

        let total = border.len();
        let segment = (total / uav_count).max(1);

        let paths = uav_starts
            .iter()
            .enumerate()
            .map(|(i, &start_pos)| {
                let start = (i * segment).min(total);
                let end = ((i + 1) * segment).min(total);
                if start < end {
                    border[start..end].to_vec()
                } else if !border.is_empty() {
                    border.clone()
                } else {
                    vec![start_pos]
                }
            })
            .collect();

        Self { paths }
    }

    /// Waypoint for node `uav_index` at `slot`.
    ///
    /// Returns `None` only if `uav_index` is out of range.
    pub fn waypoint(&self, uav_index: usize, slot: Slot) -> Option<Point2> {
        let path = self.paths.get(uav_index)?;
        path.get(slot.cycle_index(path.len())).copied()
    }

    /// The full waypoint sequence for node `uav_index`.
    pub fn path(&self, uav_index: usize) -> &[Point2] {
        self.paths.get(uav_index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
