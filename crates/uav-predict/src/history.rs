//! Bounded per-device observation windows.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use uav_core::DeviceId;

/// Sliding windows of energy observations, one per device.
///
/// Once a window holds `capacity` samples, each new sample evicts the oldest.
#[derive(Clone, Debug)]
pub struct EnergyHistory {
    capacity: usize,
    windows:  FxHashMap<DeviceId, VecDeque<f64>>,
}

impl EnergyHistory {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            windows:  FxHashMap::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append `value` to `device`'s window and return the window, oldest
    /// first.
    pub fn push(&mut self, device: DeviceId, value: f64) -> &[f64] {
        let capacity = self.capacity;
        let window = self
            .windows
            .entry(device)
            .or_insert_with(|| VecDeque::with_capacity(capacity + 1));
        window.push_back(value);
        while window.len() > capacity {
            window.pop_front();
        }
        window.make_contiguous()
    }

    /// Replace `device`'s window with the newest `capacity` values of
    /// `values` and return it, oldest first.
    pub fn replace(&mut self, device: DeviceId, values: &[f64]) -> &[f64] {
        let keep = &values[values.len().saturating_sub(self.capacity)..];
        let window = self.windows.entry(device).or_default();
        window.clear();
        window.extend(keep.iter().copied());
        window.make_contiguous()
    }

    /// Number of samples currently held for `device`.
    pub fn len(&self, device: DeviceId) -> usize {
        self.windows.get(&device).map_or(0, VecDeque::len)
    }

    /// Copy of `device`'s window, oldest first.
    pub fn samples(&self, device: DeviceId) -> Vec<f64> {
        self.windows
            .get(&device)
            .map(|w| w.iter().copied().collect())
            .unwrap_or_default()
    }
}
