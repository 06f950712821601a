//! Per-slot metrics and positional snapshots.

use serde::Serialize;
use uav_core::{Point2, Slot};
use uav_world::World;

/// Everything measured in one slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SlotMetrics {
    pub slot:              Slot,
    /// `served_devices / total_energy`, or 0 when total energy is 0.
    pub energy_efficiency: f64,
    /// Threats neutralized during this slot.
    pub threats_handled:   u32,
    /// Device plus mobile-node energy at the end of the slot.
    pub total_energy:      f64,
    /// Size of the active-device set.
    pub served_devices:    usize,
    /// Tasks accepted by a mobile node.
    pub tasks_offloaded:   usize,
}

impl SlotMetrics {
    pub fn efficiency(served_devices: usize, total_energy: f64) -> f64 {
        if total_energy > 0.0 {
            served_devices as f64 / total_energy
        } else {
            0.0
        }
    }
}

/// The three per-run metric sequences, one entry per slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub energy_efficiency: Vec<f64>,
    pub threats_handled:   Vec<u32>,
    pub total_energy:      Vec<f64>,
}

impl Metrics {
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            energy_efficiency: Vec::with_capacity(slots),
            threats_handled:   Vec::with_capacity(slots),
            total_energy:      Vec::with_capacity(slots),
        }
    }

    pub fn push(&mut self, slot: &SlotMetrics) {
        self.energy_efficiency.push(slot.energy_efficiency);
        self.threats_handled.push(slot.threats_handled);
        self.total_energy.push(slot.total_energy);
    }

    /// Number of recorded slots.
    pub fn len(&self) -> usize {
        self.energy_efficiency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy_efficiency.is_empty()
    }

    pub fn total_threats_handled(&self) -> u64 {
        self.threats_handled.iter().map(|&n| n as u64).sum()
    }
}

/// A threat's position and state inside a [`VisualFrame`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ThreatMark {
    pub position:    Point2,
    pub neutralized: bool,
}

/// Immutable snapshot of every position at the end of a slot.
///
/// Consumed only by external rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualFrame {
    pub slot:             Slot,
    pub node_positions:   Vec<Point2>,
    pub device_positions: Vec<Point2>,
    pub threats:          Vec<ThreatMark>,
}

impl VisualFrame {
    pub fn capture(slot: Slot, world: &World) -> Self {
        Self {
            slot,
            node_positions:   world.uavs.iter().map(|u| u.position).collect(),
            device_positions: world.devices.iter().map(|d| d.position).collect(),
            threats:          world
                .threats
                .iter()
                .map(|t| ThreatMark { position: t.position, neutralized: t.neutralized })
                .collect(),
        }
    }
}

/// What a finished run hands to its consumers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimOutcome {
    pub metrics: Metrics,
    pub frames:  Vec<VisualFrame>,
}
