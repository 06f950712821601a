//! Plain data row types written by output backends.

use uav_sim::{SlotMetrics, VisualFrame};

/// One slot's scalar metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotMetricsRow {
    pub slot:              u64,
    pub energy_efficiency: f64,
    pub threats_handled:   u32,
    pub total_energy:      f64,
    pub served_devices:    u64,
}

impl From<&SlotMetrics> for SlotMetricsRow {
    fn from(m: &SlotMetrics) -> Self {
        Self {
            slot:              m.slot.0,
            energy_efficiency: m.energy_efficiency,
            threats_handled:   m.threats_handled,
            total_energy:      m.total_energy,
            served_devices:    m.served_devices as u64,
        }
    }
}

/// What a [`FrameRow`] position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Node,
    Device,
    Threat,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Node   => "node",
            EntityKind::Device => "device",
            EntityKind::Threat => "threat",
        }
    }
}

/// One entity position inside a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRow {
    pub slot:        u64,
    pub kind:        EntityKind,
    /// Position within its kind's list in the frame.
    pub index:       u32,
    pub x:           f64,
    pub y:           f64,
    /// Always `false` for nodes and devices.
    pub neutralized: bool,
}

impl FrameRow {
    /// Flatten a frame into rows: nodes, then devices, then threats.
    pub fn from_frame(frame: &VisualFrame) -> Vec<FrameRow> {
        let slot = frame.slot.0;
        let mut rows = Vec::with_capacity(
            frame.node_positions.len() + frame.device_positions.len() + frame.threats.len(),
        );

        let positioned = [
            (EntityKind::Node, &frame.node_positions),
            (EntityKind::Device, &frame.device_positions),
        ];
        for (kind, positions) in positioned {
            rows.extend(positions.iter().enumerate().map(|(i, p)| FrameRow {
                slot,
                kind,
                index: i as u32,
                x: p.x,
                y: p.y,
                neutralized: false,
            }));
        }
        rows.extend(frame.threats.iter().enumerate().map(|(i, t)| FrameRow {
            slot,
            kind: EntityKind::Threat,
            index: i as u32,
            x: t.position.x,
            y: t.position.y,
            neutralized: t.neutralized,
        }));
        rows
    }
}
