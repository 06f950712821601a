//! Offloadable tasks generated by active devices.

use uav_core::{DeviceId, Point2};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];
}

/// One unit of work a device wants to hand to a mobile node.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Task {
    pub device:       DeviceId,
    pub origin:       Point2,
    /// Payload size in megabytes, `10..100`.
    pub data_size_mb: u32,
    pub urgency:      Urgency,
}
