//! Passive world entities: devices, mobile nodes, threats.
//!
//! Entities are plain data with a handful of geometric and energy helpers.
//! All decision logic lives in `uav-control` and `uav-sim`.

use uav_core::{DeviceId, Point2, SimRng, ThreatId, UavId};

use crate::{Task, Urgency};

/// Energy a mobile node spends per unit of travelled distance.
pub const MOVE_COST_PER_UNIT: f64 = 0.1;

// ── Device ────────────────────────────────────────────────────────────────────

/// A stationary sensing device.
#[derive(Clone, Debug, PartialEq)]
pub struct Device {
    pub id:            DeviceId,
    pub position:      Point2,
    /// Remaining battery.  Never negative.
    pub energy:        f64,
    pub sensing_range: f64,
    /// Cleared once the battery is exhausted.
    pub alive:         bool,
}

impl Device {
    pub fn new(id: DeviceId, position: Point2, energy: f64, sensing_range: f64) -> Self {
        Self {
            id,
            position,
            energy: energy.max(0.0),
            sensing_range,
            alive: energy > 0.0,
        }
    }

    #[inline]
    pub fn distance_to(&self, p: Point2) -> f64 {
        self.position.distance(p)
    }

    /// Deduct `amount`, flooring the battery at zero.
    pub fn drain(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.0);
        self.alive = self.energy > 0.0;
    }

    /// Draw a task describing this device's pending offload.
    ///
    /// Reads the device only; the RNG supplies the task attributes.
    pub fn generate_task(&self, rng: &mut SimRng) -> Task {
        let data_size_mb = rng.gen_range(10..100);
        let urgency = *rng.choose(&Urgency::ALL).unwrap_or(&Urgency::Low);
        Task {
            device: self.id,
            origin: self.position,
            data_size_mb,
            urgency,
        }
    }
}

// ── Uav ───────────────────────────────────────────────────────────────────────

/// A mobile relay node.
#[derive(Clone, Debug, PartialEq)]
pub struct Uav {
    pub id:            UavId,
    pub position:      Point2,
    /// Remaining battery.  Floored at zero like device batteries.
    pub energy:        f64,
    pub hover_time:    f64,
    /// Most recent task this node accepted, if any.
    pub assigned_task: Option<Task>,
}

impl Uav {
    pub fn new(id: UavId, position: Point2, energy: f64, hover_time: f64) -> Self {
        Self {
            id,
            position,
            energy: energy.max(0.0),
            hover_time,
            assigned_task: None,
        }
    }

    #[inline]
    pub fn can_reach(&self, p: Point2, service_range: f64) -> bool {
        self.position.within(p, service_range)
    }

    /// Deduct `amount`, flooring the battery at zero.
    pub fn spend(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.0);
    }

    /// Pay the movement cost of flying from the current position to
    /// `target`.  Returns the distance flown.
    ///
    /// The position itself is not updated: the patrol path owns it.
    pub fn charge_travel(&mut self, target: Point2) -> f64 {
        let distance = self.position.distance(target);
        self.spend(distance * MOVE_COST_PER_UNIT);
        distance
    }
}

// ── Threat ────────────────────────────────────────────────────────────────────

/// A mobile threat drifting toward the field's midline.
#[derive(Clone, Debug, PartialEq)]
pub struct Threat {
    pub id:          ThreatId,
    pub position:    Point2,
    pub detected:    bool,
    /// One-way: once set, the threat never moves or gets tested again.
    pub neutralized: bool,
}

impl Threat {
    pub fn new(id: ThreatId, position: Point2) -> Self {
        Self { id, position, detected: false, neutralized: false }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.neutralized
    }

    #[inline]
    pub fn is_near(&self, p: Point2, radius: f64) -> bool {
        self.position.within(p, radius)
    }

    /// Terminal transition to the inert state.
    pub fn neutralize(&mut self) {
        self.detected = true;
        self.neutralized = true;
    }
}
