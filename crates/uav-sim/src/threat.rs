//! Threat motion and interception.
//!
//! Each slot, every active threat takes one random step toward the field's
//! midline, then the whole population is tested against the mobile nodes.
//! The first node (in id order) within service range neutralizes a threat.
//! Neutralized threats are frozen and skipped from then on.

use uav_core::geo::clamp_coord;
use uav_core::{SimConfig, SimRng};
use uav_world::{Threat, Uav};

#[derive(Copy, Clone, Debug)]
pub struct ThreatEngine {
    pub area_size:     u32,
    pub service_range: f64,
}

impl ThreatEngine {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            area_size:     config.area_size,
            service_range: config.uav.service_range,
        }
    }

    /// Move, then test.  Returns the number of threats neutralized.
    pub fn step(&self, threats: &mut [Threat], uavs: &[Uav], rng: &mut SimRng) -> u32 {
        self.advance(threats, rng);
        self.intercept(threats, uavs)
    }

    /// Drift every active threat: 1–3 units vertically toward the midline and
    /// up to 2 units of horizontal jitter, clamped to the field.
    pub fn advance(&self, threats: &mut [Threat], rng: &mut SimRng) {
        let mid = (self.area_size / 2) as f64;
        for threat in threats.iter_mut().filter(|t| t.is_active()) {
            let direction = if threat.position.y > mid { -1.0 } else { 1.0 };
            let dy = rng.gen_range(1_i32..=3) as f64;
            let dx = rng.gen_range(-2_i32..=2) as f64;
            threat.position.y = clamp_coord(threat.position.y + direction * dy, self.area_size);
            threat.position.x = clamp_coord(threat.position.x + dx, self.area_size);
        }
    }

    /// First-match-wins interception.  Returns the number neutralized.
    pub fn intercept(&self, threats: &mut [Threat], uavs: &[Uav]) -> u32 {
        let mut neutralized = 0;
        for threat in threats.iter_mut().filter(|t| t.is_active()) {
            if uavs.iter().any(|u| threat.is_near(u.position, self.service_range)) {
                threat.neutralize();
                neutralized += 1;
            }
        }
        neutralized
    }
}
