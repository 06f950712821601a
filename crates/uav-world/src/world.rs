//! The `World` container: every entity a run owns.

use crate::{Device, PatrolPaths, Threat, Uav};

/// All mutable world state for one run.
///
/// Owned exclusively by the simulation.  Subsystems receive borrowed slices
/// for the duration of a single call and keep nothing across slots.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub devices: Vec<Device>,
    pub uavs:    Vec<Uav>,
    pub threats: Vec<Threat>,
    pub patrol:  PatrolPaths,
}

impl World {
    /// Sum of all device batteries.
    pub fn device_energy(&self) -> f64 {
        self.devices.iter().map(|d| d.energy).sum()
    }

    /// Sum of all mobile-node batteries.
    pub fn uav_energy(&self) -> f64 {
        self.uavs.iter().map(|u| u.energy).sum()
    }

    /// Device plus mobile-node energy.
    pub fn total_energy(&self) -> f64 {
        self.device_energy() + self.uav_energy()
    }

    /// Threats neutralized so far.
    pub fn neutralized_count(&self) -> usize {
        self.threats.iter().filter(|t| t.neutralized).count()
    }
}
