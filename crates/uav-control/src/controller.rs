//! Greedy allocation of mobile nodes to active devices.

use std::collections::BTreeMap;

use tracing::trace;
use uav_core::{DeviceId, Point2, SimConfig, UavId};
use uav_predict::EnergyPredictor;
use uav_world::{Device, Uav};

/// Outcome of one [`AllocationController::optimize`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation {
    /// Target position chosen for each node that received an assignment.
    pub assignments: BTreeMap<UavId, Point2>,
    /// Devices whose predicted draw exceeded the threshold, in device order.
    pub active: Vec<DeviceId>,
}

/// Single-pass greedy allocator.
///
/// For each node in id order: pick the nearest active device (first one on
/// ties), pay the flight cost to it, then drain every active device within
/// service range of that target.  Devices are never removed from the active
/// set, so several nodes may target or service the same device in one slot.
/// No backtracking, no global cost minimisation.
#[derive(Copy, Clone, Debug)]
pub struct AllocationController {
    pub energy_threshold:     f64,
    pub service_range:        f64,
    pub consumption_per_slot: f64,
}

impl AllocationController {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            energy_threshold:     config.offloading.energy_threshold,
            service_range:        config.uav.service_range,
            consumption_per_slot: config.offloading.consumption_per_slot,
        }
    }

    /// Devices whose predicted draw exceeds the threshold.
    pub fn active_devices<P: EnergyPredictor + ?Sized>(
        &self,
        devices:   &[Device],
        predictor: &P,
    ) -> Vec<DeviceId> {
        devices
            .iter()
            .filter(|d| predictor.predict(d.id) > self.energy_threshold)
            .map(|d| d.id)
            .collect()
    }

    /// Assign nodes to active devices and apply movement and servicing costs.
    ///
    /// Node positions are read, never written.
    pub fn optimize<P: EnergyPredictor + ?Sized>(
        &self,
        devices:   &mut [Device],
        uavs:      &mut [Uav],
        predictor: &P,
    ) -> Allocation {
        let active = self.active_devices(devices, predictor);
        let mut assignments = BTreeMap::new();

        for uav in uavs.iter_mut() {
            let nearest = active.iter().copied().min_by(|a, b| {
                let da = devices[a.index()].distance_to(uav.position);
                let db = devices[b.index()].distance_to(uav.position);
                da.total_cmp(&db)
            });
            let Some(target_id) = nearest else {
                break;
            };

            let target = devices[target_id.index()].position;
            let flown = uav.charge_travel(target);
            assignments.insert(uav.id, target);
            trace!(uav = %uav.id, device = %target_id, flown, "assigned");

            for &id in &active {
                let device = &mut devices[id.index()];
                if device.position.within(target, self.service_range) {
                    device.drain(self.consumption_per_slot);
                }
            }
        }

        Allocation { assignments, active }
    }
}
