//! Task-offloading admission.

use tracing::trace;
use uav_core::{SimConfig, UavId};
use uav_world::{Device, Task, Uav};

/// Energy a node pays for accepting an offloaded task.
pub const OFFLOAD_COST: f64 = 0.5;

/// Reference battery level in the selection score.  A node's shortfall below
/// it is added to the squared distance, penalising drained nodes.
pub const ENERGY_REFERENCE: f64 = 100.0;

/// Decides which mobile node, if any, takes a device's task.
///
/// Called once per active device per slot, independently of the allocation
/// controller.
pub trait TaskOffloader {
    /// Return the accepting node's id, or `None` if the task is dropped.
    fn assign_task(&mut self, device: &Device, task: Task, uavs: &mut [Uav]) -> Option<UavId>;
}

/// Admits a task to the best-scoring node if that node is within service
/// range; otherwise drops it.  No retry, no queueing.
#[derive(Copy, Clone, Debug)]
pub struct RangeOffloader {
    pub service_range: f64,
}

impl RangeOffloader {
    pub fn new(config: &SimConfig) -> Self {
        Self { service_range: config.uav.service_range }
    }

    /// `squared_distance + (ENERGY_REFERENCE - energy)`; lower is better.
    pub fn score(device: &Device, uav: &Uav) -> f64 {
        device.position.distance_sq(uav.position) + (ENERGY_REFERENCE - uav.energy)
    }
}

impl TaskOffloader for RangeOffloader {
    fn assign_task(&mut self, device: &Device, task: Task, uavs: &mut [Uav]) -> Option<UavId> {
        let best = uavs
            .iter_mut()
            .min_by(|a, b| Self::score(device, a).total_cmp(&Self::score(device, b)))?;

        if !best.can_reach(device.position, self.service_range) {
            trace!(device = %device.id, uav = %best.id, "task dropped: out of range");
            return None;
        }

        best.spend(OFFLOAD_COST);
        best.assigned_task = Some(task);
        trace!(device = %device.id, uav = %best.id, mb = task.data_size_mb, "task offloaded");
        Some(best.id)
    }
}
