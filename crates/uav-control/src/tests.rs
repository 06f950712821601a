//! Unit tests for uav-control.

use uav_core::{DeviceId, Point2, UavId};
use uav_predict::EnergyPredictor;
use uav_world::{Device, Task, Uav, Urgency};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Predicts a fixed value per device index.
struct FixedPredictor(Vec<f64>);

impl EnergyPredictor for FixedPredictor {
    fn observe(&mut self, _device: DeviceId, _value: f64) {}

    fn predict(&self, device: DeviceId) -> f64 {
        self.0[device.index()]
    }
}

fn device(i: u32, x: f64, y: f64) -> Device {
    Device::new(DeviceId(i), Point2::new(x, y), 10.0, 5.0)
}

fn uav(i: u32, x: f64, y: f64, energy: f64) -> Uav {
    Uav::new(UavId(i), Point2::new(x, y), energy, 30.0)
}

fn task(d: &Device) -> Task {
    Task { device: d.id, origin: d.position, data_size_mb: 42, urgency: Urgency::High }
}

// ── AllocationController ──────────────────────────────────────────────────────

#[cfg(test)]
mod controller {
    use super::*;
    use crate::AllocationController;

    fn controller() -> AllocationController {
        AllocationController {
            energy_threshold:     1.5,
            service_range:        5.0,
            consumption_per_slot: 1.0,
        }
    }

    #[test]
    fn active_set_uses_strict_threshold() {
        let devices = vec![device(0, 0.0, 0.0), device(1, 10.0, 0.0), device(2, 20.0, 0.0)];
        let p = FixedPredictor(vec![1.5, 1.6, 0.1]);
        assert_eq!(controller().active_devices(&devices, &p), [DeviceId(1)]);
    }

    #[test]
    fn no_active_devices_is_noop() {
        let mut devices = vec![device(0, 0.0, 0.0)];
        let mut uavs = vec![uav(0, 50.0, 0.0, 100.0)];
        let p = FixedPredictor(vec![1.0]);
        let alloc = controller().optimize(&mut devices, &mut uavs, &p);
        assert!(alloc.assignments.is_empty());
        assert!(alloc.active.is_empty());
        assert_eq!(uavs[0].energy, 100.0);
        assert_eq!(devices[0].energy, 10.0);
    }

    #[test]
    fn nearest_device_targeted_and_flight_charged() {
        let mut devices = vec![device(0, 0.0, 0.0), device(1, 40.0, 0.0)];
        let mut uavs = vec![uav(0, 30.0, 0.0, 100.0)];
        let p = FixedPredictor(vec![2.0, 2.0]);
        let alloc = controller().optimize(&mut devices, &mut uavs, &p);

        assert_eq!(alloc.assignments[&UavId(0)], Point2::new(40.0, 0.0));
        assert!((uavs[0].energy - 99.0).abs() < 1e-12);
        assert_eq!(uavs[0].position, Point2::new(30.0, 0.0), "patrol owns the position");
    }

    #[test]
    fn ties_go_to_first_active_device() {
        let mut devices = vec![device(0, 0.0, 0.0), device(1, 20.0, 0.0)];
        let mut uavs = vec![uav(0, 10.0, 0.0, 100.0)];
        let p = FixedPredictor(vec![2.0, 2.0]);
        let alloc = controller().optimize(&mut devices, &mut uavs, &p);
        assert_eq!(alloc.assignments[&UavId(0)], Point2::new(0.0, 0.0));
    }

    #[test]
    fn services_active_devices_near_target_only() {
        let mut devices = vec![
            device(0, 0.0, 0.0),
            device(1, 3.0, 4.0),  // exactly at range
            device(2, 30.0, 0.0), // out of range
            device(3, 1.0, 0.0),  // in range but inactive
        ];
        let mut uavs = vec![uav(0, 0.0, 0.0, 100.0)];
        let p = FixedPredictor(vec![2.0, 2.0, 2.0, 0.5]);
        controller().optimize(&mut devices, &mut uavs, &p);

        assert_eq!(devices[0].energy, 9.0);
        assert_eq!(devices[1].energy, 9.0);
        assert_eq!(devices[2].energy, 10.0);
        assert_eq!(devices[3].energy, 10.0);
    }

    #[test]
    fn same_device_serviced_by_several_nodes() {
        let mut devices = vec![device(0, 0.0, 0.0)];
        let mut uavs = vec![uav(0, 1.0, 0.0, 100.0), uav(1, 2.0, 0.0, 100.0)];
        let p = FixedPredictor(vec![2.0]);
        let alloc = controller().optimize(&mut devices, &mut uavs, &p);

        assert_eq!(alloc.assignments.len(), 2);
        assert_eq!(devices[0].energy, 8.0);
    }

    #[test]
    fn servicing_floors_device_energy() {
        let mut devices = vec![Device::new(DeviceId(0), Point2::new(0.0, 0.0), 0.5, 5.0)];
        let mut uavs = vec![uav(0, 0.0, 0.0, 100.0)];
        let p = FixedPredictor(vec![2.0]);
        controller().optimize(&mut devices, &mut uavs, &p);
        assert_eq!(devices[0].energy, 0.0);
    }

    #[test]
    fn zero_uavs_reports_active_without_servicing() {
        let mut devices = vec![device(0, 0.0, 0.0)];
        let p = FixedPredictor(vec![2.0]);
        let alloc = controller().optimize(&mut devices, &mut [], &p);
        assert_eq!(alloc.active, [DeviceId(0)]);
        assert!(alloc.assignments.is_empty());
        assert_eq!(devices[0].energy, 10.0);
    }
}

// ── RangeOffloader ────────────────────────────────────────────────────────────

#[cfg(test)]
mod offload {
    use super::*;
    use crate::{OFFLOAD_COST, RangeOffloader, TaskOffloader};

    fn offloader() -> RangeOffloader {
        RangeOffloader { service_range: 10.0 }
    }

    #[test]
    fn accepts_nearest_charged_node_in_range() {
        let d = device(0, 0.0, 0.0);
        let mut uavs = vec![uav(0, 5.0, 0.0, 100.0), uav(1, 40.0, 0.0, 100.0)];
        let got = offloader().assign_task(&d, task(&d), &mut uavs);

        assert_eq!(got, Some(UavId(0)));
        assert!((uavs[0].energy - (100.0 - OFFLOAD_COST)).abs() < 1e-12);
        assert_eq!(uavs[1].energy, 100.0);
        assert_eq!(uavs[0].assigned_task.map(|t| t.device), Some(DeviceId(0)));
    }

    #[test]
    fn drained_node_loses_to_charged_one() {
        let d = device(0, 0.0, 0.0);
        // Node 0: 1 + (100 - 10) = 91.  Node 1: 36 + 0 = 36.
        let mut uavs = vec![uav(0, 1.0, 0.0, 10.0), uav(1, 6.0, 0.0, 100.0)];
        let got = offloader().assign_task(&d, task(&d), &mut uavs);
        assert_eq!(got, Some(UavId(1)));
    }

    #[test]
    fn best_node_out_of_range_rejects() {
        let d = device(0, 0.0, 0.0);
        let mut uavs = vec![uav(0, 11.0, 0.0, 100.0)];
        let got = offloader().assign_task(&d, task(&d), &mut uavs);

        assert_eq!(got, None);
        assert_eq!(uavs[0].energy, 100.0);
        assert!(uavs[0].assigned_task.is_none());
    }

    #[test]
    fn no_nodes_rejects() {
        let d = device(0, 0.0, 0.0);
        assert_eq!(offloader().assign_task(&d, task(&d), &mut []), None);
    }

    #[test]
    fn score_combines_distance_and_shortfall() {
        let d = device(0, 0.0, 0.0);
        let u = uav(0, 3.0, 4.0, 80.0);
        assert_eq!(RangeOffloader::score(&d, &u), 25.0 + 20.0);
    }
}
