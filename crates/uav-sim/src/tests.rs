//! Integration tests for uav-sim.

use uav_control::{RangeOffloader, TaskOffloader};
use uav_core::{
    GmmConfig, IotConfig, Mode, OffloadingConfig, SimConfig, Slot, ThreatConfig, UavConfig, UavId,
};
use uav_predict::GmmPredictor;
use uav_world::{Device, Task, Uav};

use crate::{Sim, SimBuilder, SimObserver, SlotMetrics, VisualFrame};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(time_slots: u64, device_count: u32, threat_count: u32, mode: Mode) -> SimConfig {
    SimConfig {
        area_size: 100,
        time_slots,
        mode,
        iot: IotConfig {
            device_count,
            battery_range: [50.0, 100.0],
            sensing_range: 10.0,
        },
        uav: UavConfig {
            count:         3,
            battery:       100.0,
            hover_time:    30.0,
            service_range: 15.0,
        },
        offloading: OffloadingConfig {
            energy_threshold:     1.5,
            consumption_per_slot: 0.2,
        },
        gmm:     GmmConfig { history_window: 10, components: 2 },
        threats: ThreatConfig { count: threat_count },
    }
}

fn standard_sim(config: SimConfig, seed: u64) -> Sim<GmmPredictor, RangeOffloader> {
    SimBuilder::standard(config).unwrap().seed(seed).build().unwrap()
}

/// Offloader that counts every admission request.
struct CountingOffloader {
    inner: RangeOffloader,
    calls: usize,
}

impl TaskOffloader for CountingOffloader {
    fn assign_task(&mut self, device: &Device, task: Task, uavs: &mut [Uav]) -> Option<UavId> {
        self.calls += 1;
        self.inner.assign_task(device, task, uavs)
    }
}

fn counting_sim(config: SimConfig, seed: u64) -> Sim<GmmPredictor, CountingOffloader> {
    let predictor = GmmPredictor::from_config(&config.gmm).unwrap();
    let offloader = CountingOffloader { inner: RangeOffloader::new(&config), calls: 0 };
    SimBuilder::new(config, predictor, offloader).seed(seed).build().unwrap()
}

/// Observer that records everything it sees.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Slot>,
    slots:     Vec<SlotMetrics>,
    frames:    Vec<VisualFrame>,
    sim_ends:  usize,
}

impl SimObserver for Recorder {
    fn on_slot_start(&mut self, slot: Slot) {
        self.starts.push(slot);
    }
    fn on_slot_end(&mut self, metrics: &SlotMetrics) {
        self.slots.push(*metrics);
    }
    fn on_frame(&mut self, frame: &VisualFrame) {
        self.frames.push(frame.clone());
    }
    fn on_sim_end(&mut self, _final_slot: Slot) {
        self.sim_ends += 1;
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use uav_core::CoreError;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_world_from_config() {
        let sim = standard_sim(test_config(5, 12, 4, Mode::Pure), 1);
        assert_eq!(sim.world.devices.len(), 12);
        assert_eq!(sim.world.uavs.len(), 3);
        assert_eq!(sim.world.threats.len(), 4);
        assert_eq!(sim.clock, Slot::ZERO);
        assert!(sim.metrics.is_empty());
    }

    #[test]
    fn invalid_config_rejected() {
        let mut cfg = test_config(5, 12, 4, Mode::Pure);
        cfg.uav.service_range = 0.0;
        let result = SimBuilder::standard(cfg).unwrap().build();
        assert!(matches!(result, Err(SimError::Core(CoreError::Config(_)))));
    }

    #[test]
    fn zero_components_rejected_by_predictor() {
        let mut cfg = test_config(5, 12, 4, Mode::Pure);
        cfg.gmm.components = 0;
        assert!(matches!(SimBuilder::standard(cfg), Err(SimError::Predict(_))));
    }

    #[test]
    fn capabilities_follow_mode() {
        let sim = standard_sim(test_config(1, 1, 0, Mode::MpcOnly), 1);
        assert!(sim.capabilities.runs_threats);
        assert!(!sim.capabilities.runs_offloading);
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{NoopObserver, SimError};

    #[test]
    fn single_slot_two_devices() {
        let mut sim = standard_sim(test_config(1, 2, 0, Mode::Pure), 42);
        let metrics = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(metrics.energy_efficiency.len(), 1);
        assert_eq!(metrics.total_energy.len(), 1);
        assert_eq!(metrics.threats_handled, [0]);
    }

    #[test]
    fn sequences_match_slot_count() {
        let mut sim = standard_sim(test_config(17, 20, 5, Mode::Pure), 3);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.metrics.len(), 17);
        assert_eq!(sim.metrics.threats_handled.len(), 17);
        assert_eq!(sim.metrics.total_energy.len(), 17);
        assert_eq!(sim.frames.len(), 17);
        assert!(sim.is_finished());
    }

    #[test]
    fn observer_sees_every_slot_once() {
        let mut sim = standard_sim(test_config(6, 10, 3, Mode::Pure), 5);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let expected: Vec<Slot> = (0..6).map(Slot).collect();
        assert_eq!(rec.starts, expected);
        assert_eq!(rec.slots.len(), 6);
        assert_eq!(rec.frames.len(), 6);
        assert_eq!(rec.sim_ends, 1);
        assert_eq!(rec.frames, sim.frames);
    }

    #[test]
    fn run_slots_steps_incrementally() {
        let mut sim = standard_sim(test_config(10, 10, 0, Mode::Pure), 5);
        sim.run_slots(4, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock, Slot(4));
        assert_eq!(sim.remaining_slots(), 6);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.metrics.len(), 10);
    }

    #[test]
    fn run_slots_past_end_errors() {
        let mut sim = standard_sim(test_config(3, 4, 0, Mode::Pure), 5);
        let err = sim.run_slots(4, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::SlotsExhausted { requested: 4, remaining: 3 }));
        assert_eq!(sim.clock, Slot::ZERO, "nothing ran");
    }

    #[test]
    fn rerun_after_finish_is_noop() {
        let mut sim = standard_sim(test_config(3, 4, 0, Mode::Pure), 5);
        sim.run(&mut NoopObserver).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.metrics.len(), 3);
    }

    #[test]
    fn into_outcome_keeps_metrics_and_frames() {
        let mut sim = standard_sim(test_config(4, 6, 2, Mode::Pure), 8);
        sim.run(&mut NoopObserver).unwrap();
        let metrics = sim.metrics.clone();
        let outcome = sim.into_outcome();
        assert_eq!(outcome.metrics, metrics);
        assert_eq!(outcome.frames.len(), 4);
    }
}

// ── Metric identities ─────────────────────────────────────────────────────────

#[cfg(test)]
mod metric_tests {
    use super::*;
    use crate::NoopObserver;

    #[test]
    fn efficiency_is_served_over_total() {
        let mut sim = standard_sim(test_config(12, 30, 0, Mode::Pure), 21);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        for (t, m) in rec.slots.iter().enumerate() {
            let expected = SlotMetrics::efficiency(m.served_devices, m.total_energy);
            assert_eq!(sim.metrics.energy_efficiency[t], expected);
            assert_eq!(sim.metrics.total_energy[t], m.total_energy);
        }
    }

    #[test]
    fn total_energy_matches_world_after_last_slot() {
        let mut sim = standard_sim(test_config(5, 15, 0, Mode::Pure), 2);
        sim.run(&mut NoopObserver).unwrap();
        let last = *sim.metrics.total_energy.last().unwrap();
        assert!((last - sim.world.total_energy()).abs() < 1e-9);
    }

    #[test]
    fn no_devices_yields_zero_efficiency() {
        let mut sim = standard_sim(test_config(8, 0, 0, Mode::Pure), 4);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.metrics.energy_efficiency, vec![0.0; 8]);
        assert_eq!(sim.metrics.total_energy, vec![300.0; 8]);
    }

    #[test]
    fn no_energy_anywhere_yields_zero_efficiency() {
        let mut cfg = test_config(4, 0, 0, Mode::Pure);
        cfg.uav.battery = 0.0;
        let mut sim = standard_sim(cfg, 4);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.metrics.energy_efficiency, vec![0.0; 4]);
        assert_eq!(sim.metrics.total_energy, vec![0.0; 4]);
    }

    #[test]
    fn zero_uavs_never_neutralize() {
        let mut cfg = test_config(20, 10, 10, Mode::Pure);
        cfg.uav.count = 0;
        let mut sim = standard_sim(cfg, 4);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.metrics.total_threats_handled(), 0);
    }

    #[test]
    fn device_energy_never_negative() {
        let mut cfg = test_config(30, 40, 0, Mode::Pure);
        cfg.offloading.energy_threshold = 0.0;
        cfg.offloading.consumption_per_slot = 60.0;
        let mut sim = standard_sim(cfg, 6);
        for _ in 0..30 {
            sim.run_slots(1, &mut NoopObserver).unwrap();
            assert!(sim.world.devices.iter().all(|d| d.energy >= 0.0));
            assert!(sim.world.uavs.iter().all(|u| u.energy >= 0.0));
        }
        assert!(sim.world.devices.iter().any(|d| d.energy == 0.0), "drain reached the floor");
    }
}

// ── Mode behaviour ────────────────────────────────────────────────────────────

#[cfg(test)]
mod mode_tests {
    use uav_core::{Point2, ThreatId};
    use uav_world::Threat;

    use super::*;
    use crate::NoopObserver;

    #[test]
    fn ecop_handles_no_threats() {
        let mut sim = standard_sim(test_config(15, 20, 10, Mode::Ecop), 9);
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.world.threats.is_empty());
        assert_eq!(sim.metrics.threats_handled, vec![0; 15]);
        assert!(sim.frames.iter().all(|f| f.threats.is_empty()));
    }

    #[test]
    fn ecop_never_moves_threats_even_if_present() {
        let mut sim = standard_sim(test_config(10, 20, 0, Mode::Ecop), 9);
        let at_node = sim.world.uavs[0].position;
        sim.world.threats.push(Threat::new(ThreatId(0), at_node));
        sim.world.threats.push(Threat::new(ThreatId(1), Point2::new(10.0, 80.0)));
        let before = sim.world.threats.clone();

        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.world.threats, before);
        assert_eq!(sim.metrics.total_threats_handled(), 0);
    }

    #[test]
    fn mpc_only_never_offloads() {
        let mut cfg = test_config(10, 20, 5, Mode::MpcOnly);
        cfg.offloading.energy_threshold = 0.0;
        let mut sim = counting_sim(cfg, 11);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.offloader.calls, 0);
    }

    #[test]
    fn pure_offloads_once_per_active_device() {
        let mut cfg = test_config(10, 20, 5, Mode::Pure);
        cfg.offloading.energy_threshold = 0.0;
        let mut sim = counting_sim(cfg, 11);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.offloader.calls, 20 * 10);
    }

    #[test]
    fn ecop_still_offloads() {
        let mut cfg = test_config(5, 8, 5, Mode::Ecop);
        cfg.offloading.energy_threshold = 0.0;
        let mut sim = counting_sim(cfg, 11);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.offloader.calls, 8 * 5);
    }

    #[test]
    fn high_threshold_means_nothing_active() {
        let mut cfg = test_config(6, 20, 0, Mode::Pure);
        cfg.offloading.energy_threshold = 10.0;
        let mut sim = counting_sim(cfg, 11);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.offloader.calls, 0);
        assert!(rec.slots.iter().all(|m| m.served_devices == 0));
        assert_eq!(sim.metrics.energy_efficiency, vec![0.0; 6]);
    }
}

// ── Threats, patrol, determinism ──────────────────────────────────────────────

#[cfg(test)]
mod world_tests {
    use super::*;
    use crate::NoopObserver;

    #[test]
    fn neutralizations_are_bounded_and_permanent() {
        let mut sim = standard_sim(test_config(60, 60, 25, Mode::Pure), 13);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(sim.metrics.total_threats_handled() <= 25);
        let mut neutralized_seen = 0;
        for pair in rec.frames.windows(2) {
            for (before, after) in pair[0].threats.iter().zip(&pair[1].threats) {
                if before.neutralized {
                    assert!(after.neutralized, "threat came back");
                    assert_eq!(before.position, after.position, "neutralized threat moved");
                }
            }
        }
        for (t, frame) in rec.frames.iter().enumerate() {
            let now = frame.threats.iter().filter(|m| m.neutralized).count();
            assert_eq!(now - neutralized_seen, sim.metrics.threats_handled[t] as usize);
            neutralized_seen = now;
        }
        assert_eq!(sim.world.neutralized_count(), neutralized_seen);
        assert_eq!(sim.world.neutralized_count() as u64, sim.metrics.total_threats_handled());
    }

    #[test]
    fn nodes_persist_at_patrol_waypoints() {
        let mut sim = standard_sim(test_config(25, 30, 0, Mode::Pure), 17);
        sim.run(&mut NoopObserver).unwrap();
        for frame in &sim.frames {
            for (i, pos) in frame.node_positions.iter().enumerate() {
                assert_eq!(Some(*pos), sim.world.patrol.waypoint(i, frame.slot));
            }
        }
    }

    #[test]
    fn devices_never_move() {
        let mut sim = standard_sim(test_config(10, 30, 5, Mode::Pure), 17);
        let start: Vec<_> = sim.world.devices.iter().map(|d| d.position).collect();
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.frames.iter().all(|f| f.device_positions == start));
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let cfg = test_config(30, 40, 15, Mode::Pure);
        let mut a = standard_sim(cfg.clone(), 77);
        let mut b = standard_sim(cfg, 77);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.metrics.energy_efficiency), bits(&b.metrics.energy_efficiency));
        assert_eq!(bits(&a.metrics.total_energy), bits(&b.metrics.total_energy));
        assert_eq!(a.metrics.threats_handled, b.metrics.threats_handled);
        assert_eq!(a.into_outcome(), b.into_outcome());
    }

    #[test]
    fn different_seeds_diverge() {
        let cfg = test_config(10, 40, 15, Mode::Pure);
        let mut a = standard_sim(cfg.clone(), 1);
        let mut b = standard_sim(cfg, 2);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_ne!(a.into_outcome(), b.into_outcome());
    }
}

// ── ThreatEngine ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod threat_engine {
    use uav_core::{Point2, SimRng, ThreatId};
    use uav_world::Threat;

    use super::*;
    use crate::ThreatEngine;

    fn engine() -> ThreatEngine {
        ThreatEngine { area_size: 100, service_range: 5.0 }
    }

    #[test]
    fn drifts_toward_midline() {
        let mut rng = SimRng::new(1);
        for _ in 0..50 {
            let mut threats = vec![
                Threat::new(ThreatId(0), Point2::new(40.0, 80.0)),
                Threat::new(ThreatId(1), Point2::new(40.0, 20.0)),
            ];
            engine().advance(&mut threats, &mut rng);
            assert!((77.0..=79.0).contains(&threats[0].position.y));
            assert!((21.0..=23.0).contains(&threats[1].position.y));
            assert!((38.0..=42.0).contains(&threats[0].position.x));
        }
    }

    #[test]
    fn motion_clamped_to_field() {
        let mut rng = SimRng::new(2);
        let mut threats = vec![Threat::new(ThreatId(0), Point2::new(0.0, 0.0))];
        for _ in 0..20 {
            engine().advance(&mut threats, &mut rng);
            assert!(threats[0].position.x >= 0.0);
        }
        let mut edge = vec![Threat::new(ThreatId(0), Point2::new(99.0, 99.0))];
        engine().advance(&mut edge, &mut rng);
        assert!(edge[0].position.x <= 99.0);
    }

    #[test]
    fn neutralized_threats_frozen() {
        let mut rng = SimRng::new(3);
        let mut threats = vec![Threat::new(ThreatId(0), Point2::new(40.0, 80.0))];
        threats[0].neutralize();
        engine().advance(&mut threats, &mut rng);
        assert_eq!(threats[0].position, Point2::new(40.0, 80.0));
    }

    #[test]
    fn intercept_counts_each_threat_once() {
        let uavs = vec![
            Uav::new(UavId(0), Point2::new(0.0, 0.0), 100.0, 0.0),
            Uav::new(UavId(1), Point2::new(1.0, 0.0), 100.0, 0.0),
        ];
        let mut threats = vec![
            Threat::new(ThreatId(0), Point2::new(3.0, 4.0)),  // exactly in range
            Threat::new(ThreatId(1), Point2::new(50.0, 50.0)),
        ];
        assert_eq!(engine().intercept(&mut threats, &uavs), 1);
        assert!(threats[0].neutralized);
        assert!(!threats[1].neutralized);
        assert_eq!(engine().intercept(&mut threats, &uavs), 0, "already neutralized");
    }

    #[test]
    fn no_uavs_no_interception() {
        let mut threats = vec![Threat::new(ThreatId(0), Point2::new(0.0, 0.0))];
        assert_eq!(engine().intercept(&mut threats, &[]), 0);
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn mode_from(i: usize) -> Mode {
        Mode::ALL[i % Mode::ALL.len()]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn run_invariants(
            seed        in any::<u64>(),
            slots       in 1u64..15,
            devices     in 0u32..40,
            threats     in 0u32..20,
            mode_idx    in 0usize..3,
            consumption in 0.0f64..30.0,
            threshold   in 0.0f64..3.0,
        ) {
            let mut cfg = test_config(slots, devices, threats, mode_from(mode_idx));
            cfg.offloading.consumption_per_slot = consumption;
            cfg.offloading.energy_threshold = threshold;
            let mode = cfg.mode;

            let mut sim = standard_sim(cfg, seed);
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();

            prop_assert_eq!(sim.metrics.energy_efficiency.len() as u64, slots);
            prop_assert_eq!(sim.metrics.threats_handled.len() as u64, slots);
            prop_assert_eq!(sim.metrics.total_energy.len() as u64, slots);
            prop_assert!(sim.metrics.total_threats_handled() <= threats as u64);
            prop_assert!(sim.world.devices.iter().all(|d| d.energy >= 0.0));

            for (t, m) in rec.slots.iter().enumerate() {
                let expected = if m.total_energy > 0.0 {
                    m.served_devices as f64 / m.total_energy
                } else {
                    0.0
                };
                prop_assert_eq!(sim.metrics.energy_efficiency[t], expected);
            }

            if mode == Mode::Ecop {
                prop_assert!(sim.metrics.threats_handled.iter().all(|&n| n == 0));
            }
        }
    }
}
