//! The `Sim` struct and its slot loop.

use std::ops::Range;

use tracing::{debug, info};
use uav_control::{AllocationController, TaskOffloader};
use uav_core::{Capabilities, SimConfig, SimRng, Slot};
use uav_predict::EnergyPredictor;
use uav_world::World;

use crate::{
    Metrics, SimError, SimObserver, SimOutcome, SimResult, SlotMetrics, ThreatEngine, VisualFrame,
};

/// Range of the exogenous per-device energy observation drawn each slot.
pub const OBSERVATION_RANGE: Range<f64> = 0.5..3.0;

/// The main simulation runner.
///
/// `Sim<P, O>` owns all world state and runs each slot in a fixed order.
/// Later steps read state written by earlier ones, so the order is part of
/// the model:
///
/// 1. **Observe**: draw one energy observation per device, feed the predictor.
/// 2. **Allocate**: greedy node-to-device assignment, flight and service costs.
/// 3. **Patrol**: move every node to its patrol waypoint for this slot.
/// 4. **Offload** (if the mode allows): one task per active device.
/// 5. **Threats** (if the mode allows): move, then intercept.
/// 6. **Metrics**: efficiency, threats handled, total energy.
/// 7. **Snapshot**: append a [`VisualFrame`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: EnergyPredictor, O: TaskOffloader> {
    pub config: SimConfig,

    /// Derived once from `config.mode`.
    pub capabilities: Capabilities,

    /// The next slot to execute.
    pub clock: Slot,

    /// The run's only source of randomness.
    pub rng: SimRng,

    /// Devices, mobile nodes, threats, patrol paths.
    pub world: World,

    pub predictor:  P,
    pub controller: AllocationController,
    pub offloader:  O,
    pub threats:    ThreatEngine,

    pub metrics: Metrics,
    pub frames:  Vec<VisualFrame>,
}

impl<P: EnergyPredictor, O: TaskOffloader> Sim<P, O> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run every remaining slot.
    ///
    /// Calls observer hooks at every slot boundary and `on_sim_end` once at
    /// the end.  Use [`NoopObserver`][crate::NoopObserver] if you don't need
    /// callbacks.
    pub fn run<Obs: SimObserver>(&mut self, observer: &mut Obs) -> SimResult<&Metrics> {
        info!(
            mode    = %self.config.mode,
            slots   = self.config.time_slots,
            devices = self.world.devices.len(),
            uavs    = self.world.uavs.len(),
            threats = self.world.threats.len(),
            "simulation starting",
        );

        while !self.is_finished() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock);

        info!(
            neutralized  = self.world.neutralized_count(),
            final_energy = self.metrics.total_energy.last().copied().unwrap_or(0.0),
            "simulation complete",
        );
        Ok(&self.metrics)
    }

    /// Run exactly `n` slots from the current position.
    ///
    /// Fails without running anything if fewer than `n` slots remain.
    pub fn run_slots<Obs: SimObserver>(&mut self, n: u64, observer: &mut Obs) -> SimResult<()> {
        let remaining = self.remaining_slots();
        if n > remaining {
            return Err(SimError::SlotsExhausted { requested: n, remaining });
        }
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.clock.0 >= self.config.time_slots
    }

    pub fn remaining_slots(&self) -> u64 {
        self.config.time_slots.saturating_sub(self.clock.0)
    }

    /// Consume the sim, keeping only what external consumers need.
    pub fn into_outcome(self) -> SimOutcome {
        SimOutcome { metrics: self.metrics, frames: self.frames }
    }

    // ── Core slot processing ──────────────────────────────────────────────

    fn step<Obs: SimObserver>(&mut self, observer: &mut Obs) {
        let now = self.clock;
        observer.on_slot_start(now);

        let slot_metrics = self.process_slot(now);
        self.metrics.push(&slot_metrics);
        observer.on_slot_end(&slot_metrics);

        let frame = VisualFrame::capture(now, &self.world);
        observer.on_frame(&frame);
        self.frames.push(frame);

        self.clock = now.next();
    }

    fn process_slot(&mut self, now: Slot) -> SlotMetrics {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let world = &mut self.world;
        let rng = &mut self.rng;

        // ── Step 1: exogenous observations → predictor ────────────────────
        for device in &world.devices {
            let observed = rng.gen_range(OBSERVATION_RANGE);
            self.predictor.observe(device.id, observed);
        }

        // ── Step 2: greedy allocation ─────────────────────────────────────
        let allocation = self
            .controller
            .optimize(&mut world.devices, &mut world.uavs, &self.predictor);

        // ── Step 3: patrol waypoints own the persisted position ───────────
        for (i, uav) in world.uavs.iter_mut().enumerate() {
            if let Some(waypoint) = world.patrol.waypoint(i, now) {
                uav.position = waypoint;
            }
        }

        // ── Step 4: task offloading ───────────────────────────────────────
        let mut tasks_offloaded = 0;
        if self.capabilities.runs_offloading {
            for &id in &allocation.active {
                let device = &world.devices[id.index()];
                let task = device.generate_task(rng);
                if self.offloader.assign_task(device, task, &mut world.uavs).is_some() {
                    tasks_offloaded += 1;
                }
            }
        }

        // ── Step 5: threat motion and interception ────────────────────────
        let threats_handled = if self.capabilities.runs_threats {
            self.threats.step(&mut world.threats, &world.uavs, rng)
        } else {
            0
        };

        // ── Step 6: metrics ───────────────────────────────────────────────
        let total_energy = world.total_energy();
        let served_devices = allocation.active.len();
        let energy_efficiency = SlotMetrics::efficiency(served_devices, total_energy);

        debug!(
            slot = %now,
            active = served_devices,
            assigned = allocation.assignments.len(),
            tasks_offloaded,
            threats_handled,
            total_energy,
            "slot complete",
        );

        SlotMetrics {
            slot: now,
            energy_efficiency,
            threats_handled,
            total_energy,
            served_devices,
            tasks_offloaded,
        }
    }
}
