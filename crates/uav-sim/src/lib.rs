//! `uav-sim`: slot loop orchestrator for the uav_patrol simulator.
//!
//! # Slot loop
//!
//! ```text
//! for slot in 0..config.time_slots:
//!   ① Observe  : one exogenous draw per device → EnergyPredictor::observe
//!   ② Allocate : AllocationController::optimize (reads predictions)
//!   ③ Patrol   : every node jumps to its patrol waypoint for this slot
//!   ④ Offload  : if capabilities.runs_offloading: one task per active device
//!   ⑤ Threats  : if capabilities.runs_threats: move, then intercept
//!   ⑥ Metrics  : efficiency, threats handled, total energy
//!   ⑦ Snapshot : VisualFrame appended
//! ```
//!
//! The mode is resolved into a [`Capabilities`](uav_core::Capabilities) value
//! once at build time; the loop never inspects the mode itself.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use uav_core::SimConfig;
//! use uav_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::from_json_path(path)?;
//! let mut sim = SimBuilder::standard(config)?.seed(42).build()?;
//! let metrics = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod threat;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{Metrics, SimOutcome, SlotMetrics, ThreatMark, VisualFrame};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{OBSERVATION_RANGE, Sim};
pub use threat::ThreatEngine;
