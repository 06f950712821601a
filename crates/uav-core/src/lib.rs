//! `uav-core`: foundational types for the `uav_patrol` simulator.
//!
//! This crate is a dependency of every other `uav-*` crate.  It has no `uav-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `DeviceId`, `UavId`, `ThreatId`                       |
//! | [`geo`]      | `Point2`, field clamping                              |
//! | [`time`]     | `Slot`                                                |
//! | [`rng`]      | `SimRng` (single injected source of randomness)       |
//! | [`mode`]     | `Mode`, `Capabilities`                                |
//! | [`config`]   | `SimConfig` and its sections, JSON loading            |
//! | [`error`]    | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    GmmConfig, IotConfig, MAX_POPULATION, OffloadingConfig, SimConfig, ThreatConfig, UavConfig,
};
pub use error::{CoreError, CoreResult};
pub use geo::Point2;
pub use ids::{DeviceId, ThreatId, UavId};
pub use mode::{Capabilities, Mode};
pub use rng::SimRng;
pub use time::Slot;
