//! Run configuration.
//!
//! The configuration document is JSON:
//!
//! ```json
//! {
//!   "area_size": 100,
//!   "time_slots": 50,
//!   "mode": "PURE",
//!   "iot":        { "device_count": 60, "battery_range": [50, 100], "sensing_range": 10 },
//!   "uav":        { "battery": 100, "hover_time": 30, "service_range": 15 },
//!   "offloading": { "energy_threshold": 1.5, "consumption_per_slot": 0.2 },
//!   "gmm":        { "history_window": 10 },
//!   "threats":    { "count": 20 }
//! }
//! ```
//!
//! `uav.count` (default 3) and `gmm.components` (default 2) are optional.
//! Missing required keys and negative counts are rejected by the parser;
//! everything else, including the [`MAX_POPULATION`] cap on counts, is
//! checked by [`SimConfig::validate`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Mode};

/// Mobile-node population when `uav.count` is absent.
pub const DEFAULT_UAV_COUNT: u32 = 3;

/// Upper bound on every entity population (devices, mobile nodes, threats).
pub const MAX_POPULATION: u32 = 1_000_000;

/// Mixture component count when `gmm.components` is absent.
pub const DEFAULT_GMM_COMPONENTS: usize = 2;

/// Top-level simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Side length of the square field.
    pub area_size: u32,

    /// Number of slots a run executes.
    pub time_slots: u64,

    /// Operating strategy, fixed for the whole run.
    pub mode: Mode,

    pub iot:        IotConfig,
    pub uav:        UavConfig,
    pub offloading: OffloadingConfig,
    pub gmm:        GmmConfig,
    pub threats:    ThreatConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IotConfig {
    pub device_count:  u32,
    /// Inclusive-exclusive `[min, max)` range for initial device energy.
    pub battery_range: [f64; 2],
    pub sensing_range: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UavConfig {
    #[serde(default = "default_uav_count")]
    pub count:         u32,
    pub battery:       f64,
    pub hover_time:    f64,
    /// Maximum distance for servicing a device, accepting a task, or
    /// neutralizing a threat.
    pub service_range: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OffloadingConfig {
    /// A device is active when its predicted draw exceeds this value.
    pub energy_threshold:     f64,
    /// Energy a serviced device pays per servicing node per slot.
    pub consumption_per_slot: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GmmConfig {
    /// Sliding-window length of per-device energy observations.
    pub history_window: usize,
    #[serde(default = "default_gmm_components")]
    pub components:     usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThreatConfig {
    pub count: u32,
}

fn default_uav_count() -> u32 {
    DEFAULT_UAV_COUNT
}

fn default_gmm_components() -> usize {
    DEFAULT_GMM_COMPONENTS
}

impl SimConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        let config: SimConfig =
            serde_json::from_str(s).map_err(|e| CoreError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON configuration file.
    pub fn from_json_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Return a copy of this configuration running under `mode`.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Check every value is inside its domain.
    pub fn validate(&self) -> CoreResult<()> {
        let [battery_min, battery_max] = self.iot.battery_range;

        ensure(self.area_size > 0, "area_size must be > 0")?;
        ensure(self.time_slots > 0, "time_slots must be > 0")?;
        ensure(
            self.iot.device_count <= MAX_POPULATION,
            "iot.device_count must be <= 1000000",
        )?;
        ensure(self.uav.count <= MAX_POPULATION, "uav.count must be <= 1000000")?;
        ensure(self.threats.count <= MAX_POPULATION, "threats.count must be <= 1000000")?;
        ensure(
            battery_min.is_finite() && battery_max.is_finite(),
            "iot.battery_range must be finite",
        )?;
        ensure(battery_min >= 0.0, "iot.battery_range min must be >= 0")?;
        ensure(battery_max >= battery_min, "iot.battery_range max must be >= min")?;
        ensure(self.iot.sensing_range > 0.0, "iot.sensing_range must be > 0")?;
        ensure(self.uav.battery >= 0.0, "uav.battery must be >= 0")?;
        ensure(self.uav.hover_time >= 0.0, "uav.hover_time must be >= 0")?;
        ensure(self.uav.service_range > 0.0, "uav.service_range must be > 0")?;
        ensure(
            self.offloading.energy_threshold.is_finite(),
            "offloading.energy_threshold must be finite",
        )?;
        ensure(
            self.offloading.consumption_per_slot >= 0.0,
            "offloading.consumption_per_slot must be >= 0",
        )?;
        ensure(self.gmm.history_window >= 1, "gmm.history_window must be >= 1")?;
        ensure(self.gmm.components >= 1, "gmm.components must be >= 1")?;
        Ok(())
    }

    /// Horizontal midline of the field (integer division).
    #[inline]
    pub fn midline(&self) -> f64 {
        (self.area_size / 2) as f64
    }
}

fn ensure(cond: bool, msg: &str) -> CoreResult<()> {
    if cond {
        Ok(())
    } else {
        Err(CoreError::Config(msg.to_owned()))
    }
}
