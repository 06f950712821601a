//! Initial world layout from a [`SimConfig`].
//!
//! # Layout rules
//!
//! | Entity  | Position                                                         |
//! |---------|------------------------------------------------------------------|
//! | Device  | `x = ⌊i·area/n⌋`, `y = ⌊area/2 + 10·sin(i/15) + U{-2..=2}⌋`       |
//! | UAV     | `x = (area / (count+1))·(j+1)`, `y = area/2`                     |
//! | Threat  | `x ∈ U[0, area)`, `y` 10–20 units above or below the midline     |
//!
//! Everything is clamped to the field.  RNG draws happen in a fixed order
//! (devices, then threats) so a seed fully determines the layout.

use uav_core::geo::clamp_coord;
use uav_core::{DeviceId, Point2, SimConfig, SimRng, ThreatId, UavId};

use crate::{Device, PatrolPaths, Threat, Uav, World};

/// Amplitude of the sinusoidal band devices are placed along.
const BAND_AMPLITUDE: f64 = 10.0;
/// Period divisor of the band: lower means a wavier border.
const BAND_PERIOD: f64 = 15.0;

/// Builds the initial [`World`] for a run.
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(42);
/// let world = WorldBuilder::new(&config).build(&mut rng);
/// assert_eq!(world.uavs.len(), config.uav.count as usize);
/// ```
pub struct WorldBuilder<'a> {
    config: &'a SimConfig,
}

impl<'a> WorldBuilder<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    /// Place devices, mobile nodes, and (if the mode spawns them) threats,
    /// then derive the patrol paths.
    pub fn build(self, rng: &mut SimRng) -> World {
        let devices = self.place_devices(rng);
        let uavs = self.place_uavs();
        let threats = if self.config.mode.spawns_threats() {
            self.place_threats(rng)
        } else {
            Vec::new()
        };

        let device_positions: Vec<Point2> = devices.iter().map(|d| d.position).collect();
        let uav_starts: Vec<Point2> = uavs.iter().map(|u| u.position).collect();
        let patrol = PatrolPaths::build(&device_positions, &uav_starts);

        World { devices, uavs, threats, patrol }
    }

    fn place_devices(&self, rng: &mut SimRng) -> Vec<Device> {
        let area = self.config.area_size;
        let count = self.config.iot.device_count;
        let [battery_min, battery_max] = self.config.iot.battery_range;

        (0..count)
            .map(|i| {
                let x = (i as f64 * area as f64 / count as f64).trunc();
                let band = BAND_AMPLITUDE * (i as f64 / BAND_PERIOD).sin();
                let jitter = rng.gen_range(-2_i32..=2) as f64;
                let y = ((area / 2) as f64 + band + jitter).trunc();
                let energy = if battery_max > battery_min {
                    rng.gen_range(battery_min..battery_max)
                } else {
                    battery_min
                };
                Device::new(
                    DeviceId(i),
                    Point2::new(clamp_coord(x, area), clamp_coord(y, area)),
                    energy,
                    self.config.iot.sensing_range,
                )
            })
            .collect()
    }

    fn place_uavs(&self) -> Vec<Uav> {
        let area = self.config.area_size;
        let count = self.config.uav.count;
        let spacing = u64::from(area) / (u64::from(count) + 1);

        (0..count)
            .map(|j| {
                let x = (spacing * (u64::from(j) + 1)) as f64;
                let y = (area / 2) as f64;
                Uav::new(
                    UavId(j),
                    Point2::new(clamp_coord(x, area), clamp_coord(y, area)),
                    self.config.uav.battery,
                    self.config.uav.hover_time,
                )
            })
            .collect()
    }

    fn place_threats(&self, rng: &mut SimRng) -> Vec<Threat> {
        let area = self.config.area_size;
        let mid = (area / 2) as i64;

        (0..self.config.threats.count)
            .map(|i| {
                let top = rng.gen_bool(0.5);
                let x = rng.gen_range(0..area) as f64;
                let y: i64 = if top {
                    rng.gen_range(mid + 10..mid + 20)
                } else {
                    rng.gen_range(mid - 20..mid - 10)
                };
                Threat::new(ThreatId(i), Point2::new(x, y as f64).clamp_to_field(area))
            })
            .collect()
    }
}
