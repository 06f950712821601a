//! Fluent builder for constructing a [`Sim`].

use uav_control::{AllocationController, RangeOffloader, TaskOffloader};
use uav_core::{SimConfig, SimRng, Slot};
use uav_predict::{EnergyPredictor, GmmPredictor};
use uav_world::WorldBuilder;

use crate::{Metrics, Sim, SimResult, ThreatEngine};

/// Fluent builder for [`Sim<P, O>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: field size, slot count, mode, populations, …
/// - `P: EnergyPredictor`: e.g. [`GmmPredictor`]
/// - `O: TaskOffloader`: e.g. [`RangeOffloader`]
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default            |
/// |--------------|--------------------|
/// | `.seed(s)`   | `0`                |
/// | `.rng(r)`    | `SimRng::new(seed)`|
///
/// # Example
///
/// ```rust,ignore
/// let predictor = GmmPredictor::from_config(&config.gmm)?;
/// let offloader = RangeOffloader::new(&config);
/// let mut sim = SimBuilder::new(config, predictor, offloader)
///     .seed(42)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: EnergyPredictor, O: TaskOffloader> {
    config:    SimConfig,
    seed:      u64,
    rng:       Option<SimRng>,
    predictor: P,
    offloader: O,
}

impl<P: EnergyPredictor, O: TaskOffloader> SimBuilder<P, O> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, predictor: P, offloader: O) -> Self {
        Self {
            config,
            seed: 0,
            rng: None,
            predictor,
            offloader,
        }
    }

    /// Seed the run's random source.  Ignored if [`rng`](Self::rng) is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Supply an already-seeded random source.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration, lay out the world, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, O>> {
        self.config.validate()?;

        let mut rng = self.rng.unwrap_or_else(|| SimRng::new(self.seed));
        let world = WorldBuilder::new(&self.config).build(&mut rng);
        let slots = self.config.time_slots as usize;

        Ok(Sim {
            capabilities: self.config.mode.capabilities(),
            controller:   AllocationController::new(&self.config),
            threats:      ThreatEngine::new(&self.config),
            clock:        Slot::ZERO,
            metrics:      Metrics::with_capacity(slots),
            frames:       Vec::with_capacity(slots),
            config:       self.config,
            rng,
            world,
            predictor:    self.predictor,
            offloader:    self.offloader,
        })
    }
}

impl SimBuilder<GmmPredictor, RangeOffloader> {
    /// Builder wired with the standard Gaussian-mixture predictor and
    /// range-gated offloader.
    pub fn standard(config: SimConfig) -> SimResult<Self> {
        let predictor = GmmPredictor::from_config(&config.gmm)?;
        let offloader = RangeOffloader::new(&config);
        Ok(Self::new(config, predictor, offloader))
    }
}
