//! The `EnergyPredictor` trait and its Gaussian-mixture implementation.

use rustc_hash::FxHashMap;
use tracing::trace;
use uav_core::{DeviceId, GmmConfig};

use crate::{EnergyHistory, Gmm1d, PredictError, PredictResult};

/// Returned by [`GmmPredictor::predict`] before a device has a model.
pub const DEFAULT_PREDICTION: f64 = 1.0;

/// Lower bound on fitted predictions, so a positive threshold comparison is
/// always meaningful.
pub const PREDICTION_FLOOR: f64 = 0.1;

/// Point estimate of each device's expected energy draw.
///
/// The simulation feeds one observation per device per slot through
/// [`observe`](Self::observe) and then reads [`predict`](Self::predict) while
/// allocating mobile nodes.  Implementations own their per-device state; the
/// simulation never hands them references into the world.
pub trait EnergyPredictor {
    /// Record one observation for `device` and refresh its model.
    fn observe(&mut self, device: DeviceId, value: f64);

    /// Expected energy draw for `device`.  Never negative.
    fn predict(&self, device: DeviceId) -> f64;
}

/// Fits a small Gaussian mixture to each device's sliding window and predicts
/// the mixture's weighted mean.
#[derive(Clone, Debug)]
pub struct GmmPredictor {
    components: usize,
    history:    EnergyHistory,
    models:     FxHashMap<DeviceId, Gmm1d>,
}

impl GmmPredictor {
    pub fn new(components: usize, history_window: usize) -> PredictResult<Self> {
        if components == 0 {
            return Err(PredictError::InvalidComponents(components));
        }
        if history_window == 0 {
            return Err(PredictError::InvalidWindow(history_window));
        }
        Ok(Self {
            components,
            history: EnergyHistory::new(history_window),
            models:  FxHashMap::default(),
        })
    }

    pub fn from_config(config: &GmmConfig) -> PredictResult<Self> {
        Self::new(config.components, config.history_window)
    }

    /// Load `history` as `device`'s window and refit.
    ///
    /// Only the newest `history_window` samples are kept, and they replace
    /// whatever the window held, so later [`observe`](EnergyPredictor::observe)
    /// calls continue from this window.
    pub fn train(&mut self, device: DeviceId, history: &[f64]) {
        let window = self.history.replace(device, history);
        refit(&mut self.models, self.components, device, window);
    }

    /// The fitted model for `device`, if one exists yet.
    pub fn model(&self, device: DeviceId) -> Option<&Gmm1d> {
        self.models.get(&device)
    }

    pub fn history(&self) -> &EnergyHistory {
        &self.history
    }
}

impl EnergyPredictor for GmmPredictor {
    fn observe(&mut self, device: DeviceId, value: f64) {
        let window = self.history.push(device, value);
        refit(&mut self.models, self.components, device, window);
    }

    fn predict(&self, device: DeviceId) -> f64 {
        match self.models.get(&device) {
            Some(model) => model.weighted_mean().max(PREDICTION_FLOOR),
            None => DEFAULT_PREDICTION,
        }
    }
}

/// Refit `device` from its current window.
///
/// A window shorter than the component count cannot carry a model, so any
/// previous one is dropped and the device falls back to the default.  A
/// failed fit on a full window keeps the previous model.
fn refit(
    models: &mut FxHashMap<DeviceId, Gmm1d>,
    components: usize,
    device: DeviceId,
    window: &[f64],
) {
    if window.len() < components {
        models.remove(&device);
        return;
    }
    if let Some(model) = Gmm1d::fit(window, components) {
        trace!(
            device    = %device,
            samples   = window.len(),
            converged = model.converged(),
            mean      = model.weighted_mean(),
            "model refit",
        );
        models.insert(device, model);
    }
}
