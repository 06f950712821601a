//! `uav-predict`: per-device energy prediction.
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`history`]   | `EnergyHistory`: bounded sliding windows per device      |
//! | [`gmm`]       | `Gmm1d`: deterministic 1-D EM mixture fit                |
//! | [`predictor`] | `EnergyPredictor` trait, `GmmPredictor`                  |
//! | [`error`]     | `PredictError`, `PredictResult<T>`                       |
//!
//! The predictor estimates a single scalar per device, the expected draw over
//! its recent window.  It does not forecast trajectories.

pub mod error;
pub mod gmm;
pub mod history;
pub mod predictor;


pub use error::{PredictError, PredictResult};
pub use gmm::Gmm1d;
pub use history::EnergyHistory;
pub use predictor::{DEFAULT_PREDICTION, EnergyPredictor, GmmPredictor, PREDICTION_FLOOR};
