use thiserror::Error;
use uav_core::CoreError;
use uav_predict::PredictError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("predictor setup failed: {0}")]
    Predict(#[from] PredictError),

    #[error("requested {requested} slots but only {remaining} remain in the run")]
    SlotsExhausted {
        requested: u64,
        remaining: u64,
    },
}

pub type SimResult<T> = Result<T, SimError>;
