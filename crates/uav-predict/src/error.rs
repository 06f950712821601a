use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("mixture component count must be >= 1, got {0}")]
    InvalidComponents(usize),

    #[error("history window must be >= 1, got {0}")]
    InvalidWindow(usize),
}

pub type PredictResult<T> = Result<T, PredictError>;
