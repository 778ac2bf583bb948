use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Strategy received invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Series has {got} bars but the model requires at least {required}")]
    SeriesTooShort { required: usize, got: usize },

    #[error("An error occurred during model fitting: {0}")]
    FitError(String),

    #[error("An error occurred during forecast calculation: {0}")]
    CalculationError(String),

    #[error("Model '{0}' is not available in this build")]
    ModelUnavailable(&'static str),
}
