use core_types::CoreError;
use strategies::StrategyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed historical data: {0}")]
    MalformedInput(#[source] CoreError),

    #[error("Insufficient historical data: got {got} bars, need at least {required}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid model '{0}'")]
    UnknownModel(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),
}
