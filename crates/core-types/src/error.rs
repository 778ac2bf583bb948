use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unknown forecast model '{0}'")]
    UnknownModel(String),
}
