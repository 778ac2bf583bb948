use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Failed to execute the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The provider returned an error: {0}")]
    Api(String),

    #[error("No data found for the requested symbol and range")]
    NoData,

    #[error("Invalid data format from provider: {0}")]
    InvalidData(String),
}
