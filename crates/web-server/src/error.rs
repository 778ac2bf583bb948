use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use market_data::MarketDataError;
use serde_json::json;
use thiserror::Error;
use tracing;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Engine(engine_err) => match engine_err {
                EngineError::MalformedInput(_)
                | EngineError::InsufficientData { .. }
                | EngineError::UnknownModel(_) => {
                    tracing::debug!(error = %engine_err, "Rejected forecast request.");
                    (StatusCode::BAD_REQUEST, engine_err.to_string())
                }
                EngineError::Strategy(strategy_err) => {
                    tracing::error!(error = ?strategy_err, "Forecast failed.");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal forecasting error occurred".to_string(),
                    )
                }
            },
            AppError::MarketData(MarketDataError::NoData) => {
                (StatusCode::NOT_FOUND, "No data found".to_string())
            }
            AppError::MarketData(market_err) => {
                tracing::error!(error = ?market_err, "Market data request failed.");
                (
                    StatusCode::BAD_GATEWAY,
                    "The market data provider could not be reached".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
