use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Days, Utc};
use core_types::{Candle, Forecast, ForecastRequest, Quote};
use serde::Serialize;
use std::sync::Arc;

/// How far back `GET /historical/:symbol` reaches, in calendar days.
const HISTORY_WINDOW_DAYS: u64 = 365;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CurrentPriceResponse {
    pub symbol: String,
    #[serde(flatten)]
    pub quote: Quote,
}

#[derive(Debug, Serialize)]
pub struct HistoricalResponse {
    pub symbol: String,
    pub historical: Vec<Candle>,
}

/// # GET /
/// Liveness probe for the frontend and for deployment health checks.
pub async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Stock forecast API running",
    })
}

/// # GET /current-price/:symbol
pub async fn get_current_price(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrentPriceResponse>, AppError> {
    let quote = state.market_data.get_quote(&symbol).await?;
    Ok(Json(CurrentPriceResponse { symbol, quote }))
}

/// # GET /historical/:symbol
/// Fetches one year of daily candles ending today.
pub async fn get_historical(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoricalResponse>, AppError> {
    let to = Utc::now().date_naive();
    let from = to.checked_sub_days(Days::new(HISTORY_WINDOW_DAYS)).unwrap_or(to);
    let historical = state.market_data.get_daily_candles(&symbol, from, to).await?;
    Ok(Json(HistoricalResponse { symbol, historical }))
}

/// # POST /predict
/// Runs the requested model over the submitted history and returns the forecast.
pub async fn post_predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<Forecast>, AppError> {
    let forecast = state.engine.predict(&request)?;
    Ok(Json(forecast))
}
