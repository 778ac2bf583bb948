use std::str::FromStr;

use configuration::ModelParams;
use core_types::{Forecast, ForecastPoint, ForecastRequest, ModelId, PriceSeries};
use strategies::{StrategyError, create_forecaster, seasonal_models_available};
use tracing::{error, info, warn};

pub mod error;

pub use error::EngineError;

/// The fewest historical bars a forecast request may carry.
pub const MIN_HISTORY: usize = 30;

/// The central orchestrator for forecast requests.
///
/// Holds the injected model parameters and the availability of the
/// seasonal models, both fixed at construction. Every request builds its
/// own series and model instance, so the engine carries no per-request
/// state and can be shared freely across handlers.
pub struct ForecastEngine {
    params: ModelParams,
    seasonal_available: bool,
}

impl ForecastEngine {
    /// Creates a new `ForecastEngine` with the given model parameters.
    pub fn new(params: ModelParams) -> Self {
        let seasonal_available = seasonal_models_available();
        if seasonal_available {
            info!("Seasonal models compiled in; all model names run natively");
        } else {
            info!(
                "Seasonal models absent from this build; the prophet family is served by linear regression"
            );
        }
        Self {
            params,
            seasonal_available,
        }
    }

    /// Runs the dispatch pipeline for one forecast request.
    ///
    /// Validation order is part of the contract: the history length gate
    /// runs before the model name is checked, so a short request fails
    /// with `InsufficientData` even when the model name is bogus.
    pub fn predict(&self, request: &ForecastRequest) -> Result<Forecast, EngineError> {
        let series =
            PriceSeries::prepare(&request.historical).map_err(EngineError::MalformedInput)?;

        if series.len() < MIN_HISTORY {
            return Err(EngineError::InsufficientData {
                required: MIN_HISTORY,
                got: series.len(),
            });
        }

        let requested = ModelId::from_str(&request.model)
            .map_err(|_| EngineError::UnknownModel(request.model.clone()))?;
        let horizon = request.days.get() as usize;

        // Builds without the seasonal models substitute silently; the
        // response still carries the requested name. Logs are the only
        // place the substitution shows.
        let model_id = if requested.is_seasonal() && !self.seasonal_available {
            warn!(
                requested = %requested,
                substitute = %ModelId::LinearRegression,
                "Seasonal model unavailable, substituting"
            );
            ModelId::LinearRegression
        } else {
            requested
        };

        let predictions = match self.run_model(model_id, &series, horizon) {
            Ok(points) => points,
            // A seasonal model failing at runtime degrades to the linear
            // fallback, once. The lightweight models have nothing to fall
            // back to, so their failures propagate.
            Err(err) if model_id.is_seasonal() => {
                error!(
                    model = %model_id,
                    error = %err,
                    "Seasonal model failed, falling back to linear regression"
                );
                self.run_model(ModelId::LinearRegression, &series, horizon)?
            }
            Err(err) => return Err(EngineError::Strategy(err)),
        };

        Ok(Forecast {
            symbol: request.symbol.clone(),
            model: request.model.clone(),
            predictions,
        })
    }

    fn run_model(
        &self,
        id: ModelId,
        series: &PriceSeries,
        horizon: usize,
    ) -> Result<Vec<ForecastPoint>, StrategyError> {
        let model = create_forecaster(id, &self.params)?;
        model.forecast(series, horizon)
    }
}
