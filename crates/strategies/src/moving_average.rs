use crate::error::StrategyError;
use crate::{Forecaster, future_dates};
use configuration::MovingAverageParams;
use core_types::{ForecastPoint, PriceSeries};
use tracing::debug;

/// Simple moving average with a linear trend projection.
///
/// Served under the wire name `arima`. The base level is the mean of the
/// last `window` closes. The projected trend is the average per-day price
/// movement across the last `trend_window` raw closes, and every future
/// day extends the base level by it.
#[derive(Debug)]
pub struct MovingAverageTrend {
    params: MovingAverageParams,
}

impl MovingAverageTrend {
    /// Creates a new `MovingAverageTrend` instance.
    pub fn new(params: MovingAverageParams) -> Result<Self, StrategyError> {
        if params.window == 0 || params.trend_window == 0 {
            return Err(StrategyError::InvalidParameters(
                "Averaging windows cannot be zero".to_string(),
            ));
        }
        Ok(Self { params })
    }
}

impl Forecaster for MovingAverageTrend {
    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: usize,
    ) -> Result<Vec<ForecastPoint>, StrategyError> {
        let closes = series.closes();
        let required = self.params.window.max(self.params.trend_window + 1);
        if closes.len() < required {
            return Err(StrategyError::SeriesTooShort {
                required,
                got: closes.len(),
            });
        }

        let tail = &closes[closes.len() - self.params.window..];
        let average = tail.iter().sum::<f64>() / self.params.window as f64;

        let last = closes[closes.len() - 1];
        let reference = closes[closes.len() - 1 - self.params.trend_window];
        let trend = (last - reference) / self.params.trend_window as f64;
        debug!(average, trend, "Trailing average for projection");

        let predictions = future_dates(series, horizon)?
            .into_iter()
            .enumerate()
            .map(|(i, date)| ForecastPoint {
                date,
                close: average + trend * (i as f64 + 1.0),
            })
            .collect();
        Ok(predictions)
    }
}
