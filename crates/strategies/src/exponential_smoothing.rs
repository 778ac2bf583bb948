use crate::error::StrategyError;
use crate::{Forecaster, future_dates};
use configuration::ExponentialSmoothingParams;
use core_types::{ForecastPoint, PriceSeries};
use tracing::debug;

/// Single exponential smoothing with a linear trend projection.
///
/// Served under the wire name `lstm`. The smoothed curve is seeded with
/// the first close and updated as `s[i] = alpha * p[i] + (1 - alpha) *
/// s[i-1]` over the whole series. The projected trend is the average
/// per-day movement of the smoothed curve across the last `trend_window`
/// steps, and every future day extends the final smoothed level by it.
#[derive(Debug)]
pub struct ExponentialSmoothing {
    params: ExponentialSmoothingParams,
}

impl ExponentialSmoothing {
    /// Creates a new `ExponentialSmoothing` instance.
    pub fn new(params: ExponentialSmoothingParams) -> Result<Self, StrategyError> {
        if !(params.alpha > 0.0 && params.alpha < 1.0) {
            return Err(StrategyError::InvalidParameters(format!(
                "Smoothing alpha must be strictly between 0 and 1, got {}",
                params.alpha
            )));
        }
        if params.trend_window == 0 {
            return Err(StrategyError::InvalidParameters(
                "Trend window cannot be zero".to_string(),
            ));
        }
        Ok(Self { params })
    }
}

impl Forecaster for ExponentialSmoothing {
    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: usize,
    ) -> Result<Vec<ForecastPoint>, StrategyError> {
        let closes = series.closes();
        // The trend spans `trend_window` steps of the smoothed curve.
        let required = self.params.trend_window + 1;
        if closes.len() < required {
            return Err(StrategyError::SeriesTooShort {
                required,
                got: closes.len(),
            });
        }

        let alpha = self.params.alpha;
        let mut level = closes[0];
        let mut smoothed = Vec::with_capacity(closes.len());
        smoothed.push(level);
        for &price in &closes[1..] {
            level = alpha * price + (1.0 - alpha) * level;
            smoothed.push(level);
        }

        let last = smoothed[smoothed.len() - 1];
        let reference = smoothed[smoothed.len() - 1 - self.params.trend_window];
        let trend = (last - reference) / self.params.trend_window as f64;
        debug!(level = last, trend, "Smoothed series for projection");

        let predictions = future_dates(series, horizon)?
            .into_iter()
            .enumerate()
            .map(|(i, date)| ForecastPoint {
                date,
                close: last + trend * (i as f64 + 1.0),
            })
            .collect();
        Ok(predictions)
    }
}
