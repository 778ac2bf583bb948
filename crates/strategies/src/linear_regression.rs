use crate::error::StrategyError;
use crate::{Forecaster, future_dates};
use configuration::LinearRegressionParams;
use core_types::{ForecastPoint, PriceSeries};
use tracing::debug;

/// Ordinary least squares over a trailing window of closing prices.
///
/// The line is fitted against the 0-based day index of the window and then
/// extrapolated, one point per future calendar day. When the series is
/// shorter than the window, the whole series is used.
///
/// The first projected index is `n + 1` where `n` is the window length,
/// one step past the next index. Callers depend on the exact projected
/// values.
#[derive(Debug)]
pub struct LinearRegression {
    params: LinearRegressionParams,
}

impl LinearRegression {
    /// Creates a new `LinearRegression` instance.
    pub fn new(params: LinearRegressionParams) -> Result<Self, StrategyError> {
        if params.window < 2 {
            return Err(StrategyError::InvalidParameters(
                "Regression window must cover at least 2 bars".to_string(),
            ));
        }
        Ok(Self { params })
    }
}

impl Forecaster for LinearRegression {
    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: usize,
    ) -> Result<Vec<ForecastPoint>, StrategyError> {
        let closes = series.closes();
        if closes.len() < 2 {
            return Err(StrategyError::SeriesTooShort {
                required: 2,
                got: closes.len(),
            });
        }

        let start = closes.len().saturating_sub(self.params.window);
        let window = &closes[start..];
        let n = window.len() as f64;

        let (slope, intercept) = fit_line(window);
        debug!(
            window = window.len(),
            slope, intercept, "Fitted trailing regression line"
        );

        let predictions = future_dates(series, horizon)?
            .into_iter()
            .enumerate()
            .map(|(i, date)| ForecastPoint {
                date,
                close: intercept + slope * (n + 1.0 + i as f64),
            })
            .collect();
        Ok(predictions)
    }
}

/// Least-squares slope and intercept of `values` against their indices.
fn fit_line(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        ss_xx += dx * dx;
        ss_xy += dx * (y - mean_y);
    }

    // `ss_xx` is positive for any window of two or more points.
    let slope = ss_xy / ss_xx;
    (slope, mean_y - slope * mean_x)
}
