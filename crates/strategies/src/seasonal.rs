use std::f64::consts::PI;

use chrono::NaiveDate;
use configuration::SeasonalParams;
use core_types::{ForecastPoint, PriceSeries};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{
    LinearRegression as Ols, LinearRegressionParameters as OlsParameters,
    LinearRegressionSolverName,
};
use tracing::debug;

use crate::error::StrategyError;
use crate::{Forecaster, future_dates};

const YEARLY_PERIOD_DAYS: f64 = 365.25;
const WEEKLY_PERIOD_DAYS: f64 = 7.0;

/// Whether a seasonal component participates in the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seasonality {
    Enabled,
    /// Enabled only when the observed span covers at least two cycles.
    Auto,
}

impl Seasonality {
    fn resolve(self, span_days: i64, period_days: f64) -> bool {
        match self {
            Seasonality::Enabled => true,
            Seasonality::Auto => span_days as f64 >= 2.0 * period_days,
        }
    }
}

/// Additive trend-plus-seasonality model fitted with least squares.
///
/// The design matrix holds a linear trend column and Fourier terms for the
/// enabled cycles, indexed by each bar's day offset from the first date so
/// calendar gaps keep their seasonal phase. The model is fitted on the
/// whole history, evaluated over the history plus `horizon` future days,
/// and only the points strictly after the last historical date are kept.
///
/// Daily seasonality is never fitted; daily bars carry no intraday signal.
#[derive(Debug)]
pub struct SeasonalTrend {
    params: SeasonalParams,
    yearly: Seasonality,
    weekly: Seasonality,
    label: &'static str,
}

impl SeasonalTrend {
    /// Configuration served as `neural_prophet`: yearly and weekly
    /// seasonality always on.
    pub fn neural_prophet(params: SeasonalParams) -> Result<Self, StrategyError> {
        Self::new(
            params,
            Seasonality::Enabled,
            Seasonality::Enabled,
            "neural_prophet",
        )
    }

    /// Configuration served as `prophet`: both cycles in auto mode, so a
    /// component only participates once the data spans two of its cycles.
    pub fn prophet(params: SeasonalParams) -> Result<Self, StrategyError> {
        Self::new(params, Seasonality::Auto, Seasonality::Auto, "prophet")
    }

    fn new(
        params: SeasonalParams,
        yearly: Seasonality,
        weekly: Seasonality,
        label: &'static str,
    ) -> Result<Self, StrategyError> {
        if params.yearly_order == 0 || params.weekly_order == 0 {
            return Err(StrategyError::InvalidParameters(
                "Fourier orders cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            params,
            yearly,
            weekly,
            label,
        })
    }

    /// One design-matrix row: trend term plus the enabled Fourier terms.
    fn feature_row(&self, day: f64, yearly: bool, weekly: bool) -> Vec<f64> {
        let mut row = vec![day];
        if yearly {
            push_fourier_terms(&mut row, day, YEARLY_PERIOD_DAYS, self.params.yearly_order);
        }
        if weekly {
            push_fourier_terms(&mut row, day, WEEKLY_PERIOD_DAYS, self.params.weekly_order);
        }
        row
    }
}

fn push_fourier_terms(row: &mut Vec<f64>, day: f64, period: f64, order: usize) {
    for k in 1..=order {
        let angle = 2.0 * PI * k as f64 * day / period;
        row.push(angle.sin());
        row.push(angle.cos());
    }
}

impl Forecaster for SeasonalTrend {
    fn forecast(
        &self,
        series: &PriceSeries,
        horizon: usize,
    ) -> Result<Vec<ForecastPoint>, StrategyError> {
        let candles = series.candles();
        if candles.len() < 2 {
            return Err(StrategyError::SeriesTooShort {
                required: 2,
                got: candles.len(),
            });
        }
        let first = candles[0].date;
        let last = candles[candles.len() - 1].date;
        let span_days = (last - first).num_days();
        let yearly = self.yearly.resolve(span_days, YEARLY_PERIOD_DAYS);
        let weekly = self.weekly.resolve(span_days, WEEKLY_PERIOD_DAYS);
        debug!(
            model = self.label,
            span_days, yearly, weekly, "Resolved seasonal components"
        );

        let closes = series.closes();
        let rows: Vec<Vec<f64>> = candles
            .iter()
            .map(|c| self.feature_row((c.date - first).num_days() as f64, yearly, weekly))
            .collect();
        let x_train = DenseMatrix::from_2d_vec(&rows)
            .map_err(|e| StrategyError::FitError(format!("Failed to build design matrix: {e}")))?;

        // The SVD solver tolerates rank-deficient designs, which short or
        // duplicate-heavy histories produce.
        let parameters = OlsParameters::default().with_solver(LinearRegressionSolverName::SVD);
        let model = Ols::fit(&x_train, &closes, parameters)
            .map_err(|e| StrategyError::FitError(format!("Least-squares fit failed: {e}")))?;

        // Evaluate over history plus the requested future days, then keep
        // only the points strictly after the last historical date.
        let future = future_dates(series, horizon)?;
        let all_dates: Vec<NaiveDate> = candles
            .iter()
            .map(|c| c.date)
            .chain(future.iter().copied())
            .collect();
        let rows: Vec<Vec<f64>> = all_dates
            .iter()
            .map(|d| self.feature_row((*d - first).num_days() as f64, yearly, weekly))
            .collect();
        let x_all = DenseMatrix::from_2d_vec(&rows).map_err(|e| {
            StrategyError::CalculationError(format!("Failed to build forecast matrix: {e}"))
        })?;
        let fitted = model
            .predict(&x_all)
            .map_err(|e| StrategyError::CalculationError(format!("Prediction failed: {e}")))?;

        let predictions: Vec<ForecastPoint> = all_dates
            .iter()
            .zip(fitted.iter())
            .filter(|(date, _)| **date > last)
            .take(horizon)
            .map(|(date, close)| ForecastPoint {
                date: *date,
                close: *close,
            })
            .collect();
        if predictions.len() != horizon {
            return Err(StrategyError::CalculationError(format!(
                "Expected {horizon} future points, produced {}",
                predictions.len()
            )));
        }
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use core_types::RawDailyBar;
    use rust_decimal::Decimal;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let raw: Vec<RawDailyBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = start.checked_add_days(Days::new(i as u64)).unwrap();
                let price = Decimal::try_from(c).unwrap();
                RawDailyBar {
                    date: date.to_string(),
                    open: price,
                    high: price,
                    low: price,
                    close: price,
                    volume: 1,
                }
            })
            .collect();
        PriceSeries::prepare(&raw).unwrap()
    }

    fn wavy_closes(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let day = i as f64;
                100.0 + 0.1 * day + 3.0 * (2.0 * PI * day / 7.0).sin()
            })
            .collect()
    }

    #[test]
    fn produces_exactly_horizon_points_after_the_last_date() {
        let input = series(&wavy_closes(120));
        let model = SeasonalTrend::neural_prophet(SeasonalParams::default()).unwrap();
        let points = model.forecast(&input, 10).unwrap();

        assert_eq!(points.len(), 10);
        let last = input.last_date().unwrap();
        assert!(points.iter().all(|p| p.date > last));
        assert_eq!(points[0].date, last.checked_add_days(Days::new(1)).unwrap());
        for pair in points.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
        }
        assert!(points.iter().all(|p| p.close.is_finite()));
    }

    #[test]
    fn auto_mode_still_forecasts_short_histories() {
        // Sixty days: under two yearly cycles, so prophet fits trend and
        // weekly terms only.
        let input = series(&wavy_closes(60));
        let model = SeasonalTrend::prophet(SeasonalParams::default()).unwrap();
        let points = model.forecast(&input, 5).unwrap();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.close.is_finite()));
    }

    #[test]
    fn one_bar_is_not_enough() {
        let input = series(&[40.0]);
        let model = SeasonalTrend::prophet(SeasonalParams::default()).unwrap();
        assert!(matches!(
            model.forecast(&input, 3),
            Err(StrategyError::SeriesTooShort { .. })
        ));
    }

    #[test]
    fn zero_fourier_order_is_rejected() {
        let err = SeasonalTrend::neural_prophet(SeasonalParams {
            yearly_order: 0,
            weekly_order: 3,
        })
        .unwrap_err();
        assert!(matches!(err, StrategyError::InvalidParameters(_)));
    }
}
