use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every field carries a default, so the service runs with no config file
/// at all; only the market-data API key genuinely needs to be supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub market_data: MarketDataSettings,
    pub models: ModelParams,
}

/// Bind address for the HTTP API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Connection details for the market-data provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    /// Provider API key. Usually supplied as `AUGUR_MARKET_DATA__API_KEY`.
    /// Quote and candle routes fail upstream without it; forecasting does
    /// not need it.
    pub api_key: String,
    pub base_url: String,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://finnhub.io/api/v1".to_string(),
        }
    }
}

/// Contains the parameter sets for all available forecasting models.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub linear_regression: LinearRegressionParams,
    pub exponential_smoothing: ExponentialSmoothingParams,
    pub moving_average: MovingAverageParams,
    pub seasonal: SeasonalParams,
}

/// Parameters for the trailing-window linear regression model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinearRegressionParams {
    /// Number of most recent bars the line is fitted to.
    pub window: usize,
}

impl Default for LinearRegressionParams {
    fn default() -> Self {
        Self { window: 60 }
    }
}

/// Parameters for the exponential smoothing model (wire name `lstm`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExponentialSmoothingParams {
    /// Smoothing factor, strictly between 0 and 1.
    pub alpha: f64,
    /// Lookback used to estimate the per-day trend from the smoothed curve.
    pub trend_window: usize,
}

impl Default for ExponentialSmoothingParams {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            trend_window: 20,
        }
    }
}

/// Parameters for the moving-average trend model (wire name `arima`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovingAverageParams {
    /// Simple moving average window.
    pub window: usize,
    /// Lookback used to estimate the per-day trend from raw closes.
    pub trend_window: usize,
}

impl Default for MovingAverageParams {
    fn default() -> Self {
        Self {
            window: 20,
            trend_window: 20,
        }
    }
}

/// Parameters shared by the seasonal models (`neural_prophet`, `prophet`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeasonalParams {
    /// Fourier order for the yearly seasonality component.
    pub yearly_order: usize,
    /// Fourier order for the weekly seasonality component.
    pub weekly_order: usize,
}

impl Default for SeasonalParams {
    fn default() -> Self {
        Self {
            yearly_order: 10,
            weekly_order: 3,
        }
    }
}
