use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifies one of the supported forecasting models.
///
/// The serialized names are the wire-level model names. `Lstm` and `Arima`
/// are kept for API compatibility; the procedures behind them are
/// exponential smoothing and a moving-average trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    NeuralProphet,
    Prophet,
    Lstm,
    Arima,
    LinearRegression,
}

impl ModelId {
    /// Returns the wire name used in requests and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::NeuralProphet => "neural_prophet",
            ModelId::Prophet => "prophet",
            ModelId::Lstm => "lstm",
            ModelId::Arima => "arima",
            ModelId::LinearRegression => "linear_regression",
        }
    }

    /// True for the seasonal models, which may be absent from a build.
    pub fn is_seasonal(&self) -> bool {
        matches!(self, ModelId::NeuralProphet | ModelId::Prophet)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neural_prophet" => Ok(ModelId::NeuralProphet),
            "prophet" => Ok(ModelId::Prophet),
            "lstm" => Ok(ModelId::Lstm),
            "arima" => Ok(ModelId::Arima),
            "linear_regression" => Ok(ModelId::LinearRegression),
            other => Err(CoreError::UnknownModel(other.to_string())),
        }
    }
}
