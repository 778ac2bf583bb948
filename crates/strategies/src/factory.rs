use crate::Forecaster;
use crate::error::StrategyError;
use crate::exponential_smoothing::ExponentialSmoothing;
use crate::linear_regression::LinearRegression;
use crate::moving_average::MovingAverageTrend;
#[cfg(feature = "seasonal")]
use crate::seasonal::SeasonalTrend;
use configuration::ModelParams;
use core_types::ModelId;

/// Creates a new forecaster instance for the given model id.
///
/// The seasonal ids only construct in builds carrying the `seasonal`
/// feature; otherwise they return [`StrategyError::ModelUnavailable`] and
/// the caller decides how to degrade.
pub fn create_forecaster(
    id: ModelId,
    params: &ModelParams,
) -> Result<Box<dyn Forecaster>, StrategyError> {
    match id {
        ModelId::LinearRegression => {
            let params = params.linear_regression.clone();
            Ok(Box::new(LinearRegression::new(params)?))
        }
        ModelId::Lstm => {
            let params = params.exponential_smoothing.clone();
            Ok(Box::new(ExponentialSmoothing::new(params)?))
        }
        ModelId::Arima => {
            let params = params.moving_average.clone();
            Ok(Box::new(MovingAverageTrend::new(params)?))
        }
        #[cfg(feature = "seasonal")]
        ModelId::NeuralProphet => {
            let params = params.seasonal.clone();
            Ok(Box::new(SeasonalTrend::neural_prophet(params)?))
        }
        #[cfg(feature = "seasonal")]
        ModelId::Prophet => {
            let params = params.seasonal.clone();
            Ok(Box::new(SeasonalTrend::prophet(params)?))
        }
        #[cfg(not(feature = "seasonal"))]
        ModelId::NeuralProphet | ModelId::Prophet => {
            Err(StrategyError::ModelUnavailable(id.as_str()))
        }
    }
}
