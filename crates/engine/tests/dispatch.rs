use std::num::NonZeroU32;

use chrono::{Days, NaiveDate};
use configuration::ModelParams;
use core_types::{ForecastRequest, RawDailyBar};
use engine::{EngineError, ForecastEngine, MIN_HISTORY};
use rust_decimal::Decimal;

fn bars(closes: &[f64]) -> Vec<RawDailyBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
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
                volume: 100,
            }
        })
        .collect()
}

fn request(model: &str, days: u32, closes: &[f64]) -> ForecastRequest {
    ForecastRequest {
        symbol: "AAPL".to_string(),
        model: model.to_string(),
        days: NonZeroU32::new(days).unwrap(),
        historical: bars(closes),
    }
}

fn engine() -> ForecastEngine {
    ForecastEngine::new(ModelParams::default())
}

#[test]
fn short_history_fails_before_model_validation() {
    // Ten bars and a bogus model name: the length gate must win.
    let result = engine().predict(&request("definitely_not_a_model", 5, &vec![10.0; 10]));
    assert!(matches!(
        result,
        Err(EngineError::InsufficientData { required, got })
            if required == MIN_HISTORY && got == 10
    ));
}

#[test]
fn unknown_model_with_enough_history_is_rejected() {
    let result = engine().predict(&request("definitely_not_a_model", 5, &vec![10.0; 40]));
    assert!(matches!(
        result,
        Err(EngineError::UnknownModel(name)) if name == "definitely_not_a_model"
    ));
}

#[test]
fn exactly_thirty_bars_pass_the_gate() {
    let forecast = engine()
        .predict(&request("lstm", 3, &vec![42.0; MIN_HISTORY]))
        .unwrap();
    assert_eq!(forecast.predictions.len(), 3);
}

#[test]
fn malformed_dates_are_rejected_as_client_input() {
    let mut req = request("lstm", 3, &vec![42.0; 40]);
    req.historical[7].date = "not-a-date".to_string();
    assert!(matches!(
        engine().predict(&req),
        Err(EngineError::MalformedInput(_))
    ));
}

#[test]
fn every_model_name_yields_exactly_the_requested_days() {
    let models = [
        "linear_regression",
        "lstm",
        "arima",
        "prophet",
        "neural_prophet",
    ];
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
    for model in models {
        let forecast = engine().predict(&request(model, 7, &closes)).unwrap();
        assert_eq!(forecast.predictions.len(), 7, "{model}");
        assert_eq!(forecast.model, model);
        assert_eq!(forecast.symbol, "AAPL");

        let last_input = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(59))
            .unwrap();
        assert_eq!(
            forecast.predictions[0].date,
            last_input.checked_add_days(Days::new(1)).unwrap(),
            "{model}"
        );
        for pair in forecast.predictions.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 1, "{model}");
        }
    }
}

#[test]
fn constant_series_round_trips_through_the_smoothing_model() {
    let forecast = engine().predict(&request("lstm", 5, &vec![150.0; 40])).unwrap();
    for point in &forecast.predictions {
        assert!((point.close - 150.0).abs() < 1e-9);
    }
}

#[test]
fn unsorted_history_is_normalized_before_forecasting() {
    let mut req = request("arima", 2, &vec![75.0; 35]);
    req.historical.reverse();
    let forecast = engine().predict(&req).unwrap();
    // The latest date still anchors the forecast after sorting.
    let last_input = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(34))
        .unwrap();
    assert_eq!(
        forecast.predictions[0].date,
        last_input.checked_add_days(Days::new(1)).unwrap()
    );
}

#[cfg(not(feature = "seasonal"))]
#[test]
fn absent_seasonal_models_fall_back_to_linear_regression() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let eng = engine();

    let direct = eng.predict(&request("linear_regression", 5, &closes)).unwrap();
    for requested in ["prophet", "neural_prophet"] {
        let fallback = eng.predict(&request(requested, 5, &closes)).unwrap();
        // Same numbers, but the response keeps the requested name.
        assert_eq!(fallback.model, requested);
        assert_eq!(fallback.predictions.len(), direct.predictions.len());
        for (a, b) in fallback.predictions.iter().zip(direct.predictions.iter()) {
            assert_eq!(a.date, b.date);
            assert!((a.close - b.close).abs() < 1e-12);
        }
    }
}

#[cfg(feature = "seasonal")]
#[test]
fn seasonal_models_run_natively_when_compiled_in() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + 0.1 * i as f64 + ((i % 7) as f64))
        .collect();
    for requested in ["prophet", "neural_prophet"] {
        let forecast = engine().predict(&request(requested, 10, &closes)).unwrap();
        assert_eq!(forecast.model, requested);
        assert_eq!(forecast.predictions.len(), 10);
        assert!(forecast.predictions.iter().all(|p| p.close.is_finite()));
    }
}
