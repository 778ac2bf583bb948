use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    ExponentialSmoothingParams, LinearRegressionParams, MarketDataSettings, ModelParams,
    MovingAverageParams, SeasonalParams, ServerSettings, Settings,
};

/// Loads the application configuration.
///
/// This function is the primary entry point for this crate. It reads an
/// optional `config.toml`, overlays `AUGUR_*` environment variables (with
/// `__` separating nested keys, e.g. `AUGUR_SERVER__PORT`), validates the
/// result, and returns the strongly-typed `Settings`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // The file is optional; every setting carries a default.
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(config::Environment::with_prefix("AUGUR").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

impl Settings {
    /// Rejects parameter values the models cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".to_string(),
            ));
        }
        let alpha = self.models.exponential_smoothing.alpha;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::Validation(format!(
                "models.exponential_smoothing.alpha must be strictly between 0 and 1, got {alpha}"
            )));
        }
        for (name, value) in [
            (
                "models.linear_regression.window",
                self.models.linear_regression.window,
            ),
            (
                "models.exponential_smoothing.trend_window",
                self.models.exponential_smoothing.trend_window,
            ),
            (
                "models.moving_average.window",
                self.models.moving_average.window,
            ),
            (
                "models.moving_average.trend_window",
                self.models.moving_average.trend_window,
            ),
            (
                "models.seasonal.yearly_order",
                self.models.seasonal.yearly_order,
            ),
            (
                "models.seasonal.weekly_order",
                self.models.seasonal.weekly_order,
            ),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at least 1"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn alpha_must_stay_inside_the_open_interval() {
        let mut settings = Settings::default();
        settings.models.exponential_smoothing.alpha = 1.0;
        assert!(settings.validate().is_err());
        settings.models.exponential_smoothing.alpha = 0.0;
        assert!(settings.validate().is_err());
        settings.models.exponential_smoothing.alpha = 0.5;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn zero_windows_are_rejected() {
        let mut settings = Settings::default();
        settings.models.moving_average.window = 0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("moving_average")));
    }
}
