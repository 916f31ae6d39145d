//! Engine configuration

use config::{Config, ConfigError, Environment};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Tunables for the confirmation engine
///
/// Loaded from `ENGINE_`-prefixed environment variables, with sensible
/// defaults for every field.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How many times a confirmation is retried after a version conflict
    pub max_confirm_retries: u32,
    /// Stock level at or below which a product is flagged in reports
    pub low_stock_threshold: Decimal,
}

impl EngineConfig {
    /// Loads configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("max_confirm_retries", 3)?
            .set_default("low_stock_threshold", 10)?
            .add_source(Environment::with_prefix("ENGINE"))
            .build()?;
        config.try_deserialize()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_confirm_retries: 3,
            low_stock_threshold: dec!(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_environment() {
        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.max_confirm_retries, 3);
        assert_eq!(config.low_stock_threshold, dec!(10));
    }
}
