use paperdoro_core::config::ApplianceConfig;

use super::toml::parse_config;

/// Configuration embedded at compile time
pub const EMBEDDED_CONFIG: &str = include_str!("../../appliance.toml");

/// Parse and validate a configuration
///
/// Any parse or validation failure is logged and the built-in defaults are
/// used instead.
pub fn load_config(source: &str) -> ApplianceConfig {
    let config = match parse_config(source) {
        Ok(config) => config,
        Err(e) => {
            error!("config parse failed: {:?}, using defaults", e);
            return ApplianceConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "config loaded: {} min, presets {:?}",
                config.timer.default_minutes,
                config.timer.presets
            );
            config
        }
        Err(e) => {
            error!("config invalid: {:?}, using defaults", e);
            ApplianceConfig::default()
        }
    }
}
