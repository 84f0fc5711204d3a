//! Appliance configuration
//!
//! `appliance.toml` is embedded at compile time. build.rs rejects a bad file
//! before it ever reaches the device; the runtime loader still validates and
//! falls back to defaults so a broken config can never stop the timer.

mod loader;
mod toml;

pub use loader::{load_config, EMBEDDED_CONFIG};
pub use toml::{parse_config, ParseError, CONFIG_VERSION};
