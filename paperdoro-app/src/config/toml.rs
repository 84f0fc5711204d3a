//! Simple TOML parser for the appliance configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `appliance.toml`. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Single-line integer arrays: presets = [25, 5, 30]
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables, dotted keys, datetime values

use heapless::String as HString;

use paperdoro_core::config::{ApplianceConfig, PresetPolicy, PRESET_COUNT};

/// Config format version understood by this parser
pub const CONFIG_VERSION: u8 = 1;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not known in its section
    UnknownKey,
    /// Value has the wrong type or is out of range for its type
    InvalidValue,
    /// String longer than its field, or an array of the wrong length
    TooManyItems,
    /// `version` differs from [`CONFIG_VERSION`]
    UnsupportedVersion(u8),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timer,
    Power,
    Layout,
    Input,
}

/// Parse TOML configuration into an [`ApplianceConfig`]
///
/// Keys that are not present keep their default values. The result is not
/// validated; see [`super::load_config`].
pub fn parse_config(input: &str) -> Result<ApplianceConfig, ParseError> {
    let mut config = ApplianceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    if config.version != CONFIG_VERSION {
        return Err(ParseError::UnsupportedVersion(config.version));
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timer" => Ok(Section::Timer),
        "power" => Ok(Section::Power),
        "layout" => Ok(Section::Layout),
        "input" => Ok(Section::Input),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_label<const N: usize>(value: &str) -> Result<HString<N>, ParseError> {
    HString::try_from(parse_string(value)?).map_err(|_| ParseError::TooManyItems)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a fixed-length integer array like "[25, 5, 30]"
fn parse_int_array<const N: usize>(value: &str) -> Result<[u8; N], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut out = [0u8; N];
    let mut count = 0;
    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        let slot = out.get_mut(count).ok_or(ParseError::TooManyItems)?;
        *slot = parse_int(item)?;
        count += 1;
    }

    if count != N {
        return Err(ParseError::TooManyItems);
    }
    Ok(out)
}

fn parse_policy(value: &str) -> Result<PresetPolicy, ParseError> {
    match parse_string(value)? {
        "force_apply" => Ok(PresetPolicy::ForceApply),
        "reject_while_active" => Ok(PresetPolicy::RejectWhileActive),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ApplianceConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "version") => config.version = parse_int(value)?,

        (Section::Timer, "default_minutes") => config.timer.default_minutes = parse_int(value)?,
        (Section::Timer, "presets") => {
            config.timer.presets = parse_int_array::<PRESET_COUNT>(value)?
        }
        (Section::Timer, "preset_policy") => config.timer.preset_policy = parse_policy(value)?,

        (Section::Power, "idle_timeout_s") => config.power.idle_timeout_s = parse_int(value)?,
        (Section::Power, "battery_interval_s") => {
            config.power.battery_interval_s = parse_int(value)?
        }
        (Section::Power, "lock_image") => config.power.lock_image = parse_label(value)?,
        (Section::Power, "lock_settle_ms") => config.power.lock_settle_ms = parse_int(value)?,

        (Section::Layout, "outer_radius") => config.layout.outer_radius = parse_int(value)?,
        (Section::Layout, "inner_radius") => config.layout.inner_radius = parse_int(value)?,
        (Section::Layout, "outer_dot_radius") => config.layout.outer_dot_radius = parse_int(value)?,
        (Section::Layout, "inner_dot_radius") => config.layout.inner_dot_radius = parse_int(value)?,
        (Section::Layout, "title") => config.layout.title = parse_label(value)?,
        (Section::Layout, "subtitle") => config.layout.subtitle = parse_label(value)?,

        (Section::Input, "debounce_ms") => config.input.debounce_ms = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
