//! Configuration type definitions
//!
//! These types represent the appliance configuration. Validation happens
//! here, before any value reaches the timer engine or the ring geometry,
//! because both divide by the configured duration.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest countdown that can be configured (minutes)
pub const MIN_DURATION_MINUTES: u8 = 1;

/// Longest countdown that can be configured (minutes)
///
/// Bounded by how many inner-ring dots fit on the panel.
pub const MAX_DURATION_MINUTES: u8 = 60;

/// Default countdown length (minutes)
pub const DEFAULT_DURATION_MINUTES: u8 = 25;

/// Number of preset buttons on the second row
pub const PRESET_COUNT: usize = 3;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum image path length
pub const MAX_PATH_LEN: usize = 48;

/// Scheduler loop delay between iterations
pub const LOOP_DELAY_MS: u32 = 100;

/// How long a pressed button stays highlighted
pub const PRESS_HOLD_MS: u32 = 200;

/// Hold time of each black/white stage of the anti-ghost flash
pub const FLASH_STAGE_MS: u32 = 100;

/// Completion chime: number of pulses
pub const CHIME_PULSES: u8 = 4;

/// Completion chime: tone frequency
pub const CHIME_FREQUENCY_HZ: u16 = 600;

/// Completion chime: length of each tone
pub const CHIME_TONE_MS: u32 = 500;

/// Completion chime: start-to-start spacing of pulses
pub const CHIME_SPACING_MS: u32 = 1000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Duration outside `MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES`
    InvalidDuration(u8),
    /// A polling interval or timeout is zero
    InvalidInterval,
    /// Radii are zero or the inner ring is not inside the outer ring
    InvalidGeometry,
    /// Lock image path is empty or not absolute
    InvalidPath,
}

/// Validated countdown length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerConfig {
    duration_minutes: u8,
}

impl TimerConfig {
    /// Create a timer config, rejecting durations the ring cannot show
    pub fn new(duration_minutes: u8) -> Result<Self, ConfigError> {
        validate_duration(duration_minutes)?;
        Ok(Self { duration_minutes })
    }

    /// Countdown length in minutes (always at least 1)
    pub fn duration_minutes(&self) -> u8 {
        self.duration_minutes
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

/// What a preset button does while a countdown is running or paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PresetPolicy {
    /// Stop the countdown, discard progress and apply the new duration
    #[default]
    ForceApply,
    /// Ignore the preset until the countdown is stopped or finished
    RejectWhileActive,
}

/// Countdown settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerSettings {
    /// Duration selected at boot (minutes)
    pub default_minutes: u8,
    /// Preset button durations, left to right (minutes)
    pub presets: [u8; PRESET_COUNT],
    /// Preset behavior while a countdown is active
    pub preset_policy: PresetPolicy,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_minutes: DEFAULT_DURATION_MINUTES,
            presets: [25, 5, 30],
            preset_policy: PresetPolicy::ForceApply,
        }
    }
}

/// Idle, battery and suspend settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerSettings {
    /// Idle time before the lock screen and suspend (seconds)
    pub idle_timeout_s: u32,
    /// Battery sampling interval (seconds)
    pub battery_interval_s: u32,
    /// Lock-screen image path on the image store
    pub lock_image: String<MAX_PATH_LEN>,
    /// How long the lock screen settles before suspend (ms)
    pub lock_settle_ms: u32,
}

impl PowerSettings {
    /// Idle timeout in milliseconds
    pub fn idle_timeout_ms(&self) -> u64 {
        self.idle_timeout_s as u64 * 1000
    }

    /// Battery interval in milliseconds
    pub fn battery_interval_ms(&self) -> u64 {
        self.battery_interval_s as u64 * 1000
    }
}

impl Default for PowerSettings {
    fn default() -> Self {
        let mut lock_image = String::new();
        let _ = lock_image.push_str("/pomodoro/pomodoro.png");
        Self {
            idle_timeout_s: 300,
            battery_interval_s: 60,
            lock_image,
            lock_settle_ms: 2000,
        }
    }
}

/// Ring and label layout
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutSettings {
    /// Seconds ring radius (px)
    pub outer_radius: u32,
    /// Minutes ring radius (px)
    pub inner_radius: u32,
    /// Seconds dot radius (px)
    pub outer_dot_radius: u32,
    /// Minutes dot radius (px)
    pub inner_dot_radius: u32,
    /// Title below the rings
    pub title: String<MAX_LABEL_LEN>,
    /// Subtitle below the title
    pub subtitle: String<MAX_LABEL_LEN>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let mut title = String::new();
        let _ = title.push_str("POMODORO");
        let mut subtitle = String::new();
        let _ = subtitle.push_str("epaper");
        Self {
            outer_radius: 220,
            inner_radius: 170,
            outer_dot_radius: 4,
            inner_dot_radius: 6,
            title,
            subtitle,
        }
    }
}

/// Touch input settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputSettings {
    /// Minimum time between two accepted presses (ms)
    pub debounce_ms: u32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { debounce_ms: 50 }
    }
}

/// Complete appliance configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApplianceConfig {
    /// Config format version
    pub version: u8,
    pub timer: TimerSettings,
    pub power: PowerSettings,
    pub layout: LayoutSettings,
    pub input: InputSettings,
}

impl Default for ApplianceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            timer: TimerSettings::default(),
            power: PowerSettings::default(),
            layout: LayoutSettings::default(),
            input: InputSettings::default(),
        }
    }
}

impl ApplianceConfig {
    /// Check every value that later code divides by or relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_duration(self.timer.default_minutes)?;
        for &preset in &self.timer.presets {
            validate_duration(preset)?;
        }

        if self.power.idle_timeout_s == 0 || self.power.battery_interval_s == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.power.lock_image.is_empty() || !self.power.lock_image.starts_with('/') {
            return Err(ConfigError::InvalidPath);
        }

        let layout = &self.layout;
        if layout.inner_radius == 0
            || layout.outer_dot_radius == 0
            || layout.inner_dot_radius == 0
            || layout.inner_radius.saturating_add(layout.inner_dot_radius)
                >= layout.outer_radius - layout.outer_dot_radius.min(layout.outer_radius)
        {
            return Err(ConfigError::InvalidGeometry);
        }

        Ok(())
    }

    /// Timer config for the boot duration
    pub fn timer_config(&self) -> Result<TimerConfig, ConfigError> {
        TimerConfig::new(self.timer.default_minutes)
    }
}

fn validate_duration(minutes: u8) -> Result<(), ConfigError> {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration(minutes))
    }
}
