//! Widget configuration.
//!
//! Loaded from TOML; every section and key is optional.
//!
//! ```toml
//! [reading]
//! words_per_minute = 200
//!
//! [animation]
//! steps = 20
//! duration_ms = 300
//!
//! [autosave]
//! enabled = true
//! key = "wordcounter_saved_text"
//! interval_ms = 5000
//!
//! [actions]
//! confirm_clear_over = 100
//!
//! [display]
//! group_thousands = false
//! ```

use crate::actions::ActionPolicy;
use crate::animation::{AnimationConfig, DEFAULT_DURATION, DEFAULT_STEPS};
use crate::error::ConfigError;
use crate::metrics::{MetricsEngine, DEFAULT_WORDS_PER_MINUTE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key the draft is saved under.
pub const DEFAULT_AUTOSAVE_KEY: &str = "wordcounter_saved_text";

/// Complete widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// Reading-time estimate
    pub reading: ReadingConfig,
    /// Counter transitions
    pub animation: AnimationSettings,
    /// Draft auto-save
    pub autosave: AutosaveConfig,
    /// Clear and copy commands
    pub actions: ActionPolicy,
    /// Counter formatting
    pub display: DisplayConfig,
}

/// `[reading]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    /// Words read per minute
    pub words_per_minute: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// `[animation]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    /// Steps per transition
    pub steps: u32,
    /// Transition length in milliseconds
    pub duration_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            duration_ms: DEFAULT_DURATION.as_millis() as u64,
        }
    }
}

/// `[autosave]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutosaveConfig {
    /// Whether drafts are saved at all
    pub enabled: bool,
    /// Storage key
    pub key: String,
    /// Milliseconds between saves
    pub interval_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: DEFAULT_AUTOSAVE_KEY.to_string(),
            interval_ms: 5000,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Show counts as `1,234` instead of `1234`
    pub group_thousands: bool,
}

impl AutosaveConfig {
    /// Time between saves.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl WidgetConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::invalid(
                "reading.words_per_minute",
                "must be at least 1",
            ));
        }
        if self.animation.steps == 0 {
            return Err(ConfigError::invalid("animation.steps", "must be at least 1"));
        }
        if self.autosave.enabled && self.autosave.key.trim().is_empty() {
            return Err(ConfigError::invalid("autosave.key", "must not be empty"));
        }
        if self.autosave.enabled && self.autosave.interval_ms == 0 {
            return Err(ConfigError::invalid(
                "autosave.interval_ms",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Metrics engine using the configured reading speed.
    #[must_use]
    pub fn engine(&self) -> MetricsEngine {
        MetricsEngine::new(self.reading.words_per_minute)
    }

    /// Animation timing for the presenter.
    #[must_use]
    pub const fn animation(&self) -> AnimationConfig {
        AnimationConfig::new(
            self.animation.steps,
            Duration::from_millis(self.animation.duration_ms),
        )
    }
}
