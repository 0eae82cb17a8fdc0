//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_HISTORY_LIMIT, DEFAULT_HOVER_CACHE_RADIUS,
    DEFAULT_MONOSPACE_ADVANCE,
};
use crate::error::CoreError;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration for the editing core.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub history_limit: usize,
    pub debounce_ms: u64,
    pub hover_cache_radius: f32,
    pub monospace_advance: f32,
    pub force_monospace_mirror: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            hover_cache_radius: DEFAULT_HOVER_CACHE_RADIUS,
            monospace_advance: DEFAULT_MONOSPACE_ADVANCE,
            force_monospace_mirror: false,
        }
    }
}

/// Interprets an on/off switch such as `LLORE_FORCE_MONOSPACE_MIRROR=yes`.
///
/// `1`/`true`/`yes`/`on` enable, `0`/`false`/`no`/`off` or an empty value
/// disable, case and padding aside. Anything else yields `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Whether the switch `name` is set to an enabling value. Unset and
/// unparseable values count as off.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.trim().parse().ok())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            history_limit: env_parsed("LLORE_HISTORY_LIMIT").unwrap_or(defaults.history_limit),
            debounce_ms: env_parsed("LLORE_HISTORY_DEBOUNCE_MS").unwrap_or(defaults.debounce_ms),
            hover_cache_radius: env_parsed("LLORE_HOVER_CACHE_RADIUS")
                .unwrap_or(defaults.hover_cache_radius),
            monospace_advance: env_parsed("LLORE_MONOSPACE_ADVANCE")
                .unwrap_or(defaults.monospace_advance),
            force_monospace_mirror: env_flag_enabled("LLORE_FORCE_MONOSPACE_MIRROR"),
        }
    }

    /// Reject values the history manager or caret resolver cannot work with.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.history_limit == 0 {
            return Err(CoreError::InvalidConfig {
                key: "history_limit",
                value: self.history_limit.to_string(),
            });
        }
        if !self.hover_cache_radius.is_finite() || self.hover_cache_radius < 0.0 {
            return Err(CoreError::InvalidConfig {
                key: "hover_cache_radius",
                value: self.hover_cache_radius.to_string(),
            });
        }
        if !self.monospace_advance.is_finite() || self.monospace_advance <= 0.0 {
            return Err(CoreError::InvalidConfig {
                key: "monospace_advance",
                value: self.monospace_advance.to_string(),
            });
        }
        Ok(())
    }

    /// Default delay for debounced history records.
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
