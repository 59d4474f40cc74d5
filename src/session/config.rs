use std::time::Duration;

use crate::{
    compose::params::CompositeParams,
    foundation::error::{SquareError, SquareResult},
};

/// Quiet period after the last slider/field event before a debounced recompute fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;
/// Environment override for [`SessionConfig::debounce_ms`].
pub const DEBOUNCE_ENV: &str = "SQUAREFIT_DEBOUNCE_MS";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub debounce_ms: u64,
    /// Params applied on every new image load and on reset.
    pub defaults: CompositeParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            defaults: CompositeParams::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> SquareResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| SquareError::validation(format!("parse session config: {e}")))?;
        Ok(cfg.normalized())
    }

    /// Defaults plus any environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = std::env::var(DEBOUNCE_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            self.debounce_ms = ms;
        }
        self
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn normalized(mut self) -> Self {
        self.defaults = self.defaults.sanitized();
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
