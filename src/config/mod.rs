pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::game::{
    DEFAULT_CLUSTER_SPACING, MAX_POWER_UP_INTERVAL, MIN_POWER_UP_INTERVAL, OFFSCREEN_LEAD,
    SPAWN_EDGE_MARGIN, STATS_EMIT_INTERVAL,
};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<TuningConfig>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(TuningConfig::default())));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub spawning: SpawningConfig,
    pub powerups: PowerUpConfig,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            spawning: SpawningConfig::default(),
            powerups: PowerUpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawningConfig {
    pub edge_margin: f32,
    pub offscreen_lead: f32,
    pub cluster_spacing: f32,
}

impl Default for SpawningConfig {
    fn default() -> Self {
        Self {
            edge_margin: SPAWN_EDGE_MARGIN,
            offscreen_lead: OFFSCREEN_LEAD,
            cluster_spacing: DEFAULT_CLUSTER_SPACING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub min_interval: f32,
    pub max_interval: f32,
    pub stats_emit_interval: f32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            min_interval: MIN_POWER_UP_INTERVAL,
            max_interval: MAX_POWER_UP_INTERVAL,
            stats_emit_interval: STATS_EMIT_INTERVAL,
        }
    }
}

impl TuningConfig {
    /// Clone of the current global config.
    #[must_use]
    pub fn current() -> TuningConfig {
        CONFIG.read().unwrap().clone()
    }

    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        if let Ok(new_config) = loader::load_config_from_file() {
            let mut config = CONFIG.write().unwrap();
            *config = new_config.sanitized();
            true
        } else {
            false
        }
    }

    /// Out-of-range values from a hand-edited file are clamped to safe
    /// minimums rather than rejected.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = SpawningConfig::default();
        if self.spawning.edge_margin < 0.0 {
            self.spawning.edge_margin = defaults.edge_margin;
        }
        if self.spawning.offscreen_lead <= 0.0 {
            self.spawning.offscreen_lead = defaults.offscreen_lead;
        }
        if self.spawning.cluster_spacing <= 0.0 {
            self.spawning.cluster_spacing = defaults.cluster_spacing;
        }

        let defaults = PowerUpConfig::default();
        if self.powerups.min_interval <= 0.0 {
            self.powerups.min_interval = defaults.min_interval;
        }
        if self.powerups.max_interval <= self.powerups.min_interval {
            self.powerups.max_interval = defaults.max_interval.max(self.powerups.min_interval);
        }
        if self.powerups.stats_emit_interval <= 0.0 {
            self.powerups.stats_emit_interval = defaults.stats_emit_interval;
        }
        self
    }
}
