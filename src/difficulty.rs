#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

use crate::game::{
    BASE_OBSTACLE_SPEED, BASE_POWER_UP_CHANCE, BASE_SPAWN_INTERVAL, DIFFICULTY_SCORE_THRESHOLDS,
    MAX_OBSTACLE_SPEED, MAX_POWER_UP_CHANCE, MAX_SCORE_MULTIPLIER, MIN_SPAWN_INTERVAL,
    OBSTACLE_SPEED_STEP, POWER_UP_CHANCE_STEP, SCORE_MULTIPLIER_STEP, SPAWN_INTERVAL_STEP,
    STARTING_DIFFICULTY_LEVEL,
};
use crate::skill::AdaptiveTier;

/// Generation parameters derived from the running score. Produced fresh per
/// query; callers never mutate one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParameters {
    pub spawn_interval: f32,
    pub obstacle_speed: f32,
    pub score_multiplier: f32,
    pub power_up_spawn_chance: f32,
}

impl Default for DifficultyParameters {
    fn default() -> Self {
        parameters_for(0)
    }
}

impl DifficultyParameters {
    /// Fraction of the way from the easiest to the hardest parameter set.
    /// Pattern selection biases off this rather than re-deriving the level.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        let span = MAX_OBSTACLE_SPEED - BASE_OBSTACLE_SPEED;
        ((self.obstacle_speed - BASE_OBSTACLE_SPEED) / span).clamp(0.0, 1.0)
    }

    /// Applies an externally assessed difficulty tier as a bounded scale.
    /// The curve stays monotonic in score for any fixed tier.
    #[must_use]
    pub fn adjusted_for(self, tier: AdaptiveTier) -> Self {
        let factor = tier.intensity_factor();
        Self {
            spawn_interval: (self.spawn_interval / factor).max(MIN_SPAWN_INTERVAL * 0.5),
            obstacle_speed: (self.obstacle_speed * factor).min(MAX_OBSTACLE_SPEED * 1.5),
            score_multiplier: self.score_multiplier,
            power_up_spawn_chance: self.power_up_spawn_chance,
        }
    }
}

/// Monotonic step function from score to discrete difficulty level.
#[must_use]
pub fn level_for(score: u32) -> u32 {
    let mut level = STARTING_DIFFICULTY_LEVEL;
    for &(threshold, threshold_level) in DIFFICULTY_SCORE_THRESHOLDS {
        if score >= threshold {
            level = threshold_level;
        } else {
            break;
        }
    }
    level
}

/// Deterministic, total mapping from score to generation parameters.
/// Arbitrarily large scores saturate at the level-6 ceiling.
#[must_use]
pub fn parameters_for(score: u32) -> DifficultyParameters {
    let steps = (level_for(score) - STARTING_DIFFICULTY_LEVEL) as f32;

    DifficultyParameters {
        spawn_interval: (BASE_SPAWN_INTERVAL - steps * SPAWN_INTERVAL_STEP)
            .max(MIN_SPAWN_INTERVAL),
        obstacle_speed: (BASE_OBSTACLE_SPEED + steps * OBSTACLE_SPEED_STEP)
            .min(MAX_OBSTACLE_SPEED),
        score_multiplier: (1.0 + steps * SCORE_MULTIPLIER_STEP).min(MAX_SCORE_MULTIPLIER),
        power_up_spawn_chance: (BASE_POWER_UP_CHANCE + steps * POWER_UP_CHANCE_STEP)
            .min(MAX_POWER_UP_CHANCE),
    }
}
