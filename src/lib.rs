pub mod components;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod game;
pub mod obstacles;
pub mod powerups;
pub mod skill;
pub mod systems;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;

/// Simulation clock. Accumulates the delta handed to each tick and never
/// reads the wall clock, so a paused session (zero ticks) ages nothing.
#[derive(Resource, Debug, Clone, Default)]
pub struct Time {
    delta: f32,
    elapsed: f32,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, delta_seconds: f32) {
        let delta = delta_seconds.max(0.0);
        self.delta = delta;
        self.elapsed += delta;
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }
}
