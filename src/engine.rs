#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;

use crate::Time;
use crate::components::{Frame, GameState, PowerUp, Viewport};
use crate::config::TuningConfig;
use crate::obstacles::ObstacleSpawner;
use crate::powerups::{EngineObserver, ObserverToken, PowerUpScheduler, SpawningStats};
use crate::skill::{FeedbackHandle, SkillFeedback};
use crate::systems;

/// The spawning core. Owns the world the generators live in; the consuming
/// game drives it with score updates and ticks, and queries spawned
/// obstacle/power-up entities off `world` to instantiate them.
pub struct Engine {
    pub world: World,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::build(TuningConfig::current().sanitized(), None)
    }

    /// Seeded construction replays the exact same spawn stream, which is what
    /// the property tests lean on.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(TuningConfig::current().sanitized(), Some(seed))
    }

    #[must_use]
    pub fn with_config(config: TuningConfig, seed: Option<u64>) -> Self {
        Self::build(config.sanitized(), seed)
    }

    fn build(config: TuningConfig, seed: Option<u64>) -> Self {
        let spawner = match seed {
            Some(seed) => ObstacleSpawner::with_seed(&config.spawning, seed),
            None => ObstacleSpawner::new(&config.spawning),
        };
        let scheduler = match seed {
            // Offset so the two generators don't mirror each other's rolls
            Some(seed) => PowerUpScheduler::with_seed(
                &config.powerups,
                config.spawning.edge_margin,
                seed.wrapping_add(0x9E37_79B9),
            ),
            None => PowerUpScheduler::new(&config.powerups, config.spawning.edge_margin),
        };

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(GameState::default());
        world.insert_resource(Viewport::default());
        world.insert_resource(SkillFeedback::new());
        world.insert_resource(spawner);
        world.insert_resource(scheduler);

        Self { world }
    }

    /// One cooperative update step. All timers advance by `delta_seconds`
    /// only; a paused game simply stops calling this.
    pub fn tick(&mut self, delta_seconds: f32) {
        let delta_seconds = delta_seconds.max(0.0);
        self.world.resource_mut::<Time>().advance(delta_seconds);

        systems::feedback_drain_system(&mut self.world);
        systems::difficulty_sync_system(&mut self.world);
        systems::obstacle_spawn_system(&mut self.world, delta_seconds);
        systems::power_up_system(&mut self.world, delta_seconds);
    }

    pub fn set_viewport(&mut self, frame: Frame) {
        self.world.resource_mut::<Viewport>().frame = frame;
        self.world
            .resource_mut::<PowerUpScheduler>()
            .update_frame(frame);
    }

    pub fn set_score(&mut self, score: u32) {
        self.world.resource_mut::<GameState>().score = score;
    }

    pub fn add_score(&mut self, points: u32) {
        let mut state = self.world.resource_mut::<GameState>();
        state.score = state.score.saturating_add(points);
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.world.resource::<GameState>().score
    }

    pub fn start(&mut self) {
        self.world.resource_mut::<PowerUpScheduler>().start();
    }

    pub fn stop(&mut self) {
        self.world.resource_mut::<PowerUpScheduler>().stop();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.world.resource::<PowerUpScheduler>().is_running()
    }

    /// Sender half for the external assessment process. Cloneable and
    /// thread-safe; signals land at the next tick.
    #[must_use]
    pub fn feedback_handle(&self) -> FeedbackHandle {
        self.world.resource::<SkillFeedback>().handle()
    }

    pub fn subscribe_stats(&mut self) -> Receiver<SpawningStats> {
        self.world.resource_mut::<PowerUpScheduler>().subscribe()
    }

    pub fn register_observer(&mut self, observer: Box<dyn EngineObserver>) -> ObserverToken {
        self.world
            .resource_mut::<PowerUpScheduler>()
            .register_observer(observer)
    }

    pub fn unregister_observer(&mut self, token: ObserverToken) -> bool {
        self.world
            .resource_mut::<PowerUpScheduler>()
            .unregister_observer(token)
    }

    /// The consuming layer reports the player touched a live power-up.
    pub fn collect_power_up(&mut self, entity: Entity, collector: Option<Entity>) -> bool {
        systems::collect_power_up(&mut self.world, entity, collector)
    }

    pub fn active_power_ups(&mut self) -> Vec<Entity> {
        self.world
            .query_filtered::<Entity, With<PowerUp>>()
            .iter(&self.world)
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> SpawningStats {
        self.world.resource::<PowerUpScheduler>().stats()
    }

    pub fn clear_power_ups(&mut self, reset_stats: bool) {
        systems::clear_power_ups(&mut self.world, reset_stats);
    }

    /// New-game teardown: every spawned entity goes, timers and the stats
    /// ledger reset. The viewport, observers, subscribers, and the player's
    /// skill profile carry over.
    pub fn reset(&mut self) {
        systems::clear_obstacles(&mut self.world);
        systems::clear_power_ups(&mut self.world, true);
        self.world.resource_mut::<GameState>().score = 0;
        self.world.insert_resource(Time::new());
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
