#![warn(clippy::all, clippy::pedantic)]

pub mod integration_tests;
pub mod obstacles_tests;
pub mod skill_tests;
pub mod time_tests;

// Import test utilities
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::Time;
    use crate::components::{Frame, GameState, Viewport};
    use crate::config::TuningConfig;
    use crate::engine::Engine;
    use crate::obstacles::ObstacleSpawner;
    use crate::powerups::PowerUpScheduler;
    use crate::skill::SkillFeedback;

    #[must_use]
    pub fn test_frame() -> Frame {
        Frame::new(0.0, 0.0, 800.0, 600.0)
    }

    // Helper function to create a seeded test world with every engine resource
    #[must_use]
    pub fn create_test_world(seed: u64) -> World {
        let config = TuningConfig::default();

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(GameState::default());
        world.insert_resource(Viewport {
            frame: test_frame(),
        });
        world.insert_resource(SkillFeedback::new());
        world.insert_resource(ObstacleSpawner::with_seed(&config.spawning, seed));
        world.insert_resource(PowerUpScheduler::with_seed(
            &config.powerups,
            config.spawning.edge_margin,
            seed ^ 0xABCD,
        ));

        world
    }

    // Helper function to create a seeded engine that ignores the global config
    #[must_use]
    pub fn create_test_engine(seed: u64) -> Engine {
        let mut engine = Engine::with_config(TuningConfig::default(), Some(seed));
        engine.set_viewport(test_frame());
        engine
    }
}
