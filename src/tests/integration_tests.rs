#[cfg(test)]
mod tests {
    use crate::components::{Obstacle, Position, PowerUp};
    use crate::obstacles::ObstacleSpawner;
    use crate::skill::{AdaptiveTier, AdjustmentReason, SkillLevel};
    use crate::tests::test_utils::{create_test_engine, test_frame};

    /// Drives a full simulated session the way a game scene would: score
    /// trickling in, an off-thread assessor pushing signals, the player
    /// collecting some of what spawns.
    #[test]
    fn test_full_session() {
        let mut engine = create_test_engine(0xBEEF);
        let receiver = engine.subscribe_stats();
        let handle = engine.feedback_handle();
        engine.start();

        let assessor = std::thread::spawn(move || {
            handle.set_skill(SkillLevel::Intermediate);
            handle.report_tier_change(AdaptiveTier::Hard, AdjustmentReason::PlayerExcelling);
        });
        assessor.join().unwrap();

        let frame = test_frame();
        for step in 0u32..1200 {
            engine.tick(0.05);
            if step % 4 == 0 {
                engine.add_score(1);
            }
            if step % 100 == 0 {
                if let Some(&entity) = engine.active_power_ups().first() {
                    assert!(engine.collect_power_up(entity, None));
                }
            }
        }

        // The difficulty curve saturated and the tier shift stuck
        assert_eq!(engine.score(), 300);
        let params = engine.world.resource::<ObstacleSpawner>().params();
        assert!(params.obstacle_speed > 2.75, "tier boost missing");

        // Obstacles exist; nothing in this core moves them, so every one
        // still sits where it entered, past the leading edge
        let mut query = engine.world.query::<(&Obstacle, &Position)>();
        let mut obstacles = 0;
        for (_, position) in query.iter(&engine.world) {
            assert!(position.x >= frame.max_x());
            obstacles += 1;
        }
        assert!(obstacles > 0);

        // The ledger is internally consistent
        let stats = engine.stats();
        assert!(stats.total_spawned > 0);
        assert!(stats.total_collected <= stats.total_spawned);
        let rate = stats.collection_rate();
        assert!((0.0..=1.0).contains(&rate));

        // Snapshots flowed: at least one per collection outcome
        let snapshots = receiver.try_iter().count();
        assert!(snapshots as u32 >= stats.total_spawned);

        // No live instance has outlived its window
        for &entity in &engine.active_power_ups() {
            let power_up = engine.world.get::<PowerUp>(entity).unwrap();
            assert!(power_up.age < power_up.lifetime);
        }

        // Teardown leaves the ledger queryable until the explicit reset
        engine.stop();
        engine.clear_power_ups(false);
        assert!(engine.active_power_ups().is_empty());
        assert_eq!(engine.stats().total_spawned, stats.total_spawned);

        engine.reset();
        assert_eq!(engine.stats().total_spawned, 0);
    }
}
