#[cfg(test)]
mod tests {
    use crate::components::ObstacleKind;
    use crate::config::SpawningConfig;
    use crate::difficulty::parameters_for;
    use crate::game::{DEFAULT_CLUSTER_SPACING, SPAWN_EDGE_MARGIN};
    use crate::obstacles::{
        Formation, ObstaclePattern, ObstacleSpawner, ObstacleStyle, PatternKind,
    };
    use crate::tests::test_utils::test_frame;

    fn test_spawner(seed: u64) -> ObstacleSpawner {
        ObstacleSpawner::with_seed(&SpawningConfig::default(), seed)
    }

    fn test_style() -> ObstacleStyle {
        ObstacleStyle {
            kind: ObstacleKind::Block,
            speed_multiplier: 1.0,
            size_multiplier: 1.0,
            should_rotate: false,
            color_variation: 0,
        }
    }

    #[test]
    fn test_single_position_is_offscreen() {
        let mut spawner = test_spawner(7);
        let frame = test_frame();
        let style = test_style();
        let half_height = 16.0;

        for _ in 0..200 {
            let position = spawner.position_for(half_height, frame, &style);
            assert!(position.x >= frame.max_x());
            assert!(position.y >= frame.min_y() - half_height);
            assert!(position.y <= frame.max_y() + half_height);
        }
    }

    #[test]
    fn test_cluster_base_position_respects_spacing_and_margins() {
        let mut spawner = test_spawner(11);
        let frame = test_frame();
        let pattern = ObstaclePattern::Cluster {
            size: 3,
            spacing: 50.0,
            stagger: 0.0,
            style: test_style(),
        };

        for _ in 0..200 {
            let base = spawner.cluster_base_position(frame, &pattern);
            assert!(base.x >= frame.max_x() + 50.0);
            assert!(base.y >= frame.min_y() + SPAWN_EDGE_MARGIN);
            assert!(base.y <= frame.max_y() - SPAWN_EDGE_MARGIN);
        }
    }

    #[test]
    fn test_cluster_members_are_evenly_spaced() {
        let pattern = ObstaclePattern::Cluster {
            size: 3,
            spacing: 50.0,
            stagger: 0.0,
            style: test_style(),
        };
        let base = crate::components::Position::new(850.0, 300.0);

        let member = ObstacleSpawner::cluster_member_position(base, 1, 3, &pattern);
        assert!((member.x - (base.x + 50.0)).abs() < f32::EPSILON);
        assert!((member.y - base.y).abs() < f32::EPSILON);

        let member = ObstacleSpawner::cluster_member_position(base, 2, 3, &pattern);
        assert!((member.x - (base.x + 100.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_staggered_cluster_is_symmetric() {
        let pattern = ObstaclePattern::Cluster {
            size: 3,
            spacing: 50.0,
            stagger: 12.0,
            style: test_style(),
        };
        let base = crate::components::Position::new(850.0, 300.0);

        let first = ObstacleSpawner::cluster_member_position(base, 0, 3, &pattern);
        let middle = ObstacleSpawner::cluster_member_position(base, 1, 3, &pattern);
        let last = ObstacleSpawner::cluster_member_position(base, 2, 3, &pattern);

        assert!((middle.y - base.y).abs() < f32::EPSILON);
        assert!((first.y - (base.y - 12.0)).abs() < f32::EPSILON);
        assert!((last.y - (base.y + 12.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_non_cluster_pattern_falls_back_to_default_spacing() {
        let pattern = ObstaclePattern::Single { style: test_style() };
        let base = crate::components::Position::new(850.0, 300.0);

        let member = ObstacleSpawner::cluster_member_position(base, 1, 3, &pattern);
        assert!((member.x - (base.x + DEFAULT_CLUSTER_SPACING)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wave_positions_curve_inside_margins() {
        let mut spawner = test_spawner(13);
        let frame = test_frame();
        let total = 6;

        let mut ys = Vec::new();
        for index in 0..total {
            let position = spawner.wave_position(index, total, frame);
            assert!(position.x >= frame.max_x() + SPAWN_EDGE_MARGIN);
            assert!(position.y >= frame.min_y() + SPAWN_EDGE_MARGIN);
            assert!(position.y <= frame.max_y() - SPAWN_EDGE_MARGIN);
            ys.push(position.y);
        }

        // A sinusoid is not a straight line: consecutive steps change direction
        let all_equal = ys.windows(2).all(|w| (w[0] - w[1]).abs() < f32::EPSILON);
        assert!(!all_equal);
    }

    #[test]
    fn test_composite_positions_are_offscreen() {
        let mut spawner = test_spawner(17);
        let frame = test_frame();

        for formation in Formation::ALL {
            let positions = spawner.composite_positions(formation, frame);
            assert_eq!(positions.len(), 4);
            for position in positions {
                assert!(position.x >= frame.max_x() + SPAWN_EDGE_MARGIN);
            }
        }
    }

    #[test]
    fn test_degenerate_cluster_degrades_to_single() {
        let mut spawner = test_spawner(19);
        let frame = test_frame();

        let pattern = ObstaclePattern::Cluster {
            size: 0,
            spacing: 50.0,
            stagger: 0.0,
            style: test_style(),
        };
        assert_eq!(spawner.plan(frame, &pattern).len(), 1);

        let pattern = ObstaclePattern::Cluster {
            size: 3,
            spacing: -1.0,
            stagger: 0.0,
            style: test_style(),
        };
        assert_eq!(spawner.plan(frame, &pattern).len(), 1);
    }

    #[test]
    fn test_degenerate_wave_degrades_to_single() {
        let mut spawner = test_spawner(23);
        let frame = test_frame();

        let pattern = ObstaclePattern::Wave {
            size: 0,
            delay: 0.3,
            style: test_style(),
        };
        let planned = spawner.plan(frame, &pattern);
        assert_eq!(planned.len(), 1);
        assert!(planned[0].delay.abs() < f32::EPSILON);
    }

    #[test]
    fn test_wave_members_trail_their_leader() {
        let mut spawner = test_spawner(29);
        let frame = test_frame();
        let pattern = ObstaclePattern::Wave {
            size: 4,
            delay: 0.3,
            style: test_style(),
        };

        let planned = spawner.plan(frame, &pattern);
        assert_eq!(planned.len(), 4);
        for (index, spawn) in planned.iter().enumerate() {
            let expected = 0.3 * index as f32;
            assert!((spawn.delay - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_enqueue_returns_immediate_and_holds_delayed() {
        let mut spawner = test_spawner(31);
        let frame = test_frame();
        let pattern = ObstaclePattern::Wave {
            size: 4,
            delay: 0.5,
            style: test_style(),
        };

        let planned = spawner.plan(frame, &pattern);
        let ready = spawner.enqueue(planned);
        assert_eq!(ready.len(), 1);
        assert_eq!(spawner.pending_count(), 3);

        // Nothing matures before its delay
        assert!(spawner.take_due(0.25).is_empty());
        // One member per half second
        assert_eq!(spawner.take_due(0.25).len(), 1);
        assert_eq!(spawner.take_due(0.5).len(), 1);
        assert_eq!(spawner.take_due(10.0).len(), 1);
        assert_eq!(spawner.pending_count(), 0);
    }

    #[test]
    fn test_spawn_timer_fires_on_interval() {
        let mut spawner = test_spawner(37);
        spawner.update_difficulty(parameters_for(0));
        let interval = spawner.params().spawn_interval;

        assert!(!spawner.advance(interval * 0.5));
        assert!(spawner.advance(interval * 0.5));
        // Timer reset on fire
        assert!(!spawner.advance(interval * 0.1));
    }

    #[test]
    fn test_seeded_pattern_stream_is_reproducible() {
        let mut a = test_spawner(99);
        let mut b = test_spawner(99);
        a.update_difficulty(parameters_for(100));
        b.update_difficulty(parameters_for(100));

        for _ in 0..50 {
            assert_eq!(a.generate_pattern().kind(), b.generate_pattern().kind());
        }
    }

    #[test]
    fn test_difficulty_biases_away_from_singles() {
        let mut easy = test_spawner(42);
        easy.update_difficulty(parameters_for(0));
        let mut hard = test_spawner(42);
        hard.update_difficulty(parameters_for(300));

        let singles = |spawner: &mut ObstacleSpawner| {
            (0..500)
                .filter(|_| spawner.generate_pattern().kind() == PatternKind::Single)
                .count()
        };

        let easy_singles = singles(&mut easy);
        let hard_singles = singles(&mut hard);
        assert!(
            hard_singles < easy_singles,
            "expected fewer singles at high difficulty ({hard_singles} vs {easy_singles})"
        );
    }
}
