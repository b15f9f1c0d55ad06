#[cfg(test)]
mod tests {
    use std::thread;

    use crate::skill::{
        AdaptiveTier, AdjustmentReason, AppliedFeedback, SkillFeedback, SkillLevel,
    };

    #[test]
    fn test_pacing_factor_strictly_decreases() {
        for pair in SkillLevel::ALL.windows(2) {
            assert!(pair[0].pacing_factor() > pair[1].pacing_factor());
        }
    }

    #[test]
    fn test_tier_intensity_strictly_increases() {
        for pair in AdaptiveTier::ALL.windows(2) {
            assert!(pair[0].intensity_factor() < pair[1].intensity_factor());
        }
    }

    #[test]
    fn test_skill_levels_are_ordered() {
        assert!(SkillLevel::Beginner < SkillLevel::Master);
        assert!(SkillLevel::Intermediate < SkillLevel::Expert);
        assert_eq!(SkillLevel::default(), SkillLevel::Beginner);
        assert_eq!(AdaptiveTier::default(), AdaptiveTier::Balanced);
    }

    #[test]
    fn test_direct_skill_override_applies() {
        let mut feedback = SkillFeedback::new();
        let handle = feedback.handle();

        assert!(handle.set_skill(SkillLevel::Expert));
        let applied = feedback.drain();

        assert_eq!(applied, vec![AppliedFeedback::Skill(SkillLevel::Expert)]);
        assert_eq!(feedback.skill, SkillLevel::Expert);
    }

    #[test]
    fn test_confident_assessment_applies() {
        let mut feedback = SkillFeedback::new();
        let handle = feedback.handle();

        handle.report_assessment(SkillLevel::Advanced, 0.9);
        let applied = feedback.drain();

        assert_eq!(applied, vec![AppliedFeedback::Skill(SkillLevel::Advanced)]);
        assert!((feedback.last_confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_uncertain_assessment_is_dropped() {
        let mut feedback = SkillFeedback::new();
        let handle = feedback.handle();

        handle.report_assessment(SkillLevel::Master, 0.2);
        let applied = feedback.drain();

        assert!(applied.is_empty());
        assert_eq!(feedback.skill, SkillLevel::Beginner);
        assert!((feedback.last_confidence - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped() {
        let mut feedback = SkillFeedback::new();
        let handle = feedback.handle();

        handle.report_assessment(SkillLevel::Novice, 7.5);
        feedback.drain();
        assert!((feedback.last_confidence - 1.0).abs() < f32::EPSILON);

        handle.report_assessment(SkillLevel::Novice, -3.0);
        feedback.drain();
        assert!(feedback.last_confidence.abs() < f32::EPSILON);
    }

    #[test]
    fn test_tier_change_applies_once() {
        let mut feedback = SkillFeedback::new();
        let handle = feedback.handle();

        handle.report_tier_change(AdaptiveTier::Hard, AdjustmentReason::PlayerExcelling);
        handle.report_tier_change(AdaptiveTier::Hard, AdjustmentReason::AiRecommendation);
        let applied = feedback.drain();

        // The repeat to the same tier is a no-op
        assert_eq!(
            applied,
            vec![AppliedFeedback::Tier(
                AdaptiveTier::Hard,
                AdjustmentReason::PlayerExcelling
            )]
        );
        assert_eq!(feedback.tier, AdaptiveTier::Hard);
    }

    #[test]
    fn test_signals_cross_threads() {
        let mut feedback = SkillFeedback::new();
        let handle = feedback.handle();

        let sender = thread::spawn(move || {
            handle.set_skill(SkillLevel::Intermediate);
            handle.report_tier_change(
                AdaptiveTier::Challenging,
                AdjustmentReason::ConsistencyImprovement,
            );
        });
        sender.join().unwrap();

        let applied = feedback.drain();
        assert_eq!(applied.len(), 2);
        assert_eq!(feedback.skill, SkillLevel::Intermediate);
        assert_eq!(feedback.tier, AdaptiveTier::Challenging);
    }

    #[test]
    fn test_drain_is_idempotent_when_queue_is_empty() {
        let mut feedback = SkillFeedback::new();
        assert!(feedback.drain().is_empty());
        assert!(feedback.drain().is_empty());
    }

    #[test]
    fn test_reason_names_match_wire_vocabulary() {
        assert_eq!(
            AdjustmentReason::PlayerStruggling.name(),
            "player_struggling"
        );
        assert_eq!(AdjustmentReason::PlayerExcelling.name(), "player_excelling");
        assert_eq!(AdaptiveTier::Nightmare.name(), "nightmare");
        assert_eq!(SkillLevel::Master.name(), "master");
    }
}
