#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::game::ASSESSMENT_CONFIDENCE_FLOOR;

/// Externally assessed player proficiency. The engine only consumes these;
/// the assessment itself happens in a separate process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 6] = [
        SkillLevel::Beginner,
        SkillLevel::Novice,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
        SkillLevel::Master,
    ];

    /// Scales the power-up spawn interval down as proficiency rises, so a
    /// stronger player waits less for the next pickup.
    #[must_use]
    pub fn pacing_factor(self) -> f32 {
        match self {
            SkillLevel::Beginner => 1.0,
            SkillLevel::Novice => 0.92,
            SkillLevel::Intermediate => 0.84,
            SkillLevel::Advanced => 0.76,
            SkillLevel::Expert => 0.68,
            SkillLevel::Master => 0.6,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Novice => "novice",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
            SkillLevel::Master => "master",
        }
    }
}

/// Difficulty tier chosen by the external adaptive-difficulty process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AdaptiveTier {
    VeryEasy,
    Easy,
    #[default]
    Balanced,
    Challenging,
    Hard,
    VeryHard,
    Expert,
    Nightmare,
}

impl AdaptiveTier {
    pub const ALL: [AdaptiveTier; 8] = [
        AdaptiveTier::VeryEasy,
        AdaptiveTier::Easy,
        AdaptiveTier::Balanced,
        AdaptiveTier::Challenging,
        AdaptiveTier::Hard,
        AdaptiveTier::VeryHard,
        AdaptiveTier::Expert,
        AdaptiveTier::Nightmare,
    ];

    #[must_use]
    pub fn intensity_factor(self) -> f32 {
        match self {
            AdaptiveTier::VeryEasy => 0.7,
            AdaptiveTier::Easy => 0.85,
            AdaptiveTier::Balanced => 1.0,
            AdaptiveTier::Challenging => 1.1,
            AdaptiveTier::Hard => 1.2,
            AdaptiveTier::VeryHard => 1.3,
            AdaptiveTier::Expert => 1.4,
            AdaptiveTier::Nightmare => 1.5,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AdaptiveTier::VeryEasy => "very_easy",
            AdaptiveTier::Easy => "easy",
            AdaptiveTier::Balanced => "balanced",
            AdaptiveTier::Challenging => "challenging",
            AdaptiveTier::Hard => "hard",
            AdaptiveTier::VeryHard => "very_hard",
            AdaptiveTier::Expert => "expert",
            AdaptiveTier::Nightmare => "nightmare",
        }
    }
}

/// Why the external process changed the tier. Forwarded to observers verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentReason {
    PlayerStruggling,
    PlayerExcelling,
    FatigueDetected,
    LearningNewPatterns,
    RiskTakingAdjustment,
    ConsistencyImprovement,
    AiRecommendation,
}

impl AdjustmentReason {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AdjustmentReason::PlayerStruggling => "player_struggling",
            AdjustmentReason::PlayerExcelling => "player_excelling",
            AdjustmentReason::FatigueDetected => "fatigue_detected",
            AdjustmentReason::LearningNewPatterns => "learning_new_patterns",
            AdjustmentReason::RiskTakingAdjustment => "risk_taking_adjustment",
            AdjustmentReason::ConsistencyImprovement => "consistency_improvement",
            AdjustmentReason::AiRecommendation => "ai_recommendation",
        }
    }
}

/// Signal pushed by the external assessment process.
#[derive(Debug, Clone, Copy)]
pub enum FeedbackSignal {
    TierChange {
        tier: AdaptiveTier,
        reason: AdjustmentReason,
    },
    Assessment {
        level: SkillLevel,
        confidence: f32,
    },
    SetSkill(SkillLevel),
}

/// A change the drain actually adopted this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedFeedback {
    Tier(AdaptiveTier, AdjustmentReason),
    Skill(SkillLevel),
}

/// Cloneable sender half handed to external threads. Signals queue up and are
/// applied on the update thread at the next tick; neither generator is
/// internally synchronized, so nothing mutates engine state from here.
#[derive(Clone)]
pub struct FeedbackHandle {
    sender: Sender<FeedbackSignal>,
}

impl FeedbackHandle {
    /// Returns false when the queue is full or the engine is gone; external
    /// assessment is advisory, so the caller just drops the signal.
    pub fn send(&self, signal: FeedbackSignal) -> bool {
        self.sender.try_send(signal).is_ok()
    }

    pub fn report_tier_change(&self, tier: AdaptiveTier, reason: AdjustmentReason) -> bool {
        self.send(FeedbackSignal::TierChange { tier, reason })
    }

    pub fn report_assessment(&self, level: SkillLevel, confidence: f32) -> bool {
        self.send(FeedbackSignal::Assessment { level, confidence })
    }

    pub fn set_skill(&self, level: SkillLevel) -> bool {
        self.send(FeedbackSignal::SetSkill(level))
    }
}

/// Receiving side, owned by the world. `drain` is the only place queued
/// signals become engine state.
#[derive(Resource)]
pub struct SkillFeedback {
    receiver: Receiver<FeedbackSignal>,
    handle: FeedbackHandle,
    pub skill: SkillLevel,
    pub tier: AdaptiveTier,
    pub last_confidence: f32,
}

impl SkillFeedback {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = bounded(64);
        Self {
            receiver,
            handle: FeedbackHandle { sender },
            skill: SkillLevel::default(),
            tier: AdaptiveTier::default(),
            last_confidence: 0.0,
        }
    }

    #[must_use]
    pub fn handle(&self) -> FeedbackHandle {
        self.handle.clone()
    }

    /// Applies every queued signal and reports the changes that stuck.
    pub fn drain(&mut self) -> Vec<AppliedFeedback> {
        let mut applied = Vec::new();

        while let Ok(signal) = self.receiver.try_recv() {
            match signal {
                FeedbackSignal::TierChange { tier, reason } => {
                    if tier == self.tier {
                        trace!("tier change to current tier {}, ignored", tier.name());
                    } else {
                        self.tier = tier;
                        applied.push(AppliedFeedback::Tier(tier, reason));
                    }
                }
                FeedbackSignal::Assessment { level, confidence } => {
                    let confidence = confidence.clamp(0.0, 1.0);
                    self.last_confidence = confidence;

                    if confidence < ASSESSMENT_CONFIDENCE_FLOOR {
                        debug!(
                            "dropping low-confidence assessment: {} at {confidence:.2}",
                            level.name()
                        );
                    } else if level != self.skill {
                        self.skill = level;
                        applied.push(AppliedFeedback::Skill(level));
                    }
                }
                FeedbackSignal::SetSkill(level) => {
                    if level != self.skill {
                        self.skill = level;
                        applied.push(AppliedFeedback::Skill(level));
                    }
                }
            }
        }

        applied
    }
}

impl Default for SkillFeedback {
    fn default() -> Self {
        Self::new()
    }
}
