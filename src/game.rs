#![warn(clippy::all, clippy::pedantic)]

// Difficulty progression
pub const STARTING_DIFFICULTY_LEVEL: u32 = 1;
pub const MAX_DIFFICULTY_LEVEL: u32 = 6;

// Score thresholds - reaching the score promotes the run to the level
pub const DIFFICULTY_SCORE_THRESHOLDS: &[(u32, u32)] = &[
    (15, 2),  // Reach 15 points to reach level 2
    (35, 3),  // etc.
    (75, 4),
    (150, 5),
    (250, 6),
];

// Obstacle pacing (seconds / scene units per second)
pub const BASE_SPAWN_INTERVAL: f32 = 2.0;
pub const SPAWN_INTERVAL_STEP: f32 = 0.28; // shaved off per difficulty level
pub const MIN_SPAWN_INTERVAL: f32 = 0.6;

pub const BASE_OBSTACLE_SPEED: f32 = 1.0;
pub const OBSTACLE_SPEED_STEP: f32 = 0.35;
pub const MAX_OBSTACLE_SPEED: f32 = 3.5;

pub const SCORE_MULTIPLIER_STEP: f32 = 0.25;
pub const MAX_SCORE_MULTIPLIER: f32 = 3.0;

// Power-up pacing
pub const BASE_POWER_UP_CHANCE: f32 = 0.05;
pub const POWER_UP_CHANCE_STEP: f32 = 0.04;
pub const MAX_POWER_UP_CHANCE: f32 = 0.35;

pub const MIN_POWER_UP_INTERVAL: f32 = 0.5;
pub const MAX_POWER_UP_INTERVAL: f32 = 10.0;

// Spawn geometry (scene units)
pub const SPAWN_EDGE_MARGIN: f32 = 30.0;
pub const OFFSCREEN_LEAD: f32 = 20.0; // how far past the leading edge entries appear
pub const DEFAULT_CLUSTER_SPACING: f32 = 50.0;

// Stats snapshots are also pushed on a timer, not only on collection events
pub const STATS_EMIT_INTERVAL: f32 = 5.0;

// Skill assessments below this confidence are logged and dropped
pub const ASSESSMENT_CONFIDENCE_FLOOR: f32 = 0.5;
