#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

use bevy_ecs::prelude::*;
use log::warn;
use std::f32::consts::TAU;

use crate::components::{Frame, Obstacle, ObstacleKind, Position};
use crate::config::SpawningConfig;
use crate::difficulty::DifficultyParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Single,
    Cluster,
    Wave,
    Composite,
}

/// Per-pattern visual/behavioral knobs shared by every variant.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleStyle {
    pub kind: ObstacleKind,
    pub speed_multiplier: f32,
    pub size_multiplier: f32,
    pub should_rotate: bool,
    pub color_variation: u8,
}

/// Tagged placement descriptor. Each variant carries only the fields that
/// matter for it, so an invalid field combination cannot be expressed.
#[derive(Debug, Clone)]
pub enum ObstaclePattern {
    Single {
        style: ObstacleStyle,
    },
    Cluster {
        size: u32,
        spacing: f32,
        stagger: f32,
        style: ObstacleStyle,
    },
    Wave {
        size: u32,
        delay: f32,
        style: ObstacleStyle,
    },
    Composite {
        formation: Formation,
        style: ObstacleStyle,
    },
}

impl ObstaclePattern {
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        match self {
            ObstaclePattern::Single { .. } => PatternKind::Single,
            ObstaclePattern::Cluster { .. } => PatternKind::Cluster,
            ObstaclePattern::Wave { .. } => PatternKind::Wave,
            ObstaclePattern::Composite { .. } => PatternKind::Composite,
        }
    }

    #[must_use]
    pub fn style(&self) -> ObstacleStyle {
        match self {
            ObstaclePattern::Single { style }
            | ObstaclePattern::Cluster { style, .. }
            | ObstaclePattern::Wave { style, .. }
            | ObstaclePattern::Composite { style, .. } => *style,
        }
    }
}

/// Pre-authored four-entry formations for the composite pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formation {
    Arrow,
    Wall,
    Pincer,
    Stairs,
}

impl Formation {
    pub const ALL: [Formation; 4] = [
        Formation::Arrow,
        Formation::Wall,
        Formation::Pincer,
        Formation::Stairs,
    ];

    /// Offsets from the formation anchor. x offsets are never negative, so
    /// every member stays on the off-screen side of the anchor.
    #[must_use]
    pub fn offsets(self) -> [(f32, f32); 4] {
        match self {
            Formation::Arrow => [(0.0, 0.0), (40.0, -40.0), (40.0, 40.0), (80.0, 0.0)],
            Formation::Wall => [(0.0, -90.0), (0.0, -30.0), (0.0, 30.0), (0.0, 90.0)],
            Formation::Pincer => [(0.0, -100.0), (0.0, 100.0), (50.0, -60.0), (50.0, 60.0)],
            Formation::Stairs => [(0.0, -75.0), (35.0, -25.0), (70.0, 25.0), (105.0, 75.0)],
        }
    }
}

/// A placement the tick system will turn into an entity, possibly after a
/// delay (wave members trail their leader).
#[derive(Debug, Clone)]
pub struct PlannedSpawn {
    pub delay: f32,
    pub position: Position,
    pub obstacle: Obstacle,
}

/// Chooses what to spawn and where. Owns its RNG so a seeded spawner replays
/// the same pattern stream.
#[derive(Resource, Debug)]
pub struct ObstacleSpawner {
    rng: fastrand::Rng,
    params: DifficultyParameters,
    spawn_timer: f32,
    edge_margin: f32,
    offscreen_lead: f32,
    cluster_spacing: f32,
    pending: Vec<PlannedSpawn>,
}

impl ObstacleSpawner {
    #[must_use]
    pub fn new(config: &SpawningConfig) -> Self {
        Self::build(config, fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_seed(config: &SpawningConfig, seed: u64) -> Self {
        Self::build(config, fastrand::Rng::with_seed(seed))
    }

    fn build(config: &SpawningConfig, rng: fastrand::Rng) -> Self {
        Self {
            rng,
            params: DifficultyParameters::default(),
            spawn_timer: 0.0,
            edge_margin: config.edge_margin,
            offscreen_lead: config.offscreen_lead,
            cluster_spacing: config.cluster_spacing,
            pending: Vec::new(),
        }
    }

    /// Stores the latest difficulty snapshot. Subsequent patterns pick up the
    /// new multipliers and the kind weights shift toward cluster/wave.
    pub fn update_difficulty(&mut self, params: DifficultyParameters) {
        self.params = params;
    }

    #[must_use]
    pub fn params(&self) -> DifficultyParameters {
        self.params
    }

    /// Accumulates tick delta against the spawn interval. True when a new
    /// pattern is due; the timer resets on fire.
    pub fn advance(&mut self, delta_seconds: f32) -> bool {
        self.spawn_timer += delta_seconds;
        if self.spawn_timer >= self.params.spawn_interval {
            self.spawn_timer = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.spawn_timer = 0.0;
        self.pending.clear();
    }

    fn pattern_weights(&self) -> [(PatternKind, f32); 4] {
        let p = self.params.intensity();
        [
            (PatternKind::Single, 6.0 - 4.0 * p),
            (PatternKind::Cluster, 2.0 + 5.0 * p),
            (PatternKind::Wave, 1.0 + 5.0 * p),
            (PatternKind::Composite, 0.5 + 2.5 * p),
        ]
    }

    /// Weighted random choice of pattern kind, populated with kind-specific
    /// fields scaled off the difficulty snapshot.
    pub fn generate_pattern(&mut self) -> ObstaclePattern {
        let weights = self.pattern_weights();
        let total: f32 = weights.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.f32() * total;

        let mut kind = PatternKind::Single;
        for (candidate, weight) in weights {
            if roll < weight {
                kind = candidate;
                break;
            }
            roll -= weight;
        }

        let p = self.params.intensity();
        let style = self.random_style();

        match kind {
            PatternKind::Single => ObstaclePattern::Single { style },
            PatternKind::Cluster => ObstaclePattern::Cluster {
                size: 2 + self.rng.u32(0..=2) + u32::from(p > 0.5),
                spacing: self.cluster_spacing * (0.9 + self.rng.f32() * 0.2),
                stagger: if self.rng.f32() < 0.3 {
                    8.0 + self.rng.f32() * 10.0
                } else {
                    0.0
                },
                style,
            },
            PatternKind::Wave => ObstaclePattern::Wave {
                size: 3 + self.rng.u32(0..=3),
                delay: (0.45 - 0.25 * p).max(0.15),
                style,
            },
            PatternKind::Composite => ObstaclePattern::Composite {
                formation: Formation::ALL[self.rng.usize(0..Formation::ALL.len())],
                style,
            },
        }
    }

    fn random_style(&mut self) -> ObstacleStyle {
        let p = self.params.intensity();
        ObstacleStyle {
            kind: ObstacleKind::ALL[self.rng.usize(0..ObstacleKind::ALL.len())],
            speed_multiplier: 0.9 + self.rng.f32() * 0.2 + 0.2 * p,
            size_multiplier: 0.8 + self.rng.f32() * 0.4,
            should_rotate: self.rng.f32() < 0.25,
            color_variation: self.rng.u8(0..4),
        }
    }

    /// Entry position for a lone obstacle: just past the leading edge, with
    /// the full frame height (plus the obstacle's own overhang) to pick from.
    pub fn position_for(&mut self, half_height: f32, frame: Frame, _style: &ObstacleStyle) -> Position {
        let x = frame.max_x() + self.rng.f32() * self.offscreen_lead;
        let lo = frame.min_y() - half_height;
        let hi = frame.max_y() + half_height;
        Position::new(x, lo + self.rng.f32() * (hi - lo))
    }

    /// Anchor for a cluster: one spacing past the edge, vertically inside the
    /// margins so no member pokes out of the playable band.
    pub fn cluster_base_position(&mut self, frame: Frame, pattern: &ObstaclePattern) -> Position {
        let (spacing, _) = cluster_fields(pattern, self.cluster_spacing);
        let x = frame.max_x() + spacing;
        let lo = frame.min_y() + self.edge_margin;
        let hi = (frame.max_y() - self.edge_margin).max(lo);
        Position::new(x, lo + self.rng.f32() * (hi - lo))
    }

    /// Member `index` of a cluster: evenly spaced behind the anchor, flat by
    /// default or symmetrically staggered when the pattern asks for it.
    #[must_use]
    pub fn cluster_member_position(
        base: Position,
        index: u32,
        total: u32,
        pattern: &ObstaclePattern,
    ) -> Position {
        let (spacing, stagger) = cluster_fields(pattern, crate::game::DEFAULT_CLUSTER_SPACING);
        let x = base.x + spacing * index as f32;
        let y = if stagger == 0.0 {
            base.y
        } else {
            let centered = index as f32 - (total.saturating_sub(1)) as f32 / 2.0;
            base.y + centered * stagger
        };
        Position::new(x, y)
    }

    /// Member `index` of a wave: fixed entry x, y tracing a sinusoid across
    /// the wave so entries form a continuous curve.
    pub fn wave_position(&mut self, index: u32, total: u32, frame: Frame) -> Position {
        let x = frame.max_x() + self.edge_margin;
        let t = index as f32 / total.saturating_sub(1).max(1) as f32;
        let lo = frame.min_y() + self.edge_margin;
        let hi = (frame.max_y() - self.edge_margin).max(lo);
        let y = lo + (hi - lo) * (0.5 + 0.5 * (t * TAU).sin());
        Position::new(x, y.clamp(lo, hi))
    }

    /// The four authored positions of a composite formation, anchored just
    /// past the leading edge at mid-height.
    pub fn composite_positions(&mut self, formation: Formation, frame: Frame) -> [Position; 4] {
        let anchor = Position::new(frame.max_x() + self.edge_margin, frame.mid_y());
        let lo = frame.min_y() + self.edge_margin;
        let hi = (frame.max_y() - self.edge_margin).max(lo);
        formation
            .offsets()
            .map(|(dx, dy)| Position::new(anchor.x + dx, (anchor.y + dy).clamp(lo, hi)))
    }

    /// Expands a pattern into concrete placements. Malformed configurations
    /// (zero-size cluster/wave, non-positive spacing) degrade to the single
    /// pattern instead of aborting the tick.
    pub fn plan(&mut self, frame: Frame, pattern: &ObstaclePattern) -> Vec<PlannedSpawn> {
        let style = pattern.style();

        match *pattern {
            ObstaclePattern::Single { .. } => vec![self.plan_single(frame, &style)],
            ObstaclePattern::Cluster { size, spacing, .. } => {
                if size == 0 || spacing <= 0.0 {
                    warn!("degenerate cluster (size {size}, spacing {spacing}), spawning single");
                    return vec![self.plan_single(frame, &style)];
                }
                let base = self.cluster_base_position(frame, pattern);
                (0..size)
                    .map(|index| PlannedSpawn {
                        delay: 0.0,
                        position: Self::cluster_member_position(base, index, size, pattern),
                        obstacle: self.make_obstacle(&style),
                    })
                    .collect()
            }
            ObstaclePattern::Wave { size, delay, .. } => {
                if size == 0 {
                    warn!("degenerate wave (size 0), spawning single");
                    return vec![self.plan_single(frame, &style)];
                }
                let delay = delay.max(0.0);
                (0..size)
                    .map(|index| PlannedSpawn {
                        delay: delay * index as f32,
                        position: self.wave_position(index, size, frame),
                        obstacle: self.make_obstacle(&style),
                    })
                    .collect()
            }
            ObstaclePattern::Composite { formation, .. } => self
                .composite_positions(formation, frame)
                .into_iter()
                .map(|position| PlannedSpawn {
                    delay: 0.0,
                    position,
                    obstacle: self.make_obstacle(&style),
                })
                .collect(),
        }
    }

    fn plan_single(&mut self, frame: Frame, style: &ObstacleStyle) -> PlannedSpawn {
        let half_height = style.kind.base_half_height() * style.size_multiplier;
        PlannedSpawn {
            delay: 0.0,
            position: self.position_for(half_height, frame, style),
            obstacle: self.make_obstacle(style),
        }
    }

    fn make_obstacle(&mut self, style: &ObstacleStyle) -> Obstacle {
        Obstacle {
            kind: style.kind,
            speed_multiplier: self.params.obstacle_speed * style.speed_multiplier,
            size_multiplier: style.size_multiplier,
            rotation: style.should_rotate.then(|| self.rng.f32() * TAU),
            color_variation: style.color_variation,
        }
    }

    /// Queues delayed placements, handing back the ones due immediately.
    pub fn enqueue(&mut self, planned: Vec<PlannedSpawn>) -> Vec<PlannedSpawn> {
        let (ready, delayed): (Vec<_>, Vec<_>) =
            planned.into_iter().partition(|p| p.delay <= 0.0);
        self.pending.extend(delayed);
        ready
    }

    /// Ages the pending queue by one tick and drains the entries that came due.
    pub fn take_due(&mut self, delta_seconds: f32) -> Vec<PlannedSpawn> {
        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            p.delay -= delta_seconds;
            if p.delay <= 0.0 {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn cluster_fields(pattern: &ObstaclePattern, default_spacing: f32) -> (f32, f32) {
    match *pattern {
        ObstaclePattern::Cluster {
            spacing, stagger, ..
        } => (spacing, stagger),
        _ => (default_spacing, 0.0),
    }
}
