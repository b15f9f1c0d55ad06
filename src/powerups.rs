#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

use crate::components::{Frame, Position};
use crate::config::PowerUpConfig;
use crate::difficulty::DifficultyParameters;
use crate::skill::{AdaptiveTier, AdjustmentReason, SkillLevel};

/// Rarity tier. Spawn weight falls and visual emphasis rises with the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PowerUpRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl PowerUpRarity {
    pub const ALL: [PowerUpRarity; 4] = [
        PowerUpRarity::Common,
        PowerUpRarity::Rare,
        PowerUpRarity::Epic,
        PowerUpRarity::Legendary,
    ];

    #[must_use]
    pub fn spawn_weight(self) -> f32 {
        match self {
            PowerUpRarity::Common => 1.0,
            PowerUpRarity::Rare => 0.4,
            PowerUpRarity::Epic => 0.15,
            PowerUpRarity::Legendary => 0.05,
        }
    }

    #[must_use]
    pub fn glow_intensity(self) -> f32 {
        match self {
            PowerUpRarity::Common => 0.2,
            PowerUpRarity::Rare => 0.45,
            PowerUpRarity::Epic => 0.7,
            PowerUpRarity::Legendary => 1.0,
        }
    }

    /// How long an uncollected instance stays on screen. Rarer tiers linger
    /// longer; this is not the buff duration a collected power-up grants.
    #[must_use]
    pub fn screen_lifetime(self) -> f32 {
        match self {
            PowerUpRarity::Common => 6.0,
            PowerUpRarity::Rare => 8.0,
            PowerUpRarity::Epic => 10.0,
            PowerUpRarity::Legendary => 12.0,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PowerUpRarity::Common => "common",
            PowerUpRarity::Rare => "rare",
            PowerUpRarity::Epic => "epic",
            PowerUpRarity::Legendary => "legendary",
        }
    }
}

/// The fixed power-up catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PowerUpKind {
    Shield,
    ScoreBoost,
    SlowMotion,
    Shrink,
    Magnet,
    Ghost,
    Star,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Shield,
        PowerUpKind::ScoreBoost,
        PowerUpKind::SlowMotion,
        PowerUpKind::Shrink,
        PowerUpKind::Magnet,
        PowerUpKind::Ghost,
        PowerUpKind::Star,
    ];

    #[must_use]
    pub fn rarity(self) -> PowerUpRarity {
        match self {
            PowerUpKind::Shield | PowerUpKind::ScoreBoost => PowerUpRarity::Common,
            PowerUpKind::SlowMotion | PowerUpKind::Shrink => PowerUpRarity::Rare,
            PowerUpKind::Magnet | PowerUpKind::Ghost => PowerUpRarity::Epic,
            PowerUpKind::Star => PowerUpRarity::Legendary,
        }
    }

    #[must_use]
    pub fn base_color(self) -> (u8, u8, u8) {
        match self {
            PowerUpKind::Shield => (64, 156, 255),
            PowerUpKind::ScoreBoost => (255, 214, 64),
            PowerUpKind::SlowMotion => (120, 220, 232),
            PowerUpKind::Shrink => (168, 255, 120),
            PowerUpKind::Magnet => (232, 96, 255),
            PowerUpKind::Ghost => (200, 200, 216),
            PowerUpKind::Star => (255, 160, 48),
        }
    }

    /// How long the buff lasts once collected.
    #[must_use]
    pub fn active_duration(self) -> f32 {
        match self {
            PowerUpKind::Shield => 5.0,
            PowerUpKind::ScoreBoost => 8.0,
            PowerUpKind::SlowMotion => 4.0,
            PowerUpKind::Shrink => 6.0,
            PowerUpKind::Magnet => 7.0,
            PowerUpKind::Ghost => 3.0,
            PowerUpKind::Star => 5.0,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Blocks one obstacle hit",
            PowerUpKind::ScoreBoost => "Doubles points for a short time",
            PowerUpKind::SlowMotion => "Slows every obstacle down",
            PowerUpKind::Shrink => "Shrinks the player",
            PowerUpKind::Magnet => "Pulls nearby pickups in",
            PowerUpKind::Ghost => "Pass through obstacles",
            PowerUpKind::Star => "Invincible, with double points",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::ScoreBoost => "score_boost",
            PowerUpKind::SlowMotion => "slow_motion",
            PowerUpKind::Shrink => "shrink",
            PowerUpKind::Magnet => "magnet",
            PowerUpKind::Ghost => "ghost",
            PowerUpKind::Star => "star",
        }
    }

    #[must_use]
    pub fn is_rare(self) -> bool {
        self.rarity() != PowerUpRarity::Common
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TypeStats {
    pub spawned: u32,
    pub collected: u32,
}

impl TypeStats {
    #[must_use]
    pub fn rate(&self) -> f32 {
        self.collected as f32 / self.spawned.max(1) as f32
    }
}

/// Collection ledger. Lives for the whole session; mutated only by
/// `record`, cleared only on explicit request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpawningStats {
    pub total_spawned: u32,
    pub total_collected: u32,
    pub per_type: HashMap<PowerUpKind, TypeStats>,
}

impl SpawningStats {
    #[must_use]
    pub fn collection_rate(&self) -> f32 {
        self.total_collected as f32 / self.total_spawned.max(1) as f32
    }

    #[must_use]
    pub fn rate_for(&self, kind: PowerUpKind) -> f32 {
        self.per_type.get(&kind).map_or(0.0, TypeStats::rate)
    }

    pub fn record(&mut self, kind: PowerUpKind, success: bool) {
        self.total_spawned += 1;
        let entry = self.per_type.entry(kind).or_default();
        entry.spawned += 1;
        if success {
            self.total_collected += 1;
            entry.collected += 1;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Snapshot handed to observers on every lifecycle notification.
#[derive(Debug, Clone, Copy)]
pub struct PowerUpEvent {
    pub entity: Entity,
    pub kind: PowerUpKind,
    pub position: Position,
}

/// Delegate-style callbacks, modeled as an explicit registry instead of a
/// protocol conformance. Every hook defaults to a no-op.
pub trait EngineObserver: Send + Sync {
    fn on_spawn(&mut self, _event: &PowerUpEvent) {}
    fn on_collect(&mut self, _event: &PowerUpEvent, _collector: Option<Entity>) {}
    fn on_expire(&mut self, _event: &PowerUpEvent) {}
    fn on_difficulty_shift(&mut self, _tier: AdaptiveTier, _reason: AdjustmentReason) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverToken(u64);

const BALANCE_MIN_SAMPLES: u32 = 4;

/// Decides when and what to spawn. Owns the stats ledger, the observer
/// registry, and the outbound snapshot channel.
#[derive(Resource)]
pub struct PowerUpScheduler {
    rng: fastrand::Rng,
    running: bool,
    spawn_timer: f32,
    spawn_interval: f32,
    stats_timer: f32,
    skill: SkillLevel,
    params: DifficultyParameters,
    frame: Frame,
    stats: SpawningStats,
    min_interval: f32,
    max_interval: f32,
    stats_emit_interval: f32,
    edge_margin: f32,
    observers: Vec<(u64, Box<dyn EngineObserver>)>,
    next_token: u64,
    subscribers: Vec<Sender<SpawningStats>>,
}

impl PowerUpScheduler {
    #[must_use]
    pub fn new(config: &PowerUpConfig, edge_margin: f32) -> Self {
        Self::build(config, edge_margin, fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_seed(config: &PowerUpConfig, edge_margin: f32, seed: u64) -> Self {
        Self::build(config, edge_margin, fastrand::Rng::with_seed(seed))
    }

    fn build(config: &PowerUpConfig, edge_margin: f32, rng: fastrand::Rng) -> Self {
        let mut scheduler = Self {
            rng,
            running: false,
            spawn_timer: 0.0,
            spawn_interval: config.max_interval,
            stats_timer: 0.0,
            skill: SkillLevel::default(),
            params: DifficultyParameters::default(),
            frame: Frame::default(),
            stats: SpawningStats::default(),
            min_interval: config.min_interval,
            max_interval: config.max_interval,
            stats_emit_interval: config.stats_emit_interval,
            edge_margin,
            observers: Vec::new(),
            next_token: 0,
            subscribers: Vec::new(),
        };
        scheduler.spawn_interval = scheduler.base_spawn_interval();
        scheduler
    }

    /// Starts the tick-driven spawn loop.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops the loop. Safe mid-tick; no timer survives the stop.
    pub fn stop(&mut self) {
        self.running = false;
        self.spawn_timer = 0.0;
        self.stats_timer = 0.0;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Recomputes the baseline interval from a fresh difficulty/skill pair.
    /// Only future spawn decisions see the change.
    pub fn update_config(&mut self, params: DifficultyParameters, skill: SkillLevel, frame: Frame) {
        self.params = params;
        self.skill = skill;
        self.frame = frame.sanitized();
        self.spawn_interval = self.base_spawn_interval();
    }

    /// Reparents future spawns onto a new frame; active instances keep the
    /// positions they were given.
    pub fn update_frame(&mut self, frame: Frame) {
        self.frame = frame.sanitized();
    }

    pub fn update_difficulty(&mut self, params: DifficultyParameters) {
        self.params = params;
        self.spawn_interval = self.base_spawn_interval();
    }

    pub fn update_skill(&mut self, skill: SkillLevel) {
        self.skill = skill;
        self.spawn_interval = self.base_spawn_interval();
    }

    #[must_use]
    pub fn skill(&self) -> SkillLevel {
        self.skill
    }

    /// Seconds between spawn attempts: shrinks as the difficulty-supplied
    /// spawn chance grows and as the player's skill tier rises.
    #[must_use]
    pub fn base_spawn_interval(&self) -> f32 {
        let raw = self.max_interval
            * (1.0 - self.params.power_up_spawn_chance)
            * self.skill.pacing_factor();
        raw.clamp(self.min_interval, self.max_interval)
    }

    /// Accumulates tick delta; true when a spawn is due. Never fires while
    /// stopped.
    pub fn due_spawn(&mut self, delta_seconds: f32) -> bool {
        if !self.running {
            return false;
        }
        self.spawn_timer += delta_seconds;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Periodic snapshot cadence, independent of collection events.
    pub fn due_stats_emit(&mut self, delta_seconds: f32) -> bool {
        if !self.running {
            return false;
        }
        self.stats_timer += delta_seconds;
        if self.stats_timer >= self.stats_emit_interval {
            self.stats_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Weighted draw over the full catalog by rarity, softly damped for types
    /// the player already collects reliably. Always returns a catalog entry.
    pub fn select_type(&mut self) -> PowerUpKind {
        let weights: Vec<f32> = PowerUpKind::ALL
            .iter()
            .map(|&kind| kind.rarity().spawn_weight() * self.balance_modifier(kind))
            .collect();
        let total: f32 = weights.iter().sum();
        let mut roll = self.rng.f32() * total;

        for (&kind, &weight) in PowerUpKind::ALL.iter().zip(weights.iter()) {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        PowerUpKind::ALL[PowerUpKind::ALL.len() - 1]
    }

    /// Soft self-balancing: a type the player collects almost every time gets
    /// modestly damped, a type they keep missing gets a modest boost. Never a
    /// hard override.
    fn balance_modifier(&self, kind: PowerUpKind) -> f32 {
        let entry = self.stats.per_type.get(&kind);
        match entry {
            Some(stats) if stats.spawned >= BALANCE_MIN_SAMPLES => {
                (1.25 - 0.5 * stats.rate()).clamp(0.75, 1.25)
            }
            _ => 1.0,
        }
    }

    #[must_use]
    pub fn is_rare(kind: PowerUpKind) -> bool {
        kind.is_rare()
    }

    /// Entry position: strictly past the leading edge, vertically inside the
    /// margins.
    pub fn spawn_position_for(&mut self, frame: Frame) -> Position {
        let frame = frame.sanitized();
        let x = frame.max_x() + self.edge_margin * (0.5 + 0.5 * self.rng.f32());
        let lo = frame.min_y() + self.edge_margin;
        let hi = (frame.max_y() - self.edge_margin).max(lo);
        Position::new(x, lo + self.rng.f32() * (hi - lo))
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// On-screen lifetime before an uncollected instance auto-expires.
    #[must_use]
    pub fn expiration_time_for(kind: PowerUpKind) -> f32 {
        kind.rarity().screen_lifetime()
    }

    /// Books a collection outcome: spawned always, collected iff `success`.
    /// Every outcome pushes a snapshot to subscribers.
    pub fn record_collection(&mut self, kind: PowerUpKind, success: bool) {
        self.stats.record(kind, success);
        debug!(
            "recorded {} for {}: rate now {:.2}",
            if success { "collection" } else { "miss" },
            kind.name(),
            self.stats.collection_rate()
        );
        self.emit_stats();
    }

    #[must_use]
    pub fn stats(&self) -> SpawningStats {
        self.stats.clone()
    }

    pub fn reset_stats(&mut self) {
        self.stats.clear();
    }

    /// Resets scheduling timers. The ledger is left alone; that reset is a
    /// separate, explicit call.
    pub fn reset_timers(&mut self) {
        self.spawn_timer = 0.0;
        self.stats_timer = 0.0;
    }

    pub fn register_observer(&mut self, observer: Box<dyn EngineObserver>) -> ObserverToken {
        let token = self.next_token;
        self.next_token += 1;
        self.observers.push((token, observer));
        ObserverToken(token)
    }

    pub fn unregister_observer(&mut self, token: ObserverToken) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != token.0);
        self.observers.len() != before
    }

    pub fn notify_spawn(&mut self, event: &PowerUpEvent) {
        for (_, observer) in &mut self.observers {
            observer.on_spawn(event);
        }
    }

    pub fn notify_collect(&mut self, event: &PowerUpEvent, collector: Option<Entity>) {
        for (_, observer) in &mut self.observers {
            observer.on_collect(event, collector);
        }
    }

    pub fn notify_expire(&mut self, event: &PowerUpEvent) {
        for (_, observer) in &mut self.observers {
            observer.on_expire(event);
        }
    }

    pub fn notify_difficulty_shift(&mut self, tier: AdaptiveTier, reason: AdjustmentReason) {
        for (_, observer) in &mut self.observers {
            observer.on_difficulty_shift(tier, reason);
        }
    }

    /// Opens a snapshot stream. Snapshots flow on every collection outcome
    /// and on the periodic cadence while the scheduler runs.
    pub fn subscribe(&mut self) -> Receiver<SpawningStats> {
        let (sender, receiver) = bounded(64);
        self.subscribers.push(sender);
        receiver
    }

    pub fn emit_stats(&mut self) {
        let snapshot = self.stats.clone();
        self.subscribers.retain(|sender| {
            match sender.try_send(snapshot.clone()) {
                Ok(()) => true,
                // A slow consumer keeps its slot; it just misses this snapshot
                Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            }
        });
    }
}
