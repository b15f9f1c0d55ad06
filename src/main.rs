#![warn(clippy::all, clippy::pedantic)]

use std::thread;

use anyhow::{Context, Result};
use log::{error, info};

use skydodge::components::Frame;
use skydodge::config::TuningConfig;
use skydodge::engine::Engine;
use skydodge::powerups::{EngineObserver, PowerUpEvent};
use skydodge::skill::{AdaptiveTier, AdjustmentReason, SkillLevel};

/// Logs every lifecycle notification, standing in for the UI layer.
struct ConsoleObserver;

impl EngineObserver for ConsoleObserver {
    fn on_spawn(&mut self, event: &PowerUpEvent) {
        info!(
            "spawned {} ({}) at ({:.0}, {:.0})",
            event.kind.name(),
            event.kind.rarity().name(),
            event.position.x,
            event.position.y
        );
    }

    fn on_collect(&mut self, event: &PowerUpEvent, _collector: Option<bevy_ecs::entity::Entity>) {
        info!("collected {}: {}", event.kind.name(), event.kind.description());
    }

    fn on_expire(&mut self, event: &PowerUpEvent) {
        info!("{} expired uncollected", event.kind.name());
    }

    fn on_difficulty_shift(&mut self, tier: AdaptiveTier, reason: AdjustmentReason) {
        info!("difficulty shifted to {} because {}", tier.name(), reason.name());
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting skydodge demo session");

    if TuningConfig::force_reload() {
        info!("Configuration loaded");
    } else {
        error!("Failed to load configuration, continuing with defaults");
    }

    let seed: u64 = match std::env::var("SKYDODGE_SEED") {
        Ok(raw) => raw.parse().context("SKYDODGE_SEED must be a u64")?,
        Err(_) => 0x000D_0D6E,
    };

    let mut engine = Engine::with_seed(seed);
    engine.set_viewport(Frame::new(0.0, 0.0, 800.0, 600.0));
    engine.register_observer(Box::new(ConsoleObserver));
    let stats_rx = engine.subscribe_stats();

    // The assessment process lives off the update thread; its signals are
    // queued and applied at tick boundaries.
    let handle = engine.feedback_handle();
    let assessor = thread::spawn(move || {
        handle.set_skill(SkillLevel::Novice);
        handle.report_assessment(SkillLevel::Intermediate, 0.82);
        handle.report_tier_change(AdaptiveTier::Challenging, AdjustmentReason::PlayerExcelling);
        // Too uncertain to apply; the engine logs and drops it
        handle.report_assessment(SkillLevel::Master, 0.35);
    });

    engine.start();

    const TICK: f32 = 0.05;
    const STEPS: u32 = 1200; // one simulated minute

    for step in 0..STEPS {
        engine.tick(TICK);

        // Score trickles in as the simulated player survives
        if step % 4 == 0 {
            engine.add_score(1);
        }

        // Collect whatever is on screen every few simulated seconds
        if step % 160 == 0 {
            if let Some(&entity) = engine.active_power_ups().first() {
                engine.collect_power_up(entity, None);
            }
        }

        if step % 200 == 0 {
            let stats = engine.stats();
            info!(
                "t={:>4.1}s score={} spawned={} collected={}",
                f64::from(step) * f64::from(TICK),
                engine.score(),
                stats.total_spawned,
                stats.total_collected
            );
        }
    }

    let _ = assessor.join();
    engine.stop();

    let stats = engine.stats();
    info!(
        "session complete: {} spawned, {} collected ({:.0}% rate)",
        stats.total_spawned,
        stats.total_collected,
        stats.collection_rate() * 100.0
    );
    info!("{} stats snapshots were emitted", stats_rx.try_iter().count());

    Ok(())
}
