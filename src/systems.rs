#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{GameState, Obstacle, Position, PowerUp, Viewport};
use crate::difficulty;
use crate::obstacles::{ObstacleSpawner, PlannedSpawn};
use crate::powerups::{PowerUpEvent, PowerUpScheduler};
use crate::skill::{AppliedFeedback, SkillFeedback};

/// Applies externally queued skill/difficulty signals. This is the only spot
/// where cross-thread input becomes engine state, so generators never see a
/// mutation off the update thread.
pub fn feedback_drain_system(world: &mut World) {
    let applied = {
        let mut feedback = world.resource_mut::<SkillFeedback>();
        feedback.drain()
    };

    for change in applied {
        match change {
            AppliedFeedback::Tier(tier, reason) => {
                info!("difficulty tier -> {} ({})", tier.name(), reason.name());
                world
                    .resource_mut::<PowerUpScheduler>()
                    .notify_difficulty_shift(tier, reason);
            }
            AppliedFeedback::Skill(level) => {
                info!("skill level -> {}", level.name());
            }
        }
    }
}

/// Pushes the score-derived, tier-adjusted parameter snapshot into both
/// generators. Runs every tick so a score or tier change lands before the
/// next spawn decision.
pub fn difficulty_sync_system(world: &mut World) {
    let score = world.resource::<GameState>().score;
    let (skill, tier) = {
        let feedback = world.resource::<SkillFeedback>();
        (feedback.skill, feedback.tier)
    };
    let frame = world.resource::<Viewport>().frame;

    let params = difficulty::parameters_for(score).adjusted_for(tier);

    world
        .resource_mut::<ObstacleSpawner>()
        .update_difficulty(params);
    world
        .resource_mut::<PowerUpScheduler>()
        .update_config(params, skill, frame);
}

/// Drains due wave members, then fires a fresh pattern when the interval
/// elapses.
pub fn obstacle_spawn_system(world: &mut World, delta_seconds: f32) {
    trace!("obstacle tick with delta: {delta_seconds}");

    let due = {
        let mut spawner = world.resource_mut::<ObstacleSpawner>();
        spawner.take_due(delta_seconds)
    };
    for planned in due {
        spawn_obstacle(world, &planned);
    }

    let ready = {
        let frame = world.resource::<Viewport>().frame.sanitized();
        let mut spawner = world.resource_mut::<ObstacleSpawner>();
        if !spawner.advance(delta_seconds) {
            return;
        }
        let pattern = spawner.generate_pattern();
        debug!("firing {:?} pattern", pattern.kind());
        let planned = spawner.plan(frame, &pattern);
        spawner.enqueue(planned)
    };

    for planned in ready {
        spawn_obstacle(world, &planned);
    }
}

fn spawn_obstacle(world: &mut World, planned: &PlannedSpawn) {
    world.spawn((planned.obstacle, planned.position));
    trace!(
        "spawned {} obstacle at ({:.1}, {:.1})",
        planned.obstacle.kind.name(),
        planned.position.x,
        planned.position.y
    );
}

/// Ages live power-ups, expires the overdue ones, spawns new ones on the
/// scheduler's cadence, and pushes the periodic stats snapshot.
pub fn power_up_system(world: &mut World, delta_seconds: f32) {
    // Age first so a pause (zero ticks) expires nothing
    let mut expired = Vec::new();
    {
        let mut query = world.query::<(Entity, &mut PowerUp, &Position)>();
        for (entity, mut power_up, position) in query.iter_mut(world) {
            power_up.age += delta_seconds;
            if power_up.age >= power_up.lifetime {
                expired.push((entity, power_up.kind, *position));
            }
        }
    }

    for (entity, kind, position) in expired {
        world.despawn(entity);
        let mut scheduler = world.resource_mut::<PowerUpScheduler>();
        scheduler.record_collection(kind, false);
        scheduler.notify_expire(&PowerUpEvent {
            entity,
            kind,
            position,
        });
        debug!("power-up {} expired uncollected", kind.name());
    }

    let spawned = {
        let mut scheduler = world.resource_mut::<PowerUpScheduler>();
        if scheduler.due_spawn(delta_seconds) {
            let frame = scheduler.frame();
            let kind = scheduler.select_type();
            let position = scheduler.spawn_position_for(frame);
            let lifetime = PowerUpScheduler::expiration_time_for(kind);
            Some((kind, position, lifetime))
        } else {
            None
        }
    };

    if let Some((kind, position, lifetime)) = spawned {
        let entity = world
            .spawn((
                PowerUp {
                    kind,
                    age: 0.0,
                    lifetime,
                },
                position,
            ))
            .id();
        let mut scheduler = world.resource_mut::<PowerUpScheduler>();
        scheduler.notify_spawn(&PowerUpEvent {
            entity,
            kind,
            position,
        });
        debug!(
            "spawned {} power-up ({}) at ({:.1}, {:.1})",
            kind.name(),
            kind.rarity().name(),
            position.x,
            position.y
        );
    }

    let emit = {
        let mut scheduler = world.resource_mut::<PowerUpScheduler>();
        scheduler.due_stats_emit(delta_seconds)
    };
    if emit {
        world.resource_mut::<PowerUpScheduler>().emit_stats();
    }
}

/// Books a successful collection for a live instance and removes it. Returns
/// false when the entity is not a live power-up (already collected/expired).
pub fn collect_power_up(world: &mut World, entity: Entity, collector: Option<Entity>) -> bool {
    let Some(power_up) = world.get::<PowerUp>(entity) else {
        return false;
    };
    let kind = power_up.kind;
    let position = world.get::<Position>(entity).copied().unwrap_or_default();

    world.despawn(entity);

    let mut scheduler = world.resource_mut::<PowerUpScheduler>();
    scheduler.record_collection(kind, true);
    scheduler.notify_collect(
        &PowerUpEvent {
            entity,
            kind,
            position,
        },
        collector,
    );
    true
}

/// Force-clears live instances and scheduling timers. Teardown, not gameplay:
/// no expiry notifications fire and the ledger survives unless the caller
/// explicitly asks for a stats reset too.
pub fn clear_power_ups(world: &mut World, reset_stats: bool) {
    let live: Vec<Entity> = world
        .query_filtered::<Entity, With<PowerUp>>()
        .iter(world)
        .collect();
    let count = live.len();
    for entity in live {
        world.despawn(entity);
    }

    let mut scheduler = world.resource_mut::<PowerUpScheduler>();
    scheduler.reset_timers();
    if reset_stats {
        scheduler.reset_stats();
    }
    debug!("cleared {count} live power-ups (reset_stats: {reset_stats})");
}

/// Removes every spawned obstacle, including queued wave members.
pub fn clear_obstacles(world: &mut World) {
    let live: Vec<Entity> = world
        .query_filtered::<Entity, With<Obstacle>>()
        .iter(world)
        .collect();
    for entity in live {
        world.despawn(entity);
    }
    world.resource_mut::<ObstacleSpawner>().reset();
}
