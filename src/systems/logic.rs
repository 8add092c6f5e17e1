//! Projectile lifecycle - live bounds, spawning and per-frame stepping.

use bevy::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};

use crate::events::{
    CollisionMessage, FireEvent, PenetrationEvent, ProjectileExpiredEvent, RicochetEvent,
};
use crate::projectile::Projectile;
use crate::registry::ProjectileRegistry;
use crate::resources::{BallisticsConfig, BallisticsEnvironment, Obstacles};

/// Kill the projectile if it left the live bounds.
///
/// The bounds are inclusive: a projectile exactly on the edge survives.
///
/// # Returns
/// `true` if the projectile died in this call
pub fn check_bounds(bullet: &mut Projectile, env: &BallisticsEnvironment) -> bool {
    if !bullet.is_alive() {
        return false;
    }

    let bounds = env.live_bounds();
    let p = bullet.position;
    let inside = p.x >= bounds.min.x
        && p.x <= bounds.max.x
        && p.y >= bounds.min.y
        && p.y <= bounds.max.y;

    if !inside {
        bullet.kill();
    }
    !inside
}

/// Admit a projectile for every `FireEvent`.
///
/// Invalid specs are logged and dropped; nothing else is affected.
pub fn spawn_projectiles(
    mut fire_events: MessageReader<FireEvent>,
    env: Res<BallisticsEnvironment>,
    config: Res<BallisticsConfig>,
    mut registry: ResMut<ProjectileRegistry>,
) {
    for event in fire_events.read() {
        match registry.spawn(event.spec.clone(), &env, &config) {
            Ok(handle) => debug!(
                "spawned projectile {:?} at {} (mass {})",
                handle, event.spec.origin, event.spec.mass
            ),
            Err(err) => warn!("rejected projectile spawn: {err}"),
        }
    }
}

/// Step every projectile against the active walls.
///
/// Runs in FixedUpdate. Publishes one message per resolved collision and
/// one per projectile removed for leaving the world.
pub fn step_projectiles(
    time: Res<Time<Fixed>>,
    env: Res<BallisticsEnvironment>,
    config: Res<BallisticsConfig>,
    obstacles: Res<Obstacles>,
    mut registry: ResMut<ProjectileRegistry>,
    mut ricochet_events: MessageWriter<RicochetEvent>,
    mut penetration_events: MessageWriter<PenetrationEvent>,
    mut expired_events: MessageWriter<ProjectileExpiredEvent>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 || registry.is_empty() {
        return;
    }

    let summary = registry.update_all(dt, obstacles.active(), &env, &config);

    for (handle, report) in &summary.collisions {
        match CollisionMessage::from_report(*handle, report) {
            CollisionMessage::Ricochet(event) => {
                ricochet_events.write(event);
            }
            CollisionMessage::Penetration(event) => {
                penetration_events.write(event);
            }
        }
    }

    for (handle, last_position) in summary.expired {
        debug!("projectile {:?} left the world at {}", handle, last_position);
        expired_events.write(ProjectileExpiredEvent {
            projectile: handle,
            last_position,
        });
    }
}
