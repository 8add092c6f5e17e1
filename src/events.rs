//! Events for the ballistics system.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.

use bevy::prelude::*;
use bevy::ecs::message::Message;

use crate::projectile::ProjectileSpec;
use crate::types::{CollisionAxis, CollisionReport, ProjectileHandle, WallId};

/// Request to launch a projectile.
///
/// Consumed by `spawn_projectiles`; a spec that fails validation is logged
/// and dropped.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_bullet_walls::events::FireEvent;
///
/// let fire_event = FireEvent::light(Vec2::new(100.0, 400.0), -10.0);
/// assert_eq!(fire_event.spec.mass, 1.0);
/// ```
#[derive(Message, Clone, Debug)]
pub struct FireEvent {
    /// Full launch parameters
    pub spec: ProjectileSpec,
}

impl FireEvent {
    pub fn new(spec: ProjectileSpec) -> Self {
        Self { spec }
    }

    /// Fire a heavy, wall-piercing round.
    pub fn heavy(origin: Vec2, angle_degrees: f32) -> Self {
        Self::new(ProjectileSpec::heavy_round(origin, angle_degrees))
    }

    /// Fire a light, ricocheting round.
    pub fn light(origin: Vec2, angle_degrees: f32) -> Self {
        Self::new(ProjectileSpec::light_round(origin, angle_degrees))
    }
}

impl From<ProjectileSpec> for FireEvent {
    fn from(spec: ProjectileSpec) -> Self {
        Self::new(spec)
    }
}

/// Event for a light projectile bouncing off a wall.
///
/// # Fields
/// * `projectile` - Handle of the projectile that bounced
/// * `wall` - Wall it bounced off
/// * `impact_point` - Where it met the wall, before the push-off
/// * `axis` - Which velocity component was reflected
/// * `new_velocity` - Velocity after restitution
#[derive(Message, Clone, Debug)]
pub struct RicochetEvent {
    pub projectile: ProjectileHandle,
    pub wall: WallId,
    pub impact_point: Vec2,
    pub axis: CollisionAxis,
    pub new_velocity: Vec2,
}

/// Event for a heavy projectile paying its penetration penalty.
///
/// Sent once per (projectile, wall) pair.
///
/// # Fields
/// * `projectile` - Handle of the penetrating projectile
/// * `wall` - Wall being penetrated
/// * `entry_point` - Swept entry point, or the centre if only the box test fired
/// * `remaining_velocity` - Velocity after the speed penalty
#[derive(Message, Clone, Debug)]
pub struct PenetrationEvent {
    pub projectile: ProjectileHandle,
    pub wall: WallId,
    pub entry_point: Vec2,
    pub remaining_velocity: Vec2,
}

/// Event for a projectile leaving the live bounds and being removed.
#[derive(Message, Clone, Debug)]
pub struct ProjectileExpiredEvent {
    pub projectile: ProjectileHandle,
    /// Last recorded centre
    pub last_position: Vec2,
}

/// Collision message produced from an engine report.
pub(crate) enum CollisionMessage {
    Ricochet(RicochetEvent),
    Penetration(PenetrationEvent),
}

impl CollisionMessage {
    pub(crate) fn from_report(projectile: ProjectileHandle, report: &CollisionReport) -> Self {
        match *report {
            CollisionReport::Bounce {
                wall,
                axis,
                point,
                velocity,
            } => Self::Ricochet(RicochetEvent {
                projectile,
                wall,
                impact_point: point,
                axis,
                new_velocity: velocity,
            }),
            CollisionReport::Penetration {
                wall,
                point,
                velocity,
            } => Self::Penetration(PenetrationEvent {
                projectile,
                wall,
                entry_point: point,
                remaining_velocity: velocity,
            }),
        }
    }
}
