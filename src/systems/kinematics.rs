//! Kinematics - force accumulation and semi-implicit Euler integration.

use bevy::prelude::*;

use crate::projectile::Projectile;
use crate::resources::BallisticsEnvironment;
use crate::types::WindModel;

/// Quadratic drag force opposing `velocity`.
///
/// `F_drag = -normalize(v) * k * |v|²`, zero for a stationary projectile.
pub fn drag_force(velocity: Vec2, drag_coefficient: f32) -> Vec2 {
    let speed = velocity.length();
    if speed <= 0.0 {
        return Vec2::ZERO;
    }
    -(velocity / speed) * drag_coefficient * speed * speed
}

/// Calculate acceleration on a projectile from gravity, drag and wind.
///
/// Force terms are divided by mass; a non-positive mass contributes no
/// force acceleration, leaving gravity alone.
///
/// # Arguments
/// * `bullet` - Projectile supplying mass and drag coefficient
/// * `vel` - Velocity to evaluate drag at
/// * `env` - Environment constants
///
/// # Returns
/// The acceleration vector acting on the projectile
pub fn calculate_acceleration(bullet: &Projectile, vel: Vec2, env: &BallisticsEnvironment) -> Vec2 {
    if bullet.mass <= 0.0 {
        return env.gravity;
    }

    let mut force = drag_force(vel, bullet.drag_coefficient);
    if env.wind_model == WindModel::ContinuousForce {
        force += env.wind;
    }

    env.gravity + force / bullet.mass
}

/// Semi-implicit Euler step: velocity first, then position from the new
/// velocity. Records the old centre in `previous_position` and appends the
/// new one to the trail.
pub fn integrate(bullet: &mut Projectile, dt: f32, env: &BallisticsEnvironment) {
    let accel = calculate_acceleration(bullet, bullet.velocity, env);

    bullet.previous_position = bullet.position;
    bullet.velocity += accel * dt;
    bullet.position += bullet.velocity * dt;
    bullet.trail.push(bullet.position);
}
