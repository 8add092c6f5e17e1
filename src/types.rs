//! Common types and enums for the ballistics system.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How wind acts on a projectile.
///
/// The two models produce materially different trajectories, so the choice
/// is part of the environment rather than an implementation detail.
///
/// # Variants
/// * `ContinuousForce` - Wind is a force applied every step (`wind / mass`)
/// * `InitialOffsetOnly` - Wind is subtracted once from the launch velocity
///
/// # Example
/// ```
/// use bevy_bullet_walls::types::WindModel;
///
/// let model = WindModel::default();
/// assert_eq!(model, WindModel::ContinuousForce);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum WindModel {
    /// Per-step force, scaled by inverse mass
    #[default]
    ContinuousForce,
    /// One-time offset of the initial velocity
    InitialOffsetOnly,
}

/// Collision behavior class, derived from projectile mass.
///
/// # Variants
/// * `Light` - Ricochets off walls with restitution
/// * `Heavy` - Passes through walls, losing speed once per wall
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileClass {
    Light,
    Heavy,
}

impl ProjectileClass {
    /// Classify a mass against the light/heavy threshold.
    ///
    /// A mass exactly at the threshold is light.
    pub fn from_mass(mass: f32, light_mass_threshold: f32) -> Self {
        if mass <= light_mass_threshold {
            Self::Light
        } else {
            Self::Heavy
        }
    }
}

/// Axis along which a bounce reflects velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionAxis {
    /// Left/right face: `velocity.x` is reflected
    X,
    /// Top/bottom face: `velocity.y` is reflected
    Y,
}

/// Stable identity of a wall: its index in the obstacle slice.
///
/// Penetration bookkeeping is keyed by this id, so callers must keep the
/// order of their obstacle list stable for the lifetime of a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallId(pub usize);

/// Opaque handle returned when a projectile is admitted into the registry.
///
/// Handles are never reused within one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileHandle(pub u64);

/// A collision resolved during a single `advance` step.
///
/// # Variants
/// * `Bounce` - A light projectile ricocheted
/// * `Penetration` - A heavy projectile paid its one-time penalty for a wall
///
/// `velocity` is the projectile velocity after resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum CollisionReport {
    Bounce {
        wall: WallId,
        axis: CollisionAxis,
        point: Vec2,
        velocity: Vec2,
    },
    Penetration {
        wall: WallId,
        point: Vec2,
        velocity: Vec2,
    },
}

impl CollisionReport {
    /// Wall involved in this collision.
    pub fn wall(&self) -> WallId {
        match self {
            Self::Bounce { wall, .. } | Self::Penetration { wall, .. } => *wall,
        }
    }
}

/// Result of advancing one projectile by one step.
///
/// # Fields
/// * `collisions` - Collisions resolved during the step, in wall order
/// * `expired` - Whether the projectile left the world bounds in this step
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub collisions: Vec<CollisionReport>,
    pub expired: bool,
}
