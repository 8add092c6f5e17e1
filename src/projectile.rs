//! Projectile state and the per-step engine entry points.

use std::collections::{HashSet, VecDeque};

use bevy::prelude::*;

use crate::error::BallisticsError;
use crate::resources::{BallisticsConfig, BallisticsEnvironment};
use crate::systems::{collision, kinematics, logic};
use crate::types::{ProjectileClass, StepOutcome, WallId, WindModel};

/// Default quadratic drag factor.
pub const DEFAULT_DRAG_COEFFICIENT: f32 = 0.005;

/// Spawn parameters for a projectile.
///
/// A builder-style struct carrying everything `Projectile::spawn` needs.
/// Nothing is validated until the spec is spawned.
///
/// # Fields
/// * `origin` - World-space launch position
/// * `angle_degrees` - Launch angle, measured from +x toward +y
/// * `speed` - Launch speed (units/s)
/// * `radius` - Half-extent of the collision square
/// * `mass` - Mass; decides light (bounce) vs heavy (penetrate)
/// * `drag_coefficient` - Quadratic drag factor
/// * `color` - Display color, carried through for rendering
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_bullet_walls::projectile::ProjectileSpec;
///
/// let spec = ProjectileSpec::new(Vec2::new(100.0, 400.0), -15.0, 650.0)
///     .with_radius(4.0)
///     .with_mass(2.0);
/// assert_eq!(spec.mass, 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSpec {
    pub origin: Vec2,
    pub angle_degrees: f32,
    pub speed: f32,
    pub radius: f32,
    pub mass: f32,
    pub drag_coefficient: f32,
    pub color: Color,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            angle_degrees: 0.0,
            speed: 700.0,
            radius: 5.0,
            mass: 1.0,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            color: Color::WHITE,
        }
    }
}

impl ProjectileSpec {
    pub fn new(origin: Vec2, angle_degrees: f32, speed: f32) -> Self {
        Self {
            origin,
            angle_degrees,
            speed,
            ..Default::default()
        }
    }

    /// Heavy round: 800 units/s, radius 10, mass 10. Punches through walls.
    pub fn heavy_round(origin: Vec2, angle_degrees: f32) -> Self {
        Self::new(origin, angle_degrees, 800.0)
            .with_radius(10.0)
            .with_mass(10.0)
            .with_color(Color::srgb_u8(255, 100, 100))
    }

    /// Light round: 700 units/s, radius 5, mass 1. Ricochets off walls.
    pub fn light_round(origin: Vec2, angle_degrees: f32) -> Self {
        Self::new(origin, angle_degrees, 700.0)
            .with_radius(5.0)
            .with_mass(1.0)
            .with_color(Color::srgb_u8(255, 255, 0))
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_drag(mut self, drag_coefficient: f32) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn validate(&self) -> Result<(), BallisticsError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(BallisticsError::invalid("mass", self.mass));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(BallisticsError::invalid("radius", self.radius));
        }
        if !(self.drag_coefficient.is_finite() && self.drag_coefficient >= 0.0) {
            return Err(BallisticsError::invalid(
                "drag_coefficient",
                self.drag_coefficient,
            ));
        }
        if !self.speed.is_finite() {
            return Err(BallisticsError::invalid("speed", self.speed));
        }
        if !self.angle_degrees.is_finite() {
            return Err(BallisticsError::invalid("angle_degrees", self.angle_degrees));
        }
        if !self.origin.is_finite() {
            let bad = if self.origin.x.is_finite() {
                self.origin.y
            } else {
                self.origin.x
            };
            return Err(BallisticsError::invalid("origin", bad));
        }
        Ok(())
    }
}

/// Launch angle (degrees) that points from `from` toward `to`.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_bullet_walls::projectile::aim_angle_degrees;
///
/// let angle = aim_angle_degrees(Vec2::ZERO, Vec2::new(0.0, 10.0));
/// assert!((angle - 90.0).abs() < 1e-4);
/// ```
pub fn aim_angle_degrees(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}

/// Past positions of a projectile, oldest first.
///
/// Unbounded unless a capacity is set, in which case it behaves as a ring
/// buffer and drops the oldest point on overflow.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: Option<usize>,
}

impl Trail {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        if let Some(cap) = self.capacity {
            if cap == 0 {
                return;
            }
            while self.points.len() >= cap {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }
}

/// A single simulated projectile.
///
/// Owned exclusively by the `ProjectileRegistry` in normal use, but usable
/// standalone: build one with `Projectile::spawn` and drive it with
/// `Projectile::advance`.
///
/// # Fields
/// * `position` - Current centre (world units)
/// * `velocity` - Current velocity (units/s)
/// * `previous_position` - Centre before the last integration step
/// * `radius` - Half-extent of the collision square
/// * `mass` - Mass, fixed at spawn
/// * `drag_coefficient` - Quadratic drag factor
/// * `color` - Display color
/// * `trail` - Positions recorded after each step
/// * `penetrated_walls` - Walls that already charged their penetration penalty
/// * `alive` - Cleared once the projectile leaves the live bounds; never set again
#[derive(Clone, Debug)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub previous_position: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub drag_coefficient: f32,
    pub color: Color,
    pub trail: Trail,
    pub penetrated_walls: HashSet<WallId>,
    alive: bool,
}

impl Projectile {
    /// Validate a spec and build the projectile it describes.
    ///
    /// # Arguments
    /// * `spec` - Launch parameters
    /// * `env` - Environment; its wind model decides whether wind offsets the launch velocity
    /// * `config` - Supplies the trail cap
    ///
    /// # Returns
    /// The live projectile, or `InvalidProjectileSpec` for non-positive
    /// mass/radius, negative drag, or non-finite launch values
    pub fn spawn(
        spec: &ProjectileSpec,
        env: &BallisticsEnvironment,
        config: &BallisticsConfig,
    ) -> Result<Self, BallisticsError> {
        spec.validate()?;

        let angle = spec.angle_degrees.to_radians();
        let mut velocity = Vec2::new(angle.cos(), angle.sin()) * spec.speed;
        if env.wind_model == WindModel::InitialOffsetOnly {
            velocity -= env.wind;
        }

        Ok(Self {
            position: spec.origin,
            velocity,
            previous_position: spec.origin,
            radius: spec.radius,
            mass: spec.mass,
            drag_coefficient: spec.drag_coefficient,
            color: spec.color,
            trail: Trail::new(config.max_trail_length),
            penetrated_walls: HashSet::new(),
            alive: true,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the projectile dead. There is no way back.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn class(&self, config: &BallisticsConfig) -> ProjectileClass {
        ProjectileClass::from_mass(self.mass, config.light_mass_threshold)
    }

    /// Axis-aligned collision square around the current centre.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_center_half_size(self.position, Vec2::splat(self.radius))
    }

    /// Advance this projectile by `dt` seconds.
    ///
    /// Integrates forces, resolves collisions against `obstacles` and then
    /// checks the live bounds. A dead projectile is left untouched.
    ///
    /// # Arguments
    /// * `dt` - Time step in seconds
    /// * `obstacles` - Walls, indexed by `WallId`
    /// * `env` - Environment constants
    /// * `config` - Collision response tuning
    ///
    /// # Returns
    /// The collisions resolved in this step and whether it expired
    pub fn advance(
        &mut self,
        dt: f32,
        obstacles: &[Rect],
        env: &BallisticsEnvironment,
        config: &BallisticsConfig,
    ) -> StepOutcome {
        if !self.alive {
            return StepOutcome::default();
        }

        kinematics::integrate(self, dt, env);
        let collisions = collision::resolve_collisions(self, obstacles, config);
        let expired = logic::check_bounds(self, env);

        StepOutcome {
            collisions,
            expired,
        }
    }
}
