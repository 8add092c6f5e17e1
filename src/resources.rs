//! Global resources for the ballistics system.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::WindModel;

/// Global environment settings affecting all projectiles.
///
/// Fixed for a simulation run: hosts build it once at startup (from code or
/// any serde format) and pass it explicitly to the engine.
///
/// World coordinates follow screen conventions: +x right, +y down.
///
/// # Fields
/// * `gravity` - Gravitational acceleration (units/s²)
/// * `wind` - Wind force vector, divided by projectile mass
/// * `wind_model` - Whether wind is a per-step force or a launch offset
/// * `world_width` - Width of the visible world
/// * `world_height` - Height of the visible world
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_bullet_walls::resources::BallisticsEnvironment;
///
/// let env = BallisticsEnvironment::default()
///     .with_gravity(Vec2::new(0.0, 9.81))
///     .with_wind(Vec2::ZERO);
/// assert_eq!(env.wind, Vec2::ZERO);
/// ```
#[derive(Resource, Reflect, Clone, Debug, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct BallisticsEnvironment {
    /// Gravity vector (units/s²)
    pub gravity: Vec2,
    /// Wind force vector
    pub wind: Vec2,
    /// Wind application model
    pub wind_model: WindModel,
    /// World width (units)
    pub world_width: f32,
    /// World height (units)
    pub world_height: f32,
}

impl Default for BallisticsEnvironment {
    /// Screen-space defaults: a 1200x800 world, gravity pulling down at
    /// 300 units/s² and a 150-unit wind pushing right.
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 300.0),
            wind: Vec2::new(150.0, 0.0),
            wind_model: WindModel::ContinuousForce,
            world_width: 1200.0,
            world_height: 800.0,
        }
    }
}

impl BallisticsEnvironment {
    /// Environment with no gravity and no wind.
    pub fn still_air() -> Self {
        Self {
            gravity: Vec2::ZERO,
            wind: Vec2::ZERO,
            ..Default::default()
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_wind(mut self, wind: Vec2) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_wind_model(mut self, wind_model: WindModel) -> Self {
        self.wind_model = wind_model;
        self
    }

    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    /// Region a projectile must stay inside to remain alive.
    ///
    /// Extends half a world beyond every edge of the visible area, so
    /// arcing shots can leave the screen and come back.
    ///
    /// # Returns
    /// `Rect` spanning `[-W/2, 1.5W] x [-H/2, 1.5H]`
    pub fn live_bounds(&self) -> Rect {
        Rect::new(
            -self.world_width / 2.0,
            -self.world_height / 2.0,
            self.world_width * 1.5,
            self.world_height * 1.5,
        )
    }

    /// Default launcher position: 100 units in from the left edge,
    /// vertically centred.
    pub fn launcher_origin(&self) -> Vec2 {
        Vec2::new(100.0, self.world_height / 2.0)
    }
}

/// Global configuration for collision response and bookkeeping.
///
/// # Fields
/// * `light_mass_threshold` - Masses at or below this bounce, above it penetrate
/// * `bounce_restitution` - Fraction of the reflected velocity component kept on a bounce
/// * `penetration_speed_retention` - Velocity scale applied once per penetrated wall
/// * `bounce_nudge` - Distance a bouncing projectile is pushed off the wall
/// * `max_trail_length` - Optional cap on trail points (oldest dropped first)
/// * `debug_draw` - Whether the debug plugin draws walls and trails
///
/// # Example
/// ```
/// use bevy_bullet_walls::resources::BallisticsConfig;
///
/// let config = BallisticsConfig::default().with_max_trail_length(256);
/// assert_eq!(config.bounce_restitution, 0.85);
/// assert_eq!(config.max_trail_length, Some(256));
/// ```
#[derive(Resource, Reflect, Clone, Debug, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct BallisticsConfig {
    /// Light/heavy classification threshold (mass units)
    pub light_mass_threshold: f32,
    /// Bounce restitution (0..=1)
    pub bounce_restitution: f32,
    /// Speed retained after penetrating a wall (0..=1)
    pub penetration_speed_retention: f32,
    /// Push-off distance after a bounce (units)
    pub bounce_nudge: f32,
    /// Trail cap; `None` keeps every point
    pub max_trail_length: Option<usize>,
    /// Debug visualization
    pub debug_draw: bool,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            light_mass_threshold: 5.0,
            bounce_restitution: 0.85,
            penetration_speed_retention: 0.6,
            bounce_nudge: 2.0,
            max_trail_length: None,
            debug_draw: true,
        }
    }
}

impl BallisticsConfig {
    pub fn with_max_trail_length(mut self, max: usize) -> Self {
        self.max_trail_length = Some(max);
        self
    }

    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw = enabled;
        self
    }
}

/// Static wall set handed to the engine every step.
///
/// `enabled` is a caller-side filter only: when it is off the engine is
/// simply given an empty slice.
///
/// # Example
/// ```
/// use bevy_bullet_walls::resources::Obstacles;
///
/// let mut obstacles = Obstacles::gated_wall(1200.0, 800.0);
/// assert_eq!(obstacles.active().len(), 2);
/// obstacles.toggle();
/// assert!(obstacles.active().is_empty());
/// ```
#[derive(Resource, Clone, Debug)]
pub struct Obstacles {
    /// Walls, indexed by `WallId`
    pub walls: Vec<Rect>,
    /// Whether walls participate in collisions
    pub enabled: bool,
}

impl Default for Obstacles {
    fn default() -> Self {
        Self {
            walls: Vec::new(),
            enabled: true,
        }
    }
}

impl Obstacles {
    pub fn new(walls: Vec<Rect>) -> Self {
        Self {
            walls,
            enabled: true,
        }
    }

    /// A 30-unit-thick vertical wall at the middle of the world with a
    /// 140-unit gap centred on the launcher's height.
    pub fn gated_wall(world_width: f32, world_height: f32) -> Self {
        const THICKNESS: f32 = 30.0;
        const HALF_GAP: f32 = 70.0;

        let x = world_width / 2.0;
        let mid = world_height / 2.0;
        Self::new(vec![
            Rect::new(x, 0.0, x + THICKNESS, mid - HALF_GAP),
            Rect::new(x, mid + HALF_GAP, x + THICKNESS, world_height),
        ])
    }

    /// Walls the engine should collide against this frame.
    pub fn active(&self) -> &[Rect] {
        if self.enabled {
            &self.walls
        } else {
            &[]
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}
