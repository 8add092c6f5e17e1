//! # Bevy Bullet Walls
//!
//! 2D projectile ballistics for Bevy 0.18.
//!
//! ## Features
//! - Gravity, quadratic air drag and lateral wind
//! - Semi-implicit Euler integration, one step per fixed tick
//! - Wall collisions with a swept test against tunnelling
//! - Light rounds ricochet, heavy rounds punch through (once per wall)
//! - Engine-free core: `ProjectileRegistry` can be driven without an `App`
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_bullet_walls::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BallisticsPluginGroup)
//!         .insert_resource(Obstacles::gated_wall(1200.0, 800.0))
//!         .run();
//! }
//! ```

pub mod error;
pub mod events;
pub mod projectile;
pub mod registry;
pub mod resources;
pub mod systems;
pub mod types;

#[cfg(test)]
mod comprehensive_tests;

pub mod prelude {
    pub use crate::error::BallisticsError;
    pub use crate::events::*;
    pub use crate::projectile::{aim_angle_degrees, Projectile, ProjectileSpec, Trail};
    pub use crate::registry::{ProjectileRegistry, ProjectileView, UpdateSummary};
    pub use crate::resources::*;
    pub use crate::types::*;
    pub use crate::BallisticsPluginGroup;
    pub use crate::{BallisticsCorePlugin, BallisticsDebugPlugin};
}

use bevy::prelude::*;

/// Main plugin group that includes all ballistics subsystems.
///
/// - Core: spawning, fixed-step integration, collisions, expiry
/// - Debug: gizmo drawing of walls and trails
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_bullet_walls::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(BallisticsPluginGroup)
///     .run();
/// ```
#[derive(Default)]
pub struct BallisticsPluginGroup;

impl PluginGroup for BallisticsPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(BallisticsCorePlugin)
            .add(BallisticsDebugPlugin)
    }
}

/// Core simulation plugin.
///
/// Resources are only initialised when absent, so hosts may insert their
/// own `BallisticsEnvironment`, `BallisticsConfig` or `Obstacles` before or
/// after adding the plugin.
///
/// # Systems
/// - `spawn_projectiles` (Update) - admits projectiles from `FireEvent`s
/// - `step_projectiles` (FixedUpdate) - advances the registry and publishes
///   `RicochetEvent`, `PenetrationEvent` and `ProjectileExpiredEvent`
pub struct BallisticsCorePlugin;

impl Plugin for BallisticsCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<resources::BallisticsEnvironment>()
            .register_type::<resources::BallisticsConfig>()
            .init_resource::<resources::BallisticsEnvironment>()
            .init_resource::<resources::BallisticsConfig>()
            .init_resource::<resources::Obstacles>()
            .init_resource::<registry::ProjectileRegistry>()
            .add_message::<events::FireEvent>()
            .add_message::<events::RicochetEvent>()
            .add_message::<events::PenetrationEvent>()
            .add_message::<events::ProjectileExpiredEvent>()
            .add_systems(Startup, log_environment)
            .add_systems(Update, systems::logic::spawn_projectiles)
            .add_systems(FixedUpdate, systems::logic::step_projectiles);
    }
}

fn log_environment(env: Res<resources::BallisticsEnvironment>) {
    info!(
        "ballistics: gravity {} wind {} ({:?}), world {}x{}",
        env.gravity, env.wind, env.wind_model, env.world_width, env.world_height
    );
}

/// Debug plugin for ballistics visualization.
///
/// Needs the gizmo plugin, which `DefaultPlugins` provides.
pub struct BallisticsDebugPlugin;

impl Plugin for BallisticsDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, systems::debug::draw_projectile_debug);
    }
}
