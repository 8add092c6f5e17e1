//! Simulation registry - owns every live projectile.

use bevy::prelude::*;

use crate::error::BallisticsError;
use crate::projectile::{Projectile, ProjectileSpec, Trail};
use crate::resources::{BallisticsConfig, BallisticsEnvironment};
use crate::types::{CollisionReport, ProjectileHandle};

/// Read-only view of a projectile for rendering.
#[derive(Clone, Copy, Debug)]
pub struct ProjectileView<'a> {
    pub handle: ProjectileHandle,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color,
    pub trail: &'a Trail,
}

/// What happened during one `update_all` call.
///
/// # Fields
/// * `collisions` - Every resolved collision, tagged with its projectile
/// * `expired` - Projectiles removed this frame with their last position
#[derive(Clone, Debug, Default)]
pub struct UpdateSummary {
    pub collisions: Vec<(ProjectileHandle, CollisionReport)>,
    pub expired: Vec<(ProjectileHandle, Vec2)>,
}

/// Ordered list of live projectiles.
///
/// Strictly sequential: one `update_all` per frame. Inside an `App` it is a
/// resource stepped by `step_projectiles`; outside it is a plain value.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_bullet_walls::prelude::*;
///
/// let env = BallisticsEnvironment::default();
/// let config = BallisticsConfig::default();
/// let mut registry = ProjectileRegistry::default();
///
/// let origin = env.launcher_origin();
/// registry.spawn(ProjectileSpec::light_round(origin, 0.0), &env, &config).unwrap();
/// registry.update_all(1.0 / 60.0, &[], &env, &config);
///
/// assert_eq!(registry.list().count(), 1);
/// ```
#[derive(Resource, Default)]
pub struct ProjectileRegistry {
    projectiles: Vec<(ProjectileHandle, Projectile)>,
    next_handle: u64,
}

impl ProjectileRegistry {
    /// Validate `spec` and admit the resulting projectile.
    ///
    /// # Returns
    /// A fresh handle, or the validation error; rejected specs leave the
    /// registry unchanged
    pub fn spawn(
        &mut self,
        spec: ProjectileSpec,
        env: &BallisticsEnvironment,
        config: &BallisticsConfig,
    ) -> Result<ProjectileHandle, BallisticsError> {
        let projectile = Projectile::spawn(&spec, env, config)?;
        Ok(self.insert(projectile))
    }

    /// Admit an already-built projectile.
    pub fn insert(&mut self, projectile: Projectile) -> ProjectileHandle {
        let handle = ProjectileHandle(self.next_handle);
        self.next_handle += 1;
        self.projectiles.push((handle, projectile));
        handle
    }

    /// Advance every projectile by `dt`, then drop the dead ones.
    ///
    /// # Arguments
    /// * `dt` - Frame time in seconds
    /// * `obstacles` - Active walls; pass an empty slice to disable walls
    /// * `env` - Environment constants
    /// * `config` - Collision response tuning
    pub fn update_all(
        &mut self,
        dt: f32,
        obstacles: &[Rect],
        env: &BallisticsEnvironment,
        config: &BallisticsConfig,
    ) -> UpdateSummary {
        let mut summary = UpdateSummary::default();

        for (handle, projectile) in &mut self.projectiles {
            let outcome = projectile.advance(dt, obstacles, env, config);
            summary
                .collisions
                .extend(outcome.collisions.into_iter().map(|report| (*handle, report)));
        }

        self.projectiles.retain(|(handle, projectile)| {
            if !projectile.is_alive() {
                summary.expired.push((*handle, projectile.position));
            }
            projectile.is_alive()
        });

        summary
    }

    /// Projectiles in spawn order.
    pub fn list(&self) -> impl Iterator<Item = ProjectileView<'_>> + '_ {
        self.projectiles.iter().map(|(handle, p)| ProjectileView {
            handle: *handle,
            position: p.position,
            velocity: p.velocity,
            radius: p.radius,
            color: p.color,
            trail: &p.trail,
        })
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.projectiles
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}
