use bevy::math::Isometry2d;
use bevy::prelude::*;

use crate::registry::ProjectileRegistry;
use crate::resources::{BallisticsConfig, Obstacles};

const WALL_COLOR: Color = Color::srgb(0.7, 0.7, 0.7);

/// Draw debug gizmos for walls, trails and projectiles.
///
/// Coordinates are world coordinates as-is; hosts using the screen-style
/// +y-down convention should flip their camera.
pub fn draw_projectile_debug(
    mut gizmos: Gizmos,
    registry: Res<ProjectileRegistry>,
    obstacles: Res<Obstacles>,
    config: Res<BallisticsConfig>,
) {
    if !config.debug_draw {
        return;
    }

    for wall in obstacles.active() {
        gizmos.rect_2d(Isometry2d::from_translation(wall.center()), wall.size(), WALL_COLOR);
    }

    for view in registry.list() {
        if view.trail.len() > 1 {
            gizmos.linestrip_2d(view.trail.iter(), view.color);
        }

        // Bullet body: a short streak behind the nose, or a dot when nearly stopped
        if view.velocity.length() > 0.1 {
            let tail = view.position - view.velocity.normalize() * view.radius * 3.0;
            gizmos.line_2d(view.position, tail, view.color);
        } else {
            gizmos.circle_2d(
                Isometry2d::from_translation(view.position),
                view.radius / 2.0,
                view.color,
            );
        }
    }
}
