//! Collision system - bounding-box and swept-segment wall detection.

use bevy::math::bounding::{Aabb2d, RayCast2d};
use bevy::prelude::*;

use crate::projectile::Projectile;
use crate::resources::BallisticsConfig;
use crate::types::{CollisionAxis, CollisionReport, ProjectileClass, WallId};

/// Strict overlap test between two rectangles.
///
/// Rectangles that only share an edge do not overlap.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Swept test between two frames: cast a ray from `start` toward `end`
/// and return where it first enters `rect`.
///
/// A projectile that crossed a thin wall entirely within one step still
/// produces an entry point. A segment starting inside the wall enters at
/// `start`.
///
/// # Arguments
/// * `start` - Segment start (previous projectile centre)
/// * `end` - Segment end (current projectile centre)
/// * `rect` - Wall rectangle
///
/// # Returns
/// The entry point, or `None` if the segment misses the rectangle
pub fn swept_entry(start: Vec2, end: Vec2, rect: Rect) -> Option<Vec2> {
    let delta = end - start;
    let Ok(direction) = Dir2::new(delta) else {
        // Zero-length step: only a hit if the projectile sits in the wall
        return rect.contains(start).then_some(start);
    };

    let aabb = Aabb2d::new(rect.center(), rect.half_size());
    RayCast2d::new(start, direction, delta.length())
        .aabb_intersection_at(&aabb)
        .map(|distance| start + *direction * distance)
}

/// Pick the face a light projectile bounces off.
///
/// With a non-degenerate overlap the thinner overlap extent wins
/// (`width < height` is a left/right hit, otherwise top/bottom). When the
/// overlap has no area the projectile only touched an edge, so the side is
/// inferred from where the previous centre sat relative to the wall.
/// `resolve_collisions` never produces that case for a positive radius: a
/// strict box hit or a square centred on a swept contact always has area.
///
/// # Arguments
/// * `bbox` - Projectile bounding square
/// * `wall` - Wall rectangle
/// * `previous_position` - Projectile centre before this step
pub fn collision_axis(bbox: Rect, wall: Rect, previous_position: Vec2) -> CollisionAxis {
    let overlap = bbox.intersect(wall);

    if overlap.is_empty() {
        let offset = (previous_position - wall.center()).abs() - wall.half_size();
        return if offset.x > offset.y {
            CollisionAxis::X
        } else {
            CollisionAxis::Y
        };
    }

    if overlap.width() < overlap.height() {
        CollisionAxis::X
    } else {
        CollisionAxis::Y
    }
}

/// Whether `velocity` on `axis` points from `position` toward the wall centre.
fn approaching(position: Vec2, velocity: Vec2, wall: Rect, axis: CollisionAxis) -> bool {
    let to_center = wall.center() - position;
    match axis {
        CollisionAxis::X => to_center.x * velocity.x > 0.0,
        CollisionAxis::Y => to_center.y * velocity.y > 0.0,
    }
}

/// Reflect and damp the velocity component on `axis`, then push the
/// projectile `config.bounce_nudge` units away from the wall centre.
fn bounce(bullet: &mut Projectile, wall: Rect, axis: CollisionAxis, config: &BallisticsConfig) {
    let center = wall.center();
    let nudge = config.bounce_nudge;

    match axis {
        CollisionAxis::X => {
            bullet.velocity.x *= -config.bounce_restitution;
            if bullet.position.x < center.x {
                bullet.position.x -= nudge;
            } else {
                bullet.position.x += nudge;
            }
        }
        CollisionAxis::Y => {
            bullet.velocity.y *= -config.bounce_restitution;
            if bullet.position.y < center.y {
                bullet.position.y -= nudge;
            } else {
                bullet.position.y += nudge;
            }
        }
    }
}

/// Resolve collisions between a freshly integrated projectile and `obstacles`.
///
/// A wall is hit when the bounding square overlaps it or the swept segment
/// from `previous_position` crosses it.
///
/// Light projectiles snap to the swept entry point (when there is one),
/// bounce, and stop processing: at most one wall is resolved per step. A
/// light projectile that overlaps a wall while already moving away from it
/// on the collision axis is left alone.
///
/// Heavy projectiles keep their position and lose speed once per wall,
/// tracked in `penetrated_walls`. Every wall is visited, so several walls
/// crossed in one step each charge their own penalty.
///
/// # Returns
/// Reports for every collision that changed the projectile
pub fn resolve_collisions(
    bullet: &mut Projectile,
    obstacles: &[Rect],
    config: &BallisticsConfig,
) -> Vec<CollisionReport> {
    let mut reports = Vec::new();
    let class = bullet.class(config);

    for (index, &wall) in obstacles.iter().enumerate() {
        let box_hit = overlaps(bullet.bounding_box(), wall);
        let swept = swept_entry(bullet.previous_position, bullet.position, wall);
        if !box_hit && swept.is_none() {
            continue;
        }

        let id = WallId(index);
        match class {
            ProjectileClass::Light => {
                let contact = swept.unwrap_or(bullet.position);
                let bbox = Rect::from_center_half_size(contact, Vec2::splat(bullet.radius));
                let axis = collision_axis(bbox, wall, bullet.previous_position);
                if !approaching(contact, bullet.velocity, wall, axis) {
                    // Still overlapping after a bounce, but already moving away
                    continue;
                }

                bullet.position = contact;
                bounce(bullet, wall, axis, config);

                reports.push(CollisionReport::Bounce {
                    wall: id,
                    axis,
                    point: contact,
                    velocity: bullet.velocity,
                });
                break;
            }
            ProjectileClass::Heavy => {
                if bullet.penetrated_walls.insert(id) {
                    bullet.velocity *= config.penetration_speed_retention;
                    reports.push(CollisionReport::Penetration {
                        wall: id,
                        point: swept.unwrap_or(bullet.position),
                        velocity: bullet.velocity,
                    });
                }
            }
        }
    }

    reports
}
