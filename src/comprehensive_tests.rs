#[cfg(test)]
mod all_tests {
    use std::time::Duration;

    use bevy::ecs::message::Messages;
    use bevy::prelude::*;

    use crate::prelude::*;
    use crate::systems::kinematics;

    const DT: f32 = 1.0 / 60.0;

    fn thin_wall() -> Rect {
        Rect::new(100.0, -100.0, 130.0, 100.0)
    }

    fn still_air_round(origin: Vec2, speed: f32, radius: f32, mass: f32) -> Projectile {
        Projectile::spawn(
            &ProjectileSpec::new(origin, 0.0, speed)
                .with_radius(radius)
                .with_mass(mass)
                .with_drag(0.0),
            &BallisticsEnvironment::still_air(),
            &BallisticsConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_drag_only_speed_strictly_decreases() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        let mut p = Projectile::spawn(
            &ProjectileSpec::new(Vec2::new(0.0, 0.0), 30.0, 700.0),
            &env,
            &config,
        )
        .unwrap();

        let mut last_speed = p.velocity.length();
        for _ in 0..120 {
            p.advance(DT, &[], &env, &config);
            let speed = p.velocity.length();
            assert!(speed < last_speed, "speed {speed} did not drop below {last_speed}");
            last_speed = speed;
        }
    }

    #[test]
    fn test_gravity_only_trajectory() {
        let g = 300.0;
        let env = BallisticsEnvironment::still_air().with_gravity(Vec2::new(0.0, g));
        let config = BallisticsConfig::default();
        let mut p = Projectile::spawn(
            &ProjectileSpec::new(Vec2::new(100.0, 400.0), -45.0, 500.0).with_drag(0.0),
            &env,
            &config,
        )
        .unwrap();
        let v0 = p.velocity;

        for step in 1..=60 {
            p.advance(DT, &[], &env, &config);
            let t = step as f32 * DT;
            assert!((p.velocity.x - v0.x).abs() < 1e-3);
            assert!((p.velocity.y - (v0.y + g * t)).abs() < 1e-2);
        }
    }

    #[test]
    fn test_bounce_conservation() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        let mut p = still_air_round(Vec2::new(92.0, 0.0), 600.0, 5.0, 1.0);
        p.velocity.y = 0.0;

        let outcome = p.advance(DT, &[thin_wall()], &env, &config);

        assert_eq!(outcome.collisions.len(), 1);
        assert!((p.velocity.x - (-0.85 * 600.0)).abs() < 1e-3);
        assert_eq!(p.velocity.y, 0.0);
        assert!(p.position.x < 100.0);
    }

    #[test]
    fn test_single_penetration_penalty_across_steps() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        let deep_wall = Rect::new(100.0, -100.0, 400.0, 100.0);
        let mut p = still_air_round(Vec2::new(90.0, 0.0), 600.0, 10.0, 10.0);

        let first = p.advance(DT, &[deep_wall], &env, &config);
        assert_eq!(first.collisions.len(), 1);
        assert!((p.velocity.x - 360.0).abs() < 1e-3);

        for _ in 0..10 {
            let outcome = p.advance(DT, &[deep_wall], &env, &config);
            assert!(outcome.collisions.is_empty());
            assert!(deep_wall.contains(p.position));
            assert!((p.velocity.x - 360.0).abs() < 1e-3);
        }
        assert_eq!(p.penetrated_walls.len(), 1);
    }

    #[test]
    fn test_liveness_boundary() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        let edge = env.world_width * 1.5;

        let mut outside = still_air_round(Vec2::ZERO, 0.0, 5.0, 1.0);
        outside.position = Vec2::new(edge + 0.01, 0.0);
        let outcome = outside.advance(DT, &[], &env, &config);
        assert!(outcome.expired);
        assert!(!outside.is_alive());

        let mut inside = still_air_round(Vec2::ZERO, 0.0, 5.0, 1.0);
        inside.position = Vec2::new(edge - 0.01, 0.0);
        let outcome = inside.advance(DT, &[], &env, &config);
        assert!(!outcome.expired);
        assert!(inside.is_alive());
    }

    #[test]
    fn test_tunnelling_light_round_still_bounces() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        // 6000 * 1/60 = 100 units per step, far more than the 30-unit wall
        let mut p = still_air_round(Vec2::new(50.0, 0.0), 6000.0, 5.0, 1.0);

        let outcome = p.advance(DT, &[thin_wall()], &env, &config);

        assert_eq!(outcome.collisions.len(), 1);
        assert!(p.velocity.x < 0.0);
        assert!(p.position.x < 100.0);
    }

    #[test]
    fn test_tunnelling_heavy_round_still_penalised() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        let mut p = still_air_round(Vec2::new(50.0, 0.0), 6000.0, 5.0, 10.0);

        let outcome = p.advance(DT, &[thin_wall()], &env, &config);

        assert_eq!(outcome.collisions.len(), 1);
        assert!((p.velocity.x - 3600.0).abs() < 1e-2);
        assert!(p.position.x > 130.0);
    }

    #[test]
    fn test_no_obstacles_matches_pure_integrator() {
        let env = BallisticsEnvironment::default();
        let config = BallisticsConfig::default();
        let spec = ProjectileSpec::light_round(env.launcher_origin(), -20.0);
        let mut registry = ProjectileRegistry::default();
        let handle = registry.spawn(spec.clone(), &env, &config).unwrap();

        let reference = Projectile::spawn(&spec, &env, &config).unwrap();
        let mut position = reference.position;
        let mut velocity = reference.velocity;

        for _ in 0..30 {
            let summary = registry.update_all(DT, &[], &env, &config);
            assert!(summary.collisions.is_empty());

            let accel = kinematics::calculate_acceleration(&reference, velocity, &env);
            velocity += accel * DT;
            position += velocity * DT;
        }

        let p = registry.get(handle).unwrap();
        assert!((p.position - position).length() < 1e-3);
        assert!((p.velocity - velocity).length() < 1e-3);
    }

    #[test]
    fn test_disabled_walls_pass_through() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        let mut obstacles = Obstacles::new(vec![thin_wall()]);
        obstacles.toggle();
        let mut p = still_air_round(Vec2::new(92.0, 0.0), 600.0, 5.0, 1.0);

        let outcome = p.advance(DT, obstacles.active(), &env, &config);

        assert!(outcome.collisions.is_empty());
        assert_eq!(p.velocity.x, 600.0);
    }

    #[test]
    fn test_trail_grows_one_point_per_step() {
        let env = BallisticsEnvironment::default();
        let config = BallisticsConfig::default();
        let mut p = Projectile::spawn(
            &ProjectileSpec::light_round(env.launcher_origin(), 0.0),
            &env,
            &config,
        )
        .unwrap();

        for step in 1..=20 {
            p.advance(DT, &[], &env, &config);
            assert_eq!(p.trail.len(), step);
        }
    }

    #[test]
    fn test_trail_cap_keeps_newest_points() {
        let env = BallisticsEnvironment::default();
        let config = BallisticsConfig::default().with_max_trail_length(8);
        let mut p = Projectile::spawn(
            &ProjectileSpec::light_round(env.launcher_origin(), 0.0),
            &env,
            &config,
        )
        .unwrap();

        for _ in 0..20 {
            p.advance(DT, &[], &env, &config);
        }
        assert_eq!(p.trail.len(), 8);
        assert_eq!(p.trail.last(), Some(p.position));
    }

    #[test]
    fn test_gated_wall_gap_lets_rounds_through() {
        let env = BallisticsEnvironment::still_air();
        let config = BallisticsConfig::default();
        let obstacles = Obstacles::gated_wall(env.world_width, env.world_height);
        let mut registry = ProjectileRegistry::default();
        let origin = env.launcher_origin();

        let through_gap = registry
            .spawn(ProjectileSpec::light_round(origin, 0.0).with_drag(0.0), &env, &config)
            .unwrap();

        for _ in 0..60 {
            let summary = registry.update_all(DT, obstacles.active(), &env, &config);
            assert!(summary.collisions.is_empty());
        }
        let p = registry.get(through_gap).unwrap();
        assert!(p.position.x > 630.0);
    }

    fn headless_app(env: BallisticsEnvironment, obstacles: Obstacles) -> App {
        let mut app = App::new();
        app.insert_resource(env)
            .insert_resource(obstacles)
            .init_resource::<Time<Fixed>>()
            .add_plugins(BallisticsCorePlugin);
        app
    }

    fn fixed_tick(app: &mut App) {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_secs_f32(DT));
        app.world_mut().run_schedule(FixedUpdate);
    }

    #[test]
    fn test_plugin_spawns_from_fire_events() {
        let mut app = headless_app(BallisticsEnvironment::default(), Obstacles::default());

        let origin = Vec2::new(100.0, 400.0);
        app.world_mut().write_message(FireEvent::heavy(origin, 0.0));
        app.world_mut().write_message(FireEvent::light(origin, 10.0));
        app.world_mut()
            .write_message(FireEvent::new(ProjectileSpec::new(origin, 0.0, 100.0).with_radius(-1.0)));
        app.world_mut().run_schedule(Update);

        let registry = app.world().resource::<ProjectileRegistry>();
        assert_eq!(registry.len(), 2, "invalid spec must not be admitted");
    }

    #[test]
    fn test_plugin_steps_and_reports_penetration() {
        let env = BallisticsEnvironment::still_air();
        let obstacles = Obstacles::new(vec![Rect::new(600.0, 0.0, 630.0, 800.0)]);
        let mut app = headless_app(env, obstacles);

        app.world_mut()
            .write_message(FireEvent::heavy(Vec2::new(590.0, 400.0), 0.0));
        app.world_mut().run_schedule(Update);
        fixed_tick(&mut app);

        let penetrations = app.world().resource::<Messages<PenetrationEvent>>();
        assert_eq!(penetrations.len(), 1);

        let registry = app.world().resource::<ProjectileRegistry>();
        let view = registry.list().next().unwrap();
        assert_eq!(view.trail.len(), 1);
        // (800 - drag) * 0.6
        assert!((view.velocity.x - 476.8).abs() < 0.1);
    }

    #[test]
    fn test_plugin_reports_expired_projectiles() {
        let mut app = headless_app(BallisticsEnvironment::default(), Obstacles::default());

        app.world_mut()
            .write_message(FireEvent::light(Vec2::new(1799.0, 400.0), 0.0));
        app.world_mut().run_schedule(Update);
        fixed_tick(&mut app);

        assert!(app.world().resource::<ProjectileRegistry>().is_empty());
        let expired = app.world().resource::<Messages<ProjectileExpiredEvent>>();
        assert_eq!(expired.len(), 1);
    }
}
