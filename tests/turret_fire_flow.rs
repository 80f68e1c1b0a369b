mod common;

use avian3d::prelude::*;
use bevy::prelude::*;

use turret_platformer::plugins::player::{LifeCounter, Player};
use turret_platformer::plugins::projectiles::components::ProjectileState;
use turret_platformer::plugins::projectiles::messages::SpawnProjectileRequest;
use turret_platformer::plugins::projectiles::pool::{
    PoolConfig, PoolSpec, ProjectilePool, ProjectileSpec, BULLET_TAG,
};

/// A capacity-1 pool under repeated fire must keep serving the same handle,
/// deterministically repositioning it instead of erroring out.
#[test]
fn starved_pool_recycles_its_single_handle() {
    let mut app = common::app_headless();

    // Shrink the pool before Startup consumes the config. Zero speed keeps
    // the handle where the allocator put it.
    app.insert_resource(PoolConfig(vec![PoolSpec {
        tag: BULLET_TAG,
        capacity: 1,
        projectile: ProjectileSpec { speed: 0.0, lifetime: 60.0 },
    }]));
    app.update();

    let handle = app
        .world()
        .resource::<ProjectilePool>()
        .handles(BULLET_TAG)
        .next()
        .expect("pool registered one handle");

    for position in [
        Vec3::new(0.0, 1.0, -2.0),
        Vec3::new(4.0, 1.0, -6.0),
        Vec3::new(-3.0, 2.0, -9.0),
    ] {
        app.world_mut().write_message(SpawnProjectileRequest {
            tag: BULLET_TAG,
            position,
            rotation: Quat::IDENTITY,
        });
        app.update();

        assert_eq!(
            *app.world().get::<ProjectileState>(handle).unwrap(),
            ProjectileState::Active
        );
        assert_eq!(
            app.world().get::<Transform>(handle).unwrap().translation,
            position
        );
    }
}

/// Contact resolution through the real schedules: a projectile touching the
/// player spends the shot and costs a life.
#[test]
fn player_hit_costs_a_life() {
    let mut app = common::app_headless();
    app.update();

    // Activate one pooled handle far from anything.
    app.world_mut().write_message(SpawnProjectileRequest {
        tag: BULLET_TAG,
        position: Vec3::new(0.0, 50.0, 0.0),
        rotation: Quat::IDENTITY,
    });
    app.update();

    let shot = app
        .world()
        .resource::<ProjectilePool>()
        .handles(BULLET_TAG)
        .next()
        .unwrap();
    assert_eq!(
        *app.world().get::<ProjectileState>(shot).unwrap(),
        ProjectileState::Active
    );

    let player = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .unwrap();

    // Inject the narrow-phase message and run the fixed post step that
    // resolves contacts.
    app.world_mut().write_message(CollisionStart {
        collider1: shot,
        collider2: player,
        body1: None,
        body2: None,
    });
    app.world_mut().run_schedule(FixedPostUpdate);

    assert_eq!(
        *app.world().get::<ProjectileState>(shot).unwrap(),
        ProjectileState::Inactive
    );

    // Next frame the player plugin consumes the LoseLife message.
    app.update();

    assert_eq!(app.world().resource::<LifeCounter>().current, 2);
    assert_eq!(
        *app.world().get::<Visibility>(player).unwrap(),
        Visibility::Hidden
    );
    assert_eq!(
        *app.world().get::<CollisionLayers>(player).unwrap(),
        CollisionLayers::NONE
    );
}
