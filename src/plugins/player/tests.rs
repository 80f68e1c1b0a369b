use avian3d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use std::time::Duration;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::audio::SoundRequest;

fn world_with_lives(lives: u32) -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(LifeCounter { current: lives, max: 3 });
    world.insert_resource(RespawnState::default());
    world.insert_resource(RespawnPoint::default());
    world.init_resource::<NextState<GameState>>();
    world.init_resource::<Messages<LoseLife>>();
    world.init_resource::<Messages<SoundRequest>>();
    world
}

fn spawn_test_player(world: &mut World) -> Entity {
    world
        .spawn((
            Player,
            Transform::from_xyz(3.0, 1.0, -2.0),
            Visibility::Visible,
            player_layers(),
            LinearVelocity(Vec3::new(1.0, 0.0, 1.0)),
        ))
        .id()
}

#[test]
fn spawn_creates_player() {
    let mut world = World::new();
    world.insert_resource(RespawnPoint::default());
    run_system_once(&mut world, super::spawn);
    assert!(world.query::<&Player>().iter(&world).next().is_some());
}

#[test]
fn apply_movement_sets_ground_plane_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables { length_unit: 1.0, player_speed: 6.0, respawn_delay: 3.0 });
    world.insert_resource(PlayerInput { move_axis: Vec2::new(1.0, 0.0) });
    world.spawn((Player, LinearVelocity::ZERO));

    run_system_once(&mut world, apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec3::new(6.0, 0.0, 0.0));
}

#[test]
fn forward_input_moves_towards_negative_z() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerInput { move_axis: Vec2::new(0.0, 1.0) });
    world.spawn((Player, LinearVelocity::ZERO));

    run_system_once(&mut world, apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert!(v.0.z < 0.0);
}

#[test]
fn lose_life_decrements_and_hides_player() {
    let mut world = world_with_lives(3);
    let player = spawn_test_player(&mut world);

    world.write_message(LoseLife { target: player });
    run_system_once(&mut world, apply_lose_life);

    assert_eq!(world.resource::<LifeCounter>().current, 2);
    assert_eq!(*world.get::<Visibility>(player).unwrap(), Visibility::Hidden);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec3::ZERO);

    // Deactivated: no memberships, so rays and contacts both miss.
    let layers = world.get::<CollisionLayers>(player).unwrap();
    assert!(!layers.memberships.has_all(Layer::Player));

    assert!(world.resource::<RespawnState>().timer.is_some());
}

#[test]
fn hits_during_respawn_window_are_ignored() {
    let mut world = world_with_lives(3);
    let player = spawn_test_player(&mut world);

    world.write_message(LoseLife { target: player });
    world.write_message(LoseLife { target: player });
    run_system_once(&mut world, apply_lose_life);

    // Only the first hit lands; the second arrives while respawning.
    assert_eq!(world.resource::<LifeCounter>().current, 2);
}

#[test]
fn last_life_triggers_game_over_and_lose_sound() {
    let mut world = world_with_lives(1);
    let player = spawn_test_player(&mut world);

    world.write_message(LoseLife { target: player });
    run_system_once(&mut world, apply_lose_life);

    assert_eq!(world.resource::<LifeCounter>().current, 0);
    assert!(matches!(
        *world.resource::<NextState<GameState>>(),
        NextState::Pending(GameState::GameOver)
    ));

    let sounds: Vec<_> = world
        .resource_mut::<Messages<SoundRequest>>()
        .drain()
        .collect();
    assert_eq!(sounds.len(), 1);
    assert_eq!(sounds[0].kind, SoundKind::Lose);
}

#[test]
fn respawn_restores_player_at_respawn_point() {
    let mut world = world_with_lives(3);
    let player = spawn_test_player(&mut world);

    world.write_message(LoseLife { target: player });
    run_system_once(&mut world, apply_lose_life);

    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(3.5));
    world.insert_resource(time);

    run_system_once(&mut world, respawn_tick);

    assert!(world.resource::<RespawnState>().timer.is_none());
    assert_eq!(
        world.get::<Transform>(player).unwrap().translation,
        RespawnPoint::default().0
    );
    assert_eq!(*world.get::<Visibility>(player).unwrap(), Visibility::Visible);
    assert!(world
        .get::<CollisionLayers>(player)
        .unwrap()
        .memberships
        .has_all(Layer::Player));
}
