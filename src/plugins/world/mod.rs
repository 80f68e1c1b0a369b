//! World plugin: spawns the ground, platforms, and perimeter walls.
//!
//! Static level geometry carries the `World` layer so turret rays that miss the
//! player can terminate on it and projectiles have something to expire against.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

const ARENA_HALF_W: f32 = 24.0;
const ARENA_HALF_D: f32 = 24.0;
const WALL_HEIGHT: f32 = 6.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_arena);
    app.add_systems(OnEnter(GameState::InGame), spawn_platforms);
}

fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Projectile])
}

fn spawn_arena(mut commands: Commands) {
    let thickness = 1.0;

    let mut spawn_slab = |name: String, pos: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name),
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            world_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    };

    spawn_slab(
        "Ground".into(),
        Vec3::new(0.0, -thickness * 0.5, 0.0),
        Vec3::new(ARENA_HALF_W * 2.0, thickness, ARENA_HALF_D * 2.0),
    );
    spawn_slab(
        "WallNorth".into(),
        Vec3::new(0.0, WALL_HEIGHT * 0.5, -ARENA_HALF_D - thickness * 0.5),
        Vec3::new(ARENA_HALF_W * 2.0, WALL_HEIGHT, thickness),
    );
    spawn_slab(
        "WallSouth".into(),
        Vec3::new(0.0, WALL_HEIGHT * 0.5, ARENA_HALF_D + thickness * 0.5),
        Vec3::new(ARENA_HALF_W * 2.0, WALL_HEIGHT, thickness),
    );
    spawn_slab(
        "WallWest".into(),
        Vec3::new(-ARENA_HALF_W - thickness * 0.5, WALL_HEIGHT * 0.5, 0.0),
        Vec3::new(thickness, WALL_HEIGHT, ARENA_HALF_D * 2.0),
    );
    spawn_slab(
        "WallEast".into(),
        Vec3::new(ARENA_HALF_W + thickness * 0.5, WALL_HEIGHT * 0.5, 0.0),
        Vec3::new(thickness, WALL_HEIGHT, ARENA_HALF_D * 2.0),
    );
}

/// A handful of static platforms between the turret emplacements.
fn spawn_platforms(mut commands: Commands) {
    let spots = [
        Vec3::new(-8.0, 1.5, -4.0),
        Vec3::new(-3.0, 2.5, -9.0),
        Vec3::new(4.0, 3.5, -6.0),
        Vec3::new(9.0, 2.0, 2.0),
    ];

    for (i, pos) in spots.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Platform{i}")),
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(4.0, 0.5, 4.0),
            world_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

#[cfg(test)]
mod tests;
