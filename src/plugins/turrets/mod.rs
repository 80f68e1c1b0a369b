//! Turrets plugin: vision-driven fire control.
//!
//! Per frame, for each turret: `update_vision` overwrites the cone's
//! visibility flag, then `tick_fire_control` makes the fire decision and
//! writes spawn-request messages the projectiles allocator consumes later the
//! same frame. That ordering is a data dependency within one turret; across
//! turrets no ordering is guaranteed and none may be relied upon.

pub mod fire_control;
pub mod vision;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::plugins::projectiles::allocator::allocate_projectiles;
use crate::plugins::projectiles::pool::BULLET_TAG;

use fire_control::{FireControl, FireMode};
use vision::VisionCone;

const VIEW_DISTANCE: f32 = 10.0;
const VIEW_ANGLE: f32 = 45.0;
const HORIZONTAL_SAMPLES: u32 = 20;
const VERTICAL_SAMPLES: u32 = 10;
const FIRE_INTERVAL: f32 = 2.0;
const TRACKING_MAX_RANGE: f32 = 10.0;

pub struct TurretsPlugin;

impl Plugin for TurretsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), spawn_turrets);

        // vision -> fire decision -> allocator, all within one frame.
        app.add_systems(
            Update,
            (
                vision::update_vision,
                fire_control::tick_fire_control.after(vision::update_vision),
            )
                .before(allocate_projectiles)
                .run_if(in_state(GameState::InGame)),
        );
    }
}

fn turret_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Turret, [Layer::Player])
}

fn cone() -> VisionCone {
    VisionCone::new(
        VIEW_DISTANCE,
        VIEW_ANGLE,
        HORIZONTAL_SAMPLES,
        VERTICAL_SAMPLES,
        Layer::Player,
    )
}

/// One emplacement per fire mode, all watching the approach to the player
/// spawn.
fn spawn_turrets(mut commands: Commands) {
    let player_spawn = crate::plugins::player::RespawnPoint::default().0;
    let muzzle = Transform::from_xyz(0.0, 0.5, -0.8);

    commands.spawn((
        Name::new("TurretSingle"),
        Transform::from_xyz(-6.0, 1.5, -10.0).looking_at(player_spawn, Vec3::Y),
        RigidBody::Static,
        Collider::cuboid(1.2, 1.2, 1.2),
        turret_layers(),
        cone(),
        FireControl::new(FIRE_INTERVAL, muzzle, BULLET_TAG, FireMode::Single),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("TurretTwin"),
        Transform::from_xyz(6.0, 1.5, -10.0).looking_at(player_spawn, Vec3::Y),
        RigidBody::Static,
        Collider::cuboid(1.2, 1.2, 1.2),
        turret_layers(),
        cone(),
        FireControl::new(
            FIRE_INTERVAL,
            Transform::from_xyz(-0.4, 0.5, -0.8),
            BULLET_TAG,
            FireMode::TwinBarrel {
                second_muzzle: Transform::from_xyz(0.4, 0.5, -0.8),
            },
        ),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("TurretTracking"),
        Transform::from_xyz(0.0, 2.0, -14.0).looking_at(player_spawn, Vec3::Y),
        RigidBody::Static,
        Collider::cuboid(1.2, 1.2, 1.2),
        turret_layers(),
        cone(),
        FireControl::new(
            FIRE_INTERVAL,
            muzzle,
            BULLET_TAG,
            FireMode::TrackingRanged { max_range: TRACKING_MAX_RANGE },
        ),
        DespawnOnExit(GameState::InGame),
    ));
}
