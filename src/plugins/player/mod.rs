//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write PlayerInput resource
//! - FixedUpdate: apply velocity to kinematic rigid body
//!
//! The player is also the turrets' target: its collider carries the `Player`
//! layer that vision cones raycast against, and it is the sink for the
//! `LoseLife` messages projectiles emit on contact.
//!
//! Life semantics: losing a life with lives remaining hides the player and
//! clears its collision layers (vision cones and projectiles stop seeing it),
//! then teleports it back to the respawn point after `Tunables::respawn_delay`.
//! Hits arriving during the respawn window are ignored. Losing the last life
//! transitions to `GameState::GameOver`; gameplay systems are state-gated and
//! stop there.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter, Messages};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::audio::{SoundKind, SoundRequest};

#[derive(Component)]
pub struct Player;

/// Target-damaged sink: one message per qualifying projectile contact.
#[derive(Message, Clone, Copy, Debug)]
pub struct LoseLife {
    pub target: Entity,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct LifeCounter {
    pub current: u32,
    pub max: u32,
}

impl Default for LifeCounter {
    fn default() -> Self {
        Self { current: 3, max: 3 }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct RespawnPoint(pub Vec3);

impl Default for RespawnPoint {
    fn default() -> Self {
        Self(Vec3::new(0.0, 1.0, 6.0))
    }
}

/// Pending respawn, if any. While set, further `LoseLife` messages are ignored.
#[derive(Resource, Debug, Default)]
struct RespawnState {
    timer: Option<Timer>,
}

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .insert_resource(LifeCounter::default())
        .insert_resource(RespawnPoint::default())
        .insert_resource(RespawnState::default());

    app.init_resource::<Messages<LoseLife>>();
    app.add_systems(PostUpdate, update_lose_life_messages);

    app.add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(
            Update,
            (apply_lose_life, respawn_tick.after(apply_lose_life))
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, apply_movement.run_if(in_state(GameState::InGame)));
}

fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Projectile])
}

/// Layers for a player that is "deactivated" during the respawn window:
/// no memberships, so vision-cone rays and projectile contacts both miss it.
fn hidden_player_layers() -> CollisionLayers {
    CollisionLayers::NONE
}

fn spawn(mut commands: Commands, respawn: Res<RespawnPoint>) {
    commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_translation(respawn.0),
        RigidBody::Kinematic,
        Collider::capsule(0.4, 1.0),
        player_layers(),
        LinearVelocity::ZERO,
        Visibility::Visible,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = if axis.length_squared() > 0.0 {
        axis.normalize()
    } else {
        Vec2::ZERO
    };
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    // Ground-plane movement: W is forward (-Z). Vertical velocity is left alone.
    vel.0.x = input.move_axis.x * tunables.player_speed;
    vel.0.z = -input.move_axis.y * tunables.player_speed;
}

/// Maintain lose-life message buffers.
fn update_lose_life_messages(mut msgs: ResMut<Messages<LoseLife>>) {
    msgs.update();
}

fn apply_lose_life(
    tunables: Res<Tunables>,
    mut reader: MessageReader<LoseLife>,
    mut lives: ResMut<LifeCounter>,
    mut respawn: ResMut<RespawnState>,
    mut next_state: ResMut<NextState<GameState>>,
    mut sounds: MessageWriter<SoundRequest>,
    mut q_player: Query<
        (&mut Visibility, &mut CollisionLayers, &mut LinearVelocity),
        With<Player>,
    >,
) {
    for _hit in reader.read() {
        // Already deactivated and waiting to respawn: the hit cannot land.
        if respawn.timer.is_some() {
            continue;
        }

        lives.current = lives.current.saturating_sub(1);

        if lives.current > 0 {
            if let Ok((mut vis, mut layers, mut vel)) = q_player.single_mut() {
                *vis = Visibility::Hidden;
                *layers = hidden_player_layers();
                vel.0 = Vec3::ZERO;
            }
            respawn.timer = Some(Timer::from_seconds(tunables.respawn_delay, TimerMode::Once));
        } else {
            sounds.write(SoundRequest { kind: SoundKind::Lose });
            next_state.set(GameState::GameOver);
        }
    }
}

fn respawn_tick(
    time: Res<Time>,
    respawn_point: Res<RespawnPoint>,
    mut respawn: ResMut<RespawnState>,
    mut q_player: Query<
        (&mut Transform, &mut Visibility, &mut CollisionLayers),
        With<Player>,
    >,
) {
    let Some(timer) = respawn.timer.as_mut() else {
        return;
    };

    timer.tick(time.delta());
    if !timer.is_finished() {
        return;
    }
    respawn.timer = None;

    if let Ok((mut tf, mut vis, mut layers)) = q_player.single_mut() {
        tf.translation = respawn_point.0;
        *vis = Visibility::Visible;
        *layers = player_layers();
    }
}

#[cfg(test)]
mod tests;
