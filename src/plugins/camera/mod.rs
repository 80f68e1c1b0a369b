//! Camera plugin (render-only).
//!
//! Follows the player from a fixed shoulder offset with exponential
//! smoothing. Disjointness between the two Transform queries is encoded with
//! `Without<...>` filters so Bevy can prove they never alias.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::Player;

const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 8.0, 12.0);

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera { responsiveness: 5.0 },
        Transform::from_translation(FOLLOW_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    let goal = tf_player.translation + FOLLOW_OFFSET;
    tf_cam.translation = tf_cam.translation.lerp(goal, alpha);
    tf_cam.look_at(tf_player.translation, Vec3::Y);
}
