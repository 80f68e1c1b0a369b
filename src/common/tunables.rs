//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub length_unit: f32,
    pub player_speed: f32,
    pub respawn_delay: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self { length_unit: 1.0, player_speed: 6.0, respawn_delay: 3.0 }
    }
}
