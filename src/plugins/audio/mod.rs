//! Audio plugin: fire-and-forget sound requests.
//!
//! Gameplay systems never talk to an audio backend directly; they write
//! `SoundRequest` messages and move on. The sink below resolves each request
//! against the `SoundBank`. Every kind is gated by its *own* clip slot, and a
//! kind with no clip assigned is a silent no-op.
//!
//! Mixing/playback is the render side's concern; the gameplay sink stops at
//! resolving which clip a request maps to.

use bevy::ecs::message::{MessageReader, Messages};
use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundKind {
    LaserShot,
    Lose,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct SoundRequest {
    pub kind: SoundKind,
}

/// Clip slot per sound kind. `None` means the effect is not wired up.
#[derive(Resource, Debug, Default)]
pub struct SoundBank {
    pub laser_shot: Option<&'static str>,
    pub lose: Option<&'static str>,
}

impl SoundBank {
    pub fn clip(&self, kind: SoundKind) -> Option<&'static str> {
        match kind {
            SoundKind::LaserShot => self.laser_shot,
            SoundKind::Lose => self.lose,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(SoundBank::default());
    app.init_resource::<Messages<SoundRequest>>();
    app.add_systems(
        PostUpdate,
        (drain_sound_requests, update_sound_messages.after(drain_sound_requests)),
    );
}

/// Messages are double-buffered; `update()` advances buffers.
fn update_sound_messages(mut msgs: ResMut<Messages<SoundRequest>>) {
    msgs.update();
}

fn drain_sound_requests(bank: Res<SoundBank>, mut reader: MessageReader<SoundRequest>) {
    for req in reader.read() {
        if let Some(path) = bank.clip(req.kind) {
            debug!("sound: {path}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_resolves_its_own_slot() {
        let bank = SoundBank { laser_shot: Some("sfx/laser.ogg"), lose: None };
        assert_eq!(bank.clip(SoundKind::LaserShot), Some("sfx/laser.ogg"));
        assert_eq!(bank.clip(SoundKind::Lose), None);
    }
}
