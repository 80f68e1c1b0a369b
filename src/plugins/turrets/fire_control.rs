//! Fire control: a timer-gated trigger driven by the vision signal.
//!
//! One component, one system, and a closed variant set dispatched by `match`
//! instead of an inheritance ladder. `READY` is not a stored state — it is
//! the predicate `cooldown <= 0`.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::plugins::audio::{SoundKind, SoundRequest};
use crate::plugins::player::Player;
use crate::plugins::projectiles::messages::SpawnProjectileRequest;
use crate::plugins::projectiles::pool::PoolTag;

use super::vision::VisionCone;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireMode {
    /// One shot from the muzzle.
    Single,
    /// Two shots per fire event: muzzle + second muzzle. The second barrel is
    /// never gated independently — both always fire together.
    TwinBarrel { second_muzzle: Transform },
    /// Fires only when the target is within `max_range` of the turret, and
    /// reorients the muzzle to face the target before each shot.
    TrackingRanged { max_range: f32 },
}

#[derive(Component, Debug, Clone)]
pub struct FireControl {
    pub fire_interval: f32,
    /// Seconds until the next permitted shot. Drains every tick regardless of
    /// visibility and is never clamped; negative just means "overdue".
    pub cooldown: f32,
    /// Spawn pose, local to the turret.
    pub muzzle: Transform,
    pub tag: PoolTag,
    pub mode: FireMode,
}

impl FireControl {
    /// The cooldown starts full, so the first shot is delayed by one whole
    /// interval rather than firing the moment the target appears.
    pub fn new(fire_interval: f32, muzzle: Transform, tag: PoolTag, mode: FireMode) -> Self {
        assert!(fire_interval > 0.0, "fire_interval must be positive");
        if let FireMode::TrackingRanged { max_range } = mode {
            assert!(max_range > 0.0, "max_range must be positive");
        }

        Self { fire_interval, cooldown: fire_interval, muzzle, tag, mode }
    }

    #[inline]
    fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

/// Per-tick fire decision for every turret.
///
/// Gate order: visible → (TrackingRanged) locator present and in range →
/// cooldown elapsed. A turret whose target hides mid-cooldown keeps draining
/// the timer, so the first visible tick after it elapsed fires immediately.
pub fn tick_fire_control(
    time: Res<Time>,
    q_target: Query<&Transform, (With<Player>, Without<FireControl>)>,
    mut q_turrets: Query<(&Transform, &VisionCone, &mut FireControl)>,
    mut shots: MessageWriter<SpawnProjectileRequest>,
    mut sounds: MessageWriter<SoundRequest>,
) {
    let dt = time.delta_secs();

    // A missing target locator is "condition false" for the tracking gates,
    // never a fault.
    let target = q_target.single().ok().map(|tf| tf.translation);

    for (turret_tf, cone, mut fire) in &mut q_turrets {
        fire.cooldown -= dt;

        if !cone.is_visible {
            continue;
        }

        let mut muzzle = turret_tf.mul_transform(fire.muzzle);

        match fire.mode {
            FireMode::TrackingRanged { max_range } => {
                let Some(target_pos) = target else {
                    continue;
                };
                if turret_tf.translation.distance(target_pos) > max_range {
                    continue;
                }
                if !fire.ready() {
                    continue;
                }
                muzzle = muzzle.looking_at(target_pos, Vec3::Y);
            }
            FireMode::Single | FireMode::TwinBarrel { .. } => {
                if !fire.ready() {
                    continue;
                }
            }
        }

        shots.write(SpawnProjectileRequest {
            tag: fire.tag,
            position: muzzle.translation,
            rotation: muzzle.rotation,
        });

        if let FireMode::TwinBarrel { second_muzzle } = fire.mode {
            let second = turret_tf.mul_transform(second_muzzle);
            shots.write(SpawnProjectileRequest {
                tag: fire.tag,
                position: second.translation,
                rotation: second.rotation,
            });
        }

        sounds.write(SoundRequest { kind: SoundKind::LaserShot });
        fire.cooldown = fire.fire_interval;
    }
}
