//! Spawn consumer: activate projectiles from the pool.
//!
//! # Fail-fast invariants
//! - Pool queues contain only valid pooled projectile entities.
//! - Therefore, an acquired entity must match the projectile query.
//!
//! If this is violated, we `expect()` and crash loudly. A lookup miss on the
//! tag itself is different: that is a recoverable configuration slip, logged
//! inside `ProjectilePool::acquire`, and the request is dropped.
//!
//! Note the acquired handle may still be `Active` from a previous shot — the
//! pool recycles round-robin with no liveness tracking. Activation is the
//! same either way; an alive handle simply jumps to the new pose.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileState};
use super::messages::SpawnProjectileRequest;
use super::pool::{active_projectile_layers, ProjectilePool};

pub fn allocate_projectiles(
    mut pool: ResMut<ProjectilePool>,
    mut reader: MessageReader<SpawnProjectileRequest>,
    mut q: Query<
        (
            &mut ProjectileState,
            &mut Projectile,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<PooledProjectile>,
    >,
) {
    for req in reader.read() {
        let Some(e) = pool.acquire(req.tag) else {
            // Unknown tag: already logged, the shot is silently dropped.
            continue;
        };

        let (mut state, mut projectile, mut tf, mut vel, mut vis, mut layers) = q
            .get_mut(e)
            .expect("ProjectilePool contained an entity missing pooled projectile components");

        *state = ProjectileState::Active;
        projectile.reset_for_fire();

        tf.translation = req.position;
        tf.rotation = req.rotation;

        let speed = projectile.speed;
        vel.0 = req.rotation * (Vec3::NEG_Z * speed);

        *vis = Visibility::Visible;
        *layers = active_projectile_layers();
    }
}
