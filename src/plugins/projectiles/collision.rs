use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::player::LoseLife;

use super::components::{PooledProjectile, Projectile, ProjectileState};
use super::pool;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[inline]
fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

/// Resolve projectile contacts.
///
/// Any qualifying contact is terminal for the shot: hitting the player emits
/// a `LoseLife` message first, then the handle deactivates in place. The
/// handle never leaves its pool queue, so there is no "return" step.
pub fn process_projectile_contacts(
    mut started: MessageReader<CollisionStart>,
    // Fast "is this a pooled projectile?" check
    q_is_projectile: Query<(), With<PooledProjectile>>,
    // Projectile state; disjoint from q_layers via With/Without
    mut q_projectiles: Query<
        (
            &mut ProjectileState,
            &mut Visibility,
            &mut LinearVelocity,
            &mut CollisionLayers,
        ),
        (With<PooledProjectile>, With<Projectile>),
    >,
    // Read layers from the other collider
    q_layers: Query<&CollisionLayers, Without<PooledProjectile>>,
    mut lose_life: MessageWriter<LoseLife>,
    // Per-frame dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        // Identify the projectile side without get_mut probing
        let p1 = q_is_projectile.contains(t1.collider);
        let p2 = q_is_projectile.contains(t2.collider);
        if !(p1 ^ p2) {
            continue; // must be exactly one projectile
        }
        let (shot_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        // Deduplicate per projectile collider
        if !seen.insert(shot_side.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };

        let Ok((mut state, mut vis, mut vel, mut layers)) =
            q_projectiles.get_mut(shot_side.collider)
        else {
            continue;
        };

        // Ignore if somehow not active (shouldn't happen with empty filters, but safe)
        if *state != ProjectileState::Active {
            continue;
        }

        // PLAYER: damage sink, then the shot is spent
        if is_in_layer(other_layers, Layer::Player) {
            lose_life.write(LoseLife {
                target: other_side.gameplay_owner(),
            });
        }

        // Every qualifying contact deactivates the shot in place
        pool::deactivate(&mut state, &mut vis, &mut vel, &mut layers);
    }
}
