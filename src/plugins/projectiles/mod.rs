//! Projectiles plugin: **message-based producer → consumer** spawning over a
//! tag-keyed, round-robin pool.
//!
//! # Philosophy: invariants first
//! This module tree pushes correctness checks to boundaries and keeps hot
//! paths (allocation, flight tick, contact resolve) as straight-line as
//! possible:
//! - pool **configuration** errors (duplicate tag, zero capacity, empty spec
//!   list) panic at startup,
//! - pool **lookup** misses (unknown tag at fire time) warn and drop the shot,
//! - everything in between is a fail-fast `expect()` invariant.
//!
//! # Data flow (big picture)
//! ```text
//!   Update schedule (variable dt)
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  (A) Vision: turrets overwrite VisionCone.is_visible                  │
//! │                                                                       │
//! │  (B) Producer: fire control (turrets plugin)                          │
//! │      - reads: VisionCone, player Transform, cooldown timers           │
//! │      - writes: SpawnProjectileRequest message                         │
//! │                                                                       │
//! │  (C) Consumer: allocate_projectiles                                   │
//! │      - reads: SpawnProjectileRequest messages                         │
//! │      - mutates: ProjectilePool queue (pop head, push tail)            │
//! │      - mutates: ProjectileState, Transform, LinearVelocity,           │
//! │                 Visibility, CollisionLayers                           │
//! └───────────────────────────────────────────────────────────────────────┘
//!                 │
//!                 v
//! FixedUpdate / FixedPostUpdate (fixed dt)
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  (D) Physics integrates kinematic velocity, emits CollisionStart      │
//! │                                                                       │
//! │  (E) tick_projectile_lifetimes: countdown → in-place deactivation     │
//! │                                                                       │
//! │  (F) process_projectile_contacts: player hit → LoseLife message,      │
//! │      any hit → in-place deactivation                                  │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Why is there no "return to pool" step?
//! `ProjectilePool::acquire` re-enqueues the handle immediately, so handles
//! never leave their queue. Deactivation is value mutation on the entity, not
//! a queue operation. The price is the sizing obligation documented on
//! `pool::ProjectilePool`; the capacity-starvation test pins down that reuse
//! under pressure stays deterministic instead of erroring.

pub mod components;
pub mod pool;

pub mod messages;
pub mod allocator;
pub mod flight;
pub mod collision;

use avian3d::collision::narrow_phase::CollisionEventSystems;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct ProjectilesPlugin;

/// Maintain spawn request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_spawn_messages(mut msgs: ResMut<Messages<messages::SpawnProjectileRequest>>) {
    msgs.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        // Pool + pre-spawn
        app.init_resource::<pool::PoolConfig>()
            .init_resource::<pool::ProjectilePool>()
            .add_systems(Startup, pool::init_projectile_pools);

        // Message storage for spawn requests.
        app.init_resource::<Messages<messages::SpawnProjectileRequest>>();
        app.add_systems(PostUpdate, update_spawn_messages);

        // Update-phase consumer. The producers (turret fire control) are
        // ordered before this system by the turrets plugin.
        app.add_systems(
            Update,
            allocator::allocate_projectiles.run_if(in_state(GameState::InGame)),
        );

        // Fixed pipeline: lifetime countdown, then contact resolution after
        // the narrow phase has emitted CollisionStart.
        app.add_systems(
            FixedUpdate,
            flight::tick_projectile_lifetimes.run_if(in_state(GameState::InGame)),
        );
        app.add_systems(
            FixedPostUpdate,
            collision::process_projectile_contacts
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
