//! Tag-keyed projectile pool with round-robin recycling.
//!
//! Every tag owns an ordered queue of pre-spawned handles. `acquire` pops the
//! head handle and pushes it back onto the tail **immediately** — before the
//! caller has used it. The pool never marks a handle "in use": if acquisitions
//! outpace the time a projectile stays active, a later `acquire` hands out a
//! handle that is still logically alive and visibly jumps it to its new pose.
//!
//! That is a deliberate trade: no liveness bookkeeping, in exchange for a
//! sizing obligation that is part of the contract:
//!
//! ```text
//! capacity >= ceil(max_active_lifetime / min_time_between_acquisitions)
//! ```
//!
//! Acquisitions for the same tag are strictly FIFO over handle identities
//! (oldest-returned handle is reused first), which is what makes that sizing
//! rule sufficient.

use avian3d::prelude::*;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use std::collections::VecDeque;
use std::fmt;

use crate::common::layers::Layer;

use super::components::{PooledProjectile, Projectile, ProjectileState};

/// Key identifying which pool a projectile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolTag(pub &'static str);

impl fmt::Display for PoolTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const BULLET_TAG: PoolTag = PoolTag("Bullet");

#[derive(Debug, Clone)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub lifetime: f32,
}

#[derive(Debug, Clone)]
pub struct PoolSpec {
    pub tag: PoolTag,
    pub capacity: usize,
    pub projectile: ProjectileSpec,
}

/// Static pool configuration, consumed once at startup.
#[derive(Resource, Debug, Clone)]
pub struct PoolConfig(pub Vec<PoolSpec>);

impl Default for PoolConfig {
    fn default() -> Self {
        Self(vec![PoolSpec {
            tag: BULLET_TAG,
            capacity: 24,
            projectile: ProjectileSpec { speed: 20.0, lifetime: 5.0 },
        }])
    }
}

#[derive(Resource, Debug, Default)]
pub struct ProjectilePool {
    queues: HashMap<PoolTag, VecDeque<Entity>>,
}

impl ProjectilePool {
    /// Install the queue for one tag. Duplicate tags are a configuration
    /// error and abort initialization.
    pub fn register(&mut self, tag: PoolTag, handles: VecDeque<Entity>) {
        assert!(
            !handles.is_empty(),
            "projectile pool '{tag}' must have capacity > 0"
        );
        let prev = self.queues.insert(tag, handles);
        assert!(prev.is_none(), "duplicate projectile pool tag '{tag}'");
    }

    /// Round-robin acquire: pop the head handle, push it back onto the tail,
    /// return it. Unknown tags are a recoverable lookup miss — warn and
    /// return `None`, the caller simply does not fire this tick.
    pub fn acquire(&mut self, tag: PoolTag) -> Option<Entity> {
        let Some(queue) = self.queues.get_mut(&tag) else {
            warn!("projectile pool '{tag}' does not exist");
            return None;
        };

        let handle = queue
            .pop_front()
            .expect("pool queues are never empty after registration");
        queue.push_back(handle);
        Some(handle)
    }

    pub fn contains(&self, tag: PoolTag) -> bool {
        self.queues.contains_key(&tag)
    }

    pub fn capacity(&self, tag: PoolTag) -> usize {
        self.queues.get(&tag).map_or(0, VecDeque::len)
    }

    /// Handle identities in queue order, head first. Test/diagnostic hook.
    pub fn handles(&self, tag: PoolTag) -> impl Iterator<Item = Entity> + '_ {
        self.queues.get(&tag).into_iter().flatten().copied()
    }
}

#[inline]
pub fn active_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [Layer::World, Layer::Player])
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [] as [Layer; 0])
}

/// Pre-spawn every configured pool (inactive).
///
/// Handles are created here with count = capacity and never again; the
/// lifecycle after this point is in-place state toggling. Configuration
/// errors (empty spec list, zero capacity, duplicate tag) panic — they are
/// not recoverable by the core.
pub fn init_projectile_pools(
    mut commands: Commands,
    config: Res<PoolConfig>,
    mut pool: ResMut<ProjectilePool>,
) {
    assert!(
        !config.0.is_empty(),
        "projectile pool config must list at least one pool"
    );

    for spec in &config.0 {
        let mut handles = VecDeque::with_capacity(spec.capacity);

        for _ in 0..spec.capacity {
            let e = commands
                .spawn((
                    Name::new(format!("Projectile({})", spec.tag)),
                    PooledProjectile,
                    ProjectileState::Inactive,
                    Projectile::new(spec.projectile.speed, spec.projectile.lifetime),
                    Transform::default(),
                    Visibility::Hidden,
                    RigidBody::Kinematic,
                    Collider::sphere(0.15),
                    Sensor,
                    inactive_projectile_layers(),
                    LinearVelocity(Vec3::ZERO),
                    // Keep this always; inactive projectiles won't collide anyway
                    // because their filters are empty.
                    CollisionEventsEnabled,
                ))
                .id();

            handles.push_back(e);
        }

        pool.register(spec.tag, handles);
    }
}

/// Write the inactive-state invariants for one handle.
///
/// This is the only place those invariants are spelled out: hidden, zero
/// velocity, collides with nothing. The handle stays in its queue — there is
/// nothing to return. Idempotent: deactivating an inactive handle rewrites
/// the same values.
pub fn deactivate(
    state: &mut ProjectileState,
    vis: &mut Visibility,
    vel: &mut LinearVelocity,
    layers: &mut CollisionLayers,
) {
    *state = ProjectileState::Inactive;
    *vis = Visibility::Hidden;
    vel.0 = Vec3::ZERO;
    *layers = inactive_projectile_layers();
}
