//! Flight lifetime: count down and self-deactivate on timeout.
//!
//! Movement itself is the physics integrator's job (kinematic body + linear
//! velocity set once at activation); this system only owns the lifetime
//! counter. It is a plain decrementing counter evaluated once per fixed tick,
//! not a scheduled callback.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileState};
use super::pool;

pub fn tick_projectile_lifetimes(
    time: Res<Time<Fixed>>,
    mut q: Query<
        (
            &mut ProjectileState,
            &mut Projectile,
            &mut Visibility,
            &mut LinearVelocity,
            &mut CollisionLayers,
        ),
        With<PooledProjectile>,
    >,
) {
    let dt = time.delta_secs();

    for (mut state, mut projectile, mut vis, mut vel, mut layers) in &mut q {
        if *state != ProjectileState::Active {
            continue;
        }

        projectile.remaining_life -= dt;
        if projectile.remaining_life <= 0.0 {
            pool::deactivate(&mut state, &mut vis, &mut vel, &mut layers);
        }
    }
}
