//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) executes a system
//! without building a schedule, which keeps unit tests close to the system
//! under test. Systems using `Commands` enqueue structural changes that a
//! schedule would normally apply at a sync point, so we `flush()` before
//! handing the world back for assertions.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, flush deferred commands, and return
/// the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}
