use crate::common::tunables::Tunables;
use crate::plugins::core;
use bevy::prelude::*;

#[test]
fn inserts_shared_resources() {
    let mut app = App::new();
    core::plugin(&mut app);

    let tunables = app.world().get_resource::<Tunables>();
    assert!(tunables.is_some_and(|t| t.respawn_delay > 0.0));
    assert!(app.world().get_resource::<ClearColor>().is_some());
}
