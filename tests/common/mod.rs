//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `StatesPlugin` + `AssetPlugin` + `ScenePlugin` cover what gameplay
//!   plugins assume exists.
//! - `turret_platformer::game::configure_headless` installs the gameplay
//!   plugins without any render-side configuration.

use bevy::asset::AssetPlugin;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        InputPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    // Avian's collider maintenance systems read `AssetEvent<Mesh>` messages,
    // which only exist once the `Mesh` asset is registered.
    app.init_asset::<Mesh>();

    turret_platformer::game::configure_headless(&mut app);
    app
}
