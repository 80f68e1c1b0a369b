//! Core plugin: shared resources and global settings.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    // Flat sky backdrop; the arena itself is lit by the render plugins.
    app.insert_resource(ClearColor(Color::srgb(0.36, 0.58, 0.89)));
}

#[cfg(test)]
mod tests;
