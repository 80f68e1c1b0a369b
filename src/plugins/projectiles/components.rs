use bevy::prelude::*;

/// Marker for pre-allocated pool entries. Pooled projectiles are spawned once
/// at registry build time and are never despawned; activation and deactivation
/// only mutate component values.
#[derive(Component)]
pub struct PooledProjectile;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    Inactive,
    Active,
}

impl Default for ProjectileState {
    fn default() -> Self {
        Self::Inactive
    }
}

/// Per-handle runtime state. `remaining_life` only means something while the
/// handle is `Active`; it is reset on every activation.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub speed: f32,
    pub lifetime: f32,
    pub remaining_life: f32,
}

impl Projectile {
    pub fn new(speed: f32, lifetime: f32) -> Self {
        Self { speed, lifetime, remaining_life: 0.0 }
    }

    #[inline]
    pub fn reset_for_fire(&mut self) {
        self.remaining_life = self.lifetime;
    }
}
