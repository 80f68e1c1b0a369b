//! Buffered spawn requests.
//!
//! We use Bevy **Messages** here instead of direct pool access.
//! The key idea is separation of concerns:
//! - producers (fire control) create *intent*
//! - the allocator applies intent (queue rotation + component writes)
//!
//! This is a producer → queue → consumer pipeline, and it keeps the pool
//! registry behind a single writer.

use bevy::prelude::*;

use super::pool::PoolTag;

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnProjectileRequest {
    pub tag: PoolTag,
    pub position: Vec3,
    pub rotation: Quat,
}
