//! Cone-of-vision: a pitch/yaw grid of rays approximating continuous
//! visibility detection.
//!
//! The raycast itself is an injected collaborator (`RayCaster`), so the cone
//! test is a pure function over an oracle: production hands it avian's
//! `SpatialQuery`, tests hand it a fake with scripted targets.

use avian3d::prelude::*;
use bevy::prelude::*;

/// One raycast hit, reduced to what the cone test needs.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Injected raycast oracle.
pub trait RayCaster {
    fn cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        filter: &SpatialQueryFilter,
    ) -> Option<RayHit>;
}

impl RayCaster for SpatialQuery<'_, '_> {
    fn cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        filter: &SpatialQueryFilter,
    ) -> Option<RayHit> {
        self.cast_ray(origin, direction, max_distance, true, filter)
            .map(|hit| RayHit { entity: hit.entity, distance: hit.distance })
    }
}

/// Discrete angular sampling of a view cone around the observer's forward
/// axis.
///
/// `is_visible` persists only the most recent evaluation — it is overwritten
/// on every `evaluate` call and is never sticky. Other components (fire
/// control) read it directly.
#[derive(Component, Debug, Clone)]
pub struct VisionCone {
    view_distance: f32,
    view_angle: f32,
    horizontal_samples: u32,
    vertical_samples: u32,
    target_mask: LayerMask,
    pub is_visible: bool,
}

impl VisionCone {
    /// Configuration errors fail fast here: non-positive distance, an angle
    /// outside (0, 360], or a zero sample count on either axis panic instead
    /// of producing a degenerate cone.
    pub fn new(
        view_distance: f32,
        view_angle: f32,
        horizontal_samples: u32,
        vertical_samples: u32,
        target_mask: impl Into<LayerMask>,
    ) -> Self {
        assert!(view_distance > 0.0, "view_distance must be positive");
        assert!(
            view_angle > 0.0 && view_angle <= 360.0,
            "view_angle must be in (0, 360], got {view_angle}"
        );
        assert!(
            horizontal_samples >= 1 && vertical_samples >= 1,
            "sample counts must be at least 1 on both axes"
        );

        Self {
            view_distance,
            view_angle,
            horizontal_samples,
            vertical_samples,
            target_mask: target_mask.into(),
            is_visible: false,
        }
    }

    /// Sample the cone from the given observer pose and persist the result in
    /// `is_visible`.
    ///
    /// Pitch runs `-angle/2 ..= angle/2` over `vertical_samples` steps, yaw
    /// the same over `horizontal_samples`; both loops are inclusive so the
    /// cone's extremes are always sampled. Short-circuits on the first hit —
    /// the remaining grid is skipped.
    pub fn evaluate(&mut self, origin: Vec3, rotation: Quat, rays: &impl RayCaster) -> bool {
        let forward = rotation * Vec3::NEG_Z;
        let half_angle = self.view_angle / 2.0;
        let pitch_step = self.view_angle / self.vertical_samples as f32;
        let yaw_step = self.view_angle / self.horizontal_samples as f32;
        let filter = SpatialQueryFilter::from_mask(self.target_mask);

        self.is_visible = false;

        for v in 0..=self.vertical_samples {
            let pitch = -half_angle + pitch_step * v as f32;

            for h in 0..=self.horizontal_samples {
                let yaw = -half_angle + yaw_step * h as f32;

                let spread =
                    Quat::from_euler(EulerRot::YXZ, yaw.to_radians(), pitch.to_radians(), 0.0);
                let Ok(dir) = Dir3::new(spread * forward) else {
                    continue;
                };

                if rays.cast(origin, dir, self.view_distance, &filter).is_some() {
                    self.is_visible = true;
                    return true;
                }
            }
        }

        self.is_visible
    }
}

/// Overwrite every cone's `is_visible` from the physics world.
///
/// Runs before fire control in the same frame: a turret's firing decision
/// always sees this frame's visibility, never last frame's.
pub fn update_vision(rays: SpatialQuery, mut q: Query<(&Transform, &mut VisionCone)>) {
    for (tf, mut cone) in &mut q {
        cone.evaluate(tf.translation, tf.rotation, &rays);
    }
}
