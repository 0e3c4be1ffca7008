//! Collaborator interfaces the controller is constructed with.
//!
//! The controller never owns world geometry or engine objects. It talks to
//! the controlled body (transform, camera, capsule) through [`CharacterBody`]
//! and to the collision world through [`PhysicsQueries`].

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionFlags, LayerMask};

/// Capsule collider shape relative to the body origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderGeometry {
    /// Total capsule height.
    pub height: f32,
    /// Capsule center offset from the body origin.
    pub center: Vec3,
}

impl ColliderGeometry {
    pub const fn new(height: f32, center: Vec3) -> Self {
        Self { height, center }
    }

    /// Linear blend toward `target`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            height: self.height + (target.height - self.height) * t,
            center: self.center.lerp(target.center, t),
        }
    }

    /// Body-local Y of the capsule's lowest point.
    pub fn bottom(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    /// Body-local Y of the capsule's highest point.
    pub fn top(&self) -> f32 {
        self.center.y + self.height / 2.0
    }
}

/// Horizontal forward/right basis for a yaw in degrees.
///
/// Yaw 0 faces +Z with +X to the right; positive yaw turns right.
pub fn yaw_basis(yaw_degrees: f32) -> (Vec3, Vec3) {
    let (sin_yaw, cos_yaw) = yaw_degrees.to_radians().sin_cos();
    let forward = Vec3::new(sin_yaw, 0.0, cos_yaw);
    let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
    (forward, right)
}

/// The controlled body: transform, camera and capsule collider.
pub trait CharacterBody {
    /// World-space position of the body origin.
    fn position(&self) -> Vec3;

    /// Accumulated yaw in degrees.
    fn yaw(&self) -> f32;

    /// Rotate the body about world-up by `delta_degrees`.
    fn rotate_yaw(&mut self, delta_degrees: f32);

    /// Set the camera's local pitch (absolute, degrees).
    fn set_camera_pitch(&mut self, pitch_degrees: f32);

    /// World-space camera position.
    fn camera_position(&self) -> Vec3;

    /// Current capsule geometry.
    fn collider(&self) -> ColliderGeometry;

    /// Replace the capsule geometry.
    fn set_collider(&mut self, geometry: ColliderGeometry);

    /// Sweep the body by `displacement`, resolving collisions.
    ///
    /// Always succeeds, possibly with partial displacement.
    fn move_with_collision(&mut self, displacement: Vec3) -> CollisionFlags;

    /// Horizontal forward axis.
    fn forward(&self) -> Vec3 {
        yaw_basis(self.yaw()).0
    }

    /// Horizontal right axis.
    fn right(&self) -> Vec3 {
        yaw_basis(self.yaw()).1
    }
}

/// Queries against the collision world.
pub trait PhysicsQueries {
    /// True iff any geometry on `mask` intersects the sphere.
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// True iff a ray from `origin` along `direction` hits within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool;
}

impl<T: PhysicsQueries + ?Sized> PhysicsQueries for &T {
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        (**self).sphere_overlap(center, radius, mask)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        (**self).raycast(origin, direction, max_distance)
    }
}

impl<T: PhysicsQueries + ?Sized> PhysicsQueries for Arc<T> {
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        (**self).sphere_overlap(center, radius, mask)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        (**self).raycast(origin, direction, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_basis() {
        let (forward, right) = yaw_basis(0.0);
        assert!((forward - Vec3::Z).length() < 1e-6);
        assert!((right - Vec3::X).length() < 1e-6);

        // Turning right by 90 degrees faces +X
        let (forward, right) = yaw_basis(90.0);
        assert!((forward - Vec3::X).length() < 1e-6);
        assert!((right - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_collider_lerp() {
        let standing = ColliderGeometry::new(2.0, Vec3::ZERO);
        let crouching = ColliderGeometry::new(1.0, Vec3::new(0.0, 0.5, 0.0));

        let half = standing.lerp(crouching, 0.5);
        assert_eq!(half.height, 1.5);
        assert_eq!(half.center, Vec3::new(0.0, 0.25, 0.0));

        // Out-of-range factors never overshoot
        assert_eq!(standing.lerp(crouching, 1.5), crouching);
        assert_eq!(standing.lerp(crouching, -1.0), standing);
    }

    #[test]
    fn test_collider_extents() {
        let crouching = ColliderGeometry::new(1.0, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(crouching.bottom(), 0.0);
        assert_eq!(crouching.top(), 1.0);
    }
}
