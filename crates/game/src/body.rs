//! Kinematic character body over the reference collision world.

use std::sync::Arc;

use glam::Vec3;
use stride_physics::collision::{move_and_slide, CollisionFlags, CollisionWorld, LayerMask, TraceShape};
use stride_physics::movement::{CharacterBody, ColliderGeometry};

/// A capsule-shaped body moved by collide-and-slide sweeps.
///
/// The capsule is vertical; its center sits at `position + collider.center`.
/// The camera is fixed to the body, so shrinking the collider (and the body
/// settling onto its new bottom) is what lowers the view when crouching.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    world: Arc<CollisionWorld>,

    /// Body origin in world space.
    pub position: Vec3,

    /// Yaw in degrees.
    pub yaw: f32,

    /// Camera pitch in degrees (positive looks down).
    pub camera_pitch: f32,

    /// Camera offset from the body origin.
    pub camera_offset: Vec3,

    /// Capsule radius.
    pub radius: f32,

    /// Capsule height and center offset.
    pub collider: ColliderGeometry,

    /// Layers that block the body.
    pub solid_mask: LayerMask,

    /// Flags reported by the most recent move.
    pub last_flags: CollisionFlags,
}

impl KinematicBody {
    pub const DEFAULT_RADIUS: f32 = 0.5;
    pub const DEFAULT_CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.8, 0.0);

    pub fn new(world: Arc<CollisionWorld>, position: Vec3, yaw: f32) -> Self {
        Self {
            world,
            position,
            yaw,
            camera_pitch: 0.0,
            camera_offset: Self::DEFAULT_CAMERA_OFFSET,
            radius: Self::DEFAULT_RADIUS,
            collider: ColliderGeometry::new(2.0, Vec3::ZERO),
            solid_mask: LayerMask::MASK_BODY_SOLID,
            last_flags: CollisionFlags::NONE,
        }
    }

    /// Shape used for sweeps with the current collider.
    pub fn shape(&self) -> TraceShape {
        TraceShape::Capsule {
            radius: self.radius,
            height: self.collider.height,
        }
    }

    /// World-space capsule center.
    pub fn capsule_center(&self) -> Vec3 {
        self.position + self.collider.center
    }

    /// World-space Y of the capsule's lowest point.
    pub fn feet(&self) -> f32 {
        self.position.y + self.collider.bottom()
    }

    pub fn world(&self) -> &Arc<CollisionWorld> {
        &self.world
    }
}

impl CharacterBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn rotate_yaw(&mut self, delta_degrees: f32) {
        self.yaw += delta_degrees;
    }

    fn set_camera_pitch(&mut self, pitch_degrees: f32) {
        self.camera_pitch = pitch_degrees;
    }

    fn camera_position(&self) -> Vec3 {
        self.position + self.camera_offset
    }

    fn collider(&self) -> ColliderGeometry {
        self.collider
    }

    fn set_collider(&mut self, geometry: ColliderGeometry) {
        self.collider = geometry;
    }

    fn move_with_collision(&mut self, displacement: Vec3) -> CollisionFlags {
        let outcome = move_and_slide(
            &self.world,
            self.capsule_center(),
            self.shape(),
            displacement,
            self.solid_mask,
        );

        self.position = outcome.center - self.collider.center;
        self.last_flags = outcome.flags;
        outcome.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor_world() -> Arc<CollisionWorld> {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            LayerMask::GROUND,
        );
        Arc::new(world)
    }

    #[test]
    fn test_falls_onto_floor() {
        let mut body = KinematicBody::new(floor_world(), Vec3::new(0.0, 3.0, 0.0), 0.0);

        let flags = body.move_with_collision(Vec3::new(0.0, -5.0, 0.0));

        assert!(flags.contains(CollisionFlags::BELOW));
        assert_relative_eq!(body.feet(), 0.0, epsilon = 0.05);
    }

    #[test]
    fn test_collider_center_offsets_capsule() {
        let mut body = KinematicBody::new(floor_world(), Vec3::new(0.0, 3.0, 0.0), 0.0);
        body.set_collider(ColliderGeometry::new(1.0, Vec3::new(0.0, 0.5, 0.0)));

        assert_eq!(body.capsule_center(), Vec3::new(0.0, 3.5, 0.0));
        assert_eq!(body.feet(), 3.0);

        body.move_with_collision(Vec3::new(0.0, -5.0, 0.0));
        assert_relative_eq!(body.feet(), 0.0, epsilon = 0.05);
        assert_relative_eq!(body.position.y, 0.0, epsilon = 0.05);
    }

    #[test]
    fn test_growing_collider_is_pushed_out_of_floor() {
        let mut body = KinematicBody::new(floor_world(), Vec3::new(0.0, 0.01, 0.0), 0.0);
        body.set_collider(ColliderGeometry::new(1.0, Vec3::new(0.0, 0.5, 0.0)));
        body.move_with_collision(Vec3::ZERO);

        // Stand back up in place: the capsule now reaches below the floor
        body.set_collider(ColliderGeometry::new(2.0, Vec3::ZERO));
        body.move_with_collision(Vec3::ZERO);

        assert!(body.feet() > -0.01, "feet at {}", body.feet());
    }

    #[test]
    fn test_camera_follows_body() {
        let mut body = KinematicBody::new(floor_world(), Vec3::new(0.0, 1.0, 0.0), 0.0);
        body.rotate_yaw(30.0);
        body.rotate_yaw(15.0);
        body.set_camera_pitch(-20.0);

        assert_eq!(body.yaw(), 45.0);
        assert_eq!(body.camera_pitch, -20.0);
        assert_eq!(body.camera_position(), Vec3::new(0.0, 1.8, 0.0));
    }
}
