//! Analytic collaborators for controller unit tests.

use glam::Vec3;

use super::body::{CharacterBody, ColliderGeometry, PhysicsQueries};
use crate::collision::{CollisionFlags, LayerMask};

/// Body that moves freely, optionally stopped by a flat floor.
#[derive(Debug, Clone)]
pub struct MockBody {
    pub position: Vec3,
    pub yaw: f32,
    pub camera_pitch: f32,
    pub camera_offset: Vec3,
    pub collider: ColliderGeometry,
    pub floor: Option<f32>,
    pub moves: Vec<Vec3>,
}

impl MockBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            camera_pitch: 0.0,
            camera_offset: Vec3::new(0.0, 0.8, 0.0),
            collider: ColliderGeometry::new(2.0, Vec3::ZERO),
            floor: None,
            moves: Vec::new(),
        }
    }

    pub fn on_floor(floor: f32) -> Self {
        let mut body = Self::new(Vec3::new(0.0, floor + 1.0, 0.0));
        body.floor = Some(floor);
        body
    }
}

impl CharacterBody for MockBody {
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
        self.moves.push(displacement);
        self.position += displacement;

        let mut flags = CollisionFlags::NONE;
        if let Some(floor) = self.floor {
            let bottom = self.position.y + self.collider.bottom();
            if bottom < floor {
                self.position.y = floor - self.collider.bottom();
                flags.insert(CollisionFlags::BELOW);
            }
        }
        flags
    }
}

/// Flat ground plane and optional flat ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockQueries {
    /// Y of the ground surface (on the GROUND layer).
    pub floor: Option<f32>,
    /// Y of the ceiling underside.
    pub ceiling: Option<f32>,
}

impl MockQueries {
    pub fn floor(floor: f32) -> Self {
        Self {
            floor: Some(floor),
            ceiling: None,
        }
    }
}

impl PhysicsQueries for MockQueries {
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        match self.floor {
            Some(floor) => mask.intersects(LayerMask::GROUND) && center.y - radius <= floor,
            None => false,
        }
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        match self.ceiling {
            Some(ceiling) if direction.y > 0.0 => {
                let distance = (ceiling - origin.y) / direction.y;
                (0.0..=max_distance).contains(&distance)
            }
            _ => false,
        }
    }
}
