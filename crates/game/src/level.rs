//! Level geometry and spawn points.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stride_physics::{CollisionWorld, LayerMask};

/// A level: frozen collision geometry plus spawn points.
#[derive(Debug, Clone)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world, immutable once the level is built.
    pub collision: Arc<CollisionWorld>,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// A spawn point for the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Body origin in world space.
    pub position: Vec3,

    /// Initial facing (yaw in degrees).
    pub yaw: f32,
}

impl Level {
    /// Freeze `collision` into a level.
    pub fn new(id: &str, name: &str, collision: CollisionWorld) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: Arc::new(collision),
            spawn_points: Vec::new(),
        }
    }

    /// Walled arena with a low crawlspace north of the spawn.
    ///
    /// The crawlspace slab's underside is at y = 1.5: a crouched body
    /// (height 1) fits under it, a standing one (height 2) does not.
    pub fn test_arena() -> Self {
        let mut world = CollisionWorld::new();

        // Floor
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            LayerMask::GROUND,
        );

        // Walls
        let wall_height = 5.0;
        let wall_thickness = 0.5;
        let arena_size = 50.0;

        for (center, half_extents) in [
            // North / south
            (
                Vec3::new(0.0, wall_height / 2.0, arena_size),
                Vec3::new(arena_size, wall_height / 2.0, wall_thickness),
            ),
            (
                Vec3::new(0.0, wall_height / 2.0, -arena_size),
                Vec3::new(arena_size, wall_height / 2.0, wall_thickness),
            ),
            // East / west
            (
                Vec3::new(arena_size, wall_height / 2.0, 0.0),
                Vec3::new(wall_thickness, wall_height / 2.0, arena_size),
            ),
            (
                Vec3::new(-arena_size, wall_height / 2.0, 0.0),
                Vec3::new(wall_thickness, wall_height / 2.0, arena_size),
            ),
        ] {
            world.add_box(center, half_extents, LayerMask::DEFAULT);
        }

        // Crawlspace slab: z 10..20, underside at y = 1.5
        world.add_box(
            Vec3::new(0.0, 2.0, Self::CRAWLSPACE_CENTER_Z),
            Vec3::new(3.0, 0.5, 5.0),
            LayerMask::DEFAULT,
        );

        // Cover crate
        world.add_box(
            Vec3::new(-15.0, 1.0, 10.0),
            Vec3::new(1.5, 1.0, 1.5),
            LayerMask::DEFAULT,
        );

        let mut level = Self::new("test_arena", "Test Arena", world);
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(0.0, 1.05, 0.0),
            yaw: 0.0,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(20.0, 1.05, 0.0),
            yaw: -90.0,
        });
        level
    }

    /// Z of the middle of the test arena's crawlspace.
    pub const CRAWLSPACE_CENTER_Z: f32 = 15.0;

    /// Get a player spawn point.
    pub fn spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_physics::PhysicsQueries;

    #[test]
    fn test_level_creation() {
        let level = Level::new("test", "Test Level", CollisionWorld::new());
        assert_eq!(level.id, "test");
        assert_eq!(level.collision.brush_count(), 0);
        assert!(level.spawn(0).is_none());
    }

    #[test]
    fn test_test_arena() {
        let level = Level::test_arena();
        assert!(level.collision.brush_count() > 0);
        assert_eq!(level.spawn(0).map(|s| s.yaw), Some(0.0));
    }

    #[test]
    fn test_arena_ground_and_crawlspace() {
        let level = Level::test_arena();
        let world = level.collision.as_ref();

        // Only the floor counts as ground
        assert!(world.sphere_overlap(Vec3::new(0.0, 0.1, 0.0), 0.4, LayerMask::GROUND));
        assert!(!world.sphere_overlap(Vec3::new(0.0, 2.0, 15.0), 0.4, LayerMask::GROUND));

        // Crawlspace ceiling is 0.7 above a crouched camera
        let crouched_camera = Vec3::new(0.0, 0.8, Level::CRAWLSPACE_CENTER_Z);
        assert!(PhysicsQueries::raycast(world, crouched_camera, Vec3::Y, 1.0));
        assert!(!PhysicsQueries::raycast(world, Vec3::new(0.0, 0.8, 0.0), Vec3::Y, 1.0));
    }
}
