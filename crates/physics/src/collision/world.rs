//! Collision world containing static level geometry.
//!
//! The collision world stores box brushes tagged with layers and answers the
//! queries the locomotion controller needs: sphere overlap (ground sensor),
//! ray cast (ceiling check) and capsule traces (body sweep).

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{contact, intersection_test, Ray, RayCast};
use parry3d::shape::SharedShape;

use super::flags::LayerMask;
use super::trace::{TraceResult, TraceShape};
use crate::movement::PhysicsQueries;

/// Bisection steps when locating the first blocked point of a sweep.
const SWEEP_BISECTIONS: usize = 12;

/// Extra clearance left between a depenetrated shape and the brush it was in.
const SKIN_WIDTH: f32 = 0.001;

/// Sweeps shorter than this only test the start position.
const MIN_SWEEP_DISTANCE: f32 = 0.0001;

#[inline]
fn isometry_at(center: Vec3) -> Isometry<Real> {
    Isometry::translation(center.x, center.y, center.z)
}

#[inline]
fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// A static box in the world.
#[derive(Clone)]
pub struct CollisionBrush {
    pub shape: SharedShape,
    /// World placement of the box center.
    pub transform: Isometry<Real>,
    /// Layers this brush belongs to.
    pub layers: LayerMask,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("center", &to_vec3(&self.transform.translation.vector))
            .field("layers", &self.layers)
            .finish()
    }
}

/// Static level geometry.
///
/// Built once, then shared (behind an `Arc`) by every body and query that
/// needs it.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box with the given center and half extents.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, layers: LayerMask) {
        self.brushes.push(CollisionBrush {
            shape: SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            transform: isometry_at(center),
            layers,
        });
    }

    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Test whether a sphere overlaps any brush on the given layers.
    pub fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.shape_in_solid(center, TraceShape::Sphere { radius }, mask)
    }

    /// Cast a ray and report the nearest brush on `mask` within
    /// `max_distance`, inclusive.
    ///
    /// A zero direction or a non-positive distance never hits.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> TraceResult {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || !(max_distance > 0.0) {
            return TraceResult::no_hit(origin);
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let nearest = self
            .brushes_on(mask)
            .filter_map(|brush| {
                brush
                    .shape
                    .cast_ray(&brush.transform, &ray, max_distance, true)
                    .map(|distance| (distance, brush))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));

        let Some((distance, brush)) = nearest else {
            return TraceResult::no_hit(origin + dir * max_distance);
        };

        // Face normal of the brush where the ray enters it
        let normal = brush
            .shape
            .cast_ray_and_get_normal(&brush.transform, &ray, distance + 0.01, true)
            .map(|hit| to_vec3(&hit.normal))
            .unwrap_or(-dir);

        TraceResult {
            fraction: (distance / max_distance).min(1.0),
            end_position: origin + dir * distance,
            hit_normal: Some(normal),
            hit_layers: brush.layers,
            started_in_solid: distance <= 0.0,
            all_solid: false,
        }
    }

    /// Sweep `shape` (positioned by its center) from `start` to `end`.
    ///
    /// The result stops at the last clear position found along the path.
    /// Its normal points out of whatever blocked the sweep.
    pub fn trace(&self, start: Vec3, end: Vec3, shape: TraceShape, mask: LayerMask) -> TraceResult {
        let start_blocked = self.shape_in_solid(start, shape, mask);

        if start.distance(end) < MIN_SWEEP_DISTANCE {
            return if start_blocked {
                TraceResult {
                    fraction: 0.0,
                    end_position: start,
                    hit_normal: Some(Vec3::Y),
                    hit_layers: mask,
                    started_in_solid: true,
                    all_solid: true,
                }
            } else {
                TraceResult::no_hit(start)
            };
        }

        if !start_blocked && !self.shape_in_solid(end, shape, mask) {
            return TraceResult::no_hit(end);
        }

        let (clear, blocked) = self.bisect_sweep(start, end, shape, mask);
        let fraction = if start_blocked { 0.0 } else { clear };

        // Push the first blocked sample back out to learn which way is open
        let blocked_at = start.lerp(end, blocked);
        let push = self.resolve_penetration(blocked_at, shape, mask) - blocked_at;
        let normal = push.try_normalize().unwrap_or_else(|| (start - end).normalize());

        TraceResult {
            fraction,
            end_position: start.lerp(end, fraction),
            hit_normal: Some(normal),
            hit_layers: mask,
            started_in_solid: start_blocked,
            all_solid: start_blocked && blocked < 0.001,
        }
    }

    /// Check if a shape centered at `center` intersects any brush on `mask`.
    pub fn shape_in_solid(&self, center: Vec3, shape: TraceShape, mask: LayerMask) -> bool {
        let test_shape = Self::parry_shape(shape);
        let placement = isometry_at(center);

        self.brushes_on(mask).any(|brush| {
            matches!(
                intersection_test(&placement, test_shape.as_ref(), &brush.transform, brush.shape.as_ref()),
                Ok(true)
            )
        })
    }

    /// Move a shape out of every brush on `mask` it overlaps.
    ///
    /// Returns the corrected center. Depths from several brushes add up.
    pub fn resolve_penetration(&self, center: Vec3, shape: TraceShape, mask: LayerMask) -> Vec3 {
        let test_shape = Self::parry_shape(shape);
        let placement = isometry_at(center);

        let correction: Vec3 = self
            .brushes_on(mask)
            .filter_map(|brush| {
                contact(&placement, test_shape.as_ref(), &brush.transform, brush.shape.as_ref(), 0.0)
                    .ok()
                    .flatten()
            })
            .filter(|overlap| overlap.dist < 0.0)
            // normal1 points from the shape into the brush
            .map(|overlap| -to_vec3(&overlap.normal1) * (SKIN_WIDTH - overlap.dist))
            .sum();

        center + correction
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn brushes_on(&self, mask: LayerMask) -> impl Iterator<Item = &CollisionBrush> {
        self.brushes
            .iter()
            .filter(move |brush| mask.intersects(brush.layers))
    }

    /// Narrow down the sweep parameter where the shape first becomes blocked.
    ///
    /// Returns `(clear, blocked)` with `clear < blocked`.
    fn bisect_sweep(&self, start: Vec3, end: Vec3, shape: TraceShape, mask: LayerMask) -> (f32, f32) {
        let mut clear = 0.0_f32;
        let mut blocked = 1.0_f32;

        for _ in 0..SWEEP_BISECTIONS {
            let mid = (clear + blocked) * 0.5;
            if self.shape_in_solid(start.lerp(end, mid), shape, mask) {
                blocked = mid;
            } else {
                clear = mid;
            }
        }

        (clear, blocked)
    }

    fn parry_shape(shape: TraceShape) -> SharedShape {
        match shape {
            TraceShape::Capsule { radius, height } => {
                // Parry measures the straight segment between the two caps
                let half_segment = (height * 0.5 - radius).max(0.0);
                if half_segment > 0.0 {
                    SharedShape::capsule_y(half_segment, radius)
                } else {
                    SharedShape::ball(radius)
                }
            }
            TraceShape::Sphere { radius } => SharedShape::ball(radius),
        }
    }
}

impl PhysicsQueries for CollisionWorld {
    fn sphere_overlap(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.overlap_sphere(center, radius, mask)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        CollisionWorld::raycast(self, origin, direction, max_distance, LayerMask::MASK_RAYCAST)
            .hit_something()
    }
}

// ============================================================================
// Tests
// ============================================================================
