//! Collide-and-slide sweep for kinematic capsules.
//!
//! This is the motion primitive behind `move_with_collision`: it pushes the
//! capsule out of anything it already overlaps, then sweeps it along the
//! requested displacement, sliding along every surface it touches.

use glam::Vec3;

use super::flags::{CollisionFlags, LayerMask};
use super::trace::TraceShape;
use super::world::CollisionWorld;

/// Maximum number of collision planes to track during one sweep.
const MAX_CLIP_PLANES: usize = 5;

/// Slight over-correction when clipping against a plane (prevents sticking).
const OVERBOUNCE: f32 = 1.001;

/// Displacements shorter than this are treated as zero.
const MIN_MOVE_SQUARED: f32 = 1e-10;

/// Result of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    /// Final center of the swept shape.
    pub center: Vec3,
    /// Sides of the shape that were blocked.
    pub flags: CollisionFlags,
}

/// Clip a vector against a surface normal.
///
/// Removes the component going into the surface, with a small overbounce.
pub fn clip_velocity(velocity: Vec3, normal: Vec3, overbounce: f32) -> Vec3 {
    let backoff = velocity.dot(normal);

    let adjusted_backoff = if backoff < 0.0 {
        backoff * overbounce
    } else {
        backoff / overbounce
    };

    velocity - normal * adjusted_backoff
}

/// Sweep `shape` from `center` by `displacement`, sliding along surfaces.
pub fn move_and_slide(
    world: &CollisionWorld,
    center: Vec3,
    shape: TraceShape,
    displacement: Vec3,
    mask: LayerMask,
) -> SweepOutcome {
    let mut flags = CollisionFlags::NONE;

    // Geometry may have grown into the world since the last move
    let mut position = world.resolve_penetration(center, shape, mask);
    let push = position - center;
    if push.length_squared() > MIN_MOVE_SQUARED {
        flags.insert(CollisionFlags::from_normal(push.normalize()));
    }

    let mut remaining = displacement;
    let mut planes = [Vec3::ZERO; MAX_CLIP_PLANES];
    let mut num_planes = 0;

    for _ in 0..MAX_CLIP_PLANES {
        if remaining.length_squared() < MIN_MOVE_SQUARED {
            break;
        }

        let trace = world.trace(position, position + remaining, shape, mask);

        if !trace.hit_something() {
            position = trace.end_position;
            break;
        }

        if trace.fraction > 0.0 {
            position = trace.end_position;
        }

        if trace.all_solid {
            break;
        }

        let normal = trace.normal_or_up();
        flags.insert(CollisionFlags::from_normal(normal));

        remaining *= 1.0 - trace.fraction;

        if num_planes < MAX_CLIP_PLANES {
            planes[num_planes] = normal;
            num_planes += 1;
        }

        // Find a slide direction that doesn't go into any touched plane
        let mut slid = None;
        for i in 0..num_planes {
            let clipped = clip_velocity(remaining, planes[i], OVERBOUNCE);
            let valid = (0..num_planes)
                .filter(|&j| j != i)
                .all(|j| clipped.dot(planes[j]) >= -0.01);
            if valid {
                slid = Some(clipped);
                break;
            }
        }

        remaining = match slid {
            Some(clipped) => clipped,
            None if num_planes >= 2 => {
                // Slide along the crease between the first two planes
                let crease = planes[0].cross(planes[1]).normalize_or_zero();
                crease * remaining.dot(crease)
            }
            None => break,
        };
    }

    SweepOutcome {
        center: position,
        flags,
    }
}
