//! Trace results and shapes for collision queries.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::LayerMask;

/// Result of a collision trace through the world.
///
/// Traces sweep a shape from a start position to an end position and
/// report what was hit along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// How far along the trace path we got before hitting something.
    ///
    /// - `1.0` = traveled the full distance, or hit something right at the end
    /// - `0.0` = hit something immediately at start
    pub fraction: f32,

    /// Final position of the shape center after the trace.
    pub end_position: Vec3,

    /// Surface normal at the impact point, pointing away from the surface.
    ///
    /// `None` if and only if nothing was hit.
    pub hit_normal: Option<Vec3>,

    /// Layers of the brush that was hit.
    pub hit_layers: LayerMask,

    /// Whether the trace started inside solid geometry.
    pub started_in_solid: bool,

    /// Whether the trace couldn't move at all.
    pub all_solid: bool,
}

impl Default for TraceResult {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO)
    }
}

impl TraceResult {
    /// Create a trace result indicating no collision occurred.
    pub fn no_hit(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            hit_normal: None,
            hit_layers: LayerMask::EMPTY,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// Check if this trace hit something.
    ///
    /// A hit exactly at the end of the trace has `fraction == 1.0` and still
    /// counts.
    #[inline]
    pub fn hit_something(&self) -> bool {
        self.hit_normal.is_some()
    }

    /// Get the hit normal, defaulting to up if none.
    #[inline]
    pub fn normal_or_up(&self) -> Vec3 {
        self.hit_normal.unwrap_or(Vec3::Y)
    }
}

/// Shape used for collision traces and overlap tests.
///
/// All shapes are positioned by their center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TraceShape {
    /// A vertical capsule (pill shape).
    Capsule {
        /// Radius of the capsule cylinder and end caps.
        radius: f32,
        /// Total height from bottom of lower cap to top of upper cap.
        ///
        /// Heights below `2 * radius` degenerate to a sphere.
        height: f32,
    },

    /// A sphere, used by the ground sensor.
    Sphere {
        radius: f32,
    },
}
