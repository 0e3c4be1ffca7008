//! Configuration errors surfaced when a controller is activated.

use thiserror::Error;

/// Reasons a [`MovementConfig`](crate::MovementConfig) is rejected.
///
/// Tuning is validated once, at construction; a controller that exists is
/// always running on a valid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("crouch transition time must be positive, got {0}")]
    NonPositiveTransitionTime(f32),

    #[error("gravity must be negative (pointing down), got {0}")]
    NonNegativeGravity(f32),

    #[error("pitch bounds are inverted: max_down {max_down} > max_up {max_up}")]
    InvertedPitchBounds { max_down: f32, max_up: f32 },

    #[error("{pose} collider height must be positive, got {height}")]
    NonPositiveColliderHeight { pose: &'static str, height: f32 },

    #[error("max delta time must be positive, got {0}")]
    NonPositiveMaxDeltaTime(f32),
}
