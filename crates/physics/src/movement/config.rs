//! Movement tuning parameters.
//!
//! All parameters are grouped here for easy tuning. Values are supplied once
//! when the controller is activated and never change during a session.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::ColliderGeometry;
use super::crouch::Stance;
use crate::collision::LayerMask;
use crate::error::ConfigError;

/// How the horizontal speed is picked from the run/crouch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedPolicy {
    /// Run only while grounded and standing, crouch speed while grounded and
    /// crouched, walk otherwise.
    #[default]
    Gated,
    /// Run whenever the run button is held, walk otherwise.
    Simple,
}

/// Tuning for the locomotion controller.
///
/// Distances are in world units, times in seconds, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Movement Speeds
    // ========================================================================
    /// Walking speed (units/second).
    pub walk_speed: f32,

    /// Running speed (units/second).
    pub run_speed: f32,

    /// Crouching speed (units/second).
    pub crouch_speed: f32,

    /// How run and crouch affect speed.
    pub speed_policy: SpeedPolicy,

    // ========================================================================
    // Look
    // ========================================================================
    /// Degrees per second per unit of look-axis input.
    pub mouse_sensitivity: f32,

    /// Lowest camera pitch (degrees).
    pub max_down: f32,

    /// Highest camera pitch (degrees).
    pub max_up: f32,

    // ========================================================================
    // Physics
    // ========================================================================
    /// Apex height of a jump (units).
    pub jump_height: f32,

    /// Vertical acceleration (units/second², negative is down).
    pub gravity: f32,

    /// Scale applied to move input while airborne, added to velocity each
    /// second (0.0 = no air control).
    pub air_control: f32,

    /// Longest tick the controller will integrate; longer ticks are clamped.
    pub max_delta_time: f32,

    // ========================================================================
    // Ground Check
    // ========================================================================
    /// Radius of the ground-check sphere.
    pub ground_check_radius: f32,

    /// Layers that count as ground.
    pub ground_mask: LayerMask,

    /// Ground-check anchor, relative to the body origin, while standing.
    pub ground_check_offset: Vec3,

    // ========================================================================
    // Crouching
    // ========================================================================
    /// Whether the crouch button does anything.
    pub crouch_enabled: bool,

    /// Collider geometry while standing.
    pub standing: ColliderGeometry,

    /// Collider geometry while crouching.
    pub crouching: ColliderGeometry,

    /// Time to tween between standing and crouching geometry.
    pub crouch_transition_time: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            crouch_speed: 2.0,
            speed_policy: SpeedPolicy::Gated,

            mouse_sensitivity: 100.0,
            max_down: -90.0,
            max_up: 90.0,

            jump_height: 2.0,
            gravity: -9.81,
            air_control: 2.0,
            max_delta_time: 1.0 / 3.0,

            ground_check_radius: 0.4,
            ground_mask: LayerMask::GROUND,
            ground_check_offset: Vec3::new(0.0, -1.0, 0.0),

            crouch_enabled: true,
            standing: ColliderGeometry::new(2.0, Vec3::ZERO),
            crouching: ColliderGeometry::new(1.0, Vec3::new(0.0, 0.5, 0.0)),
            crouch_transition_time: 0.5,
        }
    }
}

impl MovementConfig {
    /// The earliest controller: walk/run without gating, no crouch, no air
    /// control.
    pub fn classic() -> Self {
        Self {
            speed_policy: SpeedPolicy::Simple,
            air_control: 0.0,
            crouch_enabled: false,
            ..Default::default()
        }
    }

    /// Check every parameter; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("max_down", self.max_down),
            ("max_up", self.max_up),
            ("jump_height", self.jump_height),
            ("gravity", self.gravity),
            ("air_control", self.air_control),
            ("max_delta_time", self.max_delta_time),
            ("ground_check_radius", self.ground_check_radius),
            ("standing.height", self.standing.height),
            ("crouching.height", self.crouching.height),
            ("crouch_transition_time", self.crouch_transition_time),
        ];
        let vectors = [
            ("ground_check_offset", self.ground_check_offset),
            ("standing.center", self.standing.center),
            ("crouching.center", self.crouching.center),
        ];

        if let Some(&(field, _)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        if let Some(&(field, _)) = vectors.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("jump_height", self.jump_height),
            ("air_control", self.air_control),
            ("ground_check_radius", self.ground_check_radius),
        ];
        if let Some(&(field, value)) = non_negative.iter().find(|(_, value)| *value < 0.0) {
            return Err(ConfigError::Negative { field, value });
        }

        if self.crouch_transition_time <= 0.0 {
            return Err(ConfigError::NonPositiveTransitionTime(self.crouch_transition_time));
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::NonNegativeGravity(self.gravity));
        }
        if self.max_down > self.max_up {
            return Err(ConfigError::InvertedPitchBounds {
                max_down: self.max_down,
                max_up: self.max_up,
            });
        }
        if self.standing.height <= 0.0 {
            return Err(ConfigError::NonPositiveColliderHeight {
                pose: "standing",
                height: self.standing.height,
            });
        }
        if self.crouching.height <= 0.0 {
            return Err(ConfigError::NonPositiveColliderHeight {
                pose: "crouching",
                height: self.crouching.height,
            });
        }
        if self.max_delta_time <= 0.0 {
            return Err(ConfigError::NonPositiveMaxDeltaTime(self.max_delta_time));
        }

        Ok(())
    }

    /// Initial vertical speed that makes a jump peak at exactly `jump_height`.
    ///
    /// From `v = sqrt(2 * g * h)` with `g` taken as the magnitude of gravity.
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }

    /// Horizontal speed for the current run/crouch/grounded state.
    pub fn move_speed(&self, run_held: bool, is_grounded: bool, is_crouching: bool) -> f32 {
        match self.speed_policy {
            SpeedPolicy::Gated => {
                if run_held && is_grounded && !is_crouching {
                    self.run_speed
                } else if is_crouching && is_grounded {
                    self.crouch_speed
                } else {
                    self.walk_speed
                }
            }
            SpeedPolicy::Simple => {
                if run_held {
                    self.run_speed
                } else {
                    self.walk_speed
                }
            }
        }
    }

    /// Collider geometry for a stance.
    pub fn collider(&self, stance: Stance) -> ColliderGeometry {
        match stance {
            Stance::Standing => self.standing,
            Stance::Crouching => self.crouching,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = MovementConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!(config.gravity < 0.0);
        assert!(config.walk_speed < config.run_speed);
    }

    #[test]
    fn test_classic_config_is_valid() {
        let config = MovementConfig::classic();
        assert_eq!(config.validate(), Ok(()));
        assert!(!config.crouch_enabled);
        assert_eq!(config.speed_policy, SpeedPolicy::Simple);
    }

    #[test]
    fn test_jump_velocity() {
        let config = MovementConfig {
            gravity: -9.81,
            jump_height: 2.0,
            ..Default::default()
        };
        assert_relative_eq!(config.jump_velocity(), 6.264184, epsilon = 1e-3);
    }

    #[test]
    fn test_gated_move_speed() {
        let config = MovementConfig::default();

        assert_eq!(config.move_speed(true, true, false), config.run_speed);
        // Crouching overrides running
        assert_eq!(config.move_speed(true, true, true), config.crouch_speed);
        assert_eq!(config.move_speed(false, true, true), config.crouch_speed);
        // No running or crouch speed in the air
        assert_eq!(config.move_speed(true, false, false), config.walk_speed);
        assert_eq!(config.move_speed(false, false, true), config.walk_speed);
        assert_eq!(config.move_speed(false, true, false), config.walk_speed);
    }

    #[test]
    fn test_simple_move_speed() {
        let config = MovementConfig {
            speed_policy: SpeedPolicy::Simple,
            ..Default::default()
        };

        assert_eq!(config.move_speed(true, false, true), config.run_speed);
        assert_eq!(config.move_speed(false, true, true), config.walk_speed);
    }

    #[test]
    fn test_rejects_non_positive_transition_time() {
        let config = MovementConfig {
            crouch_transition_time: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveTransitionTime(0.0)));
    }

    #[test]
    fn test_rejects_non_negative_gravity() {
        for gravity in [0.0, 9.81] {
            let config = MovementConfig {
                gravity,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::NonNegativeGravity(gravity)));
        }
    }

    #[test]
    fn test_rejects_inverted_pitch_bounds() {
        let config = MovementConfig {
            max_down: 10.0,
            max_up: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedPitchBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_and_non_finite_values() {
        let negative = MovementConfig {
            run_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            negative.validate(),
            Err(ConfigError::Negative {
                field: "run_speed",
                value: -1.0
            })
        );

        let nan = MovementConfig {
            mouse_sensitivity: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            nan.validate(),
            Err(ConfigError::NonFinite {
                field: "mouse_sensitivity"
            })
        );

        let flat = MovementConfig {
            crouching: ColliderGeometry::new(0.0, Vec3::ZERO),
            ..Default::default()
        };
        assert!(matches!(
            flat.validate(),
            Err(ConfigError::NonPositiveColliderHeight { pose: "crouching", .. })
        ));
    }

    #[test]
    fn test_ron_roundtrip_and_partial_files() {
        let config = MovementConfig::classic();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let parsed: MovementConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);

        // Missing fields fall back to defaults
        let partial: MovementConfig = ron::from_str("(run_speed: 8.0)").unwrap();
        assert_eq!(partial.run_speed, 8.0);
        assert_eq!(partial.walk_speed, MovementConfig::default().walk_speed);
    }
}
