//! First-person locomotion controller.
//!
//! This is the main entry point for character movement. Each tick runs four
//! procedures in a fixed order:
//!
//! 1. Ground sensor: latch the grounded flag for this tick
//! 2. Look: yaw the body, pitch the camera
//! 3. Locomotion: build velocity from input, gravity and jumps, then sweep
//! 4. Crouch: start, cancel or advance the crouch/stand transition

use glam::{Quat, Vec3};

use crate::collision::LayerMask;
use crate::error::ConfigError;

use super::body::{CharacterBody, PhysicsQueries};
use super::config::MovementConfig;
use super::crouch::{CrouchTransition, Stance, TransitionStep, CEILING_CHECK_DISTANCE};
use super::state::{ControlInput, ControllerState};

/// Vertical velocity applied on touching the ground while falling.
///
/// Slightly negative so the body keeps pressing into the ground and the
/// ground sensor keeps reporting contact.
pub const LANDING_VELOCITY: f32 = -2.0;

/// Ground sensor: true iff any geometry on `mask` overlaps the sphere.
pub fn is_grounded<Q: PhysicsQueries + ?Sized>(
    queries: &Q,
    anchor_position: Vec3,
    radius: f32,
    mask: LayerMask,
) -> bool {
    queries.sphere_overlap(anchor_position, radius, mask)
}

/// Horizontal move vector from the strafe/forward axes.
///
/// The magnitude is clamped to 1 so diagonal input is not faster.
pub fn move_direction(right: Vec3, forward: Vec3, move_x: f32, move_z: f32) -> Vec3 {
    (right * move_x + forward * move_z).clamp_length_max(1.0)
}

/// Locomotion controller for a single body.
///
/// Owns its [`ControllerState`] and the collaborators it was constructed
/// with; they are never re-resolved.
///
/// # Example
///
/// ```ignore
/// let mut controller = LocomotionController::new(MovementConfig::default(), body, world)?;
///
/// // Each frame:
/// controller.tick(&input, delta_time);
/// ```
#[derive(Debug)]
pub struct LocomotionController<B, Q> {
    config: MovementConfig,
    state: ControllerState,
    body: B,
    queries: Q,
}

impl<B: CharacterBody, Q: PhysicsQueries> LocomotionController<B, Q> {
    /// Validate `config`, put the body in its standing pose and start with
    /// fresh state.
    pub fn new(config: MovementConfig, mut body: B, queries: Q) -> Result<Self, ConfigError> {
        config.validate()?;

        body.set_collider(config.standing);
        let state = ControllerState::new(&config);

        log::debug!(
            "locomotion controller activated at {:?} (policy {:?}, crouch {})",
            body.position(),
            config.speed_policy,
            if config.crouch_enabled { "on" } else { "off" }
        );

        Ok(Self {
            config,
            state,
            body,
            queries,
        })
    }

    /// Run one tick.
    ///
    /// Ticks with a non-positive (or NaN) `delta_time` are ignored; long
    /// ticks are clamped to `max_delta_time`.
    pub fn tick(&mut self, input: &ControlInput, delta_time: f32) {
        if !(delta_time > 0.0) {
            return;
        }
        let delta_time = delta_time.min(self.config.max_delta_time);

        self.sense_ground();
        self.update_look(input, delta_time);
        self.update_locomotion(input, delta_time);
        self.update_crouch(input, delta_time);
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn queries(&self) -> &Q {
        &self.queries
    }

    pub fn queries_mut(&mut self) -> &mut Q {
        &mut self.queries
    }

    /// Deactivate, handing the collaborators back. State is discarded.
    pub fn into_parts(self) -> (B, Q) {
        (self.body, self.queries)
    }

    // ========================================================================
    // Ground Sensor
    // ========================================================================

    fn sense_ground(&mut self) {
        let rotation = Quat::from_rotation_y(self.body.yaw().to_radians());
        let anchor = self.body.position() + rotation * self.state.ground_anchor;

        self.state.is_grounded = is_grounded(
            &self.queries,
            anchor,
            self.config.ground_check_radius,
            self.config.ground_mask,
        );
    }

    // ========================================================================
    // Look
    // ========================================================================

    fn update_look(&mut self, input: &ControlInput, delta_time: f32) {
        let sensitivity = self.config.mouse_sensitivity * delta_time;

        // Yaw is relative and unbounded
        self.body.rotate_yaw(input.look_x * sensitivity);

        self.state.pitch = (self.state.pitch - input.look_y * sensitivity)
            .clamp(self.config.max_down, self.config.max_up);
        self.body.set_camera_pitch(self.state.pitch);
    }

    // ========================================================================
    // Locomotion
    // ========================================================================

    fn update_locomotion(&mut self, input: &ControlInput, delta_time: f32) {
        let grounded = self.state.is_grounded;
        let crouching = self.state.is_crouching();
        let velocity = &mut self.state.velocity;

        if grounded && velocity.y < 0.0 {
            velocity.y = LANDING_VELOCITY;
        }

        let speed = self
            .config
            .move_speed(input.run_held(), grounded, crouching);
        let wish = move_direction(self.body.right(), self.body.forward(), input.move_x, input.move_z);

        if grounded {
            velocity.x = wish.x * speed;
            velocity.z = wish.z * speed;
        } else {
            let drift = wish * self.config.air_control * delta_time;
            velocity.x += drift.x;
            velocity.z += drift.z;
        }

        velocity.y += self.config.gravity * delta_time;

        if grounded && input.jump_pressed() {
            velocity.y = self.config.jump_velocity();
            log::trace!("jump, vy = {:.3}", velocity.y);
        }

        let flags = self.body.move_with_collision(*velocity * delta_time);
        log::trace!("moved by {:?}, collision flags {:?}", *velocity * delta_time, flags);
    }

    // ========================================================================
    // Crouch
    // ========================================================================

    fn update_crouch(&mut self, input: &ControlInput, delta_time: f32) {
        if !self.config.crouch_enabled {
            return;
        }

        match self.state.stance {
            Stance::Standing => {
                if input.crouch_pressed() && self.state.is_grounded && !self.state.is_transitioning() {
                    self.begin_transition(Stance::Crouching);
                }
            }
            Stance::Crouching => {
                // Level-triggered: retried every tick the button is up
                if !input.crouch_held() {
                    if self.ceiling_blocked() {
                        log::debug!("stand up blocked by ceiling");
                    } else {
                        self.begin_transition(Stance::Standing);
                    }
                }
            }
        }

        if let Some(transition) = self.state.transition.as_mut() {
            if transition.step(&mut self.body, delta_time) == TransitionStep::Finished {
                log::debug!("transition to {:?} finished", transition.target_stance);
                self.state.transition = None;
            }
        }
    }

    fn ceiling_blocked(&self) -> bool {
        self.queries
            .raycast(self.body.camera_position(), Vec3::Y, CEILING_CHECK_DISTANCE)
    }

    /// Start tweening toward `target_stance`, replacing any transition in
    /// flight. The stance toggles and the ground anchor moves immediately.
    fn begin_transition(&mut self, target_stance: Stance) {
        if let Some(previous) = self.state.transition.take() {
            log::debug!(
                "transition to {:?} cancelled at {:.0}%",
                previous.target_stance,
                previous.progress() * 100.0
            );
        }

        let start = self.body.collider();
        let target = self.config.collider(target_stance);

        self.state.ground_anchor.y += target_stance.anchor_shift();
        self.state.stance = target_stance;
        self.state.transition = Some(CrouchTransition::new(
            target_stance,
            start,
            target,
            self.config.crouch_transition_time,
        ));

        log::debug!("transition to {:?} started from height {:.3}", target_stance, start.height);
    }
}

// ============================================================================
// Tests
// ============================================================================
