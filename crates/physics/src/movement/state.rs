//! Controller state and per-tick input.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::MovementConfig;
use super::crouch::{CrouchTransition, Stance};

/// Mutable state owned by the controller, updated once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Velocity in world space (units/second).
    ///
    /// `y` carries gravity and jumps; `x`/`z` carry ground speed or
    /// accumulated air drift.
    pub velocity: Vec3,

    /// Grounded flag, latched once per tick by the ground sensor.
    pub is_grounded: bool,

    /// Camera pitch in degrees, always within the configured bounds.
    pub pitch: f32,

    /// Current stance. Toggles as soon as a transition starts.
    pub stance: Stance,

    /// Crouch/stand transition in flight, if any.
    pub transition: Option<CrouchTransition>,

    /// Body-local position of the ground-check anchor.
    pub ground_anchor: Vec3,
}

impl ControllerState {
    /// Fresh state for a standing, stationary body.
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            velocity: Vec3::ZERO,
            is_grounded: false,
            pitch: 0.0,
            stance: Stance::Standing,
            transition: None,
            ground_anchor: config.ground_check_offset,
        }
    }

    /// True iff a crouch/stand transition is in flight.
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// True iff the stance is crouching (including mid-transition toward it).
    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.stance == Stance::Crouching
    }

    /// Horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

/// Button state flags for a tick of input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandButtons(pub u8);

impl CommandButtons {
    /// Run button is held.
    pub const RUN: u8 = 1 << 0;

    /// Jump button went down this tick.
    pub const JUMP: u8 = 1 << 1;

    /// Crouch button is held.
    pub const CROUCH: u8 = 1 << 2;

    /// Crouch button went down this tick.
    pub const CROUCH_PRESSED: u8 = 1 << 3;

    /// Check if a button is set.
    #[inline]
    pub fn pressed(self, button: u8) -> bool {
        (self.0 & button) != 0
    }

    /// Set a button.
    #[inline]
    pub fn press(&mut self, button: u8) {
        self.0 |= button;
    }

    /// Clear a button.
    #[inline]
    pub fn release(&mut self, button: u8) {
        self.0 &= !button;
    }
}

/// Sampled input for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Strafe axis (-1.0 to 1.0). Positive = right.
    pub move_x: f32,

    /// Forward axis (-1.0 to 1.0). Positive = forward.
    pub move_z: f32,

    /// Horizontal look axis. Positive turns right.
    pub look_x: f32,

    /// Vertical look axis. Positive looks up.
    pub look_y: f32,

    /// Button states.
    pub buttons: CommandButtons,
}

impl ControlInput {
    /// Input with only the move axes set.
    pub fn moving(move_x: f32, move_z: f32) -> Self {
        Self {
            move_x,
            move_z,
            ..Default::default()
        }
    }

    /// Builder-style button press.
    pub fn with(mut self, button: u8) -> Self {
        self.buttons.press(button);
        self
    }

    #[inline]
    pub fn run_held(&self) -> bool {
        self.buttons.pressed(CommandButtons::RUN)
    }

    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.buttons.pressed(CommandButtons::JUMP)
    }

    #[inline]
    pub fn crouch_held(&self) -> bool {
        self.buttons.pressed(CommandButtons::CROUCH)
    }

    #[inline]
    pub fn crouch_pressed(&self) -> bool {
        self.buttons.pressed(CommandButtons::CROUCH_PRESSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_buttons() {
        let mut buttons = CommandButtons::default();
        assert!(!buttons.pressed(CommandButtons::JUMP));

        buttons.press(CommandButtons::JUMP);
        buttons.press(CommandButtons::RUN);
        assert!(buttons.pressed(CommandButtons::JUMP));
        assert!(buttons.pressed(CommandButtons::RUN));

        buttons.release(CommandButtons::JUMP);
        assert!(!buttons.pressed(CommandButtons::JUMP));
        assert!(buttons.pressed(CommandButtons::RUN));
    }

    #[test]
    fn test_control_input_builder() {
        let input = ControlInput::moving(0.0, 1.0)
            .with(CommandButtons::CROUCH)
            .with(CommandButtons::CROUCH_PRESSED);

        assert_eq!(input.move_z, 1.0);
        assert!(input.crouch_held());
        assert!(input.crouch_pressed());
        assert!(!input.run_held());
        assert!(!input.jump_pressed());
    }

    #[test]
    fn test_new_state_uses_configured_anchor() {
        let config = MovementConfig::default();
        let state = ControllerState::new(&config);

        assert_eq!(state.ground_anchor, config.ground_check_offset);
        assert_eq!(state.stance, Stance::Standing);
        assert!(!state.is_transitioning());
        assert!(!state.is_crouching());
    }
}
