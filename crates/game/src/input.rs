//! Player input handling.
//!
//! Input is polled by name from an [`InputSource`] through a set of
//! [`InputBindings`] and packed into a [`ControlInput`] for the controller.
//! [`ScriptedInput`] plays back a recorded sequence of frames through the
//! same interface, with press edges derived from consecutive frames.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use stride_physics::movement::{CommandButtons, ControlInput};

/// A polled input device addressed by axis/button name.
pub trait InputSource {
    /// Current value of a named axis. Unknown names read as 0.
    fn axis(&self, name: &str) -> f32;

    /// Whether a named button is held this tick.
    fn button_held(&self, name: &str) -> bool;

    /// Whether a named button went down this tick.
    fn button_down(&self, name: &str) -> bool;
}

/// Names of the axes and buttons the controller reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    pub move_x: String,
    pub move_z: String,
    pub look_x: String,
    pub look_y: String,
    pub run: String,
    pub jump: String,
    pub crouch: String,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            move_x: "Horizontal".to_string(),
            move_z: "Vertical".to_string(),
            look_x: "Mouse X".to_string(),
            look_y: "Mouse Y".to_string(),
            run: "Run".to_string(),
            jump: "Jump".to_string(),
            crouch: "Crouch".to_string(),
        }
    }
}

impl InputBindings {
    /// Poll `source` for one tick of controller input.
    ///
    /// Move axes are clamped to `[-1, 1]`; look axes pass through.
    pub fn sample<S: InputSource + ?Sized>(&self, source: &S) -> ControlInput {
        let mut input = ControlInput {
            move_x: source.axis(&self.move_x).clamp(-1.0, 1.0),
            move_z: source.axis(&self.move_z).clamp(-1.0, 1.0),
            look_x: source.axis(&self.look_x),
            look_y: source.axis(&self.look_y),
            ..Default::default()
        };

        if source.button_held(&self.run) {
            input.buttons.press(CommandButtons::RUN);
        }
        if source.button_down(&self.jump) {
            input.buttons.press(CommandButtons::JUMP);
        }
        if source.button_held(&self.crouch) {
            input.buttons.press(CommandButtons::CROUCH);
        }
        if source.button_down(&self.crouch) {
            input.buttons.press(CommandButtons::CROUCH_PRESSED);
        }

        input
    }
}

/// Raw device state for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    /// Strafe axis. Positive = right.
    pub move_x: f32,
    /// Forward axis. Positive = forward.
    pub move_z: f32,
    /// Mouse X delta.
    pub look_x: f32,
    /// Mouse Y delta.
    pub look_y: f32,
    pub run: bool,
    pub jump: bool,
    pub crouch: bool,
}

impl InputFrame {
    /// Push the forward axis.
    pub fn forward() -> Self {
        Self {
            move_z: 1.0,
            ..Default::default()
        }
    }

    pub fn with_run(mut self) -> Self {
        self.run = true;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_crouch(mut self) -> Self {
        self.crouch = true;
        self
    }

    pub fn with_look(mut self, look_x: f32, look_y: f32) -> Self {
        self.look_x = look_x;
        self.look_y = look_y;
        self
    }
}

/// One frame held for a number of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub ticks: u32,
    pub frame: InputFrame,
}

impl ScriptStep {
    pub fn new(ticks: u32, frame: InputFrame) -> Self {
        Self { ticks, frame }
    }
}

/// Plays back a list of [`ScriptStep`]s one tick at a time.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    bindings: InputBindings,
    steps: VecDeque<ScriptStep>,
    current: InputFrame,
    previous: InputFrame,
}

impl ScriptedInput {
    pub fn new(bindings: InputBindings, steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            bindings,
            steps: steps.into_iter().filter(|step| step.ticks > 0).collect(),
            current: InputFrame::default(),
            previous: InputFrame::default(),
        }
    }

    /// Move to the next tick's frame. Returns `false` once the script is
    /// exhausted, leaving all input released.
    pub fn advance(&mut self) -> bool {
        self.previous = self.current;

        let Some(step) = self.steps.front_mut() else {
            self.current = InputFrame::default();
            return false;
        };

        self.current = step.frame;
        step.ticks -= 1;
        if step.ticks == 0 {
            self.steps.pop_front();
        }
        true
    }

    /// Ticks left to play.
    pub fn remaining_ticks(&self) -> u64 {
        self.steps.iter().map(|step| u64::from(step.ticks)).sum()
    }

    pub fn current(&self) -> &InputFrame {
        &self.current
    }

    fn held(&self, frame: &InputFrame, name: &str) -> bool {
        if name == self.bindings.run {
            frame.run
        } else if name == self.bindings.jump {
            frame.jump
        } else if name == self.bindings.crouch {
            frame.crouch
        } else {
            false
        }
    }
}

impl InputSource for ScriptedInput {
    fn axis(&self, name: &str) -> f32 {
        if name == self.bindings.move_x {
            self.current.move_x
        } else if name == self.bindings.move_z {
            self.current.move_z
        } else if name == self.bindings.look_x {
            self.current.look_x
        } else if name == self.bindings.look_y {
            self.current.look_y
        } else {
            0.0
        }
    }

    fn button_held(&self, name: &str) -> bool {
        self.held(&self.current, name)
    }

    fn button_down(&self, name: &str) -> bool {
        self.held(&self.current, name) && !self.held(&self.previous, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(steps: Vec<ScriptStep>) -> ScriptedInput {
        ScriptedInput::new(InputBindings::default(), steps)
    }

    #[test]
    fn test_sample_maps_axes_and_buttons() {
        let mut input = script(vec![ScriptStep::new(
            1,
            InputFrame::forward().with_run().with_look(0.5, -0.25),
        )]);
        assert!(input.advance());

        let command = InputBindings::default().sample(&input);
        assert_eq!(command.move_z, 1.0);
        assert_eq!(command.move_x, 0.0);
        assert_eq!(command.look_x, 0.5);
        assert_eq!(command.look_y, -0.25);
        assert!(command.run_held());
        assert!(!command.jump_pressed());
    }

    #[test]
    fn test_sample_clamps_move_axes() {
        let frame = InputFrame {
            move_x: -3.0,
            move_z: 2.0,
            look_x: 40.0,
            ..Default::default()
        };
        let mut input = script(vec![ScriptStep::new(1, frame)]);
        input.advance();

        let command = InputBindings::default().sample(&input);
        assert_eq!(command.move_x, -1.0);
        assert_eq!(command.move_z, 1.0);
        assert_eq!(command.look_x, 40.0);
    }

    #[test]
    fn test_press_edges() {
        let mut input = script(vec![
            ScriptStep::new(3, InputFrame::default().with_crouch().with_jump()),
            ScriptStep::new(1, InputFrame::default()),
            ScriptStep::new(1, InputFrame::default().with_crouch()),
        ]);
        let bindings = InputBindings::default();

        input.advance();
        let first = bindings.sample(&input);
        assert!(first.crouch_held() && first.crouch_pressed());
        assert!(first.jump_pressed());

        // Still held: no new edge
        input.advance();
        let second = bindings.sample(&input);
        assert!(second.crouch_held() && !second.crouch_pressed());
        assert!(!second.jump_pressed());

        input.advance();
        input.advance();
        assert!(!bindings.sample(&input).crouch_held());

        // Pressed again after a release
        input.advance();
        assert!(bindings.sample(&input).crouch_pressed());
    }

    #[test]
    fn test_script_exhaustion() {
        let mut input = script(vec![
            ScriptStep::new(2, InputFrame::forward()),
            ScriptStep::new(0, InputFrame::default().with_jump()),
        ]);
        assert_eq!(input.remaining_ticks(), 2);

        assert!(input.advance());
        assert!(input.advance());
        assert!(!input.advance());
        assert_eq!(input.current(), &InputFrame::default());
        assert_eq!(input.remaining_ticks(), 0);
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = InputBindings {
            run: "Sprint".to_string(),
            ..Default::default()
        };
        let mut input = ScriptedInput::new(
            bindings.clone(),
            vec![ScriptStep::new(1, InputFrame::default().with_run())],
        );
        input.advance();

        assert!(input.button_held("Sprint"));
        assert!(!input.button_held("Run"));
        assert!(bindings.sample(&input).run_held());
        assert_eq!(input.axis("Nonexistent"), 0.0);
    }
}
