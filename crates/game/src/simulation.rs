//! Fixed-tick simulation driver.
//!
//! Owns one controller over a [`KinematicBody`] in a [`Level`], samples input
//! each tick and holds the cursor lock for as long as the controller is
//! active.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stride_physics::{
    CollisionWorld, ConfigError, LocomotionController, MovementConfig, Stance,
};
use thiserror::Error;

use crate::body::KinematicBody;
use crate::input::{InputBindings, InputSource};
use crate::level::Level;
use crate::platform::Platform;

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Index of the level spawn point to start at.
    pub spawn_index: usize,

    /// Movement tuning.
    pub movement: MovementConfig,

    /// Input names the controller reads.
    pub bindings: InputBindings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 50,
            spawn_index: 0,
            movement: MovementConfig::default(),
            bindings: InputBindings::default(),
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// Reasons a simulation cannot start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("tick rate must be at least 1")]
    ZeroTickRate,

    #[error("level {level} has no spawn point {index}")]
    MissingSpawn { level: String, index: usize },

    #[error("invalid movement config: {0}")]
    Movement(#[from] ConfigError),
}

/// Snapshot of the controlled body for logging and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyStatus {
    pub frame: u64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub grounded: bool,
    pub stance: Stance,
    pub transitioning: bool,
    pub collider_height: f32,
}

/// The simulation: one controlled body in one level.
pub struct Simulation<P: Platform> {
    /// Current frame/tick number.
    pub frame: u64,

    config: SimulationConfig,
    level: Level,
    controller: LocomotionController<KinematicBody, Arc<CollisionWorld>>,
    platform: P,
    active: bool,
}

impl<P: Platform> Simulation<P> {
    /// Spawn a body, activate its controller and lock the cursor.
    pub fn new(config: SimulationConfig, level: Level, mut platform: P) -> Result<Self, SimulationError> {
        if config.tick_rate == 0 {
            return Err(SimulationError::ZeroTickRate);
        }

        let spawn = *level
            .spawn(config.spawn_index)
            .ok_or_else(|| SimulationError::MissingSpawn {
                level: level.id.clone(),
                index: config.spawn_index,
            })?;

        let body = KinematicBody::new(Arc::clone(&level.collision), spawn.position, spawn.yaw);
        let controller =
            LocomotionController::new(config.movement.clone(), body, Arc::clone(&level.collision))?;

        platform.set_cursor_locked(true);
        log::info!(
            "simulation started in {} at {:?}, {} Hz",
            level.name,
            spawn.position,
            config.tick_rate
        );

        Ok(Self {
            frame: 0,
            config,
            level,
            controller,
            platform,
            active: true,
        })
    }

    /// Advance by one fixed tick, polling `source` for input.
    ///
    /// Does nothing once the simulation has been deactivated.
    pub fn step<S: InputSource + ?Sized>(&mut self, source: &S) {
        if !self.active {
            return;
        }

        let input = self.config.bindings.sample(source);
        self.controller.tick(&input, self.config.delta_time());
        self.frame += 1;
    }

    /// Stop ticking and release the cursor. Idempotent.
    pub fn deactivate(&mut self) {
        if self.active {
            self.active = false;
            self.platform.set_cursor_locked(false);
            log::info!("simulation stopped at frame {}", self.frame);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> BodyStatus {
        let state = self.controller.state();
        let body = self.controller.body();

        BodyStatus {
            frame: self.frame,
            position: body.position,
            velocity: state.velocity,
            yaw: body.yaw,
            pitch: state.pitch,
            grounded: state.is_grounded,
            stance: state.stance,
            transitioning: state.is_transitioning(),
            collider_height: body.collider.height,
        }
    }

    pub fn controller(&self) -> &LocomotionController<KinematicBody, Arc<CollisionWorld>> {
        &self.controller
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

impl<P: Platform> Drop for Simulation<P> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::input::{InputFrame, ScriptStep, ScriptedInput};
    use crate::platform::HeadlessPlatform;

    fn test_simulation() -> Simulation<HeadlessPlatform> {
        Simulation::new(SimulationConfig::default(), Level::test_arena(), HeadlessPlatform::default())
            .unwrap()
    }

    /// Shares its lock state with the test after the simulation is dropped.
    struct SharedPlatform(Rc<Cell<bool>>);

    impl Platform for SharedPlatform {
        fn set_cursor_locked(&mut self, locked: bool) {
            self.0.set(locked);
        }

        fn cursor_locked(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_simulation_creation_locks_cursor() {
        let sim = test_simulation();
        assert_eq!(sim.frame, 0);
        assert!(sim.is_active());
        assert!(sim.platform().cursor_locked());
        assert_eq!(sim.status().stance, Stance::Standing);
    }

    #[test]
    fn test_deactivate_releases_cursor() {
        let mut sim = test_simulation();
        sim.deactivate();
        assert!(!sim.platform().cursor_locked());

        // Inactive simulations don't tick
        let input = ScriptedInput::new(InputBindings::default(), Vec::new());
        sim.step(&input);
        assert_eq!(sim.frame, 0);
    }

    #[test]
    fn test_drop_releases_cursor() {
        let locked = Rc::new(Cell::new(false));
        let sim = Simulation::new(
            SimulationConfig::default(),
            Level::test_arena(),
            SharedPlatform(Rc::clone(&locked)),
        )
        .unwrap();
        assert!(locked.get());

        drop(sim);
        assert!(!locked.get());
    }

    #[test]
    fn test_rejects_bad_config() {
        let zero_rate = SimulationConfig {
            tick_rate: 0,
            ..Default::default()
        };
        let result = Simulation::new(zero_rate, Level::test_arena(), HeadlessPlatform::default());
        assert_eq!(result.err(), Some(SimulationError::ZeroTickRate));

        let bad_movement = SimulationConfig {
            movement: MovementConfig {
                crouch_transition_time: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = Simulation::new(bad_movement, Level::test_arena(), HeadlessPlatform::default());
        assert!(matches!(result.err(), Some(SimulationError::Movement(_))));

        let missing_spawn = SimulationConfig {
            spawn_index: 9,
            ..Default::default()
        };
        let result = Simulation::new(missing_spawn, Level::test_arena(), HeadlessPlatform::default());
        assert!(matches!(result.err(), Some(SimulationError::MissingSpawn { index: 9, .. })));
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = test_simulation();
        let mut input = ScriptedInput::new(
            InputBindings::default(),
            vec![ScriptStep::new(2, InputFrame::default())],
        );

        while input.advance() {
            sim.step(&input);
        }
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_movement_input() {
        let mut sim = test_simulation();
        let start = sim.status().position;

        let mut input = ScriptedInput::new(
            InputBindings::default(),
            vec![ScriptStep::new(50, InputFrame::forward())],
        );
        while input.advance() {
            sim.step(&input);
        }

        let status = sim.status();
        assert!(status.grounded);
        // One second of walking at 3 units/second toward +Z
        let travelled = status.position.z - start.z;
        assert!(travelled > 2.5 && travelled < 3.1, "travelled {}", travelled);
    }
}
