//! First-person locomotion.
//!
//! This module implements the per-tick character controller:
//!
//! - Sphere-overlap ground sensing
//! - Mouse look with clamped camera pitch
//! - Walk/run/crouch speeds, air control, gravity and jumping
//! - Timed, interruptible crouch/stand transitions with a ceiling check
//!
//! # Design
//!
//! The [`LocomotionController`] owns its [`ControllerState`] and is constructed
//! with its two collaborators: the controlled [`CharacterBody`] and the
//! [`PhysicsQueries`] it asks about the world. It never owns world geometry.
//!
//! Given the same configuration, inputs and tick durations, a controller over
//! the same world produces the same results.

mod body;
mod config;
mod controller;
mod crouch;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use body::{yaw_basis, CharacterBody, ColliderGeometry, PhysicsQueries};
pub use config::{MovementConfig, SpeedPolicy};
pub use controller::{is_grounded, move_direction, LocomotionController, LANDING_VELOCITY};
pub use crouch::{
    CrouchTransition, Stance, TransitionStep, CEILING_CHECK_DISTANCE, GROUND_ANCHOR_SHIFT,
};
pub use state::{CommandButtons, ControlInput, ControllerState};
