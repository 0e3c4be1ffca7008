//! Stride Physics
//!
//! A first-person locomotion controller plus a small reference collision world
//! to run it against.
//!
//! # Architecture
//!
//! - **Movement**: The per-tick controller (ground sensor, look, locomotion,
//!   crouch transitions) written against two collaborator traits
//! - **Collision**: Static box brushes with sphere overlap, ray casts and
//!   capsule collide-and-slide, implementing the query trait
//!
//! # Design Principles
//!
//! 1. **Determinism**: Same inputs always produce same outputs
//! 2. **Injection**: The controller never looks up its collaborators
//! 3. **Fail fast**: Bad tuning is rejected at construction, never mid-session

pub mod collision;
pub mod error;
pub mod movement;

// Re-export commonly used types
pub use collision::{CollisionFlags, CollisionWorld, LayerMask, TraceResult, TraceShape};
pub use error::ConfigError;
pub use movement::{
    CharacterBody, ColliderGeometry, CommandButtons, ControlInput, ControllerState,
    LocomotionController, MovementConfig, PhysicsQueries, SpeedPolicy, Stance,
};
