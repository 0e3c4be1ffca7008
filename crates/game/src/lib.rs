//! Stride game layer
//!
//! Everything around the locomotion controller needed to run it:
//!
//! - Named input bindings, the polled input-source trait and scripted input
//! - Platform services (cursor lock)
//! - A kinematic capsule body over the reference collision world
//! - Level geometry and spawn points
//! - The fixed-tick simulation driver
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Simulation                            │
//! │  ┌─────────────┐   ┌────────────────────┐   ┌─────────────┐  │
//! │  │ InputSource │──►│ LocomotionController│──►│ Kinematic   │  │
//! │  │ + Bindings  │   │ (ground, look,      │   │ Body        │  │
//! │  └─────────────┘   │  locomotion, crouch)│   └──────┬──────┘  │
//! │                    └─────────┬──────────┘          │         │
//! │                              ▼                     ▼         │
//! │                     ┌────────────────────────────────────┐   │
//! │                     │ Level: Arc<CollisionWorld>          │   │
//! │                     └────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod body;
pub mod input;
pub mod level;
pub mod platform;
pub mod simulation;

// Re-export main types
pub use body::KinematicBody;
pub use input::{InputBindings, InputFrame, InputSource, ScriptStep, ScriptedInput};
pub use level::{Level, SpawnPoint};
pub use platform::{HeadlessPlatform, Platform};
pub use simulation::{BodyStatus, Simulation, SimulationConfig, SimulationError};

// Re-export physics types for convenience
pub use stride_physics::{
    CollisionWorld, ControlInput, LocomotionController, MovementConfig, SpeedPolicy, Stance,
};
