//! Reference collision world for driving the locomotion controller.
//!
//! Provides exactly the primitives the controller consumes from its physics
//! collaborator, backed by parry3d shape queries over static box brushes.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: The collision environment containing all geometry
//! - [`TraceResult`]: Output from a collision trace
//! - [`TraceShape`]: Shape used for tracing (capsule or sphere)
//! - [`LayerMask`]: Layer filtering for queries
//!
//! # Queries
//!
//! - Sphere overlap: used by the ground sensor
//! - Ray cast: used by the ceiling check before standing up
//! - Collide-and-slide sweep: used to move the character capsule

mod flags;
mod sweep;
mod trace;
mod world;

pub use flags::{CollisionFlags, LayerMask};
pub use sweep::{clip_velocity, move_and_slide, SweepOutcome};
pub use trace::{TraceResult, TraceShape};
pub use world::{CollisionBrush, CollisionWorld};
