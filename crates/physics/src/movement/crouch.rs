//! Crouch/stand transition process.
//!
//! Two stable stances plus an interruptible transition that tweens the body's
//! collider from whatever geometry it currently has toward the target pose.
//!
//! - The stance toggles as soon as a transition starts.
//! - A transition advances one step per tick and force-sets the exact target
//!   geometry once its duration has elapsed.
//! - Starting a new transition replaces (cancels) the one in flight, which
//!   leaves the collider at the partial geometry it had reached.

use serde::{Deserialize, Serialize};

use super::body::{CharacterBody, ColliderGeometry};

/// Distance the ground-check anchor moves when a transition starts.
///
/// Up (+Y) toward crouching, down toward standing.
pub const GROUND_ANCHOR_SHIFT: f32 = 1.0;

/// Clearance above the camera that must be free before standing up.
pub const CEILING_CHECK_DISTANCE: f32 = 1.0;

/// Body stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    /// The other stance.
    pub fn toggled(self) -> Stance {
        match self {
            Stance::Standing => Stance::Crouching,
            Stance::Crouching => Stance::Standing,
        }
    }

    /// Signed anchor shift applied when starting toward this stance.
    pub fn anchor_shift(self) -> f32 {
        match self {
            Stance::Standing => -GROUND_ANCHOR_SHIFT,
            Stance::Crouching => GROUND_ANCHOR_SHIFT,
        }
    }
}

/// Result of advancing a transition by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Geometry was interpolated; more steps follow.
    Running,
    /// Exact target geometry was applied; the transition is over.
    Finished,
}

/// An in-flight tween of the collider toward `target_stance`'s geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrouchTransition {
    /// Stance this transition ends in.
    pub target_stance: Stance,
    /// Collider geometry captured when the transition started.
    pub start: ColliderGeometry,
    /// Exact geometry applied at the end.
    pub target: ColliderGeometry,
    /// Time elapsed so far (seconds).
    pub elapsed: f32,
    /// Total duration (seconds, > 0).
    pub duration: f32,
}

impl CrouchTransition {
    pub fn new(
        target_stance: Stance,
        start: ColliderGeometry,
        target: ColliderGeometry,
        duration: f32,
    ) -> Self {
        Self {
            target_stance,
            start,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Advance by one tick.
    ///
    /// While time remains, the collider is set to the blend for the elapsed
    /// time *before* `delta_time` is added. Once the duration is reached the
    /// exact target geometry is applied.
    pub fn step<B: CharacterBody + ?Sized>(&mut self, body: &mut B, delta_time: f32) -> TransitionStep {
        if self.elapsed < self.duration {
            body.set_collider(self.start.lerp(self.target, self.elapsed / self.duration));
            self.elapsed += delta_time;
            TransitionStep::Running
        } else {
            body.set_collider(self.target);
            TransitionStep::Finished
        }
    }
}
