//! Layer masks for collision filtering and flags reported by sweeps.
//!
//! Layers determine what a query can see: the ground sensor only looks at
//! walkable layers, while body sweeps and ceiling checks look at everything
//! solid.

use serde::{Deserialize, Serialize};

/// Collision layers a brush belongs to, or that a query is allowed to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches nothing.
    pub const EMPTY: Self = Self(0);

    /// Generic solid geometry - walls, props, ceilings.
    pub const DEFAULT: Self = Self(1 << 0);

    /// Walkable surfaces - floors, platforms, stair treads.
    pub const GROUND: Self = Self(1 << 1);

    /// Blocks the character body but is invisible to ray casts.
    pub const PLAYER_CLIP: Self = Self(1 << 2);

    /// Trigger volumes - never block movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Everything the character body collides with while moving.
    pub const MASK_BODY_SOLID: Self = Self(
        Self::DEFAULT.0 | Self::GROUND.0 | Self::PLAYER_CLIP.0,
    );

    /// Everything a ray cast (ceiling check) can hit.
    pub const MASK_RAYCAST: Self = Self(Self::DEFAULT.0 | Self::GROUND.0);

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Which sides of the capsule were blocked during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionFlags(pub u8);

impl CollisionFlags {
    /// Free movement.
    pub const NONE: Self = Self(0);

    /// Blocked horizontally (walls).
    pub const SIDES: Self = Self(1 << 0);

    /// Blocked from above (ceilings).
    pub const ABOVE: Self = Self(1 << 1);

    /// Blocked from below (floors).
    pub const BELOW: Self = Self(1 << 2);

    /// Normal Y above which a contact counts as floor, below whose negation it
    /// counts as ceiling.
    pub const SURFACE_NORMAL_THRESHOLD: f32 = 0.7;

    /// Classify a contact normal (pointing away from the surface).
    pub fn from_normal(normal: glam::Vec3) -> Self {
        if normal.y >= Self::SURFACE_NORMAL_THRESHOLD {
            Self::BELOW
        } else if normal.y <= -Self::SURFACE_NORMAL_THRESHOLD {
            Self::ABOVE
        } else {
            Self::SIDES
        }
    }

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for CollisionFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
