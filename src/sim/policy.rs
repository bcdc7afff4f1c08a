//! Pocket removal policies
//!
//! Every ball tolerates a fixed number of pocket captures before it is
//! permanently removed. The policy is a lives counter with two operations:
//! decrement-and-check on capture, restore-to-full on game reset.

use serde::{Deserialize, Serialize};

/// How many captures a ball survives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolicyKind {
    /// One life: any capture removes the ball
    #[default]
    Standard,
    /// Two lives: first capture respawns, second removes
    TwoLife,
    /// Three lives: first two captures respawn, third removes
    ThreeLife,
}

impl PolicyKind {
    /// Full life count for this kind
    pub fn lives(&self) -> u8 {
        match self {
            PolicyKind::Standard => 1,
            PolicyKind::TwoLife => 2,
            PolicyKind::ThreeLife => 3,
        }
    }
}

/// Per-ball removal state: the kind plus remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalPolicy {
    kind: PolicyKind,
    lives: u8,
}

impl RemovalPolicy {
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            kind,
            lives: kind.lives(),
        }
    }

    /// Spend one life. Returns true if the ball is now exhausted and must
    /// be permanently removed.
    pub fn capture(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Restore the full life count (game reset)
    pub fn reset(&mut self) {
        self.lives = self.kind.lives();
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }
}
