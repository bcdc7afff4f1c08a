//! Single-step undo snapshot
//!
//! One snapshot is retained at a time, taken when the table is settled and
//! a new shot is about to be applied. All fields are plain value data, so
//! `Clone` on the ball list is a true deep copy.

use serde::{Deserialize, Serialize};

use super::state::Ball;

/// Resting game state captured just before a shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub time_ticks: u64,
    pub balls: Vec<Ball>,
}

impl Snapshot {
    /// Deep-copy the ball list along with score and clock
    pub fn of(score: u32, time_ticks: u64, balls: &[Ball]) -> Self {
        Self {
            score,
            time_ticks,
            balls: balls.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::policy::PolicyKind;
    use crate::sim::state::Colour;
    use glam::Vec2;

    #[test]
    fn test_snapshot_is_independent_of_live_state() {
        let mut balls = vec![Ball::new(
            Colour::Blue,
            Vec2::new(10.0, 10.0),
            Vec2::ZERO,
            1.0,
            false,
            PolicyKind::TwoLife,
        )];

        let snap = Snapshot::of(3, 42, &balls);

        // Mutate the live ball after capture
        balls[0].pos = Vec2::new(99.0, 99.0);
        balls[0].active = false;
        balls[0].policy.capture();

        assert_eq!(snap.score, 3);
        assert_eq!(snap.time_ticks, 42);
        assert_eq!(snap.balls[0].pos, Vec2::new(10.0, 10.0));
        assert!(snap.balls[0].active);
        assert_eq!(snap.balls[0].policy.lives(), 2);
    }
}
