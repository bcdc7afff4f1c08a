//! Game state and core simulation types
//!
//! All authoritative state lives here: the table, the ball list, score,
//! the tick clock, the pending shot, and the retained undo snapshot.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::policy::{PolicyKind, RemovalPolicy};
use super::snapshot::Snapshot;
use crate::consts::*;

/// Ball colour: identity, score value, and default removal policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Colour {
    White,
    Red,
    Yellow,
    Green,
    Brown,
    Blue,
    Purple,
    Black,
    Orange,
    /// Any colour name the rules don't recognize; scores zero
    Other(String),
}

impl Colour {
    /// Score awarded when a ball of this colour is permanently removed
    pub fn score(&self) -> u32 {
        match self {
            Colour::Red => 1,
            Colour::Yellow => 2,
            Colour::Green => 3,
            Colour::Brown => 4,
            Colour::Blue => 5,
            Colour::Purple => 6,
            Colour::Black => 7,
            Colour::Orange => 8,
            Colour::White | Colour::Other(_) => 0,
        }
    }

    /// Removal policy a ball of this colour plays with
    pub fn policy_kind(&self) -> PolicyKind {
        match self {
            Colour::Blue | Colour::Green | Colour::Purple => PolicyKind::TwoLife,
            Colour::Black | Colour::Brown => PolicyKind::ThreeLife,
            _ => PolicyKind::Standard,
        }
    }

    /// White is the player-controlled cue ball
    pub fn is_cue_colour(&self) -> bool {
        matches!(self, Colour::White)
    }

    pub fn name(&self) -> &str {
        match self {
            Colour::White => "white",
            Colour::Red => "red",
            Colour::Yellow => "yellow",
            Colour::Green => "green",
            Colour::Brown => "brown",
            Colour::Blue => "blue",
            Colour::Purple => "purple",
            Colour::Black => "black",
            Colour::Orange => "orange",
            Colour::Other(name) => name,
        }
    }
}

impl FromStr for Colour {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "white" => Colour::White,
            "red" => Colour::Red,
            "yellow" => Colour::Yellow,
            "green" => Colour::Green,
            "brown" => Colour::Brown,
            "blue" => Colour::Blue,
            "purple" => Colour::Purple,
            "black" => Colour::Black,
            "orange" => Colour::Orange,
            other => Colour::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Colour {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Colour::Other(s))
    }
}

impl From<Colour> for String {
    fn from(c: Colour) -> Self {
        c.name().to_string()
    }
}

/// A ball on the table
///
/// Plain value type; `Clone` is the deep copy the undo snapshot relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub colour: Colour,
    pub pos: Vec2,
    vel: Vec2,
    /// Respawn anchor, fixed at construction
    start: Vec2,
    pub mass: f32,
    pub radius: f32,
    pub is_cue: bool,
    pub active: bool,
    pub policy: RemovalPolicy,
}

impl Ball {
    pub fn new(
        colour: Colour,
        start: Vec2,
        vel: Vec2,
        mass: f32,
        is_cue: bool,
        kind: PolicyKind,
    ) -> Self {
        let mut ball = Self {
            colour,
            pos: start,
            vel: Vec2::ZERO,
            start,
            mass,
            radius: BALL_RADIUS,
            is_cue,
            active: true,
            policy: RemovalPolicy::new(kind),
        };
        ball.set_vel(vel);
        ball
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    /// Store a velocity, clamped per axis to ±MAX_VEL. Every velocity
    /// write goes through here so the cap holds after any update.
    pub fn set_vel(&mut self, vel: Vec2) {
        self.vel = vel.clamp(Vec2::splat(-MAX_VEL), Vec2::splat(MAX_VEL));
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Back to the respawn anchor, at rest. Lives are untouched.
    pub fn respawn(&mut self) {
        self.pos = self.start;
        self.vel = Vec2::ZERO;
    }

    /// Full reset: respawn, reactivate, restore lives
    pub fn reset(&mut self) {
        self.respawn();
        self.active = true;
        self.policy.reset();
    }

    pub fn is_still(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// A capture zone on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub pos: Vec2,
    pub radius: f32,
}

impl Pocket {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Capture condition: ball centre strictly within the capture radius
    pub fn captures(&self, ball_pos: Vec2) -> bool {
        self.pos.distance(ball_pos) < self.radius
    }
}

/// The table: playfield geometry, friction, and pockets
///
/// Constructed from already-validated config; the engine assumes the
/// invariants (positive size, friction in (0,1), pockets inside the
/// interior) hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub colour: String,
    pub width: u32,
    pub height: u32,
    pub friction: f32,
    pub pockets: Vec<Pocket>,
}

impl Table {
    pub fn new(colour: String, width: u32, height: u32, friction: f32) -> Self {
        Self {
            colour,
            width,
            height,
            friction,
            pockets: Vec::new(),
        }
    }
}

/// Read-only copy of one ball for rendering
#[derive(Debug, Clone)]
pub struct BallView {
    pub pos: Vec2,
    pub colour: Colour,
    pub radius: f32,
    pub active: bool,
}

/// Copy-out view of everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct SceneView {
    pub table_colour: String,
    pub width: u32,
    pub height: u32,
    pub pockets: Vec<Pocket>,
    pub balls: Vec<BallView>,
    pub score: u32,
    pub elapsed: Duration,
    pub won: bool,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub table: Table,
    pub balls: Vec<Ball>,
    pub score: u32,
    /// Simulation tick counter; elapsed time derives from it
    pub time_ticks: u64,
    /// Shot queued by the input collaborator, consumed at the next tick
    pending_shot: Option<Vec2>,
    /// Win latch; once set, ticks are no-ops
    won: bool,
    /// The single retained undo snapshot
    snapshot: Option<Snapshot>,
}

impl GameState {
    pub fn new(table: Table, balls: Vec<Ball>) -> Self {
        Self {
            table,
            balls,
            score: 0,
            time_ticks: 0,
            pending_shot: None,
            won: false,
            snapshot: None,
        }
    }

    /// Queue a shot from a pointer drag; applied to the cue ball at the
    /// start of the next tick. A second call before that tick replaces
    /// the first.
    pub fn queue_shot(&mut self, drag: Vec2) {
        self.pending_shot = Some(drag);
    }

    pub(crate) fn take_pending_shot(&mut self) -> Option<Vec2> {
        self.pending_shot.take()
    }

    pub(crate) fn has_pending_shot(&self) -> bool {
        self.pending_shot.is_some()
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub(crate) fn latch_win(&mut self) {
        self.won = true;
    }

    /// True when every active ball is at rest; the only state a new
    /// snapshot may be taken from
    pub fn is_settled(&self) -> bool {
        self.balls
            .iter()
            .filter(|b| b.active)
            .all(|b| b.is_still())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Time played, advanced once per tick while the game is live
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.time_ticks * TICK_MS)
    }

    /// Record the current resting state; replaces any prior snapshot
    pub(crate) fn save_snapshot(&mut self) {
        self.snapshot = Some(Snapshot::of(self.score, self.time_ticks, &self.balls));
    }

    /// Roll back to the last settled-table snapshot, discarding all
    /// motion, removal, and scoring since. No-op without a snapshot;
    /// calling twice in a row restores the same state.
    pub fn undo(&mut self) {
        if let Some(snap) = &self.snapshot {
            self.score = snap.score;
            self.time_ticks = snap.time_ticks;
            self.balls = snap.balls.clone();
            log::info!("undo: restored snapshot at tick {}", snap.time_ticks);
        }
    }

    /// Put every ball back on its anchor with full lives and zero the
    /// score. Shared by cue-ball capture and the external reset.
    pub(crate) fn reset_table(&mut self) {
        for ball in &mut self.balls {
            ball.reset();
        }
        self.score = 0;
    }

    /// External reset request: a fresh game on the same table. Clears the
    /// win latch and any queued shot; the clock and the retained snapshot
    /// survive.
    pub fn reset(&mut self) {
        self.reset_table();
        self.won = false;
        self.pending_shot = None;
        log::info!("game reset");
    }

    /// Owned copy of the drawable state for this frame
    pub fn scene(&self) -> SceneView {
        SceneView {
            table_colour: self.table.colour.clone(),
            width: self.table.width,
            height: self.table.height,
            pockets: self.table.pockets.clone(),
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    pos: b.pos,
                    colour: b.colour.clone(),
                    radius: b.radius,
                    active: b.active,
                })
                .collect(),
            score: self.score,
            elapsed: self.elapsed(),
            won: self.won,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_ball(x: f32, y: f32) -> Ball {
        Ball::new(
            Colour::Red,
            Vec2::new(x, y),
            Vec2::ZERO,
            1.0,
            false,
            PolicyKind::Standard,
        )
    }

    #[test]
    fn test_set_vel_clamps_per_axis() {
        let mut ball = red_ball(0.0, 0.0);
        ball.set_vel(Vec2::new(35.0, -90.0));
        assert_eq!(ball.vel(), Vec2::new(MAX_VEL, -MAX_VEL));

        ball.set_vel(Vec2::new(-3.0, 4.0));
        assert_eq!(ball.vel(), Vec2::new(-3.0, 4.0));
    }

    #[test]
    fn test_initial_velocity_is_clamped() {
        let ball = Ball::new(
            Colour::Red,
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            1.0,
            false,
            PolicyKind::Standard,
        );
        assert_eq!(ball.vel().x, MAX_VEL);
    }

    #[test]
    fn test_respawn_keeps_lives() {
        let mut ball = Ball::new(
            Colour::Blue,
            Vec2::new(10.0, 20.0),
            Vec2::ZERO,
            1.0,
            false,
            PolicyKind::TwoLife,
        );
        ball.pos = Vec2::new(200.0, 100.0);
        ball.set_vel(Vec2::new(5.0, 5.0));
        ball.policy.capture();

        ball.respawn();
        assert_eq!(ball.pos, Vec2::new(10.0, 20.0));
        assert!(ball.is_still());
        assert_eq!(ball.policy.lives(), 1);
    }

    #[test]
    fn test_pocket_capture_is_strict() {
        let pocket = Pocket::new(Vec2::new(50.0, 50.0), 15.0);
        assert!(pocket.captures(Vec2::new(50.0, 50.0)));
        assert!(pocket.captures(Vec2::new(60.0, 50.0)));
        assert!(!pocket.captures(Vec2::new(65.0, 50.0)));
        assert!(!pocket.captures(Vec2::new(66.0, 50.0)));
    }

    #[test]
    fn test_colour_round_trip_and_scores() {
        let c: Colour = "Purple".parse().unwrap();
        assert_eq!(c, Colour::Purple);
        assert_eq!(c.score(), 6);

        let odd: Colour = "chartreuse".parse().unwrap();
        assert_eq!(odd.score(), 0);
        assert_eq!(odd.name(), "chartreuse");
        assert_eq!(odd.policy_kind(), PolicyKind::Standard);
    }

    #[test]
    fn test_queue_shot_latest_wins() {
        let table = Table::new("green".into(), 400, 200, 0.98);
        let mut state = GameState::new(table, vec![red_ball(50.0, 50.0)]);

        state.queue_shot(Vec2::new(1.0, 0.0));
        state.queue_shot(Vec2::new(0.0, 2.0));
        assert_eq!(state.take_pending_shot(), Some(Vec2::new(0.0, 2.0)));
        assert_eq!(state.take_pending_shot(), None);
    }

    #[test]
    fn test_settled_ignores_inactive_balls() {
        let table = Table::new("green".into(), 400, 200, 0.98);
        let mut moving = red_ball(100.0, 100.0);
        moving.set_vel(Vec2::new(5.0, 0.0));
        moving.active = false;

        let state = GameState::new(table, vec![red_ball(50.0, 50.0), moving]);
        assert!(state.is_settled());
    }

    #[test]
    fn test_undo_without_snapshot_is_noop() {
        let table = Table::new("green".into(), 400, 200, 0.98);
        let mut state = GameState::new(table, vec![red_ball(50.0, 50.0)]);
        state.score = 7;
        state.undo();
        assert_eq!(state.score, 7);
    }

    #[test]
    fn test_elapsed_derives_from_ticks() {
        let table = Table::new("green".into(), 400, 200, 0.98);
        let mut state = GameState::new(table, vec![red_ball(50.0, 50.0)]);
        state.time_ticks = 100;
        assert_eq!(state.elapsed(), Duration::from_millis(1700));
    }
}
