//! Pool Table - a table-ball game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, pockets, game state)
//! - `config`: JSON level loading and validation
//!
//! The engine owns all authoritative game state. The host drives it by
//! calling [`sim::tick`] at a fixed cadence and feeding shots in via
//! [`sim::GameState::queue_shot`]; rendering reads the copy-out
//! [`sim::GameState::scene`] view and never touches live state.

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{Ball, Colour, GameState, Pocket, SceneView, Table, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period in milliseconds (~58.8 Hz)
    pub const TICK_MS: u64 = 17;

    /// Ball radius, identical for every ball
    pub const BALL_RADIUS: f32 = 10.0;
    /// Per-axis velocity cap, units per tick
    pub const MAX_VEL: f32 = 20.0;
    /// Scale from shot drag vector to cue-ball velocity
    pub const FORCE_FACTOR: f32 = 0.1;

    /// Minimum distance from pocket centre to any table edge
    pub const POCKET_MARGIN: f32 = 10.0;
    /// Two balls closer than this contest the same pocket slot
    pub const CONTEST_RADIUS: f32 = 10.0;
    /// Velocity components below this snap to zero after friction,
    /// so the table can actually settle
    pub const STOP_EPSILON: f32 = 0.05;
}
