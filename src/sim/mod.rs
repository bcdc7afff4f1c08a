//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Fully determined by config and queued shots (no RNG, no wall clock)
//! - No rendering or platform dependencies

pub mod collision;
pub mod policy;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{ball_ball_collision, bounding_contact, wall_bounce};
pub use policy::{PolicyKind, RemovalPolicy};
pub use snapshot::Snapshot;
pub use state::{Ball, BallView, Colour, GameState, Pocket, SceneView, Table};
pub use tick::tick;
