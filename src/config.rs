//! JSON level configuration
//!
//! Loads and validates the table/ball definitions before the engine runs.
//! Every check here is fatal: the simulation assumes its invariants hold
//! and never re-validates. The file shape matches the original level
//! format — a `Table` section (colour, friction, size, pockets) and a
//! `Balls` section.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::consts::POCKET_MARGIN;
use crate::sim::{Ball, Colour, GameState, Pocket, Table};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("friction must be strictly between 0 and 1, got {0}")]
    Friction(f32),
    #[error("table size must be positive, got {0}x{1}")]
    TableSize(i64, i64),
    #[error("pocket at ({x}, {y}) lies outside the table interior")]
    PocketOutsideTable { x: f32, y: f32 },
    #[error("expected exactly one cue (white) ball, found {0}")]
    CueBallCount(usize),
}

/// Validated game setup, ready to build an engine
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub table: Table,
    pub balls: Vec<Ball>,
}

impl GameConfig {
    pub fn into_state(self) -> GameState {
        GameState::new(self.table, self.balls)
    }
}

// Raw serde mirror of the level file

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "Table")]
    table: RawTable,
    #[serde(rename = "Balls")]
    balls: RawBalls,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    colour: String,
    friction: f32,
    size: RawSize,
    #[serde(default)]
    pockets: Vec<RawPocket>,
}

#[derive(Debug, Deserialize)]
struct RawSize {
    x: i64,
    y: i64,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct RawPocket {
    position: RawPoint,
    radius: f32,
}

#[derive(Debug, Deserialize)]
struct RawBalls {
    ball: Vec<RawBall>,
}

#[derive(Debug, Deserialize)]
struct RawBall {
    colour: String,
    position: RawPoint,
    velocity: RawPoint,
    mass: f32,
}

/// Load and validate a level file
pub fn load(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let json = fs::read_to_string(path.as_ref())?;
    let config = parse(&json)?;
    log::info!(
        "loaded level: {}x{} table, {} pockets, {} balls",
        config.table.width,
        config.table.height,
        config.table.pockets.len(),
        config.balls.len()
    );
    Ok(config)
}

/// Parse and validate an in-memory level document
pub fn parse(json: &str) -> Result<GameConfig, ConfigError> {
    let raw: RawConfig = serde_json::from_str(json)?;

    if raw.table.friction <= 0.0 || raw.table.friction >= 1.0 {
        return Err(ConfigError::Friction(raw.table.friction));
    }
    if raw.table.size.x <= 0 || raw.table.size.y <= 0 {
        return Err(ConfigError::TableSize(raw.table.size.x, raw.table.size.y));
    }

    let mut table = Table::new(
        raw.table.colour,
        raw.table.size.x as u32,
        raw.table.size.y as u32,
        raw.table.friction,
    );

    let (width, height) = (table.width as f32, table.height as f32);
    for pocket in raw.table.pockets {
        let RawPoint { x, y } = pocket.position;
        if x < POCKET_MARGIN
            || x > width - POCKET_MARGIN
            || y < POCKET_MARGIN
            || y > height - POCKET_MARGIN
        {
            return Err(ConfigError::PocketOutsideTable { x, y });
        }
        table.pockets.push(Pocket::new(Vec2::new(x, y), pocket.radius));
    }

    let balls: Vec<Ball> = raw
        .balls
        .ball
        .into_iter()
        .map(|b| {
            let colour: Colour = b.colour.into();
            let is_cue = colour.is_cue_colour();
            let kind = colour.policy_kind();
            Ball::new(
                colour,
                Vec2::new(b.position.x, b.position.y),
                Vec2::new(b.velocity.x, b.velocity.y),
                b.mass,
                is_cue,
                kind,
            )
        })
        .collect();

    let cue_count = balls.iter().filter(|b| b.is_cue).count();
    if cue_count != 1 {
        return Err(ConfigError::CueBallCount(cue_count));
    }

    Ok(GameConfig { table, balls })
}
