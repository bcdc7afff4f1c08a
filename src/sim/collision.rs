//! Collision detection and response
//!
//! Pairwise ball impacts use a 1D projection impulse model: both velocities
//! are projected onto the line of centres and exchange momentum along it.
//! Contact detection is a bounding-box overlap test, not a circle-circle
//! distance test; together with the separating-pair early-out this is the
//! exact behavior the game is tuned around, so neither may be "improved".

use glam::Vec2;

/// Contact test: axis-aligned bounding boxes of the two balls overlap.
/// Deliberately coarser than a circular test.
pub fn bounding_contact(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    (pos_a.x - pos_b.x).abs() < reach && (pos_a.y - pos_b.y).abs() < reach
}

/// Resolve an impact between two balls, returning their new velocities.
///
/// Velocities are projected onto the unit vector from B to A. A pair that
/// is already separating (vB ≤ 0 and vA ≥ 0) is left unchanged unless this
/// is a cue-strike context — re-entrant contact across consecutive ticks
/// would otherwise bounce twice. Returns `None` when the centres coincide
/// and no direction exists.
pub fn ball_ball_collision(
    pos_a: Vec2,
    vel_a: Vec2,
    mass_a: f32,
    pos_b: Vec2,
    vel_b: Vec2,
    mass_b: f32,
    cue_strike: bool,
) -> Option<(Vec2, Vec2)> {
    let dir = (pos_a - pos_b).try_normalize()?;

    // How direct the impact is for each ball
    let v_a = dir.dot(vel_a);
    let v_b = dir.dot(vel_b);

    if v_b <= 0.0 && v_a >= 0.0 && !cue_strike {
        return Some((vel_a, vel_b));
    }

    let p = 2.0 * (v_a - v_b) / (mass_a + mass_b);

    Some((vel_a - dir * p * mass_b, vel_b + dir * p * mass_a))
}

/// Axis-aligned wall bounce against a `width` × `height` table.
///
/// Each of the four edges is tested independently, so a corner hit inverts
/// both axes in the same tick. Position is clamped to the boundary minus
/// the ball radius.
pub fn wall_bounce(pos: Vec2, vel: Vec2, radius: f32, width: f32, height: f32) -> (Vec2, Vec2) {
    let (mut pos, mut vel) = (pos, vel);

    if pos.x + radius > width {
        pos.x = width - radius;
        vel.x = -vel.x;
    }
    if pos.x - radius < 0.0 {
        pos.x = radius;
        vel.x = -vel.x;
    }
    if pos.y + radius > height {
        pos.y = height - radius;
        vel.y = -vel.y;
    }
    if pos.y - radius < 0.0 {
        pos.y = radius;
        vel.y = -vel.y;
    }

    (pos, vel)
}
