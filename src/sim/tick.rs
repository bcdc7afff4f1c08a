//! Fixed timestep simulation tick
//!
//! Core game loop that advances the table deterministically. The host
//! calls [`tick`] once per ~17 ms frame; everything else (shots, undo,
//! reset) arrives between ticks through [`GameState`] methods.

use super::collision::{ball_ball_collision, bounding_contact, wall_bounce};
use super::state::GameState;
use crate::consts::*;

/// Advance the game state by one fixed timestep.
///
/// Per-ball order: queued shot, Euler integration, pocket capture, wall
/// bounce, friction, pairwise collisions. Once the win latch is set the
/// call is an idempotent no-op — physics and the clock both freeze.
pub fn tick(state: &mut GameState) {
    if state.is_won() {
        return;
    }

    // Win check runs before any ball moves: every non-cue ball gone
    let total = state.balls.len();
    let inactive = state.balls.iter().filter(|b| !b.active).count();
    if total > 0 && inactive == total - 1 {
        log::info!("table cleared, final score {}", state.score);
        state.latch_win();
        return;
    }

    // Snapshots may only be taken from the settled state, judged before
    // anything moves this tick
    let settled = state.is_settled();

    state.time_ticks += 1;

    let width = state.table.width as f32;
    let height = state.table.height as f32;
    let friction = state.table.friction;

    for i in 0..state.balls.len() {
        if !state.balls[i].active {
            continue;
        }

        // A queued shot lands on the cue ball. The pre-shot resting state
        // is what undo will restore, so capture it first.
        if state.balls[i].is_cue {
            if let Some(drag) = state.take_pending_shot() {
                if settled {
                    state.save_snapshot();
                }
                state.balls[i].set_vel(drag * FORCE_FACTOR);
                log::debug!("shot applied, cue velocity {:?}", state.balls[i].vel());
            }
        }

        // Euler step
        let vel = state.balls[i].vel();
        state.balls[i].pos += vel;

        resolve_pocket_capture(state, i);
        if !state.balls[i].active {
            continue;
        }

        let ball = &state.balls[i];
        let (pos, vel) = wall_bounce(ball.pos, ball.vel(), ball.radius, width, height);
        state.balls[i].pos = pos;
        state.balls[i].set_vel(vel);

        // Friction every tick; components close enough to rest snap to
        // zero so the table can settle
        let mut vel = state.balls[i].vel() * friction;
        if vel.x.abs() < STOP_EPSILON {
            vel.x = 0.0;
        }
        if vel.y.abs() < STOP_EPSILON {
            vel.y = 0.0;
        }
        state.balls[i].set_vel(vel);

        // Pairwise collisions against every other active ball, including
        // balls already processed this tick
        for j in 0..state.balls.len() {
            if j == i || !state.balls[j].active {
                continue;
            }

            let (a, b) = (&state.balls[i], &state.balls[j]);
            if !bounding_contact(a.pos, a.radius, b.pos, b.radius) {
                continue;
            }

            if let Some((va, vb)) =
                ball_ball_collision(a.pos, a.vel(), a.mass, b.pos, b.vel(), b.mass, false)
            {
                state.balls[i].set_vel(va);
                state.balls[j].set_vel(vb);
            }
        }
    }
}

/// Test the ball against each pocket in order; the first capture wins and
/// no further pockets are checked this tick.
fn resolve_pocket_capture(state: &mut GameState, i: usize) {
    let captured = state
        .table
        .pockets
        .iter()
        .any(|p| p.captures(state.balls[i].pos));
    if !captured {
        return;
    }

    if state.balls[i].is_cue {
        // The only way the cue ball ever "leaves" the table
        log::info!("cue ball pocketed, resetting the table");
        state.reset_table();
        return;
    }

    if state.balls[i].policy.capture() {
        remove_ball(state, i);
        return;
    }

    // Survived: back to the start anchor with a life gone
    state.balls[i].respawn();

    // Contention: every other active ball crowding the anchor costs one
    // more life, possibly cascading to removal in the same tick
    let anchor = state.balls[i].pos;
    for j in 0..state.balls.len() {
        if j == i || !state.balls[j].active {
            continue;
        }
        if state.balls[j].pos.distance(anchor) < CONTEST_RADIUS
            && state.balls[i].policy.capture()
        {
            remove_ball(state, i);
            return;
        }
    }
}

/// Permanently deactivate the ball and bank its colour score
fn remove_ball(state: &mut GameState, i: usize) {
    state.balls[i].active = false;
    let points = state.balls[i].colour.score();
    state.score += points;
    log::info!(
        "{} ball removed, +{points} (score {})",
        state.balls[i].colour,
        state.score
    );
}
