//! Pool Table entry point
//!
//! Headless demo driver: loads a level file, plays one shot, and runs the
//! simulation until the table settles. The real front end drives the same
//! engine surface (`tick`/`queue_shot`/`undo`/`reset`/`scene`) from its
//! own render loop.

use glam::Vec2;

use pool_table::config;
use pool_table::sim::tick;

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.json".to_string());

    let config = match config::load(&path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("cannot start: {err}");
            std::process::exit(1);
        }
    };

    let mut state = config.into_state();
    log::info!("Pool Table starting with level {path}");

    // One demo shot, then run the table to rest
    state.queue_shot(Vec2::new(150.0, 60.0));

    let mut ticks = 0u32;
    loop {
        tick(&mut state);
        ticks += 1;

        if state.is_won() {
            log::info!("won after {ticks} ticks");
            break;
        }
        if state.is_settled() {
            log::info!("table settled after {ticks} ticks");
            break;
        }
        if ticks >= 10_000 {
            log::warn!("giving up after {ticks} ticks without settling");
            break;
        }
    }

    let scene = state.scene();
    println!(
        "score {} after {:.1}s; {} of {} balls still on the table",
        scene.score,
        scene.elapsed.as_secs_f32(),
        scene.balls.iter().filter(|b| b.active).count(),
        scene.balls.len()
    );
}
