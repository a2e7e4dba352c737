//! Bad Sky Cab entry point
//!
//! Native builds run a headless session with a simple autopilot and print
//! the final snapshot. The browser build enters through `wasm::wasm_main`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bad_sky_cab::{MemoryHighScore, SimConfig, Simulation};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5_000);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(clock_seed);

    log::info!("Bad Sky Cab (native) starting: {} ticks, seed {}", ticks, seed);

    let mut sim = Simulation::new(SimConfig::default().with_seed(seed), MemoryHighScore::new());
    sim.start();

    let mut last = sim.snapshot();
    for _ in 0..ticks {
        autopilot::steer(&mut sim);
        last = sim.tick();
        if last.game_over {
            break;
        }
    }

    match serde_json::to_string_pretty(&last) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use bad_sky_cab::sim::{Direction, GameState};
    use bad_sky_cab::{HighScoreStore, Simulation};

    /// How far ahead of the cab obstacles are considered
    const LOOKAHEAD: f32 = 220.0;
    /// Cruising x position
    const HOME_X: f32 = 75.0;

    /// Dodge vertically around the nearest threat and drift back home on x
    pub fn steer<S: HighScoreStore>(sim: &mut Simulation<S>) {
        let (up, down, left, right) = decide(sim.state());
        sim.set_intent(Direction::Up, up);
        sim.set_intent(Direction::Down, down);
        sim.set_intent(Direction::Left, left);
        sim.set_intent(Direction::Right, right);
    }

    fn decide(state: &GameState) -> (bool, bool, bool, bool) {
        let cab = &state.player;
        let (top, bottom) = (cab.pos.y, cab.pos.y + cab.size.y);

        let threat = state
            .field
            .live_obstacles()
            .filter(|o| {
                o.pos.x + o.size.x > cab.pos.x - 40.0 && o.pos.x < cab.pos.x + cab.size.x + LOOKAHEAD
            })
            .filter(|o| o.pos.y < bottom + 10.0 && o.pos.y + o.size.y > top - 10.0)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

        let (mut up, mut down) = (false, false);
        if let Some(o) = threat {
            let clear_above = o.pos.y - cab.size.y - 5.0;
            let clear_below = o.pos.y + o.size.y + 5.0;
            // prefer whichever gap is closer and still on screen
            let go_up = (clear_above > 0.0
                && (top - clear_above).abs() <= (clear_below - top).abs())
                || clear_below + cab.size.y > state.bounds.height;
            up = go_up;
            down = !go_up;
        } else if bottom > state.bounds.height * 0.6 {
            up = true;
        } else if top < state.bounds.height * 0.2 {
            down = true;
        }

        let left = cab.pos.x > HOME_X + 20.0;
        let right = cab.pos.x < HOME_X - 20.0;
        (up, down, left, right)
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
