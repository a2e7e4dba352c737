//! WebAssembly bindings
//!
//! Exposes the simulation to the page through the same surface the JS build
//! uses, so a harness can drive either one frame by frame. Snapshots cross
//! the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::config::SimConfig;
use crate::highscores::LocalStorageHighScore;
use crate::simulation::Simulation;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second init (module re-instantiated on the same page) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Bad Sky Cab (wasm) loaded");
}

/// Handle owned by the page
#[wasm_bindgen]
pub struct SimulationHandle {
    inner: Simulation<LocalStorageHighScore>,
}

#[wasm_bindgen]
impl SimulationHandle {
    /// Build with default config, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> SimulationHandle {
        Self::build(SimConfig::default())
    }

    /// Build from a JSON config (camelCase keys, all optional)
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<SimulationHandle, JsValue> {
        let config = SimConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> SimulationHandle {
        let config = match config.seed {
            Some(_) => config,
            None => {
                let seed = js_sys::Date::now() as u64;
                config.with_seed(seed)
            }
        };
        SimulationHandle {
            inner: Simulation::new(config, LocalStorageHighScore),
        }
    }

    /// Advance one tick and return the snapshot as JSON
    pub fn tick(&mut self) -> String {
        let snapshot = self.inner.tick();
        snapshot.to_json().unwrap_or_else(|e| {
            log::error!("Failed to serialize snapshot: {}", e);
            "{}".to_string()
        })
    }

    /// Current snapshot as JSON without advancing
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.inner.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// `direction` is one of up/down/left/right (or arrow/WASD key names)
    #[wasm_bindgen(js_name = setIntent)]
    pub fn set_intent(&mut self, direction: &str, pressed: bool) {
        self.inner.set_intent_named(direction, pressed);
    }

    #[wasm_bindgen(js_name = setSpeaker)]
    pub fn set_speaker(&mut self, on: bool) {
        self.inner.set_speaker(on);
    }

    #[wasm_bindgen(js_name = toggleSpeaker)]
    pub fn toggle_speaker(&mut self) -> bool {
        self.inner.toggle_speaker()
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = returnToMenu)]
    pub fn return_to_menu(&mut self) {
        self.inner.return_to_menu();
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> f64 {
        self.inner.state().score.score as f64
    }

    #[wasm_bindgen(js_name = getHighScore)]
    pub fn get_high_score(&self) -> Option<f64> {
        self.inner.high_score().map(|s| s as f64)
    }
}

impl Default for SimulationHandle {
    fn default() -> Self {
        Self::new()
    }
}
