//! Browser bindings
//!
//! The page owns rendering, audio and input; it drives a `FishGame` and
//! reads back plain JS objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{Bubble, GamePhase, Move, Operation, Session};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Math Fish core loaded");
}

#[derive(Serialize)]
struct StateView<'a> {
    operation: &'static str,
    symbol: char,
    target: u32,
    score: u64,
    fish_size: u32,
    fish_eaten: u32,
    fish_scale: f32,
    phase: GamePhase,
    solvable: bool,
    elapsed_secs: f32,
    bubbles: &'a [Bubble],
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {e}")))
}

fn err_to_js(e: crate::BoardError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct FishGame {
    session: Session,
}

#[wasm_bindgen]
impl FishGame {
    /// Start a session; `operation` is "addition" or "multiplication"
    #[wasm_bindgen(constructor)]
    pub fn new(operation: &str, max_number: u32) -> FishGame {
        let operation = Operation::from_str(operation).unwrap_or_else(|| {
            log::warn!("Unknown operation {:?}, using addition", operation);
            Operation::Addition
        });
        let seed = js_sys::Date::now() as u64;
        FishGame {
            session: Session::new(Settings::new(operation, max_number), seed),
        }
    }

    /// Start from settings JSON as stored in LocalStorage
    pub fn from_settings_json(json: &str, seed: u64) -> FishGame {
        FishGame {
            session: Session::new(Settings::from_json(json), seed),
        }
    }

    pub fn merge(&mut self, a: u32, b: u32) -> Result<JsValue, JsValue> {
        let outcome = self.session.merge(a, b).map_err(err_to_js)?;
        to_js(&outcome.merged)
    }

    /// Feed bubble `id` to the fish
    pub fn feed(&mut self, id: u32) -> Result<JsValue, JsValue> {
        let outcome = self.session.feed(id).map_err(err_to_js)?;
        to_js(&outcome.spawn.spawned)
    }

    pub fn spawn_one(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.session.spawn_one().map_err(err_to_js)?;
        to_js(&outcome.spawned)
    }

    pub fn is_solvable(&self) -> bool {
        self.session.is_solvable()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase == GamePhase::GameOver
    }

    /// Advance play time by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.session.tick(dt);
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.session.restart(js_sys::Date::now() as u64);
    }

    /// Suggested move as `{Eat: id}` / `{Merge: [a, b]}`, or null
    pub fn hint(&self) -> Result<JsValue, JsValue> {
        match self.session.hint() {
            Some(m) => to_js::<Move>(&m),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn state_view(&self) -> Result<JsValue, JsValue> {
        let s = &self.session;
        to_js(&StateView {
            operation: s.operation().as_str(),
            symbol: s.operation().symbol(),
            target: s.fish.number,
            score: s.score(),
            fish_size: s.fish.size,
            fish_eaten: s.fish.eaten,
            fish_scale: s.fish.scale(),
            phase: s.phase,
            solvable: s.is_solvable(),
            elapsed_secs: s.elapsed_secs,
            bubbles: s.board.bubbles(),
        })
    }

    /// Events since the last call, for sounds and effects
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.drain_events())
    }

    /// Serialized session for save/continue
    pub fn save_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session)
            .map_err(|e| JsValue::from_str(&format!("Failed to save: {e}")))
    }

    pub fn load_json(json: &str) -> Result<FishGame, JsValue> {
        let session: Session = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Failed to load: {e}")))?;
        log::info!("Loaded session at score {}", session.score());
        Ok(FishGame { session })
    }
}
