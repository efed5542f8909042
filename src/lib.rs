//! Math Fish - a number-bubble feeding puzzle
//!
//! Core modules:
//! - `sim`: Deterministic puzzle core (reachability, repair, spawning, board state)
//! - `settings`: Session configuration (operation, number ceiling)
//! - `error`: Board operation errors
//! - `wasm`: Browser bindings (wasm32 only)

pub mod error;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{BoardError, Result};
pub use settings::Settings;
pub use sim::{Board, Operation, Session};

/// Game configuration constants
pub mod consts {
    /// Smallest allowed number ceiling
    pub const MIN_MAX_NUMBER: u32 = 1;
    /// Largest allowed number ceiling
    pub const MAX_MAX_NUMBER: u32 = 50;
    /// Default number ceiling (fish numbers 1-10 in the classic game)
    pub const DEFAULT_MAX_NUMBER: u32 = 10;

    /// Bubbles placed on a fresh board
    pub const INITIAL_BUBBLES: usize = 8;

    /// Score for eating a bubble is the target times this
    pub const EAT_SCORE_MULTIPLIER: u64 = 2;

    /// Fish size at the start of a run
    pub const FISH_START_SIZE: u32 = 10;
    /// Fish size that ends the run
    pub const FISH_MAX_SIZE: u32 = 30;
    /// Eats needed before the fish grows one size
    pub const EATS_PER_GROWTH: u32 = 5;

    /// Play time limit in seconds (10 minutes)
    pub const SESSION_TIME_LIMIT_SECS: f32 = 600.0;
}
