//! Game session
//!
//! One run of the game: the fish, its board, the phase, play time and the
//! event queue the presentation layer drains for sounds and effects.
//! All randomness comes from the session seed, so a run replays exactly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hint::{Move, suggest_move};
use super::operation::Operation;
use super::spawn::roll_target;
use super::state::{Board, Bubble, BubbleId, ConsumeOutcome, MergeOutcome, SpawnOutcome};
use crate::consts::*;
use crate::error::{BoardError, Result};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting merges and eats
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The bubbles can no longer make the fish's number
    Unsolvable,
    /// The fish reached full size
    FishFullyGrown,
    /// Play time limit reached
    TimeUp,
}

/// Things that happened, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Merged {
        from: (BubbleId, BubbleId),
        bubble: Bubble,
    },
    Eaten {
        bubble: Bubble,
    },
    Spawned {
        bubble: Bubble,
    },
    /// Corrective bubble added to keep the board solvable
    Repaired {
        bubble: Bubble,
    },
    FishGrew {
        size: u32,
    },
    GameOver {
        reason: GameOverReason,
    },
}

/// The player's fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    /// Number the fish wants to eat
    pub number: u32,
    pub size: u32,
    /// Eats since the last growth
    pub eaten: u32,
}

impl Fish {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            size: FISH_START_SIZE,
            eaten: 0,
        }
    }

    /// Count one eat; returns the new size if the fish grew
    pub fn record_eat(&mut self) -> Option<u32> {
        self.eaten += 1;
        if self.eaten >= EATS_PER_GROWTH {
            self.eaten = 0;
            self.size += 1;
            Some(self.size)
        } else {
            None
        }
    }

    /// Render scale relative to the starting size
    pub fn scale(&self) -> f32 {
        1.0 + (self.size as f32 - FISH_START_SIZE as f32) * 0.05
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Random streams handed out so far
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Fresh generator for the next mutation; each call gets its own stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let stream = self.seed ^ self.draws.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.draws += 1;
        Pcg32::seed_from_u64(stream)
    }
}

/// Complete game session (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Clamped settings in force for this run
    pub settings: Settings,
    /// RNG state
    pub rng_state: RngState,
    pub fish: Fish,
    pub board: Board,
    pub phase: GamePhase,
    /// Seconds of unpaused play
    pub elapsed_secs: f32,
    /// Set once the run ends
    pub game_over_reason: Option<GameOverReason>,
    /// Pending events (newest last)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a run with a freshly rolled fish number
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.clamped();
        let mut rng_state = RngState::new(seed);
        let mut rng = rng_state.next_rng();
        let number = roll_target(settings.operation, settings.max_number, &mut rng);
        log::info!(
            "New {} session (seed {}), fish wants {}",
            settings.operation.as_str(),
            seed,
            number
        );
        Self::with_fish(settings, rng_state, number)
    }

    /// Start a run for a known fish number
    pub fn with_target(settings: Settings, seed: u64, number: u32) -> Self {
        Self::with_fish(settings.clamped(), RngState::new(seed), number.max(1))
    }

    fn with_fish(settings: Settings, mut rng_state: RngState, number: u32) -> Self {
        let board = Board::new(
            number,
            settings.operation,
            settings.max_number,
            &mut rng_state.next_rng(),
        );
        let mut session = Self {
            settings,
            rng_state,
            fish: Fish::new(number),
            board,
            phase: GamePhase::Playing,
            elapsed_secs: 0.0,
            game_over_reason: None,
            events: Vec::new(),
        };
        session.check_game_over();
        session
    }

    /// Restart the run, keeping the fish's number
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting with seed {} (fish keeps {})", seed, self.fish.number);
        *self = Self::with_fish(self.settings.clone(), RngState::new(seed), self.fish.number);
    }

    pub fn operation(&self) -> Operation {
        self.settings.operation
    }

    pub fn score(&self) -> u64 {
        self.board.score
    }

    pub fn is_solvable(&self) -> bool {
        self.board.is_solvable()
    }

    /// Merge two bubbles
    pub fn merge(&mut self, a: BubbleId, b: BubbleId) -> Result<MergeOutcome> {
        self.require_playing()?;
        let outcome = self.board.merge(a, b)?;
        self.events.push(GameEvent::Merged {
            from: (a, b),
            bubble: outcome.merged,
        });
        if let Some(bubble) = outcome.repaired {
            self.events.push(GameEvent::Repaired { bubble });
        }
        self.check_game_over();
        Ok(outcome)
    }

    /// Feed bubble `id` to the fish
    pub fn feed(&mut self, id: BubbleId) -> Result<ConsumeOutcome> {
        self.require_playing()?;
        let bubble = self.board.get(id).ok_or(BoardError::UnknownBubble(id))?;
        if bubble.value != self.board.target() {
            return Err(BoardError::NotEdible {
                id,
                value: bubble.value,
                target: self.board.target(),
            });
        }
        // Draw only for a valid eat so rejected feeds leave the RNG untouched
        let mut rng = self.rng_state.next_rng();
        let outcome = self.board.consume(id, &mut rng)?;
        self.events.push(GameEvent::Eaten {
            bubble: outcome.eaten,
        });
        self.push_spawn_events(outcome.spawn);

        if let Some(size) = self.fish.record_eat() {
            log::info!("Fish grew to size {}", size);
            self.events.push(GameEvent::FishGrew { size });
        }

        self.check_game_over();
        Ok(outcome)
    }

    /// Add one bubble on demand
    pub fn spawn_one(&mut self) -> Result<SpawnOutcome> {
        self.require_playing()?;
        let mut rng = self.rng_state.next_rng();
        let outcome = self.board.spawn_one(&mut rng);
        self.push_spawn_events(outcome);
        self.check_game_over();
        Ok(outcome)
    }

    /// Suggested next move for the current board
    pub fn hint(&self) -> Option<Move> {
        suggest_move(&self.board)
    }

    /// Apply one suggested move; returns it, or `None` if nothing applies
    pub fn autoplay_step(&mut self) -> Result<Option<Move>> {
        if self.phase != GamePhase::Playing {
            return Ok(None);
        }
        let Some(next) = self.hint() else {
            return Ok(None);
        };
        match next {
            Move::Eat(id) => {
                self.feed(id)?;
            }
            Move::Merge(a, b) => {
                self.merge(a, b)?;
            }
        }
        Ok(Some(next))
    }

    /// Advance play time by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.elapsed_secs += dt.max(0.0);
        self.check_game_over();
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn require_playing(&self) -> Result<()> {
        if self.phase == GamePhase::Playing {
            Ok(())
        } else {
            Err(BoardError::NotPlaying)
        }
    }

    fn push_spawn_events(&mut self, outcome: SpawnOutcome) {
        if let Some(bubble) = outcome.repaired {
            self.events.push(GameEvent::Repaired { bubble });
        }
        self.events.push(GameEvent::Spawned {
            bubble: outcome.spawned,
        });
    }

    fn check_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        let reason = if !self.board.is_solvable() {
            Some(GameOverReason::Unsolvable)
        } else if self.fish.size >= FISH_MAX_SIZE {
            Some(GameOverReason::FishFullyGrown)
        } else if self.elapsed_secs > SESSION_TIME_LIMIT_SECS {
            Some(GameOverReason::TimeUp)
        } else {
            None
        };

        if let Some(reason) = reason {
            log::info!(
                "Game over ({:?}): score {}, fish size {}",
                reason,
                self.board.score,
                self.fish.size
            );
            self.phase = GamePhase::GameOver;
            self.game_over_reason = Some(reason);
            self.events.push(GameEvent::GameOver { reason });
        }
    }
}
