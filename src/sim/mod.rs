//! Deterministic puzzle core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by bubble ID)
//! - No rendering or platform dependencies

pub mod hint;
pub mod operation;
pub mod oracle;
pub mod repair;
pub mod session;
pub mod spawn;
pub mod state;

pub use hint::{Move, suggest_move};
pub use operation::Operation;
pub use oracle::{find_combination, reachable};
pub use repair::{divisors, ensure_reachable, repair};
pub use session::{Fish, GameEvent, GameOverReason, GamePhase, Session};
pub use spawn::{SpawnPlan, initial_values, next_value, plan_spawn, roll_target};
pub use state::{Board, Bubble, BubbleId, ConsumeOutcome, MergeOutcome, SpawnOutcome};
