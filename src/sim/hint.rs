//! Move suggestions
//!
//! Turns an oracle witness into a concrete action on the board. Used by the
//! autoplay demo and by the browser hint button.

use serde::{Deserialize, Serialize};

use super::oracle::find_combination;
use super::state::{Board, BubbleId};

/// A player (or autoplay) action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Let the fish eat this bubble
    Eat(BubbleId),
    /// Merge these two bubbles
    Merge(BubbleId, BubbleId),
}

/// Suggest the next move, or `None` if the board is stuck.
///
/// Eating beats merging. Merges pick two bubbles from a witness combination,
/// so the merged value stays part of a solution.
pub fn suggest_move(board: &Board) -> Option<Move> {
    if let Some(id) = board.edible() {
        return Some(Move::Eat(id));
    }

    let witness = find_combination(board.target(), &board.values(), board.operation())?;
    if witness.len() < 2 {
        return None;
    }

    let mut used: Vec<BubbleId> = Vec::with_capacity(2);
    for &value in witness.iter().take(2) {
        let bubble = board
            .bubbles()
            .iter()
            .find(|b| b.value == value && !used.contains(&b.id))?;
        used.push(bubble.id);
    }
    Some(Move::Merge(used[0], used[1]))
}
