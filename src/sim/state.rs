//! Board state
//!
//! The live bubble multiset for one fish: values tagged with unique ids, the
//! target, the operation and the running score. Every merge and eat leaves
//! the board repaired, so `is_solvable` going false means the run is over.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::operation::Operation;
use super::oracle::reachable;
use super::repair::ensure_reachable;
use super::spawn::{initial_values, plan_spawn};
use crate::consts::*;
use crate::error::{BoardError, Result};

/// Unique bubble identifier within a board
pub type BubbleId = u32;

/// A numbered bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub value: u32,
}

/// Result of merging two bubbles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The combined bubble
    pub merged: Bubble,
    /// Score gained by the merge
    pub score: u64,
    /// Corrective bubble added if the merge left the board stuck
    pub repaired: Option<Bubble>,
}

/// Result of the fish eating a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeOutcome {
    /// The bubble that was eaten
    pub eaten: Bubble,
    /// Score gained by the eat
    pub score: u64,
    /// Replacement bubbles
    pub spawn: SpawnOutcome,
}

/// Bubbles added by one spawn event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub repaired: Option<Bubble>,
    pub spawned: Bubble,
}

/// Bubble multiset plus the rules it lives under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    target: u32,
    operation: Operation,
    ceiling: u32,
    /// Live bubbles (sorted by id)
    bubbles: Vec<Bubble>,
    /// Accumulated merge and eat score
    pub score: u64,
    /// Next bubble ID
    next_id: BubbleId,
}

impl Board {
    /// Create a board with an opening multiset from the spawn strategist,
    /// repaired once so it starts solvable.
    pub fn new(target: u32, operation: Operation, ceiling: u32, rng: &mut impl Rng) -> Self {
        let values = initial_values(target, operation, ceiling, INITIAL_BUBBLES, rng);
        let mut board = Self::with_values(target, operation, ceiling, &values);
        board.ensure_solvable();
        log::debug!(
            "new {} board for {}: {:?}",
            operation.as_str(),
            target,
            board.values()
        );
        board
    }

    /// Create a board holding exactly `values` (no repair pass)
    pub fn with_values(target: u32, operation: Operation, ceiling: u32, values: &[u32]) -> Self {
        let mut board = Self {
            target: target.max(1),
            operation,
            ceiling: ceiling.max(1),
            bubbles: Vec::with_capacity(values.len() + 2),
            score: 0,
            next_id: 1,
        };
        for &value in values {
            board.insert(value);
        }
        board
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Current values in id order
    pub fn values(&self) -> Vec<u32> {
        self.bubbles.iter().map(|b| b.value).collect()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn get(&self, id: BubbleId) -> Option<Bubble> {
        self.bubbles.iter().find(|b| b.id == id).copied()
    }

    /// Lowest-id bubble the fish can eat right now
    pub fn edible(&self) -> Option<BubbleId> {
        self.bubbles
            .iter()
            .find(|b| b.value == self.target)
            .map(|b| b.id)
    }

    /// Can the current bubbles still combine to the target?
    pub fn is_solvable(&self) -> bool {
        reachable(self.target, &self.values(), self.operation)
    }

    /// Merge two bubbles into one, then repair the board once.
    pub fn merge(&mut self, a: BubbleId, b: BubbleId) -> Result<MergeOutcome> {
        if a == b {
            return Err(BoardError::SelfMerge(a));
        }
        let first = self.get(a).ok_or(BoardError::UnknownBubble(a))?;
        let second = self.get(b).ok_or(BoardError::UnknownBubble(b))?;

        self.remove(a);
        self.remove(b);

        let combined = self.operation.combine(first.value, second.value);
        let merged = self.insert(combined);
        let score = self.operation.merge_score(combined);
        self.score += score;

        let repaired = self.ensure_solvable();

        Ok(MergeOutcome {
            merged,
            score,
            repaired,
        })
    }

    /// The fish eats bubble `id`; the board is replenished afterwards.
    pub fn consume(&mut self, id: BubbleId, rng: &mut impl Rng) -> Result<ConsumeOutcome> {
        let bubble = self.get(id).ok_or(BoardError::UnknownBubble(id))?;
        if bubble.value != self.target {
            return Err(BoardError::NotEdible {
                id,
                value: bubble.value,
                target: self.target,
            });
        }

        self.remove(id);
        let score = u64::from(self.target) * EAT_SCORE_MULTIPLIER;
        self.score += score;

        let spawn = self.spawn_one(rng);

        Ok(ConsumeOutcome {
            eaten: bubble,
            score,
            spawn,
        })
    }

    /// Repair if needed, then add one strategist-chosen bubble
    pub fn spawn_one(&mut self, rng: &mut impl Rng) -> SpawnOutcome {
        let plan = plan_spawn(
            self.target,
            &self.values(),
            self.operation,
            self.ceiling,
            rng,
        );
        let repaired = plan.repair.map(|value| self.insert(value));
        let spawned = self.insert(plan.value);
        SpawnOutcome { repaired, spawned }
    }

    /// Run the repair step once; returns the corrective bubble if one was added
    pub fn ensure_solvable(&mut self) -> Option<Bubble> {
        let value = ensure_reachable(self.target, &self.values(), self.operation, self.ceiling)?;
        let bubble = self.insert(value);
        log::debug!("board for {} repaired with {}", self.target, value);
        Some(bubble)
    }

    fn insert(&mut self, value: u32) -> Bubble {
        let bubble = Bubble {
            id: self.next_id,
            value,
        };
        self.next_id += 1;
        // Ids only grow, so pushing keeps the list sorted
        self.bubbles.push(bubble);
        bubble
    }

    fn remove(&mut self, id: BubbleId) -> Option<Bubble> {
        let idx = self.bubbles.iter().position(|b| b.id == id)?;
        Some(self.bubbles.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ids(board: &Board) -> Vec<BubbleId> {
        board.bubbles().iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_new_board_is_solvable() {
        let mut rng = Pcg32::seed_from_u64(12345);
        for target in 2..=20 {
            let board = Board::new(target, Operation::Addition, 20, &mut rng);
            assert!(board.is_solvable(), "target {}: {:?}", target, board.values());
            assert!(board.len() >= INITIAL_BUBBLES);
        }
        for target in [4, 6, 8, 9, 10, 12, 16, 18, 20] {
            let board = Board::new(target, Operation::Multiplication, 20, &mut rng);
            assert!(board.is_solvable(), "target {}: {:?}", target, board.values());
            assert!(!board.values().contains(&target));
        }
    }

    #[test]
    fn test_merge_addition() {
        let mut board = Board::with_values(10, Operation::Addition, 10, &[6, 4, 2]);
        let outcome = board.merge(1, 2).unwrap();
        assert_eq!(outcome.merged.value, 10);
        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.repaired, None);
        assert_eq!(board.values(), vec![2, 10]);
        assert_eq!(board.edible(), Some(outcome.merged.id));
    }

    #[test]
    fn test_merge_multiplication_scores_half() {
        let mut board = Board::with_values(12, Operation::Multiplication, 10, &[3, 4]);
        let outcome = board.merge(1, 2).unwrap();
        assert_eq!(outcome.merged.value, 12);
        assert_eq!(board.score, 6);
    }

    #[test]
    fn test_merge_overshoot_triggers_repair() {
        let mut board = Board::with_values(10, Operation::Addition, 10, &[6, 5, 4]);
        // 6 + 5 overshoots and strands the 4
        let outcome = board.merge(1, 2).unwrap();
        assert_eq!(outcome.merged.value, 11);
        let repaired = outcome.repaired.expect("board should have been repaired");
        assert_eq!(repaired.value, 6);
        assert!(board.is_solvable());
    }

    #[test]
    fn test_merge_errors() {
        let mut board = Board::with_values(10, Operation::Addition, 10, &[6, 4]);
        assert_eq!(board.merge(1, 1), Err(BoardError::SelfMerge(1)));
        assert_eq!(board.merge(1, 9), Err(BoardError::UnknownBubble(9)));
        // Failed merges leave the board untouched
        assert_eq!(ids(&board), vec![1, 2]);
        assert_eq!(board.score, 0);
    }

    #[test]
    fn test_consume_rejects_wrong_value() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut board = Board::with_values(10, Operation::Addition, 10, &[6, 4]);
        assert_eq!(
            board.consume(1, &mut rng),
            Err(BoardError::NotEdible {
                id: 1,
                value: 6,
                target: 10
            })
        );
        assert_eq!(board.consume(7, &mut rng), Err(BoardError::UnknownBubble(7)));
    }

    #[test]
    fn test_merge_then_eat_never_respawns_target() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut board = Board::with_values(10, Operation::Addition, 10, &[6, 4]);
        assert!(board.is_solvable());

        let merged = board.merge(1, 2).unwrap().merged;
        let outcome = board.consume(merged.id, &mut rng).unwrap();
        assert_eq!(outcome.eaten.value, 10);
        assert_eq!(outcome.score, 20);
        assert_eq!(board.score, 30);

        assert_ne!(outcome.spawn.spawned.value, 10);
        if let Some(repaired) = outcome.spawn.repaired {
            assert_ne!(repaired.value, 10);
        }
        assert!(!board.values().contains(&10));
    }

    #[test]
    fn test_addition_reduction_is_order_independent() {
        let values = [2, 3, 5];
        let mut left = Board::with_values(10, Operation::Addition, 10, &values);
        let ab = left.merge(1, 2).unwrap().merged;
        let left_final = left.merge(ab.id, 3).unwrap().merged;

        let mut right = Board::with_values(10, Operation::Addition, 10, &values);
        let bc = right.merge(2, 3).unwrap().merged;
        let right_final = right.merge(1, bc.id).unwrap().merged;

        // Both orders reduce to the same single bubble
        assert_eq!(left_final.value, 10);
        assert_eq!(right_final.value, 10);
        assert_eq!(left.values(), right.values());
    }

    #[test]
    fn test_addition_score_counts_every_intermediate() {
        let values = [2, 3, 5];
        let mut left = Board::with_values(10, Operation::Addition, 10, &values);
        let ab = left.merge(1, 2).unwrap().merged;
        left.merge(ab.id, 3).unwrap();

        let mut right = Board::with_values(10, Operation::Addition, 10, &values);
        let bc = right.merge(2, 3).unwrap().merged;
        right.merge(1, bc.id).unwrap();

        // Each merge scores its combined value, so the path matters
        assert_eq!(left.score, 5 + 10);
        assert_eq!(right.score, 8 + 10);
    }

    #[test]
    fn test_spawn_one_keeps_ids_sorted() {
        let mut rng = Pcg32::seed_from_u64(77);
        let mut board = Board::with_values(9, Operation::Addition, 10, &[2, 3]);
        for _ in 0..20 {
            let outcome = board.spawn_one(&mut rng);
            assert_ne!(outcome.spawned.value, 9);
        }
        let ids = ids(&board);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert!(board.is_solvable());
    }

    #[test]
    fn test_board_serializes() {
        let board = Board::with_values(8, Operation::Multiplication, 10, &[2, 4]);
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.values(), board.values());
        assert_eq!(restored.target(), 8);
        assert_eq!(restored.operation(), Operation::Multiplication);
    }
}
