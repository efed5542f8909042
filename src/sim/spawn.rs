//! Spawn strategist
//!
//! Decides which numbers appear on the board: the fish targets, the opening
//! bubbles, and the replacement bubble after every eat. Every path runs the
//! repair step first, then picks something useful with weighted randomness.
//! The target itself is never spawned, so the player always has to build it.

use rand::Rng;
use rand::seq::SliceRandom;

use super::operation::Operation;
use super::oracle::reachable_with;
use super::repair::{ADDITIVE_FALLBACK, divisors, ensure_reachable};

/// Chance of re-spawning an existing value that can double toward the target
pub const DOUBLING_CHANCE: f64 = 0.5;
/// Chance of spawning a divisor of the target in multiplication mode
pub const DIVISOR_CHANCE: f64 = 0.6;
/// Range for undirected multiplication spawns (capped by the ceiling)
pub const RANDOM_FACTOR_MIN: u32 = 2;
pub const RANDOM_FACTOR_MAX: u32 = 9;

/// Values to add to the board for one spawn event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPlan {
    /// Corrective value, present only if the board was stuck
    pub repair: Option<u32>,
    /// The new bubble proper
    pub value: u32,
}

/// Plan the bubbles to add after a merge or an eat.
///
/// The useful value is chosen against the board as it stands after the
/// repair value (if any) has been added.
pub fn plan_spawn(
    target: u32,
    values: &[u32],
    operation: Operation,
    ceiling: u32,
    rng: &mut impl Rng,
) -> SpawnPlan {
    let repair = ensure_reachable(target, values, operation, ceiling);

    let mut board = values.to_vec();
    board.extend(repair);

    let value = match operation {
        Operation::Addition => useful_addend(target, &board, rng),
        Operation::Multiplication => useful_factor(target, &board, ceiling, rng),
    };

    log::debug!(
        "spawn plan for target {}: repair {:?}, value {}",
        target,
        repair,
        value
    );

    SpawnPlan { repair, value }
}

/// The next bubble value to spawn (see [`plan_spawn`])
pub fn next_value(
    target: u32,
    values: &[u32],
    operation: Operation,
    ceiling: u32,
    rng: &mut impl Rng,
) -> u32 {
    plan_spawn(target, values, operation, ceiling, rng).value
}

/// Opening multiset for a fresh board (before the repair pass)
pub fn initial_values(
    target: u32,
    operation: Operation,
    ceiling: u32,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<u32> {
    match operation {
        Operation::Addition => {
            if target < 2 {
                return Vec::new();
            }
            (0..count).map(|_| rng.random_range(1..target)).collect()
        }
        Operation::Multiplication => {
            let mut values = Vec::with_capacity(count);
            if count >= 2 {
                let pairs = factor_pairs(target, ceiling);
                if let Some((a, b)) = pick(&pairs, rng) {
                    values.push(a);
                    values.push(b);
                }
            }
            let factors = factor_candidates(target, ceiling);
            while values.len() < count {
                let value = if !factors.is_empty() && rng.random_bool(DIVISOR_CHANCE) {
                    pick(&factors, rng).unwrap_or(1)
                } else {
                    random_factor(target, ceiling, rng)
                };
                values.push(value);
            }
            values.shuffle(rng);
            values
        }
    }
}

/// Roll a fish number for the given mode.
///
/// Addition targets start at 2 so that they can be built from smaller
/// bubbles. Multiplication targets are composites with a factor pair inside
/// the ceiling. Ranges with no such number fall back to `max_number`.
pub fn roll_target(operation: Operation, max_number: u32, rng: &mut impl Rng) -> u32 {
    let max_number = max_number.max(1);
    let candidates: Vec<u32> = match operation {
        Operation::Addition => (2..=max_number).collect(),
        Operation::Multiplication => (4..=max_number)
            .filter(|&n| !factor_pairs(n, max_number).is_empty())
            .collect(),
    };
    pick(&candidates, rng).unwrap_or(max_number)
}

/// Divisors of `target` other than itself, within the ceiling
pub fn factor_candidates(target: u32, ceiling: u32) -> Vec<u32> {
    divisors(target)
        .into_iter()
        .filter(|&d| d != target && d <= ceiling)
        .collect()
}

/// Non-trivial `(a, b)` with `a * b == target`, `a <= b`, both within the ceiling
pub fn factor_pairs(target: u32, ceiling: u32) -> Vec<(u32, u32)> {
    divisors(target)
        .into_iter()
        .filter(|&a| a > 1 && a < target)
        .map(|a| (a, target / a))
        .filter(|&(a, b)| a <= b && b <= ceiling)
        .collect()
}

fn useful_addend(target: u32, values: &[u32], rng: &mut impl Rng) -> u32 {
    let doubling = values
        .iter()
        .copied()
        .find(|&v| v < target && v.saturating_add(v) <= target);
    if let Some(value) = doubling {
        if rng.random_bool(DOUBLING_CHANCE) {
            return value;
        }
    }

    let helpful: Vec<u32> = (1..target)
        .filter(|&candidate| reachable_with(target, values, candidate, Operation::Addition))
        .collect();
    pick(&helpful, rng).unwrap_or(ADDITIVE_FALLBACK)
}

fn useful_factor(target: u32, values: &[u32], ceiling: u32, rng: &mut impl Rng) -> u32 {
    let factors = factor_candidates(target, ceiling);
    let candidate = if !factors.is_empty() && rng.random_bool(DIVISOR_CHANCE) {
        pick(&factors, rng).unwrap_or(1)
    } else {
        random_factor(target, ceiling, rng)
    };

    if reachable_with(target, values, candidate, Operation::Multiplication) {
        candidate
    } else {
        log::warn!(
            "spawn {} leaves target {} unreachable over {:?}, using 1",
            candidate,
            target,
            values
        );
        1
    }
}

/// Undirected factor from the small range, never the target
fn random_factor(target: u32, ceiling: u32, rng: &mut impl Rng) -> u32 {
    let high = RANDOM_FACTOR_MAX.min(ceiling);
    let options: Vec<u32> = (RANDOM_FACTOR_MIN..=high).filter(|&v| v != target).collect();
    pick(&options, rng).unwrap_or(1)
}

fn pick<T: Copy>(items: &[T], rng: &mut impl Rng) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.random_range(0..items.len())])
    }
}
