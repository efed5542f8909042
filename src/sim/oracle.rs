//! Reachability oracle
//!
//! Answers one question: can some sub-multiset of the bubble values combine
//! into the fish's target under the session's operation?
//!
//! - Addition is 0/1 subset-sum over a boolean table `0..=target`, one
//!   backward pass per value so each bubble is used at most once.
//! - Multiplication is a depth-first search over divisors, memoized on
//!   `(remaining, sorted pool)`. Every level removes one value from the pool,
//!   so the search always terminates. The memo lives for a single query.

use std::collections::HashSet;

use super::operation::Operation;

/// Failed `(remaining target, sorted pool)` states of one product search
type DeadStates = HashSet<(u32, Vec<u32>)>;

/// True if some sub-multiset of `values` combines to `target`.
///
/// A multiset already holding `target` is always reachable.
pub fn reachable(target: u32, values: &[u32], operation: Operation) -> bool {
    if values.contains(&target) {
        return true;
    }
    match operation {
        Operation::Addition => reachable_sum(target, values),
        Operation::Multiplication => reachable_product(target, values),
    }
}

/// `reachable` with one extra value appended
pub fn reachable_with(target: u32, values: &[u32], extra: u32, operation: Operation) -> bool {
    if extra == target {
        return true;
    }
    let mut trial = Vec::with_capacity(values.len() + 1);
    trial.extend_from_slice(values);
    trial.push(extra);
    reachable(target, &trial, operation)
}

/// Subset-sum feasibility
pub fn reachable_sum(target: u32, values: &[u32]) -> bool {
    let target = target as usize;
    let mut reached = vec![false; target + 1];
    reached[0] = true;

    for &value in values {
        let v = value as usize;
        if v == 0 || v > target {
            continue;
        }
        for sum in (v..=target).rev() {
            if reached[sum - v] {
                reached[sum] = true;
            }
        }
        if reached[target] {
            return true;
        }
    }

    reached[target]
}

/// Subset-product feasibility
pub fn reachable_product(target: u32, values: &[u32]) -> bool {
    if target == 0 {
        return false;
    }
    let pool = factor_pool(target, values);
    let mut dead = DeadStates::new();
    let mut picked = Vec::new();
    search_product(target, &pool, &mut dead, &mut picked)
}

/// Find a sub-multiset of `values` that combines to `target`.
///
/// Returns the chosen values, or `None` when the target is unreachable.
/// The witness is empty only for `target == 0` under addition and
/// `target == 1` under multiplication.
pub fn find_combination(target: u32, values: &[u32], operation: Operation) -> Option<Vec<u32>> {
    if values.contains(&target) {
        return Some(vec![target]);
    }
    match operation {
        Operation::Addition => sum_witness(target, values),
        Operation::Multiplication => {
            if target == 0 {
                return None;
            }
            let pool = factor_pool(target, values);
            let mut dead = DeadStates::new();
            let mut picked = Vec::new();
            search_product(target, &pool, &mut dead, &mut picked).then_some(picked)
        }
    }
}

fn sum_witness(target: u32, values: &[u32]) -> Option<Vec<u32>> {
    let target = target as usize;
    let mut reached = vec![false; target + 1];
    // Index of the value that first reached each sum
    let mut via: Vec<Option<usize>> = vec![None; target + 1];
    reached[0] = true;

    for (idx, &value) in values.iter().enumerate() {
        let v = value as usize;
        if v == 0 || v > target {
            continue;
        }
        for sum in (v..=target).rev() {
            if reached[sum - v] && !reached[sum] {
                reached[sum] = true;
                via[sum] = Some(idx);
            }
        }
        if reached[target] {
            break;
        }
    }

    if !reached[target] {
        return None;
    }

    // Each step back lands on a sum reached by a strictly earlier value
    let mut picked = Vec::new();
    let mut sum = target;
    while sum > 0 {
        let idx = via[sum]?;
        picked.push(values[idx]);
        sum -= values[idx] as usize;
    }
    Some(picked)
}

/// Sorted values that can contribute a factor of `target`.
/// Ones never change a product, so they are left out.
fn factor_pool(target: u32, values: &[u32]) -> Vec<u32> {
    let mut pool: Vec<u32> = values
        .iter()
        .copied()
        .filter(|&v| v > 1 && target % v == 0)
        .collect();
    pool.sort_unstable();
    pool
}

fn search_product(
    remaining: u32,
    pool: &[u32],
    dead: &mut DeadStates,
    picked: &mut Vec<u32>,
) -> bool {
    if remaining == 1 {
        return true;
    }
    if pool.is_empty() {
        return false;
    }

    let key = (remaining, pool.to_vec());
    if dead.contains(&key) {
        return false;
    }

    let mut last_tried = None;
    for (i, &value) in pool.iter().enumerate() {
        // Equal values lead to identical subtrees
        if last_tried == Some(value) || remaining % value != 0 {
            continue;
        }
        last_tried = Some(value);

        let mut rest = pool.to_vec();
        rest.remove(i);
        picked.push(value);
        if search_product(remaining / value, &rest, dead, picked) {
            return true;
        }
        picked.pop();
    }

    dead.insert(key);
    false
}
