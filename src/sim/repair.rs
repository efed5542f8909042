//! Deficiency repair
//!
//! When the board can no longer reach the target, pick one value to add that
//! makes it reachable again. The target itself is never handed out while a
//! smaller building block would do, since the player is meant to build it.

use super::operation::Operation;
use super::oracle::{reachable, reachable_with};

/// Fallback when no addition candidate helps
pub const ADDITIVE_FALLBACK: u32 = 1;

/// Value to insert so that `target` becomes reachable.
///
/// Callers check reachability first; on an already-solvable board the result
/// is still a valid value but carries no meaning.
pub fn repair(target: u32, values: &[u32], operation: Operation, ceiling: u32) -> u32 {
    let found = match operation {
        Operation::Addition => {
            (1..target).find(|&candidate| reachable_with(target, values, candidate, operation))
        }
        Operation::Multiplication => divisors(target)
            .into_iter()
            .filter(|&d| d != target && d <= ceiling)
            .find(|&candidate| reachable_with(target, values, candidate, operation)),
    };

    match found {
        Some(value) => {
            log::debug!("repair {} for target {} over {:?}", value, target, values);
            value
        }
        None => {
            let fallback = fallback_value(target, operation);
            log::warn!(
                "no single {} repair for target {} over {:?}, falling back to {}",
                operation.as_str(),
                target,
                values,
                fallback
            );
            fallback
        }
    }
}

/// Run the oracle and, if the board is stuck, return the value to add
pub fn ensure_reachable(
    target: u32,
    values: &[u32],
    operation: Operation,
    ceiling: u32,
) -> Option<u32> {
    if reachable(target, values, operation) {
        None
    } else {
        Some(repair(target, values, operation, ceiling))
    }
}

/// Safe value handed out when nothing better exists
pub fn fallback_value(target: u32, operation: Operation) -> u32 {
    match operation {
        Operation::Addition => ADDITIVE_FALLBACK,
        Operation::Multiplication => {
            if target > 2 {
                2
            } else {
                1
            }
        }
    }
}

/// All divisors of `n`, ascending
pub fn divisors(n: u32) -> Vec<u32> {
    let mut out = Vec::new();
    let mut i = 1u32;
    while i.saturating_mul(i) <= n {
        if n % i == 0 {
            out.push(i);
            if i != n / i {
                out.push(n / i);
            }
        }
        i += 1;
    }
    out.sort_unstable();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_divisors() {
        assert_eq!(divisors(1), vec![1]);
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(36), vec![1, 2, 3, 4, 6, 9, 12, 18, 36]);
        assert_eq!(divisors(13), vec![1, 13]);
        assert!(divisors(0).is_empty());
    }

    #[test]
    fn test_addition_repair_picks_smallest_fix() {
        // A second 2 completes 6 + 2 + 2 before 4 is tried
        assert_eq!(repair(10, &[6, 2], Operation::Addition, 10), 2);
        assert!(reachable_with(10, &[6, 2], 2, Operation::Addition));
        assert_eq!(repair(7, &[5], Operation::Addition, 10), 2);
    }

    #[test]
    fn test_addition_repair_never_returns_target() {
        // Only the target itself would work
        let value = repair(10, &[], Operation::Addition, 10);
        assert_eq!(value, ADDITIVE_FALLBACK);
        assert_ne!(value, 10);
    }

    #[test]
    fn test_multiplication_repair() {
        assert_eq!(repair(12, &[4], Operation::Multiplication, 10), 3);
        assert_eq!(repair(12, &[2, 2], Operation::Multiplication, 10), 3);
        // 24 needs a 6 beside 4, but a ceiling of 5 forbids it
        assert_eq!(repair(24, &[4], Operation::Multiplication, 5), 2);
        assert_eq!(repair(2, &[5], Operation::Multiplication, 10), 1);
    }

    #[test]
    fn test_ensure_reachable() {
        assert_eq!(ensure_reachable(10, &[6, 4], Operation::Addition, 10), None);
        assert_eq!(ensure_reachable(10, &[6], Operation::Addition, 10), Some(4));
        assert_eq!(ensure_reachable(12, &[3, 4], Operation::Multiplication, 10), None);
        assert_eq!(ensure_reachable(12, &[3], Operation::Multiplication, 10), Some(4));
    }

    /// Some non-target single insertion makes the target reachable
    fn has_non_target_fix(target: u32, values: &[u32], operation: Operation, ceiling: u32) -> bool {
        (1..=ceiling.max(target))
            .filter(|&c| c != target)
            .any(|c| reachable_with(target, values, c, operation))
    }

    proptest! {
        #[test]
        fn addition_repair_is_self_consistent(
            target in 2u32..40,
            values in prop::collection::vec(1u32..40, 1..8),
        ) {
            let operation = Operation::Addition;
            prop_assume!(!reachable(target, &values, operation));
            let value = repair(target, &values, operation, 50);
            if has_non_target_fix(target, &values, operation, 50) {
                prop_assert_ne!(value, target);
                prop_assert!(reachable_with(target, &values, value, operation));
            } else {
                prop_assert_eq!(value, ADDITIVE_FALLBACK);
            }
        }

        #[test]
        fn multiplication_repair_is_self_consistent(
            target in 2u32..50,
            values in prop::collection::vec(1u32..12, 1..8),
        ) {
            let operation = Operation::Multiplication;
            prop_assume!(!reachable(target, &values, operation));
            let value = repair(target, &values, operation, 50);
            prop_assert_ne!(value, target);
            // Any helpful single value must be a divisor, so the divisor scan finds one
            if has_non_target_fix(target, &values, operation, 50) {
                prop_assert!(reachable_with(target, &values, value, operation));
            }
        }
    }
}
