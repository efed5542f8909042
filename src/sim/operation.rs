//! Arithmetic mode shared by every board in a session

use serde::{Deserialize, Serialize};

/// How two bubbles combine when merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Operation {
    #[default]
    Addition,
    Multiplication,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Multiplication => "Multiplication",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "addition" | "add" | "+" => Some(Operation::Addition),
            "multiplication" | "mul" | "multiply" | "*" | "x" => Some(Operation::Multiplication),
            _ => None,
        }
    }

    /// Operator glyph for display
    pub fn symbol(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Multiplication => '×',
        }
    }

    /// Combine two bubble values (saturating)
    #[inline]
    pub fn combine(&self, a: u32, b: u32) -> u32 {
        match self {
            Operation::Addition => a.saturating_add(b),
            Operation::Multiplication => a.saturating_mul(b),
        }
    }

    /// Score awarded for producing `combined` by a merge.
    ///
    /// Products climb much faster than sums, so multiplication pays half
    /// (rounded up, never zero).
    pub fn merge_score(&self, combined: u32) -> u64 {
        let combined = u64::from(combined);
        match self {
            Operation::Addition => combined,
            Operation::Multiplication => combined.div_ceil(2).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        assert_eq!(Operation::Addition.combine(3, 4), 7);
        assert_eq!(Operation::Multiplication.combine(3, 4), 12);
        assert_eq!(Operation::Multiplication.combine(u32::MAX, 2), u32::MAX);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Operation::from_str("ADD"), Some(Operation::Addition));
        assert_eq!(Operation::from_str("multiplication"), Some(Operation::Multiplication));
        assert_eq!(Operation::from_str("division"), None);
        assert_eq!(
            Operation::from_str(Operation::Multiplication.as_str()),
            Some(Operation::Multiplication)
        );
    }

    #[test]
    fn test_merge_score() {
        assert_eq!(Operation::Addition.merge_score(9), 9);
        assert_eq!(Operation::Multiplication.merge_score(12), 6);
        assert_eq!(Operation::Multiplication.merge_score(9), 5);
        assert_eq!(Operation::Multiplication.merge_score(1), 1);
    }
}
