//! Session settings
//!
//! Stored by the presentation layer (LocalStorage on web) and handed to the
//! core at session start. The core never mutates them mid-run.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Operation;

/// Smallest ceiling that still has a composite target for multiplication
pub const MIN_MULTIPLICATION_MAX_NUMBER: u32 = 4;

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// How bubbles combine
    #[serde(default)]
    pub operation: Operation,
    /// Highest fish number and largest spawned factor
    #[serde(default = "default_max_number")]
    pub max_number: u32,
}

fn default_max_number() -> u32 {
    DEFAULT_MAX_NUMBER
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            operation: Operation::Addition,
            max_number: DEFAULT_MAX_NUMBER,
        }
    }
}

impl Settings {
    pub fn new(operation: Operation, max_number: u32) -> Self {
        Self {
            operation,
            max_number,
        }
    }

    /// Clamp into the supported range (1-50, at least 4 for multiplication)
    pub fn clamped(&self) -> Self {
        let floor = match self.operation {
            Operation::Addition => MIN_MAX_NUMBER,
            Operation::Multiplication => MIN_MULTIPLICATION_MAX_NUMBER,
        };
        let max_number = self.max_number.clamp(floor, MAX_MAX_NUMBER);
        if max_number != self.max_number {
            log::warn!(
                "max_number {} out of range for {}, using {}",
                self.max_number,
                self.operation.as_str(),
                max_number
            );
        }
        Self {
            operation: self.operation,
            max_number,
        }
    }

    /// Parse settings JSON; malformed input yields the defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps or non-string keys; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        let s = Settings::new(Operation::Addition, 0).clamped();
        assert_eq!(s.max_number, 1);
        let s = Settings::new(Operation::Addition, 99).clamped();
        assert_eq!(s.max_number, 50);
        let s = Settings::new(Operation::Multiplication, 2).clamped();
        assert_eq!(s.max_number, 4);
        let s = Settings::new(Operation::Multiplication, 20).clamped();
        assert_eq!(s.max_number, 20);
    }

    #[test]
    fn test_json() {
        let s = Settings::new(Operation::Multiplication, 24);
        assert_eq!(Settings::from_json(&s.to_json()), s);

        let partial = Settings::from_json(r#"{"operation":"Multiplication"}"#);
        assert_eq!(partial.max_number, DEFAULT_MAX_NUMBER);
        assert_eq!(partial.operation, Operation::Multiplication);

        assert_eq!(Settings::from_json("not json"), Settings::default());
        assert_eq!(Settings::from_json(r#"{"max_number":500}"#).max_number, 50);
    }
}
