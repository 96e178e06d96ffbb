use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_HINTS: u32 = 3;

/// Candidate divisors checked by the divisor hint, in order.
pub const HINT_DIVISORS: [i64; 4] = [5, 3, 7, 11];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(value: i64) -> Parity {
        if value % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => write!(f, "even"),
            Parity::Odd => write!(f, "odd"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    Parity(Parity),
    Window { low: i64, high: i64 },
    /// `None` when no listed divisor applies.
    Divisor(Option<i64>),
}

impl Hint {
    /// Picks the hint for the given slot, rotating parity, window, divisor.
    pub fn for_slot(slot: u32, secret: i64, low: i64, high: i64) -> Hint {
        match slot % 3 {
            0 => Hint::Parity(Parity::of(secret)),
            1 => {
                let span = ((high - low) / 6).max(1);
                Hint::Window {
                    low: (secret - span).max(low),
                    high: (secret + span).min(high),
                }
            }
            _ => Hint::Divisor(
                HINT_DIVISORS
                    .iter()
                    .copied()
                    .find(|divisor| secret != *divisor && secret % divisor == 0),
            ),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        match self {
            Hint::Parity(parity) => Parity::of(value) == *parity,
            Hint::Window { low, high } => (*low..=*high).contains(&value),
            Hint::Divisor(Some(divisor)) => value % divisor == 0,
            Hint::Divisor(None) => true,
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Parity(parity) => write!(f, "The number is {}.", parity),
            Hint::Window { low, high } => {
                write!(f, "The number is between {} and {}.", low, high)
            }
            Hint::Divisor(Some(divisor)) => write!(f, "The number is divisible by {}.", divisor),
            Hint::Divisor(None) => write!(f, "The number has no small divisor."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_hint() {
        assert_eq!(Hint::for_slot(0, 36, 1, 50), Hint::Parity(Parity::Even));
        assert_eq!(Hint::for_slot(0, 37, 1, 50), Hint::Parity(Parity::Odd));
        assert_eq!(Hint::for_slot(0, 36, 1, 50).to_string(), "The number is even.");
    }

    #[test]
    fn test_window_hint_uses_sixth_of_range() {
        // (50 - 1) / 6 = 8
        assert_eq!(
            Hint::for_slot(1, 36, 1, 50),
            Hint::Window { low: 28, high: 44 }
        );
    }

    #[test]
    fn test_window_hint_is_clamped() {
        assert_eq!(Hint::for_slot(1, 2, 1, 50), Hint::Window { low: 1, high: 10 });
        assert_eq!(
            Hint::for_slot(1, 49, 1, 50),
            Hint::Window { low: 41, high: 50 }
        );
    }

    #[test]
    fn test_window_span_is_at_least_one() {
        assert_eq!(Hint::for_slot(1, 3, 1, 4), Hint::Window { low: 2, high: 4 });
    }

    #[test]
    fn test_divisor_hint_order() {
        assert_eq!(Hint::for_slot(2, 30, 1, 100), Hint::Divisor(Some(5)));
        assert_eq!(Hint::for_slot(2, 9, 1, 100), Hint::Divisor(Some(3)));
        assert_eq!(Hint::for_slot(2, 49, 1, 100), Hint::Divisor(Some(7)));
        assert_eq!(Hint::for_slot(2, 121, 1, 500), Hint::Divisor(Some(11)));
        assert_eq!(Hint::for_slot(2, 13, 1, 100), Hint::Divisor(None));
    }

    #[test]
    fn test_divisor_hint_skips_the_secret_itself() {
        for prime in HINT_DIVISORS {
            assert_eq!(Hint::for_slot(2, prime, 1, 100), Hint::Divisor(None));
        }
    }

    #[test]
    fn test_hints_contain_secret() {
        for secret in 1..=100 {
            for slot in 0..3 {
                let hint = Hint::for_slot(slot, secret, 1, 100);
                assert!(hint.contains(secret), "{:?} excludes {}", hint, secret);
            }
        }
    }
}
