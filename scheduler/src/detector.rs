//! Oscillation detection.
//!
//! Compares a fresh ask against the stored baseline using the symmetric
//! percentage change `100 * (old - new) / ((old + new) / 2)`.
//!
//! A positive change (old above new) is reported as [`Signal::Up`], a negative
//! one as [`Signal::Down`]. Downstream alert text depends on this labelling.

use alerts::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    None,
    Up,
    Down,
}

impl Signal {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Signal::None => None,
            Signal::Up => Some(Direction::Up),
            Signal::Down => Some(Direction::Down),
        }
    }

    pub fn fired(self) -> bool {
        self != Signal::None
    }
}

/// Symmetric percentage change between two asks, `None` when not finite
/// (e.g. both prices zero).
pub fn relative_change(old_ask: f64, new_ask: f64) -> Option<f64> {
    let mid = (old_ask + new_ask) / 2.0;
    let diff = 100.0 * (old_ask - new_ask) / mid;
    diff.is_finite().then_some(diff)
}

/// `threshold` is a fraction: 0.01 means a move of more than 1%.
/// A missing baseline (first observation) never fires.
pub fn detect(old_ask: Option<f64>, new_ask: f64, threshold: f64) -> Signal {
    let Some(old_ask) = old_ask else {
        return Signal::None;
    };
    let Some(diff) = relative_change(old_ask, new_ask) else {
        return Signal::None;
    };

    if threshold * 100.0 - diff.abs() < 0.0 {
        if diff > 0.0 { Signal::Up } else { Signal::Down }
    } else {
        Signal::None
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn price() -> impl Strategy<Value = f64> {
        0.000_001f64..1_000_000.0
    }

    fn threshold() -> impl Strategy<Value = f64> {
        0.000_1f64..1.0
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn unchanged_price_never_fires(p in price(), t in threshold()) {
            prop_assert_eq!(detect(Some(p), p, t), Signal::None);
        }

        #[test]
        fn missing_baseline_never_fires(p in price(), t in threshold()) {
            prop_assert_eq!(detect(None, p, t), Signal::None);
        }

        #[test]
        fn fires_exactly_when_change_exceeds_threshold(
            old in price(),
            new in price(),
            t in threshold(),
        ) {
            let diff = relative_change(old, new).unwrap();
            let signal = detect(Some(old), new, t);

            if diff.abs() > t * 100.0 {
                let expected = if diff > 0.0 { Signal::Up } else { Signal::Down };
                prop_assert_eq!(signal, expected);
            } else {
                prop_assert_eq!(signal, Signal::None);
            }
        }

        #[test]
        fn swapping_prices_flips_direction(
            a in price(),
            b in price(),
            t in threshold(),
        ) {
            let forward = detect(Some(a), b, t);
            let backward = detect(Some(b), a, t);

            let flipped = match forward {
                Signal::Up => Signal::Down,
                Signal::Down => Signal::Up,
                Signal::None => Signal::None,
            };
            prop_assert_eq!(backward, flipped);
        }
    }
}
