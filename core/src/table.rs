use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{CardError, Result};

/// Weights are percentages; a full table covers this much probability mass.
pub const WEIGHT_SCALE: f64 = 100.0;

/// Accepted deviation when checking that a table sums to `WEIGHT_SCALE`.
pub const SUM_TOLERANCE: f64 = 0.01;

/// Ordered outcome weights for a cumulative-sum draw: index i is outcome i.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    weights: Vec<f64>,
}

impl WeightTable {
    /// Validates arity, per-weight range, and the total, in that order, and
    /// reports the first violation found.
    pub fn new(weights: Vec<f64>, expected_len: usize) -> Result<Self> {
        if weights.len() != expected_len {
            return Err(CardError::TableArity {
                expected: expected_len,
                actual: weights.len(),
            });
        }

        for (index, &weight) in weights.iter().enumerate() {
            if !(0.0..=WEIGHT_SCALE).contains(&weight) {
                return Err(CardError::WeightOutOfRange { index, weight });
            }
        }

        let sum: f64 = weights.iter().sum();
        let deviation = sum - WEIGHT_SCALE;
        if deviation > SUM_TOLERANCE || -deviation > SUM_TOLERANCE {
            return Err(CardError::WeightSumMismatch { sum });
        }

        Ok(Self { weights })
    }

    /// Builds a table without validating it.
    pub fn from_weights_unchecked(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub(crate) fn into_weights(self) -> Vec<f64> {
        self.weights
    }

    /// First outcome whose cumulative weight strictly exceeds `roll`, or
    /// `None` when `roll` lands past the final cumulative sum.
    pub fn pick(&self, roll: f64) -> Option<usize> {
        let mut cumulative = 0.0;
        for (outcome, &weight) in self.weights.iter().enumerate() {
            cumulative += weight;
            if roll < cumulative {
                return Some(outcome);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn accepts_a_table_summing_to_one_hundred() {
        let table = WeightTable::new(vec![50.0, 30.0, 20.0], 3).unwrap();
        assert_eq!(table.weights(), &[50.0, 30.0, 20.0]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn accepts_a_sum_within_the_tolerance() {
        assert!(WeightTable::new(vec![50.0, 30.0, 20.005], 3).is_ok());
    }

    #[test]
    fn rejects_the_wrong_arity() {
        assert_eq!(
            WeightTable::new(vec![50.0, 50.0], 3),
            Err(CardError::TableArity {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn rejects_an_out_of_range_weight() {
        assert_eq!(
            WeightTable::new(vec![50.0, 101.0, -51.0], 3),
            Err(CardError::WeightOutOfRange {
                index: 1,
                weight: 101.0
            })
        );
        assert_eq!(
            WeightTable::new(vec![50.0, 51.0, -1.0], 3),
            Err(CardError::WeightOutOfRange {
                index: 2,
                weight: -1.0
            })
        );
    }

    #[test]
    fn rejects_nan_weights() {
        let err = WeightTable::new(vec![f64::NAN, 50.0, 50.0], 3);
        assert!(matches!(
            err,
            Err(CardError::WeightOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_a_sum_off_by_more_than_the_tolerance() {
        assert_eq!(
            WeightTable::new(vec![50.0, 30.0, 19.5], 3),
            Err(CardError::WeightSumMismatch { sum: 99.5 })
        );
    }

    #[test]
    fn pick_takes_the_first_bucket_strictly_past_the_roll() {
        let table = WeightTable::from_weights_unchecked(vec![50.0, 30.0, 20.0]);
        assert_eq!(table.pick(0.0), Some(0));
        assert_eq!(table.pick(49.9), Some(0));
        assert_eq!(table.pick(50.0), Some(1));
        assert_eq!(table.pick(79.9), Some(1));
        assert_eq!(table.pick(80.0), Some(2));
        assert_eq!(table.pick(99.9), Some(2));
    }

    #[test]
    fn pick_never_lands_in_a_zero_weight_bucket() {
        let table = WeightTable::from_weights_unchecked(vec![0.0, 100.0]);
        assert_eq!(table.pick(0.0), Some(1));
    }

    #[test]
    fn pick_falls_through_when_the_roll_passes_the_total() {
        let table =
            WeightTable::from_weights_unchecked(vec![25.0, 20.0, 18.0, 13.0, 10.0, 9.0]);
        assert_eq!(table.pick(94.9), Some(5));
        assert_eq!(table.pick(95.0), None);
        assert_eq!(table.pick(99.9), None);
    }
}
