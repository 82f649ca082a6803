use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum CardError {
    #[error("Table has {actual} weights, expected {expected}")]
    TableArity { expected: usize, actual: usize },
    #[error("Weight {weight} at index {index} is outside the 0-100 range")]
    WeightOutOfRange { index: usize, weight: f64 },
    #[error("Weights sum to {sum}, expected 100")]
    WeightSumMismatch { sum: f64 },
    #[error("Winning-number pool is empty")]
    EmptyNumberPool,
    #[error("Number {number} is outside the 0-100 range")]
    NumberOutOfRange { number: u8 },
    #[error("Reward list is empty")]
    NoRewards,
    #[error("Grid with {cells} cells cannot be filled with distinct numbers")]
    GridTooLarge { cells: CellCount },
}

pub type Result<T> = core::result::Result<T, CardError>;
