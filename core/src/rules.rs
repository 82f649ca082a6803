use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{CardConfig, CardError, Result, WEIGHT_SCALE, WeightTable};

/// Largest number a cell can show; candidates span `0..=MAX_NUMBER`.
pub const MAX_NUMBER: u8 = 100;

/// Arity of the winning-count table (outcomes 0 through 5 winning cells).
pub const WIN_COUNT_ARITY: usize = 6;

const STANDARD_POOL: [u8; 8] = [3, 6, 8, 16, 20, 66, 88, 99];
const STANDARD_WIN_COUNT_WEIGHTS: [f64; WIN_COUNT_ARITY] = [25.0, 20.0, 18.0, 13.0, 10.0, 9.0];
const STANDARD_REWARD_WEIGHTS: [f64; 3] = [50.0, 30.0, 20.0];
const STANDARD_REWARDS: [&str; 3] = ["Milk tea!", "Shaved ice!", "Cake!"];

/// Everything card generation is parameterized by: grid, number pool,
/// rewards, and both probability tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardRules {
    grid: CardConfig,
    winning_pool: Vec<u8>,
    rewards: Vec<String>,
    win_count_table: WeightTable,
    reward_table: WeightTable,
}

impl CardRules {
    pub fn new(
        grid: CardConfig,
        winning_pool: Vec<u8>,
        rewards: Vec<String>,
        win_count_weights: Vec<f64>,
        reward_weights: Vec<f64>,
    ) -> Result<Self> {
        if winning_pool.is_empty() {
            return Err(CardError::EmptyNumberPool);
        }
        if let Some(&number) = winning_pool.iter().find(|&&number| number > MAX_NUMBER) {
            return Err(CardError::NumberOutOfRange { number });
        }
        if rewards.is_empty() {
            return Err(CardError::NoRewards);
        }
        let cells = grid.total_cells();
        if usize::from(cells) > usize::from(MAX_NUMBER) + 1 {
            return Err(CardError::GridTooLarge { cells });
        }

        let win_count_table =
            reserve_zero_count_share(WeightTable::new(win_count_weights, WIN_COUNT_ARITY)?);
        let reward_table = WeightTable::new(reward_weights, rewards.len())?;

        Ok(Self {
            grid,
            winning_pool,
            rewards,
            win_count_table,
            reward_table,
        })
    }

    /// The stock configuration. Its winning-count table predates the
    /// validator and sums to 95; draws past the total fall through to the
    /// forced single win.
    pub fn standard() -> Self {
        Self {
            grid: CardConfig::default(),
            winning_pool: STANDARD_POOL.to_vec(),
            rewards: STANDARD_REWARDS.iter().map(|&reward| String::from(reward)).collect(),
            win_count_table: WeightTable::from_weights_unchecked(
                STANDARD_WIN_COUNT_WEIGHTS.to_vec(),
            ),
            reward_table: WeightTable::from_weights_unchecked(STANDARD_REWARD_WEIGHTS.to_vec()),
        }
    }

    pub fn grid(&self) -> CardConfig {
        self.grid
    }

    pub fn winning_pool(&self) -> &[u8] {
        &self.winning_pool
    }

    pub fn rewards(&self) -> &[String] {
        &self.rewards
    }

    pub fn win_count_table(&self) -> &WeightTable {
        &self.win_count_table
    }

    pub fn reward_table(&self) -> &WeightTable {
        &self.reward_table
    }

    /// Replaces the winning-count table. The incoming weights are validated
    /// first and rescaled around the zero-count share; on rejection the
    /// active table stays as it was.
    pub fn set_win_count_weights(&mut self, weights: Vec<f64>) -> Result<()> {
        let table = WeightTable::new(weights, WIN_COUNT_ARITY)?;
        self.win_count_table = reserve_zero_count_share(table);
        Ok(())
    }

    /// Replaces the reward table; its arity is tied to the reward list.
    pub fn set_reward_weights(&mut self, weights: Vec<f64>) -> Result<()> {
        self.reward_table = WeightTable::new(weights, self.rewards.len())?;
        Ok(())
    }
}

impl Default for CardRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Keeps the zero-count weight as-is and rescales the rest so they cover the
/// remaining share, each rounded to a whole percentage. Rounding happens
/// after validation, so the stored table may drift off the 100 total.
fn reserve_zero_count_share(table: WeightTable) -> WeightTable {
    let weights = table.into_weights();
    let zero_share = weights.first().copied().unwrap_or(0.0);
    if zero_share <= 0.0 {
        return WeightTable::from_weights_unchecked(weights);
    }

    let tail_sum: f64 = weights[1..].iter().sum();
    let ratio = (WEIGHT_SCALE - zero_share) / tail_sum;

    let mut rebalanced = Vec::with_capacity(weights.len());
    rebalanced.push(zero_share);
    rebalanced.extend(weights[1..].iter().map(|&weight| round_half_up(weight * ratio)));
    WeightTable::from_weights_unchecked(rebalanced)
}

/// `Math.round` for the non-negative weights this crate deals in.
fn round_half_up(value: f64) -> f64 {
    ((value + 0.5) as u32) as f64
}
