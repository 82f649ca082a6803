use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Draws every card ingredient from one seeded stream, in a fixed order:
/// winning number, candidate shuffle, winning-count roll, winning positions,
/// then one reward roll per winning cell in row-major order. The same seed
/// always produces the same card.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomCardGenerator {
    seed: u64,
}

impl RandomCardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl CardGenerator for RandomCardGenerator {
    fn generate(self, rules: &CardRules) -> Card {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (rows, cols) = rules.grid().size;
        let total_cells = rules.grid().total_cells();

        let pool = rules.winning_pool();
        let winning_number = pool[rng.random_range(0..pool.len())];

        let mut candidates: Vec<u8> = (0..=MAX_NUMBER)
            .filter(|&number| number != winning_number)
            .collect();
        for i in (1..candidates.len()).rev() {
            let j = rng.random_range(0..=i);
            candidates.swap(i, j);
        }

        let roll = rng.random_range(0.0..WEIGHT_SCALE);
        let quota = winning_count_for_roll(rules.win_count_table(), roll, total_cells);

        let mut winning_positions: BTreeSet<CellCount> = BTreeSet::new();
        while (winning_positions.len() as CellCount) < quota {
            winning_positions.insert(rng.random_range(0..total_cells));
        }

        let rewards = rules.rewards();
        let mut next_candidate = candidates.into_iter();
        let mut cells = Vec::with_capacity(total_cells.into());
        for position in 0..total_cells {
            if winning_positions.contains(&position) {
                let roll = rng.random_range(0.0..WEIGHT_SCALE);
                // float slack past the cumulative sum falls back to the last reward
                let index = rules
                    .reward_table()
                    .pick(roll)
                    .unwrap_or(rewards.len() - 1);
                cells.push(Cell::covered(winning_number, Some(rewards[index].clone())));
            } else {
                let number = next_candidate
                    .next()
                    .expect("validated grid fits the candidate pool");
                cells.push(Cell::covered(number, None));
            }
        }

        let cells = Array2::from_shape_vec((usize::from(rows), usize::from(cols)), cells)
            .expect("row-major walk matches the grid shape");
        Card::from_cells(winning_number, cells)
    }
}
