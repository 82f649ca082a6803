#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use rules::*;
pub use surface::*;
pub use table::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod geometry;
mod rules;
mod surface;
mod table;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub size: Coord2,
}

impl CardConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new((rows, cols): Coord2) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        Self::new_unchecked((rows, cols))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self::new_unchecked((4, 5))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    winning_number: u8,
    cells: Array2<Cell>,
}

impl Card {
    /// Assembles a card from already generated cells. The winning number is
    /// whatever the generator drew; cells showing it are the winning cells.
    pub fn from_cells(winning_number: u8, cells: Array2<Cell>) -> Self {
        Self {
            winning_number,
            cells,
        }
    }

    pub fn config(&self) -> CardConfig {
        CardConfig::new_unchecked(self.size())
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn winning_number(&self) -> u8 {
        self.winning_number
    }

    pub fn cell_at(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_at_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn is_winning(&self, coords: Coord2) -> bool {
        self[coords].number() == self.winning_number
    }

    pub fn winning_cell_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.number() == self.winning_number)
            .count()
            .try_into()
            .unwrap()
    }

    /// Row-major walk over the grid.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    /// Rewards already scratched free, in row-major order.
    pub fn revealed_rewards(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .filter(|cell| cell.is_fully_revealed())
            .filter_map(|cell| cell.reward())
    }
}

impl Index<Coord2> for Card {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScratchOutcome {
    NoChange,
    /// The cell's revealed fraction rose to the carried value.
    Scratched(f32),
    /// The threshold fired and the whole cell was scratched free.
    Cleared,
}

impl ScratchOutcome {
    pub const fn has_update(self) -> bool {
        use ScratchOutcome::*;
        match self {
            NoChange => false,
            Scratched(_) => true,
            Cleared => true,
        }
    }
}

impl BitOr for ScratchOutcome {
    type Output = ScratchOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ScratchOutcome::*;
        match (self, rhs) {
            (Cleared, _) => Cleared,
            (_, Cleared) => Cleared,
            (Scratched(a), Scratched(b)) => Scratched(if a >= b { a } else { b }),
            (Scratched(a), _) => Scratched(a),
            (_, Scratched(b)) => Scratched(b),
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn card2x2() -> Card {
        let cells = Array2::from_shape_vec(
            (2, 2),
            alloc::vec![
                Cell::covered(10, None),
                Cell::covered(7, Some(String::from("tea"))),
                Cell::covered(7, Some(String::from("cake"))),
                Cell::covered(30, None),
            ],
        )
        .unwrap();
        Card::from_cells(7, cells)
    }

    #[test]
    fn config_clamps_empty_grids_to_one_cell() {
        assert_eq!(CardConfig::new((0, 5)).size, (1, 5));
        assert_eq!(CardConfig::new((4, 0)).size, (4, 1));
        assert_eq!(CardConfig::default().total_cells(), 20);
    }

    #[test]
    fn card_reports_winning_cells_by_number() {
        let card = card2x2();
        assert_eq!(card.winning_cell_count(), 2);
        assert!(!card.is_winning((0, 0)));
        assert!(card.is_winning((0, 1)));
        assert!(card.is_winning((1, 0)));
        assert_eq!(card.size(), (2, 2));
    }

    #[test]
    fn iter_cells_walks_row_major() {
        let card = card2x2();
        let numbers: alloc::vec::Vec<_> = card
            .iter_cells()
            .map(|(coords, cell)| (coords, cell.number()))
            .collect();
        assert_eq!(
            numbers,
            alloc::vec![((0, 0), 10), ((0, 1), 7), ((1, 0), 7), ((1, 1), 30)]
        );
    }

    #[test]
    fn revealed_rewards_skip_covered_cells() {
        let mut card = card2x2();
        assert_eq!(card.revealed_rewards().count(), 0);
        card.cell_at_mut((0, 1)).reveal_fully();
        let rewards: alloc::vec::Vec<_> = card.revealed_rewards().collect();
        assert_eq!(rewards, alloc::vec!["tea"]);
    }

    #[test]
    fn outcome_merge_prefers_the_bigger_change() {
        use ScratchOutcome::*;
        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(NoChange | Scratched(0.3), Scratched(0.3));
        assert_eq!(Scratched(0.3) | Scratched(0.5), Scratched(0.5));
        assert_eq!(Scratched(0.9) | Cleared, Cleared);
        assert!(!NoChange.has_update());
        assert!(Cleared.has_update());
    }
}
