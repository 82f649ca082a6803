use alloc::string::String;
use serde::{Deserialize, Serialize};

/// One scratch area on the card: a hidden number, an optional reward, and
/// how much of the coating is gone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    number: u8,
    reward: Option<String>,
    revealed: f32,
}

impl Cell {
    pub(crate) fn covered(number: u8, reward: Option<String>) -> Self {
        Self {
            number,
            reward,
            revealed: 0.0,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn reward(&self) -> Option<&str> {
        self.reward.as_deref()
    }

    pub fn revealed_fraction(&self) -> f32 {
        self.revealed
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed >= 1.0
    }

    /// Stores `fraction` if it raises the revealed share; it never decreases.
    pub(crate) fn raise_revealed(&mut self, fraction: f32) -> f32 {
        self.revealed = self.revealed.max(fraction.clamp(0.0, 1.0));
        self.revealed
    }

    pub(crate) fn reveal_fully(&mut self) {
        self.revealed = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revealed_fraction_only_moves_up() {
        let mut cell = Cell::covered(42, None);
        assert_eq!(cell.raise_revealed(0.4), 0.4);
        assert_eq!(cell.raise_revealed(0.2), 0.4);
        assert_eq!(cell.raise_revealed(0.7), 0.7);
        assert!(!cell.is_fully_revealed());
    }

    #[test]
    fn raise_clamps_into_the_unit_interval() {
        let mut cell = Cell::covered(42, None);
        assert_eq!(cell.raise_revealed(-0.5), 0.0);
        assert_eq!(cell.raise_revealed(1.5), 1.0);
        assert!(cell.is_fully_revealed());
    }

    #[test]
    fn nan_samples_leave_the_fraction_alone() {
        let mut cell = Cell::covered(42, None);
        cell.raise_revealed(0.3);
        assert_eq!(cell.raise_revealed(f32::NAN), 0.3);
    }
}
