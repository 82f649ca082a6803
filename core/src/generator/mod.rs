use crate::*;

pub use random::*;

mod random;

/// Produces a covered card from a set of rules. Generators are one-shot and
/// consumed by the draw.
pub trait CardGenerator {
    fn generate(self, rules: &CardRules) -> Card;
}

/// Resolves a winning-count draw to the quota actually placed. Rolls that
/// land in the zero bucket, or past a table that sums short of the full
/// scale, still force a single winning cell. Quotas never exceed the grid.
pub(crate) fn winning_count_for_roll(
    table: &WeightTable,
    roll: f64,
    total_cells: CellCount,
) -> CellCount {
    let drawn = table.pick(roll).unwrap_or(0);
    let quota = drawn.max(1) as CellCount;
    if quota > total_cells {
        log::warn!("Winning quota {quota} exceeds the {total_cells}-cell grid, clamped");
        return total_cells;
    }
    quota
}
