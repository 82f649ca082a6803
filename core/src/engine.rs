use serde::{Deserialize, Serialize};

use crate::*;

/// Share of a cell's area that must be erased before the rest is cleared
/// programmatically.
pub const AUTO_REVEAL_THRESHOLD: f32 = 0.8;

/// Radius of the circle erased around a single pointer sample.
pub const DAB_RADIUS: f64 = 15.0;

/// Width of the band erased along a swept pointer segment.
pub const STROKE_WIDTH: f64 = 30.0;

/// Tracks scratch progress on one card. The engine decides what gets erased
/// and when a cell clears; pixel work goes through the [`ScratchSurface`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScratchEngine {
    card: Card,
    geometry: CardGeometry,
}

impl ScratchEngine {
    pub fn new(card: Card) -> Self {
        let geometry = CardGeometry::standard(card.config());
        Self::with_geometry(card, geometry)
    }

    pub fn with_geometry(card: Card, geometry: CardGeometry) -> Self {
        Self { card, geometry }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn geometry(&self) -> &CardGeometry {
        &self.geometry
    }

    /// Draws the whole card through `surface`: backdrop, every cell's
    /// content, and fresh foil over cells not yet fully revealed.
    pub fn present(&self, surface: &mut impl ScratchSurface) {
        surface.draw_background(&self.geometry, self.card.winning_number());
        for (coords, cell) in self.card.iter_cells() {
            let rect = self.geometry.cell_rect(coords);
            surface.draw_cell_content(cell, rect, self.card.is_winning(coords));
            if !cell.is_fully_revealed() {
                surface.composite_mask(rect, RevealShape::Region, false);
            }
        }
    }

    /// Erases a circle around `center` and resamples the cell under it.
    /// Points in the header or off the grid are a no-op.
    pub fn scratch_dab(
        &mut self,
        surface: &mut impl ScratchSurface,
        center: SurfacePoint,
    ) -> ScratchOutcome {
        match self.geometry.cell_at(center) {
            Some(coords) => self.scratch_cell(
                surface,
                coords,
                RevealShape::Dab {
                    center,
                    radius: DAB_RADIUS,
                },
            ),
            None => ScratchOutcome::NoChange,
        }
    }

    /// Erases a round-capped band from `from` to `to`. Only the cell under
    /// `from` is resampled; a move gesture starts where the previous event
    /// ended, so the trailing end catches up on the next sample.
    pub fn scratch_stroke(
        &mut self,
        surface: &mut impl ScratchSurface,
        from: SurfacePoint,
        to: SurfacePoint,
    ) -> ScratchOutcome {
        match self.geometry.cell_at(from) {
            Some(coords) => self.scratch_cell(
                surface,
                coords,
                RevealShape::Stroke {
                    from,
                    to,
                    width: STROKE_WIDTH,
                },
            ),
            None => ScratchOutcome::NoChange,
        }
    }

    fn scratch_cell(
        &mut self,
        surface: &mut impl ScratchSurface,
        coords: Coord2,
        shape: RevealShape,
    ) -> ScratchOutcome {
        if self.card[coords].is_fully_revealed() {
            return ScratchOutcome::NoChange;
        }

        let rect = self.geometry.cell_rect(coords);
        surface.composite_mask(rect, shape, true);
        let sampled = surface.sample_erased_fraction(rect);

        let before = self.card[coords].revealed_fraction();
        let after = self.card.cell_at_mut(coords).raise_revealed(sampled);

        if after >= AUTO_REVEAL_THRESHOLD {
            surface.composite_mask(rect, RevealShape::Region, true);
            self.card.cell_at_mut(coords).reveal_fully();
            return ScratchOutcome::Cleared;
        }

        if after > before {
            ScratchOutcome::Scratched(after)
        } else {
            ScratchOutcome::NoChange
        }
    }
}
