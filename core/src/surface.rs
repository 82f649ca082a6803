use crate::{CardGeometry, Cell, SurfacePoint, SurfaceRect};

/// Mask geometry handed to the surface. Coordinates are in surface space,
/// not cell-local space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealShape {
    /// The whole clipped region.
    Region,
    /// A filled circle around one pointer sample.
    Dab { center: SurfacePoint, radius: f64 },
    /// A round-capped segment between two pointer samples.
    Stroke {
        from: SurfacePoint,
        to: SurfacePoint,
        width: f64,
    },
}

/// Where the engine draws and erases. The engine owns what happens and in
/// which order; implementations own how pixels get there and how erased
/// coverage is measured.
pub trait ScratchSurface {
    /// Paints the backdrop and header for a fresh presentation pass.
    fn draw_background(&mut self, geometry: &CardGeometry, winning_number: u8);

    /// Paints one cell's number (and reward, when `winning`) inside `rect`.
    fn draw_cell_content(&mut self, cell: &Cell, rect: SurfaceRect, winning: bool);

    /// Applies `shape` to the scratch mask, clipped to `region`. With
    /// `erase` unset the shape covers instead, which is how fresh foil gets
    /// laid down.
    fn composite_mask(&mut self, region: SurfaceRect, shape: RevealShape, erase: bool);

    /// Fraction of `region` whose mask is currently erased, in `0.0..=1.0`.
    fn sample_erased_fraction(&self, region: SurfaceRect) -> f32;
}
