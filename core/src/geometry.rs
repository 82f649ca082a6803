use serde::{Deserialize, Serialize};

use crate::{CardConfig, Coord2, SurfacePoint, SurfaceRect};

/// Pixel layout of a card: a header band on top, then the cell grid with a
/// uniform gutter between and around the cells.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub grid: CardConfig,
    pub cell_width: f64,
    pub cell_height: f64,
    pub padding: f64,
    pub header_height: f64,
}

impl CardGeometry {
    /// The stock layout: 100x80 cells, 10px gutters, 60px header.
    pub const fn standard(grid: CardConfig) -> Self {
        Self {
            grid,
            cell_width: 100.0,
            cell_height: 80.0,
            padding: 10.0,
            header_height: 60.0,
        }
    }

    pub fn surface_width(&self) -> f64 {
        let (_, cols) = self.grid.size;
        f64::from(cols) * (self.cell_width + self.padding) + self.padding
    }

    pub fn surface_height(&self) -> f64 {
        let (rows, _) = self.grid.size;
        self.header_height + f64::from(rows) * (self.cell_height + self.padding) + self.padding
    }

    /// Drawable rectangle of one cell, gutter excluded.
    pub fn cell_rect(&self, coords: Coord2) -> SurfaceRect {
        let (row, col) = coords;
        SurfaceRect::new(
            self.padding + f64::from(col) * (self.cell_width + self.padding),
            self.header_height + self.padding + f64::from(row) * (self.cell_height + self.padding),
            self.cell_width,
            self.cell_height,
        )
    }

    /// Maps a surface point to the cell whose column band it falls in. Each
    /// band spans cell plus trailing gutter, so the gutter left or below a
    /// cell still counts as that cell. Points in the header or off the grid
    /// map to nothing.
    pub fn cell_at(&self, point: SurfacePoint) -> Option<Coord2> {
        let (x, y) = point;
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < self.header_height {
            return None;
        }
        let col = (x / (self.cell_width + self.padding)) as u64;
        let row = ((y - self.header_height) / (self.cell_height + self.padding)) as u64;
        let (rows, cols) = self.grid.size;
        if row >= u64::from(rows) || col >= u64::from(cols) {
            return None;
        }
        Some((row as u8, col as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> CardGeometry {
        CardGeometry::standard(CardConfig::default())
    }

    #[test]
    fn stock_surface_spans_the_grid_plus_chrome() {
        let geometry = standard();
        assert_eq!(geometry.surface_width(), 560.0);
        assert_eq!(geometry.surface_height(), 430.0);
    }

    #[test]
    fn cell_rects_skip_the_header_and_gutters() {
        let geometry = standard();
        assert_eq!(geometry.cell_rect((0, 0)), SurfaceRect::new(10.0, 70.0, 100.0, 80.0));
        assert_eq!(geometry.cell_rect((1, 2)), SurfaceRect::new(230.0, 160.0, 100.0, 80.0));
    }

    #[test]
    fn points_inside_a_cell_map_to_its_coordinates() {
        let geometry = standard();
        assert_eq!(geometry.cell_at((115.0, 150.0)), Some((1, 1)));
    }

    #[test]
    fn header_points_map_to_nothing() {
        let geometry = standard();
        assert_eq!(geometry.cell_at((5.0, 30.0)), None);
        assert_eq!(geometry.cell_at((5.0, 59.9)), None);
    }

    #[test]
    fn gutters_attribute_to_the_cell_on_their_right_and_below() {
        let geometry = standard();
        assert_eq!(geometry.cell_at((5.0, 65.0)), Some((0, 0)));
        assert_eq!(geometry.cell_at((109.9, 65.0)), Some((0, 0)));
        assert_eq!(geometry.cell_at((110.0, 65.0)), Some((0, 1)));
    }

    #[test]
    fn points_past_the_grid_map_to_nothing() {
        let geometry = standard();
        assert_eq!(geometry.cell_at((550.0, 150.0)), None);
        assert_eq!(geometry.cell_at((115.0, 420.0)), None);
        assert_eq!(geometry.cell_at((-1.0, 150.0)), None);
        assert_eq!(geometry.cell_at((f64::NAN, 150.0)), None);
        assert_eq!(geometry.cell_at((115.0, f64::INFINITY)), None);
    }
}
