//! Grid-to-table conversion
//!
//! Flattens a loaded grid into a per-cell table. Each row corresponds to
//! exactly one grid cell and carries the cell geometry (a projected
//! rectangle centered on the cell) together with the concentration value.

use crate::errors::Result;
use crate::grid::ConcGrid;
use geo::{coord, Rect};

/// One grid cell as a table row.
#[derive(Debug, Clone)]
pub struct CellRow {
    /// Flat row index, row-major over (y, x)
    pub index: usize,
    /// Projected y cell center, meters
    pub y: f64,
    /// Projected x cell center, meters
    pub x: f64,
    /// Concentration, None where the file had fill or NaN
    pub concentration: Option<f32>,
    /// Cell footprint in projected coordinates
    pub geometry: Rect<f64>,
}

/// Flat per-cell table, one row per grid cell.
#[derive(Debug, Clone)]
pub struct CellTable {
    pub rows: Vec<CellRow>,
    /// Grid spacing in meters the geometries were built from
    pub dy: f64,
    pub dx: f64,
}

impl CellTable {
    /// Build the table from a grid, constructing one rectangle per cell from
    /// the cell center and the grid spacing.
    ///
    /// The row count always equals ny * nx, including cells with missing
    /// data.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid spacing cannot be derived.
    pub fn from_grid(grid: &ConcGrid) -> Result<Self> {
        let (dy, dx) = grid.spacing()?;
        let (hy, hx) = (dy / 2.0, dx / 2.0);

        let nx = grid.nx();
        let mut rows = Vec::with_capacity(grid.ny() * nx);
        for (i, &y) in grid.y.iter().enumerate() {
            for (j, &x) in grid.x.iter().enumerate() {
                let value = grid.conc[[i, j]];
                rows.push(CellRow {
                    index: i * nx + j,
                    y,
                    x,
                    concentration: if value.is_nan() { None } else { Some(value) },
                    geometry: Rect::new(
                        coord! { x: x - hx, y: y - hy },
                        coord! { x: x + hx, y: y + hy },
                    ),
                });
            }
        }

        Ok(Self { rows, dy, dx })
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows carrying a concentration value
    pub fn valid_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.concentration.is_some())
            .count()
    }
}
