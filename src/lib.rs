//! seaice_extent: monthly sea-ice concentration grid fetch and per-cell areas
//!
//! A small pipeline crate that downloads one monthly sea-ice concentration
//! grid from an ERDDAP griddap endpoint as NetCDF, loads it into an in-memory
//! grid, flattens it into a per-cell table with projected cell geometries,
//! and derives an area column in square kilometers.
//!
//! ## Pipeline
//!
//! 1. [`fetch`]: build the griddap query URL and download the NetCDF file
//! 2. [`grid`]: load the concentration field and its coordinate axes
//! 3. [`table`]: flatten to one row per grid cell, with a cell rectangle
//! 4. [`area`]: derive the km² area column; optionally total extent above a
//!    concentration threshold
//!
//! ## Usage
//!
//! ```rust,no_run
//! use seaice_extent::prelude::*;
//!
//! let query = ErddapQuery::default();
//! let path = seaice_extent::fetch::download_grid(&query, "seaice.nc".as_ref()).unwrap();
//!
//! let file = netcdf::open(&path).unwrap();
//! let grid = ConcGrid::from_file(&file, &query.variable).unwrap();
//! let table = CellTable::from_grid(&grid).unwrap();
//! let areas = seaice_extent::area::derive_area(&table);
//! ```
//!
//! The area figures are planar, so they are only meaningful on a projection
//! that preserves area in meters, which holds for the NSIDC polar
//! stereographic grid closely enough for extent bookkeeping.

// Core modules
pub mod area;
pub mod cli;
pub mod errors;
pub mod fetch;
pub mod grid;
pub mod metadata;
pub mod parallel;
pub mod table;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::area::{derive_area, extent_above};
    pub use crate::errors::{Result, SeaIceError};
    pub use crate::fetch::{download_grid, ErddapQuery, SpatialBounds};
    pub use crate::grid::ConcGrid;
    pub use crate::parallel::ParallelConfig;
    pub use crate::table::{CellRow, CellTable};
}
