//! Area derivation
//!
//! Computes the derived area column from each row's geometry and the total
//! sea-ice extent above a concentration threshold. Areas are planar, which
//! is only meaningful because the grid is on an equal-area-in-meters
//! projection; the division by 1e6 converts m² to km².

use crate::errors::Result;
use crate::table::CellTable;
use geo::Area;
use rayon::prelude::*;

/// Square meters per square kilometer
const M2_PER_KM2: f64 = 1.0e6;

/// Derive the per-row area column in km².
///
/// The output has exactly one value per table row, in row order. Degenerate
/// geometries yield 0.0; values are never negative.
pub fn derive_area(table: &CellTable) -> Vec<f64> {
    println!(
        "⚡ Deriving areas for {} cells across {} CPU cores",
        table.len(),
        rayon::current_num_threads()
    );

    table
        .rows
        .par_iter()
        .map(|row| row.geometry.unsigned_area() / M2_PER_KM2)
        .collect()
}

/// Total extent in km²: the summed area of cells at or above `threshold`
/// concentration. Cells with missing data never count.
///
/// # Errors
///
/// Returns an error if `areas` does not have one value per table row.
pub fn extent_above(table: &CellTable, areas: &[f64], threshold: f32) -> Result<f64> {
    if areas.len() != table.len() {
        return Err(format!(
            "Area column has {} values for {} rows",
            areas.len(),
            table.len()
        )
        .into());
    }

    let extent = table
        .rows
        .par_iter()
        .zip(areas.par_iter())
        .filter_map(|(row, &area)| match row.concentration {
            Some(c) if c >= threshold => Some(area),
            _ => None,
        })
        .sum();

    Ok(extent)
}

/// Print the area column in the style of a series dump: head and tail with
/// elision for large tables, then a one-line summary.
pub fn print_area_column(areas: &[f64]) {
    println!("\n Area column (km²)");
    println!("==================");

    if areas.len() <= 20 {
        for (i, area) in areas.iter().enumerate() {
            println!("   [{}]: {:.4}", i, area);
        }
    } else {
        for (i, area) in areas.iter().take(10).enumerate() {
            println!("   [{}]: {:.4}", i, area);
        }
        println!("   ... ({} more values)", areas.len() - 20);
        let tail_start = areas.len() - 10;
        for (offset, area) in areas.iter().skip(tail_start).enumerate() {
            println!("   [{}]: {:.4}", tail_start + offset, area);
        }
    }

    let total: f64 = areas.iter().sum();
    println!("\n   Rows: {}, total cell area: {:.2} km²", areas.len(), total);
}
