//! End-to-end pipeline tests
//!
//! Runs the full load → table → area → extent pipeline against synthetic
//! NetCDF files the way main() wires it, skipping only the network fetch.

use ndarray::{Array1, Array3};
use netcdf::{create, open};
use seaice_extent::{
    area::{derive_area, extent_above, print_area_column},
    errors::Result,
    fetch::{download_grid, ErddapQuery},
    grid::ConcGrid,
    metadata::{list_variables_and_dimensions, print_metadata},
    table::CellTable,
};
use tempfile::tempdir;

#[test]
fn test_full_pipeline() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("seaice.nc");

    // A 10 × 8 grid mimicking a griddap slice: descending y, ascending x,
    // 25 km spacing, an ice tongue in the upper rows and open water below.
    let (ny, nx) = (10, 8);
    let dy = 25_000.0;

    {
        let mut file = create(&file_path)?;
        file.add_dimension("time", 1)?;
        file.add_dimension("ygrid", ny)?;
        file.add_dimension("xgrid", nx)?;

        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "days since 1970-01-01")?;
        time_var.put(Array1::from_vec(vec![19327.0]).view(), ..)?;

        let y: Vec<f64> = (0..ny).map(|i| 125_000.0 - dy * i as f64).collect();
        let mut y_var = file.add_variable::<f64>("ygrid", &["ygrid"])?;
        y_var.put(Array1::from_vec(y).view(), ..)?;

        let x: Vec<f64> = (0..nx).map(|j| -100_000.0 + dy * j as f64).collect();
        let mut x_var = file.add_variable::<f64>("xgrid", &["xgrid"])?;
        x_var.put(Array1::from_vec(x).view(), ..)?;

        // Top 4 rows fully iced, next 2 marginal, rest open water; one fill
        // cell in the marginal zone.
        let mut conc = vec![0.0f32; ny * nx];
        for i in 0..ny {
            for j in 0..nx {
                conc[i * nx + j] = match i {
                    0..=3 => 0.95,
                    4 | 5 => 0.30,
                    _ => 0.02,
                };
            }
        }
        conc[4 * nx + 3] = -999.0;

        let mut var =
            file.add_variable::<f32>("cdr_seaice_conc_monthly", &["time", "ygrid", "xgrid"])?;
        var.put_attribute("units", "1")?;
        var.put_attribute("_FillValue", -999.0f32)?;
        var.put(Array3::from_shape_vec((1, ny, nx), conc)?.view(), ..)?;

        file.add_attribute("title", "Synthetic sea-ice slice")?;
    }

    let file = open(&file_path)?;

    // Metadata helpers run cleanly against the downloaded file
    print_metadata(&file)?;
    list_variables_and_dimensions(&file)?;

    let grid = ConcGrid::from_file(&file, "cdr_seaice_conc_monthly")?;
    assert_eq!((grid.ny(), grid.nx()), (ny, nx));

    let table = CellTable::from_grid(&grid)?;
    assert_eq!(table.len(), ny * nx);
    assert_eq!(table.valid_rows(), ny * nx - 1);

    let areas = derive_area(&table);
    assert_eq!(areas.len(), table.len());
    assert!(areas.iter().all(|&a| a >= 0.0));

    // Every cell of the uniform grid is 625 km²
    assert!(areas.iter().all(|&a| (a - 625.0).abs() < 1e-9));

    print_area_column(&areas);

    // Extent at 0.15: 4 iced rows plus 2 marginal rows minus the fill cell
    let extent = extent_above(&table, &areas, 0.15)?;
    let expected_cells = (6 * nx - 1) as f64;
    assert!((extent - expected_cells * 625.0).abs() < 1e-9);

    // Raising the threshold past the marginal zone leaves the iced rows only
    let packed = extent_above(&table, &areas, 0.5)?;
    assert!((packed - (4 * nx) as f64 * 625.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_fetch_failure_aborts_pipeline() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let dest = temp_dir.path().join("seaice.nc");

    let query = ErddapQuery {
        base_url: "http://127.0.0.1:1".to_string(),
        ..ErddapQuery::default()
    };

    // The fetch fails and nothing is written, so the transform steps never
    // see a partial file.
    let result = download_grid(&query, &dest);
    assert!(result.is_err());
    assert!(!dest.exists());
    assert!(open(&dest).is_err());
}
