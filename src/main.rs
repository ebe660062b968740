//! Entry point for the seaice-extent tool.
//! Handles CLI parsing, the ERDDAP fetch, and dispatches the load → table →
//! area pipeline.

use clap::Parser;
use netcdf::open;
use seaice_extent::area::{derive_area, extent_above, print_area_column};
use seaice_extent::cli::Args;
use seaice_extent::errors::Result;
use seaice_extent::fetch::{download_grid, ErddapQuery};
use seaice_extent::grid::ConcGrid;
use seaice_extent::metadata::list_variables_and_dimensions;
use seaice_extent::parallel::{get_parallel_info, ParallelConfig};
use seaice_extent::table::CellTable;

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        r#"
------------------------------------------------------------------
        ____             ___              _____     _             _
       / ___|  ___  __ _|_ _|___ ___     | ____|_ _| |_ ___ _ __ | |_
       \___ \ / _ \/ _` || |/ __/ _ \    |  _| \ \/ / __/ _ \ '_ \| __|
        ___) |  __/ (_| || | (_|  __/    | |___ >  <| ||  __/ | | | |_
       |____/ \___|\__,_|___\___\___|    |_____/_/\_\\__\___|_| |_|\__|
                 Sea-ice concentration grid area tool
------------------------------------------------------------------
                        "#
    );

    // Configure the thread pool before any parallel work
    let parallel_config = ParallelConfig::new(args.threads);
    parallel_config.setup_global_pool()?;
    if args.verbose {
        get_parallel_info().print_info();
    }

    // Fetch the grid unless a local file was supplied
    let path = match args.input {
        Some(ref input) => {
            println!("📂 Using local file {}", input.display());
            input.clone()
        }
        None => {
            let query = ErddapQuery {
                dataset_id: args.dataset.clone(),
                variable: args.variable.clone(),
                time: args.time,
                bounds: args.bounds.unwrap_or_default(),
                ..ErddapQuery::default()
            };
            download_grid(&query, &args.output)?
        }
    };

    let file = open(&path)?;
    println!("Successfully opened NetCDF file: {}", path.display());

    if args.list_vars {
        list_variables_and_dimensions(&file)?;
        return Ok(());
    }

    let grid = ConcGrid::from_file(&file, &args.variable)?;
    if args.verbose {
        println!("🚀 Loaded grid with shape: {:?}", (grid.ny(), grid.nx()));
        if let Some(units) = &grid.units {
            println!("   Variable units: {}", units);
        }
        if let Some(ts) = grid.timestamp() {
            println!("   Time step: {}", ts.to_rfc3339());
        }
        println!("   Areas assume projected coordinates in meters on an equal-area grid");
    }

    let table = CellTable::from_grid(&grid)?;
    if args.verbose {
        println!(
            "   Table: {} rows, {} with data, cell size {:.0} m × {:.0} m",
            table.len(),
            table.valid_rows(),
            table.dy,
            table.dx
        );
    }

    let areas = derive_area(&table);
    print_area_column(&areas);

    if args.extent {
        let extent = extent_above(&table, &areas, args.threshold)?;
        println!(
            "\n❄ Sea-ice extent (concentration ≥ {:.2}): {:.2} km²",
            args.threshold, extent
        );
    }

    Ok(())
}
