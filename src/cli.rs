//! Defines command-line interface options using `clap`.

use crate::fetch::SpatialBounds;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Parser;
use std::path::PathBuf;

/// A CLI tool that fetches a monthly sea-ice concentration grid and derives
/// per-cell areas
#[derive(Parser, Debug)]
#[command(
    version = "0.1.0",
    name = "seaice-extent",
    about = "Fetch a monthly sea-ice concentration grid from ERDDAP and derive per-cell areas in km²"
)]
pub struct Args {
    /// ERDDAP dataset id
    #[arg(long, default_value = crate::fetch::DEFAULT_DATASET)]
    pub dataset: String,

    /// Grid variable to read from the dataset
    #[arg(long, default_value = crate::fetch::DEFAULT_VARIABLE)]
    pub variable: String,

    /// Time step to fetch, as a date (YYYY-MM-DD) or RFC 3339 instant
    #[arg(long, value_parser = parse_time_arg, default_value = "2022-12-01")]
    pub time: DateTime<Utc>,

    /// Spatial window in projected meters, formatted as <y0>:<y1>:<x0>:<x1>
    #[arg(long, value_parser = parse_bounds_arg)]
    pub bounds: Option<SpatialBounds>,

    /// Path to write the downloaded NetCDF file
    #[arg(short, long, default_value = "seaice.nc")]
    pub output: PathBuf,

    /// Read this local NetCDF file instead of fetching from ERDDAP
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Also compute total extent of cells at or above this concentration
    #[arg(long)]
    pub extent: bool,

    /// Concentration threshold for the extent computation
    #[arg(long, default_value_t = 0.15)]
    pub threshold: f32,

    /// List all variables and dimensions in the downloaded file and exit
    #[arg(long)]
    pub list_vars: bool,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn parse_time_arg(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| "Invalid time of day".to_string())?;
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err("Invalid time: Expected 'YYYY-MM-DD' or an RFC 3339 instant.".to_string())
}

fn parse_bounds_arg(s: &str) -> Result<SpatialBounds, String> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [y0, y1, x0, x1] => {
            let parse = |v: &str, name: &str| {
                v.parse::<f64>()
                    .map_err(|_| format!("Invalid number for {}: '{}'", name, v))
            };
            Ok(SpatialBounds {
                y_start: parse(y0, "y0")?,
                y_stop: parse(y1, "y1")?,
                x_start: parse(x0, "x0")?,
                x_stop: parse(x1, "x1")?,
            })
        }
        _ => Err("Invalid format: Expected '<y0>:<y1>:<x0>:<x1>'.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_and_instant() {
        let from_date = parse_time_arg("2022-12-01").unwrap();
        let from_instant = parse_time_arg("2022-12-01T00:00:00Z").unwrap();
        assert_eq!(from_date, from_instant);
        assert!(parse_time_arg("december").is_err());
    }

    #[test]
    fn parses_bounds() {
        let bounds = parse_bounds_arg("100.5:-100.5:-50:50").unwrap();
        assert_eq!(bounds.y_start, 100.5);
        assert_eq!(bounds.y_stop, -100.5);
        assert_eq!(bounds.x_start, -50.0);
        assert_eq!(bounds.x_stop, 50.0);

        assert!(parse_bounds_arg("1:2:3").is_err());
        assert!(parse_bounds_arg("a:b:c:d").is_err());
    }
}
