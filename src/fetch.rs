//! ERDDAP griddap fetch
//!
//! Builds the griddap query URL for a single monthly time step over a fixed
//! spatial window and downloads the resulting NetCDF file with a blocking
//! HTTP GET. Any network or HTTP failure aborts the run before the transform
//! steps see partial data.

use crate::errors::{Result, SeaIceError};
use chrono::{DateTime, TimeZone, Utc};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default ERDDAP server (NOAA PolarWatch)
pub const DEFAULT_BASE_URL: &str = "https://polarwatch.noaa.gov/erddap";

/// Default dataset: NSIDC CDR sea-ice concentration, northern hemisphere, monthly
pub const DEFAULT_DATASET: &str = "nsidcG02202v4nhmday";

/// Default grid variable within the dataset
pub const DEFAULT_VARIABLE: &str = "cdr_seaice_conc_monthly";

/// Spatial window of a griddap query, in projected grid coordinates (meters).
///
/// The y axis of the NSIDC polar stereographic grid runs north to south, so
/// `y_start` is normally larger than `y_stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialBounds {
    pub y_start: f64,
    pub y_stop: f64,
    pub x_start: f64,
    pub x_stop: f64,
}

impl Default for SpatialBounds {
    fn default() -> Self {
        // Full northern-hemisphere window of the 25 km CDR grid
        Self {
            y_start: 4_851_137.11,
            y_stop: -4_850_758.92,
            x_start: -3_850_000.0,
            x_stop: 3_750_000.0,
        }
    }
}

/// A griddap query for one variable at one time step over a spatial window.
#[derive(Debug, Clone)]
pub struct ErddapQuery {
    pub base_url: String,
    pub dataset_id: String,
    pub variable: String,
    pub time: DateTime<Utc>,
    pub bounds: SpatialBounds,
}

impl Default for ErddapQuery {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset_id: DEFAULT_DATASET.to_string(),
            variable: DEFAULT_VARIABLE.to_string(),
            time: Utc.with_ymd_and_hms(2022, 12, 1, 0, 0, 0).unwrap(),
            bounds: SpatialBounds::default(),
        }
    }
}

impl ErddapQuery {
    /// Render the full griddap query URL.
    ///
    /// griddap constraints take the form `[(start):stride:(stop)]` per axis,
    /// ordered time, y, x for this dataset. A single time step repeats the
    /// same instant as start and stop.
    pub fn url(&self) -> String {
        let t = self.time.format("%Y-%m-%dT%H:%M:%SZ");
        format!(
            "{}/griddap/{}.nc?{}[({}):1:({})][({}):1:({})][({}):1:({})]",
            self.base_url,
            self.dataset_id,
            self.variable,
            t,
            t,
            self.bounds.y_start,
            self.bounds.y_stop,
            self.bounds.x_start,
            self.bounds.x_stop,
        )
    }
}

/// Download the grid named by `query` into `dest`.
///
/// Returns the path of the written file. A non-2xx response or any transport
/// error is returned as an error without writing a partial file.
///
/// # Errors
///
/// Returns an error if the request fails, the server responds with a non-2xx
/// status, or the local file cannot be written.
pub fn download_grid(query: &ErddapQuery, dest: &Path) -> Result<PathBuf> {
    let url = query.url();
    println!("🌐 Requesting {}", url);

    let client = reqwest::blocking::Client::new();
    let mut response = client.get(&url).send()?;

    if !response.status().is_success() {
        return Err(SeaIceError::HttpStatus {
            status: response.status().as_u16(),
            url,
        });
    }

    let mut file = File::create(dest)?;
    let bytes = response.copy_to(&mut file)?;
    println!("✅ Downloaded {} bytes to {}", bytes, dest.display());

    Ok(dest.to_path_buf())
}
