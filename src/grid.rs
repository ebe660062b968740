//! NetCDF grid loading
//!
//! This module reads the downloaded griddap file into an in-memory grid:
//! the concentration field for the single requested time step plus the
//! projected y/x cell-center coordinates it is defined on.

use crate::errors::{Result, SeaIceError};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use ndarray::Array2;
use netcdf::{AttributeValue, File, Variable};

/// A single-time-step concentration grid on a projected coordinate system.
///
/// `conc` is stored row-major as (y, x); fill values are mapped to NaN on
/// load so every downstream consumer sees one missing-data convention.
#[derive(Debug, Clone)]
pub struct ConcGrid {
    /// Name of the grid variable this was read from
    pub variable: String,
    /// Raw value of the time coordinate, if the variable carries a time axis
    pub time_value: Option<f64>,
    /// CF units string of the time coordinate, e.g. "days since 1970-01-01"
    pub time_units: Option<String>,
    /// Projected y cell centers, meters
    pub y: Vec<f64>,
    /// Projected x cell centers, meters
    pub x: Vec<f64>,
    /// Concentration values, shape (ny, nx), NaN where the file had fill
    pub conc: Array2<f32>,
    /// Units attribute of the grid variable, if present
    pub units: Option<String>,
}

impl ConcGrid {
    /// Load a grid variable and its coordinate variables from an open file.
    ///
    /// The variable must have dimensions (time, y, x) with a single time
    /// step, or just (y, x). The y and x coordinate variables are looked up
    /// by the dimension names.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable or either coordinate variable is
    /// missing, or if the data does not match the coordinate lengths.
    pub fn from_file(file: &File, var_name: &str) -> Result<Self> {
        let var = file
            .variable(var_name)
            .ok_or_else(|| SeaIceError::VariableNotFound {
                var: var_name.to_string(),
            })?;

        let dim_names: Vec<String> = var
            .dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

        let (time_dim, y_dim, x_dim) = match dim_names.as_slice() {
            [t, y, x] => (Some(t.clone()), y.clone(), x.clone()),
            [y, x] => (None, y.clone(), x.clone()),
            _ => {
                return Err(SeaIceError::GridError(format!(
                    "Variable '{}' has {} dimensions, expected (time, y, x) or (y, x)",
                    var_name,
                    dim_names.len()
                )))
            }
        };

        if time_dim.is_some() && shape[0] != 1 {
            return Err(SeaIceError::GridError(format!(
                "Variable '{}' has {} time steps, expected exactly 1",
                var_name, shape[0]
            )));
        }

        let y = read_coordinate(file, &y_dim)?;
        let x = read_coordinate(file, &x_dim)?;
        let (ny, nx) = (y.len(), x.len());

        let data_vec: Vec<f32> = var.get_values::<f32, _>(..)?;
        if data_vec.len() != ny * nx {
            return Err(SeaIceError::GridError(format!(
                "Variable '{}' has {} values but coordinates describe {}x{} cells",
                var_name,
                data_vec.len(),
                ny,
                nx
            )));
        }

        let fill_value = numeric_attribute(&var, "_FillValue");
        let conc_vec: Vec<f32> = match fill_value {
            Some(fv) => data_vec
                .into_iter()
                .map(|v| if v == fv { f32::NAN } else { v })
                .collect(),
            None => data_vec,
        };
        let conc = Array2::from_shape_vec((ny, nx), conc_vec)?;

        let (time_value, time_units) = match time_dim {
            Some(ref t_name) => {
                let t_var = file.variable(t_name);
                let value = match t_var.as_ref() {
                    Some(v) => v.get_values::<f64, _>(..)?.first().copied(),
                    None => None,
                };
                let units = t_var.as_ref().and_then(units_attribute);
                (value, units)
            }
            None => (None, None),
        };

        Ok(Self {
            variable: var_name.to_string(),
            time_value,
            time_units,
            y,
            x,
            conc,
            units: units_attribute(&var),
        })
    }

    /// Number of rows (y cells)
    pub fn ny(&self) -> usize {
        self.y.len()
    }

    /// Number of columns (x cells)
    pub fn nx(&self) -> usize {
        self.x.len()
    }

    /// Grid spacing (dy, dx) in meters, derived from consecutive cell centers.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis has fewer than two cells or if the
    /// spacing varies by more than 0.5% along an axis.
    pub fn spacing(&self) -> Result<(f64, f64)> {
        let dy = uniform_spacing(&self.y, "y")?;
        let dx = uniform_spacing(&self.x, "x")?;
        Ok((dy, dx))
    }

    /// Decode the CF time coordinate into a UTC timestamp, if possible.
    ///
    /// Understands "seconds/minutes/hours/days since <epoch>" units. Returns
    /// None when the variable has no time axis or the units are not
    /// recognized.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let value = self.time_value?;
        let units = self.time_units.as_deref()?;
        let (step, epoch_str) = units.split_once(" since ")?;
        let epoch = parse_epoch(epoch_str.trim())?;

        let seconds = match step.trim().to_lowercase().as_str() {
            "seconds" | "second" => value,
            "minutes" | "minute" => value * 60.0,
            "hours" | "hour" => value * 3600.0,
            "days" | "day" => value * 86_400.0,
            _ => return None,
        };
        epoch.checked_add_signed(Duration::seconds(seconds as i64))
    }
}

/// Read a 1-D coordinate variable by name.
fn read_coordinate(file: &File, name: &str) -> Result<Vec<f64>> {
    let var = file.variable(name).ok_or_else(|| {
        SeaIceError::GridError(format!("Coordinate variable '{}' not found in file", name))
    })?;
    Ok(var.get_values::<f64, _>(..)?)
}

/// Extract a numeric attribute as f32, accepting the common NetCDF types.
fn numeric_attribute(var: &Variable, name: &str) -> Option<f32> {
    var.attribute(name)
        .and_then(|attr| match attr.value().ok()? {
            AttributeValue::Float(v) => Some(v),
            AttributeValue::Double(v) => Some(v as f32),
            AttributeValue::Short(v) => Some(f32::from(v)),
            AttributeValue::Int(v) => Some(v as f32),
            _ => None,
        })
}

/// Extract the units attribute of a variable as a string.
fn units_attribute(var: &Variable) -> Option<String> {
    var.attribute("units")
        .and_then(|attr| match attr.value().ok()? {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        })
}

/// Spacing between consecutive centers, verified uniform within 0.5%.
fn uniform_spacing(coords: &[f64], axis: &str) -> Result<f64> {
    if coords.len() < 2 {
        return Err(SeaIceError::GridError(format!(
            "Axis '{}' has {} cells, need at least 2 to derive spacing",
            axis,
            coords.len()
        )));
    }

    let first = (coords[1] - coords[0]).abs();
    for pair in coords.windows(2) {
        let step = (pair[1] - pair[0]).abs();
        if (step - first).abs() > first * 0.005 {
            return Err(SeaIceError::GridError(format!(
                "Axis '{}' spacing is not uniform: {} vs {}",
                axis, first, step
            )));
        }
    }
    Ok(first)
}

fn parse_epoch(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}
