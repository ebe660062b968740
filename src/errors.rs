//! Centralized error handling for the sea-ice extent tool
//!
//! This module provides structured error types to replace the generic `Box<dyn Error>`,
//! enabling better error context and type safety.

use std::fmt;

/// Main error type for sea-ice extent operations
#[derive(Debug)]
pub enum SeaIceError {
    /// HTTP fetch errors from the ERDDAP request
    HttpError(reqwest::Error),

    /// Unexpected HTTP status returned by the data server
    HttpStatus { status: u16, url: String },

    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// Grid structure errors (coordinate/data mismatch, non-uniform spacing)
    GridError(String),

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Generic error for anything else
    Generic(String),
}

impl fmt::Display for SeaIceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeaIceError::HttpError(e) => write!(f, "HTTP error: {}", e),
            SeaIceError::HttpStatus { status, url } => {
                write!(f, "Server returned HTTP {} for {}", status, url)
            }
            SeaIceError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            SeaIceError::IoError(e) => write!(f, "I/O error: {}", e),
            SeaIceError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            SeaIceError::GridError(msg) => write!(f, "Grid error: {}", msg),
            SeaIceError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            SeaIceError::ArrayError(e) => write!(f, "Array error: {}", e),
            SeaIceError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SeaIceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeaIceError::HttpError(e) => Some(e),
            SeaIceError::NetCDFError(e) => Some(e),
            SeaIceError::IoError(e) => Some(e),
            SeaIceError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SeaIceError {
    fn from(error: reqwest::Error) -> Self {
        SeaIceError::HttpError(error)
    }
}

impl From<netcdf::Error> for SeaIceError {
    fn from(error: netcdf::Error) -> Self {
        SeaIceError::NetCDFError(error)
    }
}

impl From<std::io::Error> for SeaIceError {
    fn from(error: std::io::Error) -> Self {
        SeaIceError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for SeaIceError {
    fn from(error: ndarray::ShapeError) -> Self {
        SeaIceError::ArrayError(error)
    }
}

impl From<String> for SeaIceError {
    fn from(error: String) -> Self {
        SeaIceError::Generic(error)
    }
}

impl From<&str> for SeaIceError {
    fn from(error: &str) -> Self {
        SeaIceError::Generic(error.to_string())
    }
}

/// Result type alias for sea-ice extent operations
pub type Result<T> = std::result::Result<T, SeaIceError>;
