//! # File I/O Module
//!
//! Reads calculation inputs and writes/reads reports as JSON.
//!
//! - **Atomic saves**: Write to `.tmp`, sync, rename to prevent corruption
//! - **Version validation**: Reports from another schema series are rejected
//!
//! ## Example
//!
//! ```rust,no_run
//! use flex_core::file_io::{load_input, save_report};
//! use flex_core::report::DeflectionReport;
//! use std::path::Path;
//!
//! let input = load_input(Path::new("beam.json"))?;
//! let report = DeflectionReport::run(input)?;
//! save_report(&report, Path::new("beam-report.json"))?;
//! # Ok::<(), flex_core::errors::FlexError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

use crate::calculations::deflection::DeflectionInput;
use crate::errors::{FlexError, FlexResult};
use crate::report::{DeflectionReport, SCHEMA_VERSION};

/// Read a whole file into a string
fn read_to_string(path: &Path) -> FlexResult<String> {
    let mut file = File::open(path).map_err(|e| {
        FlexError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        FlexError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    Ok(contents)
}

/// Load a calculation input from a JSON file.
///
/// Fields missing from the file take their reference defaults, so `{}` is
/// a valid input describing the reference beam. The input is not validated
/// here; [`crate::calculations::calculate`] does that.
///
/// # Returns
///
/// * `Ok(DeflectionInput)` - Parsed input
/// * `Err(FlexError::SerializationError)` - Invalid JSON
/// * `Err(FlexError::FileError)` - I/O error
pub fn load_input(path: &Path) -> FlexResult<DeflectionInput> {
    let contents = read_to_string(path)?;
    let input: DeflectionInput =
        serde_json::from_str(&contents).map_err(|e| FlexError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    debug!("loaded input '{}' from {}", input.label, path.display());
    Ok(input)
}

/// Save a report to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize report to JSON
/// 2. Write to a temporary file (`<name>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename the temporary file over `path` (atomic on most filesystems)
pub fn save_report(report: &DeflectionReport, path: &Path) -> FlexResult<()> {
    let json = serde_json::to_string_pretty(report)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        FlexError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        FlexError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        FlexError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        FlexError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("saved report {} to {}", report.meta.id, path.display());
    Ok(())
}

/// Load a report from a file.
///
/// # Returns
///
/// * `Ok(DeflectionReport)` - Successfully loaded report
/// * `Err(FlexError::VersionMismatch)` - File version is incompatible
/// * `Err(FlexError::SerializationError)` - Invalid JSON
/// * `Err(FlexError::FileError)` - I/O error
pub fn load_report(path: &Path) -> FlexResult<DeflectionReport> {
    let contents = read_to_string(path)?;

    let report: DeflectionReport =
        serde_json::from_str(&contents).map_err(|e| FlexError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    if !report.meta.is_compatible() {
        return Err(FlexError::VersionMismatch {
            file_version: report.meta.version,
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    debug!("loaded report {} from {}", report.meta.id, path.display());
    Ok(report)
}
