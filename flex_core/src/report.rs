//! # Deflection Report
//!
//! A `DeflectionReport` bundles one run's input and result with metadata
//! (id, schema version, timestamp). Reports serialize to human-readable
//! JSON; see [`crate::file_io`] for atomic saves.
//!
//! ## Structure
//!
//! ```text
//! DeflectionReport
//! ├── meta: ReportMetadata (id, schema version, created timestamp)
//! ├── input: DeflectionInput
//! └── result: DeflectionResult (profile, mid-span comparison, extremes)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use flex_core::calculations::DeflectionInput;
//! use flex_core::report::DeflectionReport;
//!
//! let report = DeflectionReport::run(DeflectionInput::default()).unwrap();
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("midspan_deflection_m"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::deflection::{calculate, DeflectionInput, DeflectionResult};
use crate::errors::FlexResult;

/// Current schema version for report files.
///
/// The minor number changes whenever the layout of `DeflectionResult`
/// changes; patch releases only add optional fields.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// `(major, minor)` of a schema version string
fn schema_series(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    match (parts.next().flatten(), parts.next().flatten()) {
        (Some(major), Some(minor)) => Some((major, minor)),
        _ => None,
    }
}

/// Report metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Unique id of this run
    pub id: Uuid,

    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the calculation was run
    pub created: DateTime<Utc>,
}

impl ReportMetadata {
    fn new() -> Self {
        ReportMetadata {
            id: Uuid::new_v4(),
            version: SCHEMA_VERSION.to_string(),
            created: Utc::now(),
        }
    }

    /// Whether a report written under this metadata can be read back.
    ///
    /// Reports from the same `major.minor` series as [`SCHEMA_VERSION`] are
    /// compatible in both directions.
    pub fn is_compatible(&self) -> bool {
        match schema_series(&self.version) {
            Some(series) => Some(series) == schema_series(SCHEMA_VERSION),
            None => false,
        }
    }
}

/// One calculation run: input, result and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionReport {
    pub meta: ReportMetadata,
    pub input: DeflectionInput,
    pub result: DeflectionResult,
}

impl DeflectionReport {
    /// Wrap an already computed result.
    pub fn new(input: DeflectionInput, result: DeflectionResult) -> Self {
        DeflectionReport {
            meta: ReportMetadata::new(),
            input,
            result,
        }
    }

    /// Run the calculation for `input` and wrap the result.
    pub fn run(input: DeflectionInput) -> FlexResult<Self> {
        let result = calculate(&input)?;
        Ok(DeflectionReport::new(input, result))
    }

    /// User label of the run
    pub fn label(&self) -> &str {
        &self.input.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_reference_beam() {
        let report = DeflectionReport::run(DeflectionInput::default()).unwrap();
        assert_eq!(report.meta.version, SCHEMA_VERSION);
        assert_eq!(report.label(), "Simply supported beam");
        assert!(report.result.within_tolerance(0.01));
    }

    #[test]
    fn test_run_propagates_validation_error() {
        let input = DeflectionInput {
            length_m: -1.0,
            ..DeflectionInput::default()
        };
        let err = DeflectionReport::run(input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_reports_get_unique_ids() {
        let a = DeflectionReport::run(DeflectionInput::default()).unwrap();
        let b = DeflectionReport::run(DeflectionInput::default()).unwrap();
        assert_ne!(a.meta.id, b.meta.id);
    }

    #[test]
    fn test_schema_compatibility() {
        let mut meta = ReportMetadata::new();
        assert!(meta.is_compatible());

        for (version, compatible) in [
            ("0.1.9", true),
            ("0.1", true),
            ("0.2.0", false),
            ("0.0.5", false),
            ("1.1.0", false),
            ("garbage", false),
            ("", false),
        ] {
            meta.version = version.to_string();
            assert_eq!(meta.is_compatible(), compatible, "{}", version);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let report = DeflectionReport::run(DeflectionInput::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let loaded: DeflectionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.meta.id, report.meta.id);
        assert_eq!(loaded.result.midspan_index, report.result.midspan_index);
    }
}
