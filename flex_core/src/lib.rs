//! # flex_core - Beam Deflection by Curvature Integration
//!
//! `flex_core` computes the slope and deflection of a simply-supported beam
//! under a uniform load by integrating curvature (M/EI) twice with the
//! trapezoidal rule, and checks the result against the closed-form
//! Euler-Bernoulli solution.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Inputs, results and reports implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use flex_core::calculations::{calculate, DeflectionInput};
//!
//! // Reference beam: 10 kN/m over 5 m, E = 30 GPa, 300 x 500 mm section
//! let result = calculate(&DeflectionInput::default()).unwrap();
//!
//! println!("Computed mid-span deflection: {:.6e} m", result.midspan_deflection_m);
//! println!("Closed-form:                  {:.6e} m", result.theoretical_midspan_deflection_m);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The deflection calculation (input, result, pipeline)
//! - [`equations`] - Closed-form beam and section formulas
//! - [`mesh`] - Span sample grid
//! - [`integration`] - Running trapezoidal rule
//! - [`report`] - Run report with metadata
//! - [`file_io`] - JSON input loading and atomic report saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod integration;
pub mod mesh;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, DeflectionInput, DeflectionResult};
pub use errors::{FlexError, FlexResult};
pub use file_io::{load_input, load_report, save_report};
pub use report::DeflectionReport;
