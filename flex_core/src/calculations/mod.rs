//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, validated)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, FlexError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`deflection`] - Slope and deflection of a simply-supported beam by
//!   trapezoidal integration of curvature

pub mod deflection;

// Re-export commonly used types
pub use deflection::{
    calculate, BeamProfile, DeflectionInput, DeflectionResult, ProfileQuantity, Section,
    SlopeCorrection,
};
