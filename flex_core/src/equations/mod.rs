//! # Structural Mechanics Equations
//!
//! Closed-form equations used both as inputs to the numerical calculation
//! (bending moment, section inertia) and as the reference it is validated
//! against (slope and deflection profiles).
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported beam under full-span uniform load
//! - [`section`] - Cross-section properties (A, I)

pub mod beam;
pub mod section;

// Re-export commonly used items
pub use beam::{
    uniform_load_deflection,
    uniform_load_end_slope,
    uniform_load_max_moment,
    uniform_load_midspan_deflection,
    uniform_load_moment,
    uniform_load_reactions,
    uniform_load_shear,
    uniform_load_slope,
};

pub use section::{rectangular_area, rectangular_moment_of_inertia};
