//! # Cross-Section Property Formulas
//!
//! Geometric properties of a solid rectangular cross-section.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Second moment of area about the centroidal strong axis
//! - `b` = Width of section
//! - `d` = Depth (height) of section

/// Calculate cross-sectional area for rectangular section
///
/// # Formula
/// A = b × d
#[inline]
pub fn rectangular_area(b: f64, d: f64) -> f64 {
    b * d
}

/// Calculate second moment of area for rectangular section about its
/// centroidal strong axis
///
/// ```text
///     ┌─────────┐
///     │         │
///   d │ ════════│ ← neutral axis at d/2
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// I = (1/12)·b·d³
///
/// # Example
/// ```rust
/// use flex_core::equations::section::rectangular_moment_of_inertia;
///
/// // 300 mm x 500 mm concrete section
/// let i = rectangular_moment_of_inertia(0.3, 0.5);
/// assert!((i - 0.003125).abs() < 1e-12);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, d: f64) -> f64 {
    (1.0 / 12.0) * b * d.powi(3)
}
