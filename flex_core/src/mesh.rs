//! # Span Mesh
//!
//! Uniform 1-D sample grid along the beam span. Points are spaced `step_m`
//! apart starting at the left support; the last point is snapped to the span
//! length so both supports are always sampled, which means the final interval
//! can be shorter than the step.
//!
//! ## Example
//!
//! ```rust
//! use flex_core::mesh::Mesh;
//!
//! let mesh = Mesh::uniform(5.0, 0.1).unwrap();
//! assert_eq!(mesh.len(), 51);
//! assert_eq!(mesh.positions()[0], 0.0);
//! assert_eq!(mesh.length_m(), 5.0);
//! assert_eq!(mesh.midspan_index(), 25);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{FlexError, FlexResult};

/// Upper bound on the number of mesh points
pub const MAX_MESH_POINTS: usize = 10_000_000;

/// Relative tolerance (in steps) under which a regular point is considered
/// to coincide with the end of the span
const ENDPOINT_TOLERANCE: f64 = 1e-9;

/// Ascending sample positions along the span, in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    positions: Vec<f64>,
    step_m: f64,
}

impl Mesh {
    /// Build a uniform mesh over `[0, length_m]`.
    ///
    /// Regular points are `i * step_m` for `i = 0..ceil(length / step)`, kept
    /// while they lie strictly inside the span. The span length itself is
    /// always appended as the last point. A regular point that lands within
    /// `1e-9 * step_m` of the end is dropped rather than producing a
    /// zero-length final interval.
    ///
    /// # Errors
    ///
    /// `FlexError::InvalidInput` if either argument is non-finite or not
    /// strictly positive, or if the mesh would exceed [`MAX_MESH_POINTS`].
    pub fn uniform(length_m: f64, step_m: f64) -> FlexResult<Self> {
        if !length_m.is_finite() || length_m <= 0.0 {
            return Err(FlexError::invalid_input(
                "length_m",
                length_m.to_string(),
                "Length must be a positive, finite number",
            ));
        }
        if !step_m.is_finite() || step_m <= 0.0 {
            return Err(FlexError::invalid_input(
                "step_m",
                step_m.to_string(),
                "Step must be a positive, finite number",
            ));
        }

        let intervals = (length_m / step_m).ceil();
        if intervals >= MAX_MESH_POINTS as f64 {
            return Err(FlexError::invalid_input(
                "step_m",
                step_m.to_string(),
                format!(
                    "Step too small for a {} m span (more than {} mesh points)",
                    length_m, MAX_MESH_POINTS
                ),
            ));
        }
        let intervals = intervals as usize;

        let cutoff = length_m - step_m * ENDPOINT_TOLERANCE;
        let mut positions = Vec::with_capacity(intervals + 1);
        positions.push(0.0);
        for i in 1..intervals {
            let x = i as f64 * step_m;
            if x >= cutoff {
                break;
            }
            positions.push(x);
        }
        positions.push(length_m);

        Ok(Mesh { positions, step_m })
    }

    /// Sample positions (m), ascending
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Nominal step size (m)
    pub fn step_m(&self) -> f64 {
        self.step_m
    }

    /// Number of sample points
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// A mesh built by [`Mesh::uniform`] always has at least two points
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Span length (position of the last point)
    pub fn length_m(&self) -> f64 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Index of the mid-span sample: `len / 2`.
    ///
    /// For an odd number of points this is the exact centre node. For an
    /// even number it is the node just right of centre.
    pub fn midspan_index(&self) -> usize {
        self.positions.len() / 2
    }

    /// Position of the mid-span sample (m)
    pub fn midspan_position(&self) -> f64 {
        self.positions
            .get(self.midspan_index())
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether the mid-span sample sits at `L/2` (within rounding)
    pub fn midspan_is_centered(&self) -> bool {
        let half = self.length_m() / 2.0;
        (self.midspan_position() - half).abs() <= half * 1e-9
    }

    /// Local interval widths `x[i] - x[i-1]`, one per interval
    pub fn intervals(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.windows(2).map(|w| w[1] - w[0])
    }
}
