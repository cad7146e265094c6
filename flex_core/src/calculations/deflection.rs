//! # Beam Deflection by Curvature Integration
//!
//! Computes slope and deflection of a simply-supported beam under a
//! full-span uniform load by integrating curvature twice with the
//! trapezoidal rule:
//!
//! ```text
//! M(x) ──÷EI──▶ κ(x) ──∫──▶ θ(x) ──∫──▶ y(x)
//! ```
//!
//! ## Resolving the Slope Constant
//!
//! The slope at the left support is not known up front. It is found by
//! shooting: integrate once from a trial slope, read the slope at mid-span
//! (which must be zero for a symmetric load on a simply-supported beam),
//! shift the starting slope by that amount and integrate again. Deflection
//! then starts from zero at the pin (x = 0).
//!
//! ## Sign Convention
//!
//! Moment is positive sagging and deflection is positive upward, so a
//! downward load produces negative deflection. See [`crate::equations::beam`].
//!
//! ## Example
//!
//! ```rust
//! use flex_core::calculations::deflection::{calculate, DeflectionInput};
//!
//! let input = DeflectionInput::default(); // 10 kN/m on a 5 m span
//! let result = calculate(&input).unwrap();
//!
//! println!("Computed:    {:.6e} m", result.midspan_deflection_m);
//! println!("Theoretical: {:.6e} m", result.theoretical_midspan_deflection_m);
//! assert!(result.relative_error.unwrap() < 0.01);
//! ```

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::equations::beam::{
    uniform_load_deflection, uniform_load_midspan_deflection, uniform_load_moment,
    uniform_load_slope,
};
use crate::equations::section::{rectangular_area, rectangular_moment_of_inertia};
use crate::errors::{FlexError, FlexResult};
use crate::integration::cumulative_trapezoid;
use crate::mesh::Mesh;

/// Reference uniform load (N/m)
pub const DEFAULT_LOAD_N_PER_M: f64 = 10.0e3;
/// Reference span (m)
pub const DEFAULT_LENGTH_M: f64 = 5.0;
/// Reference mesh step (m)
pub const DEFAULT_STEP_M: f64 = 0.1;
/// Reference elastic modulus (Pa)
pub const DEFAULT_MODULUS_PA: f64 = 30.0e9;
/// Reference section width (m)
pub const DEFAULT_SECTION_WIDTH_M: f64 = 0.3;
/// Reference section depth (m)
pub const DEFAULT_SECTION_DEPTH_M: f64 = 0.5;

// ============================================================================
// Input
// ============================================================================

/// Cross-section stiffness definition.
///
/// ## JSON Examples
///
/// ```json
/// { "type": "Rectangular", "width_m": 0.3, "depth_m": 0.5 }
/// { "type": "Inertia", "i_m4": 0.003125 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Section {
    /// Solid rectangle bending about its strong axis
    Rectangular { width_m: f64, depth_m: f64 },
    /// Second moment of area given directly
    Inertia { i_m4: f64 },
}

impl Default for Section {
    fn default() -> Self {
        Section::Rectangular {
            width_m: DEFAULT_SECTION_WIDTH_M,
            depth_m: DEFAULT_SECTION_DEPTH_M,
        }
    }
}

impl Section {
    /// Second moment of area I (m⁴)
    pub fn moment_of_inertia_m4(&self) -> f64 {
        match *self {
            Section::Rectangular { width_m, depth_m } => rectangular_moment_of_inertia(width_m, depth_m),
            Section::Inertia { i_m4 } => i_m4,
        }
    }

    /// Cross-sectional area (m²), when the shape is known
    pub fn area_m2(&self) -> Option<f64> {
        match *self {
            Section::Rectangular { width_m, depth_m } => Some(rectangular_area(width_m, depth_m)),
            Section::Inertia { .. } => None,
        }
    }

    /// Short human-readable description, e.g. `300 x 500 mm rectangle`
    pub fn describe(&self) -> String {
        match *self {
            Section::Rectangular { width_m, depth_m } => {
                format!("{:.0} x {:.0} mm rectangle", width_m * 1000.0, depth_m * 1000.0)
            }
            Section::Inertia { i_m4 } => format!("I = {:.4e} m^4", i_m4),
        }
    }

    fn validate(&self) -> FlexResult<()> {
        match *self {
            Section::Rectangular { width_m, depth_m } => {
                require_positive("section.width_m", width_m)?;
                require_positive("section.depth_m", depth_m)?;
            }
            Section::Inertia { i_m4 } => require_positive("section.i_m4", i_m4)?,
        }
        Ok(())
    }
}

/// Input parameters for the curvature-integration deflection calculation.
///
/// All values are SI base units. Any field missing from JSON takes the
/// reference value from [`Default`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Reference beam",
///   "load_n_per_m": 10000.0,
///   "length_m": 5.0,
///   "step_m": 0.1,
///   "modulus_pa": 30000000000.0,
///   "section": { "type": "Rectangular", "width_m": 0.3, "depth_m": 0.5 },
///   "trial_initial_slope": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeflectionInput {
    /// User label for this run
    pub label: String,

    /// Uniform load w over the full span (N/m, positive downward)
    pub load_n_per_m: f64,

    /// Span length L (m)
    pub length_m: f64,

    /// Nominal mesh step Δx (m)
    pub step_m: f64,

    /// Elastic modulus E (Pa)
    pub modulus_pa: f64,

    /// Cross-section providing I
    pub section: Section,

    /// Starting slope for the first (uncorrected) integration pass (rad).
    ///
    /// Any value gives the same final result; it only changes the size of
    /// the correction.
    pub trial_initial_slope: f64,
}

impl Default for DeflectionInput {
    fn default() -> Self {
        DeflectionInput {
            label: "Simply supported beam".to_string(),
            load_n_per_m: DEFAULT_LOAD_N_PER_M,
            length_m: DEFAULT_LENGTH_M,
            step_m: DEFAULT_STEP_M,
            modulus_pa: DEFAULT_MODULUS_PA,
            section: Section::default(),
            trial_initial_slope: 0.0,
        }
    }
}

impl DeflectionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> FlexResult<()> {
        if !self.load_n_per_m.is_finite() {
            return Err(FlexError::invalid_input(
                "load_n_per_m",
                self.load_n_per_m.to_string(),
                "Load must be a finite number",
            ));
        }
        require_positive("length_m", self.length_m)?;
        require_positive("step_m", self.step_m)?;
        require_positive("modulus_pa", self.modulus_pa)?;
        self.section.validate()?;
        if !self.trial_initial_slope.is_finite() {
            return Err(FlexError::invalid_input(
                "trial_initial_slope",
                self.trial_initial_slope.to_string(),
                "Trial slope must be a finite number",
            ));
        }
        Ok(())
    }

    /// Second moment of area I (m⁴)
    pub fn moment_of_inertia_m4(&self) -> f64 {
        self.section.moment_of_inertia_m4()
    }

    /// Flexural rigidity EI (N·m²)
    pub fn flexural_rigidity(&self) -> f64 {
        self.modulus_pa * self.moment_of_inertia_m4()
    }

    /// Build the span mesh for this input
    pub fn mesh(&self) -> FlexResult<Mesh> {
        Mesh::uniform(self.length_m, self.step_m)
    }
}

fn require_positive(field: &str, value: f64) -> FlexResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FlexError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive, finite number",
        ));
    }
    Ok(())
}

// ============================================================================
// Profile
// ============================================================================

/// Sampled quantities along the span, aligned index-for-index with
/// `positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamProfile {
    /// Mesh positions (m)
    pub positions: Vec<f64>,
    /// Bending moment M (N·m)
    pub bending_moment: Vec<f64>,
    /// Curvature κ = M/EI (1/m)
    pub curvature: Vec<f64>,
    /// Corrected slope θ (rad)
    pub slope: Vec<f64>,
    /// Deflection y (m), positive upward
    pub deflection: Vec<f64>,
}

impl BeamProfile {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Values of one quantity
    pub fn values(&self, quantity: ProfileQuantity) -> &[f64] {
        match quantity {
            ProfileQuantity::BendingMoment => &self.bending_moment,
            ProfileQuantity::Curvature => &self.curvature,
            ProfileQuantity::Slope => &self.slope,
            ProfileQuantity::Deflection => &self.deflection,
        }
    }

    /// `(x, value)` pairs for plotting one quantity
    pub fn diagram(&self, quantity: ProfileQuantity) -> Vec<(f64, f64)> {
        self.positions
            .iter()
            .copied()
            .zip(self.values(quantity).iter().copied())
            .collect()
    }
}

/// The four sampled quantities, in data-flow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileQuantity {
    BendingMoment,
    Curvature,
    Slope,
    Deflection,
}

impl ProfileQuantity {
    /// All quantities in data-flow order
    pub const ALL: [ProfileQuantity; 4] = [
        ProfileQuantity::BendingMoment,
        ProfileQuantity::Curvature,
        ProfileQuantity::Slope,
        ProfileQuantity::Deflection,
    ];

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            ProfileQuantity::BendingMoment => "Bending Moment",
            ProfileQuantity::Curvature => "Curvature",
            ProfileQuantity::Slope => "Slope",
            ProfileQuantity::Deflection => "Deflection",
        }
    }

    /// SI unit of the stored values
    pub fn unit(&self) -> &'static str {
        match self {
            ProfileQuantity::BendingMoment => "N·m",
            ProfileQuantity::Curvature => "1/m",
            ProfileQuantity::Slope => "rad",
            ProfileQuantity::Deflection => "m",
        }
    }
}

// ============================================================================
// Pipeline stages
// ============================================================================

/// Bending moment at each position for uniform load `w` on span `l`
pub fn bending_moments(positions: &[f64], w: f64, l: f64) -> Vec<f64> {
    positions
        .iter()
        .map(|&x| uniform_load_moment(w, l, x))
        .collect()
}

/// Curvature κ = M / (E·I), pointwise
pub fn curvatures(moments: &[f64], modulus: f64, inertia: f64) -> Vec<f64> {
    let ei = modulus * inertia;
    moments.iter().map(|m| m / ei).collect()
}

/// Slope by running trapezoidal integration of curvature from `initial_slope`
pub fn slopes(positions: &[f64], curvature: &[f64], initial_slope: f64) -> Vec<f64> {
    cumulative_trapezoid(positions, curvature, initial_slope)
}

/// Deflection by running trapezoidal integration of slope, zero at x = 0
pub fn deflections(positions: &[f64], slope: &[f64]) -> Vec<f64> {
    cumulative_trapezoid(positions, slope, 0.0)
}

/// Record of the shooting correction applied to the starting slope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeCorrection {
    /// Starting slope of the first pass (rad)
    pub trial_initial_slope: f64,
    /// Mid-span slope obtained from the first pass (rad)
    pub raw_midspan_slope: f64,
    /// Starting slope of the second pass (rad)
    pub corrected_initial_slope: f64,
}

/// Two-pass slope integration.
///
/// Integrates from `trial_initial_slope`, then shifts the starting slope by
/// the mid-span error (target slope at `midspan_index` is zero) and
/// integrates again.
pub fn corrected_slopes(
    positions: &[f64],
    curvature: &[f64],
    trial_initial_slope: f64,
    midspan_index: usize,
) -> (Vec<f64>, SlopeCorrection) {
    let trial = slopes(positions, curvature, trial_initial_slope);
    let raw_midspan_slope = trial.get(midspan_index).copied().unwrap_or(0.0);

    let slope_error = 0.0 - raw_midspan_slope;
    let corrected_initial_slope = trial_initial_slope + slope_error;
    debug!(
        "raw mid-span slope {:.6e} rad, starting slope corrected {:.6e} -> {:.6e} rad",
        raw_midspan_slope, trial_initial_slope, corrected_initial_slope
    );

    let corrected = slopes(positions, curvature, corrected_initial_slope);
    (
        corrected,
        SlopeCorrection {
            trial_initial_slope,
            raw_midspan_slope,
            corrected_initial_slope,
        },
    )
}

// ============================================================================
// Result
// ============================================================================

/// Results from the deflection calculation.
///
/// ## JSON Example (abridged)
///
/// ```json
/// {
///   "flexural_rigidity_nm2": 93750000.0,
///   "midspan_index": 25,
///   "midspan_position_m": 2.5,
///   "midspan_deflection_m": -0.000868,
///   "theoretical_midspan_deflection_m": -0.000868,
///   "relative_error": 0.0003,
///   "end_deflection_m": 0.0,
///   "max_moment_nm": 31250.0,
///   "profile": { "positions": [0.0, 0.1], "bending_moment": [0.0, 2450.0] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionResult {
    /// Flexural rigidity EI (N·m²)
    pub flexural_rigidity_nm2: f64,

    /// Shooting correction applied to the starting slope
    pub slope_correction: SlopeCorrection,

    // === Mid-span ===
    /// Index of the mid-span sample in the profile
    pub midspan_index: usize,
    /// Position of the mid-span sample (m)
    pub midspan_position_m: f64,
    /// Slope at mid-span after correction (rad), zero up to rounding
    pub midspan_slope: f64,
    /// Computed deflection at mid-span (m)
    pub midspan_deflection_m: f64,
    /// Closed-form mid-span deflection −(5/384)(wL⁴)/(EI) (m)
    pub theoretical_midspan_deflection_m: f64,
    /// |theoretical − computed| / |theoretical|, `None` for zero load
    pub relative_error: Option<f64>,

    // === Supports ===
    /// Computed deflection at x = L (m); zero for a symmetric mesh
    pub end_deflection_m: f64,

    // === Extremes ===
    /// Largest bending moment (N·m)
    pub max_moment_nm: f64,
    /// Position of the largest bending moment (m)
    pub max_moment_position_m: f64,
    /// Deflection with the largest magnitude (m, signed)
    pub max_deflection_m: f64,
    /// Position of the largest deflection magnitude (m)
    pub max_deflection_position_m: f64,

    // === Closed-form profile comparison ===
    /// Largest |θ_numerical − θ_exact| over the mesh (rad)
    pub max_slope_deviation: f64,
    /// Largest |y_numerical − y_exact| over the mesh (m)
    pub max_deflection_deviation_m: f64,

    /// Sampled profile
    pub profile: BeamProfile,
}

impl DeflectionResult {
    /// Relative mid-span error as a percentage
    pub fn relative_error_percent(&self) -> Option<f64> {
        self.relative_error.map(|e| e * 100.0)
    }

    /// Whether the mid-span error is at most `tolerance` (fraction).
    ///
    /// A zero-load run has no relative error and passes when the computed
    /// deflection is also zero.
    pub fn within_tolerance(&self, tolerance: f64) -> bool {
        match self.relative_error {
            Some(e) => e <= tolerance,
            None => self.midspan_deflection_m == 0.0,
        }
    }
}

/// Relative error of `computed` against `theoretical`
fn relative_error(computed: f64, theoretical: f64) -> Option<f64> {
    if theoretical == 0.0 {
        None
    } else {
        Some((theoretical - computed).abs() / theoretical.abs())
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Calculate slope and deflection by integrating curvature.
///
/// This is a pure function: the same input always gives the same result.
///
/// # Returns
///
/// * `Ok(DeflectionResult)` - profile, mid-span comparison, extremes
/// * `Err(FlexError::InvalidInput)` - invalid input parameters
/// * `Err(FlexError::CalculationFailed)` - non-finite values in the result
///
/// # Example
///
/// ```rust
/// use flex_core::calculations::deflection::{calculate, DeflectionInput, Section};
///
/// let input = DeflectionInput {
///     label: "Steel beam".to_string(),
///     load_n_per_m: 5_000.0,
///     length_m: 6.0,
///     step_m: 0.05,
///     modulus_pa: 200.0e9,
///     section: Section::Inertia { i_m4: 8.356e-5 },
///     trial_initial_slope: 0.0,
/// };
///
/// let result = calculate(&input).expect("Calculation should succeed");
/// assert!(result.midspan_deflection_m < 0.0);
/// assert!(result.midspan_slope.abs() < 1e-12);
/// ```
pub fn calculate(input: &DeflectionInput) -> FlexResult<DeflectionResult> {
    input.validate()?;

    let mesh = input.mesh()?;
    debug!(
        "mesh: {} points over {} m (step {} m)",
        mesh.len(),
        mesh.length_m(),
        mesh.step_m()
    );
    if !mesh.midspan_is_centered() {
        warn!(
            "mid-span sample at x = {} m is not at L/2 = {} m; \
             the zero-slope condition is applied off-centre",
            mesh.midspan_position(),
            mesh.length_m() / 2.0
        );
    }

    let w = input.load_n_per_m;
    let l = input.length_m;
    let e = input.modulus_pa;
    let i = input.moment_of_inertia_m4();
    let positions = mesh.positions();
    let midspan_index = mesh.midspan_index();

    // === Moment -> curvature -> slope -> deflection ===
    let bending_moment = bending_moments(positions, w, l);
    let curvature = curvatures(&bending_moment, e, i);
    let (slope, slope_correction) =
        corrected_slopes(positions, &curvature, input.trial_initial_slope, midspan_index);
    let deflection = deflections(positions, &slope);

    if let Some(bad) = deflection.iter().position(|d| !d.is_finite()) {
        return Err(FlexError::calculation_failed(
            "deflection",
            format!("non-finite deflection at x = {} m", positions[bad]),
        ));
    }

    // === Mid-span comparison ===
    let midspan_deflection_m = deflection[midspan_index];
    let theoretical_midspan_deflection_m = uniform_load_midspan_deflection(w, l, e, i);
    let relative_error = relative_error(midspan_deflection_m, theoretical_midspan_deflection_m);

    // === Extremes ===
    let mut max_moment_nm = f64::NEG_INFINITY;
    let mut max_moment_position_m = 0.0;
    let mut max_deflection_m = 0.0f64;
    let mut max_deflection_position_m = 0.0;
    let mut max_slope_deviation = 0.0f64;
    let mut max_deflection_deviation_m = 0.0f64;

    for (k, &x) in positions.iter().enumerate() {
        if bending_moment[k] > max_moment_nm {
            max_moment_nm = bending_moment[k];
            max_moment_position_m = x;
        }
        if deflection[k].abs() > max_deflection_m.abs() {
            max_deflection_m = deflection[k];
            max_deflection_position_m = x;
        }
        // f64::max ignores NaN; a NaN deviation must reach the finiteness check
        let slope_dev = (slope[k] - uniform_load_slope(w, l, x, e, i)).abs();
        if slope_dev.is_nan() || slope_dev > max_slope_deviation {
            max_slope_deviation = slope_dev;
        }
        let deflection_dev = (deflection[k] - uniform_load_deflection(w, l, x, e, i)).abs();
        if deflection_dev.is_nan() || deflection_dev > max_deflection_deviation_m {
            max_deflection_deviation_m = deflection_dev;
        }
    }

    let derived = [
        ("flexural_rigidity_nm2", e * i),
        ("theoretical_midspan_deflection_m", theoretical_midspan_deflection_m),
        ("relative_error", relative_error.unwrap_or(0.0)),
        ("max_moment_nm", max_moment_nm),
        ("max_slope_deviation", max_slope_deviation),
        ("max_deflection_deviation_m", max_deflection_deviation_m),
    ];
    if let Some((name, value)) = derived.iter().find(|(_, v)| !v.is_finite()) {
        return Err(FlexError::calculation_failed(
            "deflection",
            format!("{} is not finite ({})", name, value),
        ));
    }

    let result = DeflectionResult {
        flexural_rigidity_nm2: e * i,
        slope_correction,
        midspan_index,
        midspan_position_m: mesh.midspan_position(),
        midspan_slope: slope[midspan_index],
        midspan_deflection_m,
        theoretical_midspan_deflection_m,
        relative_error,
        end_deflection_m: deflection[deflection.len() - 1],
        max_moment_nm,
        max_moment_position_m,
        max_deflection_m,
        max_deflection_position_m,
        max_slope_deviation,
        max_deflection_deviation_m,
        profile: BeamProfile {
            positions: positions.to_vec(),
            bending_moment,
            curvature,
            slope,
            deflection,
        },
    };

    info!(
        "'{}': mid-span deflection {:.6e} m (theoretical {:.6e} m)",
        input.label, result.midspan_deflection_m, result.theoretical_midspan_deflection_m
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::beam::uniform_load_max_moment;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if b.abs() < 1e-12 {
            a.abs() < tol
        } else {
            ((a - b) / b).abs() < tol
        }
    }

    fn reference() -> DeflectionResult {
        calculate(&DeflectionInput::default()).unwrap()
    }

    #[test]
    fn test_default_input_is_reference_beam() {
        let input = DeflectionInput::default();
        assert!(input.validate().is_ok());
        assert!(approx_eq(input.moment_of_inertia_m4(), 0.003125, 1e-12));
        assert!(approx_eq(input.flexural_rigidity(), 93_750_000.0, 1e-12));
    }

    #[test]
    fn test_sequences_are_aligned() {
        let result = reference();
        let n = result.profile.positions.len();
        assert_eq!(n, 51);
        for quantity in ProfileQuantity::ALL {
            assert_eq!(result.profile.values(quantity).len(), n);
            assert_eq!(result.profile.diagram(quantity).len(), n);
        }
    }

    #[test]
    fn test_moment_zero_at_supports() {
        let result = reference();
        let m = &result.profile.bending_moment;
        assert!(m[0].abs() < 1e-9);
        assert!(m[m.len() - 1].abs() < 1e-9);
    }

    #[test]
    fn test_moment_maximum_at_midspan() {
        let result = reference();
        let expected = uniform_load_max_moment(10_000.0, 5.0);
        assert!(approx_eq(result.max_moment_nm, expected, 1e-12));
        assert!(approx_eq(result.max_moment_position_m, 2.5, 1e-12));
        assert!(approx_eq(result.profile.bending_moment[25], 31_250.0, 1e-12));
    }

    #[test]
    fn test_curvature_is_moment_over_ei() {
        let result = reference();
        let ei = result.flexural_rigidity_nm2;
        for (m, k) in result.profile.bending_moment.iter().zip(&result.profile.curvature) {
            assert!((k - m / ei).abs() < 1e-18);
        }
    }

    #[test]
    fn test_midspan_slope_zero_after_correction() {
        let result = reference();
        let max_slope = result
            .profile
            .slope
            .iter()
            .fold(0.0f64, |acc, s| acc.max(s.abs()));
        assert!(result.midspan_slope.abs() < 1e-12 * max_slope);
        assert_eq!(result.midspan_slope, result.profile.slope[result.midspan_index]);
    }

    #[test]
    fn test_slope_correction_recorded() {
        let result = reference();
        let c = result.slope_correction;
        assert_eq!(c.trial_initial_slope, 0.0);
        assert!(c.raw_midspan_slope > 0.0);
        assert!(approx_eq(c.corrected_initial_slope, -c.raw_midspan_slope, 1e-12));
        // Close to the exact end slope −wL³/(24EI)
        let exact = -10_000.0 * 125.0 / (24.0 * result.flexural_rigidity_nm2);
        assert!(approx_eq(c.corrected_initial_slope, exact, 0.01));
    }

    #[test]
    fn test_midspan_deflection_matches_closed_form() {
        let result = reference();
        assert!(approx_eq(result.theoretical_midspan_deflection_m, -8.680_555_555_6e-4, 1e-9));
        assert!(result.midspan_deflection_m < 0.0);
        assert!(result.relative_error.unwrap() < 0.01);
        assert!(result.within_tolerance(0.01));
        assert!(approx_eq(
            result.relative_error_percent().unwrap(),
            result.relative_error.unwrap() * 100.0,
            1e-12
        ));
    }

    #[test]
    fn test_deflection_zero_at_both_supports() {
        let result = reference();
        assert_eq!(result.profile.deflection[0], 0.0);
        assert!(result.end_deflection_m.abs() < 1e-6 * result.midspan_deflection_m.abs());
    }

    #[test]
    fn test_maximum_deflection_at_midspan() {
        let result = reference();
        assert!(approx_eq(result.max_deflection_position_m, 2.5, 1e-12));
        assert_eq!(result.max_deflection_m, result.midspan_deflection_m);
    }

    #[test]
    fn test_profile_close_to_closed_form() {
        let result = reference();
        let scale = result.theoretical_midspan_deflection_m.abs();
        assert!(result.max_deflection_deviation_m < 0.01 * scale);
        let end_slope = 10_000.0 * 125.0 / (24.0 * result.flexural_rigidity_nm2);
        assert!(result.max_slope_deviation < 0.01 * end_slope);
    }

    #[test]
    fn test_result_independent_of_trial_slope() {
        let base = reference();
        let input = DeflectionInput {
            trial_initial_slope: 0.5,
            ..DeflectionInput::default()
        };
        let shifted = calculate(&input).unwrap();
        for (a, b) in base.profile.deflection.iter().zip(&shifted.profile.deflection) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!(shifted.midspan_slope.abs() < 1e-12);
    }

    #[test]
    fn test_error_decreases_with_finer_mesh() {
        let coarse = reference();
        let fine = calculate(&DeflectionInput {
            step_m: 0.05,
            ..DeflectionInput::default()
        })
        .unwrap();
        assert!(fine.relative_error.unwrap() < coarse.relative_error.unwrap());
    }

    #[test]
    fn test_zero_load_has_no_relative_error() {
        let result = calculate(&DeflectionInput {
            load_n_per_m: 0.0,
            ..DeflectionInput::default()
        })
        .unwrap();
        assert!(result.relative_error.is_none());
        assert!(result.profile.deflection.iter().all(|d| *d == 0.0));
        assert!(result.within_tolerance(0.01));
    }

    #[test]
    fn test_inertia_section_equivalent_to_rectangle() {
        let rect = reference();
        let direct = calculate(&DeflectionInput {
            section: Section::Inertia {
                i_m4: rectangular_moment_of_inertia(0.3, 0.5),
            },
            ..DeflectionInput::default()
        })
        .unwrap();
        assert_eq!(rect.midspan_deflection_m, direct.midspan_deflection_m);
        assert!(direct.profile.len() == rect.profile.len());
    }

    #[test]
    fn test_off_centre_midspan_still_computes() {
        let result = calculate(&DeflectionInput {
            step_m: 0.3,
            ..DeflectionInput::default()
        })
        .unwrap();
        // 5.0 / 0.3 -> 17 regular points + endpoint = 18 points
        assert_eq!(result.profile.len(), 18);
        assert!(result.midspan_position_m > 2.5);
        assert!(result.midspan_slope.abs() < 1e-12);
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            DeflectionInput { length_m: 0.0, ..DeflectionInput::default() },
            DeflectionInput { step_m: -0.1, ..DeflectionInput::default() },
            DeflectionInput { modulus_pa: 0.0, ..DeflectionInput::default() },
            DeflectionInput { load_n_per_m: f64::NAN, ..DeflectionInput::default() },
            DeflectionInput { trial_initial_slope: f64::INFINITY, ..DeflectionInput::default() },
            DeflectionInput {
                section: Section::Inertia { i_m4: 0.0 },
                ..DeflectionInput::default()
            },
            DeflectionInput {
                section: Section::Rectangular { width_m: -0.3, depth_m: 0.5 },
                ..DeflectionInput::default()
            },
        ];
        for input in cases {
            let err = calculate(&input).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{:?}", input);
        }
    }

    #[test]
    fn test_overflowing_closed_form_is_calculation_failure() {
        // Numerical profile stays finite (~1.3e8 m) but w·L⁴ overflows
        let input = DeflectionInput {
            load_n_per_m: 1e10,
            length_m: 1e75,
            step_m: 1e74,
            modulus_pa: 1e300,
            section: Section::Inertia { i_m4: 1.0 },
            ..DeflectionInput::default()
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        match err {
            FlexError::CalculationFailed { reason, .. } => {
                assert!(reason.contains("theoretical_midspan_deflection_m"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_input_json_defaults() {
        let input: DeflectionInput = serde_json::from_str(r#"{ "length_m": 6.0 }"#).unwrap();
        assert_eq!(input.length_m, 6.0);
        assert_eq!(input.load_n_per_m, DEFAULT_LOAD_N_PER_M);
        assert_eq!(input.section, Section::default());

        let input: DeflectionInput =
            serde_json::from_str(r#"{ "section": { "type": "Inertia", "i_m4": 0.001 } }"#).unwrap();
        assert_eq!(input.moment_of_inertia_m4(), 0.001);
        assert!(input.section.area_m2().is_none());
    }

    #[test]
    fn test_section_describe() {
        assert_eq!(Section::default().describe(), "300 x 500 mm rectangle");
        assert!(approx_eq(Section::default().area_m2().unwrap(), 0.15, 1e-12));
    }
}
