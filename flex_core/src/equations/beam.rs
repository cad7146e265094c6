//! # Simply-Supported Beam Formulas (Uniform Load)
//!
//! Closed-form Euler-Bernoulli results for a simply-supported beam with a
//! uniform load `w` over the full span. Pin support at the left (x = 0),
//! roller at the right (x = L).
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `x` = Position along beam from left support
//! - `w` = Uniform load intensity (force per unit length, positive downward)
//! - `M` = Bending moment
//! - `V` = Shear force
//! - `θ` = Slope
//! - `y` = Deflection
//! - `E` = Modulus of elasticity
//! - `I` = Second moment of area
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Moment: Positive causes tension on bottom (sagging)
//! - Shear: Positive when left side up relative to right
//! - Deflection: Positive **upward**, so a gravity load gives `y < 0`
//! - Slope: `θ = dy/dx`, counterclockwise positive
//!
//! With these conventions the curvature `y'' = M / EI` holds without a sign
//! change, which is what the numerical integration in
//! [`crate::calculations::deflection`] relies on.
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1, Case 2a
//! - Structural Analysis by R.C. Hibbeler

/// Calculate reactions for uniform load w over full span L
///
/// ```text
///    ↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓ w
///    ────────────────
///    △              △
///   R1  ←───L────→  R2
/// ```
///
/// # Formula
/// R1 = R2 = wL/2
#[inline]
pub fn uniform_load_reactions(w: f64, l: f64) -> (f64, f64) {
    let r = w * l / 2.0;
    (r, r)
}

/// Calculate shear at position x for uniform load w over full span
///
/// # Formula
/// V(x) = wL/2 - wx = w(L/2 - x)
///
/// - At x=0: V = +wL/2
/// - At x=L/2: V = 0
/// - At x=L: V = -wL/2
#[inline]
pub fn uniform_load_shear(w: f64, l: f64, x: f64) -> f64 {
    w * (l / 2.0 - x)
}

/// Calculate moment at position x for uniform load w over full span
///
/// # Formula (Roark's Table 8.1, Case 2a)
/// M(x) = x·(wL)/2 − w·x²/2
///
/// Evaluated in that order (left reaction times lever arm, minus the load
/// resultant times its lever arm) so that `M(0)` and `M(L)` are exactly zero.
///
/// # Example
/// ```rust
/// use flex_core::equations::beam::uniform_load_moment;
///
/// // 5 m span, 10 kN/m: M at midspan = wL²/8 = 31.25 kN·m
/// let m = uniform_load_moment(10_000.0, 5.0, 2.5);
/// assert!((m - 31_250.0).abs() < 1e-9);
/// ```
#[inline]
pub fn uniform_load_moment(w: f64, l: f64, x: f64) -> f64 {
    (x * (w * l) / 2.0) - (w * x * (x / 2.0))
}

/// Maximum moment for uniform load (at midspan)
///
/// # Formula
/// M_max = wL²/8
#[inline]
pub fn uniform_load_max_moment(w: f64, l: f64) -> f64 {
    w * l * l / 8.0
}

/// Calculate slope at position x for uniform load w
///
/// # Formula
/// θ(x) = −w(L³ − 6Lx² + 4x³) / (24EI)
///
/// - At x=0: θ = −wL³/(24EI)
/// - At x=L/2: θ = 0
/// - At x=L: θ = +wL³/(24EI)
#[inline]
pub fn uniform_load_slope(w: f64, l: f64, x: f64, e: f64, i: f64) -> f64 {
    -w * (l.powi(3) - 6.0 * l * x * x + 4.0 * x.powi(3)) / (24.0 * e * i)
}

/// Slope at the left support for uniform load
///
/// # Formula
/// θ(0) = −wL³ / (24EI)
#[inline]
pub fn uniform_load_end_slope(w: f64, l: f64, e: f64, i: f64) -> f64 {
    -w * l.powi(3) / (24.0 * e * i)
}

/// Calculate deflection at position x for uniform load w
///
/// # Formula (Roark's Table 8.1, Case 2a)
/// y(x) = −wx(L³ − 2Lx² + x³) / (24EI)
#[inline]
pub fn uniform_load_deflection(w: f64, l: f64, x: f64, e: f64, i: f64) -> f64 {
    -w * x * (l.powi(3) - 2.0 * l * x * x + x.powi(3)) / (24.0 * e * i)
}

/// Deflection at midspan for uniform load
///
/// # Formula
/// δ = −(5/384)(wL⁴)/(EI)
///
/// # Example
/// ```rust
/// use flex_core::equations::beam::uniform_load_midspan_deflection;
///
/// let i = (1.0 / 12.0) * 0.3 * 0.5_f64.powi(3);
/// let d = uniform_load_midspan_deflection(10_000.0, 5.0, 30.0e9, i);
/// assert!((d + 8.680_555e-4).abs() < 1e-9);
/// ```
#[inline]
pub fn uniform_load_midspan_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    -(5.0 / 384.0) * (w * l.powi(4)) / (e * i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 10_000.0;
    const L: f64 = 5.0;
    const E: f64 = 30.0e9;
    const I: f64 = 0.003125;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if b.abs() < 1e-12 {
            a.abs() < tol
        } else {
            ((a - b) / b).abs() < tol
        }
    }

    #[test]
    fn test_reactions_balance_load() {
        let (r1, r2) = uniform_load_reactions(W, L);
        assert_eq!(r1, 25_000.0);
        assert_eq!(r1 + r2, W * L);
    }

    #[test]
    fn test_shear_sign_change_at_midspan() {
        assert_eq!(uniform_load_shear(W, L, 0.0), 25_000.0);
        assert_eq!(uniform_load_shear(W, L, L / 2.0), 0.0);
        assert_eq!(uniform_load_shear(W, L, L), -25_000.0);
    }

    #[test]
    fn test_moment_zero_at_supports() {
        assert_eq!(uniform_load_moment(W, L, 0.0), 0.0);
        assert_eq!(uniform_load_moment(W, L, L), 0.0);
    }

    #[test]
    fn test_moment_maximum_at_midspan() {
        let m_mid = uniform_load_moment(W, L, L / 2.0);
        assert!(approx_eq(m_mid, uniform_load_max_moment(W, L), 1e-12));
        assert!(approx_eq(m_mid, 31_250.0, 1e-12));
        assert!(uniform_load_moment(W, L, 2.4) < m_mid);
        assert!(uniform_load_moment(W, L, 2.6) < m_mid);
    }

    #[test]
    fn test_slope_antisymmetric() {
        let s0 = uniform_load_slope(W, L, 0.0, E, I);
        assert!(approx_eq(s0, uniform_load_end_slope(W, L, E, I), 1e-12));
        assert!(approx_eq(uniform_load_slope(W, L, L, E, I), -s0, 1e-12));
        assert!(uniform_load_slope(W, L, L / 2.0, E, I).abs() < 1e-15);
    }

    #[test]
    fn test_deflection_profile_matches_midspan_formula() {
        let y_mid = uniform_load_deflection(W, L, L / 2.0, E, I);
        let expected = uniform_load_midspan_deflection(W, L, E, I);
        assert!(approx_eq(y_mid, expected, 1e-12));
        assert!(y_mid < 0.0);
        assert_eq!(uniform_load_deflection(W, L, 0.0, E, I), 0.0);
        assert!(uniform_load_deflection(W, L, L, E, I).abs() < 1e-15);
    }

    #[test]
    fn test_reference_beam_deflection() {
        // 5 * 10000 * 625 / (384 * 30e9 * 0.003125) = 8.6806e-4 m
        let d = uniform_load_midspan_deflection(W, L, E, I);
        assert!(approx_eq(d, -8.680_555_555e-4, 1e-8));
    }
}
