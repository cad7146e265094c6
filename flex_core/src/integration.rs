//! # Trapezoidal Integration
//!
//! Running (cumulative) trapezoidal rule over a sampled function. Used twice
//! per calculation: curvature -> slope and slope -> deflection.
//!
//! The sum is accumulated strictly left to right, one interval at a time,
//! so results are reproducible to the last bit for a given mesh.

/// Running trapezoidal integral of `values` sampled at `positions`.
///
/// ```text
/// out[0] = initial
/// out[i] = out[i-1] + (x[i] - x[i-1]) / 2 * (f[i] + f[i-1])
/// ```
///
/// The output has one entry per sample. Both slices must have the same
/// length; extra samples in the longer slice are ignored.
///
/// # Example
/// ```rust
/// use flex_core::integration::cumulative_trapezoid;
///
/// let x = [0.0, 1.0, 2.0];
/// let f = [1.0, 1.0, 1.0];
/// assert_eq!(cumulative_trapezoid(&x, &f, 5.0), vec![5.0, 6.0, 7.0]);
/// ```
pub fn cumulative_trapezoid(positions: &[f64], values: &[f64], initial: f64) -> Vec<f64> {
    debug_assert_eq!(positions.len(), values.len());

    let n = positions.len().min(values.len());
    let mut integral = Vec::with_capacity(n);
    let mut running = initial;

    for i in 0..n {
        if i > 0 {
            let dx = positions[i] - positions[i - 1];
            running += (dx / 2.0) * (values[i] + values[i - 1]);
        }
        integral.push(running);
    }

    integral
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(cumulative_trapezoid(&[], &[], 1.0).is_empty());
    }

    #[test]
    fn test_single_sample_returns_initial() {
        assert_eq!(cumulative_trapezoid(&[3.0], &[42.0], -1.5), vec![-1.5]);
    }

    #[test]
    fn test_linear_integrand_is_exact() {
        // ∫ 2x dx from 0 to x = x²
        let x: Vec<f64> = (0..=10).map(|i| i as f64 * 0.5).collect();
        let f: Vec<f64> = x.iter().map(|&xi| 2.0 * xi).collect();
        let out = cumulative_trapezoid(&x, &f, 0.0);
        for (xi, yi) in x.iter().zip(&out) {
            assert!((yi - xi * xi).abs() < 1e-12);
        }
    }

    #[test]
    fn test_quadratic_integrand_error_is_second_order() {
        // ∫ x² dx from 0 to 1 = 1/3; trapezoid error = (b - a) h² f'' / 12 = h²/6
        for n in [10usize, 20, 40] {
            let h = 1.0 / n as f64;
            let x: Vec<f64> = (0..=n).map(|i| i as f64 * h).collect();
            let f: Vec<f64> = x.iter().map(|&xi| xi * xi).collect();
            let total = *cumulative_trapezoid(&x, &f, 0.0).last().unwrap();
            let expected_error = h * h / 6.0;
            assert!((total - 1.0 / 3.0 - expected_error).abs() < 1e-12);
        }
    }

    #[test]
    fn test_uses_local_step() {
        // Non-uniform grid: constant integrand is still exact
        let x = [0.0, 0.1, 0.5, 0.55, 2.0];
        let f = [3.0; 5];
        let out = cumulative_trapezoid(&x, &f, 0.0);
        for (xi, yi) in x.iter().zip(&out) {
            assert!((yi - 3.0 * xi).abs() < 1e-12);
        }
    }
}
