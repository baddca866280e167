//! 1-D interpolation primitives: clamped piecewise-linear lookup,
//! natural cubic splines and log-spaced sample grids.

use ndarray::Array1;

/// Piecewise-linear interpolation on sorted knots, clamped at the ends.
///
/// `x` must be strictly increasing and non-empty; callers guarantee this
/// (sounding and profile columns are validated upstream).
pub fn interp1d(x: &[f64], y: &[f64], xi: f64) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    debug_assert!(!x.is_empty());

    if xi <= x[0] {
        return y[0];
    }
    let last = x.len() - 1;
    if xi >= x[last] {
        return y[last];
    }
    // partition_point: first index with x[idx] > xi; xi is interior here.
    let hi = x.partition_point(|&v| v <= xi);
    let lo = hi - 1;
    let t = (xi - x[lo]) / (x[hi] - x[lo]);
    y[lo] + t * (y[hi] - y[lo])
}

/// Log10-spaced samples over `[lo, hi]`, endpoints included.
///
/// Both endpoints must be positive.
pub fn logspace(lo: f64, hi: f64, n: usize) -> Array1<f64> {
    debug_assert!(lo > 0.0 && hi > 0.0 && n >= 2);
    let la = lo.log10();
    let lb = hi.log10();
    Array1::from_shape_fn(n, |i| {
        let t = i as f64 / (n - 1) as f64;
        10f64.powf(la + t * (lb - la))
    })
}

/// Natural cubic spline on sorted knots.
///
/// Evaluation outside the knot span clamps to the end values, matching
/// the clamping convention of [`interp1d`].
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivatives at the knots (zero at both ends).
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural spline. `x` strictly increasing, `len >= 2`.
    /// With exactly 2 knots the spline degenerates to a straight line.
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        debug_assert_eq!(x.len(), y.len());
        debug_assert!(x.len() >= 2);
        let n = x.len();
        let mut m = vec![0.0; n];

        if n > 2 {
            // Thomas solve of the tridiagonal system for interior second
            // derivatives; natural boundary: m[0] = m[n-1] = 0.
            let mut sub = vec![0.0; n];
            let mut diag = vec![0.0; n];
            let mut sup = vec![0.0; n];
            let mut rhs = vec![0.0; n];
            for i in 1..n - 1 {
                let h0 = x[i] - x[i - 1];
                let h1 = x[i + 1] - x[i];
                sub[i] = h0;
                diag[i] = 2.0 * (h0 + h1);
                sup[i] = h1;
                rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h1 - (y[i] - y[i - 1]) / h0);
            }
            for i in 2..n - 1 {
                let w = sub[i] / diag[i - 1];
                diag[i] -= w * sup[i - 1];
                rhs[i] -= w * rhs[i - 1];
            }
            for i in (1..n - 1).rev() {
                let upper = if i + 1 < n - 1 { sup[i] * m[i + 1] } else { 0.0 };
                m[i] = (rhs[i] - upper) / diag[i];
            }
        }

        CubicSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        }
    }

    pub fn eval(&self, xi: f64) -> f64 {
        let n = self.x.len();
        if xi <= self.x[0] {
            return self.y[0];
        }
        if xi >= self.x[n - 1] {
            return self.y[n - 1];
        }
        let hi = self.x.partition_point(|&v| v <= xi);
        let lo = hi - 1;
        let h = self.x[hi] - self.x[lo];
        let a = (self.x[hi] - xi) / h;
        let b = (xi - self.x[lo]) / h;
        a * self.y[lo]
            + b * self.y[hi]
            + ((a * a * a - a) * self.m[lo] + (b * b * b - b) * self.m[hi]) * h * h / 6.0
    }
}
