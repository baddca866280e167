// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Bounded Simplex Optimizer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Box-constrained Nelder–Mead simplex minimizer.
//!
//! Gradient-free local optimizer for small parameter counts (single-digit
//! layer models). Box constraints are enforced by clamping every proposed
//! vertex into the feasible box. A collapsed simplex is restarted from
//! its best vertex with full-size steps until a restart stops improving,
//! which keeps the search from stalling on plateaus of piecewise
//! objectives.

use ves_types::error::{VesError, VesResult};

/// Reflection coefficient.
const ALPHA: f64 = 1.0;
/// Expansion coefficient.
const GAMMA: f64 = 2.0;
/// Contraction coefficient.
const RHO: f64 = 0.5;
/// Shrink coefficient.
const SIGMA: f64 = 0.5;
/// Relative perturbation used to seed the initial simplex.
const INIT_STEP: f64 = 0.1;
/// Floor on the seed perturbation, as a fraction of the box span.
const SPAN_STEP: f64 = 0.025;
/// Cap on best-vertex restarts within one `minimize` call.
const MAX_RESTARTS: usize = 8;

/// Per-coordinate box bounds.
#[derive(Debug, Clone)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Bounds {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> VesResult<Self> {
        if lower.len() != upper.len() {
            return Err(VesError::ConfigError(format!(
                "Bounds dimension mismatch: lower={}, upper={}",
                lower.len(),
                upper.len()
            )));
        }
        if lower.iter().zip(upper.iter()).any(|(&l, &u)| l >= u) {
            return Err(VesError::ConfigError(
                "Each lower bound must be strictly below its upper bound".to_string(),
            ));
        }
        Ok(Bounds { lower, upper })
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    fn clamp(&self, x: &mut [f64]) {
        for (i, v) in x.iter_mut().enumerate() {
            *v = v.clamp(self.lower[i], self.upper[i]);
        }
    }
}

/// Move away from the worst vertex through the centroid, clamped into
/// the box.
fn propose(centroid: &[f64], worst: &[f64], coef: f64, bounds: &Bounds) -> Vec<f64> {
    let mut v: Vec<f64> = centroid
        .iter()
        .zip(worst.iter())
        .map(|(&c, &w)| c + coef * (c - w))
        .collect();
    bounds.clamp(&mut v);
    v
}

/// Outcome of a simplex run.
#[derive(Debug, Clone)]
pub struct OptimResult {
    pub x: Vec<f64>,
    pub fval: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Outcome of a single simplex pass between restarts.
struct Pass {
    x: Vec<f64>,
    fval: f64,
    iterations: usize,
    converged: bool,
}

/// Nelder–Mead driver configuration.
#[derive(Debug, Clone)]
pub struct NelderMead {
    pub max_iterations: usize,
    /// Convergence threshold on the simplex objective spread.
    pub tolerance: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        NelderMead {
            max_iterations: 400,
            tolerance: 1e-8,
        }
    }
}

impl NelderMead {
    /// Minimize `f` starting from `x0` inside `bounds`.
    ///
    /// Non-finite objective values are treated as +∞ so the simplex
    /// retreats from them. Signals `OptimizationFailure` when no finite
    /// vertex survives or the inputs are dimensionally inconsistent.
    /// `max_iterations` is a total budget shared across restarts.
    pub fn minimize<F>(&self, mut f: F, x0: &[f64], bounds: &Bounds) -> VesResult<OptimResult>
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = x0.len();
        if n == 0 || n != bounds.dim() {
            return Err(VesError::OptimizationFailure(format!(
                "Initial point dimension {n} does not match bounds dimension {}",
                bounds.dim()
            )));
        }

        let mut eval = |x: &[f64]| -> f64 {
            let v = f(x);
            if v.is_finite() {
                v
            } else {
                f64::INFINITY
            }
        };

        let mut best = x0.to_vec();
        bounds.clamp(&mut best);
        let mut best_val = eval(&best);
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..MAX_RESTARTS {
            if iterations >= self.max_iterations {
                break;
            }
            let budget = self.max_iterations - iterations;
            let pass = self.simplex_pass(&mut eval, &best, bounds, budget);
            iterations += pass.iterations;

            let improved = pass.fval < best_val - self.tolerance;
            if pass.fval < best_val {
                best = pass.x;
                best_val = pass.fval;
            }
            converged = pass.converged;
            if !pass.converged || !improved {
                break;
            }
        }

        if !best_val.is_finite() {
            return Err(VesError::OptimizationFailure(
                "Objective non-finite over the whole simplex".to_string(),
            ));
        }

        Ok(OptimResult {
            x: best,
            fval: best_val,
            iterations,
            converged,
        })
    }

    /// One simplex descent seeded around `start`, limited to `budget`
    /// iterations.
    fn simplex_pass<F>(&self, eval: &mut F, start: &[f64], bounds: &Bounds, budget: usize) -> Pass
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = start.len();

        // Initial simplex: start plus one perturbed vertex per coordinate.
        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        simplex.push(start.to_vec());
        for i in 0..n {
            let mut v = start.to_vec();
            let span = bounds.upper[i] - bounds.lower[i];
            let step = (v[i].abs() * INIT_STEP).max(span * SPAN_STEP);
            v[i] += step;
            bounds.clamp(&mut v);
            if v[i] == start[i] {
                // Hit the upper wall; step down instead.
                v[i] = (start[i] - step).max(bounds.lower[i]);
            }
            simplex.push(v);
        }
        let mut fvals: Vec<f64> = simplex.iter().map(|v| eval(v)).collect();

        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..budget {
            iterations += 1;

            // Order vertices by objective value.
            let mut order: Vec<usize> = (0..=n).collect();
            order.sort_by(|&a, &b| fvals[a].total_cmp(&fvals[b]));
            let best = order[0];
            let worst = order[n];
            let second_worst = order[n - 1];

            if (fvals[worst] - fvals[best]).abs() < self.tolerance {
                converged = true;
                break;
            }

            // Centroid of all vertices except the worst.
            let mut centroid = vec![0.0; n];
            for (idx, v) in simplex.iter().enumerate() {
                if idx == worst {
                    continue;
                }
                for i in 0..n {
                    centroid[i] += v[i] / n as f64;
                }
            }

            let reflected = propose(&centroid, &simplex[worst], ALPHA, bounds);
            let f_reflected = eval(&reflected);

            if f_reflected < fvals[best] {
                let expanded = propose(&centroid, &simplex[worst], GAMMA, bounds);
                let f_expanded = eval(&expanded);
                if f_expanded < f_reflected {
                    simplex[worst] = expanded;
                    fvals[worst] = f_expanded;
                } else {
                    simplex[worst] = reflected;
                    fvals[worst] = f_reflected;
                }
                continue;
            }

            if f_reflected < fvals[second_worst] {
                simplex[worst] = reflected;
                fvals[worst] = f_reflected;
                continue;
            }

            let contracted = propose(&centroid, &simplex[worst], -RHO, bounds);
            let f_contracted = eval(&contracted);
            if f_contracted < fvals[worst] {
                simplex[worst] = contracted;
                fvals[worst] = f_contracted;
                continue;
            }

            // Shrink toward the best vertex.
            let best_vertex = simplex[best].clone();
            for (idx, v) in simplex.iter_mut().enumerate() {
                if idx == best {
                    continue;
                }
                for i in 0..n {
                    v[i] = best_vertex[i] + SIGMA * (v[i] - best_vertex[i]);
                }
                bounds.clamp(v);
                fvals[idx] = eval(v);
            }
        }

        let (best_idx, &fval) = fvals
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .expect("simplex is non-empty");

        Pass {
            x: simplex[best_idx].clone(),
            fval,
            iterations,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver() -> NelderMead {
        NelderMead {
            max_iterations: 2000,
            tolerance: 1e-12,
        }
    }

    #[test]
    fn test_minimizes_quadratic() {
        let bounds = Bounds::new(vec![-10.0, -10.0], vec![10.0, 10.0]).unwrap();
        let result = solver()
            .minimize(
                |x| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2),
                &[0.0, 0.0],
                &bounds,
            )
            .unwrap();
        assert!(result.converged);
        assert!((result.x[0] - 3.0).abs() < 1e-4, "x0 = {}", result.x[0]);
        assert!((result.x[1] + 1.0).abs() < 1e-4, "x1 = {}", result.x[1]);
        assert!(result.fval < 1e-8);
    }

    #[test]
    fn test_respects_box_bounds() {
        // Unconstrained minimum at x = -5, outside the box.
        let bounds = Bounds::new(vec![0.0], vec![10.0]).unwrap();
        let result = solver()
            .minimize(|x| (x[0] + 5.0).powi(2), &[5.0], &bounds)
            .unwrap();
        assert!(result.x[0] >= 0.0);
        assert!(result.x[0] < 1e-3, "should pin at lower wall: {}", result.x[0]);
    }

    #[test]
    fn test_rosenbrock_two_dim() {
        let bounds = Bounds::new(vec![-5.0, -5.0], vec![5.0, 5.0]).unwrap();
        let result = solver()
            .minimize(
                |x| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2),
                &[-1.0, 1.0],
                &bounds,
            )
            .unwrap();
        assert!((result.x[0] - 1.0).abs() < 1e-2, "x0 = {}", result.x[0]);
        assert!((result.x[1] - 1.0).abs() < 1e-2, "x1 = {}", result.x[1]);
    }

    #[test]
    fn test_restart_escapes_flat_region() {
        // Objective is flat below x = 2 and quadratic above it; a single
        // pass seeded in the flat region collapses there, the restart
        // must still report the flat-region floor without diverging.
        let bounds = Bounds::new(vec![0.0, 0.0], vec![10.0, 10.0]).unwrap();
        let result = solver()
            .minimize(
                |x| {
                    let base = (x[1] - 4.0).powi(2);
                    if x[0] < 2.0 {
                        base
                    } else {
                        base + (x[0] - 2.0).powi(2) + 1.0
                    }
                },
                &[5.0, 0.5],
                &bounds,
            )
            .unwrap();
        assert!(result.fval < 1e-6, "fval = {}", result.fval);
        assert!((result.x[1] - 4.0).abs() < 1e-3, "x1 = {}", result.x[1]);
        assert!(result.x[0] < 2.0, "x0 = {}", result.x[0]);
    }

    #[test]
    fn test_nonfinite_objective_everywhere_fails() {
        let bounds = Bounds::new(vec![0.0], vec![1.0]).unwrap();
        let err = solver()
            .minimize(|_| f64::NAN, &[0.5], &bounds)
            .unwrap_err();
        match err {
            VesError::OptimizationFailure(_) => {}
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dimension_mismatch_is_failure() {
        let bounds = Bounds::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        assert!(solver().minimize(|x| x[0], &[0.5], &bounds).is_err());
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(vec![0.0], vec![0.0]).is_err());
        assert!(Bounds::new(vec![0.0, 1.0], vec![2.0]).is_err());
    }
}
