// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Property-Based Tests (proptest) for ves-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for ves-math interpolation and optimization.

use proptest::collection::vec;
use proptest::prelude::*;
use ves_math::filter::{exponential_smoothing, moving_average, savitzky_golay};
use ves_math::interp::{interp1d, logspace, CubicSpline};
use ves_math::optim::{Bounds, NelderMead};

fn knots(n: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (
        vec(0.01f64..10.0, n..n + 1),
        vec(-100.0f64..100.0, n..n + 1),
    )
        .prop_map(|(steps, y)| {
            let mut x = Vec::with_capacity(steps.len());
            let mut acc = 0.0;
            for s in steps {
                acc += s;
                x.push(acc);
            }
            (x, y)
        })
}

proptest! {
    /// Linear interpolation never leaves the envelope of its knot values.
    #[test]
    fn interp1d_stays_in_envelope(
        (x, y) in knots(8),
        t in 0.0f64..1.0,
    ) {
        let xi = x[0] + t * (x[x.len() - 1] - x[0]);
        let v = interp1d(&x, &y, xi);
        let lo = y.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
    }

    /// Outside the knot span interpolation clamps to the end values.
    #[test]
    fn interp1d_clamps_outside(
        (x, y) in knots(5),
        offset in 0.1f64..50.0,
    ) {
        prop_assert_eq!(interp1d(&x, &y, x[0] - offset), y[0]);
        prop_assert_eq!(interp1d(&x, &y, x[x.len() - 1] + offset), y[y.len() - 1]);
    }

    /// Log-spaced grids are strictly increasing and hit both endpoints.
    #[test]
    fn logspace_monotone(
        lo in 0.01f64..10.0,
        factor in 1.5f64..1000.0,
        n in 2usize..80,
    ) {
        let hi = lo * factor;
        let g = logspace(lo, hi, n);
        prop_assert_eq!(g.len(), n);
        prop_assert!((g[0] - lo).abs() < 1e-9 * lo.max(1.0));
        prop_assert!((g[n - 1] - hi).abs() < 1e-6 * hi);
        prop_assert!(g.windows(2).into_iter().all(|w| w[1] > w[0]));
    }

    /// A natural spline reproduces its knot values.
    #[test]
    fn spline_hits_knots((x, y) in knots(6)) {
        let s = CubicSpline::new(&x, &y);
        for i in 0..x.len() {
            prop_assert!((s.eval(x[i]) - y[i]).abs() < 1e-8);
        }
    }

    /// The bounded simplex finds an interior quadratic minimum.
    #[test]
    fn simplex_finds_interior_quadratic_minimum(
        cx in -3.0f64..3.0,
        cy in -3.0f64..3.0,
    ) {
        let bounds = Bounds::new(vec![-5.0, -5.0], vec![5.0, 5.0]).unwrap();
        let solver = NelderMead {
            max_iterations: 2000,
            tolerance: 1e-12,
        };
        let result = solver
            .minimize(
                |p| (p[0] - cx).powi(2) + (p[1] - cy).powi(2),
                &[0.0, 0.0],
                &bounds,
            )
            .unwrap();
        prop_assert!((result.x[0] - cx).abs() < 1e-3);
        prop_assert!((result.x[1] - cy).abs() < 1e-3);
    }

    /// Clamped optimization never leaves the box.
    #[test]
    fn simplex_result_within_bounds(
        cx in -20.0f64..20.0,
    ) {
        let bounds = Bounds::new(vec![-1.0], vec![1.0]).unwrap();
        let solver = NelderMead::default();
        let result = solver
            .minimize(|p| (p[0] - cx).powi(2), &[0.0], &bounds)
            .unwrap();
        prop_assert!(result.x[0] >= -1.0 && result.x[0] <= 1.0);
    }

    /// A moving average never leaves the envelope of its input and keeps
    /// the series length.
    #[test]
    fn moving_average_stays_in_envelope(
        data in vec(-100.0f64..100.0, 1..40),
        window in 1usize..9,
    ) {
        let out = moving_average(&data, window);
        prop_assert_eq!(out.len(), data.len());
        let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in out {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }

    /// The quadratic Savitzky-Golay kernel passes degree-2 series
    /// through unchanged.
    #[test]
    fn savgol_preserves_quadratics(
        a in -5.0f64..5.0,
        b in -5.0f64..5.0,
        c in -5.0f64..5.0,
        n in 5usize..30,
        window in 2usize..6,
    ) {
        let data: Vec<f64> = (0..n)
            .map(|j| {
                let x = j as f64;
                a * x * x + b * x + c
            })
            .collect();
        let out = savitzky_golay(&data, 2 * window + 1);
        for (v, d) in out.iter().zip(data.iter()) {
            prop_assert!((v - d).abs() < 1e-6 * (1.0 + d.abs()));
        }
    }

    /// Exponential smoothing keeps the first sample and stays inside the
    /// running envelope.
    #[test]
    fn exponential_smoothing_bounded(
        data in vec(0.1f64..1000.0, 1..40),
        alpha in 0.05f64..1.0,
    ) {
        let out = exponential_smoothing(&data, alpha);
        prop_assert_eq!(out.len(), data.len());
        prop_assert_eq!(out[0], data[0]);
        let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in out {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }
}
