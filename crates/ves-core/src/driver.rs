// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Bounded Optimizer Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Box-constrained local fit of a layered model to one sounding.
//!
//! Builds the initial guess and bounds, minimizes the log-RMS misfit
//! with the bounded simplex, and extracts the optimized model together
//! with a smooth log-spaced response curve for plotting.

use crate::forward::forward_response;
use crate::objective::log_rms_misfit;
use crate::params;
use ves_math::interp::logspace;
use ves_math::optim::{Bounds, NelderMead};
use ves_types::config::InversionSettings;
use ves_types::error::{VesError, VesResult};
use ves_types::model::{InversionMethod, InversionResult, LayeredModel, Sounding};

/// Median of a non-empty slice (upper median for even lengths).
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted[sorted.len() / 2]
}

/// Initial guess: n resistivities at the observed median, n-1 equal
/// thicknesses scaled to the maximum spacing.
fn initial_guess(sounding: &Sounding, n_layers: usize) -> Vec<f64> {
    let rho0 = median(sounding.rhoa.as_slice().expect("contiguous rhoa"));
    let thickness0 = sounding.max_spacing() / (2 * n_layers) as f64;

    let mut theta = vec![rho0; n_layers];
    theta.extend(std::iter::repeat(thickness0).take(n_layers - 1));
    theta
}

fn parameter_bounds(sounding: &Sounding, settings: &InversionSettings) -> VesResult<Bounds> {
    let n = settings.n_layers;
    let mut lower = vec![settings.rho_bounds[0]; n];
    let mut upper = vec![settings.rho_bounds[1]; n];
    lower.extend(std::iter::repeat(settings.thickness_min).take(n - 1));
    upper.extend(std::iter::repeat(sounding.max_spacing()).take(n - 1));
    Bounds::new(lower, upper)
}

/// Fit `settings.n_layers` layers to a sounding.
///
/// Signals `OptimizationFailure` on non-convergence; the best-effort
/// parameters are discarded so the orchestrator can fall back cleanly.
pub fn fit_layered_model(
    sounding: &Sounding,
    settings: &InversionSettings,
) -> VesResult<InversionResult> {
    settings.validate()?;
    let n_layers = settings.n_layers;

    let theta0 = initial_guess(sounding, n_layers);
    let bounds = parameter_bounds(sounding, settings)?;

    let objective = |theta: &[f64]| -> f64 {
        let Ok((rho, thk)) = params::split(theta, n_layers) else {
            return f64::INFINITY;
        };
        let predicted = forward_response(&sounding.ab2, &rho, &thk);
        log_rms_misfit(&sounding.rhoa, &predicted).unwrap_or(f64::INFINITY)
    };

    let solver = NelderMead {
        max_iterations: settings.max_iterations,
        tolerance: settings.tolerance,
    };
    let optimum = solver.minimize(objective, &theta0, &bounds)?;
    if !optimum.converged {
        return Err(VesError::OptimizationFailure(format!(
            "Simplex did not converge within {} iterations (misfit {:.3e})",
            settings.max_iterations, optimum.fval
        )));
    }

    let (resistivities, thicknesses) = params::split(&optimum.x, n_layers)?;
    let model = LayeredModel::new(resistivities, thicknesses)?;

    // Smooth response over the observed spacing range, for plotting.
    let ab2_model = logspace(
        sounding.min_spacing(),
        sounding.max_spacing(),
        settings.response_samples,
    );
    let rho_model = forward_response(&ab2_model, &model.resistivities, &model.thicknesses);

    // Reported RMS is recomputed on the observed abscissae.
    let fitted = forward_response(&sounding.ab2, &model.resistivities, &model.thicknesses);
    let rms_error = log_rms_misfit(&sounding.rhoa, &fitted)?;

    Ok(InversionResult {
        success: true,
        model,
        ab2_model,
        rho_model,
        rms_error,
        method: InversionMethod::SimpleOptimizer,
    })
}
