// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Inversion Orchestrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Three-tier inversion cascade: advanced backend, bounded simple
//! optimizer, interpolation-only degenerate fallback.
//!
//! Each tier is attempted at most once. Tier failures are logged and
//! recovered locally; the only hard failure of [`invert`] is malformed
//! input (mismatched or non-physical arrays).

use crate::driver::fit_layered_model;
use thiserror::Error;
use ves_math::interp::{interp1d, logspace};
use ves_types::config::InversionSettings;
use ves_types::error::VesResult;
use ves_types::model::{InversionMethod, InversionResult, LayeredModel, Sounding};

/// Outcome space of an externally supplied inversion backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Advanced backend not available")]
    Unavailable,

    #[error("Advanced backend failed: {0}")]
    Failed(String),
}

/// Capability-injected advanced inversion backend.
///
/// The core never inspects the environment; the caller supplies a backend
/// (or `None`) at the boundary.
pub trait AdvancedBackend {
    fn invert(&self, sounding: &Sounding, n_layers: usize)
        -> Result<InversionResult, BackendError>;

    fn name(&self) -> &'static str {
        "advanced"
    }
}

/// Invert one sounding, always producing a tagged result.
///
/// Array lengths are validated once, up front; everything after that is
/// recovered internally through the cascade.
pub fn invert(
    ab2: &[f64],
    rhoa: &[f64],
    n_layers: usize,
    backend: Option<&dyn AdvancedBackend>,
    settings: &InversionSettings,
) -> VesResult<InversionResult> {
    let sounding = Sounding::new(ab2, rhoa)?;

    let mut settings = settings.clone();
    settings.n_layers = n_layers;
    settings.validate()?;

    if let Some(backend) = backend {
        match backend.invert(&sounding, n_layers) {
            Ok(mut result) => {
                result.method = InversionMethod::Advanced;
                result.success = true;
                return Ok(result);
            }
            Err(BackendError::Unavailable) => {
                log::warn!(
                    "{} backend unavailable; falling back to simple optimizer",
                    backend.name()
                );
            }
            Err(BackendError::Failed(message)) => {
                log::warn!(
                    "{} backend failed ({message}); falling back to simple optimizer",
                    backend.name()
                );
            }
        }
    }

    match fit_layered_model(&sounding, &settings) {
        Ok(result) => Ok(result),
        Err(error) => {
            log::warn!("Simple optimizer failed ({error}); using interpolation fallback");
            Ok(degenerate_fallback(&sounding, settings.response_samples))
        }
    }
}

/// Sentinel RMS carried by the interpolation fallback. Deliberately
/// non-zero: the fallback response is not a model fit and must not read
/// as a perfect one.
const FALLBACK_RMS: f64 = 0.1;

/// Trivial 3-layer pseudo-model from quantiles of the observed curve.
///
/// The response curve is a direct interpolation of the observations, not
/// a forward-model output; the distinct method tag keeps the caller from
/// mistaking it for a physical fit.
fn degenerate_fallback(sounding: &Sounding, response_samples: usize) -> InversionResult {
    let rhoa = sounding.rhoa.as_slice().expect("contiguous rhoa");
    let resistivities = vec![rhoa[0], median(rhoa), rhoa[rhoa.len() - 1]];

    let span = sounding.max_spacing() - sounding.min_spacing();
    let first_boundary = sounding.min_spacing() + span / 3.0;
    let thicknesses = vec![first_boundary, span / 3.0];

    let model = LayeredModel::new(resistivities, thicknesses)
        .expect("quantile pseudo-model is always well-formed for a valid sounding");

    let ab2_model = logspace(
        sounding.min_spacing(),
        sounding.max_spacing(),
        response_samples,
    );
    let ab2 = sounding.ab2.as_slice().expect("contiguous ab2");
    let rho_model = ab2_model.mapv(|s| interp1d(ab2, rhoa, s));

    InversionResult {
        success: true,
        model,
        ab2_model,
        rho_model,
        rms_error: FALLBACK_RMS,
        method: InversionMethod::InterpolationFallback,
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted[sorted.len() / 2]
}
