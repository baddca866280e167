//! Log-scale RMS misfit between observed and modeled sounding curves.
//!
//! Apparent resistivity spans orders of magnitude, so the mismatch is
//! measured on log10 curves.

use ndarray::Array1;
use ves_types::error::{VesError, VesResult};

/// Root-mean-square of `log10(predicted) - log10(observed)`.
///
/// Finite for all positive inputs. Non-positive values are a caller
/// error and signal `DomainError`.
pub fn log_rms_misfit(observed: &Array1<f64>, predicted: &Array1<f64>) -> VesResult<f64> {
    if observed.len() != predicted.len() {
        return Err(VesError::DomainError(format!(
            "Curve length mismatch: observed={}, predicted={}",
            observed.len(),
            predicted.len()
        )));
    }
    if observed.is_empty() {
        return Err(VesError::DomainError(
            "Cannot compute misfit of empty curves".to_string(),
        ));
    }

    let mut sum_sq = 0.0;
    for (&obs, &pred) in observed.iter().zip(predicted.iter()) {
        if obs <= 0.0 || pred <= 0.0 {
            return Err(VesError::DomainError(format!(
                "Log misfit undefined for non-positive resistivity (obs={obs}, pred={pred})"
            )));
        }
        let d = pred.log10() - obs.log10();
        sum_sq += d * d;
    }
    Ok((sum_sq / observed.len() as f64).sqrt())
}
