//! Flat parameter vector encoding for layered models.
//!
//! The optimizer works on a vector of length `2n - 1`: n resistivities
//! followed by n - 1 thicknesses, the last layer being semi-infinite.

use ves_types::error::{VesError, VesResult};
use ves_types::model::LayeredModel;

/// Flatten a layered model into the optimizer's parameter vector.
pub fn pack(model: &LayeredModel) -> Vec<f64> {
    let mut theta = Vec::with_capacity(2 * model.n_layers() - 1);
    theta.extend_from_slice(&model.resistivities);
    theta.extend_from_slice(&model.thicknesses);
    theta
}

/// Split a flat parameter vector into (resistivities, thicknesses).
///
/// Pure and stateless; no value validation happens here — the optimizer
/// driver's box bounds keep the entries physical.
pub fn split(theta: &[f64], n_layers: usize) -> VesResult<(Vec<f64>, Vec<f64>)> {
    let expected = 2 * n_layers - 1;
    if n_layers < 2 || theta.len() != expected {
        return Err(VesError::InvalidParameterVector {
            expected,
            got: theta.len(),
        });
    }
    Ok((theta[..n_layers].to_vec(), theta[n_layers..].to_vec()))
}
