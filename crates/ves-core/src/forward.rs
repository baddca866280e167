// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Layered Forward Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form layered-earth response approximation.
//!
//! Spacings inside the first layer read exactly the first resistivity,
//! spacings at or beyond the last explicit boundary read exactly the
//! half-space resistivity, and within each transition layer the two
//! adjacent layer resistivities are blended linearly with penetration.
//! This is a fitting proxy for the optimizer, not a physical
//! electromagnetic solve.

use ndarray::Array1;
use ves_math::interp::interp1d;

/// Predicted apparent resistivity at each spacing in `ab2`.
///
/// With fewer than 3 layers the model degenerates to the arithmetic mean
/// of the available resistivities at every spacing.
pub fn forward_response(ab2: &Array1<f64>, resistivities: &[f64], thicknesses: &[f64]) -> Array1<f64> {
    if resistivities.len() < 3 {
        let mean = resistivities.iter().sum::<f64>() / resistivities.len().max(1) as f64;
        return Array1::from_elem(ab2.len(), mean);
    }

    // Cumulative layer boundaries; the blend between layers i and i+1
    // runs across the (i+1)-th layer, between boundaries i and i+1.
    let n = resistivities.len();
    let mut boundaries = Vec::with_capacity(n - 1);
    let mut acc = 0.0;
    for &t in thicknesses {
        acc += t;
        boundaries.push(acc);
    }
    let deepest = boundaries[boundaries.len() - 1];

    ab2.mapv(|s| {
        if s >= deepest {
            resistivities[n - 1]
        } else {
            interp1d(&boundaries, &resistivities[..n - 1], s)
        }
    })
}
