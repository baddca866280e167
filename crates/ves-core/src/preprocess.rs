// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Sounding Curve Preprocessing
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Curve conditioning ahead of inversion: splicing of repeated spacings,
//! smoothing, and log-space outlier rejection.
//!
//! Field campaigns often re-measure the same AB/2 with a widened MN
//! spacing, which leaves duplicate abscissae the sounding constructor
//! rejects. Splicing merges those by averaging before the curve enters
//! the inversion cascade.

use serde::{Deserialize, Serialize};
use ves_math::filter::{exponential_smoothing, moving_average, savitzky_golay};
use ves_types::error::{VesError, VesResult};

/// Smoothing filter applied to the apparent-resistivity column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    MovingAverage,
    #[serde(rename = "savgol")]
    SavitzkyGolay,
    Exponential,
}

impl std::str::FromStr for SmoothingMethod {
    type Err = VesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moving_average" => Ok(SmoothingMethod::MovingAverage),
            "savgol" => Ok(SmoothingMethod::SavitzkyGolay),
            "exponential" => Ok(SmoothingMethod::Exponential),
            other => Err(VesError::ConfigError(format!(
                "Unknown smoothing method: {other}"
            ))),
        }
    }
}

/// Merge repeated AB/2 spacings by averaging their resistivities and
/// return the spliced curve sorted by ascending spacing.
///
/// Non-finite pairs are dropped. Signals `DomainError` when nothing
/// usable remains.
pub fn splice_curve(ab2: &[f64], rhoa: &[f64]) -> VesResult<(Vec<f64>, Vec<f64>)> {
    if ab2.len() != rhoa.len() {
        return Err(VesError::MismatchedArrayLengths {
            ab2: ab2.len(),
            rhoa: rhoa.len(),
        });
    }

    let mut pairs: Vec<(f64, f64)> = ab2
        .iter()
        .copied()
        .zip(rhoa.iter().copied())
        .filter(|(s, r)| s.is_finite() && r.is_finite())
        .collect();
    if pairs.is_empty() {
        return Err(VesError::DomainError(
            "No finite data points to splice".to_string(),
        ));
    }
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut out_ab2 = Vec::with_capacity(pairs.len());
    let mut out_rhoa = Vec::with_capacity(pairs.len());
    let mut i = 0;
    while i < pairs.len() {
        let spacing = pairs[i].0;
        let mut sum = 0.0;
        let mut count = 0;
        while i < pairs.len() && pairs[i].0 == spacing {
            sum += pairs[i].1;
            count += 1;
            i += 1;
        }
        out_ab2.push(spacing);
        out_rhoa.push(sum / count as f64);
    }
    Ok((out_ab2, out_rhoa))
}

/// Smooth an apparent-resistivity column with the selected filter.
///
/// `window` also sets the exponential factor, `alpha = 2 / (window + 1)`.
pub fn smooth_curve(
    rhoa: &[f64],
    method: SmoothingMethod,
    window: usize,
) -> VesResult<Vec<f64>> {
    if window == 0 {
        return Err(VesError::ConfigError(
            "Smoothing window must be >= 1".to_string(),
        ));
    }
    if rhoa.is_empty() {
        return Err(VesError::DomainError(
            "Cannot smooth an empty curve".to_string(),
        ));
    }
    Ok(match method {
        SmoothingMethod::MovingAverage => moving_average(rhoa, window),
        SmoothingMethod::SavitzkyGolay => savitzky_golay(rhoa, window),
        SmoothingMethod::Exponential => {
            exponential_smoothing(rhoa, 2.0 / (window + 1) as f64)
        }
    })
}

/// Drop points whose log10 resistivity lies more than `threshold`
/// standard deviations from the curve mean.
///
/// A flat curve has no outliers and passes through unchanged.
pub fn remove_outliers(
    ab2: &[f64],
    rhoa: &[f64],
    threshold: f64,
) -> VesResult<(Vec<f64>, Vec<f64>)> {
    if ab2.len() != rhoa.len() {
        return Err(VesError::MismatchedArrayLengths {
            ab2: ab2.len(),
            rhoa: rhoa.len(),
        });
    }
    if rhoa.is_empty() {
        return Err(VesError::DomainError(
            "Cannot screen an empty curve".to_string(),
        ));
    }
    if rhoa.iter().any(|&r| !r.is_finite() || r <= 0.0) {
        return Err(VesError::DomainError(
            "Outlier screening needs positive finite resistivities".to_string(),
        ));
    }

    let logs: Vec<f64> = rhoa.iter().map(|r| r.log10()).collect();
    let mean = logs.iter().sum::<f64>() / logs.len() as f64;
    let var = logs.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / logs.len() as f64;
    let std = var.sqrt();
    if std == 0.0 {
        return Ok((ab2.to_vec(), rhoa.to_vec()));
    }

    let mut out_ab2 = Vec::with_capacity(ab2.len());
    let mut out_rhoa = Vec::with_capacity(rhoa.len());
    for (i, &l) in logs.iter().enumerate() {
        if ((l - mean) / std).abs() < threshold {
            out_ab2.push(ab2[i]);
            out_rhoa.push(rhoa[i]);
        }
    }
    Ok((out_ab2, out_rhoa))
}
