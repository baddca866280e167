// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — 1-D Smoothing Filters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Smoothing filters for noisy sounding curves: centered moving average,
//! quadratic Savitzky-Golay, and exponential smoothing.

/// Centered moving average. Windows are truncated at both ends of the
/// series, so the output has the same length as the input.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if window < 2 {
        return data.to_vec();
    }
    let n = data.len();
    let half = window / 2;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            data[start..end].iter().sum::<f64>() / (end - start) as f64
        })
        .collect()
}

/// Quadratic Savitzky-Golay smoothing with a centered window.
///
/// Uses the closed-form convolution weights of a degree-2 local fit.
/// Near the series ends the window shrinks symmetrically; where fewer
/// than 5 points fit, the sample passes through unchanged (a quadratic
/// through 3 points is exact).
pub fn savitzky_golay(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    let half = window / 2;
    (0..n)
        .map(|i| {
            let m = half.min(i).min(n - 1 - i);
            if m < 2 {
                return data[i];
            }
            let mf = m as f64;
            let norm = (2.0 * mf + 3.0) * (2.0 * mf + 1.0) * (2.0 * mf - 1.0);
            let mut acc = 0.0;
            for j in -(m as isize)..=(m as isize) {
                let jf = j as f64;
                let weight = 3.0 * (3.0 * mf * mf + 3.0 * mf - 1.0 - 5.0 * jf * jf) / norm;
                acc += weight * data[(i as isize + j) as usize];
            }
            acc
        })
        .collect()
}

/// Exponential smoothing: each sample is pulled toward the running
/// smoothed value with weight `1 - alpha`.
pub fn exponential_smoothing(data: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(data.len());
    let mut prev = match data.first() {
        Some(&v) => v,
        None => return out,
    };
    out.push(prev);
    for &v in &data[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}
