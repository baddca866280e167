// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Inversion Settings
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Settings for the bounded simple-optimizer inversion.
///
/// The thickness upper bound is data-derived (`max(AB/2)`) and therefore
/// not part of the settings record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InversionSettings {
    /// Number of layers to fit (last one semi-infinite).
    #[serde(default = "default_n_layers")]
    pub n_layers: usize,
    /// Optimizer iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Convergence tolerance on the objective spread.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Box bounds on layer resistivity [Ω·m].
    #[serde(default = "default_rho_bounds")]
    pub rho_bounds: [f64; 2],
    /// Lower bound on layer thickness [m].
    #[serde(default = "default_thickness_min")]
    pub thickness_min: f64,
    /// Sample count of the log-spaced model response curve.
    #[serde(default = "default_response_samples")]
    pub response_samples: usize,
}

fn default_n_layers() -> usize {
    3
}
fn default_max_iterations() -> usize {
    400
}
fn default_tolerance() -> f64 {
    1e-8
}
fn default_rho_bounds() -> [f64; 2] {
    [1.0, 10_000.0]
}
fn default_thickness_min() -> f64 {
    1.0
}
fn default_response_samples() -> usize {
    60
}

impl Default for InversionSettings {
    fn default() -> Self {
        InversionSettings {
            n_layers: default_n_layers(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            rho_bounds: default_rho_bounds(),
            thickness_min: default_thickness_min(),
            response_samples: default_response_samples(),
        }
    }
}

impl InversionSettings {
    pub fn validate(&self) -> crate::error::VesResult<()> {
        use crate::error::VesError;
        if self.n_layers < 2 {
            return Err(VesError::ConfigError(
                "n_layers must be >= 2".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(VesError::ConfigError(
                "max_iterations must be >= 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(VesError::ConfigError(
                "tolerance must be finite and > 0".to_string(),
            ));
        }
        if !(self.rho_bounds[0] > 0.0 && self.rho_bounds[1] > self.rho_bounds[0]) {
            return Err(VesError::ConfigError(
                "rho_bounds must satisfy 0 < lower < upper".to_string(),
            ));
        }
        if !self.thickness_min.is_finite() || self.thickness_min <= 0.0 {
            return Err(VesError::ConfigError(
                "thickness_min must be finite and > 0".to_string(),
            ));
        }
        if self.response_samples < 2 {
            return Err(VesError::ConfigError(
                "response_samples must be >= 2".to_string(),
            ));
        }
        Ok(())
    }

    /// Load settings from a JSON file.
    pub fn from_file(path: &str) -> crate::error::VesResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }
}
