// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Data Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared data model: soundings, layered models, inversion results,
//! session-scoped saved models and the gridded 2-D section.

use crate::error::{VesError, VesResult};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Minimum number of (AB/2, rhoa) pairs for a meaningful sounding curve.
pub const MIN_SOUNDING_POINTS: usize = 3;

/// A single vertical electrical sounding: paired electrode half-spacings
/// and apparent resistivities, sorted by ascending AB/2.
#[derive(Debug, Clone)]
pub struct Sounding {
    pub ab2: Array1<f64>,
    pub rhoa: Array1<f64>,
}

impl Sounding {
    /// Validate and construct a sounding. Pairs are sorted by AB/2.
    ///
    /// Length mismatch is the one hard failure of the inversion entry
    /// point and is surfaced before any numerical work.
    pub fn new(ab2: &[f64], rhoa: &[f64]) -> VesResult<Self> {
        if ab2.len() != rhoa.len() {
            return Err(VesError::MismatchedArrayLengths {
                ab2: ab2.len(),
                rhoa: rhoa.len(),
            });
        }
        if ab2.len() < MIN_SOUNDING_POINTS {
            return Err(VesError::DomainError(format!(
                "Sounding needs at least {MIN_SOUNDING_POINTS} points, got {}",
                ab2.len()
            )));
        }
        for (&s, &r) in ab2.iter().zip(rhoa.iter()) {
            if !s.is_finite() || s <= 0.0 {
                return Err(VesError::DomainError(format!(
                    "Electrode spacing must be finite and > 0, got {s}"
                )));
            }
            if !r.is_finite() || r <= 0.0 {
                return Err(VesError::DomainError(format!(
                    "Apparent resistivity must be finite and > 0, got {r}"
                )));
            }
        }

        let mut pairs: Vec<(f64, f64)> = ab2.iter().copied().zip(rhoa.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(VesError::DomainError(
                "Duplicate AB/2 spacings in sounding".to_string(),
            ));
        }

        Ok(Sounding {
            ab2: pairs.iter().map(|p| p.0).collect(),
            rhoa: pairs.iter().map(|p| p.1).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.ab2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ab2.is_empty()
    }

    pub fn max_spacing(&self) -> f64 {
        self.ab2[self.ab2.len() - 1]
    }

    pub fn min_spacing(&self) -> f64 {
        self.ab2[0]
    }
}

/// A 1-D layered-earth model. The last layer is the semi-infinite
/// half-space and carries no thickness entry.
///
/// Invariant: `resistivities.len() == thicknesses.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredModel {
    pub resistivities: Vec<f64>,
    pub thicknesses: Vec<f64>,
}

impl LayeredModel {
    pub fn new(resistivities: Vec<f64>, thicknesses: Vec<f64>) -> VesResult<Self> {
        if resistivities.len() < 2 || resistivities.len() != thicknesses.len() + 1 {
            return Err(VesError::DomainError(format!(
                "Layered model needs n >= 2 resistivities and n-1 thicknesses, got {} and {}",
                resistivities.len(),
                thicknesses.len()
            )));
        }
        if resistivities.iter().any(|&r| !r.is_finite() || r <= 0.0) {
            return Err(VesError::DomainError(
                "Layer resistivities must be finite and > 0".to_string(),
            ));
        }
        if thicknesses.iter().any(|&t| !t.is_finite() || t <= 0.0) {
            return Err(VesError::DomainError(
                "Layer thicknesses must be finite and > 0".to_string(),
            ));
        }
        Ok(LayeredModel {
            resistivities,
            thicknesses,
        })
    }

    pub fn n_layers(&self) -> usize {
        self.resistivities.len()
    }

    /// Cumulative interface depths, one per explicit layer.
    pub fn depths(&self) -> Vec<f64> {
        let mut acc = 0.0;
        self.thicknesses
            .iter()
            .map(|&t| {
                acc += t;
                acc
            })
            .collect()
    }

    /// Thickness column including the infinite half-space sentinel.
    pub fn thickness_column(&self) -> Vec<f64> {
        let mut col = self.thicknesses.clone();
        col.push(f64::INFINITY);
        col
    }
}

/// Which tier of the fallback cascade produced an inversion result.
///
/// Callers are expected to report this tag so the interpolation fallback
/// is never mistaken for a high-confidence fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InversionMethod {
    Advanced,
    SimpleOptimizer,
    InterpolationFallback,
}

impl InversionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InversionMethod::Advanced => "advanced",
            InversionMethod::SimpleOptimizer => "simple-optimizer",
            InversionMethod::InterpolationFallback => "interpolation-fallback",
        }
    }
}

impl std::fmt::Display for InversionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable output of one inversion call.
#[derive(Debug, Clone)]
pub struct InversionResult {
    pub success: bool,
    pub model: LayeredModel,
    /// Log-spaced abscissae of the smooth model response, for plotting.
    pub ab2_model: Array1<f64>,
    /// Model response sampled at `ab2_model`.
    pub rho_model: Array1<f64>,
    /// Log-space RMS misfit on the observed points.
    pub rms_error: f64,
    pub method: InversionMethod,
}

/// Placement metadata supplied when a result is committed to a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    pub x_position: f64,
    #[serde(default)]
    pub z_elevation: f64,
    pub sev_number: u32,
    #[serde(default)]
    pub relative_height: f64,
}

/// A committed layered model tagged with its horizontal position.
///
/// `depths` and `resistivity` are parallel columns; the final row is the
/// synthetic closing row for the half-space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    pub depths: Vec<f64>,
    pub resistivity: Vec<f64>,
    pub x_position: f64,
    #[serde(default)]
    pub z_elevation: f64,
    pub sev_number: u32,
    #[serde(default)]
    pub relative_height: f64,
}

/// Three-column serialization of a saved model, matching the table the
/// surrounding application displays and exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTable {
    #[serde(rename = "Thickness")]
    pub thickness: Vec<f64>,
    #[serde(rename = "Depth")]
    pub depth: Vec<f64>,
    #[serde(rename = "Resistivity")]
    pub resistivity: Vec<f64>,
}

impl SavedModel {
    /// Expand depths into per-row thicknesses (first row from the surface).
    pub fn to_table(&self) -> ModelTable {
        let mut thickness = Vec::with_capacity(self.depths.len());
        let mut prev = 0.0;
        for &d in &self.depths {
            thickness.push(d - prev);
            prev = d;
        }
        ModelTable {
            thickness,
            depth: self.depths.clone(),
            resistivity: self.resistivity.clone(),
        }
    }

    /// Rebuild a saved model from its exported table columns.
    pub fn from_table(table: &ModelTable, placement: Placement) -> VesResult<Self> {
        if table.depth.len() != table.resistivity.len() {
            return Err(VesError::DomainError(format!(
                "Table columns are not parallel: depth={}, resistivity={}",
                table.depth.len(),
                table.resistivity.len()
            )));
        }
        if table.depth.is_empty() {
            return Err(VesError::DomainError(
                "Model table has no rows".to_string(),
            ));
        }
        Ok(SavedModel {
            depths: table.depth.clone(),
            resistivity: table.resistivity.clone(),
            x_position: placement.x_position,
            z_elevation: placement.z_elevation,
            sev_number: placement.sev_number,
            relative_height: placement.relative_height,
        })
    }
}

/// Caller-owned, session-scoped collection of saved models.
///
/// The core functions stay stateless; the session is passed by reference
/// into the profile builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    models: Vec<SavedModel>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn add(&mut self, model: SavedModel) {
        self.models.push(model);
    }

    pub fn remove(&mut self, index: usize) -> Option<SavedModel> {
        if index < self.models.len() {
            Some(self.models.remove(index))
        } else {
            None
        }
    }

    pub fn models(&self) -> &[SavedModel] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Commit an inversion result at the given placement.
    ///
    /// The half-space gets a closing row whose thickness is the mean of
    /// the explicit layer thicknesses, so the depth and resistivity
    /// columns stay parallel.
    pub fn commit(&mut self, result: &InversionResult, placement: Placement) -> &SavedModel {
        let model = &result.model;
        let mut depths = model.depths();
        let avg_thickness = if model.thicknesses.is_empty() {
            0.0
        } else {
            model.thicknesses.iter().sum::<f64>() / model.thicknesses.len() as f64
        };
        let last_depth = depths.last().copied().unwrap_or(0.0) + avg_thickness;
        depths.push(last_depth);

        self.models.push(SavedModel {
            depths,
            resistivity: model.resistivities.clone(),
            x_position: placement.x_position,
            z_elevation: placement.z_elevation,
            sev_number: placement.sev_number,
            relative_height: placement.relative_height,
        });
        self.models.last().expect("model just pushed")
    }
}

/// Dense 2-D resistivity section on a regular grid.
///
/// Rows follow `elevation` (ascending), columns follow `x`. Rebuilt fresh
/// on every profile request, never mutated in place.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub x: Array1<f64>,
    pub elevation: Array1<f64>,
    pub resistivity: Array2<f64>,
}

impl SpatialGrid {
    pub fn shape(&self) -> (usize, usize) {
        let s = self.resistivity.shape();
        (s[0], s[1])
    }
}
