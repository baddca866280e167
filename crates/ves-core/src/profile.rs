// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Spatial Profile Builder
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Assembly of independently inverted 1-D models into a gridded 2-D
//! resistivity section.
//!
//! Each saved model is expanded into a vertical column of per-metre
//! samples in absolute elevation, then the columns are interpolated onto
//! a regular grid: vertically within each column, linearly between the
//! two bracketing columns in x.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use ves_math::interp::{interp1d, CubicSpline};
use ves_types::error::{VesError, VesResult};
use ves_types::model::{SavedModel, Session, SpatialGrid};

/// Depth step of the per-layer sample expansion [m].
const DEPTH_STEP: f64 = 1.0;

/// Gridding method for the scattered column samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    Nearest,
    Linear,
    Cubic,
}

impl std::str::FromStr for InterpolationMethod {
    type Err = VesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(InterpolationMethod::Nearest),
            "linear" => Ok(InterpolationMethod::Linear),
            "cubic" => Ok(InterpolationMethod::Cubic),
            other => Err(VesError::ConfigError(format!(
                "Unknown interpolation method: {other}"
            ))),
        }
    }
}

/// One sounding expanded into absolute-elevation samples.
struct Column {
    x: f64,
    /// Ascending elevations.
    elevation: Vec<f64>,
    resistivity: Vec<f64>,
}

impl Column {
    /// Expand a saved model: one sample per depth step down to the last
    /// recorded depth, each depth mapped to its containing layer.
    fn from_model(model: &SavedModel) -> VesResult<Self> {
        if model.depths.is_empty() || model.depths.len() != model.resistivity.len() {
            return Err(VesError::DomainError(format!(
                "Saved model columns are not parallel: depths={}, resistivity={}",
                model.depths.len(),
                model.resistivity.len()
            )));
        }

        let surface = model.z_elevation + model.relative_height;
        let bottom = model.depths[model.depths.len() - 1];

        let mut elevation = Vec::new();
        let mut resistivity = Vec::new();
        let mut depth = 0.0;
        while depth <= bottom {
            let layer = model
                .depths
                .iter()
                .position(|&d| depth <= d)
                .unwrap_or(model.depths.len() - 1);
            elevation.push(surface - depth);
            resistivity.push(model.resistivity[layer]);
            depth += DEPTH_STEP;
        }

        // Samples were generated top-down; interpolation wants ascending
        // elevation.
        elevation.reverse();
        resistivity.reverse();

        Ok(Column {
            x: model.x_position,
            elevation,
            resistivity,
        })
    }

    /// Fitted vertical interpolant for this column.
    fn interpolant(&self, method: InterpolationMethod) -> VerticalInterp<'_> {
        match method {
            InterpolationMethod::Cubic if self.elevation.len() >= 3 => {
                VerticalInterp::Spline(CubicSpline::new(&self.elevation, &self.resistivity))
            }
            _ => VerticalInterp::Linear {
                elevation: &self.elevation,
                resistivity: &self.resistivity,
            },
        }
    }
}

enum VerticalInterp<'a> {
    Linear {
        elevation: &'a [f64],
        resistivity: &'a [f64],
    },
    Spline(CubicSpline),
}

impl VerticalInterp<'_> {
    fn eval(&self, elevation: f64) -> f64 {
        match self {
            VerticalInterp::Linear {
                elevation: e,
                resistivity: r,
            } => interp1d(e, r, elevation),
            VerticalInterp::Spline(spline) => spline.eval(elevation),
        }
    }
}

/// Interpolate ≥ 2 saved models onto a `resolution × resolution` grid.
///
/// Grid rows follow ascending elevation, columns ascending x. Negative
/// interpolated resistivity (possible with the cubic method near sharp
/// contrasts) is clamped to 0.
pub fn build_profile(
    models: &[SavedModel],
    resolution: usize,
    method: InterpolationMethod,
) -> VesResult<SpatialGrid> {
    if models.len() < 2 {
        return Err(VesError::InsufficientModels {
            count: models.len(),
        });
    }
    if resolution < 2 {
        return Err(VesError::ConfigError(
            "Grid resolution must be >= 2".to_string(),
        ));
    }

    let mut columns = models
        .iter()
        .map(Column::from_model)
        .collect::<VesResult<Vec<_>>>()?;
    columns.sort_by(|a, b| a.x.total_cmp(&b.x));

    let x_min = columns[0].x;
    let x_max = columns[columns.len() - 1].x;
    if x_min == x_max {
        return Err(VesError::DegenerateGeometry(
            "All soundings share one x position; a section needs lateral extent".to_string(),
        ));
    }

    let e_min = columns
        .iter()
        .map(|c| c.elevation[0])
        .fold(f64::INFINITY, f64::min);
    let e_max = columns
        .iter()
        .map(|c| c.elevation[c.elevation.len() - 1])
        .fold(f64::NEG_INFINITY, f64::max);
    if e_min >= e_max {
        return Err(VesError::DegenerateGeometry(
            "Saved models have no vertical extent".to_string(),
        ));
    }

    let grid_x = Array1::linspace(x_min, x_max, resolution);
    let grid_e = Array1::linspace(e_min, e_max, resolution);

    let interpolants: Vec<VerticalInterp<'_>> =
        columns.iter().map(|c| c.interpolant(method)).collect();

    let mut grid_z = Array2::zeros((resolution, resolution));
    for (j, &x) in grid_x.iter().enumerate() {
        // Bracketing columns in x (grid spans exactly the column range).
        let hi = columns
            .partition_point(|c| c.x <= x)
            .clamp(1, columns.len() - 1);
        let lo = hi - 1;
        let span = columns[hi].x - columns[lo].x;

        for (i, &e) in grid_e.iter().enumerate() {
            let value = match method {
                InterpolationMethod::Nearest => nearest_sample(&columns, x, e, span),
                _ => {
                    let v_lo = interpolants[lo].eval(e);
                    let v_hi = interpolants[hi].eval(e);
                    if span > 0.0 {
                        let t = (x - columns[lo].x) / span;
                        v_lo + t * (v_hi - v_lo)
                    } else {
                        0.5 * (v_lo + v_hi)
                    }
                }
            };
            grid_z[[i, j]] = value.max(0.0);
        }
    }

    Ok(SpatialGrid {
        x: grid_x,
        elevation: grid_e,
        resistivity: grid_z,
    })
}

/// Nearest scattered sample, with x distance scaled by the local column
/// spacing so lateral and vertical distances are comparable.
fn nearest_sample(columns: &[Column], x: f64, e: f64, span: f64) -> f64 {
    let x_scale = if span > 0.0 { span } else { 1.0 };
    let mut best = f64::INFINITY;
    let mut value = 0.0;
    for column in columns {
        let dx = (column.x - x) / x_scale;
        for (idx, &ce) in column.elevation.iter().enumerate() {
            let de = ce - e;
            let d = dx * dx + de * de;
            if d < best {
                best = d;
                value = column.resistivity[idx];
            }
        }
    }
    value
}

/// Build a profile from every model committed to a session.
pub fn build_profile_from_session(
    session: &Session,
    resolution: usize,
    method: InterpolationMethod,
) -> VesResult<SpatialGrid> {
    build_profile(session.models(), resolution, method)
}
