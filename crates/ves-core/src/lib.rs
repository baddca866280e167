// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Inversion Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Layered-earth forward model, bounded inversion with fallback cascade,
//! and the multi-sounding 2-D profile builder.

pub mod driver;
pub mod forward;
pub mod invert;
pub mod objective;
pub mod params;
pub mod preprocess;
pub mod profile;

pub use invert::{invert, AdvancedBackend, BackendError};
pub use preprocess::{remove_outliers, smooth_curve, splice_curve, SmoothingMethod};
pub use profile::{build_profile, build_profile_from_session, InterpolationMethod};
