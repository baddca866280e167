// ─────────────────────────────────────────────────────────────────────
// SCPN VES Core — Property-Based Tests (proptest) for ves-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the forward model, objective, parameter
//! packing and the always-succeeds guarantee of the inversion cascade.

use ndarray::Array1;
use proptest::collection::vec;
use proptest::prelude::*;
use ves_core::forward::forward_response;
use ves_core::objective::log_rms_misfit;
use ves_core::params;
use ves_core::preprocess::splice_curve;
use ves_core::invert;
use ves_types::config::InversionSettings;
use ves_types::model::{InversionMethod, LayeredModel};

fn layered(n: usize) -> impl Strategy<Value = LayeredModel> {
    (
        vec(1.0f64..5000.0, n..n + 1),
        vec(0.5f64..30.0, n - 1..n),
    )
        .prop_map(|(rho, thk)| LayeredModel::new(rho, thk).unwrap())
}

proptest! {
    /// The forward response stays inside the span of layer resistivities
    /// and pins to the outer layers at the spacing extremes.
    #[test]
    fn forward_response_bracketing(model in layered(4)) {
        let depths = model.depths();
        let deepest = depths[depths.len() - 1];
        let ab2 = Array1::from_vec(vec![
            1e-3,
            deepest * 0.5,
            deepest,
            deepest * 10.0,
        ]);
        let out = forward_response(&ab2, &model.resistivities, &model.thicknesses);

        let lo = model.resistivities.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = model.resistivities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in out.iter() {
            prop_assert!(*v >= lo - 1e-9 && *v <= hi + 1e-9);
        }
        // Shallowest spacing samples the top layer, deepest the half-space.
        prop_assert!((out[0] - model.resistivities[0]).abs() < 1e-9);
        prop_assert!((out[3] - model.resistivities[3]).abs() < 1e-9);
    }

    /// Zero misfit iff curves coincide, and misfit is finite for any
    /// positive pair.
    #[test]
    fn objective_identity_and_finiteness(
        rhoa in vec(0.1f64..5000.0, 3..30),
        scale in 1.01f64..10.0,
    ) {
        let obs = Array1::from_vec(rhoa);
        prop_assert_eq!(log_rms_misfit(&obs, &obs).unwrap(), 0.0);

        let shifted = obs.mapv(|v| v * scale);
        let misfit = log_rms_misfit(&obs, &shifted).unwrap();
        prop_assert!(misfit.is_finite());
        prop_assert!((misfit - scale.log10()).abs() < 1e-9);
    }

    /// pack/split is a lossless round trip for any valid model.
    #[test]
    fn params_roundtrip(model in layered(5)) {
        let theta = params::pack(&model);
        prop_assert_eq!(theta.len(), 2 * model.n_layers() - 1);
        let (rho, thk) = params::split(&theta, model.n_layers()).unwrap();
        prop_assert_eq!(rho, model.resistivities);
        prop_assert_eq!(thk, model.thicknesses);
    }

    /// Wrong-length vectors always signal InvalidParameterVector.
    #[test]
    fn split_rejects_wrong_lengths(
        theta in vec(1.0f64..100.0, 0..12),
        n_layers in 2usize..6,
    ) {
        let expected = 2 * n_layers - 1;
        let result = params::split(&theta, n_layers);
        if theta.len() == expected {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// The cascade always returns a tagged, well-formed result for any
    /// valid sounding, even with a crippled optimizer budget.
    #[test]
    fn invert_always_returns_a_model(
        pairs in vec((0.1f64..500.0, 1.0f64..2000.0), 4..25),
    ) {
        let mut seen = std::collections::BTreeMap::new();
        for (s, r) in &pairs {
            seen.insert((s * 1e6) as i64, (*s, *r));
        }
        prop_assume!(seen.len() >= 4);
        let ab2: Vec<f64> = seen.values().map(|p| p.0).collect();
        let rhoa: Vec<f64> = seen.values().map(|p| p.1).collect();

        let settings = InversionSettings {
            max_iterations: 2,
            tolerance: 1e-15,
            ..Default::default()
        };
        let result = invert(&ab2, &rhoa, 3, None, &settings).unwrap();
        prop_assert!(result.success);
        prop_assert_eq!(
            result.model.resistivities.len(),
            result.model.thicknesses.len() + 1
        );
        prop_assert!(result.rms_error >= 0.0);
        prop_assert_ne!(result.method, InversionMethod::Advanced);
    }

    /// Spliced curves are strictly increasing in AB/2, stay inside the
    /// observed resistivity envelope, and never grow.
    #[test]
    fn splice_sorts_and_merges(
        pairs in vec((0.1f64..500.0, 1.0f64..2000.0), 1..40),
    ) {
        let ab2: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let rhoa: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let (s, r) = splice_curve(&ab2, &rhoa).unwrap();

        prop_assert!(s.len() <= ab2.len());
        prop_assert_eq!(s.len(), r.len());
        prop_assert!(s.windows(2).all(|w| w[1] > w[0]));
        let lo = rhoa.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = rhoa.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in r {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }
}
