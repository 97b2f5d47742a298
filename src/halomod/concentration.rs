//! Concentration–mass relations for NFW haloes.
//!
//! Purpose
//! -------
//! Map (mass, scale factor, overdensity) to the NFW concentration
//! c = r_Δ / r_s for a closed set of relations selected by
//! [`ConcentrationModel`].
//!
//! Key behaviors
//! -------------
//! - `Bhattacharya2011`: c = 9 ν^-0.29 (D(a)/D(1))^1.15 with ν = δc/σ(M, a);
//!   only valid for Δ = 200 (mean matter).
//! - `Duffy2008Virial`: c = 7.85 (M / M_piv)^-0.081 a^0.71 with
//!   M_piv = 2×10¹² M_sun / h; only valid for Δ equal to the cosmology's
//!   virial overdensity at `a`.
//! - `Constant`: c = 4 for any input.
//!
//! Invariants & assumptions
//! ------------------------
//! - Overdensity preconditions are checked with exact floating-point
//!   equality. Callers must pass the same Δ they obtained from
//!   `virial_overdensity(a)` (or the literal 200).
//! - `Constant` performs no validation and consults no collaborator.
use std::str::FromStr;

use tracing::warn;

use crate::{
    cosmology::HaloCosmology,
    halomod::errors::{HaloModelError, HaloResult},
};

/// Linear collapse threshold used in the peak height of the
/// Bhattacharya et al. relation.
pub const COLLAPSE_THRESHOLD: f64 = 1.686;

/// Overdensity at which the Bhattacharya et al. relation is calibrated.
pub const BHATTACHARYA_OVERDENSITY: f64 = 200.0;

/// Concentration returned by [`ConcentrationModel::Constant`].
pub const CONSTANT_CONCENTRATION: f64 = 4.0;

const DUFFY_A: f64 = 7.85;
const DUFFY_B: f64 = -0.081;
const DUFFY_C: f64 = -0.71;
const DUFFY_PIVOT_H: f64 = 2.0e12;

/// ConcentrationModel — closed set of concentration–mass relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcentrationModel {
    /// Bhattacharya et al. (2011), Δ = 200 mean matter.
    Bhattacharya2011,
    /// Duffy et al. (2008), virial overdensity.
    Duffy2008Virial,
    /// Fixed c = 4.
    Constant,
}

impl ConcentrationModel {
    /// Canonical label, as accepted by [`FromStr`].
    pub fn label(&self) -> &'static str {
        match self {
            ConcentrationModel::Bhattacharya2011 => "bhattacharya2011",
            ConcentrationModel::Duffy2008Virial => "duffy2008_virial",
            ConcentrationModel::Constant => "constant",
        }
    }
}

impl std::fmt::Display for ConcentrationModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConcentrationModel {
    type Err = HaloModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bhattacharya2011" | "bhattacharya" => Ok(ConcentrationModel::Bhattacharya2011),
            "duffy2008_virial" | "duffy2008" | "duffy" => Ok(ConcentrationModel::Duffy2008Virial),
            "constant" | "constant_concentration" => Ok(ConcentrationModel::Constant),
            _ => Err(HaloModelError::UnknownSelector {
                kind: "concentration model",
                label: s.to_string(),
            }),
        }
    }
}

/// Halo concentration c = r_Δ / r_s.
///
/// Parameters
/// ----------
/// - `cosmo`: cosmological collaborators.
/// - `mass`: halo mass in M_sun.
/// - `a`: scale factor.
/// - `odelta`: overdensity Δ (relative to mean matter) defining the halo.
/// - `model`: concentration relation.
///
/// Errors
/// ------
/// - `HaloModelError::ModelMismatch` when `odelta` violates the model's
///   precondition.
/// - `HaloModelError::InvalidMass` for non-positive or non-finite masses.
/// - `HaloModelError::Collaborator` if σ(M), D(a) or Δ_v(a) fail.
pub fn concentration<C>(
    cosmo: &C, mass: f64, a: f64, odelta: f64, model: ConcentrationModel,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    match model {
        ConcentrationModel::Bhattacharya2011 => {
            if odelta != BHATTACHARYA_OVERDENSITY {
                return Err(mismatch(model, odelta, BHATTACHARYA_OVERDENSITY));
            }
            validate_mass(mass)?;
            let growth = cosmo.growth_factor(a)?;
            let growth_today = cosmo.growth_factor(1.0)?;
            let nu = COLLAPSE_THRESHOLD / cosmo.sigma_m(mass, a)?;
            Ok(9.0 * nu.powf(-0.29) * (growth / growth_today).powf(1.15))
        }
        ConcentrationModel::Duffy2008Virial => {
            let virial = cosmo.virial_overdensity(a)?;
            if odelta != virial {
                return Err(mismatch(model, odelta, virial));
            }
            validate_mass(mass)?;
            let pivot = DUFFY_PIVOT_H / cosmo.h();
            Ok(DUFFY_A * (mass / pivot).powf(DUFFY_B) * a.powf(-DUFFY_C))
        }
        ConcentrationModel::Constant => Ok(CONSTANT_CONCENTRATION),
    }
}

fn mismatch(model: ConcentrationModel, overdensity: f64, required: f64) -> HaloModelError {
    warn!(model = model.label(), overdensity, required, "concentration overdensity mismatch");
    HaloModelError::ModelMismatch { model: model.label(), overdensity, required }
}

fn validate_mass(mass: f64) -> HaloResult<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(HaloModelError::InvalidMass { mass });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::{CosmoParams, FiducialCosmology};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form values of each relation on the fiducial cosmology.
    // - Overdensity preconditions (ModelMismatch).
    // - The constant model's independence from its inputs.
    // - Label parsing and rejection of unknown labels.
    // -------------------------------------------------------------------------

    fn fiducial() -> FiducialCosmology {
        FiducialCosmology::new(CosmoParams::fiducial()).expect("fiducial cosmology should build")
    }

    #[test]
    // Purpose
    // -------
    // Verify the Duffy et al. relation against its closed form.
    //
    // Given
    // -----
    // - M = 1e13 M_sun at a ∈ {1, 0.5}, Δ = Δ_v(a).
    //
    // Expect
    // ------
    // - c = 7.85 (M h / 2e12)^-0.081 a^0.71.
    fn duffy_matches_closed_form() {
        let cosmo = fiducial();
        for a in [1.0, 0.5] {
            let dv = cosmo.virial_overdensity(a).unwrap();
            let c = concentration(&cosmo, 1e13, a, dv, ConcentrationModel::Duffy2008Virial)
                .unwrap();
            let expected = 7.85 * (1e13 * 0.7 / 2e12_f64).powf(-0.081) * a.powf(0.71);
            assert_relative_eq!(c, expected, max_relative = 1e-14);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the Bhattacharya et al. relation against its closed form.
    //
    // Given
    // -----
    // - M = 1e12 M_sun at a = 1, Δ = 200.
    //
    // Expect
    // ------
    // - c = 9 (1.686/σ)^-0.29 since D(1)/D(1) = 1.
    fn bhattacharya_matches_closed_form() {
        let cosmo = fiducial();
        let sigma = cosmo.sigma_m(1e12, 1.0).unwrap();

        let c = concentration(&cosmo, 1e12, 1.0, 200.0, ConcentrationModel::Bhattacharya2011)
            .unwrap();

        assert_relative_eq!(c, 9.0 * (1.686 / sigma).powf(-0.29), max_relative = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Verify that each empirical relation rejects the wrong overdensity.
    //
    // Given
    // -----
    // - Bhattacharya with Δ = Δ_v(1); Duffy with Δ = 200.
    //
    // Expect
    // ------
    // - `ModelMismatch` carrying the offending and required Δ.
    fn empirical_models_reject_wrong_overdensity() {
        let cosmo = fiducial();
        let dv = cosmo.virial_overdensity(1.0).unwrap();

        match concentration(&cosmo, 1e12, 1.0, dv, ConcentrationModel::Bhattacharya2011) {
            Err(HaloModelError::ModelMismatch { overdensity, required, .. }) => {
                assert_eq!(overdensity, dv);
                assert_eq!(required, 200.0);
            }
            other => panic!("expected ModelMismatch, got {other:?}"),
        }
        match concentration(&cosmo, 1e12, 1.0, 200.0, ConcentrationModel::Duffy2008Virial) {
            Err(HaloModelError::ModelMismatch { overdensity, required, .. }) => {
                assert_eq!(overdensity, 200.0);
                assert_eq!(required, dv);
            }
            other => panic!("expected ModelMismatch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the constant model ignores its inputs.
    //
    // Given
    // -----
    // - Several masses, scale factors and overdensities, including invalid ones.
    //
    // Expect
    // ------
    // - c = 4 every time.
    fn constant_model_returns_four() {
        let cosmo = fiducial();
        for (mass, a, odelta) in [(1e12, 1.0, 200.0), (1e8, 0.3, 500.0), (-1.0, 0.0, f64::NAN)] {
            let c = concentration(&cosmo, mass, a, odelta, ConcentrationModel::Constant).unwrap();
            assert_eq!(c, 4.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify label parsing.
    //
    // Given
    // -----
    // - Canonical labels, an alias, and an unknown label.
    //
    // Expect
    // ------
    // - Canonical labels round-trip through `label()`; unknown labels give
    //   `UnknownSelector`.
    fn labels_parse_and_unknown_is_rejected() {
        for model in [
            ConcentrationModel::Bhattacharya2011,
            ConcentrationModel::Duffy2008Virial,
            ConcentrationModel::Constant,
        ] {
            assert_eq!(model.label().parse::<ConcentrationModel>().unwrap(), model);
        }
        assert_eq!("Duffy".parse::<ConcentrationModel>().unwrap(), ConcentrationModel::Duffy2008Virial);

        match "prada2012".parse::<ConcentrationModel>() {
            Err(HaloModelError::UnknownSelector { label, .. }) => assert_eq!(label, "prada2012"),
            other => panic!("expected UnknownSelector, got {other:?}"),
        }
    }
}
