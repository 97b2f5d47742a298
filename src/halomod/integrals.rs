//! One- and two-halo mass integrals.
//!
//! Purpose
//! -------
//! Integrate halo-weighted window functions over log10 M:
//!
//! - one-halo:  I₁(k) = ∫ dn/dlog10M · W(k|M)² dlog10M
//! - two-halo:  I₂(k) = ∫ b(M) · dn/dlog10M · W(k|M) dlog10M
//!
//! Key behaviors
//! -------------
//! - Δ_v(a) is obtained once per integral and threaded unchanged through
//!   the window, mass function and bias.
//! - Each call integrates with a fresh workspace sized by the options'
//!   subdivision limit.
//! - Quadrature failures become `HaloModelError::IntegrationFailure` tagged
//!   with the term; integrand (collaborator/profile) errors pass through
//!   unchanged.
//!
//! Conventions
//! -----------
//! - The integration variable is log10 M and the mass function is per
//!   log10 M, so no ln 10 Jacobian appears.
use tracing::{debug, warn};

use crate::{
    cosmology::HaloCosmology,
    halomod::{
        errors::{HaloModelError, HaloResult, HaloTerm},
        options::HaloModelOptions,
        profile::{ProfileKind, window_function},
    },
    numerics::{QuadFailure, integrate},
};

/// One-halo integral I₁(k) = ∫ dn/dlog10M · W² dlog10M.
///
/// Errors
/// ------
/// - `IntegrationFailure { term: OneHalo, .. }` if the quadrature fails.
/// - Any error raised by the window, the mass function or Δ_v.
pub fn one_halo_integral<C>(
    cosmo: &C, k: f64, a: f64, options: &HaloModelOptions,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    let odelta = cosmo.virial_overdensity(a)?;
    let integrand = |log10_mass: f64| -> HaloResult<f64> {
        let mass = 10f64.powf(log10_mass);
        let window = window_function(cosmo, ProfileKind::Nfw, mass, k, a, odelta)?;
        let dn_dlog10m = cosmo.mass_function(mass, a, odelta)?;
        Ok(dn_dlog10m * window * window)
    };
    mass_integral(HaloTerm::OneHalo, integrand, k, a, options)
}

/// Two-halo integral I₂(k) = ∫ b · dn/dlog10M · W dlog10M.
///
/// At k = 0 this is the bias-weighted mass fraction resolved by the
/// integration range, which lies in (0, 1] for a normalised mass function
/// and bias.
///
/// Errors
/// ------
/// - `IntegrationFailure { term: TwoHalo, .. }` if the quadrature fails.
/// - Any error raised by the window, mass function, bias or Δ_v.
pub fn two_halo_integral<C>(
    cosmo: &C, k: f64, a: f64, options: &HaloModelOptions,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    let odelta = cosmo.virial_overdensity(a)?;
    let integrand = |log10_mass: f64| -> HaloResult<f64> {
        let mass = 10f64.powf(log10_mass);
        let window = window_function(cosmo, ProfileKind::Nfw, mass, k, a, odelta)?;
        let dn_dlog10m = cosmo.mass_function(mass, a, odelta)?;
        let bias = cosmo.halo_bias(mass, a, odelta)?;
        Ok(bias * dn_dlog10m * window)
    };
    mass_integral(HaloTerm::TwoHalo, integrand, k, a, options)
}

fn mass_integral<F>(
    term: HaloTerm, integrand: F, k: f64, a: f64, options: &HaloModelOptions,
) -> HaloResult<f64>
where
    F: FnMut(f64) -> HaloResult<f64>,
{
    let (lower, upper) = options.mass_range.log10_bounds();
    debug!(%term, k, a, lower, upper, "mass integral");

    match integrate(integrand, lower, upper, &options.tolerances, options.rule) {
        Ok(outcome) => {
            debug!(
                %term,
                k,
                a,
                value = outcome.value,
                abserr = outcome.abserr,
                intervals = outcome.intervals,
                evaluations = outcome.evaluations,
                "mass integral converged"
            );
            Ok(outcome.value)
        }
        Err(QuadFailure::Quadrature(reason)) => {
            warn!(%term, k, a, %reason, "mass integral failed");
            Err(HaloModelError::IntegrationFailure { term, reason })
        }
        Err(QuadFailure::Integrand(err)) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::{CosmoParams, FiducialCosmology};
    use crate::halomod::options::MassRange;
    use crate::numerics::{QuadError, QuadRule, QuadTolerances, integrate};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Positivity of the one-halo integral.
    // - The one-halo integrand dn/dlog10M · W² against direct quadrature.
    // - The k = 0 two-halo integral as a resolved bias-weighted fraction.
    // - Failure tagging when the subdivision budget is exhausted.
    // -------------------------------------------------------------------------

    fn fiducial() -> FiducialCosmology {
        FiducialCosmology::new(CosmoParams::fiducial()).expect("fiducial cosmology should build")
    }

    #[test]
    // Purpose
    // -------
    // Verify the one-halo integral is non-negative and decreases with k.
    //
    // Given
    // -----
    // - Fiducial cosmology at a = 1, k ∈ {0.1, 1, 10}.
    //
    // Expect
    // ------
    // - 0 ≤ I₁(10) < I₁(1) < I₁(0.1).
    fn one_halo_integral_is_positive_and_decreasing() {
        let cosmo = fiducial();
        let opts = HaloModelOptions::default();

        let values: Vec<f64> = [0.1, 1.0, 10.0]
            .iter()
            .map(|&k| one_halo_integral(&cosmo, k, 1.0, &opts).unwrap())
            .collect();

        assert!(values[2] >= 0.0);
        assert!(values[2] < values[1] && values[1] < values[0], "{values:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the one-halo integral weights the mass function by the squared
    // window.
    //
    // Given
    // -----
    // - Mass range [1e12, 1e13] at a = 1 and k ∈ {0.5, 5}.
    // - A reference quadrature of mass_function(M) · window(M)² over log10 M
    //   built from the public collaborators.
    //
    // Expect
    // ------
    // - Agreement to 1e-4 relative.
    fn one_halo_integral_matches_direct_quadrature() {
        let cosmo = fiducial();
        let opts =
            HaloModelOptions::from_raw(1e12, 1e13, 0.0, 1e-7, 1000, QuadRule::GaussKronrod21)
                .unwrap();
        let odelta = cosmo.virial_overdensity(1.0).unwrap();

        for k in [0.5, 5.0] {
            let reference = integrate(
                |log10_mass: f64| -> HaloResult<f64> {
                    let mass = 10f64.powf(log10_mass);
                    let window = window_function(&cosmo, ProfileKind::Nfw, mass, k, 1.0, odelta)?;
                    Ok(cosmo.mass_function(mass, 1.0, odelta)? * window.powi(2))
                },
                12.0,
                13.0,
                &QuadTolerances::new(0.0, 1e-9, 1000).unwrap(),
                QuadRule::GaussKronrod15,
            )
            .unwrap()
            .value;

            let value = one_halo_integral(&cosmo, k, 1.0, &opts).unwrap();

            assert!(reference > 0.0);
            assert_relative_eq!(value, reference, max_relative = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the k = 0 two-halo integral is a resolved fraction that grows as
    // the lower mass limit decreases.
    //
    // Given
    // -----
    // - Default range [1e7, 1e17] and a narrower range [1e10, 1e17].
    //
    // Expect
    // ------
    // - Both values in (0, 1]; the wider range resolves more.
    fn two_halo_zero_k_is_a_resolved_fraction() {
        let cosmo = fiducial();
        let wide = HaloModelOptions::default();
        let narrow = HaloModelOptions {
            mass_range: MassRange::new(1e10, 1e17).unwrap(),
            ..HaloModelOptions::default()
        };

        let i_wide = two_halo_integral(&cosmo, 0.0, 1.0, &wide).unwrap();
        let i_narrow = two_halo_integral(&cosmo, 0.0, 1.0, &narrow).unwrap();

        assert!(i_wide > 0.0 && i_wide <= 1.0, "I(0) = {i_wide}");
        assert!(i_narrow > 0.0 && i_narrow < i_wide);
    }

    #[test]
    // Purpose
    // -------
    // Verify quadrature failures are tagged with the failing term.
    //
    // Given
    // -----
    // - Options with a subdivision limit of 1 and an unreachable epsrel.
    //
    // Expect
    // ------
    // - `IntegrationFailure { term: OneHalo, reason: MaxSubdivisions }`.
    fn exhausted_budget_is_tagged_with_term() {
        let cosmo = fiducial();
        let opts = HaloModelOptions {
            tolerances: QuadTolerances::new(0.0, 1e-13, 1).unwrap(),
            rule: QuadRule::GaussKronrod15,
            ..HaloModelOptions::default()
        };

        match one_halo_integral(&cosmo, 1.0, 1.0, &opts) {
            Err(HaloModelError::IntegrationFailure { term, reason }) => {
                assert_eq!(term, HaloTerm::OneHalo);
                assert!(matches!(
                    reason,
                    QuadError::MaxSubdivisions { .. } | QuadError::RoundoffDetected { .. }
                ));
            }
            other => panic!("expected IntegrationFailure, got {other:?}"),
        }
    }
}
