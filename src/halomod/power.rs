//! Halo-model matter power spectrum: one-halo, two-halo, and their sum.
//!
//! Purpose
//! -------
//! Assemble the nonlinear matter power spectrum
//!
//!   P(k, a) = P_1h(k, a) + P_2h(k, a)
//!
//! from the mass integrals in [`integrals`](crate::halomod::integrals).
//!
//! Key behaviors
//! -------------
//! - `P_1h = I₁(k)`.
//! - `P_2h = P_lin(k, a) · (I₂(k) + A')²`, where the low-mass truncation
//!   correction is A' = (1 − I₂(0)) · W(M_min, k) / W(M_min, 0). It assigns
//!   the bias-weighted mass missing below M_min to haloes of mass M_min.
//! - The assembler evaluates the two-halo term first, then the one-halo term,
//!   and returns the first error encountered.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs: k finite and ≥ 0 (Mpc⁻¹), 0 < a ≤ 1.
//! - Repeated calls with the same inputs return bit-identical results.
//! - `halomodel_matter_power == onehalo_matter_power + twohalo_matter_power`
//!   exactly.
//!
//! Downstream usage
//! ----------------
//! - The plain entry points use [`HaloModelOptions::default`]; the `_with`
//!   variants accept explicit options.
//! - [`two_halo_terms`] exposes the pieces of the two-halo term for
//!   diagnostics.
use tracing::debug;

use crate::{
    cosmology::HaloCosmology,
    halomod::{
        errors::{HaloModelError, HaloResult},
        integrals::{one_halo_integral, two_halo_integral},
        options::HaloModelOptions,
        profile::{ProfileKind, window_function},
    },
};

/// TwoHaloTerms — the pieces of the two-halo power.
///
/// Fields
/// ------
/// - `integral`: I₂(k) over the configured mass range.
/// - `truncation_correction`: A' = (1 − I₂(0)) W(M_min, k) / W(M_min, 0).
/// - `linear_power`: P_lin(k, a).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoHaloTerms {
    pub integral: f64,
    pub truncation_correction: f64,
    pub linear_power: f64,
}

impl TwoHaloTerms {
    /// Corrected effective bias I₂(k) + A'.
    pub fn effective_bias(&self) -> f64 {
        self.integral + self.truncation_correction
    }

    /// P_2h = P_lin · (I₂ + A')².
    pub fn power(&self) -> f64 {
        let bias = self.effective_bias();
        self.linear_power * bias * bias
    }
}

/// One-halo power P_1h(k, a) with default options.
pub fn onehalo_matter_power<C>(cosmo: &C, k: f64, a: f64) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    onehalo_matter_power_with(cosmo, k, a, &HaloModelOptions::default())
}

/// One-halo power P_1h(k, a).
///
/// Errors
/// ------
/// - `InvalidWavenumber` / `InvalidScaleFactor` for out-of-domain inputs.
/// - `IntegrationFailure { term: OneHalo, .. }` if the mass integral fails.
/// - `Collaborator` / profile errors from the integrand.
pub fn onehalo_matter_power_with<C>(
    cosmo: &C, k: f64, a: f64, options: &HaloModelOptions,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    validate_inputs(k, a)?;
    one_halo_integral(cosmo, k, a, options)
}

/// Two-halo power P_2h(k, a) with default options.
pub fn twohalo_matter_power<C>(cosmo: &C, k: f64, a: f64) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    twohalo_matter_power_with(cosmo, k, a, &HaloModelOptions::default())
}

/// Two-halo power P_2h(k, a).
///
/// Errors
/// ------
/// - As [`two_halo_terms`].
pub fn twohalo_matter_power_with<C>(
    cosmo: &C, k: f64, a: f64, options: &HaloModelOptions,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    Ok(two_halo_terms(cosmo, k, a, options)?.power())
}

/// Evaluate the pieces of the two-halo term.
///
/// Errors
/// ------
/// - `InvalidWavenumber` / `InvalidScaleFactor` for out-of-domain inputs.
/// - `IntegrationFailure { term: TwoHalo, .. }` if either mass integral
///   fails.
/// - `Collaborator` / profile errors from the integrand, the M_min window,
///   or P_lin.
pub fn two_halo_terms<C>(
    cosmo: &C, k: f64, a: f64, options: &HaloModelOptions,
) -> HaloResult<TwoHaloTerms>
where
    C: HaloCosmology + ?Sized,
{
    validate_inputs(k, a)?;

    let integral = two_halo_integral(cosmo, k, a, options)?;
    let integral_at_zero =
        if k == 0.0 { integral } else { two_halo_integral(cosmo, 0.0, a, options)? };

    let odelta = cosmo.virial_overdensity(a)?;
    let m_min = options.mass_range.min();
    let window_k = window_function(cosmo, ProfileKind::Nfw, m_min, k, a, odelta)?;
    let window_0 = window_function(cosmo, ProfileKind::Nfw, m_min, 0.0, a, odelta)?;
    let truncation_correction = (1.0 - integral_at_zero) * window_k / window_0;

    let linear_power = cosmo.linear_power(k, a)?;

    debug!(k, a, integral, integral_at_zero, truncation_correction, "two-halo terms");
    Ok(TwoHaloTerms { integral, truncation_correction, linear_power })
}

/// Halo-model power P(k, a) = P_1h + P_2h with default options.
pub fn halomodel_matter_power<C>(cosmo: &C, k: f64, a: f64) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    halomodel_matter_power_with(cosmo, k, a, &HaloModelOptions::default())
}

/// Halo-model power P(k, a) = P_1h + P_2h.
///
/// The two-halo term is evaluated first; the first failing term's error is
/// returned.
pub fn halomodel_matter_power_with<C>(
    cosmo: &C, k: f64, a: f64, options: &HaloModelOptions,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    let two_halo = twohalo_matter_power_with(cosmo, k, a, options)?;
    let one_halo = onehalo_matter_power_with(cosmo, k, a, options)?;
    Ok(two_halo + one_halo)
}

fn validate_inputs(k: f64, a: f64) -> HaloResult<()> {
    if !k.is_finite() || k < 0.0 {
        return Err(HaloModelError::InvalidWavenumber { k });
    }
    if !a.is_finite() || a <= 0.0 || a > 1.0 {
        return Err(HaloModelError::InvalidScaleFactor { a });
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
    // - Consistency of `TwoHaloTerms::power` with the public entry point.
    // - The large-scale limit, where the corrected effective bias tends to 1.
    // - The truncation correction rescaled by the M_min window ratio.
    // - Input validation for k and a.
    // -------------------------------------------------------------------------

    fn fiducial() -> FiducialCosmology {
        FiducialCosmology::new(CosmoParams::fiducial()).expect("fiducial cosmology should build")
    }

    #[test]
    // Purpose
    // -------
    // Verify the two-halo entry point equals the assembled terms and that
    // the correction restores unit effective bias on large scales.
    //
    // Given
    // -----
    // - k = 1e-3 Mpc⁻¹ at a = 1.
    //
    // Expect
    // ------
    // - `twohalo_matter_power == terms.power()` exactly.
    // - Effective bias I₂ + A' ≈ 1 (W(M_min, k) / W(M_min, 0) ≈ 1).
    fn large_scale_two_halo_tracks_linear_power() {
        let cosmo = fiducial();
        let opts = HaloModelOptions::default();

        let terms = two_halo_terms(&cosmo, 1e-3, 1.0, &opts).unwrap();
        let p2 = twohalo_matter_power(&cosmo, 1e-3, 1.0).unwrap();

        assert_eq!(p2, terms.power());
        assert!(terms.truncation_correction > 0.0);
        assert_relative_eq!(terms.effective_bias(), 1.0, max_relative = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Verify the truncation correction carries the M_min window ratio on
    // small scales.
    //
    // Given
    // -----
    // - k = 1000 Mpc⁻¹ at a = 1, where k r_Δ(M_min) is of order a few.
    //
    // Expect
    // ------
    // - W(M_min, k) / W(M_min, 0) lies well inside (0, 1).
    // - A' = (1 − I₂(0)) · W(M_min, k) / W(M_min, 0).
    fn truncation_correction_scales_with_min_mass_window() {
        let cosmo = fiducial();
        let opts = HaloModelOptions::default();
        let k = 1.0e3;
        let m_min = opts.mass_range.min();
        let odelta = cosmo.virial_overdensity(1.0).unwrap();

        let terms = two_halo_terms(&cosmo, k, 1.0, &opts).unwrap();
        let integral_at_zero = two_halo_integral(&cosmo, 0.0, 1.0, &opts).unwrap();
        let window_k = window_function(&cosmo, ProfileKind::Nfw, m_min, k, 1.0, odelta).unwrap();
        let window_0 = window_function(&cosmo, ProfileKind::Nfw, m_min, 0.0, 1.0, odelta).unwrap();
        let ratio = window_k / window_0;

        assert!(ratio > 0.0 && ratio < 0.9, "window ratio = {ratio}");
        assert_relative_eq!(
            terms.truncation_correction,
            (1.0 - integral_at_zero) * ratio,
            max_relative = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify input validation of the public entry points.
    //
    // Given
    // -----
    // - k < 0, k = NaN, a = 0, a > 1.
    //
    // Expect
    // ------
    // - `InvalidWavenumber` / `InvalidScaleFactor` before any integration.
    fn invalid_inputs_are_rejected() {
        let cosmo = fiducial();

        assert!(matches!(
            onehalo_matter_power(&cosmo, -0.1, 1.0),
            Err(HaloModelError::InvalidWavenumber { .. })
        ));
        assert!(matches!(
            twohalo_matter_power(&cosmo, f64::NAN, 1.0),
            Err(HaloModelError::InvalidWavenumber { .. })
        ));
        assert!(matches!(
            halomodel_matter_power(&cosmo, 0.1, 0.0),
            Err(HaloModelError::InvalidScaleFactor { .. })
        ));
        assert!(matches!(
            halomodel_matter_power(&cosmo, 0.1, 1.5),
            Err(HaloModelError::InvalidScaleFactor { .. })
        ));
    }
}
