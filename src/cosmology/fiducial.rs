//! Reference flat ΛCDM collaborators for the halo model.
//!
//! Purpose
//! -------
//! Provide a self-contained implementation of [`HaloCosmology`] so the
//! halo-model core can be exercised end to end: background growth, a
//! σ8-normalised linear power spectrum, a tabulated σ(M), the Bryan–Norman
//! virial overdensity, and the Sheth–Tormen mass function and bias.
//!
//! Key behaviors
//! -------------
//! - Growth: D(a) = (5Ω_m/2) E(a) ∫₀ᵃ da' / (a' E(a'))³, normalised to
//!   D(1) = 1, integrated with the crate quadrature.
//! - Linear power: P(k, a) = A kⁿˢ T²(k) D²(a) with the BBKS transfer
//!   function and Sugiyama shape parameter; A fixes σ(8 Mpc/h) = σ8.
//! - σ(M, a) = σ(M, 1) D(a), with ln σ(M, 1) tabulated on a uniform log10 M
//!   grid at construction and interpolated linearly. The logarithmic slope
//!   dlnσ/dlog10M is stored per node (central differences) and interpolated
//!   the same way.
//! - Mass function: dn/dlog10M = (ρ̄_m / M) · νf(ν) · (−dlnσ/dlog10M) with
//!   the Sheth–Tormen multiplicity, whose amplitude is fixed analytically
//!   through Γ(1/2 − p) so that ∫ f(ν) dν = 1.
//! - Bias: Sheth–Tormen peak-background-split bias, which satisfies
//!   ∫ b(ν) f(ν) dν = 1.
//!
//! Invariants & assumptions
//! ------------------------
//! - All quantities are comoving; ρ̄_m does not depend on `a`.
//! - σ(M) is only available for M ∈ [10^LOG10_MASS_MIN, 10^LOG10_MASS_MAX];
//!   outside that range the mass-dependent collaborators return
//!   `CosmoError::MassOutOfRange`.
//! - The Sheth–Tormen fit is expressed through ν = δc/σ and does not depend
//!   on the halo overdensity; `odelta` is validated but otherwise unused.
//!
//! Conventions
//! -----------
//! - `mass_function` returns a density per log10-mass interval. The ln 10
//!   from d/dlog10M cancels against the same factor in dlnσ/dlnM, so no
//!   explicit Jacobian appears.
//!
//! Testing notes
//! -------------
//! - Unit tests check D(1) = 1 and D(a) = a in Einstein–de Sitter, the
//!   Bryan–Norman limit 18π², recovery of σ8, monotonicity of σ(M), the
//!   Sheth–Tormen normalisation integrals, and domain errors.
use std::convert::Infallible;

use ndarray::Array1;
use statrs::function::gamma::gamma;
use tracing::debug;

use crate::{
    cosmology::{
        errors::{CosmoError, CosmoResult},
        params::CosmoParams,
        traits::HaloCosmology,
    },
    numerics::{QuadFailure, QuadRule, QuadTolerances, integrate},
};

/// Critical density today in M_sun / Mpc³, per h².
pub const RHO_CRIT_H2: f64 = 2.775_366_27e11;

/// Spherical-collapse threshold used in ν = δc / σ.
pub const DELTA_C: f64 = 1.686;

/// Lower edge of the σ(M) table, log10(M / M_sun).
pub const LOG10_MASS_MIN: f64 = 5.0;

/// Upper edge of the σ(M) table, log10(M / M_sun).
pub const LOG10_MASS_MAX: f64 = 19.0;

/// Spacing of the σ(M) table in log10 M.
pub const LOG10_MASS_STEP: f64 = 0.05;

const ST_A: f64 = 0.707;
const ST_P: f64 = 0.3;

const K_MIN: f64 = 1.0e-5;
const KR_MAX: f64 = 200.0;
const SIGMA_EPSREL: f64 = 1.0e-8;
const GROWTH_EPSREL: f64 = 1.0e-10;
const INTERNAL_LIMIT: usize = 1000;

/// SigmaTable — ln σ(M, a = 1) and its slope on a uniform log10 M grid.
#[derive(Debug, Clone)]
pub struct SigmaTable {
    log10_mass: Array1<f64>,
    ln_sigma: Array1<f64>,
    dln_sigma: Array1<f64>,
}

impl SigmaTable {
    fn build<F>(mut ln_sigma_at: F) -> CosmoResult<Self>
    where
        F: FnMut(f64) -> CosmoResult<f64>,
    {
        let nodes = ((LOG10_MASS_MAX - LOG10_MASS_MIN) / LOG10_MASS_STEP).round() as usize + 1;
        let log10_mass =
            Array1::from_iter((0..nodes).map(|i| LOG10_MASS_MIN + i as f64 * LOG10_MASS_STEP));

        let mut ln_sigma = Array1::<f64>::zeros(nodes);
        for (slot, &log10m) in ln_sigma.iter_mut().zip(log10_mass.iter()) {
            *slot = ln_sigma_at(log10m)?;
        }

        let mut dln_sigma = Array1::<f64>::zeros(nodes);
        for i in 0..nodes {
            dln_sigma[i] = if i == 0 {
                (ln_sigma[1] - ln_sigma[0]) / LOG10_MASS_STEP
            } else if i == nodes - 1 {
                (ln_sigma[i] - ln_sigma[i - 1]) / LOG10_MASS_STEP
            } else {
                (ln_sigma[i + 1] - ln_sigma[i - 1]) / (2.0 * LOG10_MASS_STEP)
            };
        }

        Ok(SigmaTable { log10_mass, ln_sigma, dln_sigma })
    }

    /// Number of tabulated nodes.
    pub fn len(&self) -> usize {
        self.log10_mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log10_mass.is_empty()
    }

    fn locate(&self, mass: f64) -> CosmoResult<(usize, f64)> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(CosmoError::InvalidMass { mass });
        }
        let log10m = mass.log10();
        if !(LOG10_MASS_MIN..=LOG10_MASS_MAX).contains(&log10m) {
            return Err(CosmoError::MassOutOfRange {
                mass,
                min: 10f64.powf(LOG10_MASS_MIN),
                max: 10f64.powf(LOG10_MASS_MAX),
            });
        }
        let position = (log10m - LOG10_MASS_MIN) / LOG10_MASS_STEP;
        let idx = (position.floor() as usize).min(self.len() - 2);
        Ok((idx, position - idx as f64))
    }

    fn interpolate(values: &Array1<f64>, idx: usize, t: f64) -> f64 {
        values[idx] + t * (values[idx + 1] - values[idx])
    }

    /// ln σ(M, a = 1).
    pub fn ln_sigma(&self, mass: f64) -> CosmoResult<f64> {
        let (idx, t) = self.locate(mass)?;
        Ok(Self::interpolate(&self.ln_sigma, idx, t))
    }

    /// dlnσ / dlog10M (independent of a).
    pub fn dln_sigma_dlog10m(&self, mass: f64) -> CosmoResult<f64> {
        let (idx, t) = self.locate(mass)?;
        Ok(Self::interpolate(&self.dln_sigma, idx, t))
    }
}

/// FiducialCosmology — flat ΛCDM reference collaborators.
///
/// Purpose
/// -------
/// Implement [`HaloCosmology`] for a flat ΛCDM model described by
/// [`CosmoParams`], with all expensive quantities (growth normalisation,
/// power-spectrum amplitude, σ(M) table) computed once at construction.
///
/// Fields
/// ------
/// - `params`: validated cosmological parameters.
/// - `rho_m`: comoving mean matter density in M_sun / Mpc³.
/// - `shape`: BBKS shape parameter Γ.
/// - `amplitude`: power-spectrum amplitude A fixing σ8.
/// - `growth_norm`: unnormalised growth at a = 1.
/// - `st_norm`: Sheth–Tormen amplitude.
/// - `table`: tabulated ln σ(M, 1) and slope.
///
/// Performance
/// -----------
/// - Construction performs one quadrature per table node (a few hundred).
/// - Mass-dependent lookups are O(1); `growth_factor` performs one short
///   quadrature per call.
#[derive(Debug, Clone)]
pub struct FiducialCosmology {
    params: CosmoParams,
    rho_m: f64,
    shape: f64,
    amplitude: f64,
    growth_norm: f64,
    st_norm: f64,
    table: SigmaTable,
}

impl FiducialCosmology {
    /// Build the reference cosmology.
    ///
    /// Errors
    /// ------
    /// - `CosmoError::QuadratureFailed` if the growth or σ(R) integrals do
    ///   not converge.
    /// - `CosmoError::NonFinite` if the σ8 normalisation degenerates.
    pub fn new(params: CosmoParams) -> CosmoResult<Self> {
        let omega_m = params.omega_m();
        let h = params.h;
        let rho_m = omega_m * RHO_CRIT_H2 * h * h;
        let shape = omega_m * h * (-params.omega_b * (1.0 + (2.0 * h).sqrt() / omega_m)).exp();

        let growth_norm = unnormalised_growth(&params, 1.0)?;

        let sigma8_unnorm = sigma2_unnormalised(8.0 / h, params.n_s, shape, h)?;
        let amplitude = params.sigma8 * params.sigma8 / sigma8_unnorm;
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return Err(CosmoError::NonFinite { quantity: "power amplitude", value: amplitude });
        }

        let table = SigmaTable::build(|log10m| {
            let radius = lagrangian_radius(10f64.powf(log10m), rho_m);
            let sigma2 = amplitude * sigma2_unnormalised(radius, params.n_s, shape, h)?;
            Ok(0.5 * sigma2.ln())
        })?;

        let st_norm =
            1.0 / (1.0 + 2f64.powf(-ST_P) * gamma(0.5 - ST_P) / std::f64::consts::PI.sqrt());

        debug!(omega_m, h, sigma8 = params.sigma8, nodes = table.len(), "built fiducial cosmology");

        Ok(FiducialCosmology { params, rho_m, shape, amplitude, growth_norm, st_norm, table })
    }

    /// Parameters this cosmology was built from.
    pub fn params(&self) -> &CosmoParams {
        &self.params
    }

    /// Tabulated σ(M, 1).
    pub fn sigma_table(&self) -> &SigmaTable {
        &self.table
    }

    /// Peak height ν = δc / σ(M, a).
    pub fn peak_height(&self, mass: f64, a: f64) -> CosmoResult<f64> {
        Ok(DELTA_C / self.sigma_m(mass, a)?)
    }

    /// Sheth–Tormen multiplicity ν f(ν), normalised so ∫ f(ν) dν = 1.
    pub fn sheth_tormen_multiplicity(&self, nu: f64) -> f64 {
        let anu2 = ST_A * nu * nu;
        self.st_norm
            * (2.0 * ST_A / std::f64::consts::PI).sqrt()
            * nu
            * (1.0 + anu2.powf(-ST_P))
            * (-0.5 * anu2).exp()
    }

    /// Sheth–Tormen bias b(ν).
    pub fn sheth_tormen_bias(&self, nu: f64) -> f64 {
        let anu2 = ST_A * nu * nu;
        1.0 + (anu2 - 1.0) / DELTA_C + 2.0 * ST_P / (DELTA_C * (1.0 + anu2.powf(ST_P)))
    }

    fn hubble_ratio(&self, a: f64) -> f64 {
        (self.params.omega_m() / (a * a * a) + self.params.omega_l()).sqrt()
    }
}

impl HaloCosmology for FiducialCosmology {
    fn h(&self) -> f64 {
        self.params.h
    }

    fn growth_factor(&self, a: f64) -> CosmoResult<f64> {
        validate_scale_factor(a)?;
        Ok(unnormalised_growth(&self.params, a)? / self.growth_norm)
    }

    fn sigma_m(&self, mass: f64, a: f64) -> CosmoResult<f64> {
        let ln_sigma = self.table.ln_sigma(mass)?;
        Ok(ln_sigma.exp() * self.growth_factor(a)?)
    }

    fn virial_overdensity(&self, a: f64) -> CosmoResult<f64> {
        validate_scale_factor(a)?;
        let e = self.hubble_ratio(a);
        let omega_m_a = self.params.omega_m() / (a * a * a * e * e);
        let x = omega_m_a - 1.0;
        let delta_crit = 18.0 * std::f64::consts::PI.powi(2) + 82.0 * x - 39.0 * x * x;
        Ok(delta_crit / omega_m_a)
    }

    fn r_delta(&self, mass: f64, a: f64, odelta: f64) -> CosmoResult<f64> {
        validate_mass(mass)?;
        validate_scale_factor(a)?;
        validate_overdensity(odelta)?;
        Ok((3.0 * mass / (4.0 * std::f64::consts::PI * self.rho_m * odelta)).cbrt())
    }

    fn rho_matter(&self, a: f64) -> CosmoResult<f64> {
        validate_scale_factor(a)?;
        Ok(self.rho_m)
    }

    fn mass_function(&self, mass: f64, a: f64, odelta: f64) -> CosmoResult<f64> {
        validate_overdensity(odelta)?;
        let nu = self.peak_height(mass, a)?;
        let slope = self.table.dln_sigma_dlog10m(mass)?;
        Ok(self.rho_m / mass * self.sheth_tormen_multiplicity(nu) * (-slope))
    }

    fn halo_bias(&self, mass: f64, a: f64, odelta: f64) -> CosmoResult<f64> {
        validate_overdensity(odelta)?;
        let nu = self.peak_height(mass, a)?;
        Ok(self.sheth_tormen_bias(nu))
    }

    fn linear_power(&self, k: f64, a: f64) -> CosmoResult<f64> {
        if !k.is_finite() || k < 0.0 {
            return Err(CosmoError::InvalidWavenumber { k });
        }
        let growth = self.growth_factor(a)?;
        let t = transfer_bbks(k, self.shape, self.params.h);
        Ok(self.amplitude * k.powf(self.params.n_s) * t * t * growth * growth)
    }
}

fn validate_scale_factor(a: f64) -> CosmoResult<()> {
    if !a.is_finite() || a <= 0.0 {
        return Err(CosmoError::InvalidScaleFactor { a });
    }
    Ok(())
}

fn validate_mass(mass: f64) -> CosmoResult<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(CosmoError::InvalidMass { mass });
    }
    Ok(())
}

fn validate_overdensity(odelta: f64) -> CosmoResult<()> {
    if !odelta.is_finite() || odelta <= 0.0 {
        return Err(CosmoError::InvalidOverdensity { odelta });
    }
    Ok(())
}

/// Comoving top-hat radius enclosing `mass` at the mean matter density.
fn lagrangian_radius(mass: f64, rho_m: f64) -> f64 {
    (3.0 * mass / (4.0 * std::f64::consts::PI * rho_m)).cbrt()
}

/// BBKS transfer function; `k` in Mpc⁻¹.
fn transfer_bbks(k: f64, shape: f64, h: f64) -> f64 {
    let q = k / (h * shape);
    if q < 1.0e-9 {
        return 1.0;
    }
    let poly = 1.0 + 3.89 * q + (16.1 * q).powi(2) + (5.46 * q).powi(3) + (6.71 * q).powi(4);
    (1.0 + 2.34 * q).ln() / (2.34 * q) * poly.powf(-0.25)
}

/// Fourier transform of the top-hat window.
fn tophat_window(x: f64) -> f64 {
    if x < 1.0e-3 {
        let x2 = x * x;
        1.0 - x2 / 10.0 + x2 * x2 / 280.0
    } else {
        3.0 * (x.sin() - x * x.cos()) / (x * x * x)
    }
}

/// σ²(R) for the unit-amplitude spectrum kⁿˢ T²(k).
fn sigma2_unnormalised(radius: f64, n_s: f64, shape: f64, h: f64) -> CosmoResult<f64> {
    let integrand = |ln_k: f64| {
        let k = ln_k.exp();
        let t = transfer_bbks(k, shape, h);
        let w = tophat_window(k * radius);
        k.powi(3) * k.powf(n_s) * t * t * w * w / (2.0 * std::f64::consts::PI.powi(2))
    };
    integrate_smooth("sigma(R)", integrand, K_MIN.ln(), (KR_MAX / radius).ln(), SIGMA_EPSREL)
}

/// (5Ω_m/2) E(a) ∫₀ᵃ a'^{3/2} / (Ω_m + Ω_Λ a'³)^{3/2} da'.
fn unnormalised_growth(params: &CosmoParams, a: f64) -> CosmoResult<f64> {
    let omega_m = params.omega_m();
    let omega_l = params.omega_l();
    let integral = integrate_smooth(
        "growth factor",
        |x: f64| x.powf(1.5) / (omega_m + omega_l * x * x * x).powf(1.5),
        0.0,
        a,
        GROWTH_EPSREL,
    )?;
    let e = (omega_m / (a * a * a) + omega_l).sqrt();
    Ok(2.5 * omega_m * e * integral)
}

fn integrate_smooth<F>(
    quantity: &'static str, mut f: F, lower: f64, upper: f64, epsrel: f64,
) -> CosmoResult<f64>
where
    F: FnMut(f64) -> f64,
{
    let tolerances = QuadTolerances::new(0.0, epsrel, INTERNAL_LIMIT)
        .map_err(|reason| CosmoError::QuadratureFailed { quantity, reason })?;
    integrate(|x| Ok::<f64, Infallible>(f(x)), lower, upper, &tolerances, QuadRule::GaussKronrod21)
        .map(|outcome| outcome.value)
        .map_err(|failure| match failure {
            QuadFailure::Quadrature(reason) => CosmoError::QuadratureFailed { quantity, reason },
            QuadFailure::Integrand(never) => match never {},
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Growth normalisation and the Einstein–de Sitter limit.
    // - Bryan–Norman overdensity limits.
    // - σ8 recovery and monotonicity of the σ(M) table.
    // - Sheth–Tormen normalisation of f(ν) and of b(ν) f(ν).
    // - Domain errors for mass, scale factor and wavenumber.
    // -------------------------------------------------------------------------

    fn fiducial() -> FiducialCosmology {
        FiducialCosmology::new(CosmoParams::fiducial()).expect("fiducial cosmology should build")
    }

    fn einstein_de_sitter() -> FiducialCosmology {
        let params = CosmoParams::new(1.0, 0.0, 0.7, 1.0, 0.8).expect("EdS params");
        FiducialCosmology::new(params).expect("EdS cosmology should build")
    }

    #[test]
    // Purpose
    // -------
    // Verify growth normalisation and the matter-dominated solution.
    //
    // Given
    // -----
    // - Fiducial ΛCDM and Einstein–de Sitter (Ω_m = 1).
    //
    // Expect
    // ------
    // - D(1) = 1 for both; D(a) = a in EdS; in ΛCDM, D(0.5) lies above 0.5
    //   (late-time growth suppression).
    fn growth_factor_normalisation_and_eds_limit() {
        let lcdm = fiducial();
        let eds = einstein_de_sitter();

        assert_relative_eq!(lcdm.growth_factor(1.0).unwrap(), 1.0, max_relative = 1e-14);
        assert_relative_eq!(eds.growth_factor(0.25).unwrap(), 0.25, max_relative = 1e-9);

        let d_half = lcdm.growth_factor(0.5).unwrap();
        assert!(d_half > 0.5 && d_half < 0.7, "D(0.5) = {d_half}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the Bryan–Norman fit in its known limits.
    //
    // Given
    // -----
    // - EdS at a = 1 and fiducial ΛCDM at a = 1.
    //
    // Expect
    // ------
    // - EdS gives 18π²; ΛCDM (Ω_m = 0.3) gives Δ_v ≈ 337 relative to matter.
    fn virial_overdensity_limits() {
        let eds = einstein_de_sitter();
        let lcdm = fiducial();

        assert_relative_eq!(
            eds.virial_overdensity(1.0).unwrap(),
            18.0 * std::f64::consts::PI.powi(2),
            max_relative = 1e-12
        );
        let dv = lcdm.virial_overdensity(1.0).unwrap();
        assert!((330.0..345.0).contains(&dv), "Delta_v(1) = {dv}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the σ8 normalisation is recovered through the σ(M) table.
    //
    // Given
    // -----
    // - The mass enclosed by an 8 Mpc/h top-hat at the mean density.
    //
    // Expect
    // ------
    // - The table covers log10 M ∈ [5, 19] in steps of 0.05 (281 nodes).
    // - σ(M8, a = 1) ≈ σ8 to 1e-4 relative (table interpolation error).
    fn sigma_table_recovers_sigma8() {
        let cosmo = fiducial();
        let table = cosmo.sigma_table();
        assert!(!table.is_empty());
        assert_eq!(table.len(), 281);

        let radius = 8.0 / cosmo.params().h;
        let rho_m = cosmo.rho_matter(1.0).unwrap();
        let m8 = 4.0 / 3.0 * std::f64::consts::PI * rho_m * radius.powi(3);

        let sigma = cosmo.sigma_m(m8, 1.0).unwrap();

        assert_relative_eq!(sigma, cosmo.params().sigma8, max_relative = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Verify σ(M) decreases with mass and grows with a.
    //
    // Given
    // -----
    // - Masses 1e8 … 1e16 at a = 1, and M = 1e12 at a ∈ {0.5, 1}.
    //
    // Expect
    // ------
    // - Strictly decreasing σ in mass, negative slope, σ(a=0.5) < σ(a=1).
    fn sigma_is_monotone_in_mass_and_time() {
        let cosmo = fiducial();
        let masses = [1e8, 1e10, 1e12, 1e14, 1e16];
        let sigmas: Vec<f64> = masses.iter().map(|&m| cosmo.sigma_m(m, 1.0).unwrap()).collect();

        for pair in sigmas.windows(2) {
            assert!(pair[1] < pair[0], "sigma must decrease with mass: {sigmas:?}");
        }
        for &m in &masses {
            assert!(cosmo.sigma_table().dln_sigma_dlog10m(m).unwrap() < 0.0);
        }
        assert!(cosmo.sigma_m(1e12, 0.5).unwrap() < cosmo.sigma_m(1e12, 1.0).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Verify the Sheth–Tormen multiplicity and bias are normalised.
    //
    // Given
    // -----
    // - ∫ νf(ν) dlnν and ∫ b(ν) νf(ν) dlnν over ln ν ∈ [−50, ln 20].
    //
    // Expect
    // ------
    // - Both integrals equal 1 to 1e-6.
    fn sheth_tormen_normalisation_integrals() {
        let cosmo = fiducial();
        let tol = QuadTolerances::new(0.0, 1e-10, 1000).unwrap();
        let lower = -50.0;
        let upper = 20f64.ln();

        let mass = integrate(
            |ln_nu: f64| Ok::<f64, Infallible>(cosmo.sheth_tormen_multiplicity(ln_nu.exp())),
            lower,
            upper,
            &tol,
            QuadRule::GaussKronrod21,
        )
        .unwrap();
        let bias = integrate(
            |ln_nu: f64| {
                let nu = ln_nu.exp();
                Ok::<f64, Infallible>(cosmo.sheth_tormen_bias(nu) * cosmo.sheth_tormen_multiplicity(nu))
            },
            lower,
            upper,
            &tol,
            QuadRule::GaussKronrod21,
        )
        .unwrap();

        assert_relative_eq!(mass.value, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bias.value, 1.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Verify domain errors from the mass-, time- and k-dependent methods.
    //
    // Given
    // -----
    // - Mass above the table, negative mass, a = 0, k < 0, Δ = 0.
    //
    // Expect
    // ------
    // - The matching `CosmoError` variant in each case.
    fn domain_errors_are_reported() {
        let cosmo = fiducial();

        assert!(matches!(cosmo.sigma_m(1e20, 1.0), Err(CosmoError::MassOutOfRange { .. })));
        assert!(matches!(cosmo.sigma_m(-1.0, 1.0), Err(CosmoError::InvalidMass { .. })));
        assert!(matches!(cosmo.growth_factor(0.0), Err(CosmoError::InvalidScaleFactor { .. })));
        assert!(matches!(cosmo.linear_power(-0.1, 1.0), Err(CosmoError::InvalidWavenumber { .. })));
        assert!(matches!(
            cosmo.mass_function(1e12, 1.0, 0.0),
            Err(CosmoError::InvalidOverdensity { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify basic properties of the linear power spectrum.
    //
    // Given
    // -----
    // - k = 0, k = 0.1 Mpc⁻¹ at a ∈ {0.5, 1}.
    //
    // Expect
    // ------
    // - P(0) = 0, P > 0 otherwise, and P(a) / P(1) = D(a)².
    fn linear_power_scales_with_growth_squared() {
        let cosmo = fiducial();

        assert_eq!(cosmo.linear_power(0.0, 1.0).unwrap(), 0.0);
        let p1 = cosmo.linear_power(0.1, 1.0).unwrap();
        let p_half = cosmo.linear_power(0.1, 0.5).unwrap();
        let d = cosmo.growth_factor(0.5).unwrap();

        assert!(p1 > 0.0);
        assert_relative_eq!(p_half / p1, d * d, max_relative = 1e-12);
    }
}
