//! Fourier-space halo density profiles and the halo window function.
//!
//! Purpose
//! -------
//! Evaluate the normalised Fourier transform U(k | M) of a halo density
//! profile and the window W(k | M) = M · U / ρ̄_m used by the mass integrals.
//!
//! Key behaviors
//! -------------
//! - [`nfw_ft`]: analytic NFW transform in terms of the concentration c and
//!   x = k r_s, written with sine and cosine integrals.
//! - [`profile_ft`]: resolves r_s = r_Δ(M)/c at the cosmology's virial
//!   overdensity and evaluates the transform; k = 0 returns exactly 1.
//! - [`window_function`]: W = M U / ρ̄_m with c from the Duffy et al. virial
//!   relation at the supplied overdensity.
//!
//! Invariants & assumptions
//! ------------------------
//! - U(0) = 1 and |U| ≤ 1 for every k ≥ 0.
//! - `Ci(x(1+c)) − Ci(x)` is evaluated through [`ci_difference`], which
//!   cancels the logarithmic singularity analytically at small x.
use std::str::FromStr;

use crate::{
    cosmology::HaloCosmology,
    halomod::{
        concentration::{ConcentrationModel, concentration},
        errors::{HaloModelError, HaloResult},
    },
    numerics::{ci_difference, si_difference},
};

/// ProfileKind — closed set of halo density profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileKind {
    /// Navarro–Frenk–White.
    #[default]
    Nfw,
}

impl ProfileKind {
    /// Canonical label, as accepted by [`FromStr`].
    pub fn label(&self) -> &'static str {
        match self {
            ProfileKind::Nfw => "nfw",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProfileKind {
    type Err = HaloModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nfw" => Ok(ProfileKind::Nfw),
            _ => Err(HaloModelError::UnknownSelector { kind: "profile", label: s.to_string() }),
        }
    }
}

/// Analytic Fourier transform of the truncated NFW profile, normalised to
/// unit mass.
///
/// With x = k r_s:
///
/// U = [sin x (Si(x(1+c)) − Si(x)) + cos x (Ci(x(1+c)) − Ci(x))
///      − sin(cx) / (x(1+c))] / [ln(1+c) − c/(1+c)]
///
/// `x == 0` returns 1. Inputs are not validated.
pub fn nfw_ft(c: f64, x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let outer = x * (1.0 + c);
    let sine_part = x.sin() * si_difference(x, outer);
    let cosine_part = x.cos() * ci_difference(x, outer);
    let edge = (c * x).sin() / outer;
    let mass_norm = c.ln_1p() - c / (1.0 + c);
    (sine_part + cosine_part - edge) / mass_norm
}

/// Normalised Fourier-space profile U(k | M) at the virial overdensity.
///
/// Parameters
/// ----------
/// - `cosmo`: cosmological collaborators (Δ_v and r_Δ).
/// - `kind`: profile shape.
/// - `c`: concentration r_Δ / r_s.
/// - `mass`: halo mass in M_sun.
/// - `k`: comoving wavenumber in Mpc⁻¹.
/// - `a`: scale factor.
///
/// Errors
/// ------
/// - `InvalidWavenumber` for negative or non-finite k.
/// - `InvalidConcentration` / `InvalidMass` for non-positive inputs.
/// - `NonFiniteProfile` if the transform evaluates to NaN/±inf.
/// - `Collaborator` if Δ_v or r_Δ fail.
pub fn profile_ft<C>(
    cosmo: &C, kind: ProfileKind, c: f64, mass: f64, k: f64, a: f64,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    validate_wavenumber(k)?;
    if k == 0.0 {
        return Ok(1.0);
    }
    let odelta = cosmo.virial_overdensity(a)?;
    transform_at(cosmo, kind, c, mass, k, a, odelta)
}

/// Halo window W(k | M) = M U(k | M) / ρ̄_m, in Mpc³.
///
/// The concentration always comes from
/// [`ConcentrationModel::Duffy2008Virial`] at `odelta`, so `odelta` must be
/// the cosmology's virial overdensity at `a`.
///
/// Errors
/// ------
/// - Everything [`concentration`] and [`profile_ft`] can return.
pub fn window_function<C>(
    cosmo: &C, kind: ProfileKind, mass: f64, k: f64, a: f64, odelta: f64,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    validate_wavenumber(k)?;
    let c = concentration(cosmo, mass, a, odelta, ConcentrationModel::Duffy2008Virial)?;
    let u = if k == 0.0 { 1.0 } else { transform_at(cosmo, kind, c, mass, k, a, odelta)? };
    let rho_m = cosmo.rho_matter(a)?;
    Ok(mass * u / rho_m)
}

fn transform_at<C>(
    cosmo: &C, kind: ProfileKind, c: f64, mass: f64, k: f64, a: f64, odelta: f64,
) -> HaloResult<f64>
where
    C: HaloCosmology + ?Sized,
{
    if !c.is_finite() || c <= 0.0 {
        return Err(HaloModelError::InvalidConcentration { c });
    }
    if !mass.is_finite() || mass <= 0.0 {
        return Err(HaloModelError::InvalidMass { mass });
    }
    if !odelta.is_finite() || odelta <= 0.0 {
        return Err(HaloModelError::InvalidOverdensity { odelta });
    }
    let value = match kind {
        ProfileKind::Nfw => {
            let r_s = cosmo.r_delta(mass, a, odelta)? / c;
            nfw_ft(c, k * r_s)
        }
    };
    if !value.is_finite() {
        return Err(HaloModelError::NonFiniteProfile { mass, k, value });
    }
    Ok(value)
}

fn validate_wavenumber(k: f64) -> HaloResult<()> {
    if !k.is_finite() || k < 0.0 {
        return Err(HaloModelError::InvalidWavenumber { k });
    }
    Ok(())
}
