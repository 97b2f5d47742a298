//! Flat ΛCDM parameter set for the reference cosmology.
//!
//! Purpose
//! -------
//! Provide a small, validated container of the cosmological parameters the
//! reference collaborators need: cold-dark-matter and baryon densities, the
//! Hubble parameter, the primordial spectral index, and the σ8
//! normalisation.
//!
//! Invariants & assumptions
//! ------------------------
//! - The universe is spatially flat: Ω_Λ = 1 − Ω_m, radiation neglected.
//! - `0 < Ω_m ≤ 1`, `Ω_c ≥ 0`, `Ω_b ≥ 0`, `h > 0`, `σ8 > 0`, `n_s` finite.
//!
//! Conventions
//! -----------
//! - Invalid configurations return `CosmoError::InvalidParameter` rather
//!   than panicking.
use crate::cosmology::errors::{CosmoError, CosmoResult};

/// CosmoParams — validated flat ΛCDM parameters.
///
/// Fields
/// ------
/// - `omega_c`: cold dark matter density parameter Ω_c.
/// - `omega_b`: baryon density parameter Ω_b.
/// - `h`: dimensionless Hubble parameter.
/// - `n_s`: primordial scalar spectral index.
/// - `sigma8`: RMS linear fluctuation in 8 Mpc/h spheres at a = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosmoParams {
    pub omega_c: f64,
    pub omega_b: f64,
    pub h: f64,
    pub n_s: f64,
    pub sigma8: f64,
}

impl CosmoParams {
    /// Construct validated parameters.
    ///
    /// Errors
    /// ------
    /// - `CosmoError::InvalidParameter` naming the first offending parameter.
    pub fn new(omega_c: f64, omega_b: f64, h: f64, n_s: f64, sigma8: f64) -> CosmoResult<Self> {
        if !omega_c.is_finite() || omega_c < 0.0 {
            return Err(CosmoError::InvalidParameter {
                name: "omega_c",
                value: omega_c,
                reason: "must be finite and >= 0",
            });
        }
        if !omega_b.is_finite() || omega_b < 0.0 {
            return Err(CosmoError::InvalidParameter {
                name: "omega_b",
                value: omega_b,
                reason: "must be finite and >= 0",
            });
        }
        let omega_m = omega_c + omega_b;
        if omega_m <= 0.0 || omega_m > 1.0 {
            return Err(CosmoError::InvalidParameter {
                name: "omega_m",
                value: omega_m,
                reason: "must satisfy 0 < omega_m <= 1 in a flat universe",
            });
        }
        if !h.is_finite() || h <= 0.0 {
            return Err(CosmoError::InvalidParameter {
                name: "h",
                value: h,
                reason: "must be finite and > 0",
            });
        }
        if !n_s.is_finite() {
            return Err(CosmoError::InvalidParameter {
                name: "n_s",
                value: n_s,
                reason: "must be finite",
            });
        }
        if !sigma8.is_finite() || sigma8 <= 0.0 {
            return Err(CosmoError::InvalidParameter {
                name: "sigma8",
                value: sigma8,
                reason: "must be finite and > 0",
            });
        }
        Ok(CosmoParams { omega_c, omega_b, h, n_s, sigma8 })
    }

    /// Fiducial parameters: Ω_m = 0.3 (Ω_c = 0.25, Ω_b = 0.05), h = 0.7,
    /// n_s = 0.96, σ8 = 0.8.
    pub fn fiducial() -> Self {
        CosmoParams { omega_c: 0.25, omega_b: 0.05, h: 0.7, n_s: 0.96, sigma8: 0.8 }
    }

    /// Total matter density parameter Ω_m = Ω_c + Ω_b.
    pub fn omega_m(&self) -> f64 {
        self.omega_c + self.omega_b
    }

    /// Dark-energy density parameter Ω_Λ = 1 − Ω_m.
    pub fn omega_l(&self) -> f64 {
        1.0 - self.omega_m()
    }
}
