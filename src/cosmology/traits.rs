//! The collaborator seam between the halo-model core and a cosmology.
//!
//! Purpose
//! -------
//! Define [`HaloCosmology`], the set of background, linear-theory and halo
//! statistics the halo model consumes. The core is generic over this trait
//! and never assumes a particular cosmology, mass function or bias model.
//!
//! Invariants & assumptions
//! ------------------------
//! - Units are comoving: lengths in Mpc, masses in M_sun, wavenumbers in
//!   Mpc⁻¹, densities in M_sun / Mpc³.
//! - `mass_function` is a number density per **log10** mass interval,
//!   dn/dlog10M. The core integrates in log10 M without a `ln 10` factor.
//! - Every method is a pure function of its arguments: calling it twice with
//!   the same inputs must return bit-identical values.
//! - Implementations are `Sync`, so one cosmology can serve concurrent
//!   power-spectrum evaluations.
use crate::cosmology::errors::CosmoResult;

/// Cosmological collaborators consumed by the halo model.
pub trait HaloCosmology: Sync {
    /// Dimensionless Hubble parameter h = H₀ / (100 km s⁻¹ Mpc⁻¹).
    fn h(&self) -> f64;

    /// Linear growth factor D(a), normalised to D(1) = 1.
    fn growth_factor(&self, a: f64) -> CosmoResult<f64>;

    /// RMS linear mass fluctuation σ(M, a) in spheres enclosing `mass`.
    fn sigma_m(&self, mass: f64, a: f64) -> CosmoResult<f64>;

    /// Virial overdensity Δ_v(a), relative to the mean matter density.
    fn virial_overdensity(&self, a: f64) -> CosmoResult<f64>;

    /// Comoving radius enclosing `mass` at mean overdensity `odelta`.
    fn r_delta(&self, mass: f64, a: f64, odelta: f64) -> CosmoResult<f64>;

    /// Comoving mean matter density ρ̄_m.
    fn rho_matter(&self, a: f64) -> CosmoResult<f64>;

    /// Halo mass function dn/dlog10M for haloes defined at `odelta`.
    fn mass_function(&self, mass: f64, a: f64, odelta: f64) -> CosmoResult<f64>;

    /// Linear halo bias b(M, a) for haloes defined at `odelta`.
    fn halo_bias(&self, mass: f64, a: f64, odelta: f64) -> CosmoResult<f64>;

    /// Linear matter power spectrum P_lin(k, a) in Mpc³.
    fn linear_power(&self, k: f64, a: f64) -> CosmoResult<f64>;
}
