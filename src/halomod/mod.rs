//! halomod — halo-model matter power spectrum.
//!
//! Purpose
//! -------
//! Compute the nonlinear matter power spectrum as the sum of a one-halo
//! term (pairs within a halo) and a two-halo term (pairs in distinct,
//! biased haloes), given cosmological collaborators implementing
//! [`HaloCosmology`](crate::cosmology::HaloCosmology).
//!
//! Key behaviors
//! -------------
//! - [`concentration`]: concentration–mass relations selected by
//!   [`ConcentrationModel`].
//! - [`profile`]: analytic NFW Fourier transform ([`profile_ft`]) and the
//!   halo window W = M U / ρ̄_m ([`window_function`]).
//! - [`integrals`]: adaptive one- and two-halo mass integrals in log10 M.
//! - [`power`]: the public entry points [`onehalo_matter_power`],
//!   [`twohalo_matter_power`] and [`halomodel_matter_power`], plus `_with`
//!   variants taking [`HaloModelOptions`].
//! - [`errors`]: [`HaloModelError`], [`HaloResult`] and [`HaloTerm`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every call is synchronous, pure and allocates its own quadrature
//!   workspace; nothing persists between calls.
//! - Δ_v(a) is evaluated once per integral and shared by the window, mass
//!   function and bias.
//! - The window always uses the Duffy et al. virial concentration.
//!
//! Conventions
//! -----------
//! - Units: k in Mpc⁻¹, masses in M_sun, powers in Mpc³.
//! - Mass functions are dn/dlog10M; the integrals carry no ln 10 factor.
//!
//! Downstream usage
//! ----------------
//!   ```rust,ignore
//!   use halo_model::cosmology::{CosmoParams, FiducialCosmology};
//!   use halo_model::halomod::halomodel_matter_power;
//!
//!   let cosmo = FiducialCosmology::new(CosmoParams::fiducial())?;
//!   let p = halomodel_matter_power(&cosmo, 0.1, 1.0)?;
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each component; end-to-end properties
//!   (additivity, determinism, monotonicity in k, failure propagation) are
//!   covered by `tests/integration_halo_model_pipeline.rs`.

pub mod concentration;
pub mod errors;
pub mod integrals;
pub mod options;
pub mod power;
pub mod profile;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::concentration::{ConcentrationModel, concentration};
pub use self::errors::{HaloModelError, HaloResult, HaloTerm};
pub use self::integrals::{one_halo_integral, two_halo_integral};
pub use self::options::{HM_EPSABS, HM_EPSREL, HM_LIMIT, HM_MMAX, HM_MMIN, HaloModelOptions, MassRange};
pub use self::power::{
    TwoHaloTerms, halomodel_matter_power, halomodel_matter_power_with, onehalo_matter_power,
    onehalo_matter_power_with, two_halo_terms, twohalo_matter_power, twohalo_matter_power_with,
};
pub use self::profile::{ProfileKind, nfw_ft, profile_ft, window_function};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::concentration::ConcentrationModel;
    pub use super::errors::{HaloModelError, HaloResult};
    pub use super::options::HaloModelOptions;
    pub use super::power::{halomodel_matter_power, onehalo_matter_power, twohalo_matter_power};
}
