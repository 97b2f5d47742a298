//! cosmology — collaborator seam and reference flat ΛCDM implementation.
//!
//! Purpose
//! -------
//! Define the interface the halo-model core consumes ([`HaloCosmology`]) and
//! ship a self-contained reference implementation ([`FiducialCosmology`])
//! so the core can be evaluated and tested end to end.
//!
//! Key behaviors
//! -------------
//! - [`traits`]: the [`HaloCosmology`] trait (growth, σ(M), Δ_v, r_Δ, ρ̄_m,
//!   mass function, bias, linear power).
//! - [`params`]: validated flat ΛCDM parameters in [`CosmoParams`].
//! - [`fiducial`]: [`FiducialCosmology`], with BBKS linear power normalised
//!   to σ8, a tabulated σ(M), the Bryan–Norman virial overdensity, and the
//!   Sheth–Tormen mass function and bias.
//! - [`errors`]: [`CosmoError`] and the [`CosmoResult`] alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Comoving units throughout: Mpc, M_sun, Mpc⁻¹.
//! - Mass functions are per log10 M.
//! - Collaborators are pure and `Sync`.
//!
//! Downstream usage
//! ----------------
//! - Custom cosmologies implement [`HaloCosmology`] directly and are passed
//!   by reference to the `halomod` entry points.
//!
//!   ```rust,ignore
//!   use halo_model::cosmology::{CosmoParams, FiducialCosmology};
//!
//!   let cosmo = FiducialCosmology::new(CosmoParams::fiducial())?;
//!   ```

pub mod errors;
pub mod fiducial;
pub mod params;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{CosmoError, CosmoResult};
pub use self::fiducial::{DELTA_C, FiducialCosmology, SigmaTable};
pub use self::params::CosmoParams;
pub use self::traits::HaloCosmology;
