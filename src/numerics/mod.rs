//! numerics — special functions and adaptive quadrature.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks the halo model needs: the sine and
//! cosine integrals used by the analytic NFW transform, and a bounded
//! adaptive Gauss–Kronrod integrator used for the mass integrals and by the
//! reference cosmology (growth factor, σ(R)).
//!
//! Key behaviors
//! -------------
//! - [`special`]: `si`, `ci`, and cancellation-free differences
//!   `si_difference` / `ci_difference`.
//! - [`quadrature`]: [`integrate`] / [`integrate_with`] over closures
//!   returning `Result<f64, E>`, configured by [`QuadTolerances`] and
//!   [`QuadRule`], with per-call [`IntegrationWorkspace`] storage.
//! - [`errors`]: [`QuadError`] and [`QuadFailure`].
//!
//! Invariants & assumptions
//! ------------------------
//! - All routines are pure: no global state, no I/O, no logging.
//! - Quadrature always terminates after at most `limit` bisections.
//!
//! Conventions
//! -----------
//! - Integrand errors are never converted into quadrature errors; callers
//!   decide how each side of [`QuadFailure`] maps into their own error type.

pub mod errors;
pub mod quadrature;
pub mod special;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{QuadError, QuadFailure, QuadResult};
pub use self::quadrature::{
    IntegrationWorkspace, QuadOutcome, QuadRule, QuadTolerances, integrate, integrate_with,
};
pub use self::special::{ci, ci_difference, si, si_difference};
