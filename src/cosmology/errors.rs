//! Errors raised by cosmology collaborators (parameter validation, domain
//! checks, and internal quadrature failures).
//!
//! [`CosmoError`] is the error type of every [`HaloCosmology`] method. The
//! halo-model core never inspects its variants; it wraps them unchanged into
//! `HaloModelError::Collaborator` and propagates them.
//!
//! [`HaloCosmology`]: crate::cosmology::HaloCosmology
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::numerics::QuadError;

/// Result alias for collaborator evaluations.
pub type CosmoResult<T> = Result<T, CosmoError>;

/// Failure of a cosmological collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum CosmoError {
    // ---- Parameters ----
    /// A cosmological parameter is out of its admissible range.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    // ---- Domain ----
    /// Scale factor must be finite and > 0.
    InvalidScaleFactor { a: f64 },

    /// Halo mass must be finite and > 0.
    InvalidMass { mass: f64 },

    /// Mass lies outside the tabulated σ(M) range.
    MassOutOfRange { mass: f64, min: f64, max: f64 },

    /// Overdensity must be finite and > 0.
    InvalidOverdensity { odelta: f64 },

    /// Wavenumber must be finite and ≥ 0.
    InvalidWavenumber { k: f64 },

    // ---- Numerics ----
    /// An internal integral (growth, σ(R)) did not converge.
    QuadratureFailed { quantity: &'static str, reason: QuadError },

    /// A derived quantity came out NaN/±inf.
    NonFinite { quantity: &'static str, value: f64 },
}

impl std::error::Error for CosmoError {}

impl std::fmt::Display for CosmoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameters ----
            CosmoError::InvalidParameter { name, value, reason } => {
                write!(f, "Cosmology: invalid parameter {name} = {value}; {reason}")
            }
            // ---- Domain ----
            CosmoError::InvalidScaleFactor { a } => {
                write!(f, "Cosmology: scale factor must be finite and > 0; got: {a}")
            }
            CosmoError::InvalidMass { mass } => {
                write!(f, "Cosmology: halo mass must be finite and > 0; got: {mass}")
            }
            CosmoError::MassOutOfRange { mass, min, max } => {
                write!(f, "Cosmology: mass {mass} outside tabulated range [{min}, {max}]")
            }
            CosmoError::InvalidOverdensity { odelta } => {
                write!(f, "Cosmology: overdensity must be finite and > 0; got: {odelta}")
            }
            CosmoError::InvalidWavenumber { k } => {
                write!(f, "Cosmology: wavenumber must be finite and >= 0; got: {k}")
            }
            // ---- Numerics ----
            CosmoError::QuadratureFailed { quantity, reason } => {
                write!(f, "Cosmology: integration for {quantity} failed: {reason}")
            }
            CosmoError::NonFinite { quantity, value } => {
                write!(f, "Cosmology: {quantity} is non-finite: {value}")
            }
        }
    }
}

/// Convert a [`CosmoError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<CosmoError> for PyErr {
    fn from(err: CosmoError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
