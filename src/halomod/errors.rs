//! Errors for the halo-model core (model/profile selection, input domain,
//! integration failures, and collaborator failures).
//!
//! This module defines [`HaloModelError`] and the [`HaloResult`] alias used
//! by every public entry point in `halomod`. Collaborator errors are carried
//! unchanged in [`HaloModelError::Collaborator`]; quadrature failures are
//! tagged with the [`HaloTerm`] whose integral failed.
//!
//! ## Conventions
//! - Display messages start with the component that failed ("Concentration",
//!   "Profile", "One-halo", "Two-halo", "Halo model").
//! - At the PyO3 boundary, integration failures become `RuntimeError`; every
//!   other variant becomes `ValueError`.
#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyRuntimeError, PyValueError},
};

use crate::{cosmology::CosmoError, numerics::QuadError};

/// Result alias for halo-model operations.
pub type HaloResult<T> = Result<T, HaloModelError>;

/// Which mass integral an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaloTerm {
    OneHalo,
    TwoHalo,
}

impl std::fmt::Display for HaloTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HaloTerm::OneHalo => write!(f, "One-halo"),
            HaloTerm::TwoHalo => write!(f, "Two-halo"),
        }
    }
}

/// Unified error type for the halo-model core.
#[derive(Debug, Clone, PartialEq)]
pub enum HaloModelError {
    // ---- Model selection ----
    /// A concentration relation was called outside its calibrated overdensity.
    ModelMismatch { model: &'static str, overdensity: f64, required: f64 },

    /// A model or profile label could not be parsed.
    UnknownSelector { kind: &'static str, label: String },

    // ---- Input validation ----
    /// Wavenumber must be finite and ≥ 0.
    InvalidWavenumber { k: f64 },

    /// Scale factor must be finite with 0 < a ≤ 1.
    InvalidScaleFactor { a: f64 },

    /// Halo mass must be finite and > 0.
    InvalidMass { mass: f64 },

    /// Concentration must be finite and > 0.
    InvalidConcentration { c: f64 },

    /// Overdensity must be finite and > 0.
    InvalidOverdensity { odelta: f64 },

    /// Integration mass range must satisfy 0 < min < max < ∞.
    InvalidMassRange { min: f64, max: f64 },

    /// Quadrature tolerances or limit rejected while building options.
    InvalidTolerances(QuadError),

    /// Profile transform evaluated to NaN/±inf.
    NonFiniteProfile { mass: f64, k: f64, value: f64 },

    // ---- Numerics ----
    /// A mass integral failed to converge or hit a non-finite integrand.
    IntegrationFailure { term: HaloTerm, reason: QuadError },

    // ---- Collaborators ----
    /// A cosmological collaborator failed.
    Collaborator(CosmoError),
}

impl std::error::Error for HaloModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HaloModelError::IntegrationFailure { reason, .. } => Some(reason),
            HaloModelError::InvalidTolerances(err) => Some(err),
            HaloModelError::Collaborator(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for HaloModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Model selection ----
            HaloModelError::ModelMismatch { model, overdensity, required } => write!(
                f,
                "Concentration: {model} is only valid for Delta = {required}; got Delta = {overdensity}"
            ),
            HaloModelError::UnknownSelector { kind, label } => {
                write!(f, "Halo model: unknown {kind} '{label}'")
            }
            // ---- Input validation ----
            HaloModelError::InvalidWavenumber { k } => {
                write!(f, "Halo model: wavenumber must be finite and >= 0; got: {k}")
            }
            HaloModelError::InvalidScaleFactor { a } => {
                write!(f, "Halo model: scale factor must satisfy 0 < a <= 1; got: {a}")
            }
            HaloModelError::InvalidMass { mass } => {
                write!(f, "Halo model: halo mass must be finite and > 0; got: {mass}")
            }
            HaloModelError::InvalidConcentration { c } => {
                write!(f, "Profile: concentration must be finite and > 0; got: {c}")
            }
            HaloModelError::InvalidOverdensity { odelta } => {
                write!(f, "Halo model: overdensity must be finite and > 0; got: {odelta}")
            }
            HaloModelError::InvalidMassRange { min, max } => {
                write!(f, "Halo model: mass range must satisfy 0 < min < max; got [{min}, {max}]")
            }
            HaloModelError::InvalidTolerances(err) => write!(f, "Halo model options: {err}"),
            HaloModelError::NonFiniteProfile { mass, k, value } => {
                write!(f, "Profile: non-finite transform {value} at M = {mass}, k = {k}")
            }
            // ---- Numerics ----
            HaloModelError::IntegrationFailure { term, reason } => {
                write!(f, "{term}: integration failure: {reason}")
            }
            // ---- Collaborators ----
            HaloModelError::Collaborator(err) => write!(f, "Halo model: {err}"),
        }
    }
}

impl From<CosmoError> for HaloModelError {
    fn from(err: CosmoError) -> Self {
        HaloModelError::Collaborator(err)
    }
}

/// Convert a [`HaloModelError`] into a Python exception.
#[cfg(feature = "python-bindings")]
impl From<HaloModelError> for PyErr {
    fn from(err: HaloModelError) -> PyErr {
        match err {
            HaloModelError::IntegrationFailure { .. } => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
