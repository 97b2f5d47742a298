//! Errors for adaptive quadrature (tolerance/interval checks, convergence
//! failures, and integrand faults).
//!
//! This module defines [`QuadError`], the failure type of the adaptive
//! Gauss–Kronrod integrator, and [`QuadFailure`], which distinguishes a
//! quadrature failure from an error raised by the integrand itself.
//!
//! ## Conventions
//! - Configuration problems (tolerances, limits, bounds) are reported before
//!   the integrand is evaluated even once.
//! - Convergence problems carry the best estimate reached so far so callers
//!   can log it, but the estimate is never returned as a value.
//! - A NaN or ±inf integrand value aborts the integration immediately with
//!   [`QuadError::NonFiniteIntegrand`].

/// Result alias for quadrature routines that may produce [`QuadError`].
pub type QuadResult<T> = Result<T, QuadError>;

/// Failure modes of the adaptive integrator.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadError {
    // ---- Configuration ----
    /// Absolute tolerance must be ≥ 0 and the relative tolerance must be
    /// achievable in double precision when `epsabs == 0`.
    InvalidTolerance { epsabs: f64, epsrel: f64, reason: &'static str },

    /// Subdivision limit must be at least 1.
    InvalidLimit { limit: usize },

    /// The caller-supplied workspace holds fewer intervals than the limit.
    WorkspaceTooSmall { capacity: usize, limit: usize },

    /// Bounds must be finite with `lower <= upper`.
    InvalidInterval { lower: f64, upper: f64 },

    // ---- Integrand ----
    /// The integrand returned NaN/±inf at abscissa `x`.
    NonFiniteIntegrand { x: f64, value: f64 },

    // ---- Convergence ----
    /// Requested accuracy not reached within `limit` subdivisions.
    MaxSubdivisions { limit: usize, estimate: f64, abserr: f64 },

    /// Roundoff error prevents reaching the requested tolerance.
    RoundoffDetected { estimate: f64, abserr: f64 },

    /// A subinterval shrank to machine precision near `x`; the integrand
    /// is likely singular or discontinuous there.
    BadIntegrandBehaviour { x: f64 },
}

impl std::error::Error for QuadError {}

impl std::fmt::Display for QuadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            QuadError::InvalidTolerance { epsabs, epsrel, reason } => {
                write!(f, "Invalid quadrature tolerances (epsabs = {epsabs}, epsrel = {epsrel}): {reason}")
            }
            QuadError::InvalidLimit { limit } => {
                write!(f, "Subdivision limit must be at least 1; got: {limit}")
            }
            QuadError::WorkspaceTooSmall { capacity, limit } => {
                write!(
                    f,
                    "Integration workspace holds {capacity} intervals but the limit is {limit}"
                )
            }
            QuadError::InvalidInterval { lower, upper } => {
                write!(f, "Integration bounds must be finite with lower <= upper; got [{lower}, {upper}]")
            }
            // ---- Integrand ----
            QuadError::NonFiniteIntegrand { x, value } => {
                write!(f, "Integrand is non-finite at x = {x}: {value}")
            }
            // ---- Convergence ----
            QuadError::MaxSubdivisions { limit, estimate, abserr } => {
                write!(
                    f,
                    "Maximum number of subdivisions ({limit}) reached; estimate {estimate} with error {abserr}"
                )
            }
            QuadError::RoundoffDetected { estimate, abserr } => {
                write!(
                    f,
                    "Roundoff error prevents the requested tolerance; estimate {estimate} with error {abserr}"
                )
            }
            QuadError::BadIntegrandBehaviour { x } => {
                write!(f, "Extremely bad integrand behaviour near x = {x}")
            }
        }
    }
}

/// Outcome of a failed integration: either the integrator gave up, or the
/// integrand itself returned an error (which is passed through untouched).
#[derive(Debug, Clone, PartialEq)]
pub enum QuadFailure<E> {
    Quadrature(QuadError),
    Integrand(E),
}

impl<E> From<QuadError> for QuadFailure<E> {
    fn from(err: QuadError) -> Self {
        QuadFailure::Quadrature(err)
    }
}

impl<E: std::fmt::Display> std::fmt::Display for QuadFailure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadFailure::Quadrature(err) => write!(f, "{err}"),
            QuadFailure::Integrand(err) => write!(f, "Integrand failed: {err}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for QuadFailure<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `QuadError` display messages.
    // - The `From<QuadError>` lift into `QuadFailure`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `NonFiniteIntegrand` reports the offending abscissa.
    //
    // Given
    // -----
    // - `QuadError::NonFiniteIntegrand { x: 12.5, value: inf }`.
    //
    // Expect
    // ------
    // - The message contains "12.5" and "inf".
    fn quad_error_non_finite_integrand_includes_payload() {
        // Arrange
        let err = QuadError::NonFiniteIntegrand { x: 12.5, value: f64::INFINITY };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("12.5"), "Message should include x.\nGot: {msg}");
        assert!(msg.contains("inf"), "Message should include the value.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a `QuadError` lifts into `QuadFailure::Quadrature`.
    //
    // Given
    // -----
    // - `QuadError::InvalidLimit { limit: 0 }`.
    //
    // Expect
    // ------
    // - The lifted value matches the `Quadrature` variant with the same payload.
    fn quad_failure_from_quad_error_wraps_quadrature_variant() {
        // Arrange
        let err = QuadError::InvalidLimit { limit: 0 };

        // Act
        let failure: QuadFailure<String> = err.clone().into();

        // Assert
        assert_eq!(failure, QuadFailure::Quadrature(err));
    }
}
