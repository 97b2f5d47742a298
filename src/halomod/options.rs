//! Halo-model options — integration range, tolerances, and quadrature rule.
//!
//! Purpose
//! -------
//! Collect the numerical configuration of the one- and two-halo mass
//! integrals in one validated value, [`HaloModelOptions`], so callers pass
//! explicit settings instead of relying on process-wide constants.
//!
//! Key behaviors
//! -------------
//! - [`MassRange`]: validated integration range [M_min, M_max] in M_sun,
//!   exposed in log10 M for the integrators.
//! - [`HaloModelOptions`]: mass range, [`QuadTolerances`] and [`QuadRule`],
//!   with `Default` reproducing the standard settings (`HM_*` constants).
//!
//! Invariants & assumptions
//! ------------------------
//! - 0 < M_min < M_max < ∞.
//! - Tolerances are validated by [`QuadTolerances::new`].
//! - M_min doubles as the mass at which the two-halo truncation correction
//!   evaluates the window, so it must lie inside the cosmology's σ(M) range.
//!
//! Testing notes
//! -------------
//! - Unit tests check the defaults, log10 bounds, and rejection of invalid
//!   ranges and tolerances.
use crate::{
    halomod::errors::{HaloModelError, HaloResult},
    numerics::{QuadRule, QuadTolerances},
};

/// Default lower integration mass in M_sun.
pub const HM_MMIN: f64 = 1.0e7;
/// Default upper integration mass in M_sun.
pub const HM_MMAX: f64 = 1.0e17;
/// Default absolute tolerance of the mass integrals.
pub const HM_EPSABS: f64 = 0.0;
/// Default relative tolerance of the mass integrals.
pub const HM_EPSREL: f64 = 1.0e-4;
/// Default subdivision limit of the mass integrals.
pub const HM_LIMIT: usize = 1000;

/// MassRange — validated halo-mass integration range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassRange {
    min: f64,
    max: f64,
}

impl MassRange {
    /// Construct a validated mass range.
    ///
    /// Errors
    /// ------
    /// - `HaloModelError::InvalidMassRange` unless 0 < `min` < `max` < ∞.
    pub fn new(min: f64, max: f64) -> HaloResult<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min >= max {
            return Err(HaloModelError::InvalidMassRange { min, max });
        }
        Ok(MassRange { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Integration bounds in log10 M.
    pub fn log10_bounds(&self) -> (f64, f64) {
        (self.min.log10(), self.max.log10())
    }
}

impl Default for MassRange {
    fn default() -> Self {
        MassRange { min: HM_MMIN, max: HM_MMAX }
    }
}

/// HaloModelOptions — numerical configuration of the mass integrals.
///
/// Fields
/// ------
/// - `mass_range`: [`MassRange`] integrated over in log10 M.
/// - `tolerances`: [`QuadTolerances`] shared by both integrals.
/// - `rule`: Gauss–Kronrod pair applied on each subinterval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloModelOptions {
    pub mass_range: MassRange,
    pub tolerances: QuadTolerances,
    pub rule: QuadRule,
}

impl HaloModelOptions {
    /// Bundle already-validated components.
    pub fn new(mass_range: MassRange, tolerances: QuadTolerances, rule: QuadRule) -> Self {
        HaloModelOptions { mass_range, tolerances, rule }
    }

    /// Build options from raw values, validating each component.
    ///
    /// Errors
    /// ------
    /// - `HaloModelError::InvalidMassRange` for an invalid range.
    /// - `HaloModelError::InvalidTolerances` wrapping the `QuadError` for
    ///   invalid tolerances or limit.
    pub fn from_raw(
        mass_min: f64, mass_max: f64, epsabs: f64, epsrel: f64, limit: usize, rule: QuadRule,
    ) -> HaloResult<Self> {
        let mass_range = MassRange::new(mass_min, mass_max)?;
        let tolerances = QuadTolerances::new(epsabs, epsrel, limit)
            .map_err(HaloModelError::InvalidTolerances)?;
        Ok(HaloModelOptions { mass_range, tolerances, rule })
    }
}

impl Default for HaloModelOptions {
    fn default() -> Self {
        HaloModelOptions {
            mass_range: MassRange::default(),
            tolerances: QuadTolerances { epsabs: HM_EPSABS, epsrel: HM_EPSREL, limit: HM_LIMIT },
            rule: QuadRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::QuadError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Default values and log10 bounds.
    // - Validation of the mass range and tolerances.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the defaults match the documented constants.
    //
    // Given
    // -----
    // - `HaloModelOptions::default()`.
    //
    // Expect
    // ------
    // - Range [1e7, 1e17] (log10 bounds 7 and 17), epsabs 0, epsrel 1e-4,
    //   limit 1000, GK21, and the tolerances pass validation.
    fn defaults_match_constants() {
        let opts = HaloModelOptions::default();

        let (lo, hi) = opts.mass_range.log10_bounds();
        assert!((lo - 7.0).abs() < 1e-14 && (hi - 17.0).abs() < 1e-14);
        assert_eq!(opts.tolerances, QuadTolerances::new(0.0, 1e-4, 1000).unwrap());
        assert_eq!(opts.rule, QuadRule::GaussKronrod21);
    }

    #[test]
    // Purpose
    // -------
    // Verify invalid configurations are rejected.
    //
    // Given
    // -----
    // - Reversed, zero and infinite mass ranges; a negative epsrel.
    //
    // Expect
    // ------
    // - `InvalidMassRange` for the ranges; `InvalidTolerances` for the
    //   tolerance.
    fn invalid_configurations_are_rejected() {
        for (min, max) in [(1e17, 1e7), (0.0, 1e10), (1e7, f64::INFINITY), (1e10, 1e10)] {
            assert!(matches!(
                MassRange::new(min, max),
                Err(HaloModelError::InvalidMassRange { .. })
            ));
        }
        assert!(matches!(
            HaloModelOptions::from_raw(1e7, 1e17, 0.0, -1e-4, 1000, QuadRule::GaussKronrod15),
            Err(HaloModelError::InvalidTolerances(QuadError::InvalidTolerance { .. }))
        ));
        let ok = HaloModelOptions::from_raw(1e8, 1e16, 0.0, 1e-5, 500, QuadRule::GaussKronrod15)
            .unwrap();
        assert_eq!(ok.mass_range.min(), 1e8);
        assert_eq!(ok.tolerances.limit, 500);
    }
}
