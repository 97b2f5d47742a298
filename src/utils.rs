#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

#[cfg(feature = "python-bindings")]
use crate::{
    halomod::{HaloModelOptions, MassRange},
    numerics::{QuadRule, QuadTolerances},
};

/// Parse a quadrature-rule label (`"gk15"` or `"gk21"`).
#[cfg(feature = "python-bindings")]
pub fn extract_quad_rule(rule: Option<&str>) -> PyResult<QuadRule> {
    match rule.map(|r| r.trim().to_ascii_lowercase()) {
        None => Ok(QuadRule::default()),
        Some(label) => match label.as_str() {
            "gk15" | "gauss_kronrod_15" => Ok(QuadRule::GaussKronrod15),
            "gk21" | "gauss_kronrod_21" => Ok(QuadRule::GaussKronrod21),
            _ => Err(PyValueError::new_err(format!(
                "unknown quadrature rule '{label}'; expected 'gk15' or 'gk21'"
            ))),
        },
    }
}

/// Build [`HaloModelOptions`] from optional Python keyword arguments,
/// falling back to the defaults field by field.
#[cfg(feature = "python-bindings")]
pub fn build_halo_model_options(
    mass_range: Option<(f64, f64)>, epsabs: Option<f64>, epsrel: Option<f64>,
    limit: Option<usize>, rule: Option<&str>,
) -> PyResult<HaloModelOptions> {
    let defaults = HaloModelOptions::default();

    let mass_range = match mass_range {
        Some((min, max)) => MassRange::new(min, max)?,
        None => defaults.mass_range,
    };
    let tolerances = QuadTolerances::new(
        epsabs.unwrap_or(defaults.tolerances.epsabs),
        epsrel.unwrap_or(defaults.tolerances.epsrel),
        limit.unwrap_or(defaults.tolerances.limit),
    )
    .map_err(|err| PyValueError::new_err(err.to_string()))?;
    let rule = extract_quad_rule(rule)?;

    Ok(HaloModelOptions::new(mass_range, tolerances, rule))
}
