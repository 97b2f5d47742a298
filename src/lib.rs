//! halo_model — halo-model matter power spectrum with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the halo-model power spectrum to Python via the `_halo_model`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing classes, functions and submodules used by
//! the `halo_model` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`cosmology`, `halomod`, `numerics`) as
//!   the public crate surface.
//! - Define a `#[pyclass]` wrapper around [`FiducialCosmology`] and
//!   `#[pyfunction]` wrappers around the concentration and power-spectrum
//!   entry points.
//! - Create and register the Python submodules (`cosmology`, `halomod`)
//!   under `halo_model` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, keyword handling and error mapping.
//! - Power-spectrum evaluations release the GIL; the wrapped cosmology is
//!   immutable (`frozen`) and `Sync`.
//!
//! Conventions
//! -----------
//! - Units follow the Rust API: k in Mpc⁻¹, masses in M_sun, powers in Mpc³.
//! - Errors from core Rust code are converted to `PyErr` at the boundary:
//!   integration failures raise `RuntimeError`, everything else raises
//!   `ValueError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`cosmology`] and
//!   [`halomod`] and can ignore the PyO3 items guarded by the
//!   `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by `tests/integration_halo_model_pipeline.rs`.

pub mod cosmology;
pub mod halomod;
pub mod numerics;
pub mod utils;

pub use crate::cosmology::{CosmoError, CosmoParams, FiducialCosmology, HaloCosmology};
pub use crate::halomod::{
    ConcentrationModel, HaloModelError, HaloModelOptions, HaloResult, ProfileKind,
    halomodel_matter_power, onehalo_matter_power, twohalo_matter_power,
};

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    halomod::{
        concentration, halomodel_matter_power_with, onehalo_matter_power_with,
        twohalo_matter_power_with,
    },
    utils::build_halo_model_options,
};

/// FiducialCosmology — Python-facing wrapper for the reference ΛCDM model.
///
/// Purpose
/// -------
/// Build a [`FiducialCosmology`] from Python and expose its background and
/// linear-theory quantities.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `FiducialCosmology(omega_c=0.25, omega_b=0.05, h=0.7, n_s=0.96, sigma8=0.8)`.
///
/// Notes
/// -----
/// - The σ(M) table is built once at construction (with the GIL released).
#[cfg(feature = "python-bindings")]
#[pyclass(name = "FiducialCosmology", module = "halo_model.cosmology", frozen)]
pub struct PyFiducialCosmology {
    inner: FiducialCosmology,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyFiducialCosmology {
    #[new]
    #[pyo3(
        text_signature = "(omega_c=0.25, omega_b=0.05, h=0.7, n_s=0.96, sigma8=0.8)",
        signature = (omega_c = 0.25, omega_b = 0.05, h = 0.7, n_s = 0.96, sigma8 = 0.8)
    )]
    pub fn new(
        py: Python<'_>, omega_c: f64, omega_b: f64, h: f64, n_s: f64, sigma8: f64,
    ) -> PyResult<Self> {
        let params = CosmoParams::new(omega_c, omega_b, h, n_s, sigma8)?;
        let inner = py.allow_threads(|| FiducialCosmology::new(params))?;
        Ok(PyFiducialCosmology { inner })
    }

    #[getter]
    pub fn omega_m(&self) -> f64 {
        self.inner.params().omega_m()
    }

    #[getter]
    pub fn h(&self) -> f64 {
        self.inner.params().h
    }

    #[getter]
    pub fn sigma8(&self) -> f64 {
        self.inner.params().sigma8
    }

    pub fn growth_factor(&self, a: f64) -> PyResult<f64> {
        Ok(self.inner.growth_factor(a)?)
    }

    pub fn sigma_m(&self, mass: f64, a: f64) -> PyResult<f64> {
        Ok(self.inner.sigma_m(mass, a)?)
    }

    pub fn virial_overdensity(&self, a: f64) -> PyResult<f64> {
        Ok(self.inner.virial_overdensity(a)?)
    }

    pub fn linear_power(&self, k: f64, a: f64) -> PyResult<f64> {
        Ok(self.inner.linear_power(k, a)?)
    }

    pub fn mass_function(&self, mass: f64, a: f64, odelta: f64) -> PyResult<f64> {
        Ok(self.inner.mass_function(mass, a, odelta)?)
    }

    pub fn halo_bias(&self, mass: f64, a: f64, odelta: f64) -> PyResult<f64> {
        Ok(self.inner.halo_bias(mass, a, odelta)?)
    }
}

/// Halo concentration for a model label (`"bhattacharya2011"`,
/// `"duffy2008_virial"`, `"constant"`).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (cosmo, mass, a, odelta, label = "duffy2008_virial"))]
pub fn halo_concentration(
    cosmo: &Bound<'_, PyFiducialCosmology>, mass: f64, a: f64, odelta: f64, label: &str,
) -> PyResult<f64> {
    let model: ConcentrationModel = label.parse()?;
    Ok(concentration(&cosmo.get().inner, mass, a, odelta, model)?)
}

/// One-halo power P_1h(k, a) in Mpc³.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "onehalo_matter_power")]
#[pyo3(signature = (cosmo, k, a, mass_range = None, epsabs = None, epsrel = None, limit = None, rule = None))]
#[allow(clippy::too_many_arguments)]
pub fn py_onehalo_matter_power(
    py: Python<'_>, cosmo: &Bound<'_, PyFiducialCosmology>, k: f64, a: f64,
    mass_range: Option<(f64, f64)>, epsabs: Option<f64>, epsrel: Option<f64>,
    limit: Option<usize>, rule: Option<&str>,
) -> PyResult<f64> {
    let options = build_halo_model_options(mass_range, epsabs, epsrel, limit, rule)?;
    let inner = &cosmo.get().inner;
    Ok(py.allow_threads(|| onehalo_matter_power_with(inner, k, a, &options))?)
}

/// Two-halo power P_2h(k, a) in Mpc³.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "twohalo_matter_power")]
#[pyo3(signature = (cosmo, k, a, mass_range = None, epsabs = None, epsrel = None, limit = None, rule = None))]
#[allow(clippy::too_many_arguments)]
pub fn py_twohalo_matter_power(
    py: Python<'_>, cosmo: &Bound<'_, PyFiducialCosmology>, k: f64, a: f64,
    mass_range: Option<(f64, f64)>, epsabs: Option<f64>, epsrel: Option<f64>,
    limit: Option<usize>, rule: Option<&str>,
) -> PyResult<f64> {
    let options = build_halo_model_options(mass_range, epsabs, epsrel, limit, rule)?;
    let inner = &cosmo.get().inner;
    Ok(py.allow_threads(|| twohalo_matter_power_with(inner, k, a, &options))?)
}

/// Halo-model power P(k, a) = P_1h + P_2h in Mpc³.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "halomodel_matter_power")]
#[pyo3(signature = (cosmo, k, a, mass_range = None, epsabs = None, epsrel = None, limit = None, rule = None))]
#[allow(clippy::too_many_arguments)]
pub fn py_halomodel_matter_power(
    py: Python<'_>, cosmo: &Bound<'_, PyFiducialCosmology>, k: f64, a: f64,
    mass_range: Option<(f64, f64)>, epsabs: Option<f64>, epsrel: Option<f64>,
    limit: Option<usize>, rule: Option<&str>,
) -> PyResult<f64> {
    let options = build_halo_model_options(mass_range, epsabs, epsrel, limit, rule)?;
    let inner = &cosmo.get().inner;
    Ok(py.allow_threads(|| halomodel_matter_power_with(inner, k, a, &options))?)
}

/// _halo_model — PyO3 module initializer for the Python extension.
///
/// Key behaviors
/// -------------
/// - Create the `cosmology` and `halomod` submodules and attach them to the
///   parent `_halo_model` module.
/// - Register the submodules in `sys.modules` so they are importable via
///   dotted paths from Python.
///
/// Errors
/// ------
/// - `PyErr` if creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _halo_model<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let cosmology_mod = PyModule::new(_py, "cosmology")?;
    let halomod_mod = PyModule::new(_py, "halomod")?;
    cosmology_submodule(m, &cosmology_mod)?;
    halomod_submodule(m, &halomod_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("halo_model.cosmology", cosmology_mod)?;
    _py.import("sys")?.getattr("modules")?.set_item("halo_model.halomod", halomod_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn cosmology_submodule<'py>(
    halo_model: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyFiducialCosmology>()?;
    halo_model.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn halomod_submodule<'py>(
    halo_model: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(halo_concentration, m)?)?;
    m.add_function(wrap_pyfunction!(py_onehalo_matter_power, m)?)?;
    m.add_function(wrap_pyfunction!(py_twohalo_matter_power, m)?)?;
    m.add_function(wrap_pyfunction!(py_halomodel_matter_power, m)?)?;
    halo_model.add_submodule(m)?;
    Ok(())
}
