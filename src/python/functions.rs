//! Module-level #[pyfunction]s: basics, containers, callback bridge, attribute access.
//!
//! Author: ALICE-BIND contributors

use std::collections::BTreeMap;

use pyo3::prelude::*;
use tracing::debug;

use crate::attr::{get_attribute_detached, AttributeBag};
use crate::color::Color;
use crate::functions;
use crate::logging::{init_logging, LogConfig};

use super::helpers::value_to_py;
use super::person::{PyAdultPerson, PyColor};

/// Print `Hello, world`
#[pyfunction]
pub fn hello_world() {
    functions::hello_world();
}

/// Function that greet person
#[pyfunction]
pub fn greet(name: &str) -> String {
    functions::greet(name)
}

/// Integer sum (b defaults to 0)
#[pyfunction]
#[pyo3(signature = (a, b=0))]
pub fn add_int(a: i64, b: i64) -> PyResult<i64> {
    Ok(functions::add_int(a, b)?)
}

/// Real sum (b defaults to 0.0)
#[pyfunction]
#[pyo3(signature = (a, b=0.0))]
pub fn add_float(a: f64, b: f64) -> f64 {
    functions::add_float(a, b)
}

/// List of n zeros
#[pyfunction]
#[pyo3(signature = (n=10))]
pub fn get_n_zeros(n: usize) -> Vec<f64> {
    functions::get_n_zeros(n)
}

/// Fixed mapping {"a": 1, "b": 1}
#[pyfunction]
pub fn get_map() -> BTreeMap<String, usize> {
    functions::get_map()
}

/// Call `callback(n)` once and return the list it produced
///
/// Exceptions raised by the callback propagate unchanged.
#[pyfunction]
pub fn call_callback(callback: &Bound<'_, PyAny>, n: usize) -> PyResult<Vec<f64>> {
    functions::call_callback(|n| callback.call1((n,))?.extract::<Vec<f64>>(), n)
}

/// getattr(obj, attr) with a debug trace of the lookup
#[pyfunction]
pub fn safe_get_attr<'py>(obj: &Bound<'py, PyAny>, attr: &str) -> PyResult<Bound<'py, PyAny>> {
    let value = obj.getattr(attr)?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!("{}.attr({}) = {}", obj.repr()?, attr, value.repr()?);
    }
    Ok(value)
}

/// getattr(obj, attr) with the GIL released during the lookup
///
/// Only native objects can be read without the GIL: their field table is
/// plain Rust data. Any other object, or a name outside the field table
/// (methods, dunders), is looked up with the GIL held.
#[pyfunction]
pub fn unsafe_get_attr<'py>(
    py: Python<'py>,
    obj: &Bound<'py, PyAny>,
    attr: &str,
) -> PyResult<Bound<'py, PyAny>> {
    if let Ok(person) = obj.downcast::<PyAdultPerson>() {
        let person = person.borrow();
        if let Some(value) = detached_lookup(py, &person.inner, attr)? {
            return Ok(value.into_bound(py));
        }
    } else if let Ok(color) = obj.extract::<PyColor>() {
        if let Some(value) = detached_lookup(py, &Color::from(color), attr)? {
            return Ok(value.into_bound(py));
        }
    }

    debug!(attr, "not a native field, lookup keeps the GIL");
    safe_get_attr(obj, attr)
}

fn detached_lookup(py: Python<'_>, bag: &dyn AttributeBag, attr: &str) -> PyResult<Option<PyObject>> {
    if !bag.has_attribute(attr) {
        return Ok(None);
    }
    let value = get_attribute_detached(&py, bag, attr)?;
    value_to_py(py, &value).map(Some)
}

/// Install the log subscriber; `filter` overrides ALICE_BIND_LOG
#[pyfunction]
#[pyo3(name = "init_logging", signature = (filter=None))]
pub fn py_init_logging(filter: Option<String>) -> bool {
    let config = match filter {
        Some(filter) => LogConfig::from_env().with_filter(filter),
        None => LogConfig::from_env(),
    };
    init_logging(&config)
}
