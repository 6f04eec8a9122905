//! PyAdultPerson class and PyColor enum.
//!
//! Author: ALICE-BIND contributors

use pyo3::prelude::*;

use crate::color::Color;
use crate::person::AdultPerson;

/// Python-visible AdultPerson wrapper
#[pyclass(name = "AdultPerson", module = "alice_bind")]
#[derive(Clone)]
pub struct PyAdultPerson {
    pub(crate) inner: AdultPerson,
}

#[pymethods]
impl PyAdultPerson {
    /// Construct from age and name (age is stored as given)
    #[new]
    #[pyo3(signature = (age, name))]
    fn new(age: usize, name: String) -> Self {
        PyAdultPerson {
            inner: AdultPerson::new(age, name),
        }
    }

    /// Age in years
    #[getter]
    fn age(&self) -> usize {
        self.inner.age()
    }

    /// Set age; raises ValueError below 18 and keeps the old value
    #[setter]
    fn set_age(&mut self, age: usize) -> PyResult<()> {
        Ok(self.inner.set_age(age)?)
    }

    /// Name of the person
    fn get_name(&self) -> String {
        self.inner.name().to_string()
    }

    /// Print `Hello, <name>!`, or `Hello!` when called without a name
    #[staticmethod]
    #[pyo3(signature = (name=None))]
    fn greet(name: Option<&str>) {
        AdultPerson::greet(name);
    }

    fn __repr__(&self) -> String {
        self.inner.describe()
    }
}

/// Python-visible Color enum
#[pyclass(name = "Color", module = "alice_bind", eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyColor {
    /// 0
    #[pyo3(name = "BLACK")]
    Black = 0,
    /// 1
    #[pyo3(name = "WHITE")]
    White = 1,
}

#[pymethods]
impl PyColor {
    /// Member name
    #[getter]
    fn name(&self) -> &'static str {
        Color::from(*self).name()
    }

    /// Integer value
    #[getter]
    fn value(&self) -> i64 {
        Color::from(*self).value()
    }
}

impl From<PyColor> for Color {
    fn from(c: PyColor) -> Self {
        match c {
            PyColor::Black => Color::Black,
            PyColor::White => Color::White,
        }
    }
}

