//! Python bindings for ALICE-BIND
//!
//! Provides the catalogue as a CPython extension module via PyO3.
//!
//! ```python
//! import alice_bind as ab
//!
//! ab.add_int(3)               # 3
//! ab.get_n_zeros()            # [0.0] * 10
//! p = ab.AdultPerson(30, "Ann")
//! p.age = 12                  # ValueError
//! ab.AdultPerson.greet()      # prints "Hello!"
//! ab.call_callback(lambda n: [1.0] * n, 3)
//! ab.unsafe_get_attr(p, "age")
//! ```
//!
//! Author: ALICE-BIND contributors

#![cfg(feature = "python")]

mod functions;
mod helpers;
mod person;

pub use helpers::value_to_py;
pub use person::{PyAdultPerson, PyColor};

use pyo3::prelude::*;

use crate::constants::{ones_list, FLOAT_NUMBER, INT_NUMBER};
use crate::logging::{init_logging, LogConfig};

/// Python module
#[pymodule]
pub fn alice_bind(m: &Bound<'_, PyModule>) -> PyResult<()> {
    init_logging(&LogConfig::from_env());

    m.add("__doc__", crate::MODULE_DOC)?;
    m.add("__version__", crate::VERSION)?;

    // Basic
    m.add_function(wrap_pyfunction!(functions::hello_world, m)?)?;
    m.add_function(wrap_pyfunction!(functions::greet, m)?)?;
    m.add_function(wrap_pyfunction!(functions::add_int, m)?)?;
    m.add_function(wrap_pyfunction!(functions::add_float, m)?)?;

    // Containers
    m.add_function(wrap_pyfunction!(functions::get_n_zeros, m)?)?;
    m.add_function(wrap_pyfunction!(functions::get_map, m)?)?;

    // Attributes
    m.add("int_number", INT_NUMBER)?;
    m.add("float_number", FLOAT_NUMBER)?;
    m.add("ones_list", ones_list())?;

    // Class and enum
    m.add_class::<PyAdultPerson>()?;
    m.add_class::<PyColor>()?;

    // Functional
    m.add_function(wrap_pyfunction!(functions::call_callback, m)?)?;

    // Generic objects
    m.add_function(wrap_pyfunction!(functions::safe_get_attr, m)?)?;
    m.add_function(wrap_pyfunction!(functions::unsafe_get_attr, m)?)?;

    m.add_function(wrap_pyfunction!(functions::py_init_logging, m)?)?;
    Ok(())
}
