//! Shared helpers for Rust <-> Python conversion.
//!
//! Author: ALICE-BIND contributors

use pyo3::exceptions::{PyAttributeError, PyOverflowError, PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::attr::InterpreterLock;
use crate::error::BindError;
use crate::value::Value;

impl From<BindError> for PyErr {
    fn from(e: BindError) -> Self {
        let msg = e.to_string();
        match e {
            BindError::TooYoung { .. } => PyValueError::new_err(msg),
            BindError::AttributeNotFound { .. } => PyAttributeError::new_err(msg),
            BindError::ReadOnlyAttribute { .. } => PyAttributeError::new_err(msg),
            BindError::Overflow(_) => PyOverflowError::new_err(msg),
            BindError::UnknownExport(_) => PyAttributeError::new_err(msg),
            BindError::Callback(_) => PyRuntimeError::new_err(msg),
            e if e.is_argument_error() => PyTypeError::new_err(msg),
            _ => PyRuntimeError::new_err(msg),
        }
    }
}

/// The GIL as an interpreter lock: `release_while` is `allow_threads`
impl InterpreterLock for Python<'_> {
    fn release_while<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        self.allow_threads(f)
    }
}

/// Convert a table value to a Python object
pub fn value_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    Ok(match value {
        Value::None => py.None(),
        Value::Bool(v) => v.into_py(py),
        Value::Int(v) => v.into_py(py),
        Value::UInt(v) => v.into_py(py),
        Value::Float(v) => v.into_py(py),
        Value::Str(s) => s.into_py(py),
        Value::List(items) => {
            let items = items
                .iter()
                .map(|item| value_to_py(py, item))
                .collect::<PyResult<Vec<_>>>()?;
            PyList::new_bound(py, items).into_py(py)
        }
        Value::Map(entries) => {
            let dict = PyDict::new_bound(py);
            for (k, v) in entries {
                dict.set_item(k, value_to_py(py, v)?)?;
            }
            dict.into_py(py)
        }
        // Opaque natives surface as their description
        Value::Object(obj) => obj.describe().into_py(py),
        Value::Callable(c) => {
            return Err(PyTypeError::new_err(format!(
                "native function '{}' cannot be returned to Python",
                c.name()
            )))
        }
    })
}

