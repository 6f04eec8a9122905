//! # ALICE-BIND
//!
//! A catalogue of patterns for exposing native code to scripting runtimes:
//! free functions, default arguments, container marshaling, property
//! accessors, static methods with optional arguments, enums, callback
//! passthrough and generic attribute access with the interpreter lock
//! released.
//!
//! ## Layout
//!
//! - **Core**: [`person`], [`color`], [`functions`], [`constants`], [`attr`]
//! - **Table**: [`registry`] (machinery) and [`catalogue`] (the exports)
//! - **Surfaces**: `python` (PyO3 extension module), `ffi` (C ABI) and the
//!   `alice-bind` CLI, each behind a cargo feature of the same name
//!
//! ## Example
//!
//! ```rust
//! use alice_bind::prelude::*;
//!
//! let mut person = AdultPerson::new(30, "Ann");
//! assert!(person.set_age(12).is_err());
//! assert_eq!(person.age(), 30);
//!
//! let module = build_module();
//! let sum = module.call("add_int", vec![Value::Int(3)]).unwrap();
//! assert_eq!(sum, Value::Int(3));
//!
//! let age = get_attribute(&person, "age").unwrap();
//! assert_eq!(age, Value::Int(30));
//! ```
//!
//! Author: ALICE-BIND contributors

#![warn(missing_docs)]

pub mod attr;
pub mod catalogue;
pub mod color;
pub mod constants;
pub mod error;
pub mod functions;
pub mod logging;
pub mod person;
pub mod registry;
pub mod value;

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "ffi")]
pub mod ffi;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name the module is exported under
pub const MODULE_NAME: &str = "alice_bind";

/// Module docstring
pub const MODULE_DOC: &str = "ALICE-BIND test bindings\n------------------------";

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::attr::{
        get_attribute, get_attribute_detached, set_attribute, AttributeBag, InterpreterLock,
        NoInterpreterLock,
    };
    pub use crate::catalogue::build_module;
    pub use crate::color::Color;
    pub use crate::constants::{ones_list, ModuleConstants, FLOAT_NUMBER, INT_NUMBER};
    pub use crate::error::{BindError, Result};
    pub use crate::functions::{
        add_float, add_int, call_callback, get_map, get_n_zeros, greet, hello_world,
    };
    pub use crate::logging::{init_logging, LogConfig};
    pub use crate::person::{AdultPerson, SharedPerson, MIN_AGE};
    pub use crate::registry::{Export, FunctionDef, Module, Param};
    pub use crate::value::{Callable, Value};
}

// Re-exports for convenience
pub use error::{BindError, Result};
pub use person::AdultPerson;
pub use value::Value;
