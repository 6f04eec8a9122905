//! Error types for ALICE-BIND
//!
//! One error enum covers the whole catalogue. Binding surfaces convert it to
//! their native form: `PyErr` for Python, `BindStatus` for the C ABI and an
//! exit code for the CLI.
//!
//! Author: ALICE-BIND contributors

use thiserror::Error;

/// Errors raised by the binding catalogue
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// Age below the adult minimum. The record is left unchanged.
    #[error("too young: age {age} is below the minimum of {min}")]
    TooYoung {
        /// Rejected age
        age: usize,
        /// Required minimum
        min: usize,
    },

    /// Attribute lookup on an object that has no such attribute
    #[error("'{type_name}' object has no attribute '{attribute}'")]
    AttributeNotFound {
        /// Type of the object looked up
        type_name: String,
        /// Requested attribute name
        attribute: String,
    },

    /// Assignment to an attribute that has no setter
    #[error("attribute '{attribute}' of '{type_name}' objects is not writable")]
    ReadOnlyAttribute {
        /// Type of the object assigned to
        type_name: String,
        /// Attribute name
        attribute: String,
    },

    /// Error raised by a caller-supplied callback, passed through unchanged
    #[error("{0}")]
    Callback(String),

    /// Integer arithmetic left the representable range
    #[error("integer overflow in {0}")]
    Overflow(&'static str),

    /// Name is not registered in the module table
    #[error("module has no export named '{0}'")]
    UnknownExport(String),

    /// Export exists but is not callable
    #[error("'{0}' is not callable")]
    NotCallable(String),

    /// More positional arguments than parameters
    #[error("{function}() takes at most {max} arguments ({given} given)")]
    TooManyArguments {
        /// Function name
        function: String,
        /// Parameter count
        max: usize,
        /// Arguments supplied
        given: usize,
    },

    /// Required parameter without a value
    #[error("{function}() missing required argument '{argument}'")]
    MissingArgument {
        /// Function name
        function: String,
        /// Parameter name
        argument: String,
    },

    /// Keyword that names no parameter
    #[error("{function}() got an unexpected keyword argument '{argument}'")]
    UnexpectedKeyword {
        /// Function name
        function: String,
        /// Keyword name
        argument: String,
    },

    /// Parameter supplied both positionally and by keyword
    #[error("{function}() got multiple values for argument '{argument}'")]
    DuplicateArgument {
        /// Function name
        function: String,
        /// Parameter name
        argument: String,
    },

    /// Argument of the wrong dynamic type
    #[error("argument '{argument}': expected {expected}, got {found}")]
    TypeMismatch {
        /// Parameter name
        argument: String,
        /// Expected type description
        expected: &'static str,
        /// Actual type description
        found: &'static str,
    },
}

impl BindError {
    /// Build an attribute-not-found error
    pub fn attribute_not_found(type_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        BindError::AttributeNotFound {
            type_name: type_name.into(),
            attribute: attribute.into(),
        }
    }

    /// Build a read-only-attribute error
    pub fn read_only(type_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        BindError::ReadOnlyAttribute {
            type_name: type_name.into(),
            attribute: attribute.into(),
        }
    }

    /// True for argument binding errors (the scripting `TypeError` family)
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            BindError::TooManyArguments { .. }
                | BindError::MissingArgument { .. }
                | BindError::UnexpectedKeyword { .. }
                | BindError::DuplicateArgument { .. }
                | BindError::TypeMismatch { .. }
                | BindError::NotCallable(_)
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BindError>;
