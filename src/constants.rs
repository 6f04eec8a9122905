//! Static module attributes
//!
//! Author: ALICE-BIND contributors

use crate::attr::AttributeBag;
use crate::value::Value;

/// `int_number`
pub const INT_NUMBER: i64 = 12;

/// `float_number`
pub const FLOAT_NUMBER: f64 = 1.2;

/// Length of `ones_list`
pub const ONES_LEN: usize = 10;

/// `ones_list`: ten ones
pub fn ones_list() -> Vec<usize> {
    vec![1; ONES_LEN]
}

/// The module's constant attributes as an attribute bag
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleConstants;

impl AttributeBag for ModuleConstants {
    fn type_name(&self) -> &str {
        "module"
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        &["int_number", "float_number", "ones_list"]
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        match name {
            "int_number" => Some(Value::Int(INT_NUMBER)),
            "float_number" => Some(Value::Float(FLOAT_NUMBER)),
            "ones_list" => Some(Value::from(ones_list())),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        format!("<module '{}'>", crate::MODULE_NAME)
    }
}
