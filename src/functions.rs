//! Free functions of the catalogue: basics, containers and the callback bridge.
//!
//! Default arguments live as constants next to the functions so every binding
//! surface declares the same defaults.
//!
//! Author: ALICE-BIND contributors

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{BindError, Result};

/// Default second operand of `add_int`
pub const ADD_INT_DEFAULT_B: i64 = 0;

/// Default second operand of `add_float`
pub const ADD_FLOAT_DEFAULT_B: f64 = 0.0;

/// Default count for `get_n_zeros`
pub const DEFAULT_N_ZEROS: usize = 10;

/// Text printed by [`hello_world`]
pub const HELLO_WORLD: &str = "Hello, world";

/// Print `Hello, world`
pub fn hello_world() {
    println!("{}", HELLO_WORLD);
}

/// `Hello, <name>!`
pub fn greet(name: &str) -> String {
    format!("Hello, {}!", name)
}

/// Integer sum; overflow is reported instead of wrapping
pub fn add_int(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b).ok_or(BindError::Overflow("add_int"))
}

/// Real sum
#[inline]
pub fn add_float(a: f64, b: f64) -> f64 {
    a + b
}

/// `n` zeros
pub fn get_n_zeros(n: usize) -> Vec<f64> {
    vec![0.0; n]
}

/// Fixed two-entry map `{"a": 1, "b": 1}`
pub fn get_map() -> BTreeMap<String, usize> {
    let mut map = BTreeMap::new();
    map.insert("a".to_string(), 1);
    map.insert("b".to_string(), 1);
    map
}

/// Invoke `callback(n)` exactly once and return its result unchanged
///
/// Errors raised by the callback propagate as-is.
pub fn call_callback<F, E>(callback: F, n: usize) -> std::result::Result<Vec<f64>, E>
where
    F: FnOnce(usize) -> std::result::Result<Vec<f64>, E>,
{
    debug!(n, "Calling callback...");
    callback(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_add_int() {
        assert_eq!(add_int(3, ADD_INT_DEFAULT_B).unwrap(), 3);
        assert_eq!(add_int(3, 4).unwrap(), 7);
        assert_eq!(add_int(-3, 1).unwrap(), -2);
        assert_eq!(add_int(i64::MAX, 1), Err(BindError::Overflow("add_int")));
    }

    #[test]
    fn test_add_float() {
        assert_eq!(add_float(1.5, ADD_FLOAT_DEFAULT_B), 1.5);
        assert!((add_float(0.1, 0.2) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_get_n_zeros() {
        assert_eq!(get_n_zeros(5), vec![0.0; 5]);
        assert_eq!(get_n_zeros(DEFAULT_N_ZEROS).len(), 10);
        assert!(get_n_zeros(0).is_empty());
    }

    #[test]
    fn test_get_map_stable() {
        let first = get_map();
        assert_eq!(first.len(), 2);
        assert_eq!(first.get("a"), Some(&1));
        assert_eq!(first.get("b"), Some(&1));
        assert_eq!(first, get_map());
    }

    #[test]
    fn test_callback_called_once() {
        let calls = Cell::new(0);
        let out: std::result::Result<_, ()> = call_callback(
            |n| {
                calls.set(calls.get() + 1);
                Ok((0..n).map(|i| i as f64 * 0.5).collect())
            },
            3,
        );
        assert_eq!(out.unwrap(), vec![0.0, 0.5, 1.0]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_callback_error_passes_through() {
        let out = call_callback(|_| Err::<Vec<f64>, _>("boom"), 1);
        assert_eq!(out, Err("boom"));
    }

    #[test]
    fn test_greet() {
        assert_eq!(greet("Ann"), "Hello, Ann!");
    }
}
