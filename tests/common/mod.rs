//! Common test helpers for ALICE-BIND integration tests
//!
//! Author: ALICE-BIND contributors

#![allow(dead_code)]

use alice_bind::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Standard fixtures
// ============================================================================

/// Adult record used across tests
pub fn test_person() -> AdultPerson {
    AdultPerson::new(30, "Ann")
}

/// Ages the setter must accept
pub fn adult_ages() -> Vec<usize> {
    vec![MIN_AGE, MIN_AGE + 1, 30, 65, 120, usize::MAX]
}

/// Ages the setter must reject
pub fn minor_ages() -> Vec<usize> {
    (0..MIN_AGE).collect()
}

/// Callable returning `[0.5 * i for i in range(n)]`, counting its invocations
pub fn counting_callback() -> (Callable, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let callable = Callable::new("halves", move |args| {
        counter.fetch_add(1, Ordering::SeqCst);
        let n = args
            .first()
            .ok_or_else(|| BindError::Callback("missing n".into()))?
            .as_count("n")?;
        Ok(Value::from((0..n).map(|i| i as f64 * 0.5).collect::<Vec<_>>()))
    });
    (callable, calls)
}

/// Keyword map from pairs
pub fn kwargs(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert a value is a list of `len` reals all equal to `expected`
pub fn assert_float_list(value: &Value, len: usize, expected: f64) {
    let items = value
        .as_float_list("result")
        .unwrap_or_else(|e| panic!("not a float list: {} ({:?})", e, value));
    assert_eq!(items.len(), len, "length mismatch in {:?}", value);
    assert!(
        items.iter().all(|&v| v == expected),
        "expected all {} in {:?}",
        expected,
        value
    );
}
