//! Handle registry for FFI
//!
//! Maps opaque handles to `AdultPerson` records. The lock is held only for the
//! duration of a single read, mutation, insert or remove.
//!
//! Author: ALICE-BIND contributors

use super::types::PersonHandle;
use crate::person::AdultPerson;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex, MutexGuard, PoisonError,
};

lazy_static::lazy_static! {
    /// Global registry of person records
    static ref PERSON_REGISTRY: Mutex<HashMap<u64, AdultPerson>> = Mutex::new(HashMap::new());
}

/// Counter for generating unique handle IDs
static PERSON_COUNTER: AtomicU64 = AtomicU64::new(1);

fn registry() -> MutexGuard<'static, HashMap<u64, AdultPerson>> {
    // A panic while holding the lock cannot leave a record half-written
    PERSON_REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Register a record and return its handle
pub fn register_person(person: AdultPerson) -> PersonHandle {
    // Relaxed ordering is sufficient - we only need uniqueness
    let id = PERSON_COUNTER.fetch_add(1, Ordering::Relaxed);
    registry().insert(id, person);
    id as PersonHandle
}

/// Run `f` on the record behind `handle`
pub fn with_person<R>(handle: PersonHandle, f: impl FnOnce(&mut AdultPerson) -> R) -> Option<R> {
    if handle.is_null() {
        return None;
    }
    let id = handle as u64;
    registry().get_mut(&id).map(f)
}

/// Remove a record; returns whether it existed
pub fn remove_person(handle: PersonHandle) -> bool {
    if handle.is_null() {
        return false;
    }
    let id = handle as u64;
    registry().remove(&id).is_some()
}
