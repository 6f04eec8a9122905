//! Generic attribute access on opaque objects
//!
//! Objects expose their fields by name through [`AttributeBag`], an explicit
//! per-type field table. Lookups come in two variants:
//!
//! - [`get_attribute`]: plain lookup with a diagnostic trace
//! - [`get_attribute_detached`]: the same lookup run with the interpreter
//!   lock released, for hosts that serialize access behind one global lock
//!
//! Writable fields are assigned through [`set_attribute`].
//!
//! ```text
//! caller ── lock held ──┐             ┌── lock held ── caller
//!                       └─ lookup() ──┘
//!                        (lock released)
//! ```
//!
//! Author: ALICE-BIND contributors

use tracing::{debug, trace};

use crate::error::{BindError, Result};
use crate::value::Value;

/// Object exposing named fields by string key
pub trait AttributeBag: Send + Sync {
    /// Scripting-side type name (used in not-found errors)
    fn type_name(&self) -> &str;

    /// Names this object answers to, in declaration order
    fn attribute_names(&self) -> &'static [&'static str];

    /// Look up one attribute
    fn lookup(&self, name: &str) -> Option<Value>;

    /// Human-readable form embedding the current field values
    fn describe(&self) -> String;

    /// True when `lookup(name)` would succeed
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute_names().contains(&name)
    }

    /// Assign one attribute
    ///
    /// Read-only by default: known names fail with
    /// [`BindError::ReadOnlyAttribute`], unknown ones with
    /// [`BindError::AttributeNotFound`].
    fn set_attribute(&self, name: &str, _value: Value) -> Result<()> {
        if self.has_attribute(name) {
            Err(BindError::read_only(self.type_name(), name))
        } else {
            Err(BindError::attribute_not_found(self.type_name(), name))
        }
    }
}

/// Assign `attribute` on `obj`
pub fn set_attribute(obj: &dyn AttributeBag, attribute: &str, value: Value) -> Result<()> {
    debug!("{}.setattr({}, {})", obj.describe(), attribute, value.repr());
    obj.set_attribute(attribute, value)
}

/// Scoped release of a host-wide interpreter lock
///
/// `release_while` runs `f` without the lock and reacquires it before
/// returning, on both the success and the error path.
pub trait InterpreterLock {
    /// Run `f` with the lock released
    fn release_while<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send;
}

/// Host without a global lock: nothing to release
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterpreterLock;

impl InterpreterLock for NoInterpreterLock {
    #[inline]
    fn release_while<T, F>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        f()
    }
}

/// Look up `attribute` on `obj` and trace the result
pub fn get_attribute(obj: &dyn AttributeBag, attribute: &str) -> Result<Value> {
    match obj.lookup(attribute) {
        Some(value) => {
            debug!("{}.attr({}) = {}", obj.describe(), attribute, value);
            Ok(value)
        }
        None => {
            debug!("{}.attr({}) not found", obj.describe(), attribute);
            Err(BindError::attribute_not_found(obj.type_name(), attribute))
        }
    }
}

/// [`get_attribute`] with the interpreter lock released for the lookup
pub fn get_attribute_detached<L>(lock: &L, obj: &dyn AttributeBag, attribute: &str) -> Result<Value>
where
    L: InterpreterLock + ?Sized,
{
    trace!(attribute, "releasing interpreter lock for attribute lookup");
    let result = lock.release_while(|| get_attribute(obj, attribute));
    trace!(attribute, ok = result.is_ok(), "interpreter lock reacquired");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct Point {
        x: i64,
    }

    impl AttributeBag for Point {
        fn type_name(&self) -> &str {
            "Point"
        }

        fn attribute_names(&self) -> &'static [&'static str] {
            &["x"]
        }

        fn lookup(&self, name: &str) -> Option<Value> {
            match name {
                "x" => Some(Value::Int(self.x)),
                _ => None,
            }
        }

        fn describe(&self) -> String {
            format!("Point(x={})", self.x)
        }
    }

    /// Records release/reacquire pairs
    #[derive(Default)]
    struct CountingLock {
        held: AtomicBool,
        releases: AtomicUsize,
        observed_released: AtomicBool,
    }

    impl CountingLock {
        fn new() -> Self {
            let lock = Self::default();
            lock.held.store(true, Ordering::SeqCst);
            lock
        }
    }

    impl InterpreterLock for CountingLock {
        fn release_while<T, F>(&self, f: F) -> T
        where
            F: FnOnce() -> T + Send,
            T: Send,
        {
            self.held.store(false, Ordering::SeqCst);
            self.releases.fetch_add(1, Ordering::SeqCst);
            let out = f();
            self.held.store(true, Ordering::SeqCst);
            out
        }
    }

    #[test]
    fn test_lookup_found_and_missing() {
        let p = Point { x: 3 };
        assert_eq!(get_attribute(&p, "x").unwrap(), Value::Int(3));

        let err = get_attribute(&p, "y").unwrap_err();
        assert_eq!(err, BindError::attribute_not_found("Point", "y"));
        assert!(p.has_attribute("x"));
        assert!(!p.has_attribute("y"));
    }

    #[test]
    fn test_default_set_is_read_only() {
        let p = Point { x: 1 };
        assert_eq!(
            set_attribute(&p, "x", Value::Int(2)).unwrap_err(),
            BindError::read_only("Point", "x")
        );
        assert_eq!(
            set_attribute(&p, "y", Value::Int(2)).unwrap_err(),
            BindError::attribute_not_found("Point", "y")
        );
        assert_eq!(p.x, 1);
    }

    #[test]
    fn test_detached_releases_and_reacquires() {
        struct Spy<'a> {
            lock: &'a CountingLock,
        }

        impl AttributeBag for Spy<'_> {
            fn type_name(&self) -> &str {
                "Spy"
            }
            fn attribute_names(&self) -> &'static [&'static str] {
                &["probe"]
            }
            fn lookup(&self, name: &str) -> Option<Value> {
                let released = !self.lock.held.load(Ordering::SeqCst);
                self.lock.observed_released.store(released, Ordering::SeqCst);
                (name == "probe").then_some(Value::Bool(released))
            }
            fn describe(&self) -> String {
                "Spy()".to_string()
            }
        }

        let lock = CountingLock::new();
        let spy = Spy { lock: &lock };

        assert_eq!(get_attribute_detached(&lock, &spy, "probe").unwrap(), Value::Bool(true));
        assert!(lock.held.load(Ordering::SeqCst));
        assert_eq!(lock.releases.load(Ordering::SeqCst), 1);

        // Error path also reacquires
        assert!(get_attribute_detached(&lock, &spy, "missing").is_err());
        assert!(lock.observed_released.load(Ordering::SeqCst));
        assert!(lock.held.load(Ordering::SeqCst));
        assert_eq!(lock.releases.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_no_lock_matches_plain_lookup() {
        let p = Point { x: -7 };
        assert_eq!(
            get_attribute_detached(&NoInterpreterLock, &p, "x").unwrap(),
            get_attribute(&p, "x").unwrap()
        );
        assert!(get_attribute_detached(&NoInterpreterLock, &p, "z").is_err());
    }
}
