//! Validated person record
//!
//! `AdultPerson` carries one invariant: the `age` setter never accepts a value
//! below [`MIN_AGE`]. The verbatim constructor does not check it, so a record
//! can start out under-age; [`AdultPerson::is_valid`] reports that case and
//! [`AdultPerson::try_new`] is the checking alternative.
//!
//! [`SharedPerson`] is the form handed out by the module table: a record
//! behind a lock, so `age` can be assigned through a shared object.
//!
//! Author: ALICE-BIND contributors

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::attr::AttributeBag;
use crate::error::{BindError, Result};
use crate::value::Value;

/// Minimum accepted age
pub const MIN_AGE: usize = 18;

/// Person record with an age floor enforced on mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdultPerson {
    age: usize,
    name: String,
}

impl AdultPerson {
    /// Store `age` and `name` verbatim (no validation)
    pub fn new(age: usize, name: impl Into<String>) -> Self {
        AdultPerson {
            age,
            name: name.into(),
        }
    }

    /// Constructor that applies the setter's age check
    pub fn try_new(age: usize, name: impl Into<String>) -> Result<Self> {
        check_age(age)?;
        Ok(Self::new(age, name))
    }

    /// Current age
    #[inline]
    pub fn age(&self) -> usize {
        self.age
    }

    /// Set the age; rejects values below [`MIN_AGE`] and leaves the record unchanged
    pub fn set_age(&mut self, new_age: usize) -> Result<()> {
        check_age(new_age)?;
        self.age = new_age;
        Ok(())
    }

    /// Name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the record currently satisfies the age floor
    pub fn is_valid(&self) -> bool {
        self.age >= MIN_AGE
    }

    /// Greeting line: `Hello, <name>!` or `Hello!`
    pub fn greeting(name: Option<&str>) -> String {
        match name {
            Some(name) => format!("Hello, {}!", name),
            None => "Hello!".to_string(),
        }
    }

    /// Print the greeting line to stdout
    pub fn greet(name: Option<&str>) {
        println!("{}", Self::greeting(name));
    }

    /// `AdultPerson(age=.., name=..)`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

fn check_age(age: usize) -> Result<()> {
    if age < MIN_AGE {
        return Err(BindError::TooYoung { age, min: MIN_AGE });
    }
    Ok(())
}

impl fmt::Display for AdultPerson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdultPerson(age={}, name={})", self.age, self.name)
    }
}

impl AttributeBag for AdultPerson {
    fn type_name(&self) -> &str {
        "AdultPerson"
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        &["age", "name"]
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        match name {
            "age" => Some(Value::from(self.age)),
            "name" => Some(Value::from(self.name.as_str())),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Lock-guarded person record whose `age` attribute is writable
#[derive(Debug)]
pub struct SharedPerson {
    inner: Mutex<AdultPerson>,
}

impl SharedPerson {
    /// Wrap a record
    pub fn new(person: AdultPerson) -> Self {
        SharedPerson {
            inner: Mutex::new(person),
        }
    }

    fn record(&self) -> MutexGuard<'_, AdultPerson> {
        // Mutation happens after validation, so a poisoned record is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current record
    pub fn snapshot(&self) -> AdultPerson {
        self.record().clone()
    }

    /// Validated age assignment
    pub fn set_age(&self, new_age: usize) -> Result<()> {
        self.record().set_age(new_age)
    }
}

impl AttributeBag for SharedPerson {
    fn type_name(&self) -> &str {
        "AdultPerson"
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        &["age", "name"]
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.record().lookup(name)
    }

    fn describe(&self) -> String {
        self.record().describe()
    }

    fn set_attribute(&self, name: &str, value: Value) -> Result<()> {
        match name {
            "age" => self.set_age(value.as_count("age")?),
            "name" => Err(BindError::read_only("AdultPerson", name)),
            _ => Err(BindError::attribute_not_found("AdultPerson", name)),
        }
    }
}
