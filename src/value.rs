//! Dynamic values crossing the registration table
//!
//! `Value` is the small dynamic type the module table speaks. It mirrors the
//! shapes a scripting runtime hands across the boundary: scalars, text,
//! sequences, string-keyed maps, opaque objects and callables.
//!
//! Author: ALICE-BIND contributors

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::attr::AttributeBag;
use crate::error::{BindError, Result};

/// Native function signature stored in a [`Callable`]
pub type NativeFn = dyn Fn(Vec<Value>) -> Result<Value> + Send + Sync;

/// Shared, named callable value
#[derive(Clone)]
pub struct Callable {
    name: String,
    func: Arc<NativeFn>,
}

impl Callable {
    /// Wrap a closure as a callable value
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        Callable {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Callable name (used in diagnostics)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with positional arguments
    pub fn call(&self, args: Vec<Value>) -> Result<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// Dynamic value
#[derive(Clone, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    None,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`; smaller values are always `Int`
    UInt(u64),
    /// Real number
    Float(f64),
    /// Text
    Str(String),
    /// Sequence
    List(Vec<Value>),
    /// String-keyed mapping, ordered by key
    Map(BTreeMap<String, Value>),
    /// Opaque object exposing an attribute table
    Object(Arc<dyn AttributeBag>),
    /// Function value
    Callable(Callable),
}

impl Value {
    /// Scripting-side type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "dict",
            Value::Object(_) => "object",
            Value::Callable(_) => "function",
        }
    }

    /// Wrap a native object
    pub fn object<T: AttributeBag + 'static>(obj: T) -> Self {
        Value::Object(Arc::new(obj))
    }

    /// True for `Value::None`
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Integer argument
    pub fn as_int(&self, argument: &str) -> Result<i64> {
        match self {
            Value::Int(v) => Ok(*v),
            Value::UInt(_) => Err(BindError::Overflow("int argument")),
            other => Err(mismatch(argument, "int", other)),
        }
    }

    /// Real argument; integers widen
    pub fn as_float(&self, argument: &str) -> Result<f64> {
        match self {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            Value::UInt(v) => Ok(*v as f64),
            other => Err(mismatch(argument, "float", other)),
        }
    }

    /// Non-negative integer argument
    pub fn as_count(&self, argument: &str) -> Result<usize> {
        match self {
            Value::Int(v) => usize::try_from(*v).map_err(|_| BindError::TypeMismatch {
                argument: argument.to_string(),
                expected: "non-negative int",
                found: "negative int",
            }),
            Value::UInt(v) => usize::try_from(*v).map_err(|_| BindError::Overflow("count argument")),
            other => Err(mismatch(argument, "non-negative int", other)),
        }
    }

    /// Text argument
    pub fn as_str(&self, argument: &str) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(mismatch(argument, "str", other)),
        }
    }

    /// Optional text argument (`None` maps to `None`)
    pub fn as_opt_str(&self, argument: &str) -> Result<Option<&str>> {
        match self {
            Value::None => Ok(None),
            other => other.as_str(argument).map(Some),
        }
    }

    /// Object argument
    pub fn as_object(&self, argument: &str) -> Result<&Arc<dyn AttributeBag>> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(mismatch(argument, "object", other)),
        }
    }

    /// Callable argument
    pub fn as_callable(&self, argument: &str) -> Result<&Callable> {
        match self {
            Value::Callable(c) => Ok(c),
            other => Err(mismatch(argument, "callable", other)),
        }
    }

    /// Sequence of reals; integers widen
    pub fn as_float_list(&self, argument: &str) -> Result<Vec<f64>> {
        match self {
            Value::List(items) => items.iter().map(|v| v.as_float(argument)).collect(),
            other => Err(mismatch(argument, "list of float", other)),
        }
    }

    /// Scripting-style representation (`'text'`, `[1, 2]`, `{'a': 1}`)
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(v) => v.to_string(),
            Value::UInt(v) => v.to_string(),
            Value::Float(v) => format!("{:?}", v),
            Value::Str(s) => format!("'{}'", s),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(map) => {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("'{}': {}", k, v.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Object(obj) => obj.describe(),
            Value::Callable(c) => format!("{:?}", c),
        }
    }
}

fn mismatch(argument: &str, expected: &'static str, found: &Value) -> BindError {
    BindError::TypeMismatch {
        argument: argument.to_string(),
        expected,
        found: found.type_name(),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

/// Text prints bare, everything else prints its repr
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => f.write_str(&other.repr()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Opaque values compare by identity
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const u8, Arc::as_ptr(b) as *const u8)
            }
            (Value::Callable(a), Value::Callable(b)) => Arc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Object(_) | Value::Callable(_) => serializer.serialize_str(&self.repr()),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::UInt(v),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Callable> for Value {
    fn from(v: Callable) -> Self {
        Value::Callable(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

// ============================================================================
// Literal parsing
// ============================================================================

impl Value {
    /// Parse a command-line literal
    ///
    /// `None`, `true`/`false`, integers, reals and JSON lists/objects are
    /// recognised; anything else is text.
    pub fn parse_literal(text: &str) -> Value {
        let trimmed = text.trim();
        match trimmed {
            "None" | "null" => return Value::None,
            "true" | "True" => return Value::Bool(true),
            "false" | "False" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Value::Int(v);
        }
        if let Ok(v) = trimmed.parse::<u64>() {
            return Value::UInt(v);
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return Value::Float(v);
        }
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
                return Value::from(json);
            }
        }
        Value::Str(text.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::UInt(u),
                _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repr() {
        assert_eq!(Value::from(vec![0.0, 1.5]).repr(), "[0.0, 1.5]");
        assert_eq!(Value::from("x").repr(), "'x'");
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::Bool(true).repr(), "True");
        assert_eq!(Value::None.repr(), "None");

        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 2usize);
        map.insert("a".to_string(), 1usize);
        assert_eq!(Value::from(map).repr(), "{'a': 1, 'b': 2}");
    }

    #[test]
    fn test_coercions() {
        assert_eq!(Value::Int(3).as_float("a").unwrap(), 3.0);
        assert!(Value::Float(3.0).as_int("a").is_err());
        assert_eq!(Value::Int(5).as_count("n").unwrap(), 5);

        let err = Value::Int(-1).as_count("n").unwrap_err();
        assert!(matches!(err, BindError::TypeMismatch { found: "negative int", .. }));

        assert_eq!(Value::None.as_opt_str("name").unwrap(), None);
        assert_eq!(Value::from("Ann").as_opt_str("name").unwrap(), Some("Ann"));
        assert!(Value::Int(1).as_opt_str("name").is_err());
    }

    #[test]
    fn test_full_unsigned_range() {
        assert_eq!(Value::from(7usize), Value::Int(7));
        assert_eq!(Value::from(i64::MAX as usize), Value::Int(i64::MAX));

        let max = Value::from(u64::MAX);
        assert_eq!(max, Value::UInt(u64::MAX));
        assert_eq!(max.repr(), "18446744073709551615");
        assert_eq!(max.type_name(), "int");
        assert_eq!(max.as_count("n").unwrap() as u64, u64::MAX);
        assert_eq!(max.as_int("a").unwrap_err(), BindError::Overflow("int argument"));
        assert_eq!(serde_json::to_string(&max).unwrap(), "18446744073709551615");
        assert_eq!(Value::parse_literal("18446744073709551615"), max);
    }

    #[test]
    fn test_float_list() {
        let v = Value::List(vec![Value::Int(1), Value::Float(2.5)]);
        assert_eq!(v.as_float_list("r").unwrap(), vec![1.0, 2.5]);

        let bad = Value::List(vec![Value::from("x")]);
        assert!(bad.as_float_list("r").is_err());
    }

    #[test]
    fn test_serialize_json() {
        let v = Value::List(vec![Value::Int(1), Value::None, Value::from("s")]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,null,"s"]"#);
    }

    #[test]
    fn test_callable_identity() {
        let c = Callable::new("id", |args| Ok(args.into_iter().next().unwrap_or_default()));
        let a = Value::from(c.clone());
        let b = Value::from(c);
        assert_eq!(a, b);
        assert_eq!(a.repr(), "<function id>");
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(Value::parse_literal("3"), Value::Int(3));
        assert_eq!(Value::parse_literal("-2.5"), Value::Float(-2.5));
        assert_eq!(Value::parse_literal("True"), Value::Bool(true));
        assert_eq!(Value::parse_literal("None"), Value::None);
        assert_eq!(Value::parse_literal("Ann"), Value::from("Ann"));
        assert_eq!(
            Value::parse_literal("[1, 2.5]"),
            Value::List(vec![Value::Int(1), Value::Float(2.5)])
        );
        // Malformed JSON stays text
        assert_eq!(Value::parse_literal("[1,"), Value::from("[1,"));
    }
}
