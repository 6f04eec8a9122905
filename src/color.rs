//! Two-valued colour enumeration exported as tagged constants
//!
//! Author: ALICE-BIND contributors

use std::fmt;
use std::str::FromStr;

use crate::attr::AttributeBag;
use crate::error::BindError;
use crate::value::Value;

/// Closed colour enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    /// 0
    Black = 0,
    /// 1
    White = 1,
}

impl Color {
    /// All members in value order
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Member name as exported (`BLACK`, `WHITE`)
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::White => "WHITE",
        }
    }

    /// Integer value
    #[inline]
    pub fn value(self) -> i64 {
        self as i64
    }

    /// Member for an integer value
    pub fn from_value(value: i64) -> Option<Color> {
        Self::ALL.into_iter().find(|c| c.value() == value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color.{}", self.name())
    }
}

impl FromStr for Color {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let member = s.strip_prefix("Color.").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(member))
            .ok_or_else(|| BindError::attribute_not_found("Color", member))
    }
}

impl AttributeBag for Color {
    fn type_name(&self) -> &str {
        "Color"
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        &["name", "value"]
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name())),
            "value" => Some(Value::Int(self.value())),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(Color::Black.value(), 0);
        assert_eq!(Color::White.value(), 1);
        assert_eq!(Color::from_value(1), Some(Color::White));
        assert_eq!(Color::from_value(2), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("BLACK".parse::<Color>().unwrap(), Color::Black);
        assert_eq!("Color.white".parse::<Color>().unwrap(), Color::White);
        assert!("RED".parse::<Color>().is_err());
    }

    #[test]
    fn test_attributes() {
        assert_eq!(Color::White.lookup("name"), Some(Value::from("WHITE")));
        assert_eq!(Color::White.lookup("value"), Some(Value::Int(1)));
        assert_eq!(Color::Black.to_string(), "Color.BLACK");
    }
}
