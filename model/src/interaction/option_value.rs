use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar value carried by a command option. The wire format only ever sends
/// JSON scalars here; ids (user/channel/role/mentionable/attachment options)
/// arrive as strings and are resolved elsewhere.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(Box<str>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            OptionValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Boolean(b) => write!(f, "{}", b),
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(Box::from(s))
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Integer(i)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Boolean(b)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scalars() {
        let v: OptionValue = serde_json::from_str("5").unwrap();
        assert_eq!(v, OptionValue::Integer(5));

        let v: OptionValue = serde_json::from_str("5.5").unwrap();
        assert_eq!(v, OptionValue::Number(5.5));

        let v: OptionValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, OptionValue::Boolean(true));

        let v: OptionValue = serde_json::from_str(r#""123456789""#).unwrap();
        assert_eq!(v, OptionValue::String(Box::from("123456789")));
    }
}
