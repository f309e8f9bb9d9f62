//! The dynamic value model.
//!
//! Captured path segments, ambient request entries, handler arguments and
//! handler output are all [`Value`]s. Handlers that want typed arguments go
//! through [`FromValue`].

use crate::params::Params;
use indexmap::IndexMap;
use std::{any::Any, fmt, sync::Arc};

/// A dynamically typed value flowing through a dispatch.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value. Unbound handler parameters receive this.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string. Captured path segments are always strings.
    Str(String),
    /// An ordered list.
    List(Vec<Value>),
    /// An ordered map.
    Map(IndexMap<String, Value>),
    /// An opaque shared object, e.g. the dispatching router.
    Extension(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wrap an arbitrary shared object.
    pub fn extension<T: Any + Send + Sync>(value: T) -> Self {
        Value::Extension(Arc::new(value))
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Read an integer, parsing strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Read a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Downcast an [`Value::Extension`] to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Extension(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// A short name for the kind of value, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Extension(_) => "extension",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Extension(_) => f.write_str("Extension(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Extensions compare by identity.
            (Value::Extension(a), Value::Extension(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            other => write!(f, "{other:?}"),
        }
    }
}

// ============================================================================
// Into Value
// ============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<Params> for Value {
    fn from(v: Params) -> Self {
        Value::Map(v.into_inner())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ============================================================================
// From Value
// ============================================================================

/// Conversion from a pooled [`Value`] into a typed handler argument.
///
/// On failure the rejected value is handed back so the caller can report
/// what was found.
pub trait FromValue: Sized {
    /// Human readable name of the expected type.
    fn expected() -> &'static str;

    /// Attempt the conversion.
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl FromValue for Value {
    fn expected() -> &'static str {
        "any value"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl FromValue for String {
    fn expected() -> &'static str {
        "string"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Str(s) => Ok(s),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(x) => Ok(x.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(other),
        }
    }
}

impl FromValue for i64 {
    fn expected() -> &'static str {
        "integer"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(i) => Ok(i),
            Value::Str(s) => s.trim().parse().map_err(|_| Value::Str(s)),
            other => Err(other),
        }
    }
}

impl FromValue for u64 {
    fn expected() -> &'static str {
        "unsigned integer"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(i) => u64::try_from(i).map_err(|_| Value::Int(i)),
            Value::Str(s) => s.trim().parse().map_err(|_| Value::Str(s)),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    fn expected() -> &'static str {
        "number"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(i) => Ok(i as f64),
            Value::Str(s) => s.trim().parse().map_err(|_| Value::Str(s)),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    fn expected() -> &'static str {
        "boolean"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            Value::Str(s) => {
                let flag = match s.as_str() {
                    "true" | "1" | "on" | "yes" => Some(true),
                    "false" | "0" | "off" | "no" | "" => Some(false),
                    _ => None,
                };
                flag.ok_or(Value::Str(s))
            }
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn expected() -> &'static str {
        T::expected()
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn expected() -> &'static str {
        "list"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(other),
        }
    }
}

impl FromValue for Params {
    fn expected() -> &'static str {
        "map"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Map(map) => Ok(Params::from(map)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversions() {
        assert_eq!(String::from_value(Value::from("42")), Ok("42".to_string()));
        assert_eq!(String::from_value(Value::Int(7)), Ok("7".to_string()));
        assert!(String::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_integer_parses_captured_segments() {
        assert_eq!(i64::from_value(Value::from("42")), Ok(42));
        assert_eq!(i64::from_value(Value::from("x")), Err(Value::from("x")));
        assert_eq!(u64::from_value(Value::Int(-1)), Err(Value::Int(-1)));
    }

    #[test]
    fn test_option_maps_null_to_none() {
        assert_eq!(Option::<i64>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<i64>::from_value(Value::from("3")), Ok(Some(3)));
    }

    #[test]
    fn test_bool_accepts_form_values() {
        assert_eq!(bool::from_value(Value::from("on")), Ok(true));
        assert_eq!(bool::from_value(Value::from("0")), Ok(false));
        assert!(bool::from_value(Value::from("maybe")).is_err());
    }

    #[test]
    fn test_extension_identity_and_downcast() {
        let a = Value::extension(5u8);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Value::extension(5u8));
        assert_eq!(a.downcast_ref::<u8>(), Some(&5));
        assert_eq!(a.downcast_ref::<u16>(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Null.to_string(), "");
    }
}
