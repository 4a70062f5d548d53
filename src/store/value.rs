//! Value types for the key-value store

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Type tag recorded next to every value
///
/// The tag names are the ones written to the `dtype` attribute of the
/// storage document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Str,
    Int,
    Float,
    Bool,
    Dict,
    List,
    Tuple,
    NoneType,
}

impl DType {
    /// Tag name as written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Str => "str",
            DType::Int => "int",
            DType::Float => "float",
            DType::Bool => "bool",
            DType::Dict => "dict",
            DType::List => "list",
            DType::Tuple => "tuple",
            DType::NoneType => "NoneType",
        }
    }

    /// Parse a tag name, returns None for unknown tags
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "str" => Some(DType::Str),
            "int" => Some(DType::Int),
            "float" => Some(DType::Float),
            "bool" => Some(DType::Bool),
            "dict" => Some(DType::Dict),
            "list" => Some(DType::List),
            "tuple" => Some(DType::Tuple),
            "NoneType" => Some(DType::NoneType),
            _ => None,
        }
    }

    /// Whether values with this tag are stored as a nested payload
    pub fn is_container(&self) -> bool {
        matches!(self, DType::Dict | DType::List | DType::Tuple)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the different types of values that can be stored
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text value
    Str(String),

    /// Integer value
    Integer(i64),

    /// Floating point value
    Float(f64),

    /// Boolean value
    Bool(bool),

    /// Absence of a value
    Null,

    /// Ordered list of values
    List(Vec<Value>),

    /// Map of text keys to values (iteration order is key order)
    Map(BTreeMap<String, Value>),

    /// Fixed-size ordered tuple of values
    Tuple(Vec<Value>),
}

impl Value {
    /// Create a tuple value
    pub fn tuple(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Create a list value
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Get the type tag of this value
    pub fn dtype(&self) -> DType {
        match self {
            Value::Str(_) => DType::Str,
            Value::Integer(_) => DType::Int,
            Value::Float(_) => DType::Float,
            Value::Bool(_) => DType::Bool,
            Value::Null => DType::NoneType,
            Value::List(_) => DType::List,
            Value::Map(_) => DType::Dict,
            Value::Tuple(_) => DType::Tuple,
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as list reference
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Try to get as map reference
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get as tuple reference
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Check that the value survives a save/load round-trip
    ///
    /// Container contents travel as a JSON payload, which has no tuple type
    /// and no representation for NaN or infinities.
    pub fn check_persistable(&self) -> Result<(), String> {
        match self {
            Value::List(items) | Value::Tuple(items) => {
                items.iter().try_for_each(check_nested)
            }
            Value::Map(map) => map.values().try_for_each(check_nested),
            _ => Ok(()),
        }
    }
}

fn check_nested(value: &Value) -> Result<(), String> {
    match value {
        Value::Tuple(_) => Err("tuples cannot be nested inside a container".to_string()),
        Value::Float(f) if !f.is_finite() => {
            Err(format!("non-finite float {} cannot be nested inside a container", f))
        }
        Value::List(items) => items.iter().try_for_each(check_nested),
        Value::Map(map) => map.values().try_for_each(check_nested),
        _ => Ok(()),
    }
}

/// Text form of a float that always reads back as a float
fn format_float(f: f64) -> String {
    // Debug keeps a fractional part on integral values (3.0, not 3)
    format!("{:?}", f)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Null => f.write_str("None"),
            Value::List(items) => write_seq(f, "[", items, "]"),
            Value::Tuple(items) => {
                if items.len() == 1 {
                    write_seq(f, "(", items, ",)")
                } else {
                    write_seq(f, "(", items, ")")
                }
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: ", k)?;
                    write_item(f, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str(close)
}

// Strings inside containers are quoted
fn write_item(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "{:?}", s),
        other => write!(f, "{}", other),
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(map: HashMap<String, T>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_follows_variant() {
        assert_eq!(Value::from("x").dtype(), DType::Str);
        assert_eq!(Value::from(42).dtype(), DType::Int);
        assert_eq!(Value::from(3.14).dtype(), DType::Float);
        assert_eq!(Value::from(true).dtype(), DType::Bool);
        assert_eq!(Value::Null.dtype(), DType::NoneType);
        assert_eq!(Value::from(vec![1, 2, 3]).dtype(), DType::List);
        assert_eq!(Value::from((1, 2, "three")).dtype(), DType::Tuple);

        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1);
        assert_eq!(Value::from(map).dtype(), DType::Dict);
    }

    #[test]
    fn test_tag_names() {
        for dtype in [
            DType::Str,
            DType::Int,
            DType::Float,
            DType::Bool,
            DType::Dict,
            DType::List,
            DType::Tuple,
            DType::NoneType,
        ] {
            assert_eq!(DType::from_tag(dtype.as_str()), Some(dtype));
        }
        assert_eq!(DType::from_tag("set"), None);
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(Value::from(false).to_string(), "False");
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::from(3.0).to_string(), "3.0");
        assert_eq!(Value::from(45.67).to_string(), "45.67");
        assert_eq!(Value::from(-7).to_string(), "-7");
    }

    #[test]
    fn test_display_containers() {
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), r#"["a", "b"]"#);
        assert_eq!(Value::from((1, 2, "x")).to_string(), r#"(1, 2, "x")"#);
        assert_eq!(Value::tuple(vec![1]).to_string(), "(1,)");
        assert_eq!(Value::list(vec![1.5, 2.0]).to_string(), "[1.5, 2.0]");
    }

    #[test]
    fn test_option_maps_none_to_null() {
        let none: Option<i64> = None;
        assert!(Value::from(none).is_null());
        assert_eq!(Value::from(Some(5)), Value::Integer(5));
    }

    #[test]
    fn test_check_persistable() {
        assert!(Value::from((1, 2, "x")).check_persistable().is_ok());
        assert!(Value::from(vec![vec![1, 2], vec![3]]).check_persistable().is_ok());
        assert!(Value::Float(f64::NAN).check_persistable().is_ok());

        let nested_tuple = Value::List(vec![Value::from((1, 2))]);
        assert!(nested_tuple.check_persistable().is_err());

        let nested_nan = Value::List(vec![Value::Float(f64::INFINITY)]);
        assert!(nested_nan.check_persistable().is_err());
    }
}
