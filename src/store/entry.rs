//! Entry structure for key-value pairs

use super::value::{DType, Value};

/// Represents a single entry in the store
///
/// The type tag is derived from the value every time the value changes,
/// so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: String,
    value: Value,
    dtype: DType,
}

impl Entry {
    /// Create a new entry, tagging the value
    pub(crate) fn new(key: impl Into<String>, value: Value) -> Self {
        let dtype = value.dtype();
        Entry {
            key: key.into(),
            value,
            dtype,
        }
    }

    /// The key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Type tag of the current value
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Replace the value in place and recompute the tag
    pub(crate) fn replace(&mut self, value: Value) -> Value {
        self.dtype = value.dtype();
        std::mem::replace(&mut self.value, value)
    }

    /// Consume the entry, returning its value
    pub(crate) fn into_value(self) -> Value {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_tagged() {
        let entry = Entry::new("test_key", Value::from("test_value"));
        assert_eq!(entry.key(), "test_key");
        assert_eq!(entry.value(), &Value::from("test_value"));
        assert_eq!(entry.dtype(), DType::Str);

        assert_eq!(Entry::new("int_key", Value::from(42)).dtype(), DType::Int);
        assert_eq!(Entry::new("float_key", Value::from(3.14)).dtype(), DType::Float);
        assert_eq!(Entry::new("bool_key", Value::from(true)).dtype(), DType::Bool);
        assert_eq!(Entry::new("list_key", Value::from(vec![1, 2, 3])).dtype(), DType::List);
    }

    #[test]
    fn test_replace_updates_tag() {
        let mut entry = Entry::new("type_key", Value::from("string"));
        let old = entry.replace(Value::from(42));

        assert_eq!(old, Value::from("string"));
        assert_eq!(entry.value(), &Value::Integer(42));
        assert_eq!(entry.dtype(), DType::Int);
    }
}
