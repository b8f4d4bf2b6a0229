//! Typed access to attribute maps
//!
//! Configuration has already been validated against the schema when the
//! builders run, so shape errors here indicate state written by something
//! else. They surface as `ErrorKind::Decode` instead of panicking.

use std::collections::HashMap;

use ftd_core::provider::{ProviderError, ProviderResult};
use ftd_core::resource::Value;

/// Reader over one attribute map, remembering its path for error messages
#[derive(Debug, Clone, Copy)]
pub struct AttributeReader<'a> {
    attributes: &'a HashMap<String, Value>,
    path: &'a str,
}

impl<'a> AttributeReader<'a> {
    pub fn new(attributes: &'a HashMap<String, Value>) -> Self {
        Self {
            attributes,
            path: "",
        }
    }

    fn mismatch(&self, key: &str, expected: &str, got: &Value) -> ProviderError {
        ProviderError::decode(format!(
            "attribute '{}{}': expected {}, got {}",
            self.path,
            key,
            expected,
            got.type_name()
        ))
    }

    /// Raw value, if present
    pub fn value(&self, key: &str) -> Option<&'a Value> {
        self.attributes.get(key)
    }

    /// String value; absent reads as empty
    pub fn string(&self, key: &str) -> ProviderResult<String> {
        Ok(self.optional_string(key)?.unwrap_or_default())
    }

    pub fn optional_string(&self, key: &str) -> ProviderResult<Option<String>> {
        match self.attributes.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(key, "String", other)),
        }
    }

    /// String value that must be present
    pub fn required_string(&self, key: &str) -> ProviderResult<String> {
        self.optional_string(key)?.ok_or_else(|| {
            ProviderError::decode(format!("attribute '{}{}' is required", self.path, key))
        })
    }

    /// Boolean value; absent reads as false
    pub fn bool(&self, key: &str) -> ProviderResult<bool> {
        match self.attributes.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.mismatch(key, "Bool", other)),
        }
    }

    /// Integer value; absent reads as zero
    pub fn int(&self, key: &str) -> ProviderResult<i64> {
        Ok(self.optional_int(key)?.unwrap_or_default())
    }

    pub fn optional_int(&self, key: &str) -> ProviderResult<Option<i64>> {
        match self.attributes.get(key) {
            None => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(self.mismatch(key, "Int", other)),
        }
    }

    /// Nested blocks of a list or set attribute; absent reads as none
    pub fn blocks(&self, key: &str) -> ProviderResult<Vec<NestedReader<'a>>> {
        let items = match self.attributes.get(key) {
            None => return Ok(Vec::new()),
            Some(value) => value
                .as_items()
                .ok_or_else(|| self.mismatch(key, "List", value))?,
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Map(map) => Ok(NestedReader {
                    attributes: map,
                    path: format!("{}{}[{}].", self.path, key, index),
                }),
                other => Err(self.mismatch(key, "List of blocks", other)),
            })
            .collect()
    }

    /// First nested block of a single-block attribute
    pub fn block(&self, key: &str) -> ProviderResult<Option<NestedReader<'a>>> {
        Ok(self.blocks(key)?.into_iter().next())
    }
}

/// Owns the path of a nested block so readers can borrow it
#[derive(Debug, Clone)]
pub struct NestedReader<'a> {
    attributes: &'a HashMap<String, Value>,
    path: String,
}

impl<'a> NestedReader<'a> {
    pub fn reader(&self) -> AttributeReader<'_> {
        AttributeReader {
            attributes: self.attributes,
            path: &self.path,
        }
    }
}

/// Insert `value` under `key` when present
pub fn insert_some(attributes: &mut HashMap<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        attributes.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftd_core::provider::ErrorKind;

    fn attrs() -> HashMap<String, Value> {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::string("inside"));
        attrs.insert("mtu".to_string(), Value::Int(1500));
        attrs.insert("enabled".to_string(), Value::Bool(true));
        attrs.insert(
            "users".to_string(),
            Value::List(vec![Value::map([("name", Value::Int(3))])]),
        );
        attrs
    }

    #[test]
    fn reads_typed_values() {
        let attrs = attrs();
        let reader = AttributeReader::new(&attrs);
        assert_eq!(reader.string("name").unwrap(), "inside");
        assert_eq!(reader.int("mtu").unwrap(), 1500);
        assert!(reader.bool("enabled").unwrap());
    }

    #[test]
    fn absent_values_read_as_zero() {
        let attrs = HashMap::new();
        let reader = AttributeReader::new(&attrs);
        assert_eq!(reader.string("description").unwrap(), "");
        assert_eq!(reader.int("mtu").unwrap(), 0);
        assert!(!reader.bool("enabled").unwrap());
        assert!(reader.blocks("users").unwrap().is_empty());
        assert!(reader.block("ipv4").unwrap().is_none());
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        let attrs = attrs();
        let reader = AttributeReader::new(&attrs);
        let err = reader.bool("name").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert_eq!(err.message, "attribute 'name': expected Bool, got String");
    }

    #[test]
    fn nested_errors_carry_path() {
        let attrs = attrs();
        let reader = AttributeReader::new(&attrs);
        let users = reader.blocks("users").unwrap();
        let err = users[0].reader().string("name").unwrap_err();
        assert_eq!(
            err.message,
            "attribute 'users[0].name': expected String, got Int"
        );
    }

    #[test]
    fn missing_required_string() {
        let attrs = HashMap::new();
        let err = AttributeReader::new(&attrs)
            .required_string("accesspolicyid")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }
}
