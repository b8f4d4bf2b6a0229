//! Resource - Representing resources and their state

use std::collections::HashMap;

/// Unique identifier for a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource type (e.g., "ftd_security_zone", "ftd_access_rule")
    pub resource_type: String,
    /// Resource name (local label chosen by the user)
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

/// Attribute value of a resource
///
/// Nested blocks are represented as a `List` (or `Set`) of `Map`s, the same
/// shape Terraform uses for block attributes in state.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    /// Unordered collection; equality ignores element order
    Set(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                // Each element must pair with a distinct one on the other side
                let mut unmatched: Vec<&Value> = b.iter().collect();
                a.iter().all(|x| match unmatched.iter().position(|y| *y == x) {
                    Some(pos) => {
                        unmatched.swap_remove(pos);
                        true
                    }
                    None => false,
                })
            }
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Build a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Build a map value from key/value pairs
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Items of a `List` or `Set`, in iteration order
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Set(_) => "Set".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }

    /// Convert a JSON value into a state value. `null` has no state
    /// representation and yields `None`; numbers must fit an `i64`.
    pub fn from_json(value: &serde_json::Value) -> Result<Option<Value>, ConversionError> {
        let value = match value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => return Err(ConversionError::NotAnInteger(n.to_string())),
            },
            serde_json::Value::Array(arr) => {
                let mut items = Vec::with_capacity(arr.len());
                for (index, item) in arr.iter().enumerate() {
                    if let Some(item) = Value::from_json(item).map_err(|e| e.at(index))? {
                        items.push(item);
                    }
                }
                Value::List(items)
            }
            serde_json::Value::Object(obj) => Value::Map(attributes_from_json(obj)?),
        };
        Ok(Some(value))
    }

    /// Convert this value to JSON. Sets become arrays.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) | Value::Set(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// JSON that has no state representation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("{0} is not a 64-bit integer")]
    NotAnInteger(String),

    #[error("attribute '{key}': {inner}")]
    Attribute {
        key: String,
        inner: Box<ConversionError>,
    },
}

impl ConversionError {
    fn within(self, key: impl Into<String>) -> Self {
        ConversionError::Attribute {
            key: key.into(),
            inner: Box::new(self),
        }
    }

    fn at(self, index: usize) -> Self {
        self.within(format!("[{}]", index))
    }
}

/// Convert a JSON object into an attribute map, dropping `null` entries
pub fn attributes_from_json(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<HashMap<String, Value>, ConversionError> {
    let mut attributes = HashMap::with_capacity(object.len());
    for (key, value) in object {
        if let Some(value) = Value::from_json(value).map_err(|e| e.within(key.as_str()))? {
            attributes.insert(key.clone(), value);
        }
    }
    Ok(attributes)
}

/// Convert an attribute map into a JSON object
pub fn attributes_to_json(
    attributes: &HashMap<String, Value>,
) -> serde_json::Map<String, serde_json::Value> {
    attributes
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

/// Desired state declared in configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub attributes: HashMap<String, Value>,
    /// If true, this is a data source (read-only) that won't be modified
    pub read_only: bool,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(resource_type, name),
            attributes: HashMap::new(),
            read_only: false,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_attributes(mut self, attributes: HashMap<String, Value>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Returns true if this resource is a data source (read-only)
    pub fn is_data_source(&self) -> bool {
        self.read_only
    }
}

/// Current state fetched from the appliance
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: ResourceId,
    /// Server-assigned object identifier
    pub identifier: Option<String>,
    pub attributes: HashMap<String, Value>,
    /// Whether this state exists
    pub exists: bool,
}

impl State {
    pub fn not_found(id: ResourceId) -> Self {
        Self {
            id,
            identifier: None,
            attributes: HashMap::new(),
            exists: false,
        }
    }

    pub fn existing(id: ResourceId, attributes: HashMap<String, Value>) -> Self {
        Self {
            id,
            identifier: None,
            attributes,
            exists: true,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Look up a string attribute
    pub fn string(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}
