//! Schema - Define type schemas for resources
//!
//! Providers define schemas for each resource type and data source,
//! enabling defaults and type validation before any remote call is made.

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// Ordered list
    List(Box<AttributeType>),
    /// Unordered set
    Set(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// Nested block with its own attributes
    Block(BlockSchema),
}

impl AttributeType {
    /// List of nested blocks
    pub fn list_of(block: BlockSchema) -> Self {
        AttributeType::List(Box::new(AttributeType::Block(block)))
    }

    /// Set of nested blocks
    pub fn set_of(block: BlockSchema) -> Self {
        AttributeType::Set(Box::new(AttributeType::Block(block)))
    }

    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, base, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            // Configuration files cannot express sets, so lists are accepted for set types
            (AttributeType::List(inner), Value::List(items))
            | (AttributeType::Set(inner), Value::List(items) | Value::Set(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Block(block), Value::Map(map)) => match block.validate(map) {
                Ok(()) => Ok(()),
                // Report the first nested error; the caller gets the full path
                Err(mut errors) => Err(errors.remove(0)),
            },

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    /// Convert lists into sets where the schema declares a set, optionally
    /// filling in defaults of nested blocks
    fn normalize(&self, value: Value, with_defaults: bool) -> Value {
        match (self, value) {
            (AttributeType::Set(inner), Value::List(items) | Value::Set(items)) => Value::Set(
                items
                    .into_iter()
                    .map(|v| inner.normalize(v, with_defaults))
                    .collect(),
            ),
            (AttributeType::List(inner), Value::List(items)) => Value::List(
                items
                    .into_iter()
                    .map(|v| inner.normalize(v, with_defaults))
                    .collect(),
            ),
            (AttributeType::Block(block), Value::Map(mut map)) => {
                normalize_attributes(&block.attributes, &mut map, with_defaults);
                Value::Map(map)
            }
            (_, v) => v,
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Set(inner) => format!("Set<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Block(_) => "Block".to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Attribute '{name}' is computed and cannot be set")]
    ComputedAttribute { name: String },

    #[error("Attribute '{name}' allows at most {max} item(s), got {got}")]
    TooManyItems { name: String, max: usize, got: usize },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Populated by the remote system
    pub computed: bool,
    /// Value is redacted when displayed
    pub sensitive: bool,
    pub max_items: Option<usize>,
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            optional: true,
            computed: false,
            sensitive: false,
            max_items: None,
            default: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Read-only attribute, set only by the remote system
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    /// Attribute that may be configured but is filled in remotely otherwise
    pub fn optional_computed(mut self) -> Self {
        self.computed = true;
        self.optional = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Attribute that configuration may not set
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    fn validate_value(&self, value: &Value) -> Result<(), TypeError> {
        if self.is_read_only() {
            return Err(TypeError::ComputedAttribute {
                name: self.name.clone(),
            });
        }
        if let (Some(max), Some(items)) = (self.max_items, value.as_items())
            && items.len() > max
        {
            return Err(TypeError::TooManyItems {
                name: self.name.clone(),
                max,
                got: items.len(),
            });
        }
        self.attr_type
            .validate(value)
            .map_err(|e| TypeError::AttributeError {
                name: self.name.clone(),
                inner: Box::new(e),
            })
    }
}

/// Attributes of a nested block
#[derive(Debug, Clone, Default)]
pub struct BlockSchema {
    pub attributes: HashMap<String, AttributeSchema>,
}

impl BlockSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    /// Fill in defaults for missing attributes, recursing into nested blocks
    pub fn apply_defaults(&self, attributes: &mut HashMap<String, Value>) {
        normalize_attributes(&self.attributes, attributes, true);
    }

    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        validate_attributes(&self.attributes, attributes)
    }
}

fn normalize_attributes(
    schemas: &HashMap<String, AttributeSchema>,
    attributes: &mut HashMap<String, Value>,
    with_defaults: bool,
) {
    for (name, schema) in schemas {
        match attributes.remove(name) {
            Some(value) => {
                let value = schema.attr_type.normalize(value, with_defaults);
                attributes.insert(name.clone(), value);
            }
            None => {
                if with_defaults && let Some(default) = &schema.default {
                    attributes.insert(name.clone(), default.clone());
                }
            }
        }
    }
}

fn validate_attributes(
    schemas: &HashMap<String, AttributeSchema>,
    attributes: &HashMap<String, Value>,
) -> Result<(), Vec<TypeError>> {
    let mut errors = Vec::new();

    // Check required attributes
    for (name, schema) in schemas {
        if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
            errors.push(TypeError::MissingRequired { name: name.clone() });
        }
    }

    // Type check each attribute
    for (name, value) in attributes {
        if let Some(schema) = schemas.get(name)
            && let Err(e) = schema.validate_value(value)
        {
            errors.push(e);
        }
        // Unknown attributes are allowed (for flexibility)
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Fill in defaults and normalize collection shapes
    pub fn apply_defaults(&self, attributes: &mut HashMap<String, Value>) {
        normalize_attributes(&self.attributes, attributes, true);
    }

    /// Normalize collection shapes of state read back from the remote system
    pub fn normalize(&self, attributes: &mut HashMap<String, Value>) {
        normalize_attributes(&self.attributes, attributes, false);
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        validate_attributes(&self.attributes, attributes)
    }

    /// Names of attributes populated by the remote system
    pub fn computed_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .values()
            .filter(|a| a.computed)
            .map(|a| a.name.as_str())
    }

    /// Attribute names in a stable order, for display
    pub fn sorted_attributes(&self) -> Vec<&AttributeSchema> {
        let mut attrs: Vec<_> = self.attributes.values().collect();
        attrs.sort_by(|a, b| a.name.cmp(&b.name));
        attrs
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Positive integer type
    pub fn positive_int() -> AttributeType {
        AttributeType::Custom {
            name: "PositiveInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| {
                if let Value::Int(n) = value {
                    if *n > 0 {
                        Ok(())
                    } else {
                        Err("Value must be positive".to_string())
                    }
                } else {
                    Err("Expected integer".to_string())
                }
            },
        }
    }

    /// List of strings
    pub fn string_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::String))
    }
}
