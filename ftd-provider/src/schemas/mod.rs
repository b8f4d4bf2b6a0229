//! Schema declarations for FTD resources and data sources
//!
//! Attribute names are lower-case without separators, mirroring the device's
//! camelCase field names.

pub mod access_policy;
pub mod access_rule;
pub mod application;
pub mod application_filter;
pub mod interface;
pub mod network_object;
pub mod security_zone;
pub mod tcp_udp_port;

use ftd_core::resource::Value;
use ftd_core::schema::{AttributeSchema, AttributeType, BlockSchema};

/// `{id, type, name}` pointer to another device object
pub fn reference_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(AttributeSchema::new("id", AttributeType::String).required())
        .attribute(AttributeSchema::new("type", AttributeType::String).required())
        .attribute(AttributeSchema::new("name", AttributeType::String))
}

/// Reference whose `type` may be omitted in configuration
pub fn reference_block_with_default_type(kind: &str) -> BlockSchema {
    BlockSchema::new()
        .attribute(AttributeSchema::new("id", AttributeType::String).required())
        .attribute(
            AttributeSchema::new("type", AttributeType::String).with_default(Value::string(kind)),
        )
        .attribute(AttributeSchema::new("name", AttributeType::String))
}

/// Optional ordered list of references
pub fn references(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::list_of(reference_block()))
}

/// Optional single reference, held as a one-element list
pub fn single_reference(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::list_of(reference_block())).with_max_items(1)
}

/// Server-assigned object id
pub fn id_attribute() -> AttributeSchema {
    AttributeSchema::new("id", AttributeType::String)
        .computed()
        .with_description("Object ID assigned by the device")
}

/// Optimistic-concurrency token echoed on update
pub fn version_attribute() -> AttributeSchema {
    AttributeSchema::new("version", AttributeType::String).computed()
}

/// Object discriminator with its usual value as default
pub fn type_attribute(default: &str) -> AttributeSchema {
    AttributeSchema::new("type", AttributeType::String).with_default(Value::string(default))
}

fn enum_type(values: &[&str]) -> AttributeType {
    AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
}

/// Application filter condition, shared by access rules and application filters
///
/// `collection` decides whether the nested collections are lists or sets.
pub fn condition_block(collection: fn(BlockSchema) -> AttributeType) -> BlockSchema {
    let risk = BlockSchema::new()
        .attribute(AttributeSchema::new("risk", AttributeType::String).required())
        .attribute(type_attribute("riskcondition"));
    let productivity = BlockSchema::new()
        .attribute(AttributeSchema::new("productivity", AttributeType::String).required())
        .attribute(type_attribute("productivitycondition"));
    let application_type = BlockSchema::new()
        .attribute(AttributeSchema::new("applicationtype", AttributeType::String).required())
        .attribute(type_attribute("typecondition"));

    BlockSchema::new()
        .attribute(AttributeSchema::new("risks", collection(risk)))
        .attribute(AttributeSchema::new("productivities", collection(productivity)))
        .attribute(AttributeSchema::new(
            "tags",
            collection(reference_block_with_default_type("ApplicationTag")),
        ))
        .attribute(AttributeSchema::new(
            "categories",
            collection(reference_block_with_default_type("ApplicationCategory")),
        ))
        .attribute(AttributeSchema::new("filter", AttributeType::String))
        .attribute(AttributeSchema::new(
            "applicationtypes",
            collection(application_type),
        ))
        .attribute(type_attribute("applicationfiltercondition"))
}
