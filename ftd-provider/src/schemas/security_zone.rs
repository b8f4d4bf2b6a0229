//! ftd_security_zone schema

use ftd_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::{id_attribute, references, type_attribute, version_attribute};

pub fn security_zone_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_security_zone")
        .with_description("Security zone grouping interfaces")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(
            AttributeSchema::new("mode", AttributeType::String)
                .required()
                .with_description("ROUTED, PASSIVE, SWITCHPORT or BRIDGEGROUPMEMBER"),
        )
        .attribute(references("interfaces"))
        .attribute(type_attribute("securityzone"))
}
