//! ftd_network_object schema

use ftd_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::{enum_type, id_attribute, type_attribute, version_attribute};

/// Accepted values of `subtype`
pub const SUB_TYPES: &[&str] = &["HOST", "NETWORK", "FQDN", "RANGE"];

const DNS_RESOLUTIONS: &[&str] = &["IPV4_ONLY", "IPV6_ONLY", "IPV4_AND_IPV6"];

pub fn network_object_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_network_object")
        .with_description("Host, network, FQDN or range object")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(AttributeSchema::new("subtype", enum_type(SUB_TYPES)).required())
        .attribute(AttributeSchema::new("value", AttributeType::String).required())
        .attribute(
            AttributeSchema::new("dnsresolution", enum_type(DNS_RESOLUTIONS))
                .with_description("Only meaningful for FQDN objects"),
        )
        .attribute(type_attribute("networkobject"))
}
