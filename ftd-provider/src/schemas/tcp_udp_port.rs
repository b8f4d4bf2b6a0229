//! TCP/UDP port object schemas
//!
//! `ftd_tcp_udp_port_user` manages user-defined ports; the
//! `ftd_tcp_udp_port` data source looks up any port, including system ones.

use ftd_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::{enum_type, id_attribute, version_attribute};

/// Port object discriminators
pub const PORT_TYPES: &[&str] = &["tcpportobject", "udpportobject"];

fn port_type() -> AttributeSchema {
    AttributeSchema::new("type", enum_type(PORT_TYPES))
        .required()
        .with_description("tcpportobject or udpportobject")
}

pub fn tcp_udp_port_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_tcp_udp_port_user")
        .with_description("User-defined TCP or UDP port object")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(AttributeSchema::new("issystemdefined", AttributeType::Bool).computed())
        .attribute(
            AttributeSchema::new("port", AttributeType::String)
                .required()
                .with_description("Single port or range, e.g. 8080 or 1000-2000"),
        )
        .attribute(port_type())
}

pub fn tcp_udp_port_data_source_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_tcp_udp_port")
        .with_description("Look up a TCP or UDP port object by name")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new("description", AttributeType::String).computed())
        .attribute(AttributeSchema::new("issystemdefined", AttributeType::Bool).computed())
        .attribute(AttributeSchema::new("port", AttributeType::String).computed())
        .attribute(port_type())
}
