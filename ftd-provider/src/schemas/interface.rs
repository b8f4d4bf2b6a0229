//! ftd_interface schema
//!
//! Physical interfaces exist on the appliance from the start; configuration
//! adopts one by name and edits it.

use ftd_core::resource::Value;
use ftd_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema};

use super::{id_attribute, type_attribute, version_attribute};

/// MTU accepted by the data plane
pub fn mtu() -> AttributeType {
    AttributeType::Custom {
        name: "Mtu".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| match value {
            Value::Int(n) if (64..=9198).contains(n) => Ok(()),
            Value::Int(n) => Err(format!("MTU {} out of range 64..=9198", n)),
            _ => Err("Expected integer".to_string()),
        },
    }
}

fn ha_address_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(AttributeSchema::new("ipaddress", AttributeType::String).required())
        .attribute(AttributeSchema::new("netmask", AttributeType::String).required())
        .attribute(AttributeSchema::new("standbyipaddress", AttributeType::String))
        .attribute(type_attribute("haipv4address"))
}

fn ipv4_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(
            AttributeSchema::new("iptype", AttributeType::String)
                .required()
                .with_description("STATIC or DHCP"),
        )
        .attribute(AttributeSchema::new("defaultrouteusingdhcp", AttributeType::Bool))
        .attribute(AttributeSchema::new("dhcproutemetric", AttributeType::Int))
        .attribute(
            AttributeSchema::new("ipaddress", AttributeType::list_of(ha_address_block()))
                .optional_computed()
                .with_max_items(1),
        )
        .attribute(AttributeSchema::new("dhcp", AttributeType::Bool).computed())
        .attribute(AttributeSchema::new("addressnull", AttributeType::Bool))
        .attribute(type_attribute("interfaceipv4"))
}

fn defaulted(name: &str, attr_type: AttributeType, default: Value) -> AttributeSchema {
    AttributeSchema::new(name, attr_type).with_default(default)
}

pub fn interface_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_interface")
        .with_description("Physical interface settings")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(AttributeSchema::new("hardwarename", AttributeType::String).computed())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(AttributeSchema::new("monitorinterface", AttributeType::Bool).required())
        .attribute(
            AttributeSchema::new("ipv4", AttributeType::list_of(ipv4_block()))
                .optional_computed()
                .with_max_items(1),
        )
        .attribute(AttributeSchema::new("managementonly", AttributeType::Bool))
        .attribute(AttributeSchema::new("managementinterface", AttributeType::Bool))
        .attribute(defaulted("mode", AttributeType::String, Value::string("ROUTED")))
        .attribute(defaulted("mtu", mtu(), Value::Int(1500)))
        .attribute(defaulted("enabled", AttributeType::Bool, Value::Bool(true)))
        .attribute(AttributeSchema::new("macaddress", AttributeType::String))
        .attribute(AttributeSchema::new("standbymacaddress", AttributeType::String))
        .attribute(AttributeSchema::new("ctsenabled", AttributeType::Bool))
        .attribute(defaulted("fecmode", AttributeType::String, Value::string("AUTO")))
        .attribute(defaulted("speedtype", AttributeType::String, Value::string("AUTO")))
        .attribute(defaulted("duplextype", AttributeType::String, Value::string("AUTO")))
        .attribute(AttributeSchema::new("autoneg", AttributeType::Bool))
        .attribute(AttributeSchema::new("breakoutcapable", AttributeType::Bool))
        .attribute(AttributeSchema::new("present", AttributeType::Bool))
        .attribute(AttributeSchema::new("splitinterface", AttributeType::Bool))
        .attribute(AttributeSchema::new("tengigabitinterface", AttributeType::Bool).computed())
        .attribute(AttributeSchema::new("gigabitinterface", AttributeType::Bool).computed())
        .attribute(type_attribute("physicalinterface"))
}
