//! ftd_access_policy schema

use ftd_core::resource::Value;
use ftd_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema};

use super::{id_attribute, single_reference, type_attribute, version_attribute};

fn default_action_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(
            AttributeSchema::new("action", AttributeType::String)
                .required()
                .with_description("PERMIT or DENY"),
        )
        .attribute(
            AttributeSchema::new("eventlogaction", AttributeType::String)
                .with_default(Value::string("LOG_NONE")),
        )
        .attribute(single_reference("intrusionpolicy"))
        .attribute(single_reference("syslogserver"))
        .attribute(type_attribute("accessdefaultaction"))
}

fn advanced_settings_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(
            AttributeSchema::new("dnsreputationenforcementenabled", AttributeType::Bool)
                .with_default(Value::Bool(false)),
        )
        .attribute(type_attribute("advancedsettings"))
}

pub fn access_policy_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_access_policy")
        .with_description("The device's single access control policy")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .with_default(Value::string("NGFW-Access-Policy")),
        )
        .attribute(
            AttributeSchema::new("defaultaction", AttributeType::list_of(default_action_block()))
                .required()
                .with_max_items(1),
        )
        .attribute(single_reference("sslpolicy"))
        .attribute(
            AttributeSchema::new("certvisibilityenabled", AttributeType::Bool)
                .with_default(Value::Bool(false)),
        )
        .attribute(single_reference("networkanalysispolicy"))
        .attribute(
            AttributeSchema::new(
                "advancedsettings",
                AttributeType::list_of(advanced_settings_block()),
            )
            .with_max_items(1),
        )
        .attribute(single_reference("identitypolicysetting"))
        .attribute(single_reference("securityintelligence"))
        .attribute(type_attribute("accesspolicy"))
}
