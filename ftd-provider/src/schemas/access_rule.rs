//! ftd_access_rule schema

use ftd_core::resource::Value;
use ftd_core::schema::{AttributeSchema, AttributeType, BlockSchema, ResourceSchema};

use super::{
    condition_block, enum_type, id_attribute, reference_block, reference_block_with_default_type,
    references, single_reference, type_attribute, version_attribute,
};

const RULE_ACTIONS: &[&str] = &["PERMIT", "TRUST", "DENY"];
const EVENT_LOG_ACTIONS: &[&str] = &["LOG_FLOW_END", "LOG_BOTH", "LOG_NONE"];

/// Attributes holding plain reference lists
pub const REFERENCE_LISTS: &[&str] = &[
    "sourcezones",
    "destinationzones",
    "sourcenetworks",
    "destinationnetworks",
    "sourceports",
    "destinationports",
    "identitysources",
    "sourcedynamicobjects",
    "destinationdynamicobjects",
    "timerangeobjects",
];

fn user_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Traffic user or group name"),
        )
        .attribute(
            AttributeSchema::new("identitysource", AttributeType::list_of(reference_block()))
                .required()
                .with_max_items(1)
                .with_description("Realm the user or group belongs to"),
        )
        .attribute(AttributeSchema::new("type", AttributeType::String).required())
}

fn embedded_app_filter_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(AttributeSchema::new(
            "applications",
            AttributeType::list_of(reference_block_with_default_type("application")),
        ))
        .attribute(AttributeSchema::new(
            "applicationfilters",
            AttributeType::list_of(reference_block_with_default_type("applicationfilter")),
        ))
        .attribute(AttributeSchema::new(
            "conditions",
            AttributeType::list_of(condition_block(AttributeType::list_of)),
        ))
        .attribute(type_attribute("embeddedappfilter"))
}

fn url_category_matcher_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(single_reference("urlcategory"))
        .attribute(single_reference("urlreputation"))
        .attribute(AttributeSchema::new(
            "includeunknownurlreputation",
            AttributeType::Bool,
        ))
        .attribute(type_attribute("urlcategorymatcher"))
}

fn url_filter_block() -> BlockSchema {
    BlockSchema::new()
        .attribute(references("urlobjects"))
        .attribute(AttributeSchema::new(
            "urlcategories",
            AttributeType::list_of(url_category_matcher_block()),
        ))
        .attribute(type_attribute("embeddedurlfilter"))
}

pub fn access_rule_schema() -> ResourceSchema {
    let schema = ResourceSchema::new("ftd_access_rule")
        .with_description("Rule of an access control policy")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(
            AttributeSchema::new("accesspolicyid", AttributeType::String)
                .required()
                .with_description("ID of the access policy holding the rule"),
        )
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(
            AttributeSchema::new("ruleid", AttributeType::Int)
                .computed()
                .with_description("Rule number assigned by the device"),
        )
        .attribute(
            AttributeSchema::new("ruleposition", AttributeType::Int)
                .with_description("Index position of the rule"),
        )
        .attribute(AttributeSchema::new("ruleaction", enum_type(RULE_ACTIONS)).required())
        .attribute(AttributeSchema::new(
            "eventlogaction",
            enum_type(EVENT_LOG_ACTIONS),
        ))
        .attribute(AttributeSchema::new(
            "users",
            AttributeType::list_of(user_block()),
        ))
        .attribute(
            AttributeSchema::new(
                "embeddedappfilter",
                AttributeType::list_of(embedded_app_filter_block()),
            )
            .with_max_items(1),
        )
        .attribute(
            AttributeSchema::new("urlfilter", AttributeType::list_of(url_filter_block()))
                .with_max_items(1),
        )
        .attribute(single_reference("filepolicy"))
        .attribute(
            AttributeSchema::new("logfiles", AttributeType::Bool).with_default(Value::Bool(false)),
        )
        .attribute(single_reference("syslogserver"))
        .attribute(type_attribute("accessrule"));

    REFERENCE_LISTS
        .iter()
        .fold(schema, |schema, name| schema.attribute(references(name)))
}
