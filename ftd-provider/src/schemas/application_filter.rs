//! ftd_application_filter schema

use ftd_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::{condition_block, id_attribute, reference_block, type_attribute, version_attribute};

pub fn application_filter_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_application_filter")
        .with_description("Reusable set of applications and application conditions")
        .attribute(id_attribute())
        .attribute(version_attribute())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(AttributeSchema::new(
            "applications",
            AttributeType::set_of(reference_block()),
        ))
        .attribute(AttributeSchema::new("issystemdefined", AttributeType::Bool).computed())
        .attribute(AttributeSchema::new(
            "conditions",
            AttributeType::set_of(condition_block(AttributeType::set_of)),
        ))
        .attribute(type_attribute("applicationfilter"))
}
