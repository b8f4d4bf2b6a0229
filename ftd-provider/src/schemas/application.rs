//! Application data source schemas

use ftd_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::{id_attribute, reference_block};

fn computed(name: &str, attr_type: AttributeType) -> AttributeSchema {
    AttributeSchema::new(name, attr_type).computed()
}

pub fn application_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_application")
        .with_description("Look up an application by name")
        .attribute(id_attribute())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(computed("appid", AttributeType::Int))
        .attribute(computed("description", AttributeType::String))
        .attribute(computed("tags", AttributeType::list_of(reference_block())))
        .attribute(computed("categories", AttributeType::list_of(reference_block())))
        .attribute(computed("applicationtypes", types::string_list()))
        .attribute(computed("type", AttributeType::String))
}

pub fn application_category_schema() -> ResourceSchema {
    ResourceSchema::new("ftd_application_category")
        .with_description("Look up an application category by name")
        .attribute(id_attribute())
        .attribute(AttributeSchema::new("name", AttributeType::String).required())
        .attribute(computed("appid", AttributeType::Int))
        .attribute(computed("description", AttributeType::String))
        .attribute(computed("type", AttributeType::String))
}
