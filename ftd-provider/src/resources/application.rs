//! Application and application category lookups

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::{Application, ApplicationCategory};
use ftd_core::provider::{BoxFuture, ProviderError, ProviderResult};
use ftd_core::resource::{Resource, State, Value};
use tracing::warn;

use super::remote_error;
use crate::codec::flatten_references;
use crate::registry::DataSourceDefinition;
use crate::schemas::application::{application_category_schema, application_schema};
use crate::utils::{AttributeReader, insert_some};

pub const APPLICATION: DataSourceDefinition = DataSourceDefinition {
    type_name: "ftd_application",
    schema: application_schema,
    read: lookup_application,
};

pub const APPLICATION_CATEGORY: DataSourceDefinition = DataSourceDefinition {
    type_name: "ftd_application_category",
    schema: application_category_schema,
    read: lookup_application_category,
};

pub fn flatten_application(app: &Application) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([
        ("id".to_string(), Value::string(&app.id)),
        ("name".to_string(), Value::string(&app.name)),
        ("appid".to_string(), Value::Int(app.app_id)),
        ("description".to_string(), Value::string(&app.description)),
        (
            "applicationtypes".to_string(),
            Value::List(app.application_types.iter().map(Value::string).collect()),
        ),
        ("type".to_string(), Value::string(&app.kind)),
    ]);
    insert_some(
        &mut attributes,
        "tags",
        flatten_references(&app.tags).map(Value::List),
    );
    insert_some(
        &mut attributes,
        "categories",
        flatten_references(&app.categories).map(Value::List),
    );
    attributes
}

pub fn flatten_application_category(category: &ApplicationCategory) -> HashMap<String, Value> {
    HashMap::from([
        ("id".to_string(), Value::string(&category.id)),
        ("name".to_string(), Value::string(&category.name)),
        ("appid".to_string(), Value::Int(category.app_id)),
        (
            "description".to_string(),
            Value::string(&category.description),
        ),
        ("type".to_string(), Value::string(&category.kind)),
    ])
}

/// Several applications may share a name; the last match wins
fn lookup_application(
    client: Arc<dyn FtdApi>,
    query: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let name = AttributeReader::new(&query.attributes).required_string("name")?;
        let mut matches = client
            .get_applications(&name)
            .await
            .map_err(|e| remote_error("failed to look up application", e))?;

        if matches.len() > 1 {
            warn!(
                name = %name,
                count = matches.len(),
                "several applications match, using the last"
            );
        }
        let app = matches
            .pop()
            .ok_or_else(|| ProviderError::new(format!("application '{}' not found", name)))?;

        let identifier = app.id.clone();
        Ok(State::existing(query.id, flatten_application(&app)).with_identifier(identifier))
    })
}

fn lookup_application_category(
    client: Arc<dyn FtdApi>,
    query: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let name = AttributeReader::new(&query.attributes).required_string("name")?;
        let category = client
            .get_application_category(&name)
            .await
            .map_err(|e| remote_error("failed to look up application category", e))?;

        let identifier = category.id.clone();
        Ok(State::existing(query.id, flatten_application_category(&category))
            .with_identifier(identifier))
    })
}
