//! ftd_application_filter

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::ApplicationFilter;
use ftd_core::provider::{BoxFuture, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State, Value};
use tracing::info;

use super::{as_prior, remote_error};
use crate::codec::{
    flatten_conditions, flatten_references, restore_app_filter_conditions, restore_references,
};
use crate::registry::{ResourceDefinition, import_by_id};
use crate::schemas::application_filter::application_filter_schema;
use crate::utils::{AttributeReader, insert_some};

pub const DEFINITION: ResourceDefinition = ResourceDefinition {
    type_name: "ftd_application_filter",
    schema: application_filter_schema,
    read,
    create,
    update,
    delete: Some(delete),
    import: import_by_id,
};

pub fn build_application_filter(
    attributes: &HashMap<String, Value>,
) -> ProviderResult<ApplicationFilter> {
    let r = AttributeReader::new(attributes);
    Ok(ApplicationFilter {
        id: r.string("id")?,
        version: r.string("version")?,
        name: r.required_string("name")?,
        applications: restore_references(r.value("applications"))?,
        is_system_defined: r.bool("issystemdefined")?,
        conditions: restore_app_filter_conditions(&r.blocks("conditions")?)?,
        kind: r.string("type")?,
    })
}

pub fn flatten_application_filter(filter: &ApplicationFilter) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([
        ("id".to_string(), Value::string(&filter.id)),
        ("version".to_string(), Value::string(&filter.version)),
        ("name".to_string(), Value::string(&filter.name)),
        (
            "issystemdefined".to_string(),
            Value::Bool(filter.is_system_defined),
        ),
        (
            "conditions".to_string(),
            Value::Set(flatten_conditions(&filter.conditions)),
        ),
        ("type".to_string(), Value::string(&filter.kind)),
    ]);
    insert_some(
        &mut attributes,
        "applications",
        flatten_references(&filter.applications).map(Value::Set),
    );
    attributes
}

fn read(
    client: Arc<dyn FtdApi>,
    id: ResourceId,
    identifier: String,
    _prior: State,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let filter = client
            .get_application_filter(&identifier)
            .await
            .map_err(|e| remote_error("failed to read application filter", e))?;
        Ok(State::existing(id, flatten_application_filter(&filter)).with_identifier(identifier))
    })
}

fn create(
    client: Arc<dyn FtdApi>,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let filter = build_application_filter(&resource.attributes)?;
        let created = client
            .create_application_filter(&filter)
            .await
            .map_err(|e| remote_error("failed to create application filter", e))?;
        info!(id = %created.id, name = %created.name, "application filter created");

        let prior = as_prior(&resource);
        read(client, resource.id, created.id, prior).await
    })
}

fn update(
    client: Arc<dyn FtdApi>,
    id: ResourceId,
    identifier: String,
    prior: State,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let mut filter = build_application_filter(&resource.attributes)?;
        filter.id = identifier.clone();
        client
            .update_application_filter(&filter)
            .await
            .map_err(|e| remote_error("failed to update application filter", e))?;
        info!(id = %identifier, "application filter updated");

        read(client, id, identifier, prior).await
    })
}

fn delete(
    client: Arc<dyn FtdApi>,
    _id: ResourceId,
    identifier: String,
    prior: State,
) -> BoxFuture<'static, ProviderResult<()>> {
    Box::pin(async move {
        let filter = ApplicationFilter {
            id: identifier.clone(),
            version: prior.string("version").unwrap_or_default().to_string(),
            name: prior.string("name").unwrap_or_default().to_string(),
            kind: "applicationfilter".to_string(),
            ..Default::default()
        };
        client
            .delete_application_filter(&filter)
            .await
            .map_err(|e| remote_error("failed to delete application filter", e))?;
        info!(id = %identifier, "application filter deleted");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftd_client::models::{ApplicationFilterCondition, ReferenceModel, RiskCondition};

    #[test]
    fn build_and_flatten_agree() {
        let filter = ApplicationFilter {
            id: "af-1".into(),
            version: "v1".into(),
            name: "risky".into(),
            applications: vec![ReferenceModel::new("a-1", "application", "BitTorrent")],
            is_system_defined: false,
            conditions: vec![ApplicationFilterCondition {
                risks: vec![RiskCondition {
                    risk: "VERY_HIGH".into(),
                    kind: "riskcondition".into(),
                }],
                kind: "applicationfiltercondition".into(),
                ..Default::default()
            }],
            kind: "applicationfilter".into(),
        };

        let attributes = flatten_application_filter(&filter);
        assert!(matches!(attributes.get("applications"), Some(Value::Set(_))));
        assert_eq!(build_application_filter(&attributes).unwrap(), filter);
    }
}
