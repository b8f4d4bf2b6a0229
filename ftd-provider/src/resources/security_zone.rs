//! ftd_security_zone
//!
//! Zones cannot be deleted through the API; they have no delete operation.

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::SecurityZone;
use ftd_core::provider::{BoxFuture, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State, Value};
use tracing::info;

use super::{as_prior, remote_error};
use crate::codec::{flatten_references, restore_references};
use crate::registry::{ResourceDefinition, import_by_id};
use crate::schemas::security_zone::security_zone_schema;
use crate::utils::{AttributeReader, insert_some};

pub const DEFINITION: ResourceDefinition = ResourceDefinition {
    type_name: "ftd_security_zone",
    schema: security_zone_schema,
    read,
    create,
    update,
    delete: None,
    import: import_by_id,
};

pub fn build_security_zone(attributes: &HashMap<String, Value>) -> ProviderResult<SecurityZone> {
    let r = AttributeReader::new(attributes);
    Ok(SecurityZone {
        id: r.string("id")?,
        version: r.string("version")?,
        name: r.required_string("name")?,
        description: r.string("description")?,
        mode: r.string("mode")?,
        interfaces: restore_references(r.value("interfaces"))?,
        kind: r.string("type")?,
    })
}

pub fn flatten_security_zone(zone: &SecurityZone) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([
        ("id".to_string(), Value::string(&zone.id)),
        ("version".to_string(), Value::string(&zone.version)),
        ("name".to_string(), Value::string(&zone.name)),
        ("description".to_string(), Value::string(&zone.description)),
        ("mode".to_string(), Value::string(&zone.mode)),
        ("type".to_string(), Value::string(&zone.kind)),
    ]);
    insert_some(
        &mut attributes,
        "interfaces",
        flatten_references(&zone.interfaces).map(Value::List),
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
        let zone = client
            .get_security_zone(&identifier)
            .await
            .map_err(|e| remote_error("failed to read security zone", e))?;
        Ok(State::existing(id, flatten_security_zone(&zone)).with_identifier(identifier))
    })
}

fn create(
    client: Arc<dyn FtdApi>,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let zone = build_security_zone(&resource.attributes)?;
        let created = client
            .create_security_zone(&zone)
            .await
            .map_err(|e| remote_error("failed to create security zone", e))?;
        info!(id = %created.id, name = %created.name, "security zone created");

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
        let mut zone = build_security_zone(&resource.attributes)?;
        zone.id = identifier.clone();
        client
            .update_security_zone(&zone)
            .await
            .map_err(|e| remote_error("failed to update security zone", e))?;
        info!(id = %identifier, "security zone updated");

        read(client, id, identifier, prior).await
    })
}
