//! TCP/UDP port objects
//!
//! TCP and UDP ports live in separate collections, so reads need the
//! object's `type` besides its id. Import IDs are `<type>/<id>`; a bare id
//! is taken to be a TCP port.

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::TcpUdpPort;
use ftd_core::provider::{BoxFuture, ProviderError, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State, Value};
use tracing::info;

use super::{as_prior, remote_error};
use crate::registry::{DataSourceDefinition, ResourceDefinition};
use crate::schemas::tcp_udp_port::{
    PORT_TYPES, tcp_udp_port_data_source_schema, tcp_udp_port_schema,
};
use crate::utils::AttributeReader;

const DEFAULT_PORT_TYPE: &str = "tcpportobject";

pub const DEFINITION: ResourceDefinition = ResourceDefinition {
    type_name: "ftd_tcp_udp_port_user",
    schema: tcp_udp_port_schema,
    read,
    create,
    update,
    delete: Some(delete),
    import,
};

pub const DATA_SOURCE: DataSourceDefinition = DataSourceDefinition {
    type_name: "ftd_tcp_udp_port",
    schema: tcp_udp_port_data_source_schema,
    read: lookup,
};

fn port_type(attributes: &HashMap<String, Value>) -> ProviderResult<String> {
    Ok(AttributeReader::new(attributes)
        .optional_string("type")?
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_PORT_TYPE.to_string()))
}

pub fn build_tcp_udp_port(attributes: &HashMap<String, Value>) -> ProviderResult<TcpUdpPort> {
    let r = AttributeReader::new(attributes);
    Ok(TcpUdpPort {
        id: r.string("id")?,
        version: r.string("version")?,
        name: r.required_string("name")?,
        description: r.string("description")?,
        is_system_defined: r.bool("issystemdefined")?,
        port: r.required_string("port")?,
        kind: r.required_string("type")?,
    })
}

pub fn flatten_tcp_udp_port(port: &TcpUdpPort) -> HashMap<String, Value> {
    HashMap::from([
        ("id".to_string(), Value::string(&port.id)),
        ("version".to_string(), Value::string(&port.version)),
        ("name".to_string(), Value::string(&port.name)),
        ("description".to_string(), Value::string(&port.description)),
        (
            "issystemdefined".to_string(),
            Value::Bool(port.is_system_defined),
        ),
        ("port".to_string(), Value::string(&port.port)),
        ("type".to_string(), Value::string(&port.kind)),
    ])
}

fn read(
    client: Arc<dyn FtdApi>,
    id: ResourceId,
    identifier: String,
    prior: State,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let kind = port_type(&prior.attributes)?;
        let port = client
            .get_tcp_udp_port(&identifier, &kind)
            .await
            .map_err(|e| remote_error("failed to read port object", e))?;
        Ok(State::existing(id, flatten_tcp_udp_port(&port)).with_identifier(identifier))
    })
}

fn create(
    client: Arc<dyn FtdApi>,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let port = build_tcp_udp_port(&resource.attributes)?;
        let created = client
            .create_tcp_udp_port(&port)
            .await
            .map_err(|e| remote_error("failed to create port object", e))?;
        info!(id = %created.id, kind = %created.kind, "port object created");

        let prior = as_prior(&resource);
        read(client, resource.id, created.id, prior).await
    })
}

fn update(
    client: Arc<dyn FtdApi>,
    id: ResourceId,
    identifier: String,
    _prior: State,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let mut port = build_tcp_udp_port(&resource.attributes)?;
        port.id = identifier.clone();
        client
            .update_tcp_udp_port(&port)
            .await
            .map_err(|e| remote_error("failed to update port object", e))?;
        info!(id = %identifier, kind = %port.kind, "port object updated");

        let prior = as_prior(&resource);
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
        let port = TcpUdpPort {
            id: identifier.clone(),
            version: prior.string("version").unwrap_or_default().to_string(),
            name: prior.string("name").unwrap_or_default().to_string(),
            kind: port_type(&prior.attributes)?,
            ..Default::default()
        };
        client
            .delete_tcp_udp_port(&port)
            .await
            .map_err(|e| remote_error("failed to delete port object", e))?;
        info!(id = %identifier, kind = %port.kind, "port object deleted");
        Ok(())
    })
}

fn import(id: &ResourceId, import_id: &str) -> ProviderResult<(String, State)> {
    let (kind, object_id) = import_id
        .split_once('/')
        .unwrap_or((DEFAULT_PORT_TYPE, import_id));
    if !PORT_TYPES.contains(&kind) || object_id.is_empty() {
        return Err(ProviderError::validation(format!(
            "invalid import ID '{}', expected [tcpportobject|udpportobject/]<id>",
            import_id
        )));
    }
    let attributes = HashMap::from([("type".to_string(), Value::string(kind))]);
    Ok((object_id.to_string(), State::existing(id.clone(), attributes)))
}

/// Data source: look up a port object, system-defined ones included, by name
fn lookup(client: Arc<dyn FtdApi>, query: Resource) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let r = AttributeReader::new(&query.attributes);
        let name = r.required_string("name")?;
        let kind = r.required_string("type")?;
        let port = client
            .get_tcp_udp_port_by_name(&name, &kind)
            .await
            .map_err(|e| remote_error("failed to look up port object", e))?;

        let identifier = port.id.clone();
        Ok(State::existing(query.id, flatten_tcp_udp_port(&port)).with_identifier(identifier))
    })
}
