//! ftd_network_object

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::NetworkObject;
use ftd_core::provider::{BoxFuture, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State, Value};
use tracing::info;

use super::{as_prior, remote_error};
use crate::registry::{ResourceDefinition, import_by_id};
use crate::schemas::network_object::network_object_schema;
use crate::utils::{AttributeReader, insert_some};

pub const DEFINITION: ResourceDefinition = ResourceDefinition {
    type_name: "ftd_network_object",
    schema: network_object_schema,
    read,
    create,
    update,
    delete: Some(delete),
    import: import_by_id,
};

pub fn build_network_object(attributes: &HashMap<String, Value>) -> ProviderResult<NetworkObject> {
    let r = AttributeReader::new(attributes);
    Ok(NetworkObject {
        id: r.string("id")?,
        version: r.string("version")?,
        name: r.required_string("name")?,
        description: r.string("description")?,
        sub_type: r.required_string("subtype")?,
        value: r.required_string("value")?,
        dns_resolution: r.optional_string("dnsresolution")?,
        kind: r.string("type")?,
    })
}

pub fn flatten_network_object(object: &NetworkObject) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([
        ("id".to_string(), Value::string(&object.id)),
        ("version".to_string(), Value::string(&object.version)),
        ("name".to_string(), Value::string(&object.name)),
        ("description".to_string(), Value::string(&object.description)),
        ("subtype".to_string(), Value::string(&object.sub_type)),
        ("value".to_string(), Value::string(&object.value)),
        ("type".to_string(), Value::string(&object.kind)),
    ]);
    insert_some(
        &mut attributes,
        "dnsresolution",
        object.dns_resolution.as_deref().map(Value::string),
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
        let object = client
            .get_network_object(&identifier)
            .await
            .map_err(|e| remote_error("failed to read network object", e))?;
        Ok(State::existing(id, flatten_network_object(&object)).with_identifier(identifier))
    })
}

fn create(
    client: Arc<dyn FtdApi>,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let object = build_network_object(&resource.attributes)?;
        let created = client
            .create_network_object(&object)
            .await
            .map_err(|e| remote_error("failed to create network object", e))?;
        info!(id = %created.id, name = %created.name, "network object created");

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
        let mut object = build_network_object(&resource.attributes)?;
        object.id = identifier.clone();
        client
            .update_network_object(&object)
            .await
            .map_err(|e| remote_error("failed to update network object", e))?;
        info!(id = %identifier, "network object updated");

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
        let object = NetworkObject {
            id: identifier.clone(),
            version: prior.string("version").unwrap_or_default().to_string(),
            name: prior.string("name").unwrap_or_default().to_string(),
            kind: "networkobject".to_string(),
            ..Default::default()
        };
        client
            .delete_network_object(&object)
            .await
            .map_err(|e| remote_error("failed to delete network object", e))?;
        info!(id = %identifier, "network object deleted");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fqdn() -> NetworkObject {
        NetworkObject {
            id: "net-1".into(),
            version: "v1".into(),
            name: "example".into(),
            description: "docs".into(),
            sub_type: "FQDN".into(),
            value: "example.com".into(),
            dns_resolution: Some("IPV4_ONLY".into()),
            kind: "networkobject".into(),
        }
    }

    #[test]
    fn build_and_flatten_agree() {
        let object = fqdn();
        assert_eq!(
            build_network_object(&flatten_network_object(&object)).unwrap(),
            object
        );
    }

    #[test]
    fn dns_resolution_only_when_set() {
        let object = NetworkObject {
            dns_resolution: None,
            sub_type: "HOST".into(),
            ..fqdn()
        };
        assert!(!flatten_network_object(&object).contains_key("dnsresolution"));
    }

    #[test]
    fn build_requires_value() {
        let mut attributes = flatten_network_object(&fqdn());
        attributes.remove("value");
        assert!(build_network_object(&attributes).is_err());
    }
}
