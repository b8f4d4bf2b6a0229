//! ftd_access_policy
//!
//! The device ships with exactly one access policy. Like interfaces it is
//! adopted by name on create and can never be deleted.

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::AccessPolicy;
use ftd_core::provider::{BoxFuture, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State, Value};
use tracing::info;

use super::{as_prior, remote_error};
use crate::codec::{
    flatten_advanced_settings, flatten_default_action, flatten_reference, restore_advanced_settings,
    restore_default_action, restore_reference,
};
use crate::registry::{ResourceDefinition, import_by_id};
use crate::schemas::access_policy::access_policy_schema;
use crate::utils::{AttributeReader, insert_some};

pub const DEFINITION: ResourceDefinition = ResourceDefinition {
    type_name: "ftd_access_policy",
    schema: access_policy_schema,
    read,
    create,
    update,
    delete: None,
    import: import_by_id,
};

pub fn build_access_policy(attributes: &HashMap<String, Value>) -> ProviderResult<AccessPolicy> {
    let r = AttributeReader::new(attributes);
    let default_action = match r.block("defaultaction")? {
        Some(block) => Some(restore_default_action(block.reader())?),
        None => None,
    };
    let advanced_settings = match r.block("advancedsettings")? {
        Some(block) => Some(restore_advanced_settings(block.reader())?),
        None => None,
    };

    Ok(AccessPolicy {
        id: r.string("id")?,
        version: r.string("version")?,
        name: r.string("name")?,
        default_action,
        ssl_policy: restore_reference(r.value("sslpolicy"))?,
        cert_visibility_enabled: r.bool("certvisibilityenabled")?,
        network_analysis_policy: restore_reference(r.value("networkanalysispolicy"))?,
        advanced_settings,
        identity_policy_setting: restore_reference(r.value("identitypolicysetting"))?,
        security_intelligence: restore_reference(r.value("securityintelligence"))?,
        kind: r.string("type")?,
    })
}

pub fn flatten_access_policy(policy: &AccessPolicy) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([
        ("id".to_string(), Value::string(&policy.id)),
        ("version".to_string(), Value::string(&policy.version)),
        ("name".to_string(), Value::string(&policy.name)),
        (
            "defaultaction".to_string(),
            Value::List(flatten_default_action(policy.default_action.as_ref())),
        ),
        (
            "certvisibilityenabled".to_string(),
            Value::Bool(policy.cert_visibility_enabled),
        ),
        (
            "advancedsettings".to_string(),
            Value::List(flatten_advanced_settings(policy.advanced_settings.as_ref())),
        ),
        ("type".to_string(), Value::string(&policy.kind)),
    ]);

    let references = [
        ("sslpolicy", &policy.ssl_policy),
        ("networkanalysispolicy", &policy.network_analysis_policy),
        ("identitypolicysetting", &policy.identity_policy_setting),
        ("securityintelligence", &policy.security_intelligence),
    ];
    for (key, reference) in references {
        insert_some(
            &mut attributes,
            key,
            flatten_reference(reference.as_ref()).map(Value::List),
        );
    }
    attributes
}

fn read(
    client: Arc<dyn FtdApi>,
    id: ResourceId,
    identifier: String,
    _prior: State,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let policy = client
            .get_access_policy(&identifier)
            .await
            .map_err(|e| remote_error("failed to read access policy", e))?;
        Ok(State::existing(id, flatten_access_policy(&policy)).with_identifier(identifier))
    })
}

fn create(
    client: Arc<dyn FtdApi>,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let mut policy = build_access_policy(&resource.attributes)?;
        let existing = client
            .find_access_policy(&policy.name)
            .await
            .map_err(|e| remote_error("failed to find access policy", e))?;
        info!(id = %existing.id, name = %existing.name, "adopting access policy");

        policy.id = existing.id.clone();
        policy.version = existing.version;
        client
            .update_access_policy(&policy)
            .await
            .map_err(|e| remote_error("failed to update access policy", e))?;

        let prior = as_prior(&resource);
        read(client, resource.id, existing.id, prior).await
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
        let mut policy = build_access_policy(&resource.attributes)?;
        policy.id = identifier.clone();
        client
            .update_access_policy(&policy)
            .await
            .map_err(|e| remote_error("failed to update access policy", e))?;
        info!(id = %identifier, "access policy updated");

        read(client, id, identifier, prior).await
    })
}
