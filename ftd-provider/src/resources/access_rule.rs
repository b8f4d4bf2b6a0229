//! ftd_access_rule
//!
//! Rules live under an access policy, so every call needs `accesspolicyid`
//! in addition to the rule's own id. Import IDs take the form
//! `<accesspolicyid>/<ruleid>`.

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::{AccessRule, ReferenceModel};
use ftd_core::provider::{BoxFuture, ProviderError, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State, Value};
use tracing::info;

use super::{as_prior, remote_error};
use crate::codec::{
    flatten_embedded_app_filter, flatten_reference, flatten_references, flatten_url_filter,
    flatten_users, restore_embedded_app_filter, restore_reference, restore_references,
    restore_url_filter, restore_users,
};
use crate::registry::ResourceDefinition;
use crate::schemas::access_rule::access_rule_schema;
use crate::utils::{AttributeReader, insert_some};

pub const DEFINITION: ResourceDefinition = ResourceDefinition {
    type_name: "ftd_access_rule",
    schema: access_rule_schema,
    read,
    create,
    update,
    delete: Some(delete),
    import,
};

fn policy_id(attributes: &HashMap<String, Value>) -> ProviderResult<String> {
    AttributeReader::new(attributes).required_string("accesspolicyid")
}

pub fn build_access_rule(attributes: &HashMap<String, Value>) -> ProviderResult<AccessRule> {
    let r = AttributeReader::new(attributes);
    let refs = |key: &str| restore_references(r.value(key));

    let embedded_app_filter = match r.block("embeddedappfilter")? {
        Some(block) => Some(restore_embedded_app_filter(block.reader())?),
        None => None,
    };
    let url_filter = match r.block("urlfilter")? {
        Some(block) => Some(restore_url_filter(block.reader())?),
        None => None,
    };

    Ok(AccessRule {
        id: r.string("id")?,
        version: r.string("version")?,
        name: r.required_string("name")?,
        rule_id: r.optional_int("ruleid")?,
        source_zones: refs("sourcezones")?,
        destination_zones: refs("destinationzones")?,
        source_networks: refs("sourcenetworks")?,
        destination_networks: refs("destinationnetworks")?,
        source_ports: refs("sourceports")?,
        destination_ports: refs("destinationports")?,
        rule_position: r.optional_int("ruleposition")?,
        rule_action: r.string("ruleaction")?,
        event_log_action: r.string("eventlogaction")?,
        identity_sources: refs("identitysources")?,
        users: restore_users(&r.blocks("users")?)?,
        embedded_app_filter,
        url_filter,
        file_policy: restore_reference(r.value("filepolicy"))?,
        log_files: r.bool("logfiles")?,
        syslog_server: restore_reference(r.value("syslogserver"))?,
        destination_dynamic_objects: refs("destinationdynamicobjects")?,
        source_dynamic_objects: refs("sourcedynamicobjects")?,
        time_range_objects: refs("timerangeobjects")?,
        kind: r.string("type")?,
    })
}

pub fn flatten_access_rule(rule: &AccessRule, policy_id: &str) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([
        ("id".to_string(), Value::string(&rule.id)),
        ("version".to_string(), Value::string(&rule.version)),
        ("accesspolicyid".to_string(), Value::string(policy_id)),
        ("name".to_string(), Value::string(&rule.name)),
        ("ruleaction".to_string(), Value::string(&rule.rule_action)),
        (
            "eventlogaction".to_string(),
            Value::string(&rule.event_log_action),
        ),
        ("users".to_string(), Value::List(flatten_users(&rule.users))),
        (
            "embeddedappfilter".to_string(),
            Value::List(flatten_embedded_app_filter(
                rule.embedded_app_filter.as_ref(),
            )),
        ),
        (
            "urlfilter".to_string(),
            Value::List(flatten_url_filter(rule.url_filter.as_ref())),
        ),
        ("logfiles".to_string(), Value::Bool(rule.log_files)),
        ("type".to_string(), Value::string(&rule.kind)),
    ]);
    insert_some(&mut attributes, "ruleid", rule.rule_id.map(Value::Int));
    insert_some(
        &mut attributes,
        "ruleposition",
        rule.rule_position.map(Value::Int),
    );

    let lists: [(&str, &[ReferenceModel]); 10] = [
        ("sourcezones", &rule.source_zones),
        ("destinationzones", &rule.destination_zones),
        ("sourcenetworks", &rule.source_networks),
        ("destinationnetworks", &rule.destination_networks),
        ("sourceports", &rule.source_ports),
        ("destinationports", &rule.destination_ports),
        ("identitysources", &rule.identity_sources),
        ("sourcedynamicobjects", &rule.source_dynamic_objects),
        ("destinationdynamicobjects", &rule.destination_dynamic_objects),
        ("timerangeobjects", &rule.time_range_objects),
    ];
    for (key, references) in lists {
        insert_some(
            &mut attributes,
            key,
            flatten_references(references).map(Value::List),
        );
    }
    for (key, reference) in [
        ("filepolicy", &rule.file_policy),
        ("syslogserver", &rule.syslog_server),
    ] {
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
    prior: State,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let policy = policy_id(&prior.attributes)?;
        let rule = client
            .get_access_rule(&policy, &identifier)
            .await
            .map_err(|e| remote_error("failed to read access rule", e))?;
        Ok(State::existing(id, flatten_access_rule(&rule, &policy)).with_identifier(identifier))
    })
}

fn create(
    client: Arc<dyn FtdApi>,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let policy = policy_id(&resource.attributes)?;
        let rule = build_access_rule(&resource.attributes)?;
        let created = client
            .create_access_rule(&policy, &rule)
            .await
            .map_err(|e| remote_error("failed to create access rule", e))?;
        info!(id = %created.id, policy = %policy, "access rule created");

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
        let policy = policy_id(&resource.attributes)?;
        let mut rule = build_access_rule(&resource.attributes)?;
        rule.id = identifier.clone();
        client
            .update_access_rule(&policy, &rule)
            .await
            .map_err(|e| remote_error("failed to update access rule", e))?;
        info!(id = %identifier, policy = %policy, "access rule updated");

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
        let policy = policy_id(&prior.attributes)?;
        let rule = AccessRule {
            id: identifier.clone(),
            version: prior.string("version").unwrap_or_default().to_string(),
            name: prior.string("name").unwrap_or_default().to_string(),
            kind: "accessrule".to_string(),
            ..Default::default()
        };
        client
            .delete_access_rule(&policy, &rule)
            .await
            .map_err(|e| remote_error("failed to delete access rule", e))?;
        info!(id = %identifier, policy = %policy, "access rule deleted");
        Ok(())
    })
}

fn import(id: &ResourceId, import_id: &str) -> ProviderResult<(String, State)> {
    match import_id.split_once('/') {
        Some((policy, rule)) if !policy.is_empty() && !rule.is_empty() => {
            let attributes = HashMap::from([(
                "accesspolicyid".to_string(),
                Value::string(policy),
            )]);
            Ok((rule.to_string(), State::existing(id.clone(), attributes)))
        }
        _ => Err(ProviderError::validation(format!(
            "invalid import ID '{}', expected <accesspolicyid>/<ruleid>",
            import_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftd_client::models::{EmbeddedURLFilter, TrafficEntry, URLCategoryMatcher};

    fn rule() -> AccessRule {
        AccessRule {
            id: "rule-1".into(),
            version: "v1".into(),
            name: "allow-web".into(),
            rule_id: Some(268435457),
            source_zones: vec![ReferenceModel::new("sz-1", "securityzone", "inside_zone")],
            destination_ports: vec![
                ReferenceModel::new("p-1", "tcpportobject", "HTTP"),
                ReferenceModel::new("p-2", "tcpportobject", "HTTPS"),
            ],
            rule_action: "PERMIT".into(),
            event_log_action: "LOG_FLOW_END".into(),
            users: vec![TrafficEntry {
                name: "alice".into(),
                identity_source: ReferenceModel::new("ad-1", "activedirectoryrealm", "corp"),
                kind: "trafficuser".into(),
            }],
            url_filter: Some(EmbeddedURLFilter {
                url_objects: vec![],
                url_categories: vec![URLCategoryMatcher {
                    url_category: Some(ReferenceModel::new("c-1", "urlcategory", "News")),
                    url_reputation: None,
                    include_unknown_url_reputation: true,
                    kind: "urlcategorymatcher".into(),
                }],
                kind: "embeddedurlfilter".into(),
            }),
            syslog_server: Some(ReferenceModel::new("s-1", "syslogserver", "log")),
            kind: "accessrule".into(),
            ..Default::default()
        }
    }

    #[test]
    fn build_and_flatten_agree() {
        let rule = rule();
        let attributes = flatten_access_rule(&rule, "pol-1");
        assert_eq!(
            attributes.get("accesspolicyid"),
            Some(&Value::string("pol-1"))
        );
        assert_eq!(build_access_rule(&attributes).unwrap(), rule);
    }

    #[test]
    fn empty_embedded_filters_flatten_to_empty_lists() {
        let attributes = flatten_access_rule(&rule(), "pol-1");
        assert_eq!(
            attributes.get("embeddedappfilter"),
            Some(&Value::List(vec![]))
        );
        assert!(!attributes.contains_key("filepolicy"));
        assert_eq!(attributes.get("ruleid"), Some(&Value::Int(268435457)));
    }

    #[test]
    fn import_id_names_policy_and_rule() {
        let id = ResourceId::new("ftd_access_rule", "allow-web");
        let (identifier, prior) = import(&id, "pol-1/rule-9").unwrap();
        assert_eq!(identifier, "rule-9");
        assert_eq!(prior.string("accesspolicyid"), Some("pol-1"));

        for bad in ["rule-9", "/rule-9", "pol-1/", ""] {
            assert!(import(&id, bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn read_without_policy_is_decode_error() {
        let err = policy_id(&HashMap::new()).unwrap_err();
        assert_eq!(err.kind, ftd_core::provider::ErrorKind::Decode);
    }
}
