//! FTD Provider - dispatch, validation and configuration
//!
//! `FtdProvider` looks up the registered definition for a resource type,
//! validates configuration against its schema and hands the call to the
//! definition's operation. State coming back is normalized against the same
//! schema so set-typed attributes compare without regard to order.

use std::sync::Arc;

use ftd_client::{FtdApi, HttpClient};
use ftd_core::provider::{ProviderError, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State};
use ftd_core::schema::ResourceSchema;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::registry::{self, DataSourceDefinition, ResourceDefinition};

/// Connection settings; unset fields fall back to `FTD_*` environment variables
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub url: Option<SecretString>,
    pub insecure: bool,
}

impl ProviderConfig {
    /// Fill unset fields from the process environment
    pub fn with_env_defaults(self) -> Self {
        self.with_defaults_from(|key| std::env::var(key).ok())
    }

    fn with_defaults_from(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let insecure = self.insecure
            || lookup("FTD_INSECURE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false);
        Self {
            username: self.username.or_else(|| lookup("FTD_USERNAME")),
            password: self
                .password
                .or_else(|| lookup("FTD_PASSWORD").map(SecretString::from)),
            url: self.url.or_else(|| lookup("FTD_URL").map(SecretString::from)),
            insecure,
        }
    }

    fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// Provider for Cisco Firepower Threat Defense devices
pub struct FtdProvider {
    client: Arc<dyn FtdApi>,
}

impl FtdProvider {
    pub fn new(client: Arc<dyn FtdApi>) -> Self {
        Self { client }
    }

    /// Build the HTTP client, logging in when both credentials are known
    pub async fn configure(config: ProviderConfig) -> ProviderResult<Self> {
        let url = config.url.as_ref().map(|u| u.expose_secret().to_string());
        let client = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                HttpClient::login(url.as_deref(), username, password, config.insecure).await
            }
            _ => HttpClient::new(url.as_deref(), config.insecure),
        }
        .map_err(|e| {
            ProviderError::configuration("failed to configure FTD client").with_cause(e)
        })?;

        info!(
            url = %client.base_url(),
            authenticated = config.has_credentials(),
            "FTD provider configured"
        );
        Ok(Self::new(Arc::new(client)))
    }

    // =========================================================================
    // Registry Lookup
    // =========================================================================

    fn resource_definition(type_name: &str) -> ProviderResult<&'static ResourceDefinition> {
        registry::find_resource(type_name).ok_or_else(|| {
            ProviderError::unsupported(format!("unknown resource type '{}'", type_name))
        })
    }

    fn data_source_definition(type_name: &str) -> ProviderResult<&'static DataSourceDefinition> {
        registry::find_data_source(type_name).ok_or_else(|| {
            ProviderError::unsupported(format!("unknown data source '{}'", type_name))
        })
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Apply defaults and check the result against `schema`
    fn prepare(schema: &ResourceSchema, resource: &Resource) -> ProviderResult<Resource> {
        let mut attributes = resource.attributes.clone();
        schema.apply_defaults(&mut attributes);
        schema
            .validate(&attributes)
            .map_err(|errors| ProviderError::from_type_errors(&errors))?;
        Ok(Resource {
            attributes,
            ..resource.clone()
        })
    }

    pub fn validate_resource(&self, resource: &Resource) -> ProviderResult<()> {
        let schema = if resource.is_data_source() {
            (Self::data_source_definition(&resource.id.resource_type)?.schema)()
        } else {
            (Self::resource_definition(&resource.id.resource_type)?.schema)()
        };
        Self::prepare(&schema, resource)
            .map(|_| ())
            .map_err(|e| e.for_resource(resource.id.clone()))
    }

    /// Carry computed attributes the configuration leaves unset (id,
    /// version, rule id, ...) over from prior state
    fn merge_computed(schema: &ResourceSchema, desired: &mut Resource, prior: &State) {
        for name in schema.computed_attributes() {
            if !desired.attributes.contains_key(name)
                && let Some(value) = prior.attributes.get(name)
            {
                desired.attributes.insert(name.to_string(), value.clone());
            }
        }
    }

    fn normalized(schema: &ResourceSchema, mut state: State) -> State {
        schema.normalize(&mut state.attributes);
        state
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    pub async fn read_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        prior: &State,
    ) -> ProviderResult<State> {
        let result = async {
            let definition = Self::resource_definition(&id.resource_type)?;
            debug!(resource = %id.name, identifier, "reading {}", definition.type_name);
            let state = (definition.read)(
                self.client.clone(),
                id.clone(),
                identifier.to_string(),
                prior.clone(),
            )
            .await?;
            Ok::<_, ProviderError>(Self::normalized(&(definition.schema)(), state))
        };
        result.await.map_err(|e| e.for_resource(id.clone()))
    }

    pub async fn create_resource(&self, resource: &Resource) -> ProviderResult<State> {
        let result = async {
            let definition = Self::resource_definition(&resource.id.resource_type)?;
            let schema = (definition.schema)();
            let resource = Self::prepare(&schema, resource)?;
            let state = (definition.create)(self.client.clone(), resource).await?;
            Ok::<_, ProviderError>(Self::normalized(&schema, state))
        };
        result
            .await
            .map_err(|e| e.for_resource(resource.id.clone()))
    }

    pub async fn update_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> ProviderResult<State> {
        let result = async {
            let definition = Self::resource_definition(&id.resource_type)?;
            let schema = (definition.schema)();
            let mut desired = Self::prepare(&schema, to)?;
            Self::merge_computed(&schema, &mut desired, from);
            let state = (definition.update)(
                self.client.clone(),
                id.clone(),
                identifier.to_string(),
                from.clone(),
                desired,
            )
            .await?;
            Ok::<_, ProviderError>(Self::normalized(&schema, state))
        };
        result.await.map_err(|e| e.for_resource(id.clone()))
    }

    pub async fn delete_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
    ) -> ProviderResult<()> {
        let result = async {
            let definition = Self::resource_definition(&id.resource_type)?;
            let Some(delete) = definition.delete else {
                return Err(ProviderError::unsupported(format!(
                    "{} cannot be deleted from the device",
                    definition.type_name
                )));
            };
            delete(
                self.client.clone(),
                id.clone(),
                identifier.to_string(),
                from.clone(),
            )
            .await
        };
        result.await.map_err(|e| e.for_resource(id.clone()))
    }

    pub async fn import_resource(&self, id: &ResourceId, import_id: &str) -> ProviderResult<State> {
        let (identifier, prior) = Self::resource_definition(&id.resource_type)
            .and_then(|definition| (definition.import)(id, import_id))
            .map_err(|e| e.for_resource(id.clone()))?;
        info!(resource = %id.name, identifier = %identifier, "importing {}", id.resource_type);
        self.read_resource(id, &identifier, &prior).await
    }

    pub async fn lookup(&self, query: &Resource) -> ProviderResult<State> {
        let result = async {
            let definition = Self::data_source_definition(&query.id.resource_type)?;
            let schema = (definition.schema)();
            let query = Self::prepare(&schema, query)?;
            let state = (definition.read)(self.client.clone(), query).await?;
            Ok::<_, ProviderError>(Self::normalized(&schema, state))
        };
        result
            .await
            .map_err(|e| e.for_resource(query.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockClient;
    use ftd_core::provider::ErrorKind;
    use ftd_core::resource::Value;
    use serde_json::json;

    fn provider(client: MockClient) -> (FtdProvider, Arc<MockClient>) {
        let client = Arc::new(client);
        (FtdProvider::new(client.clone()), client)
    }

    fn network(subtype: &str) -> Resource {
        Resource::new("ftd_network_object", "web")
            .with_attribute("name", Value::string("web"))
            .with_attribute("subtype", Value::string(subtype))
            .with_attribute("value", Value::string("10.0.0.10"))
    }

    #[test]
    fn config_falls_back_to_environment() {
        let env = |key: &str| match key {
            "FTD_USERNAME" => Some("admin".to_string()),
            "FTD_PASSWORD" => Some("secret".to_string()),
            "FTD_URL" => Some("https://ftd.example.com".to_string()),
            "FTD_INSECURE" => Some("True".to_string()),
            _ => None,
        };
        let config = ProviderConfig {
            username: Some("operator".to_string()),
            ..Default::default()
        }
        .with_defaults_from(env);

        assert_eq!(config.username.as_deref(), Some("operator"));
        assert_eq!(
            config.password.as_ref().map(|p| p.expose_secret().to_string()),
            Some("secret".to_string())
        );
        assert!(config.insecure);
        assert!(config.has_credentials());

        let bare = ProviderConfig::default().with_defaults_from(|_| None);
        assert!(!bare.insecure);
        assert!(!bare.has_credentials());
    }

    #[tokio::test]
    async fn invalid_url_is_configuration_error() {
        let config = ProviderConfig {
            url: Some(SecretString::from("not a url".to_string())),
            ..Default::default()
        };
        let err = FtdProvider::configure(config).await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.cause.is_some());
    }

    #[tokio::test]
    async fn create_reads_back_server_fields() {
        let (provider, client) = provider(MockClient::new());
        let state = provider.create_resource(&network("HOST")).await.unwrap();

        assert_eq!(state.identifier.as_deref(), Some("networks-1"));
        assert_eq!(state.string("version"), Some("v1"));
        assert_eq!(state.string("type"), Some("networkobject"));
        assert_eq!(state.string("value"), Some("10.0.0.10"));
        assert_eq!(
            client.operations(),
            vec!["create_network_object", "get_network_object"]
        );
    }

    #[tokio::test]
    async fn invalid_subtype_never_reaches_the_device() {
        let (provider, client) = provider(MockClient::new());
        let err = provider
            .create_resource(&network("BOGUS"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(
            err.resource_id.map(|id| id.resource_type),
            Some("ftd_network_object".to_string())
        );
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn update_sends_the_create_payload_with_current_version() {
        let (provider, client) = provider(MockClient::new());
        let resource = network("HOST");
        let created = provider.create_resource(&resource).await.unwrap();
        let identifier = created.identifier.clone().unwrap();

        let updated = provider
            .update_resource(&resource.id, &identifier, &created, &resource)
            .await
            .unwrap();
        assert_eq!(updated.string("version"), Some("v2"));

        let mut create_body = client.bodies("create_network_object").remove(0);
        let mut update_body = client.bodies("update_network_object").remove(0);
        assert_eq!(update_body["version"], json!("v1"));
        for body in [&mut create_body, &mut update_body] {
            let object = body.as_object_mut().unwrap();
            object.remove("id");
            object.remove("version");
        }
        assert_eq!(create_body, update_body);
    }

    #[tokio::test]
    async fn identical_updates_send_identical_payloads() {
        let stored = json!({
            "id": "n-1",
            "version": "v4",
            "name": "web",
            "subType": "HOST",
            "value": "10.0.0.1",
            "type": "networkobject"
        });
        let resource = network("HOST");
        let id = resource.id.clone();
        let prior = State::existing(
            id.clone(),
            std::collections::HashMap::from([
                ("id".to_string(), Value::string("n-1")),
                ("version".to_string(), Value::string("v4")),
            ]),
        );

        let mut payloads = Vec::new();
        for _ in 0..2 {
            let (provider, client) = provider(MockClient::new().seed("networks", stored.clone()));
            provider
                .update_resource(&id, "n-1", &prior, &resource)
                .await
                .unwrap();
            payloads.extend(client.bodies("update_network_object"));
        }
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0], payloads[1]);
    }

    #[tokio::test]
    async fn device_owned_objects_cannot_be_deleted() {
        let (provider, client) = provider(MockClient::new());
        for resource_type in ["ftd_security_zone", "ftd_interface", "ftd_access_policy"] {
            let id = ResourceId::new(resource_type, "x");
            let err = provider
                .delete_resource(&id, "obj-1", &State::not_found(id.clone()))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unsupported, "{resource_type}");
        }
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_type_is_unsupported() {
        let (provider, _) = provider(MockClient::new());
        let err = provider
            .create_resource(&Resource::new("ftd_nat_rule", "x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn read_of_missing_object_fails() {
        let (provider, _) = provider(MockClient::new());
        let id = ResourceId::new("ftd_network_object", "gone");
        let err = provider
            .read_resource(&id, "networks-9", &State::not_found(id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Remote);
        assert_eq!(err.resource_id, Some(id));
    }

    #[tokio::test]
    async fn interface_create_adopts_the_named_interface() {
        let client = MockClient::new().seed(
            "interfaces",
            json!({
                "id": "if-1",
                "version": "v3",
                "name": "inside",
                "hardwareName": "GigabitEthernet0/1",
                "type": "physicalinterface"
            }),
        );
        let (provider, client) = provider(client);
        let resource = Resource::new("ftd_interface", "inside")
            .with_attribute("name", Value::string("inside"))
            .with_attribute("monitorinterface", Value::Bool(true))
            .with_attribute("description", Value::string("LAN"));

        let state = provider.create_resource(&resource).await.unwrap();

        assert_eq!(
            client.operations(),
            vec![
                "find_network_interface",
                "update_network_interface",
                "get_network_interface"
            ]
        );
        let body = client.bodies("update_network_interface").remove(0);
        assert_eq!(body["version"], json!("v3"));
        assert_eq!(body["hardwareName"], json!("GigabitEthernet0/1"));
        assert_eq!(body["mtu"], json!(1500));

        assert_eq!(state.identifier.as_deref(), Some("if-1"));
        assert_eq!(state.string("description"), Some("LAN"));
        assert_eq!(state.string("hardwarename"), Some("GigabitEthernet0/1"));
    }

    #[tokio::test]
    async fn access_rule_lifecycle() {
        let (provider, client) = provider(MockClient::new());
        let resource = Resource::new("ftd_access_rule", "allow-dns")
            .with_attribute("accesspolicyid", Value::string("pol-1"))
            .with_attribute("name", Value::string("allow-dns"))
            .with_attribute("ruleaction", Value::string("PERMIT"))
            .with_attribute(
                "destinationports",
                Value::List(vec![Value::map([
                    ("id", Value::string("p-53")),
                    ("type", Value::string("udpportobject")),
                    ("name", Value::string("DNS")),
                ])]),
            );

        let created = provider.create_resource(&resource).await.unwrap();
        let identifier = created.identifier.clone().unwrap();
        assert_eq!(created.string("accesspolicyid"), Some("pol-1"));
        assert_eq!(created.attributes.get("ruleid"), Some(&Value::Int(268435457)));
        assert_eq!(created.attributes.get("logfiles"), Some(&Value::Bool(false)));

        let imported = provider
            .import_resource(&resource.id, &format!("pol-1/{identifier}"))
            .await
            .unwrap();
        assert_eq!(imported.attributes, created.attributes);

        provider
            .delete_resource(&resource.id, &identifier, &imported)
            .await
            .unwrap();
        assert_eq!(
            client.operations().last(),
            Some(&"delete_access_rule")
        );
    }

    #[tokio::test]
    async fn port_import_reads_from_the_typed_collection() {
        let client = MockClient::new().seed(
            "udpports",
            json!({
                "id": "p-1",
                "version": "v1",
                "name": "syslog",
                "port": "514",
                "type": "udpportobject"
            }),
        );
        let (provider, _) = provider(client);
        let id = ResourceId::new("ftd_tcp_udp_port_user", "syslog");

        let state = provider
            .import_resource(&id, "udpportobject/p-1")
            .await
            .unwrap();
        assert_eq!(state.string("port"), Some("514"));
        assert_eq!(state.string("type"), Some("udpportobject"));

        let err = provider.import_resource(&id, "p-1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Remote);
    }

    #[tokio::test]
    async fn application_lookup_takes_the_last_match() {
        let client = MockClient::new()
            .seed("applications", json!({"id": "a-1", "name": "SSH", "appId": 846}))
            .seed("applications", json!({"id": "a-2", "name": "SSH", "appId": 847}));
        let (provider, _) = provider(client);
        let query = Resource::new("ftd_application", "ssh")
            .with_attribute("name", Value::string("SSH"))
            .with_read_only(true);

        let state = provider.lookup(&query).await.unwrap();
        assert_eq!(state.identifier.as_deref(), Some("a-2"));
        assert_eq!(state.attributes.get("appid"), Some(&Value::Int(847)));

        let missing = Resource::new("ftd_application", "x")
            .with_attribute("name", Value::string("Telnet"))
            .with_read_only(true);
        assert!(provider.lookup(&missing).await.is_err());
    }

    #[tokio::test]
    async fn access_policy_create_adopts_the_named_policy() {
        let client = MockClient::new().seed(
            "accesspolicies",
            json!({
                "id": "pol-1",
                "version": "v2",
                "name": "NGFW-Access-Policy",
                "defaultAction": {
                    "action": "DENY",
                    "eventLogAction": "LOG_NONE",
                    "type": "accessdefaultaction"
                },
                "type": "accesspolicy"
            }),
        );
        let (provider, client) = provider(client);
        let resource = Resource::new("ftd_access_policy", "main").with_attribute(
            "defaultaction",
            Value::List(vec![Value::map([("action", Value::string("PERMIT"))])]),
        );

        let state = provider.create_resource(&resource).await.unwrap();

        assert_eq!(
            client.operations(),
            vec![
                "find_access_policy",
                "update_access_policy",
                "get_access_policy"
            ]
        );
        let body = client.bodies("update_access_policy").remove(0);
        assert_eq!(body["id"], json!("pol-1"));
        assert_eq!(body["version"], json!("v2"));
        assert_eq!(body["defaultAction"]["action"], json!("PERMIT"));
        assert_eq!(body["defaultAction"]["eventLogAction"], json!("LOG_NONE"));

        assert_eq!(state.identifier.as_deref(), Some("pol-1"));
        assert_eq!(state.string("version"), Some("v3"));
        assert_eq!(
            state.attributes.get("defaultaction"),
            Some(&Value::List(vec![Value::map([
                ("action", Value::string("PERMIT")),
                ("eventlogaction", Value::string("LOG_NONE")),
                ("type", Value::string("accessdefaultaction")),
            ])]))
        );
    }

    #[tokio::test]
    async fn security_zone_create_then_update() {
        let (provider, client) = provider(MockClient::new());
        let interface = Value::map([
            ("id", Value::string("if-1")),
            ("type", Value::string("physicalinterface")),
            ("name", Value::string("inside")),
        ]);
        let resource = Resource::new("ftd_security_zone", "inside")
            .with_attribute("name", Value::string("inside_zone"))
            .with_attribute("mode", Value::string("ROUTED"))
            .with_attribute("interfaces", Value::List(vec![interface.clone()]));

        let created = provider.create_resource(&resource).await.unwrap();
        let identifier = created.identifier.clone().unwrap();
        assert_eq!(identifier, "securityzones-1");
        assert_eq!(created.string("version"), Some("v1"));
        assert_eq!(created.string("type"), Some("securityzone"));
        assert_eq!(
            created.attributes.get("interfaces"),
            Some(&Value::List(vec![interface]))
        );

        let changed = resource
            .clone()
            .with_attribute("description", Value::string("LAN segment"));
        let updated = provider
            .update_resource(&resource.id, &identifier, &created, &changed)
            .await
            .unwrap();

        assert_eq!(
            client.operations(),
            vec![
                "create_security_zone",
                "get_security_zone",
                "update_security_zone",
                "get_security_zone"
            ]
        );
        let body = client.bodies("update_security_zone").remove(0);
        assert_eq!(body["id"], json!("securityzones-1"));
        assert_eq!(body["version"], json!("v1"));
        assert_eq!(body["description"], json!("LAN segment"));

        assert_eq!(updated.identifier.as_deref(), Some("securityzones-1"));
        assert_eq!(updated.string("version"), Some("v2"));
        assert_eq!(updated.string("description"), Some("LAN segment"));
    }

    #[tokio::test]
    async fn application_filter_lifecycle_with_sets() {
        let (provider, client) = provider(MockClient::new());
        let app = |id: &str, name: &str| {
            Value::map([
                ("id", Value::string(id)),
                ("type", Value::string("application")),
                ("name", Value::string(name)),
            ])
        };
        let risk = |level: &str| {
            Value::Set(vec![Value::map([(
                "risks",
                Value::Set(vec![Value::map([("risk", Value::string(level))])]),
            )])])
        };
        let resource = Resource::new("ftd_application_filter", "p2p")
            .with_attribute("name", Value::string("p2p"))
            .with_attribute(
                "applications",
                Value::Set(vec![app("a-1", "BitTorrent"), app("a-2", "eDonkey")]),
            )
            .with_attribute("conditions", risk("VERY_HIGH"));

        let created = provider.create_resource(&resource).await.unwrap();
        let identifier = created.identifier.clone().unwrap();
        assert_eq!(created.string("version"), Some("v1"));
        assert_eq!(
            created.attributes.get("applications"),
            Some(&Value::Set(vec![app("a-2", "eDonkey"), app("a-1", "BitTorrent")]))
        );
        assert!(matches!(
            created.attributes.get("conditions"),
            Some(Value::Set(items)) if items.len() == 1
        ));

        let changed = resource.clone().with_attribute("conditions", risk("HIGH"));
        let updated = provider
            .update_resource(&resource.id, &identifier, &created, &changed)
            .await
            .unwrap();
        assert_eq!(updated.string("version"), Some("v2"));

        let body = client.bodies("update_application_filter").remove(0);
        assert_eq!(body["id"], json!(identifier.as_str()));
        assert_eq!(body["version"], json!("v1"));
        assert_eq!(body["conditions"][0]["risks"][0]["risk"], json!("HIGH"));
        assert_eq!(
            body["conditions"][0]["risks"][0]["type"],
            json!("riskcondition")
        );

        provider
            .delete_resource(&resource.id, &identifier, &updated)
            .await
            .unwrap();
        assert_eq!(
            client.operations(),
            vec![
                "create_application_filter",
                "get_application_filter",
                "update_application_filter",
                "get_application_filter",
                "delete_application_filter"
            ]
        );
        assert_eq!(
            client.bodies("delete_application_filter"),
            vec![json!({ "id": identifier.as_str() })]
        );
    }

    #[tokio::test]
    async fn port_lookup_searches_the_collection_for_its_type() {
        let client = MockClient::new()
            .seed(
                "udpports",
                json!({
                    "id": "u-443",
                    "version": "v1",
                    "name": "HTTPS",
                    "port": "443",
                    "type": "udpportobject"
                }),
            )
            .seed(
                "tcpports",
                json!({
                    "id": "t-443",
                    "version": "v1",
                    "name": "HTTPS",
                    "port": "443",
                    "isSystemDefined": true,
                    "type": "tcpportobject"
                }),
            );
        let (provider, client) = provider(client);
        let query = Resource::new("ftd_tcp_udp_port", "https")
            .with_attribute("name", Value::string("HTTPS"))
            .with_attribute("type", Value::string("tcpportobject"))
            .with_read_only(true);

        let state = provider.lookup(&query).await.unwrap();

        assert_eq!(client.operations(), vec!["get_tcp_udp_port_by_name"]);
        assert_eq!(state.identifier.as_deref(), Some("t-443"));
        assert_eq!(state.string("port"), Some("443"));
        assert_eq!(state.string("type"), Some("tcpportobject"));
        assert_eq!(
            state.attributes.get("issystemdefined"),
            Some(&Value::Bool(true))
        );
    }

    #[tokio::test]
    async fn application_category_lookup_by_name() {
        let client = MockClient::new().seed(
            "applicationcategories",
            json!({
                "id": "c-12",
                "name": "gaming",
                "appId": 12,
                "description": "Online games",
                "type": "applicationcategory"
            }),
        );
        let (provider, client) = provider(client);
        let query = Resource::new("ftd_application_category", "gaming")
            .with_attribute("name", Value::string("gaming"))
            .with_read_only(true);

        let state = provider.lookup(&query).await.unwrap();
        assert_eq!(client.operations(), vec!["get_application_category"]);
        assert_eq!(state.identifier.as_deref(), Some("c-12"));
        assert_eq!(state.attributes.get("appid"), Some(&Value::Int(12)));
        assert_eq!(state.string("description"), Some("Online games"));
        assert_eq!(state.string("type"), Some("applicationcategory"));

        let missing = Resource::new("ftd_application_category", "x")
            .with_attribute("name", Value::string("chat"))
            .with_read_only(true);
        let err = provider.lookup(&missing).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Remote);
    }
}
