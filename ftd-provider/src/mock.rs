//! In-memory `FtdApi` double that records every call

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value as Json, json};

use ftd_client::models::{
    AccessPolicy, AccessRule, Application, ApplicationCategory, ApplicationFilter,
    NetworkInterface, NetworkObject, SecurityZone, TcpUdpPort, port_collection,
};
use ftd_client::{Error, FtdApi};

/// One recorded client call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub operation: &'static str,
    pub body: Option<Json>,
}

/// Objects are stored as JSON, keyed by collection then id
#[derive(Default)]
pub struct MockClient {
    objects: Mutex<HashMap<&'static str, Vec<Json>>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object as if it already existed on the device
    pub fn seed(self, collection: &'static str, object: Json) -> Self {
        self.objects
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(object);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }

    /// Bodies sent by calls named `operation`
    pub fn bodies(&self, operation: &str) -> Vec<Json> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .filter_map(|c| c.body)
            .collect()
    }

    fn record(&self, operation: &'static str, body: Option<Json>) {
        self.calls.lock().unwrap().push(Call { operation, body });
    }

    fn decode<T: DeserializeOwned>(object: Json) -> Result<T, Error> {
        serde_json::from_value(object.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: object.to_string(),
        })
    }

    fn missing(id: &str) -> Error {
        Error::Api {
            status: 404,
            message: format!("object {id} not found"),
        }
    }

    fn insert<T: Serialize + DeserializeOwned>(
        &self,
        operation: &'static str,
        collection: &'static str,
        object: &T,
    ) -> Result<T, Error> {
        let mut body = serde_json::to_value(object).unwrap();
        self.record(operation, Some(body.clone()));

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        body["id"] = json!(format!("{collection}-{n}"));
        body["version"] = json!("v1");
        if collection == "accessrules" {
            body["ruleId"] = json!(268435456 + n as i64);
        }
        self.objects
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(body.clone());
        Self::decode(body)
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        collection: &'static str,
        id: &str,
    ) -> Result<T, Error> {
        self.record(operation, None);
        let objects = self.objects.lock().unwrap();
        let found = objects
            .get(collection)
            .and_then(|items| items.iter().find(|o| o["id"] == id))
            .cloned()
            .ok_or_else(|| Self::missing(id))?;
        Self::decode(found)
    }

    fn find<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        collection: &'static str,
        name: &str,
    ) -> Vec<T> {
        self.record(operation, None);
        let objects = self.objects.lock().unwrap();
        objects
            .get(collection)
            .map(|items| {
                items
                    .iter()
                    .filter(|o| o["name"] == name)
                    .filter_map(|o| serde_json::from_value(o.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace an object; the version in the body must match the stored one
    fn replace<T: Serialize + DeserializeOwned>(
        &self,
        operation: &'static str,
        collection: &'static str,
        object: &T,
    ) -> Result<T, Error> {
        let mut body = serde_json::to_value(object).unwrap();
        self.record(operation, Some(body.clone()));

        let mut objects = self.objects.lock().unwrap();
        let stored = objects
            .get_mut(collection)
            .and_then(|items| items.iter_mut().find(|o| o["id"] == body["id"]))
            .ok_or_else(|| Self::missing(body["id"].as_str().unwrap_or_default()))?;

        if stored["version"] != body["version"] {
            return Err(Error::Api {
                status: 422,
                message: "version mismatch".to_string(),
            });
        }
        let next = stored["version"]
            .as_str()
            .and_then(|v| v.trim_start_matches('v').parse::<u32>().ok())
            .unwrap_or(0)
            + 1;
        body["version"] = json!(format!("v{next}"));
        // Read-only fields survive a replace
        if let (Some(stored), Some(updated)) = (stored.as_object(), body.as_object_mut()) {
            for (key, value) in stored {
                updated.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        *stored = body.clone();
        Self::decode(body)
    }

    fn remove(
        &self,
        operation: &'static str,
        collection: &'static str,
        id: &str,
    ) -> Result<(), Error> {
        self.record(operation, Some(json!({ "id": id })));
        let mut objects = self.objects.lock().unwrap();
        let items = objects.entry(collection).or_default();
        let before = items.len();
        items.retain(|o| o["id"] != id);
        if items.len() == before {
            Err(Self::missing(id))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FtdApi for MockClient {
    async fn get_security_zone(&self, id: &str) -> Result<SecurityZone, Error> {
        self.fetch("get_security_zone", "securityzones", id)
    }

    async fn create_security_zone(&self, zone: &SecurityZone) -> Result<SecurityZone, Error> {
        self.insert("create_security_zone", "securityzones", zone)
    }

    async fn update_security_zone(&self, zone: &SecurityZone) -> Result<SecurityZone, Error> {
        self.replace("update_security_zone", "securityzones", zone)
    }

    async fn get_network_object(&self, id: &str) -> Result<NetworkObject, Error> {
        self.fetch("get_network_object", "networks", id)
    }

    async fn create_network_object(
        &self,
        object: &NetworkObject,
    ) -> Result<NetworkObject, Error> {
        self.insert("create_network_object", "networks", object)
    }

    async fn update_network_object(
        &self,
        object: &NetworkObject,
    ) -> Result<NetworkObject, Error> {
        self.replace("update_network_object", "networks", object)
    }

    async fn delete_network_object(&self, object: &NetworkObject) -> Result<(), Error> {
        self.remove("delete_network_object", "networks", &object.id)
    }

    async fn get_network_interface(&self, id: &str) -> Result<NetworkInterface, Error> {
        self.fetch("get_network_interface", "interfaces", id)
    }

    async fn find_network_interface(&self, name: &str) -> Result<NetworkInterface, Error> {
        self.find("find_network_interface", "interfaces", name)
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                kind: "interface",
                name: name.to_string(),
            })
    }

    async fn update_network_interface(
        &self,
        iface: &NetworkInterface,
    ) -> Result<NetworkInterface, Error> {
        self.replace("update_network_interface", "interfaces", iface)
    }

    async fn get_access_policy(&self, id: &str) -> Result<AccessPolicy, Error> {
        self.fetch("get_access_policy", "accesspolicies", id)
    }

    async fn find_access_policy(&self, name: &str) -> Result<AccessPolicy, Error> {
        self.find("find_access_policy", "accesspolicies", name)
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                kind: "access policy",
                name: name.to_string(),
            })
    }

    async fn update_access_policy(&self, policy: &AccessPolicy) -> Result<AccessPolicy, Error> {
        self.replace("update_access_policy", "accesspolicies", policy)
    }

    async fn get_access_rule(&self, _policy_id: &str, id: &str) -> Result<AccessRule, Error> {
        self.fetch("get_access_rule", "accessrules", id)
    }

    async fn create_access_rule(
        &self,
        _policy_id: &str,
        rule: &AccessRule,
    ) -> Result<AccessRule, Error> {
        self.insert("create_access_rule", "accessrules", rule)
    }

    async fn update_access_rule(
        &self,
        _policy_id: &str,
        rule: &AccessRule,
    ) -> Result<AccessRule, Error> {
        self.replace("update_access_rule", "accessrules", rule)
    }

    async fn delete_access_rule(&self, _policy_id: &str, rule: &AccessRule) -> Result<(), Error> {
        self.remove("delete_access_rule", "accessrules", &rule.id)
    }

    async fn get_application_filter(&self, id: &str) -> Result<ApplicationFilter, Error> {
        self.fetch("get_application_filter", "applicationfilters", id)
    }

    async fn create_application_filter(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<ApplicationFilter, Error> {
        self.insert("create_application_filter", "applicationfilters", filter)
    }

    async fn update_application_filter(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<ApplicationFilter, Error> {
        self.replace("update_application_filter", "applicationfilters", filter)
    }

    async fn delete_application_filter(&self, filter: &ApplicationFilter) -> Result<(), Error> {
        self.remove("delete_application_filter", "applicationfilters", &filter.id)
    }

    async fn get_tcp_udp_port(&self, id: &str, kind: &str) -> Result<TcpUdpPort, Error> {
        self.fetch("get_tcp_udp_port", port_collection(kind), id)
    }

    async fn get_tcp_udp_port_by_name(
        &self,
        name: &str,
        kind: &str,
    ) -> Result<TcpUdpPort, Error> {
        self.find("get_tcp_udp_port_by_name", port_collection(kind), name)
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                kind: "port object",
                name: name.to_string(),
            })
    }

    async fn create_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<TcpUdpPort, Error> {
        self.insert("create_tcp_udp_port", port_collection(&port.kind), port)
    }

    async fn update_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<TcpUdpPort, Error> {
        self.replace("update_tcp_udp_port", port_collection(&port.kind), port)
    }

    async fn delete_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<(), Error> {
        self.remove("delete_tcp_udp_port", port_collection(&port.kind), &port.id)
    }

    async fn get_applications(&self, name: &str) -> Result<Vec<Application>, Error> {
        Ok(self.find("get_applications", "applications", name))
    }

    async fn get_application_category(&self, name: &str) -> Result<ApplicationCategory, Error> {
        self.find("get_application_category", "applicationcategories", name)
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                kind: "application category",
                name: name.to_string(),
            })
    }
}
