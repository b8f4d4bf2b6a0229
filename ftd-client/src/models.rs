// Request and response bodies of the FDM REST API.
//
// Field names follow the device's camelCase JSON. Every object carries a
// `type` discriminator; an empty discriminator marks an absent embedded
// object in responses.

use serde::{Deserialize, Serialize};

/// `{ "items": [...] }` envelope returned by collection endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Pointer to another object on the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ReferenceModel {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

impl ReferenceModel {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }
}

// ── Objects ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityZone {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub interfaces: Vec<ReferenceModel>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkObject {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sub_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_resolution: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpUdpPort {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_system_defined: bool,
    #[serde(default)]
    pub port: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Collection path segment for a port object discriminator.
pub fn port_collection(kind: &str) -> &'static str {
    if kind == "udpportobject" {
        "udpports"
    } else {
        "tcpports"
    }
}

// ── Interfaces ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HAIPv4Address {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub netmask: String,
    #[serde(default)]
    pub standby_ip_address: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceIPv4 {
    #[serde(default)]
    pub ip_type: String,
    #[serde(rename = "defaultRouteUsingDHCP", default)]
    pub default_route_using_dhcp: bool,
    #[serde(default)]
    pub dhcp_route_metric: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<HAIPv4Address>,
    #[serde(default)]
    pub dhcp: bool,
    #[serde(default)]
    pub address_null: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hardware_name: String,
    #[serde(default)]
    pub monitor_interface: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<InterfaceIPv4>,
    #[serde(default)]
    pub management_only: bool,
    #[serde(default)]
    pub management_interface: bool,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub mtu: i64,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub standby_mac_address: String,
    #[serde(default)]
    pub cts_enabled: bool,
    #[serde(default)]
    pub fec_mode: String,
    #[serde(default)]
    pub speed_type: String,
    #[serde(default)]
    pub duplex_type: String,
    #[serde(default)]
    pub auto_neg: bool,
    #[serde(default)]
    pub break_out_capable: bool,
    #[serde(default)]
    pub present: bool,
    #[serde(default)]
    pub split_interface: bool,
    #[serde(default)]
    pub ten_gigabit_interface: bool,
    #[serde(default)]
    pub gigabit_interface: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
}

// ── Access policy ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDefaultAction {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub event_log_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intrusion_policy: Option<ReferenceModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog_server: Option<ReferenceModel>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    #[serde(default)]
    pub dns_reputation_enforcement_enabled: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicy {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<AccessDefaultAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_policy: Option<ReferenceModel>,
    #[serde(default)]
    pub cert_visibility_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_analysis_policy: Option<ReferenceModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_settings: Option<AdvancedSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_policy_setting: Option<ReferenceModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_intelligence: Option<ReferenceModel>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

// ── Access rule ─────────────────────────────────────────────────────

/// User or group matched by an access rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub identity_source: ReferenceModel,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskCondition {
    #[serde(default)]
    pub risk: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductivityCondition {
    #[serde(default)]
    pub productivity: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCondition {
    #[serde(default)]
    pub application_type: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilterCondition {
    #[serde(default)]
    pub risks: Vec<RiskCondition>,
    #[serde(default)]
    pub productivities: Vec<ProductivityCondition>,
    #[serde(default)]
    pub tags: Vec<ReferenceModel>,
    #[serde(default)]
    pub categories: Vec<ReferenceModel>,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub application_types: Vec<TypeCondition>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedAppFilter {
    #[serde(default)]
    pub applications: Vec<ReferenceModel>,
    #[serde(default)]
    pub application_filters: Vec<ReferenceModel>,
    #[serde(default)]
    pub conditions: Vec<ApplicationFilterCondition>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct URLCategoryMatcher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_category: Option<ReferenceModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_reputation: Option<ReferenceModel>,
    #[serde(default)]
    pub include_unknown_url_reputation: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedURLFilter {
    #[serde(default)]
    pub url_objects: Vec<ReferenceModel>,
    #[serde(default)]
    pub url_categories: Vec<URLCategoryMatcher>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<i64>,
    #[serde(default)]
    pub source_zones: Vec<ReferenceModel>,
    #[serde(default)]
    pub destination_zones: Vec<ReferenceModel>,
    #[serde(default)]
    pub source_networks: Vec<ReferenceModel>,
    #[serde(default)]
    pub destination_networks: Vec<ReferenceModel>,
    #[serde(default)]
    pub source_ports: Vec<ReferenceModel>,
    #[serde(default)]
    pub destination_ports: Vec<ReferenceModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_position: Option<i64>,
    #[serde(default)]
    pub rule_action: String,
    #[serde(default)]
    pub event_log_action: String,
    #[serde(default)]
    pub identity_sources: Vec<ReferenceModel>,
    #[serde(default)]
    pub users: Vec<TrafficEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_app_filter: Option<EmbeddedAppFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_filter: Option<EmbeddedURLFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_policy: Option<ReferenceModel>,
    #[serde(default)]
    pub log_files: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog_server: Option<ReferenceModel>,
    #[serde(default)]
    pub destination_dynamic_objects: Vec<ReferenceModel>,
    #[serde(default)]
    pub source_dynamic_objects: Vec<ReferenceModel>,
    #[serde(default)]
    pub time_range_objects: Vec<ReferenceModel>,
    #[serde(rename = "type")]
    pub kind: String,
}

// ── Applications ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub applications: Vec<ReferenceModel>,
    #[serde(default)]
    pub is_system_defined: bool,
    #[serde(default)]
    pub conditions: Vec<ApplicationFilterCondition>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub app_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<ReferenceModel>,
    #[serde(default)]
    pub categories: Vec<ReferenceModel>,
    #[serde(default)]
    pub application_types: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub app_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Body of `POST /fdm/token`.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful token response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}
