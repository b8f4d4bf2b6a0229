// The typed operations the provider needs from the device.
//
// `HttpClient` is the production implementation; tests substitute a
// recording double.

use async_trait::async_trait;

use crate::error::Error;
use crate::models::{
    AccessPolicy, AccessRule, Application, ApplicationCategory, ApplicationFilter,
    NetworkInterface, NetworkObject, SecurityZone, TcpUdpPort,
};

#[async_trait]
pub trait FtdApi: Send + Sync {
    // ── Security zones ──────────────────────────────────────────────
    async fn get_security_zone(&self, id: &str) -> Result<SecurityZone, Error>;
    async fn create_security_zone(&self, zone: &SecurityZone) -> Result<SecurityZone, Error>;
    async fn update_security_zone(&self, zone: &SecurityZone) -> Result<SecurityZone, Error>;

    // ── Network objects ─────────────────────────────────────────────
    async fn get_network_object(&self, id: &str) -> Result<NetworkObject, Error>;
    async fn create_network_object(&self, object: &NetworkObject)
    -> Result<NetworkObject, Error>;
    async fn update_network_object(&self, object: &NetworkObject)
    -> Result<NetworkObject, Error>;
    async fn delete_network_object(&self, object: &NetworkObject) -> Result<(), Error>;

    // ── Interfaces ──────────────────────────────────────────────────
    async fn get_network_interface(&self, id: &str) -> Result<NetworkInterface, Error>;
    /// Look up an existing physical interface by name.
    async fn find_network_interface(&self, name: &str) -> Result<NetworkInterface, Error>;
    async fn update_network_interface(
        &self,
        iface: &NetworkInterface,
    ) -> Result<NetworkInterface, Error>;

    // ── Access policies ─────────────────────────────────────────────
    async fn get_access_policy(&self, id: &str) -> Result<AccessPolicy, Error>;
    /// Look up an existing access policy by name.
    async fn find_access_policy(&self, name: &str) -> Result<AccessPolicy, Error>;
    async fn update_access_policy(&self, policy: &AccessPolicy) -> Result<AccessPolicy, Error>;

    // ── Access rules ────────────────────────────────────────────────
    async fn get_access_rule(&self, policy_id: &str, id: &str) -> Result<AccessRule, Error>;
    async fn create_access_rule(
        &self,
        policy_id: &str,
        rule: &AccessRule,
    ) -> Result<AccessRule, Error>;
    async fn update_access_rule(
        &self,
        policy_id: &str,
        rule: &AccessRule,
    ) -> Result<AccessRule, Error>;
    async fn delete_access_rule(&self, policy_id: &str, rule: &AccessRule) -> Result<(), Error>;

    // ── Application filters ─────────────────────────────────────────
    async fn get_application_filter(&self, id: &str) -> Result<ApplicationFilter, Error>;
    async fn create_application_filter(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<ApplicationFilter, Error>;
    async fn update_application_filter(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<ApplicationFilter, Error>;
    async fn delete_application_filter(&self, filter: &ApplicationFilter) -> Result<(), Error>;

    // ── TCP/UDP port objects ────────────────────────────────────────
    async fn get_tcp_udp_port(&self, id: &str, kind: &str) -> Result<TcpUdpPort, Error>;
    async fn get_tcp_udp_port_by_name(&self, name: &str, kind: &str)
    -> Result<TcpUdpPort, Error>;
    async fn create_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<TcpUdpPort, Error>;
    async fn update_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<TcpUdpPort, Error>;
    async fn delete_tcp_udp_port(&self, port: &TcpUdpPort) -> Result<(), Error>;

    // ── Applications (read-only) ────────────────────────────────────
    /// All applications matching `name`; may be empty.
    async fn get_applications(&self, name: &str) -> Result<Vec<Application>, Error>;
    async fn get_application_category(&self, name: &str) -> Result<ApplicationCategory, Error>;
}
