//! ftd_interface
//!
//! Physical interfaces are never created or deleted. "Create" adopts the
//! interface with the configured name and applies the configuration to it.

use std::collections::HashMap;
use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_client::models::NetworkInterface;
use ftd_core::provider::{BoxFuture, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State, Value};
use tracing::info;

use super::{as_prior, remote_error};
use crate::codec::{flatten_interface_ipv4, restore_interface_ipv4};
use crate::registry::{ResourceDefinition, import_by_id};
use crate::schemas::interface::interface_schema;
use crate::utils::{AttributeReader, insert_some};

pub const DEFINITION: ResourceDefinition = ResourceDefinition {
    type_name: "ftd_interface",
    schema: interface_schema,
    read,
    create,
    update,
    delete: None,
    import: import_by_id,
};

pub fn build_interface(attributes: &HashMap<String, Value>) -> ProviderResult<NetworkInterface> {
    let r = AttributeReader::new(attributes);
    let ipv4 = match r.block("ipv4")? {
        Some(block) => Some(restore_interface_ipv4(block.reader())?),
        None => None,
    };

    Ok(NetworkInterface {
        id: r.string("id")?,
        version: r.string("version")?,
        name: r.required_string("name")?,
        description: r.string("description")?,
        hardware_name: r.string("hardwarename")?,
        monitor_interface: r.bool("monitorinterface")?,
        ipv4,
        management_only: r.bool("managementonly")?,
        management_interface: r.bool("managementinterface")?,
        mode: r.string("mode")?,
        mtu: r.int("mtu")?,
        enabled: r.bool("enabled")?,
        mac_address: r.string("macaddress")?,
        standby_mac_address: r.string("standbymacaddress")?,
        cts_enabled: r.bool("ctsenabled")?,
        fec_mode: r.string("fecmode")?,
        speed_type: r.string("speedtype")?,
        duplex_type: r.string("duplextype")?,
        auto_neg: r.bool("autoneg")?,
        break_out_capable: r.bool("breakoutcapable")?,
        present: r.bool("present")?,
        split_interface: r.bool("splitinterface")?,
        ten_gigabit_interface: r.bool("tengigabitinterface")?,
        gigabit_interface: r.bool("gigabitinterface")?,
        kind: r.string("type")?,
    })
}

pub fn flatten_interface(iface: &NetworkInterface) -> HashMap<String, Value> {
    let strings = [
        ("id", &iface.id),
        ("version", &iface.version),
        ("name", &iface.name),
        ("description", &iface.description),
        ("hardwarename", &iface.hardware_name),
        ("mode", &iface.mode),
        ("macaddress", &iface.mac_address),
        ("standbymacaddress", &iface.standby_mac_address),
        ("fecmode", &iface.fec_mode),
        ("speedtype", &iface.speed_type),
        ("duplextype", &iface.duplex_type),
        ("type", &iface.kind),
    ];
    let flags = [
        ("monitorinterface", iface.monitor_interface),
        ("managementonly", iface.management_only),
        ("managementinterface", iface.management_interface),
        ("enabled", iface.enabled),
        ("ctsenabled", iface.cts_enabled),
        ("autoneg", iface.auto_neg),
        ("breakoutcapable", iface.break_out_capable),
        ("present", iface.present),
        ("splitinterface", iface.split_interface),
        ("tengigabitinterface", iface.ten_gigabit_interface),
        ("gigabitinterface", iface.gigabit_interface),
    ];

    let mut attributes: HashMap<String, Value> = strings
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::string(v)))
        .chain(flags.into_iter().map(|(k, v)| (k.to_string(), Value::Bool(v))))
        .collect();
    attributes.insert("mtu".to_string(), Value::Int(iface.mtu));
    insert_some(
        &mut attributes,
        "ipv4",
        flatten_interface_ipv4(iface.ipv4.as_ref()).map(Value::List),
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
        let iface = client
            .get_network_interface(&identifier)
            .await
            .map_err(|e| remote_error("failed to read interface", e))?;
        Ok(State::existing(id, flatten_interface(&iface)).with_identifier(identifier))
    })
}

fn create(
    client: Arc<dyn FtdApi>,
    resource: Resource,
) -> BoxFuture<'static, ProviderResult<State>> {
    Box::pin(async move {
        let mut iface = build_interface(&resource.attributes)?;
        let existing = client
            .find_network_interface(&iface.name)
            .await
            .map_err(|e| remote_error("failed to find interface", e))?;
        info!(id = %existing.id, name = %existing.name, "adopting interface");

        iface.id = existing.id.clone();
        iface.version = existing.version;
        iface.hardware_name = existing.hardware_name;
        client
            .update_network_interface(&iface)
            .await
            .map_err(|e| remote_error("failed to update interface", e))?;

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
        let mut iface = build_interface(&resource.attributes)?;
        iface.id = identifier.clone();
        client
            .update_network_interface(&iface)
            .await
            .map_err(|e| remote_error("failed to update interface", e))?;
        info!(id = %identifier, "interface updated");

        read(client, id, identifier, prior).await
    })
}
