//! Registry of resource and data source definitions
//!
//! Each managed type is one record pairing its schema with its operations.
//! The provider dispatches by type name; a resource without a delete
//! operation cannot be removed from the device.

use std::sync::Arc;

use ftd_client::FtdApi;
use ftd_core::provider::{BoxFuture, ProviderError, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State};
use ftd_core::schema::ResourceSchema;

use crate::resources::{
    access_policy, access_rule, application, application_filter, interface, network_object,
    security_zone, tcp_udp_port,
};

pub type ReadFn =
    fn(Arc<dyn FtdApi>, ResourceId, String, State) -> BoxFuture<'static, ProviderResult<State>>;
pub type CreateFn = fn(Arc<dyn FtdApi>, Resource) -> BoxFuture<'static, ProviderResult<State>>;
pub type UpdateFn = fn(
    Arc<dyn FtdApi>,
    ResourceId,
    String,
    State,
    Resource,
) -> BoxFuture<'static, ProviderResult<State>>;
pub type DeleteFn =
    fn(Arc<dyn FtdApi>, ResourceId, String, State) -> BoxFuture<'static, ProviderResult<()>>;
/// Turns an import ID into the object identifier plus the prior state
/// needed to read it
pub type ImportFn = fn(&ResourceId, &str) -> ProviderResult<(String, State)>;
pub type LookupFn = fn(Arc<dyn FtdApi>, Resource) -> BoxFuture<'static, ProviderResult<State>>;

/// A managed resource type
pub struct ResourceDefinition {
    pub type_name: &'static str,
    pub schema: fn() -> ResourceSchema,
    pub read: ReadFn,
    pub create: CreateFn,
    pub update: UpdateFn,
    /// `None` for objects that exist for the lifetime of the device
    pub delete: Option<DeleteFn>,
    pub import: ImportFn,
}

/// A read-only lookup
pub struct DataSourceDefinition {
    pub type_name: &'static str,
    pub schema: fn() -> ResourceSchema,
    pub read: LookupFn,
}

pub static RESOURCES: &[ResourceDefinition] = &[
    security_zone::DEFINITION,
    network_object::DEFINITION,
    interface::DEFINITION,
    access_rule::DEFINITION,
    access_policy::DEFINITION,
    tcp_udp_port::DEFINITION,
    application_filter::DEFINITION,
];

pub static DATA_SOURCES: &[DataSourceDefinition] = &[
    tcp_udp_port::DATA_SOURCE,
    application::APPLICATION,
    application::APPLICATION_CATEGORY,
];

pub fn find_resource(type_name: &str) -> Option<&'static ResourceDefinition> {
    RESOURCES.iter().find(|d| d.type_name == type_name)
}

pub fn find_data_source(type_name: &str) -> Option<&'static DataSourceDefinition> {
    DATA_SOURCES.iter().find(|d| d.type_name == type_name)
}

/// Import ID is the object ID itself
pub fn import_by_id(id: &ResourceId, import_id: &str) -> ProviderResult<(String, State)> {
    if import_id.is_empty() {
        return Err(ProviderError::validation("import ID must not be empty"));
    }
    Ok((import_id.to_string(), State::not_found(id.clone())))
}
