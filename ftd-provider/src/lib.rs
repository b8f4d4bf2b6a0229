//! FTD Provider
//!
//! Manages objects on a Cisco Firepower Threat Defense device through its
//! REST API.
//!
//! - [`schemas`]: attribute schemas for every resource and data source
//! - [`codec`]: conversion of nested blocks to and from the API models
//! - [`resources`]: CRUD callbacks, one module per resource type
//! - [`registry`]: the table the provider dispatches through
//! - [`provider`]: configuration and the `FtdProvider` itself

pub mod codec;
pub mod provider;
pub mod registry;
pub mod resources;
pub mod schemas;
pub mod utils;

#[cfg(test)]
mod mock;

use ftd_core::provider::{BoxFuture, Provider, ProviderResult};
use ftd_core::resource::{Resource, ResourceId, State};
use ftd_core::schema::ResourceSchema;

pub use provider::{FtdProvider, ProviderConfig};

// =============================================================================
// Provider Trait
// =============================================================================

impl Provider for FtdProvider {
    fn name(&self) -> &'static str {
        "ftd"
    }

    fn resource_types(&self) -> Vec<ResourceSchema> {
        registry::RESOURCES.iter().map(|d| (d.schema)()).collect()
    }

    fn data_source_types(&self) -> Vec<ResourceSchema> {
        registry::DATA_SOURCES.iter().map(|d| (d.schema)()).collect()
    }

    fn validate(&self, resource: &Resource) -> ProviderResult<()> {
        self.validate_resource(resource)
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: &str,
        prior: &State,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let prior = prior.clone();
        Box::pin(async move { self.read_resource(&id, &identifier, &prior).await })
    }

    fn read_data_source(&self, query: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let query = query.clone();
        Box::pin(async move { self.lookup(&query).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(&resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move { self.update_resource(&id, &identifier, &from, &to).await })
    }

    fn delete(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        Box::pin(async move { self.delete_resource(&id, &identifier, &from).await })
    }

    fn import(&self, id: &ResourceId, import_id: &str) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let import_id = import_id.to_string();
        Box::pin(async move { self.import_resource(&id, &import_id).await })
    }
}
