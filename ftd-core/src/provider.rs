//! Provider - Trait abstracting resource operations
//!
//! A Provider maps declarative resource configuration onto a remote management
//! API. The host drives it through this trait and persists the returned state.

use std::future::Future;
use std::pin::Pin;

use crate::resource::{Resource, ResourceId, State};
use crate::schema::{ResourceSchema, TypeError};

/// Category of a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote API call failed
    Remote,
    /// The operation is not supported for this resource type
    Unsupported,
    /// Configuration does not satisfy the schema
    Validation,
    /// The provider itself could not be configured
    Configuration,
    /// State could not be decoded into a typed request
    Decode,
}

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub message: String,
    pub kind: ErrorKind,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}.{}] {}", id.resource_type, id.name, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(ref cause) = self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    /// A remote failure
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Remote,
            resource_id: None,
            cause: None,
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(ErrorKind::Unsupported)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(ErrorKind::Validation)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(ErrorKind::Configuration)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(ErrorKind::Decode)
    }

    /// Collapse schema errors into a single validation error
    pub fn from_type_errors(errors: &[TypeError]) -> Self {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        Self::validation(messages.join("; "))
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Main Provider trait
///
/// All remote operations are async and involve side effects. `validate` is
/// local and runs before any of them.
pub trait Provider: Send + Sync {
    /// Name of this Provider (e.g., "ftd")
    fn name(&self) -> &'static str;

    /// Schemas of the managed resource types
    fn resource_types(&self) -> Vec<ResourceSchema>;

    /// Schemas of the read-only data sources
    fn data_source_types(&self) -> Vec<ResourceSchema>;

    /// Check configuration against the schema of its type
    fn validate(&self, resource: &Resource) -> ProviderResult<()>;

    /// Get the current state of a resource
    ///
    /// `prior` carries attributes some resource types need to locate the
    /// object (e.g. the parent policy of an access rule).
    fn read(
        &self,
        id: &ResourceId,
        identifier: &str,
        prior: &State,
    ) -> BoxFuture<'_, ProviderResult<State>>;

    /// Look up a data source using the attributes of `query`
    fn read_data_source(&self, query: &Resource) -> BoxFuture<'_, ProviderResult<State>>;

    /// Create a resource
    ///
    /// Returns State with identifier set to the server-assigned ID
    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>>;

    /// Update a resource in place
    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>>;

    /// Delete a resource
    fn delete(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
    ) -> BoxFuture<'_, ProviderResult<()>>;

    /// Adopt an existing remote object given its import ID
    fn import(&self, id: &ResourceId, import_id: &str) -> BoxFuture<'_, ProviderResult<State>>;
}

/// Provider implementation for Box<dyn Provider>
/// This enables dynamic dispatch for Providers
impl Provider for Box<dyn Provider> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn resource_types(&self) -> Vec<ResourceSchema> {
        (**self).resource_types()
    }

    fn data_source_types(&self) -> Vec<ResourceSchema> {
        (**self).data_source_types()
    }

    fn validate(&self, resource: &Resource) -> ProviderResult<()> {
        (**self).validate(resource)
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: &str,
        prior: &State,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).read(id, identifier, prior)
    }

    fn read_data_source(&self, query: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).read_data_source(query)
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).create(resource)
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).update(id, identifier, from, to)
    }

    fn delete(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        (**self).delete(id, identifier, from)
    }

    fn import(&self, id: &ResourceId, import_id: &str) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).import(id, import_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock Provider for testing
    struct MockProvider;

    impl Provider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn resource_types(&self) -> Vec<ResourceSchema> {
            vec![ResourceSchema::new("test")]
        }

        fn data_source_types(&self) -> Vec<ResourceSchema> {
            vec![]
        }

        fn validate(&self, _resource: &Resource) -> ProviderResult<()> {
            Ok(())
        }

        fn read(
            &self,
            id: &ResourceId,
            _identifier: &str,
            _prior: &State,
        ) -> BoxFuture<'_, ProviderResult<State>> {
            let id = id.clone();
            Box::pin(async move { Ok(State::not_found(id)) })
        }

        fn read_data_source(&self, query: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
            let id = query.id.clone();
            Box::pin(async move { Err(ProviderError::new("no match").for_resource(id)) })
        }

        fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
            let id = resource.id.clone();
            let attrs = resource.attributes.clone();
            Box::pin(async move { Ok(State::existing(id, attrs).with_identifier("mock-id-123")) })
        }

        fn update(
            &self,
            id: &ResourceId,
            _identifier: &str,
            _from: &State,
            to: &Resource,
        ) -> BoxFuture<'_, ProviderResult<State>> {
            let id = id.clone();
            let attrs = to.attributes.clone();
            Box::pin(async move { Ok(State::existing(id, attrs)) })
        }

        fn delete(
            &self,
            id: &ResourceId,
            _identifier: &str,
            _from: &State,
        ) -> BoxFuture<'_, ProviderResult<()>> {
            let id = id.clone();
            Box::pin(async move {
                Err(ProviderError::unsupported("cannot delete").for_resource(id))
            })
        }

        fn import(
            &self,
            id: &ResourceId,
            import_id: &str,
        ) -> BoxFuture<'_, ProviderResult<State>> {
            let state = State::existing(id.clone(), Default::default()).with_identifier(import_id);
            Box::pin(async move { Ok(state) })
        }
    }

    #[tokio::test]
    async fn mock_provider_read_returns_not_found() {
        let provider = MockProvider;
        let id = ResourceId::new("test", "example");
        let state = provider
            .read(&id, "abc", &State::not_found(id.clone()))
            .await
            .unwrap();
        assert!(!state.exists);
    }

    #[tokio::test]
    async fn mock_provider_create_returns_existing() {
        let provider: Box<dyn Provider> = Box::new(MockProvider);
        let resource = Resource::new("test", "example");
        let state = provider.create(&resource).await.unwrap();
        assert!(state.exists);
        assert_eq!(state.identifier, Some("mock-id-123".to_string()));
    }

    #[tokio::test]
    async fn error_display_includes_resource_and_kind() {
        let provider = MockProvider;
        let id = ResourceId::new("test", "example");
        let err = provider
            .delete(&id, "abc", &State::not_found(id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unsupported);
        assert_eq!(err.to_string(), "[test.example] cannot delete");
    }

    #[test]
    fn type_errors_collapse_into_validation_error() {
        let errors = vec![
            TypeError::MissingRequired {
                name: "name".to_string(),
            },
            TypeError::ComputedAttribute {
                name: "id".to_string(),
            },
        ];
        let err = ProviderError::from_type_errors(&errors);
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("'name' is missing"));
        assert!(err.message.contains("'id' is computed"));
    }
}
