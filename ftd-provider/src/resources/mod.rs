//! CRUD callbacks, one module per resource type
//!
//! Every resource has a single `build_*` function turning attributes into the
//! typed request body (used by both create and update) and a single
//! `flatten_*` function turning the device's response into state.

pub mod access_policy;
pub mod access_rule;
pub mod application;
pub mod application_filter;
pub mod interface;
pub mod network_object;
pub mod security_zone;
pub mod tcp_udp_port;

use ftd_core::provider::ProviderError;
use ftd_core::resource::{Resource, State};

/// Wrap a client failure
pub(crate) fn remote_error(action: &str, err: ftd_client::Error) -> ProviderError {
    ProviderError::new(action).with_cause(err)
}

/// Configuration seen as prior state, for reads that follow a create
pub(crate) fn as_prior(resource: &Resource) -> State {
    State::existing(resource.id.clone(), resource.attributes.clone())
}
