//! Local state file
//!
//! Results of successful operations are kept in a JSON file (default:
//! ftd.state.json) so later commands can find the object identifier and
//! the prior attributes a resource was last seen with.

use std::collections::HashMap;
use std::path::Path;

use ftd_core::resource::{ResourceId, State, attributes_from_json, attributes_to_json};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid state file: {0}")]
    InvalidState(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// The persisted state of every managed resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// State file format version
    pub version: u32,
    /// Incremented on every write
    pub serial: u64,
    /// Identifies this state file across rewrites
    pub lineage: String,
    pub resources: Vec<ResourceState>,
}

impl StateFile {
    pub const CURRENT_VERSION: u32 = 1;
    pub const DEFAULT_PATH: &'static str = "ftd.state.json";

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            serial: 0,
            lineage: uuid::Uuid::new_v4().to_string(),
            resources: Vec::new(),
        }
    }

    /// Read the state file, or start an empty one if it does not exist yet
    pub fn load(path: &Path) -> Result<Self, StateError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let state: StateFile = serde_json::from_str(&content)
            .map_err(|e| StateError::InvalidState(format!("{}: {}", path.display(), e)))?;
        if state.version > Self::CURRENT_VERSION {
            return Err(StateError::InvalidState(format!(
                "state version {} is newer than supported version {}",
                state.version,
                Self::CURRENT_VERSION
            )));
        }
        Ok(state)
    }

    pub fn save(&mut self, path: &Path) -> Result<(), StateError> {
        self.serial += 1;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StateError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn find(&self, id: &ResourceId) -> Option<&ResourceState> {
        self.resources
            .iter()
            .find(|r| r.resource_type == id.resource_type && r.name == id.name)
    }

    /// Record the state returned by an operation, replacing any earlier entry
    pub fn upsert(&mut self, state: &State) {
        let entry = ResourceState::from_state(state);
        match self
            .resources
            .iter_mut()
            .find(|r| r.resource_type == entry.resource_type && r.name == entry.name)
        {
            Some(existing) => *existing = entry,
            None => self.resources.push(entry),
        }
    }

    pub fn remove(&mut self, id: &ResourceId) -> Option<ResourceState> {
        let pos = self
            .resources
            .iter()
            .position(|r| r.resource_type == id.resource_type && r.name == id.name)?;
        Some(self.resources.remove(pos))
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a single managed resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub resource_type: String,
    pub name: String,
    /// Object id on the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub attributes: HashMap<String, serde_json::Value>,
}

impl ResourceState {
    pub fn from_state(state: &State) -> Self {
        Self {
            resource_type: state.id.resource_type.clone(),
            name: state.id.name.clone(),
            identifier: state.identifier.clone(),
            attributes: attributes_to_json(&state.attributes).into_iter().collect(),
        }
    }

    pub fn id(&self) -> ResourceId {
        ResourceId::new(&self.resource_type, &self.name)
    }

    /// Rebuild the provider-side state, as prior state for the next call
    pub fn to_state(&self) -> Result<State, StateError> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let attributes = attributes_from_json(&object).map_err(|e| {
            StateError::InvalidState(format!("{}.{}: {}", self.resource_type, self.name, e))
        })?;
        let state = State::existing(self.id(), attributes);
        Ok(match &self.identifier {
            Some(identifier) => state.with_identifier(identifier),
            None => state,
        })
    }
}
