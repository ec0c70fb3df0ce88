use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::http::response::Reply;
use crate::registry::{Registry, RegistryError};

/// Body of a create request: `{"name": string, "value": integer}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateCmd {
    pub name: String,
    pub value: i64,
}

impl CreateCmd {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Decode the request body
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Insert the account into the registry
    pub fn execute(&self, registry: &Registry) -> Result<Reply, RegistryError> {
        registry.create(self.name.as_str(), self.value)?;
        info!("Created account {} with value {}", self.name, self.value);
        Ok(Reply::text(StatusCode::CREATED, "create account success"))
    }
}
