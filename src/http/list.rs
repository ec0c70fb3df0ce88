use serde_json::json;
use tracing::debug;

use crate::http::response::{Reply, StatusMode};
use crate::registry::{Registry, RegistryError};

pub const LIST_SUCCESS: &str = "accounts have been successfully founded";

/// GET: enumerate every account
pub fn execute(registry: &Registry, mode: StatusMode) -> Result<Reply, RegistryError> {
    let accounts = registry.list()?;
    debug!(
        "Listed accounts: {:?}",
        accounts
            .iter()
            .map(|a| (a.name.as_str(), a.value))
            .collect::<Vec<_>>()
    );

    Ok(match mode {
        StatusMode::Standard => Reply::json(
            mode.found(),
            json!({ "message": LIST_SUCCESS, "accounts": accounts }),
        ),
        StatusMode::Legacy => Reply::text(mode.found(), LIST_SUCCESS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::Body;
    use axum::http::StatusCode;

    #[test]
    fn test_list_empty() {
        let registry = Registry::new();
        assert_eq!(
            execute(&registry, StatusMode::Standard).unwrap_err(),
            RegistryError::Empty
        );
    }

    #[test]
    fn test_list_enumerates_accounts() {
        let registry = Registry::new();
        registry.create("bob", 2).unwrap();
        registry.create("alice", 1).unwrap();

        let reply = execute(&registry, StatusMode::Standard).unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.body,
            Body::Json(json!({
                "message": LIST_SUCCESS,
                "accounts": [
                    {"name": "alice", "value": 1},
                    {"name": "bob", "value": 2},
                ],
            }))
        );
    }

    #[test]
    fn test_list_legacy() {
        let registry = Registry::new();
        registry.create("alice", 1).unwrap();

        let reply = execute(&registry, StatusMode::Legacy).unwrap();
        assert_eq!(reply.status, StatusCode::FOUND);
        assert_eq!(reply.text_body(), Some(LIST_SUCCESS));
    }
}
