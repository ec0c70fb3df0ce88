//! DELETE and PATCH: batch operations over every account

use tracing::debug;

use crate::http::response::{Reply, StatusMode};
use crate::registry::{Registry, RegistryError};

/// DELETE: remove every account
pub fn delete(registry: &Registry, mode: StatusMode) -> Result<Reply, RegistryError> {
    let removed = registry.delete_all()?;
    debug!("Deleted {} accounts", removed);
    Ok(Reply::text(
        mode.found(),
        "accounts have been successfully deleted",
    ))
}

/// PATCH: increment every account by one
pub fn patch(registry: &Registry, mode: StatusMode) -> Result<Reply, RegistryError> {
    let touched = registry.increment_all()?;
    debug!("Incremented {} accounts", touched);
    Ok(Reply::text(
        mode.found(),
        "accounts have been successfully patched",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_delete() {
        let registry = Registry::new();
        registry.create("carol", 1).unwrap();

        let reply = delete(&registry, StatusMode::Standard).unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert!(registry.is_empty().unwrap());

        assert_eq!(
            delete(&registry, StatusMode::Standard).unwrap_err(),
            RegistryError::Empty
        );
    }

    #[test]
    fn test_patch() {
        let registry = Registry::new();
        registry.create("bob", 5).unwrap();

        let reply = patch(&registry, StatusMode::Legacy).unwrap();
        assert_eq!(reply.status, StatusCode::FOUND);
        assert_eq!(reply.text_body(), Some("accounts have been successfully patched"));
        assert_eq!(registry.get("bob").unwrap().unwrap().value, 6);
    }

    #[test]
    fn test_patch_empty() {
        let registry = Registry::new();
        assert_eq!(
            patch(&registry, StatusMode::Standard).unwrap_err(),
            RegistryError::Empty
        );
    }
}
