use axum::http::{Method, StatusCode};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::http::batch;
use crate::http::create::CreateCmd;
use crate::http::list;
use crate::http::response::{Reply, StatusMode};
use crate::registry::{Registry, RegistryError};

/// Errors raised while handling one request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("parse create account request failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Account commands, one per supported HTTP method
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// POST {"name", "value"}
    Create(CreateCmd),
    /// GET
    List,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// Any other method
    Unsupported(Method),
}

impl Command {
    /// Build a command from the request method and body
    pub fn from_request(method: &Method, body: &[u8]) -> Result<Self, RequestError> {
        let cmd = match *method {
            Method::POST => Command::Create(CreateCmd::parse(body)?),
            Method::GET => Command::List,
            Method::DELETE => Command::Delete,
            Method::PATCH => Command::Patch,
            _ => Command::Unsupported(method.clone()),
        };
        Ok(cmd)
    }

    /// Run the command against the registry
    fn execute_internal(
        &self,
        registry: &Registry,
        mode: StatusMode,
    ) -> Result<Reply, RegistryError> {
        match self {
            Command::Create(cmd) => cmd.execute(registry),
            Command::List => list::execute(registry, mode),
            Command::Delete => batch::delete(registry, mode),
            Command::Patch => batch::patch(registry, mode),
            Command::Unsupported(_) => Ok(Reply::method_not_allowed()),
        }
    }

    /// Translate a registry failure into this command's reply
    fn failure(&self, err: &RegistryError, mode: StatusMode) -> Reply {
        match (self, err) {
            (Command::Create(_), RegistryError::AlreadyExists(_)) => {
                Reply::text(StatusCode::CONFLICT, "account already exist")
            }
            (Command::Create(_), RegistryError::InvalidName) => {
                Reply::text(mode.bad_input(), "account name must not be empty")
            }
            (Command::Create(_), _) => {
                Reply::text(StatusCode::INTERNAL_SERVER_ERROR, "create account failed")
            }
            (Command::Patch, RegistryError::Empty | RegistryError::NotFound(_)) => {
                Reply::text(StatusCode::NOT_FOUND, "such account not found")
            }
            (Command::Patch, RegistryError::Overflow(_)) => {
                Reply::text(StatusCode::CONFLICT, "account value overflow")
            }
            (_, RegistryError::Empty | RegistryError::NotFound(_)) => {
                Reply::text(StatusCode::NOT_FOUND, "accounts not found")
            }
            _ => Reply::text(StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        }
    }

    /// Parse and execute one request against the registry
    pub fn execute(
        method: &Method,
        body: &[u8],
        registry: &Registry,
        mode: StatusMode,
    ) -> Reply {
        let cmd = match Self::from_request(method, body) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("Rejected {} request: {}", method, e);
                return Reply::text(mode.bad_input(), "parse create account request failed");
            }
        };
        debug!("Dispatching {:?}", cmd);

        match cmd.execute_internal(registry, mode) {
            Ok(reply) => reply,
            Err(e) => {
                let reply = cmd.failure(&e, mode);
                if reply.status.is_server_error() {
                    error!("{} request failed: {}", method, e);
                } else {
                    warn!("{} request failed: {}", method, e);
                }
                reply
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(method: Method, body: &str, registry: &Registry) -> Reply {
        Command::execute(&method, body.as_bytes(), registry, StatusMode::Standard)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::from_request(&Method::POST, br#"{"name":"alice","value":10}"#).unwrap(),
            Command::Create(CreateCmd::new("alice", 10))
        );
        assert_eq!(Command::from_request(&Method::GET, b"").unwrap(), Command::List);
        assert_eq!(Command::from_request(&Method::DELETE, b"").unwrap(), Command::Delete);
        assert_eq!(Command::from_request(&Method::PATCH, b"ignored").unwrap(), Command::Patch);
        assert_eq!(
            Command::from_request(&Method::PUT, b"").unwrap(),
            Command::Unsupported(Method::PUT)
        );
    }

    #[test]
    fn test_parse_bad_create_body() {
        let err = Command::from_request(&Method::POST, b"{").unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[test]
    fn test_create_then_conflict() {
        let registry = Registry::new();
        let body = r#"{"name":"alice","value":10}"#;

        assert_eq!(run(Method::POST, body, &registry).status, StatusCode::CREATED);

        let reply = run(Method::POST, body, &registry);
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(reply.text_body(), Some("account already exist"));
    }

    #[test]
    fn test_create_malformed() {
        let registry = Registry::new();

        let reply = run(Method::POST, "not json", &registry);
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.text_body(), Some("parse create account request failed"));
        assert!(registry.is_empty().unwrap());

        let legacy = Command::execute(&Method::POST, b"not json", &registry, StatusMode::Legacy);
        assert_eq!(legacy.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_create_empty_name() {
        let registry = Registry::new();
        let reply = run(Method::POST, r#"{"name":"","value":1}"#, &registry);
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn test_empty_registry_not_found() {
        let registry = Registry::new();

        for method in [Method::GET, Method::DELETE] {
            let reply = run(method, "", &registry);
            assert_eq!(reply.status, StatusCode::NOT_FOUND);
            assert_eq!(reply.text_body(), Some("accounts not found"));
        }

        let reply = run(Method::PATCH, "", &registry);
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.text_body(), Some("such account not found"));
    }

    #[test]
    fn test_patch_then_delete() {
        let registry = Registry::new();
        run(Method::POST, r#"{"name":"bob","value":5}"#, &registry);

        assert_eq!(run(Method::PATCH, "", &registry).status, StatusCode::OK);
        assert_eq!(registry.get("bob").unwrap().unwrap().value, 6);

        assert_eq!(run(Method::DELETE, "", &registry).status, StatusCode::OK);
        assert_eq!(run(Method::GET, "", &registry).status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_patch_overflow() {
        let registry = Registry::new();
        registry.create("max", i64::MAX).unwrap();

        let reply = run(Method::PATCH, "", &registry);
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert_eq!(registry.get("max").unwrap().unwrap().value, i64::MAX);
    }

    #[test]
    fn test_unsupported_method() {
        let registry = Registry::new();
        let reply = run(Method::PUT, "", &registry);
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
