//! In-memory account registry served over HTTP

pub mod config;
pub mod http;
pub mod registry;
pub mod server;

pub use registry::{Account, Registry, RegistryError};
pub use server::Server;
