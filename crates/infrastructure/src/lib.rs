//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_admin_directory;
mod in_memory_admin_directory;
mod static_credential_provider;

pub use http_admin_directory::HttpAdminDirectory;
pub use in_memory_admin_directory::InMemoryAdminDirectory;
pub use static_credential_provider::StaticCredentialProvider;
