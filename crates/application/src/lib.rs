//! Application services and ports.

#![forbid(unsafe_code)]

mod access_projection;
mod admin_directory_service;
mod directory_ports;
mod permission_editor;

#[cfg(test)]
mod test_support;

pub use access_projection::{AccessFallback, AccessProjectionService, project_menu};
pub use admin_directory_service::AdminDirectoryService;
pub use directory_ports::{AdminDirectory, CreateAdminInput, CredentialProvider, UpdateAdminInput};
pub use permission_editor::{EditorMode, PermissionEditor};
