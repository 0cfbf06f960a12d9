//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod admin;
mod menu;
mod permission;

pub use admin::{AdminId, AdminRecord, AdminRecordInput, AdminRole, AdminStatus};
pub use menu::{MenuEntry, MenuSubItem, dashboard_menu, visible_entries};
pub use permission::{PermissionNode, PermissionTree, SubPermissionNode};
