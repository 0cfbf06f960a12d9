use gamedesk_core::{AppError, AppResult};
use gamedesk_domain::{AdminId, AdminRecord, PermissionNode, PermissionTree, SubPermissionNode};
use tracing::debug;

use crate::{AdminDirectoryService, CreateAdminInput, UpdateAdminInput};

/// Whether an editor session creates a new admin or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Draft for a new admin; the tree starts empty.
    Create,
    /// Working copy of an existing admin.
    Edit {
        /// Identifier of the admin being edited.
        admin_id: AdminId,
    },
}

/// One in-progress create or edit session over an admin's permission tree.
///
/// The session owns its tree. Nothing reaches the directory until
/// [`PermissionEditor::submit`] succeeds, and [`PermissionEditor::cancel`]
/// simply drops the working copy.
#[derive(Debug, Clone)]
pub struct PermissionEditor {
    mode: EditorMode,
    name: String,
    email: String,
    phone: String,
    password: String,
    role: String,
    is_active: bool,
    permissions: PermissionTree,
}

impl PermissionEditor {
    /// Opens a create session with an empty draft.
    #[must_use]
    pub fn for_create() -> Self {
        Self {
            mode: EditorMode::Create,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            role: String::new(),
            is_active: true,
            permissions: PermissionTree::new(),
        }
    }

    /// Opens an edit session on a copy of `admin`.
    ///
    /// Banned admins cannot be edited.
    pub fn for_edit(admin: &AdminRecord) -> AppResult<Self> {
        if !admin.is_editable() {
            return Err(AppError::Forbidden(format!(
                "admin '{}' is banned and cannot be edited",
                admin.id()
            )));
        }

        Ok(Self {
            mode: EditorMode::Edit {
                admin_id: admin.id().clone(),
            },
            name: admin.name().to_owned(),
            email: admin.email().to_owned(),
            phone: admin.phone().to_owned(),
            password: String::new(),
            role: admin.role().as_str().to_owned(),
            is_active: admin.is_active(),
            permissions: admin.permissions().cloned().unwrap_or_default(),
        })
    }

    /// Returns the session mode.
    #[must_use]
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Returns the working name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the working active flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the working permission tree.
    #[must_use]
    pub fn permissions(&self) -> &PermissionTree {
        &self.permissions
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Sets the contact email. Only sent when creating.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Sets the contact phone. Only sent when creating.
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    /// Sets the initial password. Only sent when creating.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Sets the role label. Only sent when creating.
    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }

    /// Sets the active flag. Only sent when editing.
    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Adds a granted top-level permission.
    pub fn add_permission(&mut self, name: &str) -> AppResult<()> {
        self.permissions.add_top_level(name)
    }

    /// Removes a top-level permission.
    pub fn remove_permission(&mut self, index: usize) -> AppResult<PermissionNode> {
        self.permissions.remove_top_level(index)
    }

    /// Adds a granted sub-permission under a top-level permission.
    pub fn add_sub_permission(&mut self, parent_index: usize, name: &str) -> AppResult<()> {
        self.permissions.add_sub_permission(parent_index, name)
    }

    /// Removes a sub-permission.
    pub fn remove_sub_permission(
        &mut self,
        parent_index: usize,
        sub_index: usize,
    ) -> AppResult<SubPermissionNode> {
        self.permissions
            .remove_sub_permission(parent_index, sub_index)
    }

    /// Flips the grant flag of a top-level permission.
    pub fn toggle_permission(&mut self, index: usize) -> AppResult<bool> {
        self.permissions.toggle_granted(index)
    }

    /// Flips the grant flag of a sub-permission.
    pub fn toggle_sub_permission(&mut self, parent_index: usize, sub_index: usize) -> AppResult<bool> {
        self.permissions.toggle_sub_granted(parent_index, sub_index)
    }

    /// Revokes a top-level permission and all of its sub-permissions.
    pub fn revoke_with_children(&mut self, index: usize) -> AppResult<()> {
        self.permissions.revoke_with_children(index)
    }

    /// Sends the session to the directory.
    ///
    /// Validation failures return before any network call and leave the
    /// session untouched so the caller can fix the input and retry.
    pub async fn submit(&self, directory: &AdminDirectoryService) -> AppResult<AdminRecord> {
        match &self.mode {
            EditorMode::Create => {
                let input = CreateAdminInput {
                    name: self.name.trim().to_owned(),
                    email: self.email.trim().to_owned(),
                    phone: self.phone.trim().to_owned(),
                    password: self.password.clone(),
                    role: self.role.trim().to_owned(),
                    permissions: self.permissions.clone(),
                };
                input.validate()?;
                directory.create_admin(input).await
            }
            EditorMode::Edit { admin_id } => {
                if self.name.trim().is_empty() {
                    return Err(AppError::Validation("name must not be empty".to_owned()));
                }

                directory
                    .update_admin(
                        admin_id,
                        UpdateAdminInput {
                            name: self.name.trim().to_owned(),
                            is_active: self.is_active,
                            permissions: self.permissions.clone(),
                        },
                    )
                    .await
            }
        }
    }

    /// Discards the session without contacting the directory.
    pub fn cancel(self) {
        debug!(mode = ?self.mode, "permission editor session cancelled");
    }
}

#[cfg(test)]
mod tests;
