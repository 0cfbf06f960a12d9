use async_trait::async_trait;

use gamedesk_core::{AppError, AppResult};
use gamedesk_domain::{AdminId, AdminRecord, AdminRole, PermissionTree};

/// Draft submitted to the directory when creating an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAdminInput {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Initial password; never echoed back by the directory.
    pub password: String,
    /// Role label.
    pub role: String,
    /// Initial permission tree.
    pub permissions: PermissionTree,
}

impl CreateAdminInput {
    /// Checks that every required field is filled in.
    pub fn validate(&self) -> AppResult<()> {
        let missing: Vec<&str> = [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("password", self.password.as_str()),
            ("role", self.role.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "required fields are empty: {}",
                missing.join(", ")
            )));
        }

        AdminRole::parse(self.role.as_str()).map(|_| ())
    }
}

/// Fields sent when updating an admin; everything else is server-managed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAdminInput {
    /// Display name.
    pub name: String,
    /// Whether the account is enabled.
    pub is_active: bool,
    /// Full replacement permission tree.
    pub permissions: PermissionTree,
}

/// Port for the external admin directory.
///
/// Every failure is reported as [`AppError::Directory`].
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Fetches every admin record.
    async fn list_admins(&self) -> AppResult<Vec<AdminRecord>>;

    /// Creates an admin and returns the persisted record.
    async fn create_admin(&self, input: CreateAdminInput) -> AppResult<AdminRecord>;

    /// Replaces name, active flag and permission tree of an admin.
    async fn update_admin(
        &self,
        id: &AdminId,
        input: UpdateAdminInput,
    ) -> AppResult<AdminRecord>;

    /// Permanently deletes an admin.
    async fn delete_admin(&self, id: &AdminId) -> AppResult<()>;
}

/// Port supplying the bearer credential for directory calls.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the current bearer token.
    async fn bearer_token(&self) -> AppResult<String>;
}
