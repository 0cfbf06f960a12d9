use async_trait::async_trait;
use chrono::Utc;
use gamedesk_application::{AdminDirectory, CreateAdminInput, UpdateAdminInput};
use gamedesk_core::{AppError, AppResult};
use gamedesk_domain::{AdminId, AdminRecord, AdminRecordInput, AdminRole, AdminStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory admin directory implementation.
#[derive(Debug, Default)]
pub struct InMemoryAdminDirectory {
    admins: RwLock<Vec<AdminRecord>>,
}

impl InMemoryAdminDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with `admins`.
    #[must_use]
    pub fn with_admins(admins: Vec<AdminRecord>) -> Self {
        Self {
            admins: RwLock::new(admins),
        }
    }
}

#[async_trait]
impl AdminDirectory for InMemoryAdminDirectory {
    async fn list_admins(&self) -> AppResult<Vec<AdminRecord>> {
        Ok(self.admins.read().await.clone())
    }

    async fn create_admin(&self, input: CreateAdminInput) -> AppResult<AdminRecord> {
        input.validate().map_err(|error| AppError::directory(Some(400), error.to_string()))?;

        let mut admins = self.admins.write().await;
        if admins
            .iter()
            .any(|admin| admin.email().eq_ignore_ascii_case(input.email.as_str()))
        {
            return Err(AppError::directory(
                Some(409),
                format!("admin with email '{}' already exists", input.email),
            ));
        }

        let admin = AdminRecord::new(AdminRecordInput {
            id: AdminId::new(Uuid::new_v4().to_string())?,
            name: input.name,
            email: input.email,
            phone: input.phone,
            role: AdminRole::parse(input.role.as_str())?,
            is_active: true,
            status: AdminStatus::Active,
            permissions: Some(input.permissions),
            last_login: None,
            created_at: Utc::now(),
        });
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn update_admin(
        &self,
        id: &AdminId,
        input: UpdateAdminInput,
    ) -> AppResult<AdminRecord> {
        let mut admins = self.admins.write().await;
        let stored = admins
            .iter_mut()
            .find(|admin| admin.id() == id)
            .ok_or_else(|| AppError::directory(Some(404), format!("admin '{id}' not found")))?;

        let updated = AdminRecord::new(AdminRecordInput {
            id: stored.id().clone(),
            name: input.name,
            email: stored.email().to_owned(),
            phone: stored.phone().to_owned(),
            role: stored.role().clone(),
            is_active: input.is_active,
            status: stored.status(),
            permissions: Some(input.permissions),
            last_login: stored.last_login(),
            created_at: stored.created_at(),
        });
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete_admin(&self, id: &AdminId) -> AppResult<()> {
        let mut admins = self.admins.write().await;
        let count_before = admins.len();
        admins.retain(|admin| admin.id() != id);

        if admins.len() == count_before {
            return Err(AppError::directory(
                Some(404),
                format!("admin '{id}' not found"),
            ));
        }

        Ok(())
    }
}
