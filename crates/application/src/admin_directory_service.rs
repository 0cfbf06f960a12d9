use std::sync::Arc;

use gamedesk_core::{AdminIdentity, AppError, AppResult};
use gamedesk_domain::{AdminId, AdminRecord};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::{AdminDirectory, CreateAdminInput, UpdateAdminInput};

/// Client-side cache of the admin directory.
///
/// Reads are served from the cached list once it has been loaded. Every
/// successful write triggers a full refetch; a failed write leaves the cache
/// exactly as it was. Fetches are serialized, so a list fetched before a
/// write can never overwrite the list fetched after it.
#[derive(Clone)]
pub struct AdminDirectoryService {
    directory: Arc<dyn AdminDirectory>,
    cache: Arc<RwLock<Option<Vec<AdminRecord>>>>,
    fetch_lock: Arc<Mutex<()>>,
}

impl AdminDirectoryService {
    /// Creates a service with an empty cache.
    #[must_use]
    pub fn new(directory: Arc<dyn AdminDirectory>) -> Self {
        Self {
            directory,
            cache: Arc::new(RwLock::new(None)),
            fetch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the admin list, loading it on first use.
    pub async fn admins(&self) -> AppResult<Vec<AdminRecord>> {
        if let Some(admins) = self.cache.read().await.as_ref() {
            return Ok(admins.clone());
        }

        self.refresh().await
    }

    /// Returns the cached list without touching the directory.
    pub async fn cached_admins(&self) -> Option<Vec<AdminRecord>> {
        self.cache.read().await.clone()
    }

    /// Reloads the full admin list from the directory.
    ///
    /// On failure the previous cache content is kept.
    pub async fn refresh(&self) -> AppResult<Vec<AdminRecord>> {
        let _fetch_guard = self.fetch_lock.lock().await;
        let admins = self.directory.list_admins().await?;
        debug!(admin_count = admins.len(), "admin directory loaded");
        *self.cache.write().await = Some(admins.clone());
        Ok(admins)
    }

    /// Finds one admin by directory identifier.
    pub async fn find_admin(&self, id: &AdminId) -> AppResult<Option<AdminRecord>> {
        Ok(self
            .admins()
            .await?
            .into_iter()
            .find(|admin| admin.id() == id))
    }

    /// Finds the record referred to by an identity claim.
    ///
    /// Always reloads the list first so grants changed by other clients are
    /// seen on the next lookup.
    pub async fn find_by_identity(
        &self,
        identity: &AdminIdentity,
    ) -> AppResult<Option<AdminRecord>> {
        Ok(self
            .refresh()
            .await?
            .into_iter()
            .find(|admin| admin.matches_identity(identity.subject(), identity.email())))
    }

    /// Creates an admin after checking the required fields.
    pub async fn create_admin(&self, input: CreateAdminInput) -> AppResult<AdminRecord> {
        input.validate()?;

        let admin = self.directory.create_admin(input).await?;
        info!(admin_id = %admin.id(), email = %admin.email(), "admin created");

        self.refetch_after_write("create").await;
        Ok(admin)
    }

    /// Sends the full name, active flag and permission tree of an admin.
    pub async fn update_admin(
        &self,
        id: &AdminId,
        input: UpdateAdminInput,
    ) -> AppResult<AdminRecord> {
        let banned = self
            .cache
            .read()
            .await
            .as_ref()
            .and_then(|admins| admins.iter().find(|admin| admin.id() == id))
            .is_some_and(|admin| !admin.is_editable());
        if banned {
            return Err(AppError::Forbidden(format!(
                "admin '{id}' is banned and cannot be edited"
            )));
        }

        let admin = self.directory.update_admin(id, input).await?;
        info!(
            admin_id = %admin.id(),
            permission_count = admin.permissions().map_or(0, |tree| tree.len()),
            "admin updated"
        );

        self.refetch_after_write("update").await;
        Ok(admin)
    }

    /// Permanently deletes an admin.
    ///
    /// Failures are reported as-is; nothing is retried or rolled back.
    pub async fn delete_admin(&self, id: &AdminId) -> AppResult<()> {
        self.directory.delete_admin(id).await?;
        info!(admin_id = %id, "admin deleted");

        self.refetch_after_write("delete").await;
        Ok(())
    }

    async fn refetch_after_write(&self, operation: &'static str) {
        if let Err(error) = self.refresh().await {
            warn!(
                operation,
                error = %error,
                "admin list refetch failed after write; cache invalidated"
            );
            *self.cache.write().await = None;
        }
    }
}
