use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, Notify};

use gamedesk_core::{AppError, AppResult};
use gamedesk_domain::{
    AdminId, AdminRecord, AdminRecordInput, AdminRole, AdminStatus, PermissionTree,
};

use crate::{AdminDirectory, CreateAdminInput, UpdateAdminInput};

pub(crate) fn admin_record(
    id: &str,
    name: &str,
    status: AdminStatus,
    permissions: Option<PermissionTree>,
) -> AdminRecord {
    AdminRecord::new(AdminRecordInput {
        id: AdminId::new(id).unwrap_or_else(|_| panic!("invalid test admin id")),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "5550100".to_owned(),
        role: AdminRole::Admin,
        is_active: true,
        status,
        permissions,
        last_login: None,
        created_at: Utc::now(),
    })
}

pub(crate) fn tree(granted: &[&str], revoked: &[&str]) -> PermissionTree {
    let mut tree = PermissionTree::new();
    for name in granted.iter().chain(revoked) {
        tree.add_top_level(name)
            .unwrap_or_else(|_| panic!("invalid test permission"));
    }
    for index in granted.len()..tree.len() {
        tree.toggle_granted(index)
            .unwrap_or_else(|_| panic!("invalid test permission index"));
    }
    tree
}

/// Holds the next list call after it has read its snapshot.
pub(crate) struct ListPause {
    pub(crate) started: Arc<Notify>,
    pub(crate) resume: Arc<Notify>,
}

#[derive(Default)]
pub(crate) struct FakeAdminDirectory {
    pub(crate) admins: Mutex<Vec<AdminRecord>>,
    pub(crate) calls: Mutex<Vec<&'static str>>,
    pub(crate) fail_reads: AtomicBool,
    pub(crate) fail_writes: AtomicBool,
    pub(crate) paused_list: Mutex<Option<ListPause>>,
}

impl FakeAdminDirectory {
    pub(crate) fn with_admins(admins: Vec<AdminRecord>) -> Self {
        Self {
            admins: Mutex::new(admins),
            ..Self::default()
        }
    }

    pub(crate) async fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    async fn record_call(&self, operation: &'static str) {
        self.calls.lock().await.push(operation);
    }

    fn write_failure(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::directory(None, "connection reset by peer"));
        }
        Ok(())
    }
}

#[async_trait]
impl AdminDirectory for FakeAdminDirectory {
    async fn list_admins(&self) -> AppResult<Vec<AdminRecord>> {
        self.record_call("list").await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::directory(Some(503), "service unavailable"));
        }

        let snapshot = self.admins.lock().await.clone();
        let pause = self.paused_list.lock().await.take();
        if let Some(pause) = pause {
            pause.started.notify_one();
            pause.resume.notified().await;
        }
        Ok(snapshot)
    }

    async fn create_admin(&self, input: CreateAdminInput) -> AppResult<AdminRecord> {
        self.record_call("create").await;
        self.write_failure()?;

        let mut admins = self.admins.lock().await;
        let admin = AdminRecord::new(AdminRecordInput {
            id: AdminId::new(format!("admin-{}", admins.len() + 1))?,
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
        self.record_call("update").await;
        self.write_failure()?;

        let mut admins = self.admins.lock().await;
        let slot = admins
            .iter_mut()
            .find(|admin| admin.id() == id)
            .ok_or_else(|| AppError::directory(Some(404), format!("admin '{id}' not found")))?;
        let updated = AdminRecord::new(AdminRecordInput {
            id: slot.id().clone(),
            name: input.name,
            email: slot.email().to_owned(),
            phone: slot.phone().to_owned(),
            role: slot.role().clone(),
            is_active: input.is_active,
            status: slot.status(),
            permissions: Some(input.permissions),
            last_login: slot.last_login(),
            created_at: slot.created_at(),
        });
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_admin(&self, id: &AdminId) -> AppResult<()> {
        self.record_call("delete").await;
        self.write_failure()?;

        let mut admins = self.admins.lock().await;
        let before = admins.len();
        admins.retain(|admin| admin.id() != id);
        if admins.len() == before {
            return Err(AppError::directory(Some(404), format!("admin '{id}' not found")));
        }
        Ok(())
    }
}
