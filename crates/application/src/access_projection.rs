use std::collections::BTreeSet;

use gamedesk_core::{AdminIdentity, AppError, AppResult};
use gamedesk_domain::{AdminRecord, MenuEntry, visible_entries};
use tracing::warn;

use crate::AdminDirectoryService;

/// Menu returned when the acting admin's permissions cannot be determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessFallback {
    /// Show the full menu so a flaky directory never locks an admin out.
    #[default]
    FailOpen,
    /// Show nothing until permissions are known.
    FailClosed,
}

impl AccessFallback {
    /// Returns the configuration value for this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailOpen => "fail_open",
            Self::FailClosed => "fail_closed",
        }
    }

    /// Parses a configuration value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim() {
            "fail_open" => Ok(Self::FailOpen),
            "fail_closed" => Ok(Self::FailClosed),
            other => Err(AppError::Validation(format!(
                "access fallback must be either 'fail_open' or 'fail_closed', got '{other}'"
            ))),
        }
    }

    fn apply(self, menu: &[MenuEntry]) -> Vec<MenuEntry> {
        match self {
            Self::FailOpen => menu.to_vec(),
            Self::FailClosed => Vec::new(),
        }
    }
}

/// Computes the menu entries an acting admin may see.
///
/// Only top-level grant state is consulted. The projection never fails:
/// any resolution problem is logged and answered with the fallback policy.
#[derive(Clone)]
pub struct AccessProjectionService {
    directory_service: AdminDirectoryService,
    fallback: AccessFallback,
}

impl AccessProjectionService {
    /// Creates a projection over the shared directory cache.
    #[must_use]
    pub fn new(directory_service: AdminDirectoryService, fallback: AccessFallback) -> Self {
        Self {
            directory_service,
            fallback,
        }
    }

    /// Returns the configured fallback policy.
    #[must_use]
    pub fn fallback(&self) -> AccessFallback {
        self.fallback
    }

    /// Filters `menu` down to the entries unlocked for `identity`.
    ///
    /// `None` means the identity could not be resolved.
    pub async fn visible_menu(
        &self,
        identity: Option<&AdminIdentity>,
        menu: &[MenuEntry],
    ) -> Vec<MenuEntry> {
        match self.granted_permissions(identity).await {
            Ok(granted_names) => visible_entries(menu, &granted_names),
            Err(error) => {
                warn!(
                    subject = identity.map(AdminIdentity::subject).unwrap_or("<unresolved>"),
                    fallback = self.fallback.as_str(),
                    error = %error,
                    "admin permissions unresolved; applying menu fallback"
                );
                self.fallback.apply(menu)
            }
        }
    }

    /// Resolves the lowercased granted top-level permission names.
    pub async fn granted_permissions(
        &self,
        identity: Option<&AdminIdentity>,
    ) -> AppResult<BTreeSet<String>> {
        let identity = identity.ok_or_else(|| {
            AppError::AccessResolution("acting admin identity is unavailable".to_owned())
        })?;

        let admin = self
            .directory_service
            .find_by_identity(identity)
            .await
            .map_err(|error| AppError::AccessResolution(format!("admin lookup failed: {error}")))?
            .ok_or_else(|| {
                AppError::AccessResolution(format!(
                    "no admin record matches subject '{}'",
                    identity.subject()
                ))
            })?;

        granted_names_of(&admin)
    }
}

/// Filters `menu` for an already resolved record.
#[must_use]
pub fn project_menu(
    admin: Option<&AdminRecord>,
    menu: &[MenuEntry],
    fallback: AccessFallback,
) -> Vec<MenuEntry> {
    match admin.map(granted_names_of) {
        Some(Ok(granted_names)) => visible_entries(menu, &granted_names),
        Some(Err(_)) | None => fallback.apply(menu),
    }
}

fn granted_names_of(admin: &AdminRecord) -> AppResult<BTreeSet<String>> {
    admin
        .permissions()
        .map(|tree| tree.granted_names())
        .ok_or_else(|| {
            AppError::AccessResolution(format!(
                "admin '{}' has no permission list",
                admin.id()
            ))
        })
}
