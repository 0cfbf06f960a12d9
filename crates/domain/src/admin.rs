use chrono::{DateTime, Utc};
use gamedesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::PermissionTree;

/// Opaque administrator identifier assigned by the admin directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminId(NonEmptyString);

impl AdminId {
    /// Creates an identifier from the directory's value.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(Self)
            .map_err(|_| AppError::Validation("admin id must not be empty".to_owned()))
    }

    /// Returns the identifier as sent over the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for AdminId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Administrative role label.
///
/// The directory treats roles as free-form strings; unknown values are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminRole {
    /// Regular administrator.
    Admin,
    /// Administrator with platform-wide authority.
    SuperAdmin,
    /// Any other role label returned by the directory.
    Other(String),
}

impl AdminRole {
    /// Returns the transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::SuperAdmin => "SuperAdmin",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses a transport value, rejecting blank labels.
    pub fn parse(value: &str) -> AppResult<Self> {
        let trimmed = value.trim();
        match trimmed.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "" => Err(AppError::Validation("role must not be empty".to_owned())),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            _ => Ok(Self::Other(trimmed.to_owned())),
        }
    }
}

/// Account standing reported by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminStatus {
    /// Account in good standing.
    Active,
    /// Account locked by the platform; not editable.
    Banned,
}

impl AdminStatus {
    /// Returns the transport value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Banned => "Banned",
        }
    }

    /// Parses a transport value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "banned" => Ok(Self::Banned),
            _ => Err(AppError::Validation(format!(
                "unknown admin status '{value}'"
            ))),
        }
    }
}

/// Input for [`AdminRecord::new`].
#[derive(Debug, Clone)]
pub struct AdminRecordInput {
    /// Directory identifier.
    pub id: AdminId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Role label.
    pub role: AdminRole,
    /// Whether the account is enabled.
    pub is_active: bool,
    /// Account standing.
    pub status: AdminStatus,
    /// Permission tree, absent when the directory never assigned one.
    pub permissions: Option<PermissionTree>,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
    /// Creation timestamp assigned by the directory.
    pub created_at: DateTime<Utc>,
}

/// Persisted administrator identity plus its permission tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
    id: AdminId,
    name: String,
    email: String,
    phone: String,
    role: AdminRole,
    is_active: bool,
    status: AdminStatus,
    permissions: Option<PermissionTree>,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl AdminRecord {
    /// Creates a record from directory data.
    #[must_use]
    pub fn new(input: AdminRecordInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            role: input.role,
            is_active: input.is_active,
            status: input.status,
            permissions: input.permissions,
            last_login: input.last_login,
            created_at: input.created_at,
        }
    }

    /// Returns the directory identifier.
    #[must_use]
    pub fn id(&self) -> &AdminId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the contact phone.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Returns the role label.
    #[must_use]
    pub fn role(&self) -> &AdminRole {
        &self.role
    }

    /// Returns whether the account is enabled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the account standing.
    #[must_use]
    pub fn status(&self) -> AdminStatus {
        self.status
    }

    /// Returns the permission tree, if one was ever assigned.
    #[must_use]
    pub fn permissions(&self) -> Option<&PermissionTree> {
        self.permissions.as_ref()
    }

    /// Returns the last login timestamp.
    #[must_use]
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the permission editor may open this record.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status != AdminStatus::Banned
    }

    /// Returns whether the identity claim refers to this record.
    ///
    /// The subject is matched against the id; the email, when present and
    /// not blank, is matched without regard to case.
    #[must_use]
    pub fn matches_identity(&self, subject: &str, email: Option<&str>) -> bool {
        if self.id.as_str() == subject {
            return true;
        }

        let Some(email) = email.map(str::trim).filter(|email| !email.is_empty()) else {
            return false;
        };
        self.email.trim().eq_ignore_ascii_case(email)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{AdminId, AdminRecord, AdminRecordInput, AdminRole, AdminStatus};

    fn record(status: AdminStatus) -> AdminRecord {
        AdminRecord::new(input(status))
    }

    fn input(status: AdminStatus) -> AdminRecordInput {
        AdminRecordInput {
            id: AdminId::new("a-1").unwrap_or_else(|_| panic!("test")),
            name: "Ravi".to_owned(),
            email: "ravi@example.com".to_owned(),
            phone: "5550100".to_owned(),
            role: AdminRole::Admin,
            is_active: true,
            status,
            permissions: None,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_parsing_keeps_unknown_labels() {
        assert_eq!(AdminRole::parse("super_admin").ok(), Some(AdminRole::SuperAdmin));
        assert_eq!(AdminRole::parse("admin").ok(), Some(AdminRole::Admin));
        assert_eq!(
            AdminRole::parse(" Moderator ").ok(),
            Some(AdminRole::Other("Moderator".to_owned()))
        );
        assert!(AdminRole::parse("  ").is_err());
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!(AdminStatus::parse("BANNED").ok(), Some(AdminStatus::Banned));
        assert!(AdminStatus::parse("suspended").is_err());
    }

    #[test]
    fn banned_record_is_not_editable() {
        assert!(record(AdminStatus::Active).is_editable());
        assert!(!record(AdminStatus::Banned).is_editable());
    }

    #[test]
    fn identity_matches_id_or_email() {
        let admin = record(AdminStatus::Active);
        assert!(admin.matches_identity("a-1", None));
        assert!(admin.matches_identity("unknown", Some("RAVI@example.com")));
        assert!(!admin.matches_identity("unknown", None));
    }

    #[test]
    fn blank_email_never_matches_identity() {
        let admin = AdminRecord::new(AdminRecordInput {
            email: "  ".to_owned(),
            ..input(AdminStatus::Active)
        });

        assert!(!admin.matches_identity("unknown", Some("")));
        assert!(!admin.matches_identity("unknown", Some("   ")));
        assert!(!record(AdminStatus::Active).matches_identity("unknown", Some(" ")));
    }

    #[test]
    fn blank_admin_id_is_rejected() {
        assert!(AdminId::new(" ").is_err());
    }
}
