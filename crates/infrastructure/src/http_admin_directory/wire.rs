use chrono::{DateTime, Utc};
use gamedesk_core::{AppError, AppResult};
use gamedesk_domain::{
    AdminId, AdminRecord, AdminRecordInput, AdminRole, AdminStatus, PermissionNode,
    PermissionTree, SubPermissionNode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SubPermissionPayload {
    pub(super) permission: String,
    pub(super) granted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PermissionPayload {
    pub(super) permission: String,
    pub(super) granted: bool,
    #[serde(default)]
    pub(super) sub_permissions: Vec<SubPermissionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AdminPayload {
    #[serde(alias = "_id")]
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    phone: String,
    role: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default = "default_is_active")]
    is_active: bool,
    #[serde(default)]
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    permissions: Option<Vec<PermissionPayload>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateAdminRequest<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) phone: &'a str,
    pub(super) password: &'a str,
    pub(super) role: &'a str,
    pub(super) permissions: Vec<PermissionPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateAdminRequest<'a> {
    pub(super) name: &'a str,
    pub(super) is_active: bool,
    pub(super) permissions: Vec<PermissionPayload>,
}

fn default_is_active() -> bool {
    true
}

impl AdminPayload {
    pub(super) fn into_record(self) -> AppResult<AdminRecord> {
        let id = AdminId::new(self.id)?;
        let status = match self.status.as_deref() {
            None | Some("") => AdminStatus::Active,
            Some(value) => AdminStatus::parse(value)?,
        };
        let permissions = self
            .permissions
            .map(permission_tree_from_payload)
            .transpose()
            .map_err(|error| {
                AppError::Validation(format!("admin '{id}' has an invalid permission list: {error}"))
            })?;

        Ok(AdminRecord::new(AdminRecordInput {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: AdminRole::parse(self.role.as_str())?,
            is_active: self.is_active,
            status,
            permissions,
            last_login: self.last_login,
            created_at: self.created_at,
        }))
    }
}

pub(super) fn permission_tree_from_payload(
    nodes: Vec<PermissionPayload>,
) -> AppResult<PermissionTree> {
    let nodes = nodes
        .into_iter()
        .map(|node| {
            let sub_permissions = node
                .sub_permissions
                .into_iter()
                .map(|sub| SubPermissionNode::new(sub.permission, sub.granted))
                .collect::<AppResult<Vec<_>>>()?;
            PermissionNode::new(node.permission, node.granted, sub_permissions)
        })
        .collect::<AppResult<Vec<_>>>()?;

    PermissionTree::from_nodes(nodes)
}

pub(super) fn permission_tree_to_payload(tree: &PermissionTree) -> Vec<PermissionPayload> {
    tree.nodes()
        .iter()
        .map(|node| PermissionPayload {
            permission: node.name().as_str().to_owned(),
            granted: node.granted(),
            sub_permissions: node
                .sub_permissions()
                .iter()
                .map(|sub| SubPermissionPayload {
                    permission: sub.name().as_str().to_owned(),
                    granted: sub.granted(),
                })
                .collect(),
        })
        .collect()
}

/// Returns the payload inside a `{ "data": ... }` envelope, or the value itself.
pub(super) fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut object)
            if object.contains_key("data")
                && !object.contains_key("id")
                && !object.contains_key("_id") =>
        {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Extracts a human-readable message from an error response body.
pub(super) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(ToOwned::to_owned))
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "<empty response body>".to_owned()
            } else {
                trimmed.to_owned()
            }
        })
}

#[cfg(test)]
mod tests {
    use gamedesk_domain::{AdminRole, AdminStatus};
    use serde_json::json;

    use super::{AdminPayload, error_message, permission_tree_to_payload, unwrap_envelope};

    fn decode(value: serde_json::Value) -> AdminPayload {
        serde_json::from_value(value).unwrap_or_else(|error| panic!("decode failed: {error}"))
    }

    #[test]
    fn admin_payload_translates_into_record() {
        let payload = decode(json!({
            "_id": "65f0c2",
            "name": "Ravi",
            "email": "ravi@example.com",
            "phone": "5550100",
            "role": "superAdmin",
            "status": "Banned",
            "isActive": false,
            "lastLogin": "2026-03-01T10:00:00Z",
            "createdAt": "2025-12-24T08:30:00Z",
            "permissions": [
                {"permission": "Games", "granted": true, "subPermissions": [
                    {"permission": "Delete", "granted": false}
                ]},
                {"permission": "Ads", "granted": false}
            ]
        }));

        let record = payload
            .into_record()
            .unwrap_or_else(|error| panic!("translate failed: {error}"));

        assert_eq!(record.id().as_str(), "65f0c2");
        assert_eq!(record.role(), &AdminRole::SuperAdmin);
        assert_eq!(record.status(), AdminStatus::Banned);
        assert!(!record.is_active());
        assert!(record.last_login().is_some());
        let tree = record.permissions().unwrap_or_else(|| panic!("tree missing"));
        assert_eq!(tree.len(), 2);
        assert!(!tree.nodes()[0].sub_permissions()[0].granted());
        assert!(tree.nodes()[1].sub_permissions().is_empty());
    }

    #[test]
    fn missing_permission_list_stays_absent() {
        let record = decode(json!({
            "id": "a-1",
            "name": "Ravi",
            "email": "ravi@example.com",
            "role": "Admin",
            "createdAt": "2025-12-24T08:30:00Z"
        }))
        .into_record()
        .unwrap_or_else(|error| panic!("translate failed: {error}"));

        assert!(record.permissions().is_none());
        assert_eq!(record.status(), AdminStatus::Active);
        assert!(record.is_active());
    }

    #[test]
    fn duplicate_permission_names_are_rejected() {
        let result = decode(json!({
            "id": "a-1",
            "name": "Ravi",
            "email": "ravi@example.com",
            "role": "Admin",
            "createdAt": "2025-12-24T08:30:00Z",
            "permissions": [
                {"permission": "Users", "granted": true},
                {"permission": "users", "granted": false}
            ]
        }))
        .into_record();

        assert!(result.is_err());
    }

    #[test]
    fn tree_serializes_with_wire_field_names() {
        let mut tree = gamedesk_domain::PermissionTree::new();
        tree.add_top_level("Games").unwrap_or_else(|_| panic!("test"));
        tree.add_sub_permission(0, "Edit").unwrap_or_else(|_| panic!("test"));

        let value = serde_json::to_value(permission_tree_to_payload(&tree))
            .unwrap_or_else(|_| panic!("test"));

        assert_eq!(
            value,
            json!([{"permission": "Games", "granted": true, "subPermissions": [
                {"permission": "Edit", "granted": true}
            ]}])
        );
    }

    #[test]
    fn envelope_is_unwrapped_only_when_present() {
        assert_eq!(unwrap_envelope(json!({"data": [1, 2]})), json!([1, 2]));
        assert_eq!(
            unwrap_envelope(json!({"id": "a-1", "data": "x"})),
            json!({"id": "a-1", "data": "x"})
        );
        assert_eq!(unwrap_envelope(json!([1])), json!([1]));
    }

    #[test]
    fn error_message_prefers_json_message_field() {
        assert_eq!(error_message(r#"{"message":"email taken"}"#), "email taken");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(error_message(""), "<empty response body>");
    }
}
