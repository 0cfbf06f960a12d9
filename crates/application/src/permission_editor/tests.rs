use std::sync::Arc;

use gamedesk_core::AppError;
use gamedesk_domain::AdminStatus;

use crate::AdminDirectoryService;
use crate::test_support::{FakeAdminDirectory, admin_record, tree};

use super::{EditorMode, PermissionEditor};

fn directory_with(
    admins: Vec<gamedesk_domain::AdminRecord>,
) -> (AdminDirectoryService, Arc<FakeAdminDirectory>) {
    let directory = Arc::new(FakeAdminDirectory::with_admins(admins));
    (AdminDirectoryService::new(directory.clone()), directory)
}

fn filled_create_session() -> PermissionEditor {
    let mut editor = PermissionEditor::for_create();
    editor.set_name("Ravi");
    editor.set_email("ravi@example.com");
    editor.set_phone("5550100");
    editor.set_password("hunter22");
    editor.set_role("Admin");
    editor
}

#[tokio::test]
async fn create_session_with_empty_email_is_rejected_before_any_call() {
    let (service, directory) = directory_with(Vec::new());
    let mut editor = filled_create_session();
    editor.set_email("");

    let result = editor.submit(&service).await;

    assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("email")));
    assert!(directory.calls.lock().await.is_empty());
}

#[tokio::test]
async fn rejected_create_session_can_be_fixed_and_resubmitted() {
    let (service, directory) = directory_with(Vec::new());
    let mut editor = filled_create_session();
    editor.set_role(" ");
    assert!(editor.add_permission("Dashboard").is_ok());

    assert!(editor.submit(&service).await.is_err());
    editor.set_role("SuperAdmin");
    let created = editor.submit(&service).await;

    let created = created.unwrap_or_else(|error| panic!("create failed: {error}"));
    assert_eq!(created.name(), "Ravi");
    assert_eq!(created.permissions().map(|tree| tree.len()), Some(1));
    assert_eq!(directory.call_count("create").await, 1);
}

#[test]
fn create_session_starts_with_empty_tree() {
    let editor = PermissionEditor::for_create();
    assert_eq!(editor.mode(), &EditorMode::Create);
    assert!(editor.permissions().is_empty());
}

#[test]
fn edit_session_on_banned_admin_is_refused() {
    let banned = admin_record("a-9", "Mallory", AdminStatus::Banned, None);

    let result = PermissionEditor::for_edit(&banned);

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn edit_session_works_on_a_copy_until_submitted() {
    let admin = admin_record(
        "a-1",
        "Ravi",
        AdminStatus::Active,
        Some(tree(&["Dashboard", "Users"], &[])),
    );
    let (service, directory) = directory_with(vec![admin.clone()]);
    let cached_before = service.admins().await.unwrap_or_default();

    let mut editor = PermissionEditor::for_edit(&admin).unwrap_or_else(|_| panic!("test"));
    assert!(editor.toggle_permission(0).is_ok());
    assert!(editor.add_permission("Games").is_ok());
    assert!(editor.add_sub_permission(2, "Edit").is_ok());

    assert_eq!(admin.permissions().map(|tree| tree.len()), Some(2));
    assert_eq!(service.cached_admins().await, Some(cached_before));

    editor.set_active(false);
    let updated = editor
        .submit(&service)
        .await
        .unwrap_or_else(|error| panic!("update failed: {error}"));

    assert!(!updated.is_active());
    let sent_tree = updated
        .permissions()
        .cloned()
        .unwrap_or_else(|| panic!("tree missing"));
    assert_eq!(&sent_tree, editor.permissions());
    assert_eq!(directory.call_count("update").await, 1);
}

#[tokio::test]
async fn cancelled_session_leaves_directory_untouched() {
    let admin = admin_record(
        "a-1",
        "Ravi",
        AdminStatus::Active,
        Some(tree(&["Dashboard"], &[])),
    );
    let (_, directory) = directory_with(vec![admin.clone()]);

    let mut editor = PermissionEditor::for_edit(&admin).unwrap_or_else(|_| panic!("test"));
    assert!(editor.remove_permission(0).is_ok());
    editor.cancel();

    assert!(directory.calls.lock().await.is_empty());
    assert_eq!(directory.admins.lock().await[0], admin);
}

#[tokio::test]
async fn edit_session_rejects_blank_name() {
    let admin = admin_record("a-1", "Ravi", AdminStatus::Active, None);
    let (service, directory) = directory_with(vec![admin.clone()]);

    let mut editor = PermissionEditor::for_edit(&admin).unwrap_or_else(|_| panic!("test"));
    editor.set_name("  ");

    assert!(matches!(
        editor.submit(&service).await,
        Err(AppError::Validation(_))
    ));
    assert!(directory.calls.lock().await.is_empty());
}

#[test]
fn editor_rejects_duplicate_permission_names() {
    let mut editor = PermissionEditor::for_create();
    assert!(editor.add_permission("Ads").is_ok());

    assert!(matches!(
        editor.add_permission("ADS"),
        Err(AppError::DuplicateName(_))
    ));
    assert_eq!(editor.permissions().len(), 1);
}

#[test]
fn editor_exposes_sub_permission_operations() {
    let mut editor = PermissionEditor::for_create();
    assert!(editor.add_permission("Games").is_ok());
    assert!(editor.add_sub_permission(0, "Create").is_ok());
    assert!(editor.add_sub_permission(0, "Delete").is_ok());

    assert_eq!(editor.toggle_sub_permission(0, 1).ok(), Some(false));
    assert!(editor.permissions().nodes()[0].granted());

    assert!(editor.revoke_with_children(0).is_ok());
    let node = &editor.permissions().nodes()[0];
    assert!(!node.granted());
    assert!(node.sub_permissions().iter().all(|sub| !sub.granted()));

    let removed = editor
        .remove_sub_permission(0, 0)
        .unwrap_or_else(|_| panic!("test"));
    assert_eq!(removed.name().as_str(), "Create");
}
