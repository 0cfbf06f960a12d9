use gamedesk_application::{AdminDirectoryService, CreateAdminInput};
use gamedesk_core::AppResult;
use gamedesk_domain::{PermissionTree, dashboard_menu};
use tracing::info;

const DEV_SEED_OWNER_EMAIL: &str = "owner@gamedesk.local";
const DEV_SEED_OWNER_NAME: &str = "Local Owner";

const DEV_SEED_SUPPORT_EMAIL: &str = "support@gamedesk.local";
const DEV_SEED_SUPPORT_NAME: &str = "Support Desk";
const DEV_SEED_SUPPORT_PERMISSIONS: &[&str] = &["Dashboard", "Users"];

const DEV_SEED_PASSWORD: &str = "gamedesk";
const DEV_SEED_PHONE: &str = "5550100";

/// Fills an empty local directory with one full-access and one support admin.
pub async fn run(directory_service: &AdminDirectoryService) -> AppResult<()> {
    if !directory_service.admins().await?.is_empty() {
        return Ok(());
    }

    let mut owner_permissions = PermissionTree::new();
    for entry in dashboard_menu()? {
        owner_permissions.add_top_level(entry.permission_key())?;
    }

    let mut support_permissions = PermissionTree::new();
    for name in DEV_SEED_SUPPORT_PERMISSIONS {
        support_permissions.add_top_level(name)?;
    }

    for (name, email, role, permissions) in [
        (
            DEV_SEED_OWNER_NAME,
            DEV_SEED_OWNER_EMAIL,
            "SuperAdmin",
            owner_permissions,
        ),
        (
            DEV_SEED_SUPPORT_NAME,
            DEV_SEED_SUPPORT_EMAIL,
            "Admin",
            support_permissions,
        ),
    ] {
        directory_service
            .create_admin(CreateAdminInput {
                name: name.to_owned(),
                email: email.to_owned(),
                phone: DEV_SEED_PHONE.to_owned(),
                password: DEV_SEED_PASSWORD.to_owned(),
                role: role.to_owned(),
                permissions,
            })
            .await?;
    }

    info!(
        owner = DEV_SEED_OWNER_EMAIL,
        support = DEV_SEED_SUPPORT_EMAIL,
        "development admins seeded"
    );
    Ok(())
}
