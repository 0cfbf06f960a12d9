//! Gamedesk operator console for the admin directory.

#![forbid(unsafe_code)]

mod console_config;
mod dev_seed;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use gamedesk_application::{AccessProjectionService, AdminDirectory, AdminDirectoryService};
use gamedesk_core::{AppError, AppResult};
use gamedesk_domain::{AdminRecord, dashboard_menu};
use gamedesk_infrastructure::{
    HttpAdminDirectory, InMemoryAdminDirectory, StaticCredentialProvider,
};
use tracing::{info, warn};

use crate::console_config::{ConsoleConfig, DirectoryBackend, init_tracing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Admins,
    Menu,
}

impl Command {
    fn parse(value: Option<&str>) -> AppResult<Self> {
        match value.unwrap_or("admins") {
            "admins" => Ok(Self::Admins),
            "menu" => Ok(Self::Menu),
            other => Err(AppError::Validation(format!(
                "unknown command '{other}', expected 'admins' or 'menu'"
            ))),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let command = Command::parse(env::args().nth(1).as_deref())?;
    let config = ConsoleConfig::load()?;

    let directory_service = AdminDirectoryService::new(build_directory(&config.directory)?);
    if config.directory == DirectoryBackend::InMemory {
        warn!("using in-memory admin directory; changes are lost on exit");
        dev_seed::run(&directory_service).await?;
    }

    info!(
        directory_backend = config.directory.as_str(),
        access_fallback = config.access_fallback.as_str(),
        "gamedesk-console started"
    );

    match command {
        Command::Admins => print_admins(&directory_service).await,
        Command::Menu => {
            let projection =
                AccessProjectionService::new(directory_service, config.access_fallback);
            let menu = dashboard_menu()?;
            let visible = projection
                .visible_menu(config.acting_admin.as_ref(), &menu)
                .await;

            for entry in &visible {
                println!("{:<20} {}", entry.label(), entry.path());
                for sub_item in entry.sub_items() {
                    println!("  {:<18} {}", sub_item.label(), sub_item.path());
                }
            }
            info!(
                visible = visible.len(),
                total = menu.len(),
                "menu projection rendered"
            );
            Ok(())
        }
    }
}

fn build_directory(backend: &DirectoryBackend) -> AppResult<Arc<dyn AdminDirectory>> {
    match backend {
        DirectoryBackend::Http {
            base_url,
            token,
            timeout_secs,
        } => {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(*timeout_secs))
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build HTTP client: {error}"))
                })?;
            info!(directory_base_url = %base_url, "using HTTP admin directory");

            Ok(Arc::new(HttpAdminDirectory::new(
                http_client,
                base_url.clone(),
                Arc::new(StaticCredentialProvider::new(token.as_str())),
            )?))
        }
        DirectoryBackend::InMemory => Ok(Arc::new(InMemoryAdminDirectory::new())),
    }
}

async fn print_admins(directory_service: &AdminDirectoryService) -> AppResult<()> {
    let admins = directory_service.admins().await?;

    for admin in &admins {
        println!("{}", describe_admin(admin));
    }
    info!(admin_count = admins.len(), "admin directory listed");
    Ok(())
}

fn describe_admin(admin: &AdminRecord) -> String {
    let permissions = admin
        .permissions()
        .map(|tree| {
            tree.nodes()
                .iter()
                .map(|node| {
                    let marker = if node.granted() { '+' } else { '-' };
                    format!("{marker}{}", node.name())
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_else(|| "<unassigned>".to_owned());

    format!(
        "{:<26} {:<24} {:<12} {:<7} active={:<5} {}",
        admin.id().as_str(),
        admin.email(),
        admin.role().as_str(),
        admin.status().as_str(),
        admin.is_active(),
        permissions
    )
}
