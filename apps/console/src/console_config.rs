use std::env;

use gamedesk_application::AccessFallback;
use gamedesk_core::{AdminIdentity, AppError, AppResult};
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Where the console reads and writes admin records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryBackend {
    /// The platform's HTTP admin directory.
    Http {
        base_url: Url,
        token: String,
        timeout_secs: u64,
    },
    /// A process-local directory filled with development seed admins.
    InMemory,
}

impl DirectoryBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::InMemory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub directory: DirectoryBackend,
    pub access_fallback: AccessFallback,
    pub acting_admin: Option<AdminIdentity>,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let directory = match read("DIRECTORY_BACKEND").as_deref().unwrap_or("http") {
            "http" => load_http_backend(&read)?,
            "memory" => DirectoryBackend::InMemory,
            other => {
                return Err(AppError::Validation(format!(
                    "DIRECTORY_BACKEND must be either 'http' or 'memory', got '{other}'"
                )));
            }
        };

        let access_fallback = read("ACCESS_FALLBACK_POLICY")
            .map(|value| AccessFallback::parse(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        let acting_admin = read("ACTING_ADMIN").map(|subject| {
            let email = subject.contains('@').then(|| subject.clone());
            AdminIdentity::new(subject, email)
        });

        Ok(Self {
            directory,
            access_fallback,
            acting_admin,
        })
    }
}

fn load_http_backend(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<DirectoryBackend> {
    let base_url = required(lookup, "DIRECTORY_API_BASE_URL")?;
    let base_url = Url::parse(base_url.as_str()).map_err(|error| {
        AppError::Validation(format!("invalid DIRECTORY_API_BASE_URL: {error}"))
    })?;

    let token = required(lookup, "DIRECTORY_API_TOKEN")?;

    let timeout_secs = lookup("DIRECTORY_HTTP_TIMEOUT_SECS")
        .map(|value| {
            value.parse::<u64>().map_err(|error| {
                AppError::Validation(format!("invalid DIRECTORY_HTTP_TIMEOUT_SECS: {error}"))
            })
        })
        .transpose()?
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(AppError::Validation(
            "DIRECTORY_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
        ));
    }

    Ok(DirectoryBackend::Http {
        base_url,
        token,
        timeout_secs,
    })
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
