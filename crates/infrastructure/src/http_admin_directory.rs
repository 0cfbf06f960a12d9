mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use gamedesk_application::{AdminDirectory, CreateAdminInput, CredentialProvider, UpdateAdminInput};
use gamedesk_core::{AppError, AppResult};
use gamedesk_domain::{AdminId, AdminRecord};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use wire::{
    AdminPayload, CreateAdminRequest, UpdateAdminRequest, error_message,
    permission_tree_to_payload, unwrap_envelope,
};

/// Admin directory backed by the platform's HTTP JSON API.
///
/// Transport failures, non-2xx statuses and undecodable bodies are all
/// reported as [`AppError::Directory`]. Requests are never retried.
/// Malformed records in a list response are skipped, not fatal.
pub struct HttpAdminDirectory {
    http_client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpAdminDirectory {
    /// Creates a directory client rooted at `base_url`.
    pub fn new(
        http_client: reqwest::Client,
        base_url: Url,
        credentials: Arc<dyn CredentialProvider>,
    ) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "admin directory url '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            credentials,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!(
                    "admin directory url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn admins_endpoint(&self) -> AppResult<Url> {
        self.endpoint(&["admins"])
    }

    fn admin_endpoint(&self, id: &AdminId) -> AppResult<Url> {
        self.endpoint(&["admins", id.as_str()])
    }

    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> AppResult<reqwest::Response> {
        let token = self.credentials.bearer_token().await.map_err(|error| {
            AppError::directory(None, format!("no credential for admin {operation}: {error}"))
        })?;

        debug!(operation, "calling admin directory");
        let response = request.bearer_auth(token).send().await.map_err(|error| {
            AppError::directory(
                None,
                format!("failed to call admin directory for {operation}: {error}"),
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(AppError::directory(
                Some(status.as_u16()),
                format!(
                    "admin directory {operation} failed: {}",
                    error_message(body.as_str())
                ),
            ));
        }

        Ok(response)
    }

    async fn decode_body(
        operation: &'static str,
        response: reqwest::Response,
    ) -> AppResult<Value> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|error| {
            AppError::directory(
                Some(status),
                format!("failed to read admin directory {operation} response: {error}"),
            )
        })?;

        let value = serde_json::from_slice::<Value>(&bytes).map_err(|error| {
            AppError::directory(
                Some(status),
                format!("admin directory {operation} response is not JSON: {error}"),
            )
        })?;

        Ok(unwrap_envelope(value))
    }

    async fn decode_admin(
        operation: &'static str,
        response: reqwest::Response,
    ) -> AppResult<AdminRecord> {
        let status = response.status().as_u16();
        let value = Self::decode_body(operation, response).await?;
        Self::translate(operation, status, value)
    }

    fn translate(operation: &'static str, status: u16, value: Value) -> AppResult<AdminRecord> {
        serde_json::from_value::<AdminPayload>(value)
            .map_err(|error| error.to_string())
            .and_then(|payload| payload.into_record().map_err(|error| error.to_string()))
            .map_err(|error| {
                AppError::directory(
                    Some(status),
                    format!("malformed admin in directory {operation} response: {error}"),
                )
            })
    }
}

#[async_trait]
impl AdminDirectory for HttpAdminDirectory {
    async fn list_admins(&self) -> AppResult<Vec<AdminRecord>> {
        let response = self
            .send("list", self.http_client.get(self.admins_endpoint()?))
            .await?;
        let status = response.status().as_u16();
        let value = Self::decode_body("list", response).await?;

        let Value::Array(items) = value else {
            return Err(AppError::directory(
                Some(status),
                "admin directory list response is not an array",
            ));
        };

        let mut admins = Vec::with_capacity(items.len());
        for item in items {
            let admin_id = item
                .get("id")
                .or_else(|| item.get("_id"))
                .and_then(Value::as_str)
                .unwrap_or("<missing>")
                .to_owned();
            match Self::translate("list", status, item) {
                Ok(admin) => admins.push(admin),
                Err(error) => warn!(
                    admin_id = %admin_id,
                    error = %error,
                    "skipping malformed admin in directory list"
                ),
            }
        }

        Ok(admins)
    }

    async fn create_admin(&self, input: CreateAdminInput) -> AppResult<AdminRecord> {
        let body = CreateAdminRequest {
            name: input.name.as_str(),
            email: input.email.as_str(),
            phone: input.phone.as_str(),
            password: input.password.as_str(),
            role: input.role.as_str(),
            permissions: permission_tree_to_payload(&input.permissions),
        };

        let response = self
            .send(
                "create",
                self.http_client.post(self.admins_endpoint()?).json(&body),
            )
            .await?;
        Self::decode_admin("create", response).await
    }

    async fn update_admin(
        &self,
        id: &AdminId,
        input: UpdateAdminInput,
    ) -> AppResult<AdminRecord> {
        let body = UpdateAdminRequest {
            name: input.name.as_str(),
            is_active: input.is_active,
            permissions: permission_tree_to_payload(&input.permissions),
        };

        let response = self
            .send(
                "update",
                self.http_client.put(self.admin_endpoint(id)?).json(&body),
            )
            .await?;
        Self::decode_admin("update", response).await
    }

    async fn delete_admin(&self, id: &AdminId) -> AppResult<()> {
        self.send("delete", self.http_client.delete(self.admin_endpoint(id)?))
            .await?;
        Ok(())
    }
}
