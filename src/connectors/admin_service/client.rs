use crate::connectors::config::AdminServiceConfig;
use crate::connectors::errors::ConnectorError;
use crate::forms::NewUserForm;
use crate::models::{SessionInfo, UserRecord};

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::Instrument;

use super::connector::AdminServiceConnector;
use super::PageQuery;

/// HTTP-based admin service client
#[derive(Debug, Clone)]
pub struct AdminServiceClient {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
    pub(crate) auth_token: Option<String>,
}

impl AdminServiceClient {
    /// Create new admin service client
    pub fn new(config: AdminServiceConfig) -> Result<Self, ConnectorError> {
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConnectorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            auth_token: config.auth_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request inside `span` and turn any non-2xx status into a `ConnectorError`.
    async fn send(
        &self,
        req: RequestBuilder,
        span: tracing::Span,
        context: &str,
    ) -> Result<reqwest::Response, ConnectorError> {
        let resp = self
            .with_auth(req)
            .send()
            .instrument(span)
            .await
            .map_err(|e| {
                tracing::error!("{} error: {:?}", context, e);
                ConnectorError::from(e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "{} rejected", context);
            return Err(ConnectorError::from_status(status, context, &body));
        }

        Ok(resp)
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ConnectorError> {
        let text = resp
            .text()
            .await
            .map_err(|e| ConnectorError::HttpError(e.to_string()))?;
        serde_json::from_str::<T>(&text)
            .map_err(|e| ConnectorError::InvalidResponse(format!("{}: {}", e, text)))
    }
}

#[async_trait::async_trait]
impl AdminServiceConnector for AdminServiceClient {
    async fn get_account(&self) -> Result<SessionInfo, ConnectorError> {
        let span = tracing::info_span!("admin_service_get_account");

        let url = format!("{}/api/account", self.base_url);
        let resp = self
            .send(self.http_client.get(&url), span, "GET /api/account failed")
            .await?;

        Self::read_json::<SessionInfo>(resp).await
    }

    async fn list_users(&self, query: &PageQuery) -> Result<Vec<UserRecord>, ConnectorError> {
        let span = tracing::info_span!(
            "admin_service_list_users",
            page = query.page,
            size = query.size
        );

        let url = format!(
            "{}/api/admin/users?{}",
            self.base_url,
            query.to_query_string()
        );
        let resp = self
            .send(self.http_client.get(&url), span, "GET /api/admin/users failed")
            .await?;

        let users = Self::read_json::<Vec<UserRecord>>(resp).await?;
        tracing::debug!("Fetched {} users", users.len());
        Ok(users)
    }

    async fn delete_user(&self, login: &str) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("admin_service_delete_user", login = %login);

        let url = format!(
            "{}/api/admin/users/{}",
            self.base_url,
            urlencoding::encode(login)
        );
        // Body is either empty or an acknowledgement; neither is needed.
        self.send(
            self.http_client.delete(&url),
            span,
            "DELETE /api/admin/users failed",
        )
        .await?;

        Ok(())
    }

    async fn create_user(&self, form: &NewUserForm) -> Result<UserRecord, ConnectorError> {
        let span = tracing::info_span!(
            "admin_service_create_user",
            email = %form.email,
            role = %form.role
        );

        let url = format!("{}/api/admin/users", self.base_url);
        let resp = self
            .send(
                self.http_client.post(&url).json(form),
                span,
                "POST /api/admin/users failed",
            )
            .await?;

        Self::read_json::<UserRecord>(resp).await
    }
}
