//! HTTP client for the form service REST API

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::ApiError;
use crate::config::Config;
use crate::models::{CurrentUser, Form, FormResponse, FormWithStats};

/// Operations the dashboard needs from the form service.
///
/// Kept behind a trait so screens can be driven by a mock backend in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormsApi: Send + Sync {
    /// Resolve the user our session token belongs to. `None` means the
    /// token is absent or rejected, which is a signed-out state rather
    /// than an error.
    async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError>;

    /// List the current user's forms with their response totals.
    async fn list_forms(&self) -> Result<Vec<FormWithStats>, ApiError>;

    /// Create a form from a template and return the created form.
    async fn create_form(&self, template: &str) -> Result<Form, ApiError>;

    /// List submitted responses for one form.
    async fn list_responses(&self, form_id: &str) -> Result<Vec<FormResponse>, ApiError>;
}

/// `FormsApi` implementation speaking to a real backend over HTTP.
pub struct HttpFormsApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpFormsApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body. Rejected credentials map to
    /// `ApiError::Unauthorized`, any other non-2xx to `ApiError::Status`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} -> {}", path, status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl FormsApi for HttpFormsApi {
    async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError> {
        let path = "/api/me";
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status();
        debug!("{} -> {}", path, status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let user = serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })?;
        Ok(Some(user))
    }

    async fn list_forms(&self) -> Result<Vec<FormWithStats>, ApiError> {
        let path = "/api/forms";
        self.send_json(self.request(Method::GET, path), path).await
    }

    async fn create_form(&self, template: &str) -> Result<Form, ApiError> {
        let path = "/api/forms";
        let builder = self
            .request(Method::POST, path)
            .json(&serde_json::json!({ "template": template }));
        self.send_json(builder, path).await
    }

    async fn list_responses(&self, form_id: &str) -> Result<Vec<FormResponse>, ApiError> {
        let path = format!("/api/forms/{}/responses", form_id);
        self.send_json(self.request(Method::GET, &path), &path).await
    }
}
