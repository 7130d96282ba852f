//! Shared request plumbing.

use std::time::Duration;

use churchlink_core::config::api::ApiConfig;
use churchlink_core::error::{AppError, ErrorKind};
use churchlink_core::result::AppResult;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{status_error, transport_error};

/// Client for the ChurchLink `/v1` REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from the API settings.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            AppError::configuration(format!("Invalid api.base_url '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "api.base_url '{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `base_url/v1/<segments...>`. Segments are percent-encoded, so
    /// slugs and footer titles may contain any character.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("api.base_url cannot hold a path"))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    /// Start a request with authentication applied.
    pub(crate) fn request(&self, method: Method, url: Url) -> AppResult<RequestBuilder> {
        debug!(%method, %url, "Sending request");
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AppError::configuration(format!("Invalid api.token: {e}")))?;
            builder = builder.header(AUTHORIZATION, value);
        }
        Ok(builder)
    }

    /// Send a request and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &str,
    ) -> AppResult<T> {
        let response = self.send(builder, context).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(context, e))?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(context, error = %e, "Response did not match the expected schema");
            AppError::with_source(
                ErrorKind::Serialization,
                format!("{context}: invalid response body: {e}"),
                e,
            )
        })
    }

    /// Send a request whose response body is not needed.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder, context: &str) -> AppResult<()> {
        self.send(builder, context).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder, context: &str) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!(context, error = %e, "Request failed");
            transport_error(context, e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(context, status = status.as_u16(), "Backend rejected request");
        Err(status_error(context, status, &body))
    }
}
