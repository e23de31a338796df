use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Response;
use serde::Serialize;
use tracing::debug;

use crate::config::ApiSettings;
use crate::error::HttpError;

/// HTTP client for the product API.
///
/// Credentials and the base URL are taken from the [`ApiSettings`] passed to
/// each call, so configuration changes are picked up without rebuilding.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client with the request timeout from `settings`.
    pub fn new(settings: &ApiSettings) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST `payload` as JSON to `base_url + path` with basic authentication.
    ///
    /// The response is returned as-is; a non-success status is not an error.
    pub async fn post_json<T>(
        &self,
        settings: &ApiSettings,
        path: &str,
        payload: &T,
    ) -> Result<Response, HttpError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload)?;
        let url = format!("{}{}", settings.base_url, path);

        debug!(url = %url, bytes = body.len(), "Sending POST request");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header("charset", HeaderValue::from_static("utf-8"))
            .basic_auth(&settings.username, Some(&settings.password))
            .body(body)
            .send()
            .await
            .map_err(|source| HttpError::Network {
                url: url.clone(),
                source,
            })?;

        debug!(url = %url, status = %response.status(), "Received response");
        Ok(response)
    }
}
