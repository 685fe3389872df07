//! REST client for the Rookery observation API.
//!
//! Wraps the `/api` endpoints using [`reqwest`]. Reads go through
//! [`ApiClient::fetch_json`], which retries transient failures; writes are
//! sent once and report the server's message on failure.

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use rookery_core::observation::ObservationPayload;
use rookery_core::types::DbId;
use rookery_core::models::observation::Observation;
use rookery_core::models::stats::{LocationMetric, ObservationTotals};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::retry::{backoff_delay, RetryConfig};

/// Fallback when an error body carries no usable message.
const GENERIC_ERROR: &str = "An error occurred while fetching the data";

/// A photo to attach to a create or update request.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    success: bool,
}

/// HTTP client for a single Rookery server.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl ApiClient {
    /// Create a client for the server at `base_url`, e.g.
    /// `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Replace the retry strategy used for reads.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    // ---- reads ----

    /// `GET /api/observations`
    pub async fn list_observations(&self) -> Result<Vec<Observation>, ClientError> {
        self.fetch_json("/api/observations").await
    }

    /// `GET /api/observations/{id}`
    pub async fn get_observation(&self, id: DbId) -> Result<Observation, ClientError> {
        self.fetch_json(&format!("/api/observations/{id}")).await
    }

    /// `GET /api/stats`
    pub async fn stats(&self) -> Result<ObservationTotals, ClientError> {
        self.fetch_json("/api/stats").await
    }

    /// `GET /api/location-metrics`
    pub async fn location_metrics(&self) -> Result<Vec<LocationMetric>, ClientError> {
        self.fetch_json("/api/location-metrics").await
    }

    /// GET `path` and decode the JSON body, retrying with exponential
    /// backoff.
    ///
    /// Each attempt is bounded by [`RetryConfig::timeout`]. Non-retryable
    /// errors are returned as-is; once every attempt has failed the last
    /// error is wrapped in [`ClientError::RetriesExhausted`].
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        let attempts = self.retry.retries + 1;
        let mut attempt = 0u32;

        loop {
            let request = self.client.get(&url).timeout(self.retry.timeout);
            let err = match Self::execute(request).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            attempt += 1;
            if attempt >= attempts {
                tracing::error!(url = %url, attempts, error = %err, "Giving up on request");
                return Err(ClientError::RetriesExhausted {
                    attempts,
                    last_error: err.to_string(),
                });
            }

            let delay = backoff_delay(attempt - 1, &self.retry);
            tracing::warn!(
                url = %url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Request failed, retrying",
            );
            tokio::time::sleep(delay).await;
        }
    }

    // ---- writes ----

    /// `POST /api/observations`
    pub async fn create_observation(
        &self,
        payload: &ObservationPayload,
        image: Option<ImageAttachment>,
    ) -> Result<Observation, ClientError> {
        let form = build_form(payload, image)?;
        let request = self
            .client
            .post(self.url("/api/observations"))
            .multipart(form);
        Self::execute(request).await
    }

    /// `PUT /api/observations/{id}`
    ///
    /// Without an `image` the stored photo is kept.
    pub async fn update_observation(
        &self,
        id: DbId,
        payload: &ObservationPayload,
        image: Option<ImageAttachment>,
    ) -> Result<Observation, ClientError> {
        let form = build_form(payload, image)?;
        let request = self
            .client
            .put(self.url(&format!("/api/observations/{id}")))
            .multipart(form);
        Self::execute(request).await
    }

    /// `DELETE /api/observations/{id}`
    pub async fn delete_observation(&self, id: DbId) -> Result<(), ClientError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/observations/{id}")));
        let response: DeleteResponse = Self::execute(request).await?;
        if !response.success {
            tracing::warn!(id, "Delete acknowledged without success flag");
        }
        Ok(())
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    /// Decode a JSON response, turning non-2xx statuses into
    /// [`ClientError::Api`] with the server's message.
    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("application/json") {
            return Err(ClientError::UnexpectedContentType {
                status: status.as_u16(),
                content_type,
            });
        }

        let body: Value = response.json().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_value(body)?)
    }
}

fn build_form(
    payload: &ObservationPayload,
    image: Option<ImageAttachment>,
) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("location", payload.location.as_str().to_string())
        .text("species", payload.species.clone())
        .text("adult_count", payload.adult_count.to_string())
        .text("chick_count", payload.chick_count.to_string())
        .text("notes", payload.notes.clone());

    if let Some(image) = image {
        let part = Part::bytes(image.data)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        form = form.part("image", part);
    }

    Ok(form)
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": {"message": ..}}`, `{"error": "..."}` and the
/// field-error list `{"error": [{"message": ..}, ..]}`.
fn error_message(body: &Value) -> String {
    let message = match body.get("error") {
        Some(Value::Object(error)) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Array(fields)) => {
            let messages: Vec<&str> = fields
                .iter()
                .filter_map(|f| f.get("message").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    };
    message.unwrap_or_else(|| GENERIC_ERROR.to_string())
}
