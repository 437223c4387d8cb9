use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct CreateVideoRequest<'a> {
    prompt: &'a str,
    model: &'a str,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VideoCreated {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VideoStatus {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub progress: Option<f32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The three remote operations the lifecycle controller needs. Kept as a
/// trait so tests can script responses without a network.
#[async_trait]
pub trait VideoClient: Send + Sync {
    async fn create(&self, prompt: &str, model: &str) -> Result<VideoCreated, ClientError>;

    async fn status(&self, id: &str) -> Result<VideoStatus, ClientError>;

    /// Plain GET of a pre-signed artifact URL. No auth header; the URL
    /// itself carries the grant.
    async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>, ClientError>;
}

/// Production client for the Sora video API.
pub struct SoraClient {
    http: reqwest::Client,
    base: String,
    api_key: String,
}

impl SoraClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base(DEFAULT_API_BASE, api_key)
    }

    pub fn with_base(base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            api_key: api_key.into(),
        }
    }

    async fn read_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ClientError::Api(api_error_message(status, &body))
    }
}

/// Prefer the API's own `error.message` when the body carries the standard
/// error envelope; fall back to the raw status and body.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => format!("HTTP {}: {}", status, body),
    }
}

#[async_trait]
impl VideoClient for SoraClient {
    async fn create(&self, prompt: &str, model: &str) -> Result<VideoCreated, ClientError> {
        debug!("creating video job (model={model})");

        let response = self
            .http
            .post(format!("{}/v1/videos", self.base))
            .bearer_auth(&self.api_key)
            .json(&CreateVideoRequest { prompt, model })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn status(&self, id: &str) -> Result<VideoStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}/v1/videos/{}", self.base, id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let status: VideoStatus = response.json().await?;
        debug!(
            "job {} status: {} (progress {:?})",
            status.id.as_deref().unwrap_or(id),
            status.status,
            status.progress
        );
        Ok(status)
    }

    async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        debug!("fetching artifact from {url}");

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Api(format!(
                "HTTP {} fetching artifact",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
