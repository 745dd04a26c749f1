//! Task API client

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, de::IgnoredAny, Deserialize};
use tracing::debug;
use url::Url;

use taskboard_domain::{Task, TaskFilter, TaskId, TaskInput};

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
};

/// Mockable task API
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// List tasks matching `filter`, newest first
    async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>>;

    /// Fetch one task
    async fn get_task(&self, id: &TaskId) -> Result<Task>;

    /// Create a task
    async fn create_task(&self, input: &TaskInput) -> Result<Task>;

    /// Apply a partial update
    async fn update_task(&self, id: &TaskId, input: &TaskInput) -> Result<Task>;

    /// Delete a task
    async fn delete_task(&self, id: &TaskId) -> Result<()>;

    /// Flip a task's completion flag
    async fn toggle_task(&self, id: &TaskId) -> Result<Task>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// `reqwest` implementation of [`TaskApi`]
pub struct HttpTaskApi {
    inner: reqwest::Client,
    base_url: String,
    config: ClientConfig,
}

impl HttpTaskApi {
    /// Create a client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let inner = config
            .build_client()
            .map_err(|e| ClientError::BuildError(e.to_string()))?;

        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Create a client for `base_url` with default settings
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(base_url))
    }

    /// Get configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("HTTP {} {}", method, url);
        self.inner.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<Envelope<IgnoredAny>>()
                .await
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(ClientError::HttpStatus { status, message });
        }

        let envelope: Envelope<T> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::UnexpectedResponse(
                envelope
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::UnexpectedResponse("response carried no data".to_string()))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let request = self
            .request(Method::GET, "/tasks")
            .query(&[("filter", filter.as_str())]);
        self.send(request).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task> {
        self.send(self.request(Method::GET, &format!("/tasks/{}", id)))
            .await
    }

    async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        self.send(self.request(Method::POST, "/tasks").json(input))
            .await
    }

    async fn update_task(&self, id: &TaskId, input: &TaskInput) -> Result<Task> {
        self.send(self.request(Method::PUT, &format!("/tasks/{}", id)).json(input))
            .await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let _: IgnoredAny = self
            .send(self.request(Method::DELETE, &format!("/tasks/{}", id)))
            .await?;
        Ok(())
    }

    async fn toggle_task(&self, id: &TaskId) -> Result<Task> {
        self.send(self.request(Method::PATCH, &format!("/tasks/{}/toggle", id)))
            .await
    }
}
