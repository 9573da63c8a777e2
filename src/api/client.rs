//! HTTP client adapter for the backend answering service.
//!
//! Every backend call is wrapped in one method on [`ApiClient`]. The paths
//! come from the endpoint table in the configuration, so the same binary can
//! talk to deployments that mount the API under different names.

use crate::api::progress::progress_body;
use crate::api::types::{AskRequest, AskResponse, DocumentListResponse, LinkRequest, StatusResponse};
use crate::config::Config;
use crate::types::{AppError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Response, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::sync::watch;

/// Thin client over the backend HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    endpoints: crate::config::EndpointConfig,
}

impl ApiClient {
    /// Build a client from the resolved configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.server.base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the full list of indexed documents, in server order.
    pub async fn list_documents(&self) -> Result<Vec<String>> {
        let resp = self
            .http
            .get(self.url(&self.endpoints.list_docs))
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(Self::failure(status, &bytes));
        }

        let body: DocumentListResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Api(format!("invalid response from server: {}", e)))?;
        Ok(body.documents)
    }

    /// Upload a file for ingestion, publishing progress on `progress`.
    ///
    /// Returns the server's confirmation message. The file is read into
    /// memory up front so the multipart part can carry an exact length.
    pub async fn upload_file(
        &self,
        path: &Path,
        progress: watch::Sender<u8>,
    ) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let len = bytes.len() as u64;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        tracing::info!(file = %file_name, bytes = len, "uploading file");

        let part = Part::stream_with_length(Body::wrap_stream(progress_body(bytes, progress)), len)
            .file_name(file_name)
            .mime_str(mime.essence_str())?;
        let form = Form::new().part("file", part);

        let resp = self
            .http
            .post(self.url(&self.endpoints.upload))
            .multipart(form)
            .send()
            .await?;
        Self::status_message(resp).await
    }

    /// Submit a link for ingestion. Returns the server's confirmation
    /// message, or the filename it registered when no message is given.
    pub async fn upload_link(&self, url: &str) -> Result<String> {
        let resp = self
            .http
            .post(self.url(&self.endpoints.upload_link))
            .json(&LinkRequest {
                link: url.to_string(),
            })
            .send()
            .await?;
        Self::status_message(resp).await
    }

    /// Delete an indexed document by filename.
    pub async fn delete_document(&self, name: &str) -> Result<String> {
        let resp = self
            .http
            .delete(self.url(&self.endpoints.delete_doc))
            .query(&[("filename", name)])
            .send()
            .await?;
        Self::status_message(resp).await
    }

    /// Ask a question. `Ok(None)` means the call succeeded but the server
    /// produced no answer text; the caller picks the fallback wording.
    pub async fn ask(&self, question: &str) -> Result<Option<String>> {
        let resp = self
            .http
            .post(self.url(&self.endpoints.ask))
            .json(&AskRequest {
                query: question.to_string(),
            })
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(Self::failure(status, &bytes));
        }

        let body: AskResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Api(format!("invalid response from server: {}", e)))?;
        Ok(body.answer)
    }

    /// Decode the `{message|filename}` / `{error}` response shape shared by
    /// the mutation endpoints. An `error` field marks failure even on 2xx.
    async fn status_message(resp: Response) -> Result<String> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        let body: StatusResponse = serde_json::from_slice(&bytes).unwrap_or_default();
        if let Some(error) = body.error {
            return Err(AppError::Api(error));
        }
        if !status.is_success() {
            return Err(AppError::Api(format!("request failed with status {}", status)));
        }

        Ok(body
            .message
            .or(body.filename)
            .unwrap_or_else(|| "ok".to_string()))
    }

    /// Build the error for a non-2xx response, preferring the server's own
    /// `error` field over the bare status code.
    fn failure(status: StatusCode, bytes: &[u8]) -> AppError {
        if let Ok(body) = serde_json::from_slice::<StatusResponse>(bytes) {
            if let Some(error) = body.error {
                return AppError::Api(error);
            }
        }
        AppError::Api(format!("request failed with status {}", status))
    }
}
