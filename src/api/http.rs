// ABOUTME: Hyper-based HTTP client for the storefront API.
// ABOUTME: Implements SignOps, UploadOps, and DeleteOps over a plain http1 connection.

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use chrono::{DateTime, Utc};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::Config;
use crate::types::SignedUrl;

use super::traits::{DeleteError, DeleteOps, SignError, SignOps, UploadError, UploadFile, UploadOps};

const SIGN_PATH: &str = "/sign";
const UPLOAD_PATH: &str = "/upload";
const DELETE_PATH: &str = "/delete";

/// Transport-level failures below the collaborator contracts.
///
/// Every variant maps to the transport arm of the calling trait's error;
/// the distinction only matters for log output.
#[derive(Debug, thiserror::Error)]
enum TransportError {
    #[error("failed to connect to {0}: {1}")]
    Connect(String, String),

    #[error("HTTP handshake failed: {0}")]
    Handshake(String),

    #[error("failed to build request: {0}")]
    RequestBuild(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
}

/// HTTP client for the storefront's image storage endpoints.
///
/// One connection per request, matching the request/response shape of the
/// collaborators. A timeout wraps the whole exchange; elapsing is reported
/// as a transport failure, never as a rejection.
pub struct StorefrontClient {
    host: String,
    port: u16,
    base_path: String,
    token: Option<String>,
    timeout: Duration,
}

impl StorefrontClient {
    pub fn new(host: impl Into<String>, port: u16, base_path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            base_path: base_path.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a client from configuration, resolving the API token.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let mut client = Self::new(
            config.api.host.clone(),
            config.api.port,
            config.api.base_path.clone(),
        )
        .with_timeout(config.request_timeout);

        if let Some(ref token) = config.token {
            client = client.with_token(token.resolve()?);
        }

        Ok(client)
    }

    /// Send one POST request and return the status plus the collected body.
    async fn post(
        &self,
        path: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(u16, Bytes), TransportError> {
        let exchange = self.exchange(path, content_type, body);
        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| TransportError::TimedOut(self.timeout))?
    }

    async fn exchange(
        &self,
        path: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(u16, Bytes), TransportError> {
        let authority = format!("{}:{}", self.host, self.port);
        tracing::debug!("POST {}{} via {}", self.base_path, path, authority);

        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| TransportError::Connect(authority.clone(), e.to_string()))?;

        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| TransportError::Handshake(e.to_string()))?;

        // Spawn connection handler
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("storefront connection error: {}", e);
            }
        });

        let uri = format!("{}{}", self.base_path, path);

        let mut builder = hyper::Request::builder()
            .method("POST")
            .uri(&uri)
            .header("Host", &authority)
            .header("Content-Type", content_type);

        if let Some(ref token) = self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let req = builder
            .body(Full::new(body))
            .map_err(|e| TransportError::RequestBuild(e.to_string()))?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status().as_u16();

        let collected = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok((status, collected.to_bytes()))
    }
}

// =============================================================================
// Response bodies
// =============================================================================

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedUrl")]
    signed_url: String,

    #[serde(rename = "expiresAt")]
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct UploadResponse {
    urls: Vec<String>,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Extract a human-readable reason from an error body, falling back to the
/// raw text when it isn't the expected JSON shape.
fn error_reason(body: &Bytes) -> String {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(e) => e.error,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

// =============================================================================
// Collaborator implementations
// =============================================================================

#[async_trait]
impl SignOps for StorefrontClient {
    async fn sign_url(&self, url: &str) -> Result<SignedUrl, SignError> {
        let body = serde_json::to_vec(&serde_json::json!({ "url": url }))
            .map_err(|e| SignError::Transport(e.to_string()))?;

        let (status, bytes) = self
            .post(SIGN_PATH, "application/json", Bytes::from(body))
            .await
            .map_err(|e| SignError::Transport(e.to_string()))?;

        if !is_success(status) {
            return Err(SignError::Denied {
                status,
                reason: error_reason(&bytes),
            });
        }

        let parsed: SignResponse = serde_json::from_slice(&bytes)
            .map_err(|e| SignError::Transport(format!("malformed sign response: {}", e)))?;

        Ok(SignedUrl::new(parsed.signed_url, parsed.expires_at))
    }
}

#[async_trait]
impl UploadOps for StorefrontClient {
    async fn upload(&self, files: &[UploadFile]) -> Result<Vec<String>, UploadError> {
        if files.is_empty() {
            return Err(UploadError::Empty);
        }

        let boundary = format!("----vitrin-{}", Utc::now().timestamp_micros());
        let body = multipart_body(&boundary, files);
        let content_type = format!("multipart/form-data; boundary={}", boundary);

        let (status, bytes) = self
            .post(UPLOAD_PATH, &content_type, body)
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        if !is_success(status) {
            return Err(UploadError::Rejected {
                status,
                reason: error_reason(&bytes),
            });
        }

        let parsed: UploadResponse = serde_json::from_slice(&bytes)
            .map_err(|e| UploadError::Transport(format!("malformed upload response: {}", e)))?;

        Ok(parsed.urls)
    }
}

#[async_trait]
impl DeleteOps for StorefrontClient {
    async fn delete_object(&self, url: &str) -> Result<String, DeleteError> {
        let body = serde_json::to_vec(&serde_json::json!({ "url": url }))
            .map_err(|e| DeleteError::Transport(e.to_string()))?;

        let (status, bytes) = self
            .post(DELETE_PATH, "application/json", Bytes::from(body))
            .await
            .map_err(|e| DeleteError::Transport(e.to_string()))?;

        if !is_success(status) {
            return Err(DeleteError::Rejected {
                status,
                reason: error_reason(&bytes),
            });
        }

        // A 2xx body can still carry failure semantics.
        if let Ok(parsed) = serde_json::from_slice::<MessageResponse>(&bytes) {
            return Ok(parsed.message);
        }
        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return Err(DeleteError::Rejected {
                status,
                reason: err.error,
            });
        }

        Err(DeleteError::Transport(
            "malformed delete response".to_string(),
        ))
    }
}

/// Assemble a multipart/form-data body with one "files" part per file.
fn multipart_body(boundary: &str, files: &[UploadFile]) -> Bytes {
    let mut buf = BytesMut::new();

    for file in files {
        buf.put_slice(format!("--{}\r\n", boundary).as_bytes());
        buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                file.file_name
            )
            .as_bytes(),
        );
        buf.put_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        buf.put_slice(&file.data);
        buf.put_slice(b"\r\n");
    }

    buf.put_slice(format!("--{}--\r\n", boundary).as_bytes());
    buf.freeze()
}
