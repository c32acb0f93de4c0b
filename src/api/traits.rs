// ABOUTME: Capability traits for the storage collaborators: SignOps, UploadOps, DeleteOps.
// ABOUTME: Each trait carries its own error enum separating rejection from transport failure.

use crate::types::SignedUrl;
use async_trait::async_trait;
use bytes::Bytes;

/// One file to be uploaded as part of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Signing collaborator: mint a temporary access URL for a private object.
#[async_trait]
pub trait SignOps: Send + Sync {
    /// Request a signed URL for `url`. One request per resolution attempt.
    async fn sign_url(&self, url: &str) -> Result<SignedUrl, SignError>;
}

/// Upload collaborator: store a batch of files, returning their new URLs.
#[async_trait]
pub trait UploadOps: Send + Sync {
    /// Upload `files` as one multipart request. Returns one URL per file.
    async fn upload(&self, files: &[UploadFile]) -> Result<Vec<String>, UploadError>;
}

/// Delete collaborator: remove the object backing a managed reference.
#[async_trait]
pub trait DeleteOps: Send + Sync {
    /// Request deletion of the object at `url`. Returns the server's
    /// confirmation message on success.
    async fn delete_object(&self, url: &str) -> Result<String, DeleteError>;
}

/// Errors from the signing collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("signing denied ({status}): {reason}")]
    Denied { status: u16, reason: String },

    #[error("signing transport failed: {0}")]
    Transport(String),
}

/// Errors from the upload collaborator.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("nothing to upload")]
    Empty,

    #[error("upload rejected ({status}): {reason}")]
    Rejected { status: u16, reason: String },

    #[error("upload transport failed: {0}")]
    Transport(String),
}

/// Errors from the delete collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("deletion rejected ({status}): {reason}")]
    Rejected { status: u16, reason: String },

    #[error("deletion transport failed: {0}")]
    Transport(String),
}
