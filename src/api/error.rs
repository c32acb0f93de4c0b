// ABOUTME: Unified API error with SNAFU pattern.
// ABOUTME: Wraps the per-collaborator errors for programmatic handling at the CLI boundary.

use snafu::Snafu;

use super::traits::{DeleteError, SignError, UploadError};

/// Unified error for storefront API operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("signing failed: {source}"))]
    Sign { source: SignError },

    #[snafu(display("upload failed: {source}"))]
    Upload { source: UploadError },

    #[snafu(display("deletion failed: {source}"))]
    Delete { source: DeleteError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The server understood the request and declined it.
    Denied,
    /// The request never completed: network failure, timeout, malformed response.
    Transport,
    /// The request was invalid before it left the client.
    Invalid,
}

impl ApiError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Sign { source } => match source {
                SignError::Denied { .. } => ApiErrorKind::Denied,
                SignError::Transport(_) => ApiErrorKind::Transport,
            },
            ApiError::Upload { source } => match source {
                UploadError::Empty => ApiErrorKind::Invalid,
                UploadError::Rejected { .. } => ApiErrorKind::Denied,
                UploadError::Transport(_) => ApiErrorKind::Transport,
            },
            ApiError::Delete { source } => match source {
                DeleteError::Rejected { .. } => ApiErrorKind::Denied,
                DeleteError::Transport(_) => ApiErrorKind::Transport,
            },
        }
    }
}

impl From<SignError> for ApiError {
    fn from(source: SignError) -> Self {
        ApiError::Sign { source }
    }
}

impl From<UploadError> for ApiError {
    fn from(source: UploadError) -> Self {
        ApiError::Upload { source }
    }
}

impl From<DeleteError> for ApiError {
    fn from(source: DeleteError) -> Self {
        ApiError::Delete { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(error: impl Into<ApiError>) -> ApiErrorKind {
        error.into().kind()
    }

    #[test]
    fn denied_kinds_cover_server_rejections() {
        assert_eq!(
            kind_of(SignError::Denied {
                status: 403,
                reason: "no".to_string()
            }),
            ApiErrorKind::Denied
        );
        assert_eq!(
            kind_of(UploadError::Rejected {
                status: 500,
                reason: "disk full".to_string()
            }),
            ApiErrorKind::Denied
        );
        assert_eq!(
            kind_of(DeleteError::Rejected {
                status: 404,
                reason: "not found".to_string()
            }),
            ApiErrorKind::Denied
        );
    }

    #[test]
    fn transport_kinds_cover_incomplete_requests() {
        assert_eq!(
            kind_of(SignError::Transport("refused".to_string())),
            ApiErrorKind::Transport
        );
        assert_eq!(
            kind_of(UploadError::Transport("refused".to_string())),
            ApiErrorKind::Transport
        );
        assert_eq!(
            kind_of(DeleteError::Transport("refused".to_string())),
            ApiErrorKind::Transport
        );
    }

    #[test]
    fn empty_upload_is_invalid_before_it_leaves_the_client() {
        assert_eq!(kind_of(UploadError::Empty), ApiErrorKind::Invalid);
    }
}
