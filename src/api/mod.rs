// ABOUTME: Collaborator surface for the storefront API: sign, upload, delete.
// ABOUTME: Traits define the contract; StorefrontClient is the HTTP implementation.

mod error;
mod http;
mod traits;

pub use error::{ApiError, ApiErrorKind};
pub use http::StorefrontClient;
pub use traits::{DeleteError, DeleteOps, SignError, SignOps, UploadError, UploadFile, UploadOps};
