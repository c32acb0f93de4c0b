// ABOUTME: Signed, time-limited access URL returned by the signing collaborator.
// ABOUTME: Produced per resolution attempt; never cached across reference changes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A renderable access URL, optionally carrying its expiry.
///
/// For local uploads and external references the URL is the reference itself
/// and carries no expiry. For object-storage references it is the temporary
/// URL minted by the signing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SignedUrl {
    pub fn new(url: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            url: url.into(),
            expires_at,
        }
    }

    /// Wrap a reference that is renderable as-is, with no signature or expiry.
    pub fn unsigned(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expires_at: None,
        }
    }

    /// Whether the URL has expired relative to `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}
