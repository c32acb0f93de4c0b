// ABOUTME: Image reference classification into upload, object-storage, and external sources.
// ABOUTME: Classification happens once at the boundary; everything downstream matches on the variant.

use std::fmt;

/// Rules for classifying a raw image reference string.
///
/// `local_prefix` marks references served from the storefront's own upload
/// directory. `object_hosts` are substrings identifying object-storage URLs
/// that require signing before they can be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    pub local_prefix: String,
    pub object_hosts: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            local_prefix: "/uploads/".to_string(),
            object_hosts: vec![
                ".s3.amazonaws.com".to_string(),
                ".s3.".to_string(),
                "storage.googleapis.com".to_string(),
                ".digitaloceanspaces.com".to_string(),
            ],
        }
    }
}

/// A classified image reference.
///
/// Exactly one variant applies to any reference string. A reference starting
/// with the local prefix is always `Upload`, even if an object-storage
/// fragment would also match, so an ambiguous input degrades to the local
/// path rather than triggering a spurious signing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the storefront's own upload directory.
    Upload(String),
    /// Private object-storage URL that needs a signed access URL.
    Object(String),
    /// Arbitrary external URL; rendered as-is, not deletable through us.
    External(String),
}

impl ImageSource {
    /// Classify a raw reference string. Pure and total.
    pub fn classify(reference: &str, rules: &ClassifierRules) -> Self {
        if reference.starts_with(&rules.local_prefix) {
            return ImageSource::Upload(reference.to_string());
        }

        if rules.object_hosts.iter().any(|h| reference.contains(h.as_str())) {
            return ImageSource::Object(reference.to_string());
        }

        ImageSource::External(reference.to_string())
    }

    /// The raw reference string this source was classified from.
    pub fn as_str(&self) -> &str {
        match self {
            ImageSource::Upload(r) | ImageSource::Object(r) | ImageSource::External(r) => r,
        }
    }

    /// Whether the backing bytes are owned by our storage and thus deletable
    /// through the storage collaborator.
    pub fn is_managed(&self) -> bool {
        matches!(self, ImageSource::Upload(_) | ImageSource::Object(_))
    }

    /// Whether rendering requires a signed access URL first.
    pub fn needs_signing(&self) -> bool {
        matches!(self, ImageSource::Object(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
