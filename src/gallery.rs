// ABOUTME: Managed image lifecycle: storage-side deletion and upload, then list mutation.
// ABOUTME: The caller owns the reference list; this module only produces its next version.

use futures::future::join_all;

use crate::api::{DeleteError, DeleteOps, UploadError, UploadFile, UploadOps};
use crate::notify::{Notice, NotificationSink};
use crate::types::{ClassifierRules, ImageSource};

/// Outcome of one deletion attempt. Drives whether the caller's reference
/// list is mutated: only `Deleted` removes the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// Storage confirmed the deletion (or the reference was unmanaged).
    Deleted,
    /// The server declined; the object still exists.
    Rejected(String),
    /// The request never completed; the object's state is unknown.
    TransportFailed(String),
}

impl DeletionOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionOutcome::Deleted)
    }
}

/// Coordinates removal and upload of a product's images.
///
/// List mutation happens strictly after, and conditionally on, a successful
/// remote deletion. Removal is applied by reference value against the latest
/// snapshot, never by positional index, so concurrent deletions and list
/// replacement cannot remove the wrong entry.
pub struct Gallery<C> {
    client: C,
    rules: ClassifierRules,
}

impl<C> Gallery<C> {
    pub fn new(client: C, rules: ClassifierRules) -> Self {
        Self { client, rules }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: DeleteOps> Gallery<C> {
    /// Delete the object behind `target`, reporting progress via `sink`.
    ///
    /// Unmanaged references short-circuit to `Deleted` without a network
    /// call; there is nothing on our storage to remove.
    pub async fn delete_one(&self, target: &str, sink: &dyn NotificationSink) -> DeletionOutcome {
        let source = ImageSource::classify(target, &self.rules);
        if !source.is_managed() {
            tracing::debug!("unmanaged reference, skipping storage deletion: {}", target);
            return DeletionOutcome::Deleted;
        }

        let key = format!("delete:{target}");
        sink.notify(&Notice::loading(&key, format!("Deleting {target}")));

        match self.client.delete_object(target).await {
            Ok(message) => {
                sink.notify(&Notice::success(&key, message));
                DeletionOutcome::Deleted
            }
            Err(DeleteError::Rejected { reason, status }) => {
                tracing::warn!("deletion of {} rejected ({}): {}", target, status, reason);
                sink.notify(&Notice::error(&key, &reason));
                DeletionOutcome::Rejected(reason)
            }
            Err(DeleteError::Transport(reason)) => {
                tracing::warn!("deletion of {} failed in transport: {}", target, reason);
                sink.notify(&Notice::error(&key, &reason));
                DeletionOutcome::TransportFailed(reason)
            }
        }
    }

    /// Remove `target` from `images`, deleting its storage object first.
    ///
    /// Returns the outcome and the next version of the list. On `Rejected`
    /// and `TransportFailed` the returned list is element-wise equal to the
    /// input.
    #[must_use = "the returned list is the next version of the caller's images"]
    pub async fn remove(
        &self,
        images: &[String],
        target: &str,
        sink: &dyn NotificationSink,
    ) -> (DeletionOutcome, Vec<String>) {
        let outcome = self.delete_one(target, sink).await;

        let next = if outcome.is_deleted() {
            remove_first(images, target)
        } else {
            images.to_vec()
        };

        (outcome, next)
    }

    /// Remove several targets, running their deletions concurrently.
    ///
    /// Each deletion is an independent request/outcome pair; the surviving
    /// list is folded from the outcomes against the input snapshot by value.
    #[must_use = "the returned list is the next version of the caller's images"]
    pub async fn remove_many(
        &self,
        images: &[String],
        targets: &[String],
        sink: &dyn NotificationSink,
    ) -> (Vec<(String, DeletionOutcome)>, Vec<String>) {
        let outcomes: Vec<(String, DeletionOutcome)> = join_all(
            targets
                .iter()
                .map(|target| async move { (target.clone(), self.delete_one(target, sink).await) }),
        )
        .await;

        let mut next = images.to_vec();
        for (target, outcome) in &outcomes {
            if outcome.is_deleted() {
                next = remove_first(&next, target);
            }
        }

        (outcomes, next)
    }
}

impl<C: UploadOps> Gallery<C> {
    /// Upload `files` and append the returned URLs to the snapshot.
    ///
    /// Failures are surfaced to the caller and the sink; the list is
    /// unchanged when the upload does not succeed.
    pub async fn upload(
        &self,
        images: &[String],
        files: &[UploadFile],
        sink: &dyn NotificationSink,
    ) -> Result<Vec<String>, UploadError> {
        let key = "upload";
        sink.notify(&Notice::loading(key, format!("Uploading {} file(s)", files.len())));

        match self.client.upload(files).await {
            Ok(urls) => {
                sink.notify(&Notice::success(key, format!("Uploaded {} file(s)", urls.len())));
                let mut next = images.to_vec();
                next.extend(urls);
                Ok(next)
            }
            Err(e) => {
                sink.notify(&Notice::error(key, e.to_string()));
                Err(e)
            }
        }
    }
}

/// New list with the first occurrence of `target` removed; all other
/// elements keep their relative order.
fn remove_first(images: &[String], target: &str) -> Vec<String> {
    let mut removed = false;
    images
        .iter()
        .filter(|r| {
            if !removed && r.as_str() == target {
                removed = true;
                false
            } else {
                true
            }
        })
        .cloned()
        .collect()
}
