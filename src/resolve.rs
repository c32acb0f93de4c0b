// ABOUTME: Per-reference resolution of image references into renderable URLs.
// ABOUTME: Remote object references go through the signing collaborator; results are epoch-guarded.

use chrono::Utc;
use parking_lot::Mutex;

use crate::api::SignOps;
use crate::types::{ClassifierRules, ImageSource, SignedUrl};

/// Render state of one image reference.
///
/// Transitions: reference change moves the slot to `Loading` (object storage)
/// or straight to `Ready` (local or external); the response for the current
/// reference moves `Loading` to `Ready` or `Failed`. A `Failed` state is
/// terminal until the reference changes or the slot is reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    /// No reference set yet.
    Idle,
    /// Signing request pending for the current reference.
    Loading,
    /// Renderable URL available.
    Ready(SignedUrl),
    /// Resolution failed; message is user-presentable.
    Failed(String),
}

struct ResolveSlot {
    epoch: u64,
    issued: Option<u64>,
    source: Option<ImageSource>,
    state: RenderState,
}

impl ResolveSlot {
    fn apply_source(&mut self) {
        self.issued = None;
        self.state = match &self.source {
            None => RenderState::Idle,
            Some(source) if source.needs_signing() => RenderState::Loading,
            Some(source) => RenderState::Ready(SignedUrl::unsigned(source.as_str())),
        };
    }
}

/// Resolves one displayed image reference at a time.
///
/// The slot carries an epoch that is bumped on every reference change; a
/// signing result is applied only if its epoch still matches, so a response
/// for a stale reference is discarded rather than overwriting the state of
/// the reference that replaced it.
pub struct ImageResolver<S> {
    signer: S,
    rules: ClassifierRules,
    slot: Mutex<ResolveSlot>,
}

impl<S: SignOps> ImageResolver<S> {
    pub fn new(signer: S, rules: ClassifierRules) -> Self {
        Self {
            signer,
            rules,
            slot: Mutex::new(ResolveSlot {
                epoch: 0,
                issued: None,
                source: None,
                state: RenderState::Idle,
            }),
        }
    }

    /// Set (or replace) the reference this resolver tracks.
    ///
    /// Classification is pure and happens once here. Local and external
    /// references become `Ready` synchronously with the reference itself;
    /// object-storage references become `Loading` until [`resolve`] runs.
    /// Returns the epoch token to pass to [`resolve`].
    ///
    /// [`resolve`]: ImageResolver::resolve
    pub fn set_reference(&self, reference: &str) -> u64 {
        let source = ImageSource::classify(reference, &self.rules);

        let mut slot = self.slot.lock();
        slot.epoch += 1;
        slot.source = Some(source);
        slot.apply_source();
        slot.epoch
    }

    /// Current render state.
    pub fn state(&self) -> RenderState {
        self.slot.lock().state.clone()
    }

    /// Drive the pending signing request for the given epoch token.
    ///
    /// No-op unless the token is current and the slot is `Loading` with no
    /// request already issued, so at most one signing request is sent per
    /// distinct reference value. The result is dropped if the reference
    /// changed while the request was in flight; a signed URL that is
    /// already expired on arrival counts as a failure.
    pub async fn resolve(&self, token: u64) {
        let url = {
            let mut slot = self.slot.lock();
            if slot.epoch != token || slot.issued == Some(token) {
                return;
            }
            let url = match (&slot.state, &slot.source) {
                (RenderState::Loading, Some(ImageSource::Object(url))) => url.clone(),
                _ => return,
            };
            slot.issued = Some(token);
            url
        };

        let result = self.signer.sign_url(&url).await;

        let mut slot = self.slot.lock();
        if slot.epoch != token {
            tracing::debug!("discarding stale signing result for {}", url);
            return;
        }

        slot.state = match result {
            Ok(signed) if signed.is_expired_at(Utc::now()) => {
                tracing::warn!("signed URL for {} is already expired", url);
                RenderState::Failed("signed URL already expired".to_string())
            }
            Ok(signed) => RenderState::Ready(signed),
            Err(e) => {
                tracing::warn!("signing failed for {}: {}", url, e);
                RenderState::Failed(e.to_string())
            }
        };
    }

    /// One-shot convenience: set the reference, resolve it, return the state.
    pub async fn resolve_reference(&self, reference: &str) -> RenderState {
        let token = self.set_reference(reference);
        self.resolve(token).await;
        self.state()
    }

    /// Record a rendering-time load failure of the resolved URL.
    ///
    /// Ignored if the reference has changed since `token` was issued.
    pub fn mark_load_failure(&self, token: u64) {
        let mut slot = self.slot.lock();
        if slot.epoch == token {
            slot.state = RenderState::Failed("image failed to load".to_string());
        }
    }

    /// Re-arm the slot for its current reference (a manual remount).
    ///
    /// Returns the new epoch token; a previously failed object reference
    /// goes back to `Loading` and may be resolved again.
    pub fn reset(&self) -> u64 {
        let mut slot = self.slot.lock();
        slot.epoch += 1;
        slot.apply_source();
        slot.epoch
    }
}
