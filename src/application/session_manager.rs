// SPDX-License-Identifier: MPL-2.0
//! The session manager: orchestration of the single active edit session.
//!
//! One manager owns one [`EditSession`] at a time and drives the remote
//! capabilities: upload the source, apply the directive, fetch the result.
//! The lifecycle is
//!
//! ```text
//! (empty) --load_source--> Ready --run_directive--> Processing --+--> Completed
//!    ^                       ^                          |        |
//!    |                       +----------reset-----------+--------+
//!    +--- load_source replaces the session from any state        |
//!                                            Processing ---------+--> Failed
//! ```
//!
//! At most one remote operation is outstanding at any instant: a
//! `run_directive` call while `Processing` is rejected, not queued. A new
//! upload replaces the session and bumps its [`Generation`]; completions
//! and progress ticks from the superseded run are discarded when they
//! arrive (logical cancellation only; no abort signal reaches the remote
//! side).
//!
//! Progress is advisory: a fixed milestone when the upload half finishes,
//! 100 only when the transform has actually completed, and an optional
//! heuristic ticker in between. Updates are generation-tagged and
//! published on a watch channel so a stale ticker cannot resurrect a
//! replaced session's progress bar.

use crate::application::port::{TransformCapability, UploadCapability};
use crate::domain::asset::ImageAsset;
use crate::domain::directive::{DirectiveId, TransformDirective};
use crate::domain::session::{DisplayMode, EditSession, Generation, Progress, SessionPhase};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Progress reached once the upload half of a run has finished.
pub const UPLOAD_MILESTONE: Progress = Progress::new(30);

/// Ceiling for heuristic ticks; only a real completion reaches 100.
pub const HEURISTIC_CEILING: Progress = Progress::new(95);

/// Step added per heuristic tick.
const HEURISTIC_STEP: u8 = 5;

// =============================================================================
// SessionError
// =============================================================================

/// Errors surfaced by the session manager.
///
/// Upload and transform failures are folded into a single
/// [`TransformFailed`](SessionError::TransformFailed) outcome; the user is
/// not asked to care which half of the remote pair broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No source image has been loaded yet.
    NoSource,
    /// A transform is already in flight; the request was rejected.
    Busy,
    /// The remote operation failed. The session is ready for a retry.
    TransformFailed(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoSource => write!(f, "no source image loaded"),
            SessionError::Busy => write!(f, "a transform is already in progress"),
            SessionError::TransformFailed(msg) => write!(f, "transform failed: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

// =============================================================================
// Outcomes and snapshots
// =============================================================================

/// How a `run_directive` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The result was committed to the session.
    Completed,
    /// The session was replaced while the operation was in flight; the
    /// result was discarded.
    Superseded,
}

/// Generation-tagged progress sample published on the watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Generation of the session the sample belongs to.
    pub generation: Generation,
    /// Progress percentage.
    pub percent: Progress,
}

/// Cheap copy of the session state for view consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Current progress.
    pub progress: Progress,
    /// Before/after display mode.
    pub display_mode: DisplayMode,
    /// Directive currently or most recently applied.
    pub active_directive: Option<DirectiveId>,
    /// Whether a transform result is available.
    pub has_result: bool,
    /// Generation token of the session.
    pub generation: Generation,
}

// =============================================================================
// SessionManager
// =============================================================================

/// Orchestrates the single active edit session over the remote
/// capabilities.
///
/// The manager is shareable: methods take `&self` and the session lives
/// behind a mutex, so one clone of an `Arc<SessionManager<_, _>>` can sit
/// in a UI task while another runs directives.
pub struct SessionManager<U, T> {
    uploader: Arc<U>,
    transformer: Arc<T>,
    session: Mutex<Option<EditSession>>,
    progress_tx: watch::Sender<ProgressUpdate>,
}

impl<U, T> SessionManager<U, T>
where
    U: UploadCapability,
    T: TransformCapability,
{
    /// Creates a manager with no session loaded.
    #[must_use]
    pub fn new(uploader: Arc<U>, transformer: Arc<T>) -> Self {
        let (progress_tx, _) = watch::channel(ProgressUpdate {
            generation: Generation::INITIAL,
            percent: Progress::ZERO,
        });
        Self {
            uploader,
            transformer,
            session: Mutex::new(None),
            progress_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<EditSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, generation: Generation, percent: Progress) {
        self.progress_tx
            .send_replace(ProgressUpdate { generation, percent });
    }

    /// Subscribes to generation-tagged progress samples.
    ///
    /// Consumers must ignore samples whose generation does not match the
    /// session they are rendering.
    #[must_use]
    pub fn subscribe_progress(&self) -> watch::Receiver<ProgressUpdate> {
        self.progress_tx.subscribe()
    }

    /// Replaces the session with a fresh one for the given source.
    ///
    /// Valid from any state. Any in-flight operation keeps running on the
    /// remote side but its completion will be discarded as stale.
    pub fn load_source(&self, source: ImageAsset) -> Generation {
        let mut guard = self.lock();
        let generation = guard
            .as_ref()
            .map_or(Generation::INITIAL, EditSession::generation)
            .next();
        if let Some(previous) = guard.as_ref() {
            if previous.phase() == SessionPhase::Processing {
                info!(
                    generation = generation.value(),
                    "new source supersedes an in-flight operation"
                );
            }
        }
        info!(
            generation = generation.value(),
            source = %source.short_id(),
            mime = %source.mime(),
            "source image loaded"
        );
        *guard = Some(EditSession::new(source, generation));
        drop(guard);
        self.publish(generation, Progress::ZERO);
        generation
    }

    /// Runs one transform directive against the current source.
    ///
    /// Rejected while a run is already in flight (`Busy`) and before any
    /// source is loaded (`NoSource`); the rejection has no state effect.
    /// On success the result is committed and progress reaches 100. On
    /// failure the session moves to `Failed` (retry permitted), progress
    /// resets and the prior result is preserved.
    ///
    /// Returns [`RunOutcome::Superseded`] when the session was replaced
    /// while the operation was outstanding; the session then reflects the
    /// new source, untouched by this run.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSource`], [`SessionError::Busy`], or
    /// [`SessionError::TransformFailed`] folding the upload or transform
    /// failure.
    pub async fn run_directive(
        &self,
        directive: TransformDirective,
    ) -> Result<RunOutcome, SessionError> {
        let (generation, source) = {
            let mut guard = self.lock();
            let session = guard.as_mut().ok_or(SessionError::NoSource)?;
            if !session.phase().accepts_directive() {
                return Err(SessionError::Busy);
            }
            session.begin_processing(directive.id());
            (session.generation(), session.source().clone())
        };
        self.publish(generation, Progress::ZERO);
        info!(
            generation = generation.value(),
            directive = %directive.id(),
            "directive started"
        );

        match self.execute(generation, &source, &directive).await {
            Ok(result) => self.commit_success(generation, &directive, result),
            Err(message) => self.commit_failure(generation, &directive, message),
        }
    }

    async fn execute(
        &self,
        generation: Generation,
        source: &ImageAsset,
        directive: &TransformDirective,
    ) -> Result<ImageAsset, String> {
        let reference = self
            .uploader
            .put(source)
            .await
            .map_err(|e| e.to_string())?;
        debug!(generation = generation.value(), reference = %reference, "source uploaded");
        self.apply_progress(generation, UPLOAD_MILESTONE);

        let result_ref = self
            .transformer
            .apply(&reference, directive)
            .await
            .map_err(|e| e.to_string())?;
        debug!(generation = generation.value(), reference = %result_ref, "transform produced");

        self.uploader
            .fetch(&result_ref)
            .await
            .map_err(|e| e.to_string())
    }

    fn commit_success(
        &self,
        generation: Generation,
        directive: &TransformDirective,
        result: ImageAsset,
    ) -> Result<RunOutcome, SessionError> {
        let mut guard = self.lock();
        let Some(session) = guard.as_mut().filter(|s| s.generation() == generation) else {
            warn!(
                generation = generation.value(),
                directive = %directive.id(),
                "discarding stale transform result"
            );
            return Ok(RunOutcome::Superseded);
        };
        session.complete(result);
        drop(guard);
        self.publish(generation, Progress::COMPLETE);
        info!(
            generation = generation.value(),
            directive = %directive.id(),
            "directive completed"
        );
        Ok(RunOutcome::Completed)
    }

    fn commit_failure(
        &self,
        generation: Generation,
        directive: &TransformDirective,
        message: String,
    ) -> Result<RunOutcome, SessionError> {
        let mut guard = self.lock();
        let Some(session) = guard.as_mut().filter(|s| s.generation() == generation) else {
            debug!(
                generation = generation.value(),
                "discarding failure of a superseded operation"
            );
            return Ok(RunOutcome::Superseded);
        };
        session.fail();
        drop(guard);
        self.publish(generation, Progress::ZERO);
        warn!(
            generation = generation.value(),
            directive = %directive.id(),
            error = %message,
            "directive failed"
        );
        Err(SessionError::TransformFailed(message))
    }

    /// Advances progress monotonically if the given generation is still
    /// the active, processing session. Returns whether it was applied.
    fn apply_progress(&self, generation: Generation, target: Progress) -> bool {
        let mut guard = self.lock();
        let Some(session) = guard
            .as_mut()
            .filter(|s| s.generation() == generation && s.phase() == SessionPhase::Processing)
        else {
            return false;
        };
        session.advance_progress(target);
        let percent = session.progress();
        drop(guard);
        self.publish(generation, percent);
        true
    }

    /// One advisory progress step, decoupled from real remote latency.
    ///
    /// Advances toward [`HEURISTIC_CEILING`] while the given generation is
    /// still processing; only an actual completion reaches 100. Returns
    /// `false` once the generation is superseded or no longer processing,
    /// which tells a ticker loop to stop.
    pub fn heuristic_tick(&self, generation: Generation) -> bool {
        let current = {
            let guard = self.lock();
            match guard.as_ref() {
                Some(s) if s.generation() == generation && s.phase() == SessionPhase::Processing => {
                    s.progress()
                }
                _ => return false,
            }
        };
        let target = Progress::new(current.value().saturating_add(HEURISTIC_STEP))
            .min(HEURISTIC_CEILING);
        self.apply_progress(generation, target)
    }

    /// Drives [`heuristic_tick`](Self::heuristic_tick) on a fixed period
    /// until the generation is superseded or processing ends.
    pub async fn run_progress_ticker(&self, generation: Generation, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            if !self.heuristic_tick(generation) {
                break;
            }
        }
    }

    /// Flips the before/after toggle. No-op before the first completion.
    ///
    /// Returns the resulting mode, or `None` when no session exists.
    pub fn toggle_display_mode(&self) -> Option<DisplayMode> {
        let mut guard = self.lock();
        guard.as_mut().map(EditSession::toggle_display_mode)
    }

    /// Clears the result and returns to `Ready`, keeping the source.
    ///
    /// Valid after a completion or a failure; a no-op otherwise. Returns
    /// whether the session was reset.
    pub fn reset(&self) -> bool {
        let mut guard = self.lock();
        let Some(session) = guard.as_mut().filter(|s| {
            matches!(s.phase(), SessionPhase::Completed | SessionPhase::Failed)
        }) else {
            return false;
        };
        session.reset();
        let generation = session.generation();
        drop(guard);
        self.publish(generation, Progress::ZERO);
        true
    }

    /// The asset a download action should produce: the result when one
    /// exists, otherwise the source. Pure read.
    #[must_use]
    pub fn download(&self) -> Option<ImageAsset> {
        let guard = self.lock();
        guard.as_ref().map(|s| s.downloadable_asset().clone())
    }

    /// The asset the view should currently show.
    #[must_use]
    pub fn displayed_asset(&self) -> Option<ImageAsset> {
        let guard = self.lock();
        guard.as_ref().map(|s| s.displayed_asset().clone())
    }

    /// The current source image, if a session exists.
    #[must_use]
    pub fn source_asset(&self) -> Option<ImageAsset> {
        let guard = self.lock();
        guard.as_ref().map(|s| s.source().clone())
    }

    /// Cheap copy of the session state, or `None` when empty.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let guard = self.lock();
        guard.as_ref().map(|s| SessionSnapshot {
            phase: s.phase(),
            progress: s.progress(),
            display_mode: s.display_mode(),
            active_directive: s.active_directive().cloned(),
            has_result: s.result().is_some(),
            generation: s.generation(),
        })
    }

    /// Generation of the current session, if any.
    #[must_use]
    pub fn current_generation(&self) -> Option<Generation> {
        let guard = self.lock();
        guard.as_ref().map(EditSession::generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{TransformError, UploadError};
    use crate::domain::asset::AssetRef;
    use crate::domain::directive::ToolKind;

    struct MemoryStore;

    impl UploadCapability for MemoryStore {
        async fn put(&self, asset: &ImageAsset) -> Result<AssetRef, UploadError> {
            Ok(AssetRef::new(format!("mem://{}", asset.short_id())))
        }

        async fn fetch(&self, _reference: &AssetRef) -> Result<ImageAsset, UploadError> {
            ImageAsset::new(vec![0xAB; 6], "image/png")
                .map_err(|e| UploadError::InvalidPayload(e.to_string()))
        }
    }

    struct SuffixTransform;

    impl TransformCapability for SuffixTransform {
        async fn apply(
            &self,
            reference: &AssetRef,
            _directive: &TransformDirective,
        ) -> Result<AssetRef, TransformError> {
            Ok(AssetRef::new(format!("{}#out", reference.as_str())))
        }
    }

    struct BrokenTransform;

    impl TransformCapability for BrokenTransform {
        async fn apply(
            &self,
            _reference: &AssetRef,
            _directive: &TransformDirective,
        ) -> Result<AssetRef, TransformError> {
            Err(TransformError::Rejected {
                status: 500,
                message: "model crashed".into(),
            })
        }
    }

    fn source(byte: u8) -> ImageAsset {
        ImageAsset::new(vec![byte; 10], "image/jpeg").expect("valid test asset")
    }

    fn manager() -> SessionManager<MemoryStore, SuffixTransform> {
        SessionManager::new(Arc::new(MemoryStore), Arc::new(SuffixTransform))
    }

    #[tokio::test]
    async fn run_without_source_is_rejected() {
        let manager = manager();
        let result = manager
            .run_directive(TransformDirective::Tool(ToolKind::Retouch))
            .await;
        assert_eq!(result, Err(SessionError::NoSource));
        assert!(manager.snapshot().is_none());
    }

    #[tokio::test]
    async fn successful_run_commits_result() {
        let manager = manager();
        manager.load_source(source(1));

        let outcome = manager
            .run_directive(TransformDirective::Tool(ToolKind::Retouch))
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Completed);

        let snapshot = manager.snapshot().unwrap();
        assert_eq!(snapshot.phase, SessionPhase::Completed);
        assert!(snapshot.has_result);
        assert!(snapshot.progress.is_complete());
        assert_eq!(
            snapshot.active_directive.unwrap().as_str(),
            "retouch"
        );

        // Download returns the transform result, not the source.
        let downloaded = manager.download().unwrap();
        assert_ne!(downloaded, source(1));
    }

    #[tokio::test]
    async fn failed_run_resets_progress_and_allows_retry() {
        let manager: SessionManager<MemoryStore, BrokenTransform> =
            SessionManager::new(Arc::new(MemoryStore), Arc::new(BrokenTransform));
        manager.load_source(source(1));

        let result = manager
            .run_directive(TransformDirective::Tool(ToolKind::Blur))
            .await;
        assert!(matches!(
            result,
            Err(SessionError::TransformFailed(msg)) if msg.contains("model crashed")
        ));

        let snapshot = manager.snapshot().unwrap();
        assert_eq!(snapshot.phase, SessionPhase::Failed);
        assert_eq!(snapshot.progress, Progress::ZERO);
        assert!(snapshot.active_directive.is_none());
        assert!(!snapshot.has_result);

        // Failed is retry-permitted: a second run is not rejected as busy.
        let retry = manager
            .run_directive(TransformDirective::Tool(ToolKind::Blur))
            .await;
        assert!(matches!(retry, Err(SessionError::TransformFailed(_))));
    }

    #[tokio::test]
    async fn reset_returns_to_ready_and_download_falls_back_to_source() {
        let manager = manager();
        manager.load_source(source(1));
        manager
            .run_directive(TransformDirective::Tool(ToolKind::Enhance))
            .await
            .unwrap();

        assert!(manager.reset());
        let snapshot = manager.snapshot().unwrap();
        assert_eq!(snapshot.phase, SessionPhase::Ready);
        assert!(!snapshot.has_result);
        assert_eq!(manager.download().unwrap(), source(1));

        // A second reset is a no-op.
        assert!(!manager.reset());
    }

    #[tokio::test]
    async fn toggle_is_noop_before_completion() {
        let manager = manager();
        assert_eq!(manager.toggle_display_mode(), None);

        manager.load_source(source(1));
        assert_eq!(manager.toggle_display_mode(), Some(DisplayMode::Result));
        assert_eq!(manager.displayed_asset().unwrap(), source(1));
    }

    #[tokio::test]
    async fn toggle_after_completion_switches_shown_asset() {
        let manager = manager();
        manager.load_source(source(1));
        manager
            .run_directive(TransformDirective::Tool(ToolKind::Retouch))
            .await
            .unwrap();

        let result = manager.download().unwrap();
        assert_eq!(manager.displayed_asset().unwrap(), result);

        assert_eq!(manager.toggle_display_mode(), Some(DisplayMode::Source));
        assert_eq!(manager.displayed_asset().unwrap(), source(1));

        assert_eq!(manager.toggle_display_mode(), Some(DisplayMode::Result));
        assert_eq!(manager.displayed_asset().unwrap(), result);
    }

    #[tokio::test]
    async fn heuristic_tick_respects_generation_and_ceiling() {
        let manager = manager();
        let stale = manager.load_source(source(1));
        let generation = manager.load_source(source(2));

        // Not processing: no tick applies.
        assert!(!manager.heuristic_tick(generation));
        // Stale generation: never applies.
        assert!(!manager.heuristic_tick(stale));

        // Enter processing by hand via the public flow: run with a gated
        // transform is exercised in the integration suite; here we only
        // check the ceiling arithmetic.
        assert_eq!(
            Progress::new(93).min(HEURISTIC_CEILING),
            Progress::new(93)
        );
        assert_eq!(
            Progress::new(99).min(HEURISTIC_CEILING),
            HEURISTIC_CEILING
        );
    }

    #[tokio::test]
    async fn progress_watch_reports_completion() {
        let manager = manager();
        let rx = manager.subscribe_progress();
        let generation = manager.load_source(source(1));
        manager
            .run_directive(TransformDirective::Tool(ToolKind::Retouch))
            .await
            .unwrap();

        let update = *rx.borrow();
        assert_eq!(update.generation, generation);
        assert_eq!(update.percent, Progress::COMPLETE);
    }

    #[tokio::test]
    async fn new_source_replaces_session_from_any_state() {
        let manager = manager();
        let first = manager.load_source(source(1));
        manager
            .run_directive(TransformDirective::Tool(ToolKind::Retouch))
            .await
            .unwrap();

        let second = manager.load_source(source(2));
        assert!(second > first);

        let snapshot = manager.snapshot().unwrap();
        assert_eq!(snapshot.phase, SessionPhase::Ready);
        assert!(!snapshot.has_result);
        assert_eq!(manager.source_asset().unwrap(), source(2));
    }
}
