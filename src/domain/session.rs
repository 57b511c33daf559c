// SPDX-License-Identifier: MPL-2.0
//! The single active edit session.
//!
//! An [`EditSession`] carries one uploaded source image through the
//! transform lifecycle: `Ready` → `Processing` → `Completed`, with
//! `Failed` as the only other exit from `Processing`. Exactly one session
//! exists at a time; uploading a new source replaces it wholesale. The
//! session is a pure state value; the session manager in the application
//! layer owns it and is the only mutator.
//!
//! The phase is a single tagged value rather than a set of independent
//! flags, so combinations like "processing while displaying a result that
//! never existed" cannot be constructed.

use crate::domain::asset::ImageAsset;
use crate::domain::directive::DirectiveId;

// =============================================================================
// Generation
// =============================================================================

/// Token identifying one session instance.
///
/// Bumped every time a new source image replaces the session. Async
/// completions and progress ticks carry the generation they were issued
/// under; a mismatch means the originating session is gone and the update
/// must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any session exists.
    pub const INITIAL: Generation = Generation(0);

    /// Returns the next generation token.
    #[must_use]
    pub fn next(self) -> Generation {
        Generation(self.0.wrapping_add(1))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

// =============================================================================
// Progress
// =============================================================================

/// Progress percentage, guaranteed to be within 0..=100.
///
/// Progress is advisory feedback decoupled from real remote latency. While
/// an operation runs it only ever moves forward ([`advance_to`] keeps the
/// maximum); it is reset explicitly when an operation fails or a session is
/// replaced.
///
/// [`advance_to`]: Progress::advance_to
///
/// # Example
///
/// ```
/// use lumina_studio::domain::session::Progress;
///
/// let p = Progress::new(30);
/// assert_eq!(p.advance_to(Progress::new(10)).value(), 30);
/// assert_eq!(p.advance_to(Progress::new(80)).value(), 80);
/// assert_eq!(Progress::new(250), Progress::COMPLETE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Progress(u8);

impl Progress {
    /// No progress yet.
    pub const ZERO: Progress = Progress(0);
    /// The operation has completed.
    pub const COMPLETE: Progress = Progress(100);

    /// Creates a progress value, clamping to 100.
    #[must_use]
    pub const fn new(percent: u8) -> Self {
        Self(if percent > 100 { 100 } else { percent })
    }

    /// Returns the percentage.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the maximum of the two values; progress never regresses
    /// while an operation is running.
    #[must_use]
    pub fn advance_to(self, target: Progress) -> Progress {
        if target.0 > self.0 {
            target
        } else {
            self
        }
    }

    /// Returns `true` once the operation has completed.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 100
    }
}

// =============================================================================
// DisplayMode
// =============================================================================

/// Which asset the before/after toggle currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Show the transform result (the default once one exists).
    #[default]
    Result,
    /// Show the original source image.
    Source,
}

impl DisplayMode {
    /// Returns the opposite mode.
    #[must_use]
    pub fn flipped(self) -> DisplayMode {
        match self {
            DisplayMode::Result => DisplayMode::Source,
            DisplayMode::Source => DisplayMode::Result,
        }
    }
}

// =============================================================================
// SessionPhase
// =============================================================================

/// Lifecycle phase of the edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A source is loaded and no transform is running.
    Ready,
    /// A transform is in flight. At most one exists at any instant.
    Processing,
    /// The last transform succeeded and a result is available.
    Completed,
    /// The last transform failed; retrying is permitted.
    Failed,
}

impl SessionPhase {
    /// Returns `true` if a new transform may be started from this phase.
    #[must_use]
    pub fn accepts_directive(self) -> bool {
        !matches!(self, SessionPhase::Processing)
    }
}

// =============================================================================
// EditSession
// =============================================================================

/// The active upload-through-result editing context.
///
/// Created when a source image is loaded, replaced when a new one arrives,
/// and mutated only by the session manager.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: ImageAsset,
    phase: SessionPhase,
    progress: Progress,
    active_directive: Option<DirectiveId>,
    result: Option<ImageAsset>,
    display_mode: DisplayMode,
    generation: Generation,
}

impl EditSession {
    /// Creates a fresh session for a newly uploaded source.
    #[must_use]
    pub fn new(source: ImageAsset, generation: Generation) -> Self {
        Self {
            source,
            phase: SessionPhase::Ready,
            progress: Progress::ZERO,
            active_directive: None,
            result: None,
            display_mode: DisplayMode::Result,
            generation,
        }
    }

    /// Returns the source image.
    #[must_use]
    pub fn source(&self) -> &ImageAsset {
        &self.source
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the current progress.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the directive currently or most recently applied.
    #[must_use]
    pub fn active_directive(&self) -> Option<&DirectiveId> {
        self.active_directive.as_ref()
    }

    /// Returns the last successful transform result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&ImageAsset> {
        self.result.as_ref()
    }

    /// Returns the before/after display mode.
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Returns this session's generation token.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Marks the start of a transform run.
    pub fn begin_processing(&mut self, directive: DirectiveId) {
        self.phase = SessionPhase::Processing;
        self.active_directive = Some(directive);
        self.progress = Progress::ZERO;
    }

    /// Advances progress monotonically while processing.
    pub fn advance_progress(&mut self, target: Progress) {
        self.progress = self.progress.advance_to(target);
    }

    /// Commits a successful transform result.
    pub fn complete(&mut self, result: ImageAsset) {
        self.phase = SessionPhase::Completed;
        self.result = Some(result);
        self.display_mode = DisplayMode::Result;
        self.progress = Progress::COMPLETE;
    }

    /// Records a failed transform run.
    ///
    /// The prior result, if any, is preserved so the user does not lose the
    /// last good output.
    pub fn fail(&mut self) {
        self.phase = SessionPhase::Failed;
        self.progress = Progress::ZERO;
        self.active_directive = None;
    }

    /// Clears the result and returns to `Ready`, keeping the source.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Ready;
        self.progress = Progress::ZERO;
        self.active_directive = None;
        self.result = None;
        self.display_mode = DisplayMode::Result;
    }

    /// Flips the before/after toggle.
    ///
    /// A no-op until a result exists: before the first completion the
    /// source is the only thing there is to show.
    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        if self.result.is_some() {
            self.display_mode = self.display_mode.flipped();
        }
        self.display_mode
    }

    /// The asset the view should currently show.
    #[must_use]
    pub fn displayed_asset(&self) -> &ImageAsset {
        match (self.display_mode, self.result.as_ref()) {
            (DisplayMode::Result, Some(result)) => result,
            _ => &self.source,
        }
    }

    /// The asset a download action should produce: the result when one
    /// exists, otherwise the source.
    #[must_use]
    pub fn downloadable_asset(&self) -> &ImageAsset {
        self.result.as_ref().unwrap_or(&self.source)
    }
}
