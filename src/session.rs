//! Pipeline orchestrator: one crop session per user-initiated upload.
//!
//! A [`CropSession`] sequences decode → interactive crop → extract →
//! encode and owns all per-run state. The machine:
//!
//! ```text
//! Idle → Decoding → Ready ⇄ Dragging
//!                     │
//!                     └→ commit → Done
//! Decoding → Failed (decode error)
//! Decoding/Ready/Dragging → cancel → Idle
//! ```
//!
//! Decode may run wherever the caller likes (another thread, an async
//! task): [`begin_decode`](CropSession::begin_decode) hands out a
//! [`Generation`] token and [`apply_decoded`](CropSession::apply_decoded)
//! applies the result only if the token is still current — cancelling or
//! restarting the session bumps the generation, so a stale in-flight
//! decode is discarded rather than applied. Callers that decode inline
//! use [`load`](CropSession::load).
//!
//! Commit is all-or-nothing and one-shot: success yields the
//! [`EncodedResult`], releases the source buffer, and parks the session
//! in `Done`; re-cropping requires a new session from the original bytes.
//! A failed commit (degenerate rectangle, encoder error) returns the
//! typed error and leaves the session in `Ready` with the operator's
//! positioning intact.
//!
//! Sessions share no state with each other, so a multi-file upload can
//! run one session per file concurrently without coordination. The
//! geometry work per pointer move is O(1) and never suspends.

use crate::drag::{self, DragSession, PointerPos};
use crate::error::PipelineError;
use crate::geometry::{CropRect, initial_crop, validate_aspect};
use crate::raster::{EncodedResult, OutputSpec, SourceImage, extract_and_encode};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Decoding,
    Ready,
    Dragging,
    Done,
    Failed,
}

/// Token tying an in-flight decode to the session generation that
/// started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// One interactive crop pipeline run.
#[derive(Debug)]
pub struct CropSession {
    target_aspect: f64,
    state: SessionState,
    generation: u64,
    source: Option<SourceImage>,
    rect: Option<CropRect>,
    drag: Option<DragSession>,
}

impl CropSession {
    /// Create an idle session for a fixed target aspect.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidAspect`] for a zero, negative, or
    /// non-finite aspect — rejected before any decode work runs.
    pub fn new(target_aspect: f64) -> Result<Self, PipelineError> {
        validate_aspect(target_aspect)?;
        Ok(Self {
            target_aspect,
            state: SessionState::Idle,
            generation: 0,
            source: None,
            rect: None,
            drag: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn target_aspect(&self) -> f64 {
        self.target_aspect
    }

    /// The current decode generation. Tokens from older generations are
    /// stale and their results will be discarded.
    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// The current crop rectangle, present in `Ready`/`Dragging`.
    pub fn rect(&self) -> Option<&CropRect> {
        self.rect.as_ref()
    }

    /// Start a new decode, invalidating any still-pending one.
    ///
    /// Discards previous source/rect state and returns the token the
    /// eventual [`apply_decoded`](Self::apply_decoded) call must present.
    pub fn begin_decode(&mut self) -> Generation {
        self.generation += 1;
        self.source = None;
        self.rect = None;
        self.drag = None;
        self.state = SessionState::Decoding;
        Generation(self.generation)
    }

    /// Apply a finished decode if its token is still current.
    ///
    /// Returns `Ok(true)` when the result was applied, `Ok(false)` when
    /// it was stale (superseded or cancelled) and dropped. A decode
    /// failure moves the session to `Failed` and surfaces the error.
    pub fn apply_decoded(
        &mut self,
        token: Generation,
        decoded: Result<SourceImage, PipelineError>,
    ) -> Result<bool, PipelineError> {
        if token.0 != self.generation || self.state != SessionState::Decoding {
            log::debug!("discarding stale decode result (token {:?})", token);
            return Ok(false);
        }

        match decoded {
            Ok(source) => {
                self.rect = Some(initial_crop(
                    source.width(),
                    source.height(),
                    self.target_aspect,
                )?);
                self.source = Some(source);
                self.state = SessionState::Ready;
                Ok(true)
            }
            Err(e) => {
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }

    /// Decode `bytes` inline and make the session `Ready`.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), PipelineError> {
        let token = self.begin_decode();
        let decoded = SourceImage::decode(bytes);
        self.apply_decoded(token, decoded).map(|_| ())
    }

    /// Begin a drag gesture. Requires `Ready`.
    pub fn begin_drag(&mut self, pointer: PointerPos) {
        assert_eq!(self.state, SessionState::Ready, "begin_drag outside Ready");
        let rect = self.rect.as_ref().expect("Ready session has a rect");
        self.drag = Some(drag::begin_drag(pointer, rect));
        self.state = SessionState::Dragging;
    }

    /// Feed one pointer sample into the active gesture. Requires
    /// `Dragging`. Samples are applied in arrival order.
    pub fn drag_to(&mut self, pointer: PointerPos) {
        assert_eq!(self.state, SessionState::Dragging, "drag_to outside Dragging");
        let session = self.drag.as_ref().expect("Dragging session has drag state");
        let rect = self.rect.as_ref().expect("Dragging session has a rect");
        self.rect = Some(drag::update_drag(session, pointer, rect));
    }

    /// End the active gesture and return to `Ready`.
    pub fn end_drag(&mut self) {
        assert_eq!(self.state, SessionState::Dragging, "end_drag outside Dragging");
        if let Some(session) = self.drag.take() {
            drag::end_drag(session);
        }
        self.state = SessionState::Ready;
    }

    /// Re-center the crop rectangle, discarding operator positioning.
    /// Requires `Ready`.
    pub fn reset_crop(&mut self) -> Result<(), PipelineError> {
        assert_eq!(self.state, SessionState::Ready, "reset_crop outside Ready");
        let source = self.source.as_ref().expect("Ready session has a source");
        self.rect = Some(initial_crop(
            source.width(),
            source.height(),
            self.target_aspect,
        )?);
        Ok(())
    }

    /// Extract and encode the current crop. Requires `Ready`.
    ///
    /// On success the session moves to `Done`, the source buffer is
    /// released, and the result is yielded to the caller — one-shot. On
    /// failure the session stays `Ready` with source and rectangle
    /// intact, so the operator keeps their positioning and the caller
    /// may reset or retry.
    pub fn commit(&mut self, spec: &OutputSpec) -> Result<EncodedResult, PipelineError> {
        assert_eq!(self.state, SessionState::Ready, "commit outside Ready");
        let source = self.source.as_ref().expect("Ready session has a source");
        let rect = self.rect.as_ref().expect("Ready session has a rect");

        let result = extract_and_encode(source, rect, spec)?;

        self.source = None;
        self.rect = None;
        self.state = SessionState::Done;
        Ok(result)
    }

    /// Abandon the session without producing output.
    ///
    /// Releases the source and rectangle and invalidates any in-flight
    /// decode. Safe in every state; the session returns to `Idle` and
    /// may be reused for a new file.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.source = None;
        self.rect = None;
        self.drag = None;
        self.state = SessionState::Idle;
    }
}
