//! StoryboardEditor: the state container and its transitions.
//!
//! All state lives in one struct and every transition is a plain method:
//! - `begin_generation()` validates input, marks the editor busy and hands back a
//!   `PendingGeneration` that owns the outbound request
//! - `complete_generation()` applies the remote outcome and returns to idle
//! - `abandon_generation()` returns to idle when the outcome will never arrive
//! - list operations (`delete_scene`, `move_scene`) and projections (`export`,
//!   `preview`) stay available while a generation is pending
//!
//! Nothing here renders; user-facing messages go through the injected `Notifier`.

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};
use crate::generation::{GeneratedImage, GenerationError, GenerationRequest, ImageGenerator};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::storyboard::export::ExportArtifact;
use crate::storyboard::model::*;
use crate::storyboard::preview::Preview;

// =============================================================================
// PENDING GENERATION
// =============================================================================

/// Ticket for the single in-flight generation request.
///
/// Owns everything needed to finish the operation, so it can outlive any
/// borrow of the editor while the request is suspended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    ticket: String,
    request: GenerationRequest,
}

impl PendingGeneration {
    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// The text that will become the scene description.
    pub fn description(&self) -> &str {
        &self.request.text
    }
}

/// Abandons its generation on drop unless `finish` ran first.
struct InFlightGuard<'a, N: Notifier> {
    editor: &'a mut StoryboardEditor<N>,
    pending: Option<PendingGeneration>,
}

impl<N: Notifier> InFlightGuard<'_, N> {
    fn finish(mut self, outcome: Result<GeneratedImage, GenerationError>) -> EditorResult<usize> {
        match self.pending.take() {
            Some(pending) => self.editor.complete_generation(pending, outcome),
            None => Err(EditorError::Busy),
        }
    }
}

impl<N: Notifier> Drop for InFlightGuard<'_, N> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = self.editor.abandon_generation(pending);
        }
    }
}

// =============================================================================
// EDITOR
// =============================================================================

/// Storyboard editing session.
///
/// # Example
///
/// ```rust
/// use storyboard_editor::{
///     GeneratedImage, ImageStyle, RecordingNotifier, StoryboardEditor,
/// };
///
/// let mut editor = StoryboardEditor::new(RecordingNotifier::new());
/// editor.set_description("A knight at dawn");
/// editor.set_style(ImageStyle::Cartoon);
///
/// let pending = editor.begin_generation().unwrap();
/// assert!(editor.is_busy());
///
/// // ...send pending.request() to the image service...
/// let image = GeneratedImage { image_url: "https://cdn.example/knight.png".into() };
/// editor.complete_generation(pending, Ok(image)).unwrap();
///
/// assert_eq!(editor.scenes().len(), 1);
/// assert!(editor.input().description.is_empty());
/// assert_eq!(editor.export().contents, "Scene 1:\nA knight at dawn\n\n");
/// ```
#[derive(Debug)]
pub struct StoryboardEditor<N: Notifier = TracingNotifier> {
    input: SceneInput,
    scenes: Vec<Scene>,
    /// Ticket of the in-flight request; `Some` means busy.
    in_flight: Option<String>,
    notifier: N,
}

impl Default for StoryboardEditor<TracingNotifier> {
    fn default() -> Self {
        Self::new(TracingNotifier)
    }
}

impl<N: Notifier> StoryboardEditor<N> {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates an idle editor with default input and an empty storyboard.
    pub fn new(notifier: N) -> Self {
        Self {
            input: SceneInput::default(),
            scenes: Vec::new(),
            in_flight: None,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // =========================================================================
    // INPUT STATE
    // =========================================================================

    pub fn input(&self) -> &SceneInput {
        &self.input
    }

    pub fn set_input(&mut self, input: SceneInput) {
        self.input = input;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.input.description = description.into();
    }

    pub fn set_style(&mut self, style: ImageStyle) {
        self.input.style = style;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.input.aspect_ratio = aspect_ratio;
    }

    /// Sets the resolution from a raw pixel value.
    pub fn set_resolution(&mut self, pixels: u32) -> EditorResult<()> {
        self.input.resolution = Resolution::new(pixels)?;
        Ok(())
    }

    // =========================================================================
    // STORYBOARD STATE
    // =========================================================================

    /// Scenes in presentation order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// True while a generation request is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether "add scene" should be offered.
    pub fn can_generate(&self) -> bool {
        !self.is_busy()
    }

    // =========================================================================
    // GENERATION
    // =========================================================================

    /// Idle -> Submitting.
    ///
    /// Fails with `Busy` (silently) while another request is in flight, and
    /// with `Validation` (notified) when the description is blank. Neither
    /// failure changes any state.
    pub fn begin_generation(&mut self) -> EditorResult<PendingGeneration> {
        if self.is_busy() {
            debug!("generation already in flight, ignoring trigger");
            return Err(EditorError::Busy);
        }

        let request = match GenerationRequest::from_input(&self.input) {
            Ok(request) => request,
            Err(e) => {
                self.notifier.notify(Notification::empty_description());
                return Err(e);
            }
        };

        let ticket = Uuid::new_v4().to_string();
        self.in_flight = Some(ticket.clone());
        info!(
            ticket = %ticket,
            style = %request.style,
            aspect_ratio = %request.aspect_ratio,
            resolution = request.resolution.get(),
            "generation started"
        );
        Ok(PendingGeneration { ticket, request })
    }

    /// Submitting -> Success | Failure -> Idle.
    ///
    /// On success the new scene is appended, the description input is cleared
    /// and the new scene's index is returned. On failure the storyboard and
    /// the input are left untouched and the remote error is returned.
    pub fn complete_generation(
        &mut self,
        pending: PendingGeneration,
        outcome: Result<GeneratedImage, GenerationError>,
    ) -> EditorResult<usize> {
        if self.in_flight.as_deref() != Some(pending.ticket.as_str()) {
            return Err(EditorError::unknown_ticket(pending.ticket));
        }
        self.in_flight = None;

        match outcome {
            Ok(image) => {
                self.scenes.push(Scene::new(image.image_url, pending.request.text));
                self.input.description.clear();
                let index = self.scenes.len() - 1;
                info!(ticket = %pending.ticket, index, "scene added");
                self.notifier.notify(Notification::scene_added());
                Ok(index)
            }
            Err(e) => {
                error!(ticket = %pending.ticket, error = %e, "error generating scene");
                self.notifier.notify(Notification::generation_failed());
                Err(EditorError::Remote(e))
            }
        }
    }

    /// Submitting -> Idle without an outcome.
    ///
    /// For a request whose response will never be applied (the future was
    /// dropped, or the caller lost the response). Treated as a failure: the
    /// storyboard and the input are left untouched.
    pub fn abandon_generation(&mut self, pending: PendingGeneration) -> EditorResult<()> {
        if self.in_flight.as_deref() != Some(pending.ticket.as_str()) {
            return Err(EditorError::unknown_ticket(pending.ticket));
        }
        self.in_flight = None;
        warn!(ticket = %pending.ticket, "generation abandoned before a response arrived");
        self.notifier.notify(Notification::generation_failed());
        Ok(())
    }

    /// Runs a whole generation against `generator`: begin, one call, complete.
    ///
    /// Dropping the returned future before it resolves abandons the request,
    /// so the editor is never left busy.
    pub async fn generate_scene<G>(&mut self, generator: &G) -> EditorResult<usize>
    where
        G: ImageGenerator + ?Sized,
    {
        let pending = self.begin_generation()?;
        let request = pending.request().clone();
        let guard = InFlightGuard {
            editor: self,
            pending: Some(pending),
        };
        let outcome = generator.generate(&request).await;
        guard.finish(outcome)
    }

    // =========================================================================
    // LIST OPERATIONS
    // =========================================================================

    /// Removes and returns the scene at `index`.
    pub fn delete_scene(&mut self, index: usize) -> EditorResult<Scene> {
        if index >= self.scenes.len() {
            return Err(EditorError::index_out_of_bounds(index, self.scenes.len()));
        }
        let removed = self.scenes.remove(index);
        debug!(index, remaining = self.scenes.len(), "scene deleted");
        self.notifier.notify(Notification::scene_deleted());
        Ok(removed)
    }

    /// Whether a move control should be offered for `index`.
    pub fn can_move(&self, index: usize, direction: MoveDirection) -> bool {
        direction.target(index, self.scenes.len()).is_some()
    }

    /// Swaps the scene at `index` with its neighbour. Illegal moves are a no-op.
    ///
    /// Returns whether a swap happened.
    pub fn move_scene(&mut self, index: usize, direction: MoveDirection) -> bool {
        match direction.target(index, self.scenes.len()) {
            Some(target) => {
                self.scenes.swap(index, target);
                debug!(from = index, to = target, "scene moved");
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // PROJECTIONS
    // =========================================================================

    /// Renders the text export. Does not touch the storyboard.
    pub fn export(&self) -> ExportArtifact {
        let artifact = ExportArtifact::from_scenes(&self.scenes);
        self.notifier.notify(Notification::exported());
        artifact
    }

    /// Snapshot for the preview overlay.
    pub fn preview(&self) -> Preview {
        Preview::from_scenes(&self.scenes)
    }
}

// =============================================================================
// TESTS
// =============================================================================
