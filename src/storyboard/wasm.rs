//! WASM bindings for the storyboard editor.
//!
//! The browser owns the network: `beginGeneration()` hands back the request
//! body, JavaScript `fetch`es it, and the response is fed back through
//! `completeGeneration()` (or `failGeneration()` when the fetch itself throws).

use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use crate::error::EditorError;
use crate::generation::{parse_response, GenerationError};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::storyboard::editor::{PendingGeneration, StoryboardEditor};
use crate::storyboard::model::*;

/// Serialize a value to JsValue with maps as plain JS objects (not Map).
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<EditorError> for JsValue {
    fn from(err: EditorError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: EditorError| JsValue::from(e))
    };
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Forwards notifications to a JS callback `({title, message, severity}) => void`.
struct JsNotifier {
    callback: Option<Function>,
}

impl Notifier for JsNotifier {
    fn notify(&self, notification: Notification) {
        let Some(callback) = &self.callback else {
            TracingNotifier.notify(notification);
            return;
        };
        match to_js_value(&notification) {
            Ok(value) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                    tracing::warn!("notification callback threw: {:?}", err);
                }
            }
            Err(err) => tracing::warn!("failed to serialize notification: {}", err),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsPending<'a> {
    ticket: &'a str,
    request: &'a crate::generation::GenerationRequest,
}

// =============================================================================
// MAIN WRAPPER TYPE
// =============================================================================

/// JavaScript-friendly wrapper around StoryboardEditor.
#[wasm_bindgen]
pub struct JsStoryboardEditor {
    inner: StoryboardEditor<JsNotifier>,
    pending: Option<PendingGeneration>,
}

#[wasm_bindgen]
impl JsStoryboardEditor {
    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Creates an empty editor.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const editor = new JsStoryboardEditor(({ title, message, severity }) =>
    ///   toast({
    ///     title,
    ///     description: message,
    ///     variant: severity === 'error' ? 'destructive' : undefined,
    ///   }));
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(on_notify: Option<Function>) -> JsStoryboardEditor {
        JsStoryboardEditor {
            inner: StoryboardEditor::new(JsNotifier {
                callback: on_notify,
            }),
            pending: None,
        }
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Gets the current input as `{description, style, aspectRatio, resolution}`.
    #[wasm_bindgen(js_name = getInput)]
    pub fn get_input(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(self.inner.input())?)
    }

    /// Replaces the whole input from a JS object.
    #[wasm_bindgen(js_name = setInput)]
    pub fn set_input(&mut self, input: JsValue) -> Result<(), JsValue> {
        let input: SceneInput = from_value(input)?;
        self.inner.set_input(input);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDescription)]
    pub fn set_description(&mut self, description: &str) {
        self.inner.set_description(description);
    }

    /// Sets the style: "realistic" | "cartoon" | "sketch".
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, style: &str) -> Result<(), JsValue> {
        let style: ImageStyle = js_result!(style.parse::<ImageStyle>())?;
        self.inner.set_style(style);
        Ok(())
    }

    /// Sets the aspect ratio: "16:9" | "4:3" | "1:1".
    #[wasm_bindgen(js_name = setAspectRatio)]
    pub fn set_aspect_ratio(&mut self, aspect_ratio: &str) -> Result<(), JsValue> {
        let ratio: AspectRatio = js_result!(aspect_ratio.parse::<AspectRatio>())?;
        self.inner.set_aspect_ratio(ratio);
        Ok(())
    }

    /// Sets the resolution (480..=1080, step 120).
    #[wasm_bindgen(js_name = setResolution)]
    pub fn set_resolution(&mut self, pixels: u32) -> Result<(), JsValue> {
        js_result!(self.inner.set_resolution(pixels))
    }

    // =========================================================================
    // GENERATION
    // =========================================================================

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.inner.is_busy()
    }

    /// Starts a generation. Returns `{ticket, request}`.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const { ticket, request } = editor.beginGeneration();
    /// try {
    ///   const res = await fetch(url, { method: 'POST', body: JSON.stringify(request),
    ///                                  headers: { 'Content-Type': 'application/json' } });
    ///   editor.completeGeneration(ticket, res.status, await res.text());
    /// } catch (e) {
    ///   editor.failGeneration(ticket, String(e));
    /// }
    /// ```
    #[wasm_bindgen(js_name = beginGeneration)]
    pub fn begin_generation(&mut self) -> Result<JsValue, JsValue> {
        let pending = js_result!(self.inner.begin_generation())?;
        let pending = self.pending.insert(pending);
        Ok(to_js_value(&JsPending {
            ticket: pending.ticket(),
            request: pending.request(),
        })?)
    }

    /// Applies the raw HTTP response. Returns the new scene's index.
    #[wasm_bindgen(js_name = completeGeneration)]
    pub fn complete_generation(
        &mut self,
        ticket: &str,
        status: u16,
        body: &str,
    ) -> Result<usize, JsValue> {
        let pending = self.take_pending(ticket)?;
        js_result!(self
            .inner
            .complete_generation(pending, parse_response(status, body)))
    }

    /// Applies a transport failure (the fetch rejected).
    #[wasm_bindgen(js_name = failGeneration)]
    pub fn fail_generation(&mut self, ticket: &str, reason: &str) -> Result<(), JsValue> {
        let pending = self.take_pending(ticket)?;
        js_result!(self
            .inner
            .complete_generation(pending, Err(GenerationError::transport(reason))))
        .map(|_| ())
    }

    /// Drops a request whose response will never be applied (the component
    /// unmounted, or the fetch was aborted) so the editor stops being busy.
    #[wasm_bindgen(js_name = abandonGeneration)]
    pub fn abandon_generation(&mut self, ticket: &str) -> Result<(), JsValue> {
        let pending = self.take_pending(ticket)?;
        js_result!(self.inner.abandon_generation(pending))
    }

    // =========================================================================
    // STORYBOARD
    // =========================================================================

    /// Gets all scenes as `[{id, imageUrl, description}]`.
    #[wasm_bindgen(js_name = getScenes)]
    pub fn get_scenes(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.scenes())?)
    }

    #[wasm_bindgen(js_name = sceneCount)]
    pub fn scene_count(&self) -> usize {
        self.inner.len()
    }

    /// Deletes a scene, returning it.
    #[wasm_bindgen(js_name = deleteScene)]
    pub fn delete_scene(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let removed = js_result!(self.inner.delete_scene(index))?;
        Ok(to_js_value(&removed)?)
    }

    /// Moves a scene "up" or "down". Returns false when the move is not legal.
    #[wasm_bindgen(js_name = moveScene)]
    pub fn move_scene(&mut self, index: usize, direction: &str) -> Result<bool, JsValue> {
        let direction: MoveDirection = js_result!(direction.parse::<MoveDirection>())?;
        Ok(self.inner.move_scene(index, direction))
    }

    /// Whether the "up"/"down" control should be shown for a scene.
    #[wasm_bindgen(js_name = canMove)]
    pub fn can_move(&self, index: usize, direction: &str) -> Result<bool, JsValue> {
        let direction: MoveDirection = js_result!(direction.parse::<MoveDirection>())?;
        Ok(self.inner.can_move(index, direction))
    }

    // =========================================================================
    // PROJECTIONS
    // =========================================================================

    /// Gets the export as `{fileName, mimeType, contents}`; JS turns it into a Blob download.
    #[wasm_bindgen(js_name = exportText)]
    pub fn export_text(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.export())?)
    }

    /// Gets a preview snapshot as `{title, description, entries}`, where each entry
    /// is `{number, imageUrl, description}`.
    #[wasm_bindgen(js_name = preview)]
    pub fn preview(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.preview())?)
    }
}

impl JsStoryboardEditor {
    fn take_pending(&mut self, ticket: &str) -> Result<PendingGeneration, JsValue> {
        match self.pending.take() {
            Some(pending) if pending.ticket() == ticket => Ok(pending),
            other => {
                self.pending = other;
                Err(EditorError::unknown_ticket(ticket).into())
            }
        }
    }
}

impl Default for JsStoryboardEditor {
    fn default() -> Self {
        Self::new(None)
    }
}
