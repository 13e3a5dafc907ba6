//! Storyboard editor - build an ordered storyboard of AI-generated scenes.
//!
//! The crate is the whole editor minus rendering:
//!
//! - **Scene input**: description, style, aspect ratio and resolution
//! - **Generation**: one outbound request per scene, gated by a busy flag
//! - **Storyboard**: ordered scenes with positional delete / move
//! - **Projections**: plain-text export and a preview snapshot
//!
//! User-facing messages go through an injected [`Notifier`]; the remote
//! service sits behind [`ImageGenerator`].
//!
//! # Example
//!
//! ```rust,no_run
//! use storyboard_editor::{
//!     AspectRatio, GeneratorConfig, HttpImageGenerator, StoryboardEditor, TracingNotifier,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = HttpImageGenerator::new(&GeneratorConfig::default())?;
//! let mut editor = StoryboardEditor::new(TracingNotifier);
//!
//! editor.set_description("A lighthouse in a storm");
//! editor.set_aspect_ratio(AspectRatio::Square);
//! editor.set_resolution(1080)?;
//!
//! editor.generate_scene(&generator).await?;
//!
//! let artifact = editor.export();
//! artifact.write_to_dir(".")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generation;
pub mod notify;
pub mod storyboard;

// Re-exports for convenience
pub use error::{EditorError, EditorResult};
pub use generation::{
    GeneratedImage, GenerationError, GenerationRequest, GeneratorConfig, ImageGenerator,
    DEFAULT_ENDPOINT,
};
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use storyboard::{
    AspectRatio, ExportArtifact, ImageStyle, MoveDirection, PendingGeneration, Preview,
    PreviewEntry, Resolution, Scene, SceneInput, StoryboardEditor,
};

#[cfg(feature = "http")]
pub use generation::HttpImageGenerator;

#[cfg(feature = "wasm")]
pub use storyboard::wasm::JsStoryboardEditor;
