//! Storyboard editing.
//!
//! This module provides:
//! - `model`: Scene input, scenes and the option enums (style, aspect ratio, resolution)
//! - `editor`: StoryboardEditor with the generation state machine and list operations
//! - `export`: plain-text export of scene descriptions
//! - `preview`: read-only snapshot for the preview overlay
//! - `wasm`: WASM bindings for browser usage (JsStoryboardEditor)

pub mod editor;
pub mod export;
pub mod model;
pub mod preview;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use editor::{PendingGeneration, StoryboardEditor};
pub use export::{ExportArtifact, EXPORT_FILE_NAME};
pub use model::*;
pub use preview::{Preview, PreviewEntry};

#[cfg(feature = "wasm")]
pub use wasm::JsStoryboardEditor;
