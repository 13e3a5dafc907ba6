//! Plain-text export of scene descriptions.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::EditorResult;
use crate::storyboard::model::Scene;

/// File name used for every export.
pub const EXPORT_FILE_NAME: &str = "storyboard.txt";

/// MIME type of the export.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// A downloadable export. Descriptions only, never image data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

impl ExportArtifact {
    pub fn from_scenes(scenes: &[Scene]) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            contents: render_text(scenes),
        }
    }

    /// Writes the artifact into `dir` as UTF-8, returning the full path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> EditorResult<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}

/// `Scene N:\n<description>\n\n` per scene, blocks joined by `\n`.
pub fn render_text(scenes: &[Scene]) -> String {
    scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| format!("Scene {}:\n{}\n\n", index + 1, scene.description))
        .collect::<Vec<_>>()
        .join("\n")
}
