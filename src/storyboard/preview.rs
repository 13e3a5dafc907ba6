//! Read-only preview of the whole storyboard.

use serde::{Deserialize, Serialize};

use crate::storyboard::model::Scene;

pub const PREVIEW_TITLE: &str = "Storyboard Preview";
pub const PREVIEW_DESCRIPTION: &str = "Here's a preview of your complete storyboard.";

/// One card in the preview overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewEntry {
    /// 1-based position.
    pub number: usize,
    pub image_url: String,
    pub description: String,
}

impl PreviewEntry {
    /// Alt text / caption, e.g. "Scene 3".
    pub fn label(&self) -> String {
        format!("Scene {}", self.number)
    }
}

/// Snapshot taken when the overlay opens. Later edits are not reflected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub title: String,
    pub description: String,
    pub entries: Vec<PreviewEntry>,
}

impl Preview {
    pub fn from_scenes(scenes: &[Scene]) -> Self {
        Self {
            title: PREVIEW_TITLE.to_string(),
            description: PREVIEW_DESCRIPTION.to_string(),
            entries: scenes
                .iter()
                .enumerate()
                .map(|(index, scene)| PreviewEntry {
                    number: index + 1,
                    image_url: scene.image_url.clone(),
                    description: scene.description.clone(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_numbers_are_one_based() {
        let scenes = vec![
            Scene::new("https://cdn/1.png", "first"),
            Scene::new("https://cdn/2.png", "second"),
        ];
        let preview = Preview::from_scenes(&scenes);

        assert_eq!(preview.title, "Storyboard Preview");
        assert_eq!(preview.entries.len(), 2);
        assert_eq!(preview.entries[0].number, 1);
        assert_eq!(preview.entries[1].label(), "Scene 2");
        assert_eq!(preview.entries[1].image_url, "https://cdn/2.png");
        assert_eq!(preview.entries[1].description, "second");
    }

    #[test]
    fn test_empty_preview() {
        assert!(Preview::from_scenes(&[]).is_empty());
    }
}
