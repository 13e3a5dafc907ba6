//! Data models for the storyboard editor.
//!
//! Wire names (`"realistic"`, `"16:9"`, ...) match the values the generation
//! endpoint expects, so the same enums serve the UI pickers and the request body.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};

// =============================================================================
// IMAGE STYLE
// =============================================================================

/// Rendering style requested from the image generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Realistic,
    Cartoon,
    Sketch,
}

impl ImageStyle {
    pub const ALL: [ImageStyle; 3] = [Self::Realistic, Self::Cartoon, Self::Sketch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Cartoon => "cartoon",
            Self::Sketch => "sketch",
        }
    }

    /// Human-readable label for pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Cartoon => "Cartoon",
            Self::Sketch => "Sketch",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EditorError::invalid_option("image style", s))
    }
}

// =============================================================================
// ASPECT RATIO
// =============================================================================

/// Frame aspect ratio for generated images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [Self::Widescreen, Self::Standard, Self::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Widescreen => "16:9",
            Self::Standard => "4:3",
            Self::Square => "1:1",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| EditorError::invalid_option("aspect ratio", s))
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Output height in pixels, constrained to the slider's range and step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Resolution(u32);

impl Resolution {
    pub const MIN: u32 = 480;
    pub const MAX: u32 = 1080;
    pub const STEP: u32 = 120;
    pub const DEFAULT: Resolution = Resolution(720);

    /// Validates a raw pixel value.
    pub fn new(value: u32) -> EditorResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) && (value - Self::MIN) % Self::STEP == 0 {
            Ok(Self(value))
        } else {
            Err(EditorError::InvalidResolution(value))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Every selectable resolution, ascending.
    pub fn all() -> impl Iterator<Item = Resolution> {
        (Self::MIN..=Self::MAX)
            .step_by(Self::STEP as usize)
            .map(Resolution)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Resolution {
    type Error = EditorError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Resolution> for u32 {
    fn from(resolution: Resolution) -> u32 {
        resolution.0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.0)
    }
}

// =============================================================================
// SCENE INPUT
// =============================================================================

/// Transient, user-edited input for the next scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneInput {
    pub description: String,
    pub style: ImageStyle,
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
}

impl SceneInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: Set style.
    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: Set aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Builder: Set resolution.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// True when the description has no visible characters.
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// One storyboard entry: a generated image and the text that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Render key only; list operations are positional.
    pub id: String,
    pub image_url: String,
    pub description: String,
}

impl Scene {
    /// Creates a new Scene with a fresh id.
    pub fn new(image_url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            image_url: image_url.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// MOVE DIRECTION
// =============================================================================

/// Direction for `StoryboardEditor::move_scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    /// Neighbour index for a move from `index`, if it is within `len`.
    pub fn target(&self, index: usize, len: usize) -> Option<usize> {
        if index >= len {
            return None;
        }
        match self {
            Self::Up => index.checked_sub(1),
            Self::Down => Some(index + 1).filter(|&t| t < len),
        }
    }
}

impl FromStr for MoveDirection {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(EditorError::invalid_option("direction", s)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_input_defaults() {
        let input = SceneInput::default();
        assert!(input.description.is_empty());
        assert_eq!(input.style, ImageStyle::Realistic);
        assert_eq!(input.aspect_ratio, AspectRatio::Widescreen);
        assert_eq!(input.resolution.get(), 720);
    }

    #[test]
    fn test_resolution_bounds_and_step() {
        let values: Vec<u32> = Resolution::all().map(|r| r.get()).collect();
        assert_eq!(values, vec![480, 600, 720, 840, 960, 1080]);

        assert!(Resolution::new(360).is_err());
        assert!(Resolution::new(1200).is_err());
        assert!(matches!(
            Resolution::new(700),
            Err(EditorError::InvalidResolution(700))
        ));
    }

    #[test]
    fn test_style_and_ratio_parse() {
        assert_eq!("Cartoon".parse::<ImageStyle>().unwrap(), ImageStyle::Cartoon);
        assert_eq!("4:3".parse::<AspectRatio>().unwrap(), AspectRatio::Standard);
        assert!("watercolor".parse::<ImageStyle>().is_err());
        assert!("21:9".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_blank_detection() {
        assert!(SceneInput::new().with_description("  \n\t").is_blank());
        assert!(!SceneInput::new().with_description(" a ").is_blank());
    }

    #[test]
    fn test_move_targets() {
        assert_eq!(MoveDirection::Up.target(0, 3), None);
        assert_eq!(MoveDirection::Up.target(2, 3), Some(1));
        assert_eq!(MoveDirection::Down.target(2, 3), None);
        assert_eq!(MoveDirection::Down.target(0, 3), Some(1));
        assert_eq!(MoveDirection::Down.target(5, 3), None);
    }

    #[test]
    fn test_scene_ids_are_unique() {
        let a = Scene::new("https://example.com/a.png", "A");
        let b = Scene::new("https://example.com/a.png", "A");
        assert_ne!(a.id, b.id);
    }
}
