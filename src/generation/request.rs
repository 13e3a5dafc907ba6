//! Request and response shapes for the image-generation endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::storyboard::model::{AspectRatio, ImageStyle, Resolution, SceneInput};

/// Body of the outbound generation POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub text: String,
    pub style: ImageStyle,
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
}

impl GenerationRequest {
    /// Packages scene input into a request, rejecting blank descriptions.
    ///
    /// The description is sent verbatim; only the blank check trims.
    pub fn from_input(input: &SceneInput) -> EditorResult<Self> {
        if input.is_blank() {
            return Err(EditorError::validation("scene description is empty"));
        }
        Ok(Self {
            text: input.description.clone(),
            style: input.style,
            aspect_ratio: input.aspect_ratio,
            resolution: input.resolution,
        })
    }
}

/// Successful generation payload.
///
/// Only `imageUrl` is required; any other fields the service returns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_url: String,
}

/// Failure talking to the generation endpoint.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx status.
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// 2xx status but the payload lacks a usable image reference.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

/// Classifies a raw HTTP response into an image reference or a failure.
pub fn parse_response(status: u16, body: &str) -> Result<GeneratedImage, GenerationError> {
    if !(200..300).contains(&status) {
        return Err(GenerationError::Status {
            status,
            body: body.to_string(),
        });
    }
    parse_payload(body)
}

/// Parses a 2xx body. Requires a JSON object whose `imageUrl` is a non-empty string.
pub fn parse_payload(body: &str) -> Result<GeneratedImage, GenerationError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GenerationError::invalid_response(format!("body is not JSON: {e}")))?;
    let image_url = value
        .as_object()
        .ok_or_else(|| GenerationError::invalid_response("body is not a JSON object"))?
        .get("imageUrl")
        .and_then(|v| v.as_str())
        .ok_or_else(|| GenerationError::invalid_response("missing string field imageUrl"))?;
    if image_url.trim().is_empty() {
        return Err(GenerationError::invalid_response("imageUrl is empty"));
    }
    Ok(GeneratedImage {
        image_url: image_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_matches_wire_format() {
        let input = SceneInput::new()
            .with_description("A knight at dawn")
            .with_style(ImageStyle::Cartoon)
            .with_aspect_ratio(AspectRatio::Square)
            .with_resolution(Resolution::new(960).unwrap());

        let request = GenerationRequest::from_input(&input).unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "text": "A knight at dawn",
                "style": "cartoon",
                "aspectRatio": "1:1",
                "resolution": 960
            })
        );
    }

    #[test]
    fn test_default_input_serializes_defaults() {
        let input = SceneInput::new().with_description("x");
        let json = serde_json::to_string(&GenerationRequest::from_input(&input).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"text":"x","style":"realistic","aspectRatio":"16:9","resolution":720}"#
        );
    }

    #[test]
    fn test_blank_description_rejected() {
        for text in ["", "   ", "\n\t "] {
            let input = SceneInput::new().with_description(text);
            assert!(matches!(
                GenerationRequest::from_input(&input),
                Err(EditorError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_description_sent_verbatim() {
        let input = SceneInput::new().with_description("  padded  ");
        let request = GenerationRequest::from_input(&input).unwrap();
        assert_eq!(request.text, "  padded  ");
    }

    #[test]
    fn test_parse_success_ignores_extra_fields() {
        let image = parse_response(200, r#"{"imageUrl":"https://cdn/x.png","id":7}"#).unwrap();
        assert_eq!(image.image_url, "https://cdn/x.png");
    }

    #[test]
    fn test_parse_non_2xx() {
        let err = parse_response(502, "bad gateway").unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 502, .. }));
    }

    #[test]
    fn test_parse_malformed_payloads() {
        for body in [
            "not json",
            "[]",
            "{}",
            r#"{"imageUrl":null}"#,
            r#"{"imageUrl":42}"#,
            r#"{"imageUrl":"  "}"#,
            r#"{"image_url":"https://cdn/x.png"}"#,
        ] {
            assert!(
                matches!(parse_response(200, body), Err(GenerationError::InvalidResponse(_))),
                "body {body:?} should be rejected"
            );
        }
    }
}
