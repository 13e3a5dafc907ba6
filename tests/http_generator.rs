//! HttpImageGenerator against a local one-shot HTTP server.

#![cfg(feature = "http")]

use storyboard_editor::{
    AspectRatio, EditorError, GenerationError, GeneratorConfig, HttpImageGenerator, ImageStyle,
    RecordingNotifier, StoryboardEditor,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one request with `status` / `body` and reports the request body it saw.
async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/v1/workflows", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length: usize = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse().unwrap())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body =
            String::from_utf8(buf[header_end..header_end + content_length].to_vec()).unwrap();

        let response = format!(
            "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(request_body);
    });

    (url, rx)
}

fn editor_for_knight() -> StoryboardEditor<RecordingNotifier> {
    let mut editor = StoryboardEditor::new(RecordingNotifier::new());
    editor.set_description("A knight at dawn");
    editor.set_style(ImageStyle::Cartoon);
    editor.set_aspect_ratio(AspectRatio::Square);
    editor.set_resolution(960).unwrap();
    editor
}

#[tokio::test]
async fn test_posts_json_body_and_appends_scene() {
    let (url, seen) = serve_once(200, r#"{"imageUrl":"https://cdn.example/knight.png"}"#).await;
    let generator = HttpImageGenerator::new(&GeneratorConfig::new(url)).unwrap();
    let mut editor = editor_for_knight();

    let index = editor.generate_scene(&generator).await.unwrap();

    let body: serde_json::Value = serde_json::from_str(&seen.await.unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "text": "A knight at dawn",
            "style": "cartoon",
            "aspectRatio": "1:1",
            "resolution": 960
        })
    );
    assert_eq!(index, 0);
    assert_eq!(editor.scenes()[0].image_url, "https://cdn.example/knight.png");
    assert!(editor.input().description.is_empty());
}

#[tokio::test]
async fn test_non_2xx_is_failure() {
    let (url, _seen) = serve_once(503, r#"{"error":"overloaded"}"#).await;
    let generator = HttpImageGenerator::new(&GeneratorConfig::new(url)).unwrap();
    let mut editor = editor_for_knight();

    let result = editor.generate_scene(&generator).await;

    assert!(matches!(
        result,
        Err(EditorError::Remote(GenerationError::Status { status: 503, .. }))
    ));
    assert!(editor.is_empty());
    assert_eq!(editor.input().description, "A knight at dawn");
    assert!(!editor.is_busy());
}

#[tokio::test]
async fn test_malformed_payload_is_failure() {
    let (url, _seen) = serve_once(200, r#"{"status":"queued"}"#).await;
    let generator = HttpImageGenerator::new(&GeneratorConfig::new(url)).unwrap();
    let mut editor = editor_for_knight();

    let result = editor.generate_scene(&generator).await;

    assert!(matches!(
        result,
        Err(EditorError::Remote(GenerationError::InvalidResponse(_)))
    ));
    assert!(editor.is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let generator = HttpImageGenerator::new(&GeneratorConfig::new(url)).unwrap();
    let mut editor = editor_for_knight();

    let result = editor.generate_scene(&generator).await;

    assert!(matches!(
        result,
        Err(EditorError::Remote(GenerationError::Transport(_)))
    ));
    assert_eq!(editor.input().description, "A knight at dawn");
}
