mod common;

use common::{RecordingTransport, mock_client, spy_client};
use oaiwire::{ImageGenerationRequest, LlmError, SpeechRequest};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

#[tokio::test]
async fn test_generate_image_sends_only_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_json(json!({
            "prompt": "A red bicycle leaning on a wall",
            "model": "dall-e-3",
            "n": 1,
            "quality": "hd",
            "response_format": "url"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1700000000,
            "data": [{
                "url": "https://images.test/bike.png",
                "revised_prompt": "A red bicycle leaning on a brick wall"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ImageGenerationRequest::new("dall-e-3", "A red bicycle leaning on a wall")
        .with_n(1)
        .with_quality("hd")
        .with_response_format("url");

    let generation = mock_client(server.uri())
        .generate_image(request)
        .await
        .expect("image generation");

    assert_eq!(generation.created, 1700000000);
    assert_eq!(
        generation.data[0].url.as_deref(),
        Some("https://images.test/bike.png")
    );
}

#[tokio::test]
async fn test_invalid_image_requests_never_reach_transport() {
    let transport = RecordingTransport::new(r#"{"created":0,"data":[]}"#);
    let client = spy_client("sk-test", transport.clone());

    let cases = vec![
        (ImageGenerationRequest::new("dall-e-1", "x"), "invalid model"),
        (
            ImageGenerationRequest::new("dall-e-3", "x").with_n(11),
            "n out of range",
        ),
        (
            ImageGenerationRequest::new("dall-e-2", "x").with_style("vivid"),
            "style on dall-e-2",
        ),
        (
            ImageGenerationRequest::new("dall-e-3", "x").with_response_format("jpeg"),
            "bad response format",
        ),
        (ImageGenerationRequest::new("dall-e-3", ""), "empty prompt"),
    ];

    for (request, label) in cases {
        let result = client.generate_image(request).await;
        let matched = match label {
            "n out of range" => matches!(result, Err(LlmError::OutOfRange(_))),
            "empty prompt" => matches!(result, Err(LlmError::MissingArgument(_))),
            _ => matches!(result, Err(LlmError::InvalidArgument(_))),
        };
        assert!(matched, "{label}: unexpected result {result:?}");
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_speech_audio_is_base64_encoded() {
    let server = MockServer::start().await;
    let audio: Vec<u8> = (0u8..=255).collect();

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_json(json!({
            "model": "tts-1",
            "input": "Good morning",
            "voice": "alloy",
            "response_format": "opus"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let speech = mock_client(server.uri())
        .text_to_speech(
            SpeechRequest::new("tts-1", "Good morning")
                .with_voice("alloy")
                .with_response_format("opus"),
        )
        .await
        .expect("speech");

    assert_eq!(speech.extension, ".opus");
    assert_eq!(speech.decode().unwrap(), audio);
}

#[tokio::test]
async fn test_speech_extension_defaults_to_mp3() {
    let transport = RecordingTransport::new(&b"ID3"[..]);
    let client = spy_client("sk-test", transport.clone());

    let speech = client
        .text_to_speech(SpeechRequest::new("tts-1-hd", "Hello"))
        .await
        .unwrap();

    assert_eq!(speech.extension, ".mp3");
    assert_eq!(speech.b64_audio, "SUQz");
    assert_eq!(transport.requests()[0].url, "https://api.openai.com/v1/audio/speech");
}

#[tokio::test]
async fn test_speech_speed_out_of_range_never_reaches_transport() {
    let transport = RecordingTransport::new(&b"ID3"[..]);
    let client = spy_client("sk-test", transport.clone());

    let result = client
        .text_to_speech(SpeechRequest::new("tts-1", "Hello").with_speed(5.0))
        .await;

    assert!(matches!(result, Err(LlmError::OutOfRange(_))));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_speech_server_error_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream failure"))
        .mount(&server)
        .await;

    let result = mock_client(server.uri())
        .text_to_speech(SpeechRequest::new("tts-1", "Hello"))
        .await;

    match result {
        Err(LlmError::Transport {
            status_code: Some(500),
            message,
            ..
        }) => assert!(message.contains("500")),
        other => panic!("Expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_api_key_is_auth_error_for_media_operations() {
    let transport = RecordingTransport::new(r#"{"created":0,"data":[]}"#);
    let client = spy_client("", transport.clone());

    let image = client
        .generate_image(ImageGenerationRequest::new("dall-e-3", "A quiet harbor"))
        .await;
    assert!(matches!(image, Err(LlmError::Auth(_))), "image: {image:?}");

    let speech = client
        .text_to_speech(SpeechRequest::new("tts-1", "Hello").with_voice("echo"))
        .await;
    assert!(matches!(speech, Err(LlmError::Auth(_))), "speech: {speech:?}");

    assert_eq!(transport.calls(), 0);
}
