use httpmock::Method::POST;
use httpmock::MockServer;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::speech::config::SpeechConfig;
use crate::speech::error::SpeechError;
use crate::speech::types::TtsRequest;
use crate::speech::SpeechClient;

fn client_for(server: &MockServer) -> SpeechClient {
    SpeechClient::new(SpeechConfig {
        api_key: Some("speech-key".to_string()),
        base_url: server.base_url(),
        timeout_ms: 5_000,
        ..SpeechConfig::default()
    })
    .expect("speech client should initialize")
}

#[test]
fn missing_key_fails_at_construction() {
    let err = SpeechClient::new(SpeechConfig::default()).err().expect("should fail");
    assert!(matches!(err, SpeechError::Config(ref message) if message.contains("ELEVENLABS_API_KEY")));
}

#[test]
fn transcribe_posts_multipart_with_model_settings() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/speech-to-text")
            .header("xi-api-key", "speech-key")
            .body_contains("name=\"file\"")
            .body_contains("scribe_v1")
            .body_contains("name=\"language_code\"")
            .body_contains("name=\"diarize\"");
        then.status(200).json_body(json!({
            "language_code": "eng",
            "text": "hello from the recording",
            "words": [{ "text": "hello", "speaker_id": "speaker_0" }]
        }));
    });

    let transcript = client_for(&server)
        .transcribe(b"ID3fakeaudio".to_vec(), "clip.mp3")
        .expect("transcription should succeed");

    mock.assert();
    assert_eq!(transcript.text, "hello from the recording");
    assert_eq!(transcript.raw["words"][0]["speaker_id"], json!("speaker_0"));
}

#[test]
fn transcribe_rejects_empty_audio_without_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({"text": ""}));
    });

    let err = client_for(&server).transcribe(Vec::new(), "empty.wav").unwrap_err();
    mock.assert_hits(0);
    assert!(matches!(err, SpeechError::InvalidInput(_)));
}

#[test]
fn transcribe_surfaces_api_detail() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/v1/speech-to-text");
        then.status(400)
            .json_body(json!({"detail": {"status": "invalid_file", "message": "Unsupported audio"}}));
    });

    let err = client_for(&server).transcribe(vec![1, 2, 3], "x.bin").unwrap_err();
    assert_eq!(err.to_string(), "speech API returned 400: Unsupported audio");
}

#[test]
fn synthesize_uses_default_voice_and_format() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/text-to-speech/JBFqnCBsd6RMkjVDRZzb")
            .query_param("output_format", "mp3_44100_128")
            .header("xi-api-key", "speech-key")
            .json_body(json!({
                "text": "Hello there",
                "model_id": "eleven_multilingual_v2"
            }));
        then.status(200)
            .header("content-type", "audio/mpeg")
            .body(vec![0xFF_u8, 0xFB, 0x90, 0x00]);
    });

    let audio = client_for(&server)
        .synthesize(&TtsRequest::new("Hello there"))
        .expect("synthesis should succeed");

    mock.assert();
    assert_eq!(audio.bytes, vec![0xFF, 0xFB, 0x90, 0x00]);
    assert_eq!(audio.size_bytes(), 4);
    assert_eq!(audio.to_base64(), "//uQAA==");
    assert_eq!(audio.mime_type(), "audio/mpeg");
}

#[test]
fn synthesize_honors_request_overrides() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/text-to-speech/custom-voice")
            .body_contains("\"model_id\":\"eleven_turbo_v2\"");
        then.status(200).body(vec![1_u8]);
    });

    let request = TtsRequest {
        text: "Hi".to_string(),
        voice_id: Some("custom-voice".to_string()),
        model_id: Some("eleven_turbo_v2".to_string()),
    };
    client_for(&server)
        .synthesize(&request)
        .expect("synthesis should succeed");
    mock.assert();
}

#[test]
fn synthesize_maps_402_to_insufficient_credits() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(POST);
        then.status(402).json_body(json!({"detail": "quota_exceeded"}));
    });

    let err = client_for(&server)
        .synthesize(&TtsRequest::new("costly"))
        .unwrap_err();
    assert!(matches!(err, SpeechError::InsufficientCredits));
}

#[test]
fn synthesize_rejects_blank_text() {
    let server = MockServer::start();
    let err = client_for(&server)
        .synthesize(&TtsRequest::new("   "))
        .unwrap_err();
    assert!(matches!(err, SpeechError::InvalidInput(_)));
}

#[test]
fn duration_estimate_uses_character_rate() {
    let audio = crate::speech::SynthesizedAudio {
        bytes: vec![0; 10],
        output_format: "pcm_16000".to_string(),
    };
    assert_eq!(audio.duration_estimate(&"a".repeat(300)), 2.0);
    assert_eq!(audio.mime_type(), "audio/pcm");
}

#[test]
fn config_reads_environment_lookup() {
    let config = SpeechConfig::from_lookup(|key| match key {
        "ELEVENLABS_API_KEY" => Some(" k ".to_string()),
        "TOOLGATE_ELEVENLABS_BASE_URL" => Some("http://localhost:1".to_string()),
        _ => None,
    });
    assert_eq!(config.api_key.as_deref(), Some("k"));
    assert_eq!(config.base_url, "http://localhost:1");
    assert_eq!(config.stt_model, "scribe_v1");
    assert!(config.diarize);
}
