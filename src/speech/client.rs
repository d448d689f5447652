use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::Serialize;

use crate::speech::config::{SpeechConfig, ELEVENLABS_API_KEY_ENV};
use crate::speech::error::SpeechError;
use crate::speech::types::{SynthesizedAudio, Transcript, TtsRequest};

const API_KEY_HEADER: &str = "xi-api-key";

pub struct SpeechClient {
    config: SpeechConfig,
    api_key: String,
    client: Client,
}

#[derive(Serialize)]
struct TtsBody<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl SpeechClient {
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                SpeechError::Config(format!(
                    "speech client requires an API key (set {ELEVENLABS_API_KEY_ENV})"
                ))
            })?;

        if config.timeout_ms == 0 {
            return Err(SpeechError::Config(
                "speech timeout must be greater than 0".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| SpeechError::Config(error.to_string()))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Transcribes an audio clip. Blocks until the provider finishes.
    pub fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<Transcript, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidInput("audio is empty".to_string()));
        }
        tracing::info!(file = %file_name, size = audio.len(), "transcribing audio");

        let form = Form::new()
            .part("file", Part::bytes(audio).file_name(file_name.to_string()))
            .text("model_id", self.config.stt_model.clone())
            .text("language_code", self.config.language_code.clone())
            .text("diarize", self.config.diarize.to_string())
            .text("tag_audio_events", self.config.tag_audio_events.to_string());

        let response = self
            .client
            .post(self.endpoint("/v1/speech-to-text"))
            .header(API_KEY_HEADER, &self.api_key)
            .multipart(form)
            .send()?;
        let response = check_status(response)?;

        let raw: serde_json::Value = response.json().map_err(|error| {
            SpeechError::InvalidResponse(format!("failed to parse transcription JSON: {error}"))
        })?;
        let text = raw
            .get("text")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                SpeechError::InvalidResponse("transcription missing 'text'".to_string())
            })?
            .to_string();

        tracing::info!(chars = text.len(), "transcription complete");
        Ok(Transcript { text, raw })
    }

    pub fn transcribe_file(&self, path: &Path) -> Result<Transcript, SpeechError> {
        let audio = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());
        self.transcribe(audio, &file_name)
    }

    /// Synthesizes speech for `request.text`. Blocks until all audio is received.
    pub fn synthesize(&self, request: &TtsRequest) -> Result<SynthesizedAudio, SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::InvalidInput("text cannot be empty".to_string()));
        }
        let voice_id = request
            .voice_id
            .as_deref()
            .unwrap_or(self.config.default_voice_id.as_str());
        let model_id = request
            .model_id
            .as_deref()
            .unwrap_or(self.config.default_tts_model.as_str());
        tracing::info!(chars = request.text.len(), %voice_id, %model_id, "generating speech");

        let response = self
            .client
            .post(self.endpoint(&format!("/v1/text-to-speech/{voice_id}")))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("output_format", self.config.output_format.as_str())])
            .json(&TtsBody {
                text: &request.text,
                model_id,
            })
            .send()?;
        let response = check_status(response)?;

        let bytes = response.bytes()?.to_vec();
        if bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "speech API returned no audio".to_string(),
            ));
        }

        tracing::info!(size = bytes.len(), "speech generated");
        Ok(SynthesizedAudio {
            bytes,
            output_format: self.config.output_format.clone(),
        })
    }
}

fn check_status(response: Response) -> Result<Response, SpeechError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.as_u16() == 402 {
        tracing::warn!("speech provider reports insufficient credits");
        return Err(SpeechError::InsufficientCredits);
    }

    let body = response.text().unwrap_or_default();
    let detail = error_detail(&body);
    tracing::warn!(status = status.as_u16(), %detail, "speech API error");
    Err(SpeechError::Api {
        status: status.as_u16(),
        detail,
    })
}

/// Pulls the provider's `detail` out of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let detail = parsed.as_ref().and_then(|value| value.get("detail"));
    match detail {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(value) => value
            .get("message")
            .and_then(|message| message.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        None if body.trim().is_empty() => "no details".to_string(),
        None => body.trim().to_string(),
    }
}
