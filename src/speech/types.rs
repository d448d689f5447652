use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Rough speaking rate used for duration estimates.
const CHARS_PER_SECOND_ESTIMATE: f64 = 150.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Full provider payload (words, speakers, audio events).
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl TtsRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub output_format: String,
}

impl SynthesizedAudio {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Estimated playback length in seconds for the text that produced this audio.
    pub fn duration_estimate(&self, text: &str) -> f64 {
        text.chars().count() as f64 / CHARS_PER_SECOND_ESTIMATE
    }

    pub fn mime_type(&self) -> &'static str {
        if self.output_format.starts_with("mp3") {
            "audio/mpeg"
        } else if self.output_format.starts_with("pcm") {
            "audio/pcm"
        } else if self.output_format.starts_with("ulaw") {
            "audio/basic"
        } else {
            "application/octet-stream"
        }
    }
}
