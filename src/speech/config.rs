use serde::{Deserialize, Serialize};

pub const ELEVENLABS_API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
pub const ELEVENLABS_BASE_URL_ENV: &str = "TOOLGATE_ELEVENLABS_BASE_URL";

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_stt_model")]
    pub stt_model: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default = "default_true")]
    pub diarize: bool,
    #[serde(default = "default_true")]
    pub tag_audio_events: bool,
    #[serde(default = "default_voice_id")]
    pub default_voice_id: String,
    #[serde(default = "default_tts_model")]
    pub default_tts_model: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl SpeechConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        config.api_key = read(ELEVENLABS_API_KEY_ENV);
        if let Some(base_url) = read(ELEVENLABS_BASE_URL_ENV) {
            config.base_url = base_url;
        }
        config
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            stt_model: default_stt_model(),
            language_code: default_language_code(),
            diarize: true,
            tag_audio_events: true,
            default_voice_id: default_voice_id(),
            default_tts_model: default_tts_model(),
            output_format: default_output_format(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_ELEVENLABS_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    120_000
}

fn default_stt_model() -> String {
    "scribe_v1".to_string()
}

fn default_language_code() -> String {
    "eng".to_string()
}

fn default_true() -> bool {
    true
}

fn default_voice_id() -> String {
    "JBFqnCBsd6RMkjVDRZzb".to_string()
}

fn default_tts_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}
