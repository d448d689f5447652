#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("insufficient credits")]
    InsufficientCredits,
    #[error("speech API returned {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timeout: {0}")]
    Timeout(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return Self::Timeout(value.to_string());
        }
        Self::Request(value.to_string())
    }
}

impl From<std::io::Error> for SpeechError {
    fn from(value: std::io::Error) -> Self {
        Self::InvalidInput(value.to_string())
    }
}
