//! Speech provider client: speech-to-text and text-to-speech over the
//! ElevenLabs HTTP API.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::SpeechClient;
pub use config::SpeechConfig;
pub use error::SpeechError;
pub use types::{SynthesizedAudio, Transcript, TtsRequest};

#[cfg(test)]
mod tests;
