mod audio_probe;
mod azure_whisper_engine;
mod gemini_engine;
mod openai_whisper_engine;
pub mod response_decoder;
mod transcription_engine_factory;
mod upload_body;

pub use audio_probe::SymphoniaAudioProbe;
pub use azure_whisper_engine::{AzureWhisperEngine, DEFAULT_AZURE_API_VERSION};
pub use gemini_engine::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_PROMPT, GeminiEngine,
};
pub use openai_whisper_engine::{DEFAULT_OPENAI_BASE_URL, DEFAULT_WHISPER_MODEL, OpenAiWhisperEngine};
pub use transcription_engine_factory::{EngineEndpoints, TranscriptionEngineFactory};
pub use upload_body::progress_body;
