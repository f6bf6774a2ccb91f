//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod concat;
pub mod gemini;
pub mod tts;

pub use concat::{select_concatenator, ByteCopyConcatenator, FfmpegConcatenator, DEFAULT_FFMPEG_BIN};
pub use gemini::{GeminiClient, GeminiClientConfig};
pub use tts::{ElevenLabsClient, ElevenLabsClientConfig, FakeSpeechClient, FakeSpeechClientConfig};
