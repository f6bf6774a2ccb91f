//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod concatenator;
mod speech;
mod text_generator;

pub use concatenator::{AudioConcatenatorPort, ConcatError};
pub use speech::{SpeechError, SpeechRequest, SpeechResponse, SpeechSynthesizerPort};
pub use text_generator::{GenerateTextRequest, GeneratorError, TextGeneratorPort};
