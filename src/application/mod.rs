//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextGenerator、SpeechSynthesizer、AudioConcatenator）
//! - narration: 旁白管线编排
//! - docs / flowchart / answers: 生成式用例
//! - mock_data: 提供方不可用时的样例载荷

pub mod answers;
pub mod docs;
pub mod flowchart;
pub mod mock_data;
pub mod narration;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use answers::{Answer, AnswerService};
pub use docs::{DocGenerationService, DocSet};
pub use flowchart::{Flowchart, FlowchartEdge, FlowchartNode, FlowchartService};
pub use narration::{
    NarrationConfig, NarrationOutcome, NarrationRequest, NarrationService, VariantKey,
};
pub use ports::{
    AudioConcatenatorPort, ConcatError, GenerateTextRequest, GeneratorError, SpeechError,
    SpeechRequest, SpeechResponse, SpeechSynthesizerPort, TextGeneratorPort,
};
