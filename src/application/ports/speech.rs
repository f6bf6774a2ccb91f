//! Speech Synthesizer Port - 语音合成提供方抽象
//!
//! 每个对话片段对应一次合成调用；非 2xx 即整段失败，不做重试

use async_trait::async_trait;
use thiserror::Error;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SpeechError {
    /// 未配置凭证；视为功能不可用而非故障
    #[error("Speech credential not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {detail}")]
    ServiceError { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 单段合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色 ID
    pub voice_id: String,
}

/// 单段合成响应
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// 编码后的音频数据
    pub audio_data: Vec<u8>,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 凭证是否已配置
    fn is_configured(&self) -> bool;

    /// 合成一个片段
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError>;
}
