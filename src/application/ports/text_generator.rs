//! Text Generator Port - 生成式文本提供方抽象
//!
//! 定义对外部 LLM 服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// 未配置凭证；视为功能不可用而非故障
    #[error("Generator credential not configured")]
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

impl GeneratorError {
    /// 上游是否在限流
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GeneratorError::ServiceError { status: 429, .. })
    }
}

/// 文本生成请求
#[derive(Debug, Clone)]
pub struct GenerateTextRequest {
    /// 完整提示词
    pub prompt: String,
    /// 使用的模型
    pub model: String,
    /// 采样温度
    pub temperature: f32,
}

/// Text Generator Port
///
/// 外部生成式文本服务的抽象接口。返回值是提供方回复中
/// 所有文本片段拼接后的纯文本，可能为空串。
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 凭证是否已配置
    fn is_configured(&self) -> bool;

    /// 执行一次文本生成
    async fn generate(&self, request: GenerateTextRequest) -> Result<String, GeneratorError>;
}
