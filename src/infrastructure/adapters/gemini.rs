//! Gemini Client - 调用 generativelanguage HTTP 服务
//!
//! 实现 TextGeneratorPort trait
//!
//! 外部 API:
//! POST {base_url}/models/{model}:generateContent?key={api_key}
//! Request: {"contents": [{"role": "user", "parts": [{"text": "..."}]}], "generationConfig": {...}}
//! Response: {"candidates": [{"content": {"parts": [{"text": "..."}]}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::application::ports::{GenerateTextRequest, GeneratorError, TextGeneratorPort};

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API Key；None 表示功能不可用
    pub api_key: Option<String>,
    /// 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Gemini 客户端
pub struct GeminiClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: GeminiClientConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取生成 URL（含凭证，禁止出现在日志里）
    fn generate_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            model,
            api_key
        )
    }
}

/// 提供方响应；每一层都可能缺失，全部按可选处理
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// 拼接所有候选里的文本片段
fn collect_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[async_trait]
impl TextGeneratorPort for GeminiClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, request: GenerateTextRequest) -> Result<String, GeneratorError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GeneratorError::NotConfigured)?;

        let body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": request.prompt }],
                }
            ],
            "generationConfig": {
                "temperature": request.temperature,
            },
        });

        tracing::debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            "Sending generate request"
        );

        let response = self
            .client
            .post(self.generate_url(&request.model, api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout
                } else if e.is_connect() {
                    GeneratorError::NetworkError(format!("Cannot connect to generator service: {}", e))
                } else {
                    GeneratorError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GeneratorError::ServiceError {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(format!("Failed to parse reply: {}", e)))?;

        let text = collect_text(payload);

        tracing::info!(
            model = %request.model,
            reply_len = text.len(),
            "Generate request completed"
        );

        Ok(text)
    }
}
