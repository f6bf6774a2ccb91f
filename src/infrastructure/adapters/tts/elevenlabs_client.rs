//! ElevenLabs Client - 调用外部语音合成 HTTP 服务
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! POST {base_url}/{voice_id}
//! Headers: xi-api-key
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}, "output_format": "..."}
//! Response: 编码后的音频字节

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechError, SpeechRequest, SpeechResponse, SpeechSynthesizerPort};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesisHttpRequest {
    text: String,
    model_id: String,
    voice_settings: VoiceSettings,
    output_format: String,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API Key；None 表示功能不可用
    pub api_key: Option<String>,
    /// text-to-speech 服务基础 URL
    pub base_url: String,
    /// 合成模型
    pub model_id: String,
    /// 声音稳定度
    pub stability: f32,
    /// 相似度增益
    pub similarity_boost: f32,
    /// 输出编码
    pub output_format: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.elevenlabs.io/v1/text-to-speech".to_string(),
            model_id: "eleven_turbo_v2".to_string(),
            stability: 0.35,
            similarity_boost: 0.4,
            output_format: "mp3_44100_128".to_string(),
            timeout_secs: 120,
        }
    }
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建新的 ElevenLabs 客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn synthesize_url(&self, voice_id: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            voice_id
        )
    }
}

#[async_trait]
impl SpeechSynthesizerPort for ElevenLabsClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SpeechError::NotConfigured)?;

        let http_request = SynthesisHttpRequest {
            text: request.text,
            model_id: self.config.model_id.clone(),
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
            output_format: self.config.output_format.clone(),
        };

        tracing::debug!(
            url = %self.synthesize_url(&request.voice_id),
            text_len = http_request.text.len(),
            voice_id = %request.voice_id,
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(self.synthesize_url(&request.voice_id))
            .header("xi-api-key", api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to speech service: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError {
                status: status.as_u16(),
                detail,
            });
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            voice_id = %request.voice_id,
            audio_size = audio_data.len(),
            "Synthesis completed"
        );

        Ok(SpeechResponse { audio_data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://api.elevenlabs.io/v1/text-to-speech");
        assert_eq!(config.model_id, "eleven_turbo_v2");
        assert_eq!(config.output_format, "mp3_44100_128");
    }

    #[test]
    fn test_synthesize_url() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig {
            base_url: "http://example.com/tts/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.synthesize_url("abc"), "http://example.com/tts/abc");
    }

    #[tokio::test]
    async fn test_synthesize_without_key_is_not_configured() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::default()).unwrap();
        assert!(!client.is_configured());

        let err = client
            .synthesize(SpeechRequest {
                text: "hello".to_string(),
                voice_id: "abc".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::NotConfigured));
    }
}
