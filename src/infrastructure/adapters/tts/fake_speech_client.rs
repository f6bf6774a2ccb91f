//! Fake Speech Client - 用于测试的语音合成客户端
//!
//! 始终返回固定的音频字节，不实际调用外部服务；
//! 可按调用序号注入一次失败，并记录收到的请求

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{SpeechError, SpeechRequest, SpeechResponse, SpeechSynthesizerPort};

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 每次调用返回的音频字节
    pub audio_data: Vec<u8>,
    /// 第 N 次调用（从 0 计）返回失败
    pub fail_at: Option<usize>,
    /// is_configured 的返回值
    pub configured: bool,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"fake-audio".to_vec(),
            fail_at: None,
            configured: true,
        }
    }
}

/// Fake Speech Client
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
    /// 记录的合成请求
    calls: Mutex<Vec<SpeechRequest>>,
}

impl FakeSpeechClient {
    /// 创建新的 FakeSpeechClient
    pub fn new(config: FakeSpeechClientConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 已收到的合成请求（按调用顺序）
    pub fn calls(&self) -> Vec<SpeechRequest> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSpeechClient {
    fn is_configured(&self) -> bool {
        self.config.configured
    }

    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let index = {
            let mut calls = self.calls.lock().expect("calls lock");
            calls.push(request);
            calls.len() - 1
        };

        if self.config.fail_at == Some(index) {
            return Err(SpeechError::ServiceError {
                status: 500,
                detail: "scripted failure".to_string(),
            });
        }

        Ok(SpeechResponse {
            audio_data: self.config.audio_data.clone(),
        })
    }
}
