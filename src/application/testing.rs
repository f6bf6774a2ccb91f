//! 测试用的端口假实现

use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{GenerateTextRequest, GeneratorError, TextGeneratorPort};

enum Behavior {
    Reply(String),
    NotConfigured,
    Fail(u16),
}

/// 脚本化的文本生成器
///
/// 记录收到的提示词，按配置返回固定回复或失败
pub(crate) struct FakeTextGenerator {
    behavior: Behavior,
    prompts: Mutex<Vec<String>>,
}

impl FakeTextGenerator {
    pub(crate) fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Reply(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn not_configured() -> Self {
        Self {
            behavior: Behavior::NotConfigured,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self {
            behavior: Behavior::Fail(status),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl TextGeneratorPort for FakeTextGenerator {
    fn is_configured(&self) -> bool {
        !matches!(self.behavior, Behavior::NotConfigured)
    }

    async fn generate(&self, request: GenerateTextRequest) -> Result<String, GeneratorError> {
        match &self.behavior {
            Behavior::NotConfigured => Err(GeneratorError::NotConfigured),
            Behavior::Fail(status) => Err(GeneratorError::ServiceError {
                status: *status,
                detail: "scripted failure".to_string(),
            }),
            Behavior::Reply(reply) => {
                self.prompts.lock().expect("prompts lock").push(request.prompt);
                Ok(reply.clone())
            }
        }
    }
}
