//! Doc Generation Service
//!
//! 把 API 规范 + 受众描述转写为三份文档变体和一段对话脚本。
//! 提供方被要求只返回 JSON；回复先剥围栏再解析。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::ports::{GenerateTextRequest, GeneratorError, TextGeneratorPort};
use crate::domain::strip_code_fences;

/// 文档生成采样温度
const DOC_TEMPERATURE: f32 = 0.6;

/// 一次生成的四份产出
///
/// 提供方回复不可信，字段保持原始 JSON 值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocSet {
    pub version_1: Value,
    pub version_2: Value,
    pub version_3: Value,
    pub dialogue_script: Value,
}

/// 文档生成服务
pub struct DocGenerationService {
    generator: Arc<dyn TextGeneratorPort>,
    model: String,
}

impl DocGenerationService {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// 生成文档集
    pub async fn generate(
        &self,
        api_data: &Map<String, Value>,
        audience_focus: &str,
    ) -> Result<DocSet, GeneratorError> {
        let request = GenerateTextRequest {
            prompt: build_docs_prompt(api_data, audience_focus),
            model: self.model.clone(),
            temperature: DOC_TEMPERATURE,
        };

        let raw = self.generator.generate(request).await?;
        let cleaned = strip_code_fences(&raw);

        let doc_set: DocSet = serde_json::from_str(&cleaned).map_err(|e| {
            GeneratorError::InvalidResponse(format!("doc set is not valid JSON: {}", e))
        })?;

        tracing::info!(
            audience = %audience_focus,
            reply_len = cleaned.len(),
            "Doc set generated"
        );

        Ok(doc_set)
    }
}

/// 构造受众改写提示词
fn build_docs_prompt(api_data: &Map<String, Value>, audience_focus: &str) -> String {
    let api_json = serde_json::to_string_pretty(api_data).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"
You are Explainify, an AI that rewrites API specifications for different audiences.
Given the following API data:
{api_json}

And the target audience: {audience_focus}

Write content according to the audience's level:
- Student -> clarity and simplicity
- Developer -> technical depth and practical examples
- Security researcher -> vulnerabilities, threat modeling, mitigations
- Developer advocate -> best practices, integration tips, real-world usage
- Expert -> advanced concepts and nuanced insights

Generate **exactly 4 clean text outputs**:

1. version_1 -> Beginner-friendly documentation
2. version_2 -> Advanced-level documentation
3. version_3 -> Expert-specific documentation
4. dialogue_script -> A short podcast-style conversation between Monika (learner) and Vikram (expert) explaining the API in a simple, conversational tone

Return ONLY a JSON object in this format:

{{
  "version_1": "<clean text only>",
  "version_2": "<clean text only>",
  "version_3": "<clean text only>",
  "dialogue_script": "<clean text only>"
}}

Important rules:
- Do NOT include titles, metadata, headings, JSON schemas, or descriptions outside of the text fields.
- Each field must contain **clean readable documentation text only**.
- No extra keys or wrapper objects.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeTextGenerator;

    fn api_data() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("info".to_string(), serde_json::json!({"title": "Tasks API"}));
        map
    }

    #[tokio::test]
    async fn test_generate_parses_fenced_json() {
        let reply = "```json\n{\"version_1\":\"a\",\"version_2\":\"b\",\"version_3\":\"c\",\"dialogue_script\":\"d\"}\n```";
        let generator = Arc::new(FakeTextGenerator::with_reply(reply));
        let service = DocGenerationService::new(generator.clone(), "test-model");

        let doc_set = service.generate(&api_data(), "Student").await.unwrap();
        assert_eq!(doc_set.version_1, Value::String("a".to_string()));
        assert_eq!(doc_set.dialogue_script, Value::String("d".to_string()));

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Tasks API"));
        assert!(prompts[0].contains("Student"));
    }

    #[tokio::test]
    async fn test_generate_rejects_non_json_reply() {
        let generator = Arc::new(FakeTextGenerator::with_reply("sorry, no JSON today"));
        let service = DocGenerationService::new(generator, "test-model");

        let err = service.generate(&api_data(), "Student").await.unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_propagates_missing_credential() {
        let generator = Arc::new(FakeTextGenerator::not_configured());
        let service = DocGenerationService::new(generator, "test-model");

        let err = service.generate(&api_data(), "Student").await.unwrap_err();
        assert!(matches!(err, GeneratorError::NotConfigured));
    }
}
