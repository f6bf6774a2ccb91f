//! Answer Service
//!
//! 针对已生成文档的自由问答。回复按固定标题切分出答案和后续问题；
//! 缺失的部分用样例内容补齐（整体仍视为真实回复）。

use std::sync::Arc;

use crate::application::mock_data;
use crate::application::ports::{GenerateTextRequest, GeneratorError, TextGeneratorPort};

/// 问答采样温度
const ANSWER_TEMPERATURE: f32 = 0.5;

/// 回复中的后续问题标题（按字面匹配）
const FOLLOW_UP_HEADING: &str = "Next questions to explore";

/// 最多保留的后续问题数
const MAX_FOLLOW_UPS: usize = 3;

/// 问答结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    pub follow_ups: Vec<String>,
}

/// 问答服务
pub struct AnswerService {
    generator: Arc<dyn TextGeneratorPort>,
    model: String,
}

impl AnswerService {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// 回答一个问题
    pub async fn answer(
        &self,
        question: &str,
        context: Option<&str>,
        persona: Option<&str>,
    ) -> Result<Answer, GeneratorError> {
        let request = GenerateTextRequest {
            prompt: build_answer_prompt(question, context, persona),
            model: self.model.clone(),
            temperature: ANSWER_TEMPERATURE,
        };

        let raw = self.generator.generate(request).await?;
        let (answer, follow_ups) = section_reply(&raw);

        let fallback = mock_data::mock_answer();
        Ok(Answer {
            answer: answer.unwrap_or(fallback.answer),
            follow_ups: follow_ups.unwrap_or(fallback.follow_ups),
        })
    }
}

/// 构造问答提示词
fn build_answer_prompt(question: &str, context: Option<&str>, persona: Option<&str>) -> String {
    format!(
        r#"
You are Explainify Answers, a concise technical assistant.
Persona: {persona}

Context (optional):
{context}

Question:
{question}

Respond with:
- A helpful answer (2-3 paragraphs max).
- A short list titled "{FOLLOW_UP_HEADING}" with up to 3 bullet points.
"#,
        persona = persona.unwrap_or("General API consumer"),
        context = context.unwrap_or("N/A"),
    )
}

/// 按标题切分回复
///
/// 返回 (答案, 后续问题)；答案为空或标题缺失时对应位置为 None
fn section_reply(text: &str) -> (Option<String>, Option<Vec<String>>) {
    let (answer_part, follow_up_part) = match text.split_once(FOLLOW_UP_HEADING) {
        Some((head, tail)) => (head, Some(tail)),
        None => (text, None),
    };

    let answer = answer_part.trim();
    let answer = if answer.is_empty() {
        None
    } else {
        Some(answer.to_string())
    };

    let follow_ups = follow_up_part.map(|tail| {
        tail.split(['\n', '-'])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .take(MAX_FOLLOW_UPS)
            .map(str::to_string)
            .collect()
    });

    (answer, follow_ups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeTextGenerator;

    #[test]
    fn test_section_reply_splits_on_heading() {
        let reply = "The answer body.\n\nNext questions to explore\n- one\n- two\n- three\n- four";
        let (answer, follow_ups) = section_reply(reply);
        assert_eq!(answer.as_deref(), Some("The answer body."));
        assert_eq!(follow_ups.unwrap(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_section_reply_without_heading() {
        let (answer, follow_ups) = section_reply("just an answer");
        assert_eq!(answer.as_deref(), Some("just an answer"));
        assert!(follow_ups.is_none());
    }

    #[test]
    fn test_section_reply_empty_text() {
        let (answer, follow_ups) = section_reply("   ");
        assert!(answer.is_none());
        assert!(follow_ups.is_none());
    }

    #[tokio::test]
    async fn test_answer_fills_missing_sections_from_samples() {
        let generator = Arc::new(FakeTextGenerator::with_reply("short answer"));
        let service = AnswerService::new(generator, "test-model");

        let answer = service.answer("What is this?", None, None).await.unwrap();
        assert_eq!(answer.answer, "short answer");
        assert_eq!(answer.follow_ups, mock_data::mock_answer().follow_ups);
    }

    #[tokio::test]
    async fn test_answer_prompt_includes_persona_and_context() {
        let reply = "a\nNext questions to explore\n- b";
        let generator = Arc::new(FakeTextGenerator::with_reply(reply));
        let service = AnswerService::new(generator.clone(), "test-model");

        service
            .answer("How?", Some("docs body"), Some("Security Researcher"))
            .await
            .unwrap();

        let prompts = generator.prompts();
        assert!(prompts[0].contains("Security Researcher"));
        assert!(prompts[0].contains("docs body"));
    }
}
