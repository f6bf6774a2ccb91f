//! Flowchart Service
//!
//! 把文档内容转写为 4-8 个节点的学习路线图（严格 JSON）

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerateTextRequest, GeneratorError, TextGeneratorPort};
use crate::domain::strip_code_fences;

/// 流程图生成采样温度
const FLOW_TEMPERATURE: f32 = 0.55;

/// 路线图节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowchartNode {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// 节点间依赖边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowchartEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// 路线图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flowchart {
    pub summary: String,
    #[serde(default)]
    pub nodes: Vec<FlowchartNode>,
    #[serde(default)]
    pub edges: Vec<FlowchartEdge>,
}

/// 流程图服务
pub struct FlowchartService {
    generator: Arc<dyn TextGeneratorPort>,
    model: String,
}

impl FlowchartService {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// 生成路线图
    pub async fn generate(
        &self,
        doc_content: &str,
        audience_focus: &str,
    ) -> Result<Flowchart, GeneratorError> {
        let request = GenerateTextRequest {
            prompt: build_flow_prompt(doc_content, audience_focus),
            model: self.model.clone(),
            temperature: FLOW_TEMPERATURE,
        };

        let raw = self.generator.generate(request).await?;
        let cleaned = strip_code_fences(&raw);

        let flowchart: Flowchart = serde_json::from_str(&cleaned).map_err(|e| {
            GeneratorError::InvalidResponse(format!("flowchart is not valid JSON: {}", e))
        })?;

        tracing::info!(
            audience = %audience_focus,
            nodes = flowchart.nodes.len(),
            edges = flowchart.edges.len(),
            "Flowchart generated"
        );

        Ok(flowchart)
    }
}

/// 构造路线图提示词
fn build_flow_prompt(content: &str, audience: &str) -> String {
    format!(
        r#"
You are Explainify Flow-Maker. Turn the following documentation content into a concise roadmap / flowchart.
Audience: {audience}
Documentation:
{content}

Rules:
- Return ONLY valid JSON with keys: summary (string), nodes (array), edges (array).
- nodes = [{{ "id": "string", "title": "string", "description": "string", "category": "optional string" }}]
- edges = [{{ "source": "nodeId", "target": "nodeId", "label": "optional string" }}]
- Create 4-8 nodes ordered from beginner concepts to advanced integrations.
- Edges should describe dependencies (from foundation to advanced).
- Avoid markdown, code fences, or commentary outside JSON.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeTextGenerator;

    #[tokio::test]
    async fn test_generate_parses_flowchart() {
        let reply = r#"{"summary":"s","nodes":[{"id":"a","title":"A","description":"d"}],"edges":[{"source":"a","target":"a"}]}"#;
        let generator = Arc::new(FakeTextGenerator::with_reply(reply));
        let service = FlowchartService::new(generator, "test-model");

        let flow = service.generate("docs", "Student").await.unwrap();
        assert_eq!(flow.summary, "s");
        assert_eq!(flow.nodes.len(), 1);
        assert!(flow.nodes[0].category.is_none());
        assert_eq!(flow.edges[0].source, "a");
    }

    #[tokio::test]
    async fn test_generate_rejects_commentary_reply() {
        let generator = Arc::new(FakeTextGenerator::with_reply("Here is your flowchart:"));
        let service = FlowchartService::new(generator, "test-model");

        let err = service.generate("docs", "Student").await.unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidResponse(_)));
    }
}
