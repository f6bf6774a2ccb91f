//! Narration Service
//!
//! 旁白编排：选定脚本（AI 生成 → 文档推导 → 原始脚本）、解析对话、
//! 逐段合成语音、拼接产物。任何一步失败都退化为预置的 mock 音频，
//! 请求方始终拿到一个可播放的产物路径。

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{
    AudioConcatenatorPort, GenerateTextRequest, GeneratorError, SpeechError, SpeechRequest,
    SpeechSynthesizerPort, TextGeneratorPort,
};
use crate::domain::{normalize_doc_content, parse_dialogue, script_from_doc, DialogueSegment, Speaker};

/// 对话生成采样温度
const DIALOGUE_TEMPERATURE: f32 = 0.5;

/// 文档变体标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VariantKey {
    #[serde(rename = "version_1")]
    Version1,
    #[serde(rename = "version_2")]
    Version2,
    #[serde(rename = "version_3")]
    Version3,
}

/// 旁白请求
///
/// dialogue_script 与 variant_content 至少应有其一；
/// 空串视为缺失而非形状错误
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NarrationRequest {
    pub dialogue_script: Option<String>,
    pub variant_content: Option<String>,
    pub variant_label: Option<String>,
    pub variant_key: Option<VariantKey>,
}

/// 旁白结果
///
/// 无论成功与否都是一个合法响应；used_mock 区分真实产物与样例
#[derive(Debug, Clone)]
pub struct NarrationOutcome {
    pub audio_path: String,
    pub used_mock: bool,
    pub message: Option<String>,
}

/// 旁白服务配置
#[derive(Debug, Clone)]
pub struct NarrationConfig {
    /// chunk 与最终产物所在目录
    pub audio_dir: PathBuf,
    /// 最终产物路径；并发请求共享此路径，最后完成者生效（单租户假设）
    pub output_path: PathBuf,
    /// 预置 mock 音频路径
    pub mock_path: PathBuf,
    /// 响应中返回的公开 URL 路径
    pub public_audio_path: String,
    /// 两位主播的音色 ID
    pub voice_alex: String,
    pub voice_jamie: String,
    /// 对话生成使用的模型
    pub dialogue_model: String,
}

/// 管线内部错误；只在 narrate 内消化，不向外传播
#[derive(Debug, Error)]
enum PipelineError {
    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 旁白服务
pub struct NarrationService {
    generator: Arc<dyn TextGeneratorPort>,
    speech: Arc<dyn SpeechSynthesizerPort>,
    concatenator: Arc<dyn AudioConcatenatorPort>,
    config: NarrationConfig,
}

impl NarrationService {
    pub fn new(
        generator: Arc<dyn TextGeneratorPort>,
        speech: Arc<dyn SpeechSynthesizerPort>,
        concatenator: Arc<dyn AudioConcatenatorPort>,
        config: NarrationConfig,
    ) -> Self {
        Self {
            generator,
            speech,
            concatenator,
            config,
        }
    }

    /// 处理一次旁白请求
    ///
    /// 永不返回错误：所有失败路径都落在 mock 产物上
    pub async fn narrate(&self, request: NarrationRequest) -> NarrationOutcome {
        let variant_content = request
            .variant_content
            .as_deref()
            .and_then(normalize_doc_content);
        let dialogue_input = request
            .dialogue_script
            .as_deref()
            .and_then(normalize_doc_content);
        let label = request.variant_label.as_deref();

        tracing::debug!(
            variant = ?request.variant_key,
            has_content = variant_content.is_some(),
            has_script = dialogue_input.is_some(),
            "Narration request accepted"
        );

        let script = self
            .resolve_script(variant_content.as_deref(), dialogue_input, label)
            .await;
        let Some(script) = script else {
            return self
                .serve_mock("Narration missing - served sample audio instead.")
                .await;
        };

        let segments = parse_dialogue(&script);
        if segments.is_empty() {
            return self.serve_mock("No dialogue lines supplied.").await;
        }
        if !self.speech.is_configured() {
            return self
                .serve_mock("Missing ELEVENLABS_API_KEY. Mock audio returned.")
                .await;
        }

        // 每次请求独立的 chunk 前缀，避免并发请求互踩中间文件
        let request_id = Uuid::new_v4();
        let mut chunks = Vec::with_capacity(segments.len());

        if let Err(e) = self
            .synthesize_all(request_id, &segments, &mut chunks)
            .await
        {
            tracing::error!(error = %e, "Segment synthesis failed");
            self.cleanup_chunks(&chunks).await;
            return self
                .serve_mock("Returned mock audio after synthesis failure.")
                .await;
        }

        if let Err(e) = self.concatenator.concat(&chunks, &self.config.output_path).await {
            tracing::error!(
                error = %e,
                strategy = self.concatenator.name(),
                "Concatenation failed"
            );
            self.cleanup_chunks(&chunks).await;
            return self
                .serve_mock("Returned mock audio after synthesis failure.")
                .await;
        }

        self.cleanup_chunks(&chunks).await;

        tracing::info!(
            segments = segments.len(),
            output = ?self.config.output_path,
            "Narration rendered"
        );

        NarrationOutcome {
            audio_path: self.config.public_audio_path.clone(),
            used_mock: false,
            message: None,
        }
    }

    /// 请求体形状非法时的退化响应
    pub async fn invalid_payload(&self) -> NarrationOutcome {
        self.serve_mock("Invalid request payload. Served fallback audio.")
            .await
    }

    /// 方法不允许时的退化响应（不触碰产物文件）
    pub fn method_not_allowed(&self) -> NarrationOutcome {
        NarrationOutcome {
            audio_path: self.config.public_audio_path.clone(),
            used_mock: true,
            message: Some("Method not allowed".to_string()),
        }
    }

    /// 依次尝试：AI 生成对话 → 文档推导脚本 → 原始脚本
    async fn resolve_script(
        &self,
        variant_content: Option<&str>,
        dialogue_input: Option<String>,
        label: Option<&str>,
    ) -> Option<String> {
        if let Some(content) = variant_content {
            if let Some(script) = self.generate_dialogue(content, label).await {
                return Some(script);
            }
            if let Some(script) = script_from_doc(content, label) {
                return Some(script);
            }
        }
        dialogue_input
    }

    /// 尝试让提供方生成对话；不可用或失败时返回 None
    async fn generate_dialogue(&self, content: &str, label: Option<&str>) -> Option<String> {
        if !self.generator.is_configured() {
            tracing::debug!("Dialogue generation skipped: no generator credential");
            return None;
        }

        let request = GenerateTextRequest {
            prompt: build_dialogue_prompt(content, label),
            model: self.config.dialogue_model.clone(),
            temperature: DIALOGUE_TEMPERATURE,
        };

        match self.generator.generate(request).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Err(GeneratorError::NotConfigured) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Dialogue generation failed, deriving script from doc text");
                None
            }
        }
    }

    fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Alex => &self.config.voice_alex,
            Speaker::Jamie => &self.config.voice_jamie,
        }
    }

    /// 严格按序合成每个片段并落盘
    ///
    /// chunk 文件顺序必须等于播放顺序，因此不做并发
    async fn synthesize_all(
        &self,
        request_id: Uuid,
        segments: &[DialogueSegment],
        chunks: &mut Vec<PathBuf>,
    ) -> Result<(), PipelineError> {
        for (index, segment) in segments.iter().enumerate() {
            let response = self
                .speech
                .synthesize(SpeechRequest {
                    text: segment.text.clone(),
                    voice_id: self.voice_for(segment.speaker).to_string(),
                })
                .await?;

            let chunk_path = self
                .config
                .audio_dir
                .join(format!("chunk-{}-{}.mp3", request_id, index));
            tokio::fs::write(&chunk_path, &response.audio_data).await?;
            chunks.push(chunk_path);

            tracing::debug!(
                index,
                speaker = %segment.speaker,
                bytes = response.audio_data.len(),
                "Segment synthesized"
            );
        }
        Ok(())
    }

    /// 删除本次请求的 chunk 文件（尽力而为）
    async fn cleanup_chunks(&self, chunks: &[PathBuf]) {
        for chunk in chunks {
            if let Err(e) = tokio::fs::remove_file(chunk).await {
                tracing::debug!(chunk = ?chunk, error = %e, "Failed to remove chunk file");
            }
        }
    }

    /// 把 mock 音频复制到产物路径并返回退化响应
    async fn serve_mock(&self, message: &str) -> NarrationOutcome {
        if let Err(e) = tokio::fs::copy(&self.config.mock_path, &self.config.output_path).await {
            tracing::warn!(
                error = %e,
                mock = ?self.config.mock_path,
                "Failed to copy mock artifact"
            );
        }

        NarrationOutcome {
            audio_path: self.config.public_audio_path.clone(),
            used_mock: true,
            message: Some(message.to_string()),
        }
    }
}

/// 构造对话生成提示词
fn build_dialogue_prompt(content: &str, label: Option<&str>) -> String {
    format!(
        r#"
You are Explainify, an AI host that turns documentation into an approachable podcast.
Using the following documentation targeted for {label}:
{content}

Produce a short back-and-forth between Alex (curious learner) and Jamie (knowledgeable guide).
Keep it under 12 lines, alternate speakers, and return plain text in the format:
Alex: ...
Jamie: ...
"#,
        label = label.unwrap_or("this audience"),
    )
}
