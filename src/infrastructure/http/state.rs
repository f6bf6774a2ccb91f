//! Application State
//!
//! 把端口注入各个应用服务

use std::sync::Arc;

use crate::application::{
    AnswerService, AudioConcatenatorPort, DocGenerationService, FlowchartService, NarrationConfig,
    NarrationService, SpeechSynthesizerPort, TextGeneratorPort,
};
use crate::config::AppConfig;

/// 应用状态
pub struct AppState {
    pub narration: NarrationService,
    pub docs: DocGenerationService,
    pub flowchart: FlowchartService,
    pub answers: AnswerService,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        config: &AppConfig,
        generator: Arc<dyn TextGeneratorPort>,
        speech: Arc<dyn SpeechSynthesizerPort>,
        concatenator: Arc<dyn AudioConcatenatorPort>,
    ) -> Self {
        let narration_config = NarrationConfig {
            audio_dir: config.storage.audio_dir.clone(),
            output_path: config.storage.output_path(),
            mock_path: config.storage.mock_path(),
            public_audio_path: config.storage.public_audio_path(),
            voice_alex: config.tts.voice_alex.clone(),
            voice_jamie: config.tts.voice_jamie.clone(),
            dialogue_model: config.gemini.dialogue_model.clone(),
        };

        Self {
            narration: NarrationService::new(
                generator.clone(),
                speech,
                concatenator,
                narration_config,
            ),
            docs: DocGenerationService::new(generator.clone(), config.gemini.doc_model.clone()),
            flowchart: FlowchartService::new(generator.clone(), config.gemini.doc_model.clone()),
            answers: AnswerService::new(generator, config.gemini.doc_model.clone()),
        }
    }
}
