//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 裸环境变量（GEMINI_API_KEY 等，与原部署保持一致）
//! 2. 前缀环境变量（EXPLAINIFY_）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `EXPLAINIFY_SERVER__PORT=8080`
/// - `EXPLAINIFY_GEMINI__DOC_MODEL=gemini-2.5-flash`
/// - `EXPLAINIFY_TTS__VOICE_ALEX=...`
///
/// 此外兼容原部署使用的裸变量（最高优先级）：
/// `GEMINI_API_KEY`、`ELEVENLABS_API_KEY`、
/// `ELEVENLABS_VOICE_ALEX`、`ELEVENLABS_VOICE_JAMIE`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5050)?
        .set_default("server.static_files.enabled", true)?
        .set_default("server.static_files.dir", "public")?
        .set_default(
            "gemini.base_url",
            "https://generativelanguage.googleapis.com/v1beta",
        )?
        .set_default("gemini.doc_model", "gemini-2.5-flash-lite")?
        .set_default("gemini.dialogue_model", "gemini-2.5-flash")?
        .set_default("gemini.timeout_secs", 120)?
        .set_default("tts.base_url", "https://api.elevenlabs.io/v1/text-to-speech")?
        .set_default("tts.model_id", "eleven_turbo_v2")?
        .set_default("tts.stability", 0.35)?
        .set_default("tts.similarity_boost", 0.4)?
        .set_default("tts.output_format", "mp3_44100_128")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("tts.voice_alex", "EXAVITQu4vr4xnSDxMaL")?
        .set_default("tts.voice_jamie", "pNInz6obpgDQGcFmaJgB")?
        .set_default("storage.audio_dir", "public/audio")?
        .set_default("storage.output_file", "output.mp3")?
        .set_default("storage.mock_file", "mock.mp3")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量
    // 前缀: EXPLAINIFY_，层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("EXPLAINIFY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 4. 裸环境变量覆盖（与原部署的变量名保持一致）
    apply_legacy_env(&mut app_config);

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 兼容原部署的裸环境变量
fn apply_legacy_env(config: &mut AppConfig) {
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.trim().is_empty() {
            config.gemini.api_key = Some(key);
        }
    }
    if let Ok(key) = std::env::var("ELEVENLABS_API_KEY") {
        if !key.trim().is_empty() {
            config.tts.api_key = Some(key);
        }
    }
    if let Ok(voice) = std::env::var("ELEVENLABS_VOICE_ALEX") {
        if !voice.trim().is_empty() {
            config.tts.voice_alex = voice;
        }
    }
    if let Ok(voice) = std::env::var("ELEVENLABS_VOICE_JAMIE") {
        if !voice.trim().is_empty() {
            config.tts.voice_jamie = voice;
        }
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.gemini.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    if config.storage.output_file.is_empty() {
        return Err(ConfigError::ValidationError(
            "Output file name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 凭证只打印是否配置，不打印内容
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!(
        "Static Files: enabled={} dir={:?}",
        config.server.static_files.enabled,
        config.server.static_files.dir
    );
    tracing::info!("Gemini Base URL: {}", config.gemini.base_url);
    tracing::info!(
        "Gemini Models: doc={} dialogue={}",
        config.gemini.doc_model,
        config.gemini.dialogue_model
    );
    tracing::info!(
        "Gemini API Key: {}",
        if config.gemini.api_key.is_some() { "configured" } else { "missing" }
    );
    tracing::info!("TTS Base URL: {}", config.tts.base_url);
    tracing::info!(
        "TTS Voices: alex={} jamie={}",
        config.tts.voice_alex,
        config.tts.voice_jamie
    );
    tracing::info!(
        "TTS API Key: {}",
        if config.tts.api_key.is_some() { "configured" } else { "missing" }
    );
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("Output Artifact: {:?}", config.storage.output_path());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_gemini_url() {
        let mut config = AppConfig::default();
        config.gemini.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_output_file() {
        let mut config = AppConfig::default();
        config.storage.output_file = String::new();
        assert!(validate_config(&config).is_err());
    }
}
