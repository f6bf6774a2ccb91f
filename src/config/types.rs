//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文本生成提供方配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 语音合成提供方配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
///
/// 音频产物通过这里对外可达（/audio/...）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 文本生成提供方配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API Key；缺省表示生成功能不可用（走 mock）
    #[serde(default)]
    pub api_key: Option<String>,

    /// generativelanguage 服务基础 URL
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// 文档 / 流程图 / 问答使用的模型
    #[serde(default = "default_doc_model")]
    pub doc_model: String,

    /// 对话脚本使用的模型
    #[serde(default = "default_dialogue_model")]
    pub dialogue_model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_doc_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_dialogue_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_provider_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            doc_model: default_doc_model(),
            dialogue_model: default_dialogue_model(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

/// 语音合成提供方配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// API Key；缺省表示语音合成不可用（走 mock）
    #[serde(default)]
    pub api_key: Option<String>,

    /// text-to-speech 服务基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// 合成模型
    #[serde(default = "default_tts_model")]
    pub model_id: String,

    /// 声音稳定度
    #[serde(default = "default_stability")]
    pub stability: f32,

    /// 相似度增益
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// 输出编码
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    /// Alex 的音色 ID
    #[serde(default = "default_voice_alex")]
    pub voice_alex: String,

    /// Jamie 的音色 ID
    #[serde(default = "default_voice_jamie")]
    pub voice_jamie: String,
}

fn default_tts_base_url() -> String {
    "https://api.elevenlabs.io/v1/text-to-speech".to_string()
}

fn default_tts_model() -> String {
    "eleven_turbo_v2".to_string()
}

fn default_stability() -> f32 {
    0.35
}

fn default_similarity_boost() -> f32 {
    0.4
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}

fn default_voice_alex() -> String {
    "EXAVITQu4vr4xnSDxMaL".to_string()
}

fn default_voice_jamie() -> String {
    "pNInz6obpgDQGcFmaJgB".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tts_base_url(),
            model_id: default_tts_model(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            output_format: default_output_format(),
            timeout_secs: default_provider_timeout(),
            voice_alex: default_voice_alex(),
            voice_jamie: default_voice_jamie(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频产物目录（位于静态目录之下）
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// 最终产物文件名（每次请求覆盖写入）
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// 预置的 mock 音频文件名
    #[serde(default = "default_mock_file")]
    pub mock_file: String,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("public/audio")
}

fn default_output_file() -> String {
    "output.mp3".to_string()
}

fn default_mock_file() -> String {
    "mock.mp3".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            output_file: default_output_file(),
            mock_file: default_mock_file(),
        }
    }
}

impl StorageConfig {
    /// 最终产物的落盘路径
    pub fn output_path(&self) -> PathBuf {
        self.audio_dir.join(&self.output_file)
    }

    /// mock 音频的落盘路径
    pub fn mock_path(&self) -> PathBuf {
        self.audio_dir.join(&self.mock_file)
    }

    /// 最终产物的公开 URL 路径
    pub fn public_audio_path(&self) -> String {
        format!("/audio/{}", self.output_file)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5050);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.doc_model, "gemini-2.5-flash-lite");
        assert_eq!(config.tts.voice_alex, "EXAVITQu4vr4xnSDxMaL");
        assert_eq!(config.storage.audio_dir, PathBuf::from("public/audio"));
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5050");
    }

    #[test]
    fn test_public_base_url_rewrites_wildcard_host() {
        let config = ServerConfig::default();
        assert_eq!(config.public_base_url(), "http://localhost:5050");
    }

    #[test]
    fn test_storage_paths() {
        let config = StorageConfig::default();
        assert_eq!(config.output_path(), PathBuf::from("public/audio/output.mp3"));
        assert_eq!(config.mock_path(), PathBuf::from("public/audio/mock.mp3"));
        assert_eq!(config.public_audio_path(), "/audio/output.mp3");
    }
}
