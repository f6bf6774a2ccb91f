//! Explainify - 面向受众的 API 文档生成与旁白服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 对话解析、兜底脚本合成、内容规整（纯函数）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextGenerator, SpeechSynthesizer, AudioConcatenator）
//! - Services: 旁白编排、文档集 / 路线图 / 问答生成、mock 数据
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 静态文件服务
//! - Adapters: Gemini 客户端、ElevenLabs 客户端、拼接策略（ffmpeg / 字节追加）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
