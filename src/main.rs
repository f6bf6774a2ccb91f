//! Explainify - 面向受众的 API 文档生成与旁白服务
//!
//! 启动流程：
//! - 加载配置（环境变量 > 配置文件 > 默认值）
//! - 准备音频目录，检查 mock 产物
//! - 组装 Gemini / ElevenLabs 适配器，探测 ffmpeg 选定拼接策略
//! - 启动 HTTP 服务器（带优雅关闭）

use std::sync::Arc;

use explainify::config::{load_config, print_config};
use explainify::infrastructure::adapters::{
    select_concatenator, ElevenLabsClient, ElevenLabsClientConfig, GeminiClient,
    GeminiClientConfig, DEFAULT_FFMPEG_BIN,
};
use explainify::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},explainify={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Explainify - documentation narration service");
    print_config(&config);

    // 确保音频目录存在
    tokio::fs::create_dir_all(&config.storage.audio_dir).await?;

    // mock 产物缺失时所有退化路径都拿不到可播放文件，启动时就提醒
    if !config.storage.mock_path().exists() {
        tracing::warn!(
            mock = ?config.storage.mock_path(),
            "Mock audio artifact missing; degraded responses will have no playable file"
        );
    }

    // 创建文本生成客户端
    let generator = Arc::new(GeminiClient::new(GeminiClientConfig {
        api_key: config.gemini.api_key.clone(),
        base_url: config.gemini.base_url.clone(),
        timeout_secs: config.gemini.timeout_secs,
    })?);

    // 创建语音合成客户端
    let speech = Arc::new(ElevenLabsClient::new(ElevenLabsClientConfig {
        api_key: config.tts.api_key.clone(),
        base_url: config.tts.base_url.clone(),
        model_id: config.tts.model_id.clone(),
        stability: config.tts.stability,
        similarity_boost: config.tts.similarity_boost,
        output_format: config.tts.output_format.clone(),
        timeout_secs: config.tts.timeout_secs,
    })?);

    // 探测 ffmpeg，选定拼接策略
    let concatenator = select_concatenator(DEFAULT_FFMPEG_BIN).await;

    // 创建 HTTP 服务器
    let state = AppState::new(&config, generator, speech, concatenator);

    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(&config.server.static_files.dir);
    }

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
