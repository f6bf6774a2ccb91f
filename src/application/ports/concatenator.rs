//! Audio Concatenator Port - 音频拼接策略抽象
//!
//! 两种实现：外部媒体工具（ffmpeg stream copy）与纯字节追加兜底。
//! 启动时通过能力探测选定其一，进程生命周期内不再切换。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 拼接错误
#[derive(Debug, Error)]
pub enum ConcatError {
    #[error("No input chunks")]
    NoInput,

    #[error("Concat command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Concatenator Port
#[async_trait]
pub trait AudioConcatenatorPort: Send + Sync {
    /// 策略名（用于日志与探测断言）
    fn name(&self) -> &'static str;

    /// 按顺序把 chunks 拼接到 output
    async fn concat(&self, chunks: &[PathBuf], output: &Path) -> Result<(), ConcatError>;
}
