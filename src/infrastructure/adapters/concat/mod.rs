//! Concat Adapter - 拼接策略与能力探测
//!
//! 启动时探测一次 ffmpeg 是否可用，选定策略后进程内不再切换。
//! 探测失败不是错误：按规约降级到字节追加策略。

use std::sync::Arc;

use tokio::process::Command;

use crate::application::ports::AudioConcatenatorPort;

mod byte_copy_concatenator;
mod ffmpeg_concatenator;

pub use byte_copy_concatenator::ByteCopyConcatenator;
pub use ffmpeg_concatenator::{FfmpegConcatenator, FfmpegConcatenatorConfig};

/// 默认的 ffmpeg 可执行文件名
pub const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";

/// 探测 ffmpeg 是否可用
pub async fn probe_ffmpeg(ffmpeg_bin: &str) -> bool {
    match Command::new(ffmpeg_bin).arg("-version").output().await {
        Ok(output) => output.status.success(),
        Err(e) => {
            tracing::debug!(bin = %ffmpeg_bin, error = %e, "ffmpeg probe failed");
            false
        }
    }
}

/// 根据能力探测结果选定拼接策略
pub async fn select_concatenator(ffmpeg_bin: &str) -> Arc<dyn AudioConcatenatorPort> {
    if probe_ffmpeg(ffmpeg_bin).await {
        tracing::info!(bin = %ffmpeg_bin, "ffmpeg available, using stream-copy concatenation");
        Arc::new(FfmpegConcatenator::new(FfmpegConcatenatorConfig {
            ffmpeg_bin: ffmpeg_bin.to_string(),
        }))
    } else {
        tracing::warn!(
            bin = %ffmpeg_bin,
            "ffmpeg not found, falling back to byte-copy concatenation"
        );
        Arc::new(ByteCopyConcatenator::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_probe_missing_binary() {
        assert!(!probe_ffmpeg("definitely-not-a-real-ffmpeg-binary").await);
    }

    #[tokio::test]
    async fn test_missing_tool_selects_byte_copy() {
        let concatenator = select_concatenator("definitely-not-a-real-ffmpeg-binary").await;
        assert_eq!(concatenator.name(), "byte-copy");
    }

    #[tokio::test]
    async fn test_byte_copy_fallback_concats_sizes() {
        // 工具缺失时：选中兜底策略，产物大小等于各 chunk 之和
        let concatenator = select_concatenator("definitely-not-a-real-ffmpeg-binary").await;

        let dir = tempdir().unwrap();
        let mut chunks = Vec::new();
        for (index, data) in [b"12345".as_slice(), b"678"].iter().enumerate() {
            let path = dir.path().join(format!("chunk-{}.mp3", index));
            std::fs::write(&path, data).unwrap();
            chunks.push(path);
        }

        let output = dir.path().join("output.mp3");
        concatenator.concat(&chunks, &output).await.unwrap();
        assert_eq!(std::fs::metadata(&output).unwrap().len(), 8);
    }
}
