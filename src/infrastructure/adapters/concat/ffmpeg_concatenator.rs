//! Ffmpeg Concatenator - 外部媒体工具拼接策略
//!
//! 写出 chunk 清单文件，以 stream copy 模式调用 ffmpeg 拼接，
//! 不重新编码。清单放在每次调用独立的临时目录，用后即删。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use uuid::Uuid;

use crate::application::ports::{AudioConcatenatorPort, ConcatError};

/// Ffmpeg 拼接配置
#[derive(Debug, Clone)]
pub struct FfmpegConcatenatorConfig {
    /// ffmpeg 可执行文件
    pub ffmpeg_bin: String,
}

impl Default for FfmpegConcatenatorConfig {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
        }
    }
}

/// Ffmpeg 拼接器
pub struct FfmpegConcatenator {
    config: FfmpegConcatenatorConfig,
}

impl FfmpegConcatenator {
    pub fn new(config: FfmpegConcatenatorConfig) -> Self {
        Self { config }
    }

    async fn run(&self, chunks: &[PathBuf], scratch: &Path, output: &Path) -> Result<(), ConcatError> {
        let manifest = scratch.join("inputs.txt");
        tokio::fs::write(&manifest, manifest_listing(chunks))
            .await
            .map_err(|e| ConcatError::IoError(e.to_string()))?;

        let result = Command::new(&self.config.ffmpeg_bin)
            .arg("-y")
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .arg("-i")
            .arg(&manifest)
            .arg("-c")
            .arg("copy")
            .arg(output)
            .output()
            .await
            .map_err(|e| ConcatError::IoError(e.to_string()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ConcatError::CommandFailed(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// 生成 concat demuxer 清单内容
fn manifest_listing(chunks: &[PathBuf]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("file '{}'", chunk.to_string_lossy().replace('\\', "/")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl AudioConcatenatorPort for FfmpegConcatenator {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    async fn concat(&self, chunks: &[PathBuf], output: &Path) -> Result<(), ConcatError> {
        if chunks.is_empty() {
            return Err(ConcatError::NoInput);
        }

        let scratch = std::env::temp_dir().join(format!("explainify-audio-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&scratch)
            .await
            .map_err(|e| ConcatError::IoError(e.to_string()))?;

        let result = self.run(chunks, &scratch, output).await;

        // 清单目录用后即删，失败也要删
        if let Err(e) = tokio::fs::remove_dir_all(&scratch).await {
            tracing::debug!(scratch = ?scratch, error = %e, "Failed to remove scratch dir");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_listing() {
        let chunks = vec![
            PathBuf::from("/tmp/chunk-0.mp3"),
            PathBuf::from("/tmp/chunk-1.mp3"),
        ];
        assert_eq!(
            manifest_listing(&chunks),
            "file '/tmp/chunk-0.mp3'\nfile '/tmp/chunk-1.mp3'"
        );
    }

    #[test]
    fn test_manifest_listing_normalizes_backslashes() {
        let chunks = vec![PathBuf::from(r"C:\tmp\chunk-0.mp3")];
        assert_eq!(manifest_listing(&chunks), "file 'C:/tmp/chunk-0.mp3'");
    }

    #[tokio::test]
    async fn test_concat_rejects_empty_input() {
        let concatenator = FfmpegConcatenator::new(FfmpegConcatenatorConfig::default());
        let err = concatenator
            .concat(&[], Path::new("/tmp/out.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConcatError::NoInput));
    }
}
