//! Byte Copy Concatenator - 纯字节追加兜底策略
//!
//! 把各 chunk 的原始字节按顺序写入目标文件。对已编码音频帧来说
//! 这是近似拼接，并非所有播放器都能容忍，仅作为 ffmpeg 缺失时的
//! 降级路径。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::application::ports::{AudioConcatenatorPort, ConcatError};

/// 字节追加拼接器
#[derive(Debug, Default)]
pub struct ByteCopyConcatenator;

impl ByteCopyConcatenator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioConcatenatorPort for ByteCopyConcatenator {
    fn name(&self) -> &'static str {
        "byte-copy"
    }

    async fn concat(&self, chunks: &[PathBuf], output: &Path) -> Result<(), ConcatError> {
        if chunks.is_empty() {
            return Err(ConcatError::NoInput);
        }

        let mut file = tokio::fs::File::create(output)
            .await
            .map_err(|e| ConcatError::IoError(e.to_string()))?;

        for chunk in chunks {
            let data = tokio::fs::read(chunk)
                .await
                .map_err(|e| ConcatError::IoError(e.to_string()))?;
            file.write_all(&data)
                .await
                .map_err(|e| ConcatError::IoError(e.to_string()))?;
        }

        file.flush()
            .await
            .map_err(|e| ConcatError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_output_size_is_sum_of_chunks() {
        let dir = tempdir().unwrap();
        let mut chunks = Vec::new();
        let mut total = 0usize;

        for (index, data) in [b"aaa".as_slice(), b"bbbb", b"cc"].iter().enumerate() {
            let path = dir.path().join(format!("chunk-{}.mp3", index));
            std::fs::write(&path, data).unwrap();
            total += data.len();
            chunks.push(path);
        }

        let output = dir.path().join("output.mp3");
        ByteCopyConcatenator::new()
            .concat(&chunks, &output)
            .await
            .unwrap();

        let written = std::fs::read(&output).unwrap();
        assert_eq!(written.len(), total);
        assert_eq!(written, b"aaabbbbcc");
    }

    #[tokio::test]
    async fn test_order_is_preserved() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("z-first.mp3");
        let second = dir.path().join("a-second.mp3");
        std::fs::write(&first, b"1").unwrap();
        std::fs::write(&second, b"2").unwrap();

        let output = dir.path().join("output.mp3");
        ByteCopyConcatenator::new()
            .concat(&[first, second], &output)
            .await
            .unwrap();

        // 按传入顺序而非文件名顺序
        assert_eq!(std::fs::read(&output).unwrap(), b"12");
    }

    #[tokio::test]
    async fn test_missing_chunk_is_io_error() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.mp3");
        let err = ByteCopyConcatenator::new()
            .concat(&[dir.path().join("absent.mp3")], &output)
            .await
            .unwrap_err();
        assert!(matches!(err, ConcatError::IoError(_)));
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let dir = tempdir().unwrap();
        let err = ByteCopyConcatenator::new()
            .concat(&[], &dir.path().join("output.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConcatError::NoInput));
    }
}
