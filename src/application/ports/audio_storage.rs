//! Audio Storage Port - 出站端口
//!
//! 定义生成音频文件的存储抽象（按文件名缓存）

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Storage Port - 出站端口
///
/// 文件名由 `domain::speech::audio_file_name` 生成，同名即视为缓存命中
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 获取音频文件的本地路径
    fn audio_path(&self, file_name: &str) -> PathBuf;

    /// 获取音频文件的公开访问 URL（相对路径）
    fn public_url(&self, file_name: &str) -> String;

    /// 检查音频是否已存在
    async fn exists(&self, file_name: &str) -> bool;

    /// 保存音频数据，已存在则覆盖
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, AudioStorageError>;
}
