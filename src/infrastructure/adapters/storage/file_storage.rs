//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait，所有音频平铺在输出目录下

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioStorageError, AudioStoragePort};

/// 公开访问的 URL 前缀，与 HTTP 静态目录挂载点一致
pub const OUTPUT_URL_PREFIX: &str = "/output";

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 输出目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储，目录不存在时自动创建
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取输出目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn audio_path(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", OUTPUT_URL_PREFIX, file_name)
    }

    async fn exists(&self, file_name: &str) -> bool {
        fs::try_exists(self.audio_path(file_name))
            .await
            .unwrap_or(false)
    }

    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, AudioStorageError> {
        let audio_path = self.audio_path(file_name);
        // 先写临时文件再 rename，半截文件不会被当成缓存命中
        let tmp_path = self
            .base_dir
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

        if let Err(e) = fs::write(&tmp_path, data).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(AudioStorageError::IoError(e.to_string()));
        }

        if let Err(e) = fs::rename(&tmp_path, &audio_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(AudioStorageError::IoError(e.to_string()));
        }

        tracing::debug!(
            "Saved audio: file={}, size={} bytes",
            file_name,
            data.len()
        );

        Ok(audio_path)
    }
}
