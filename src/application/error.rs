//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{AudioStorageError, BatchError, TtsError};
use crate::domain::speech::SpeechError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 暂时无法受理（如批量队列已满）
    #[error("Service busy: {0}")]
    Busy(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<AudioStorageError> for ApplicationError {
    fn from(err: AudioStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<BatchError> for ApplicationError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::NotFound(id) => Self::not_found("Batch", id),
            BatchError::QueueUnavailable(msg) => Self::Busy(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_error_maps_to_validation() {
        let err: ApplicationError = SpeechError::EmptyText.into();
        assert!(
            matches!(err, ApplicationError::ValidationError(ref m) if m == "Text is required")
        );
    }

    #[test]
    fn test_tts_error_keeps_message() {
        let err: ApplicationError =
            TtsError::ServiceError("unknown voice xx-XX-Nobody".to_string()).into();
        assert!(err.to_string().contains("xx-XX-Nobody"));
    }

    #[test]
    fn test_queue_unavailable_is_busy() {
        let err: ApplicationError = BatchError::QueueUnavailable("queue is full".to_string()).into();
        assert!(matches!(err, ApplicationError::Busy(ref m) if m == "queue is full"));
    }

    #[test]
    fn test_batch_not_found() {
        let err: ApplicationError = BatchError::NotFound("abc".to_string()).into();
        assert_eq!(err.to_string(), "Batch not found: abc");
    }
}
