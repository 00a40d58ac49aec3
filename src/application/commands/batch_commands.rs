//! Batch Commands - 批量生成命令

use crate::application::ports::BatchItemResult;

/// 批量生成命令
#[derive(Debug, Clone, Default)]
pub struct BatchGenerateCommand {
    pub texts: Vec<String>,
    pub language: Option<String>,
    pub voice: Option<String>,
    /// 每批并发处理的文本数，缺省使用配置值
    pub batch_size: Option<usize>,
}

/// 批量生成响应
///
/// 只包含提交时即可确定的结果（缓存命中项），其余文本由后台 worker 生成
#[derive(Debug, Clone)]
pub struct BatchGenerateResponse {
    /// 无待生成文本时为 None
    pub batch_id: Option<String>,
    pub completed: usize,
    pub total: usize,
    pub results: Vec<BatchItemResult>,
    pub pending: usize,
    pub message: String,
}
