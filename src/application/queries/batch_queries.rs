//! Batch Queries

/// 查询批量任务进度
#[derive(Debug, Clone)]
pub struct GetBatchStatus {
    pub batch_id: String,
}
