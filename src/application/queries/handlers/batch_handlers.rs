//! Batch Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{BatchJob, BatchTrackerPort};
use crate::application::queries::GetBatchStatus;

/// GetBatchStatus Handler
pub struct GetBatchStatusHandler {
    batch_tracker: Arc<dyn BatchTrackerPort>,
}

impl GetBatchStatusHandler {
    pub fn new(batch_tracker: Arc<dyn BatchTrackerPort>) -> Self {
        Self { batch_tracker }
    }

    pub fn handle(&self, query: GetBatchStatus) -> Result<BatchJob, ApplicationError> {
        self.batch_tracker
            .get(&query.batch_id)
            .ok_or_else(|| ApplicationError::not_found("Batch", query.batch_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::Language;
    use crate::infrastructure::memory::InMemoryBatchTracker;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_get_batch_status() {
        let (tx, _rx) = mpsc::channel(1);
        let tracker = Arc::new(InMemoryBatchTracker::new(tx));
        let handler = GetBatchStatusHandler::new(tracker.clone());

        let job = BatchJob::new(Language::default(), None, 5, vec!["a".to_string()], vec![]);
        let batch_id = tracker.submit(job).await.unwrap();

        let found = handler
            .handle(GetBatchStatus {
                batch_id: batch_id.clone(),
            })
            .unwrap();
        assert_eq!(found.batch_id, batch_id);
        assert_eq!(found.total, 1);
    }

    #[test]
    fn test_unknown_batch_is_not_found() {
        let (tx, _rx) = mpsc::channel(1);
        let handler = GetBatchStatusHandler::new(Arc::new(InMemoryBatchTracker::new(tx)));

        let err = handler
            .handle(GetBatchStatus {
                batch_id: "missing".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
