use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::{sync::Semaphore, task::spawn_blocking, time::timeout};
use tracing::warn;

use domain::encoded_image::EncodedImage;
use retouch_application::{
    error::AppResult,
    ports::outgoing::timeout::{CodecJob, ProcessingTimeoutPort, TimeoutError},
};

// A timed-out job keeps its permit until the blocking closure returns.
#[derive(Clone)]
pub struct TokioProcessingTimeoutAdapter {
    concurrency_limit: Arc<Semaphore>,
}

impl TokioProcessingTimeoutAdapter {
    pub fn new(max_concurrent_jobs: usize) -> Self {
        Self {
            concurrency_limit: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
        }
    }
}

impl ProcessingTimeoutPort for TokioProcessingTimeoutAdapter {
    fn run_with_timeout(
        &self,
        job: CodecJob,
        duration: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<AppResult<EncodedImage>, TimeoutError>> + Send + 'static>>
    {
        let concurrency_limit = Arc::clone(&self.concurrency_limit);

        Box::pin(async move {
            let work = async move {
                let permit = concurrency_limit.acquire_owned().await.map_err(|e| {
                    TimeoutError::Aborted(format!("processing pool closed: {e}"))
                })?;

                spawn_blocking(move || {
                    let _permit = permit;
                    job()
                })
                .await
                .map_err(|join_error| {
                    warn!(error = %join_error, "Processing task aborted");
                    TimeoutError::Aborted(format!("processing task failed: {join_error}"))
                })
            };

            match timeout(duration, work).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(timeout_secs = duration.as_secs(), "Processing task timed out");
                    Err(TimeoutError::Elapsed(duration))
                }
            }
        })
    }
}
