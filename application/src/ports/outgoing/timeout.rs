use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppResult;
use domain::encoded_image::EncodedImage;

pub type CodecJob = Box<dyn FnOnce() -> AppResult<EncodedImage> + Send + 'static>;

#[derive(Debug)]
pub enum TimeoutError {
    Elapsed(Duration),
    Aborted(String),
}

pub trait ProcessingTimeoutPort: Send + Sync {
    fn run_with_timeout(
        &self,
        job: CodecJob,
        duration: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<AppResult<EncodedImage>, TimeoutError>> + Send + 'static>>;
}

pub type DynProcessingTimeoutPort = Arc<dyn ProcessingTimeoutPort>;
