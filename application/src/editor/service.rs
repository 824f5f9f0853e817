use std::sync::Arc;
use tracing::{debug, info, instrument};

use domain::{
    encoded_image::EncodedImage,
    operation::{Operation, OperationKind},
    pixel_buffer::PixelBuffer,
    upload::has_allowed_extension,
};

use crate::{
    config::EditorSettings,
    error::{AppError, AppResult},
    ports::{
        incoming::editor::{DownloadImageUseCase, ProcessImageUseCase, UploadImageUseCase},
        outgoing::{
            image_codec::{DynImageCodecPort, ImageCodecPort},
            image_processor::DynImageProcessorPort,
            output_store::DynOutputStorePort,
            timeout::{CodecJob, DynProcessingTimeoutPort, TimeoutError},
        },
    },
};

use super::{
    commands::{DownloadLink, EditedImage, ProcessCommand, UploadedFile},
    params::params_from_json,
    transport::{from_data_url, to_data_url},
};

pub struct EditorServiceDeps {
    pub codec_port: DynImageCodecPort,
    pub processor_port: DynImageProcessorPort,
    pub output_store: DynOutputStorePort,
    pub timeout_port: DynProcessingTimeoutPort,
}

pub struct EditorService {
    settings: Arc<EditorSettings>,
    codec_port: DynImageCodecPort,
    processor_port: DynImageProcessorPort,
    output_store: DynOutputStorePort,
    timeout_port: DynProcessingTimeoutPort,
}

impl EditorService {
    pub fn new(settings: EditorSettings, deps: EditorServiceDeps) -> Arc<Self> {
        Arc::new(Self {
            settings: Arc::new(settings),
            codec_port: deps.codec_port,
            processor_port: deps.processor_port,
            output_store: deps.output_store,
            timeout_port: deps.timeout_port,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    async fn run_job(&self, job: CodecJob) -> AppResult<EncodedImage> {
        let timeout = self.settings.processing_timeout;
        let outcome = self
            .timeout_port
            .run_with_timeout(job, timeout)
            .await
            .map_err(|err| match err {
                TimeoutError::Elapsed(duration) => AppError::processing(format!(
                    "processing took longer than {}s",
                    duration.as_secs()
                )),
                TimeoutError::Aborted(message) => AppError::processing(message),
            })?;

        outcome.map_err(AppError::normalize)
    }

    fn edited(image: &EncodedImage) -> EditedImage {
        EditedImage {
            image: to_data_url(image),
            width: image.width,
            height: image.height,
        }
    }
}

fn require_text(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::validation(format!("Missing {field}"))),
    }
}

fn check_size(len: usize, limit: usize) -> AppResult<()> {
    if len > limit {
        return Err(AppError::PayloadTooLarge { limit });
    }
    Ok(())
}

fn decode_transport_image(
    codec: &dyn ImageCodecPort,
    text: &str,
    max_bytes: usize,
) -> AppResult<PixelBuffer> {
    let data = from_data_url(text)?;
    check_size(data.len(), max_bytes)?;
    codec.decode(&data)
}

fn ensure_output_fits(
    operation: &Operation,
    image: &PixelBuffer,
    max_output_pixels: u64,
) -> AppResult<()> {
    let (width, height) = operation.output_dimensions(image.width(), image.height());
    let pixels = u64::from(width) * u64::from(height);

    if pixels > max_output_pixels {
        return Err(AppError::validation(format!(
            "{} would produce a {width}x{height} image, above the {max_output_pixels} pixel limit",
            operation.kind()
        )));
    }

    Ok(())
}

#[async_trait::async_trait]
impl UploadImageUseCase for EditorService {
    #[instrument(skip(self, file))]
    async fn upload(&self, file: Option<UploadedFile>) -> AppResult<EditedImage> {
        let file = file.ok_or_else(|| AppError::validation("No file uploaded"))?;

        if file.file_name.trim().is_empty() {
            return Err(AppError::validation("No file selected"));
        }

        if !has_allowed_extension(&file.file_name, &self.settings.allowed_extensions) {
            return Err(AppError::validation("Invalid file type"));
        }

        check_size(file.bytes.len(), self.settings.max_upload_bytes)?;

        debug!(
            file_name = %file.file_name,
            bytes = file.bytes.len(),
            "Decoding uploaded image"
        );

        let codec = Arc::clone(&self.codec_port);
        let bytes = file.bytes;
        let encoded = self
            .run_job(Box::new(move || {
                let image = codec.decode(&bytes)?;
                codec.encode_lossless(&image)
            }))
            .await?;

        info!(
            width = encoded.width,
            height = encoded.height,
            "Upload normalized"
        );

        Ok(Self::edited(&encoded))
    }
}

#[async_trait::async_trait]
impl ProcessImageUseCase for EditorService {
    #[instrument(skip(self, command), fields(operation = ?command.operation))]
    async fn process(&self, command: ProcessCommand) -> AppResult<EditedImage> {
        let image_text = require_text(command.image, "image")?;
        let operation_name = require_text(command.operation, "operation")?;
        let raw_params = command.params;
        let kind = operation_name
            .parse::<OperationKind>()
            .map_err(|e| AppError::from(e).normalize())?;

        let codec = Arc::clone(&self.codec_port);
        let processor = Arc::clone(&self.processor_port);
        let settings = Arc::clone(&self.settings);

        let encoded = self
            .run_job(Box::new(move || {
                let image =
                    decode_transport_image(&*codec, &image_text, settings.max_upload_bytes)?;
                let params = params_from_json(raw_params.as_ref())?;
                let operation = Operation::from_kind(kind, &params)?;

                ensure_output_fits(&operation, &image, settings.max_output_pixels)?;

                debug!(?operation, width = image.width(), height = image.height(), "Applying operation");
                let output = processor.apply(&operation, &image)?;
                codec.encode_lossless(&output)
            }))
            .await?;

        info!(
            width = encoded.width,
            height = encoded.height,
            bytes = encoded.bytes.len(),
            "Image processed"
        );

        Ok(Self::edited(&encoded))
    }
}

#[async_trait::async_trait]
impl DownloadImageUseCase for EditorService {
    #[instrument(skip(self, image))]
    async fn prepare_download(&self, image: Option<String>) -> AppResult<DownloadLink> {
        let image_text = require_text(image, "image")?;

        let codec = Arc::clone(&self.codec_port);
        let max_bytes = self.settings.max_upload_bytes;

        let encoded = self
            .run_job(Box::new(move || {
                let image = decode_transport_image(&*codec, &image_text, max_bytes)?;
                codec.encode_lossless(&image)
            }))
            .await?;

        let file_name = self.output_store.persist(&encoded).await?;
        info!(file_name = %file_name, "Download prepared");

        Ok(DownloadLink::for_file(file_name))
    }

    #[instrument(skip(self))]
    async fn fetch_download(&self, file_name: &str) -> AppResult<Vec<u8>> {
        self.output_store.open(file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outgoing::{
        image_processor::ImageProcessorPort,
        output_store::OutputStorePort,
        timeout::ProcessingTimeoutPort,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::time::Duration;

    // width and height as little-endian u32s, then raw RGB.
    struct FakeCodec;

    impl ImageCodecPort for FakeCodec {
        fn decode(&self, data: &[u8]) -> AppResult<PixelBuffer> {
            let header = data
                .get(..8)
                .ok_or_else(|| AppError::decode("truncated header"))?;
            let width = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
            let height = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
            PixelBuffer::new(width, height, data[8..].to_vec())
                .map_err(|e| AppError::decode(e.to_string()))
        }

        fn encode_lossless(&self, image: &PixelBuffer) -> AppResult<EncodedImage> {
            let mut bytes = image.width().to_le_bytes().to_vec();
            bytes.extend_from_slice(&image.height().to_le_bytes());
            bytes.extend_from_slice(image.as_raw());
            Ok(EncodedImage::png(bytes, image.width(), image.height()))
        }
    }

    /// Fills the output with a colour derived from the operation so tests can
    /// tell which branch ran.
    struct FakeProcessor {
        applied: Mutex<Vec<Operation>>,
    }

    impl ImageProcessorPort for FakeProcessor {
        fn apply(&self, operation: &Operation, image: &PixelBuffer) -> AppResult<PixelBuffer> {
            self.applied.lock().unwrap().push(*operation);
            let (width, height) = operation.output_dimensions(image.width(), image.height());
            Ok(PixelBuffer::filled(width, height, [1, 2, 3])?)
        }
    }

    struct InlineTimeout;

    impl ProcessingTimeoutPort for InlineTimeout {
        fn run_with_timeout(
            &self,
            job: CodecJob,
            _duration: Duration,
        ) -> Pin<Box<dyn Future<Output = Result<AppResult<EncodedImage>, TimeoutError>> + Send + 'static>>
        {
            Box::pin(async move { Ok(job()) })
        }
    }

    struct ExpiredTimeout;

    impl ProcessingTimeoutPort for ExpiredTimeout {
        fn run_with_timeout(
            &self,
            _job: CodecJob,
            duration: Duration,
        ) -> Pin<Box<dyn Future<Output = Result<AppResult<EncodedImage>, TimeoutError>> + Send + 'static>>
        {
            Box::pin(async move { Err(TimeoutError::Elapsed(duration)) })
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        files: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait::async_trait]
    impl OutputStorePort for MemoryStore {
        async fn persist(&self, image: &EncodedImage) -> AppResult<String> {
            let mut files = self.files.lock().unwrap();
            let name = format!("processed_{}.png", files.len());
            files.insert(name.clone(), image.bytes.clone());
            Ok(name)
        }

        async fn open(&self, file_name: &str) -> AppResult<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(file_name)
                .cloned()
                .ok_or_else(|| AppError::NotFound {
                    message: file_name.to_string(),
                })
        }
    }

    struct Harness {
        service: Arc<EditorService>,
        processor: Arc<FakeProcessor>,
    }

    fn harness_with(settings: EditorSettings, timeout_port: DynProcessingTimeoutPort) -> Harness {
        let processor = Arc::new(FakeProcessor {
            applied: Mutex::new(Vec::new()),
        });
        let service = EditorService::new(
            settings,
            EditorServiceDeps {
                codec_port: Arc::new(FakeCodec),
                processor_port: Arc::clone(&processor) as DynImageProcessorPort,
                output_store: Arc::new(MemoryStore::default()),
                timeout_port,
            },
        );
        Harness { service, processor }
    }

    fn harness() -> Harness {
        harness_with(EditorSettings::default(), Arc::new(InlineTimeout))
    }

    fn transport_image(width: u32, height: u32) -> String {
        let buffer = PixelBuffer::filled(width, height, [128, 128, 128]).unwrap();
        to_data_url(&FakeCodec.encode_lossless(&buffer).unwrap())
    }

    fn command(operation: &str, params: serde_json::Value) -> ProcessCommand {
        ProcessCommand {
            image: Some(transport_image(4, 2)),
            operation: Some(operation.to_string()),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn process_applies_operation_with_defaults() {
        let h = harness();
        let result = h.service.process(command("resize", json!({}))).await.unwrap();

        assert_eq!((result.width, result.height), (6, 3));
        assert!(result.image.starts_with("data:image/png;base64,"));
        assert_eq!(
            h.processor.applied.lock().unwrap().as_slice(),
            &[Operation::Resize { scale: 1.5 }]
        );
    }

    #[tokio::test]
    async fn process_requires_image_and_operation() {
        let h = harness();

        let missing_image = ProcessCommand {
            operation: Some("blur".into()),
            ..ProcessCommand::default()
        };
        let err = h.service.process(missing_image).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError { ref message } if message == "Missing image"));

        let missing_operation = ProcessCommand {
            image: Some(transport_image(1, 1)),
            ..ProcessCommand::default()
        };
        let err = h.service.process(missing_operation).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn unknown_operation_is_reported_as_such() {
        let h = harness();
        let err = h
            .service
            .process(command("oilpaint", json!({"radius": 2})))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnknownOperation { ref name } if name == "oilpaint"));
        assert!(h.processor.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_operation_wins_over_bad_payload() {
        let h = harness();
        let cmd = ProcessCommand {
            image: Some("not an image".into()),
            operation: Some("swirl".into()),
            params: None,
        };
        let err = h.service.process(cmd).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownOperation { .. }));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let h = harness();
        let cmd = ProcessCommand {
            image: Some("data:image/png;base64,AAAA".into()),
            operation: Some("sepia".into()),
            params: None,
        };
        let err = h.service.process(cmd).await.unwrap_err();
        assert!(matches!(err, AppError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn invalid_params_are_validation_errors() {
        let h = harness();

        let err = h
            .service
            .process(command("resize", json!({"scale": 0})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError { .. }));

        let err = h
            .service
            .process(command("blur", json!({"radius": "wide"})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn oversized_resize_is_rejected_before_processing() {
        let settings = EditorSettings {
            max_output_pixels: 100,
            ..EditorSettings::default()
        };
        let h = harness_with(settings, Arc::new(InlineTimeout));

        let err = h
            .service
            .process(command("resize", json!({"scale": 10})))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError { ref message } if message.contains("pixel limit")));
        assert!(h.processor.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn timeout_surfaces_as_processing_error() {
        let h = harness_with(EditorSettings::default(), Arc::new(ExpiredTimeout));
        let err = h
            .service
            .process(command("grayscale", json!(null)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProcessingError { .. }));
    }

    #[tokio::test]
    async fn upload_checks_presence_name_and_extension() {
        let h = harness();

        let err = h.service.upload(None).await.unwrap_err();
        assert_eq!(err.to_string(), "No file uploaded");

        let unnamed = UploadedFile {
            file_name: String::new(),
            bytes: vec![1],
        };
        let err = h.service.upload(Some(unnamed)).await.unwrap_err();
        assert_eq!(err.to_string(), "No file selected");

        let text = UploadedFile {
            file_name: "notes.txt".into(),
            bytes: vec![1],
        };
        let err = h.service.upload(Some(text)).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type");
    }

    #[tokio::test]
    async fn upload_rejects_payloads_over_the_cap() {
        let settings = EditorSettings {
            max_upload_bytes: 4,
            ..EditorSettings::default()
        };
        let h = harness_with(settings, Arc::new(InlineTimeout));
        let file = UploadedFile {
            file_name: "big.png".into(),
            bytes: vec![0; 5],
        };
        let err = h.service.upload(Some(file)).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge { limit: 4 }));
    }

    #[tokio::test]
    async fn upload_returns_normalized_transport_image() {
        let h = harness();
        let buffer = PixelBuffer::filled(3, 2, [9, 8, 7]).unwrap();
        let file = UploadedFile {
            file_name: "photo.PNG".into(),
            bytes: FakeCodec.encode_lossless(&buffer).unwrap().bytes,
        };

        let result = h.service.upload(Some(file)).await.unwrap();
        assert_eq!((result.width, result.height), (3, 2));

        let decoded = FakeCodec.decode(&from_data_url(&result.image).unwrap()).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[tokio::test]
    async fn download_round_trip() {
        let h = harness();
        let link = h
            .service
            .prepare_download(Some(transport_image(2, 2)))
            .await
            .unwrap();
        assert_eq!(link.url, format!("/download/{}", link.file_name));

        let bytes = h.service.fetch_download(&link.file_name).await.unwrap();
        assert_eq!(FakeCodec.decode(&bytes).unwrap().dimensions(), (2, 2));

        let err = h.service.fetch_download("missing.png").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn download_requires_image() {
        let h = harness();
        let err = h.service.prepare_download(None).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError { .. }));
    }
}
