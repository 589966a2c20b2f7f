//! Batch encoder: one request configuration applied to many source images.
//!
//! ## Lifecycle
//!
//! ```text
//! prepare()  validate request, resolve target        → Pending
//! run()      decode → transform → encode per item     → Running
//!            every item attempted (or cancelled)      → Completed
//! ```
//!
//! Validation failures (a zero dimension, a `custom` preset without a usable
//! size) are returned by [`prepare`] and nothing is attempted. Once running,
//! failures are per item: a corrupt input is recorded in its own
//! [`BatchResult`] and never stops its siblings.
//!
//! ## Parallel Processing
//!
//! Items run on the global [rayon](https://docs.rs/rayon) pool. Results are
//! collected by index, so the returned list is in input order regardless of
//! completion order. A [`CancelToken`] stops items that have not started yet;
//! items already in flight finish normally.
//!
//! ## Resize reference
//!
//! A resize that gives only one axis derives the other from the aspect ratio
//! of the first input whose header can be read. The same output size is then
//! applied to every image in the batch.

use crate::catalog::{self, CatalogError, ResolvedPreset};
use crate::imaging::{
    BackendError, Color, DimensionError, EncodeSpec, GeometryError, ImageBackend,
    OutputFormat, Quality, Rect, ResizeSpec, TransformError, TransformRequest, encode_surface,
    render, resolve_resize_target, stretch,
};
use crate::naming;
use crate::types::{EncodedFile, SourceImage};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a batch before any item is attempted.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("cannot derive resize target: no input image could be identified")]
    NoReference,
    #[error("batch has already been run")]
    AlreadyRun,
}

/// Why a single item failed.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("cancelled before it started")]
    Cancelled,
}

impl From<TransformError> for ItemError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::Geometry(e) => Self::Geometry(e),
            TransformError::Backend(e) => Self::Backend(e),
        }
    }
}

/// What to do with every image of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    /// Stretch to an explicit size. Missing axes come from the first image.
    Resize(ResizeSpec),
    /// Keep the dimensions, re-encode.
    Convert {
        format: OutputFormat,
        quality: Quality,
    },
    /// Cut a catalog preset. `custom_size` is only read for the `custom` key.
    IconPreset {
        preset: String,
        custom_size: Option<u32>,
    },
}

impl RequestKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resize(_) => "resize",
            Self::Convert { .. } => "convert",
            Self::IconPreset { .. } => "preset",
        }
    }
}

/// Images plus one request configuration.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub images: Vec<SourceImage>,
    pub kind: RequestKind,
    /// Letterbox fill, and the color transparency is flattened onto for JPEG.
    pub background: Color,
}

impl BatchRequest {
    pub fn new(images: Vec<SourceImage>, kind: RequestKind) -> Self {
        Self {
            images,
            kind,
            background: Color::default(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Outcome for one input image, at the input's position.
#[derive(Debug)]
pub struct BatchResult {
    pub index: usize,
    pub source: String,
    pub outcome: Result<Vec<EncodedFile>, ItemError>,
}

impl BatchResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Pending,
    Running,
    Completed,
}

impl BatchState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Pending,
            1 => Self::Running,
            _ => Self::Completed,
        }
    }
}

/// Shared flag that stops scheduling of not-yet-started items.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress events sent while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Started {
        operation: &'static str,
        total: usize,
    },
    ItemDone {
        index: usize,
        source: String,
        /// `(filename, label)` per output.
        outputs: Vec<(String, String)>,
    },
    ItemFailed {
        index: usize,
        source: String,
        error: String,
    },
    Finished {
        succeeded: usize,
        failed: usize,
    },
}

/// Target resolved once at prepare time and shared by every item.
#[derive(Debug, Clone)]
enum Plan {
    Resize { target: Rect },
    Convert { spec: EncodeSpec },
    Preset(ResolvedPreset),
}

/// A validated batch, ready to run once.
#[derive(Debug)]
pub struct Batch {
    images: Vec<SourceImage>,
    operation: &'static str,
    plan: Plan,
    background: Color,
    state: AtomicU8,
    cancel: CancelToken,
}

/// Validate a request and resolve everything that is shared across items.
pub fn prepare(backend: &impl ImageBackend, request: BatchRequest) -> Result<Batch, BatchError> {
    let plan = match &request.kind {
        RequestKind::Resize(spec) => {
            spec.validate()?;
            let reference = if spec.is_explicit() {
                None
            } else {
                Some(reference_size(backend, &request.images)?)
            };
            Plan::Resize {
                target: resolve_resize_target(spec, reference)?,
            }
        }
        RequestKind::Convert { format, quality } => Plan::Convert {
            spec: EncodeSpec::new(*format, *quality),
        },
        RequestKind::IconPreset {
            preset,
            custom_size,
        } => Plan::Preset(catalog::resolve(preset, *custom_size)?),
    };
    debug!(operation = request.kind.name(), ?plan, "batch prepared");

    Ok(Batch {
        operation: request.kind.name(),
        images: request.images,
        plan,
        background: request.background,
        state: AtomicU8::new(BatchState::Pending as u8),
        cancel: CancelToken::new(),
    })
}

/// Size of the first input whose header can be read.
fn reference_size(backend: &impl ImageBackend, images: &[SourceImage]) -> Result<Rect, BatchError> {
    for image in images {
        match backend.identify(&image.bytes) {
            Ok(size) => return Ok(size),
            Err(e) => debug!(source = %image.filename, error = %e, "skipping unreadable resize reference"),
        }
    }
    Err(BatchError::NoReference)
}

impl Batch {
    pub fn state(&self) -> BatchState {
        BatchState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Token that cancels this batch from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Output size of a resize batch, `None` for other operations.
    pub fn resize_target(&self) -> Option<Rect> {
        match self.plan {
            Plan::Resize { target } => Some(target),
            _ => None,
        }
    }

    /// The resolved preset of a preset batch, including whether the key fell
    /// back to the default canvas.
    pub fn preset(&self) -> Option<&ResolvedPreset> {
        match &self.plan {
            Plan::Preset(preset) => Some(preset),
            _ => None,
        }
    }

    /// Process every item. Returns one result per input, in input order.
    pub fn run(
        &self,
        backend: &impl ImageBackend,
        events: Option<Sender<BatchEvent>>,
    ) -> Result<Vec<BatchResult>, BatchError> {
        self.state
            .compare_exchange(
                BatchState::Pending as u8,
                BatchState::Running as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .map_err(|_| BatchError::AlreadyRun)?;

        let total = self.images.len();
        info!(operation = self.operation, total, "batch started");
        send(&events, BatchEvent::Started {
            operation: self.operation,
            total,
        });

        let results: Vec<BatchResult> = self
            .images
            .par_iter()
            .enumerate()
            .map(|(index, image)| {
                let outcome = if self.cancel.is_cancelled() {
                    Err(ItemError::Cancelled)
                } else {
                    self.process_item(backend, image)
                };
                report_item(&events, index, image, &outcome);
                BatchResult {
                    index,
                    source: image.filename.clone(),
                    outcome,
                }
            })
            .collect();

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        let failed = total - succeeded;
        info!(operation = self.operation, succeeded, failed, "batch completed");
        send(&events, BatchEvent::Finished { succeeded, failed });

        self.state
            .store(BatchState::Completed as u8, Ordering::SeqCst);
        Ok(results)
    }

    fn process_item(
        &self,
        backend: &impl ImageBackend,
        image: &SourceImage,
    ) -> Result<Vec<EncodedFile>, ItemError> {
        let raster = backend.decode(&image.bytes, &image.mime)?;
        debug!(source = %image.filename, size = %raster.size(), "decoded");

        match &self.plan {
            Plan::Resize { target } => {
                let surface = stretch(&raster, *target)?;
                let spec = EncodeSpec::new(OutputFormat::for_mime(&image.mime), Quality::default());
                let bytes = encode_surface(backend, &surface, &spec, self.background)?;
                let name = naming::resized_name(&image.filename, &image.mime);
                Ok(vec![EncodedFile::new(name, spec.format, *target, bytes)])
            }
            Plan::Convert { spec } => {
                let bytes = encode_surface(backend, raster.as_rgba(), spec, self.background)?;
                let name = naming::converted_name(&image.filename, spec.format);
                let label = spec.format.extension().to_ascii_uppercase();
                Ok(vec![
                    EncodedFile::new(name, spec.format, raster.size(), bytes).with_label(label),
                ])
            }
            Plan::Preset(preset) => preset
                .sizes
                .iter()
                .map(|&size| -> Result<EncodedFile, ItemError> {
                    let request = TransformRequest {
                        source: &raster,
                        target: size,
                        policy: preset.policy,
                        background: self.background,
                    };
                    let spec = EncodeSpec::new(OutputFormat::Png, Quality::default());
                    let bytes = render(backend, &request, &spec)?;
                    let name = naming::preset_name(&preset.file_stem(size));
                    Ok(EncodedFile::new(name, spec.format, size, bytes))
                })
                .collect(),
        }
    }
}

fn send(events: &Option<Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = events {
        // The receiver may be gone; progress is best-effort.
        let _ = tx.send(event);
    }
}

fn report_item(
    events: &Option<Sender<BatchEvent>>,
    index: usize,
    image: &SourceImage,
    outcome: &Result<Vec<EncodedFile>, ItemError>,
) {
    let event = match outcome {
        Ok(files) => BatchEvent::ItemDone {
            index,
            source: image.filename.clone(),
            outputs: files
                .iter()
                .map(|f| (f.filename.clone(), f.label.clone()))
                .collect(),
        },
        Err(err) => {
            if !matches!(err, ItemError::Cancelled) {
                warn!(source = %image.filename, error = %err, "item failed");
            }
            BatchEvent::ItemFailed {
                index,
                source: image.filename.clone(),
                error: err.to_string(),
            }
        }
    };
    send(events, event);
}

/// Prepare and run in one call.
pub fn run_batch(
    backend: &impl ImageBackend,
    request: BatchRequest,
    events: Option<Sender<BatchEvent>>,
) -> Result<Vec<BatchResult>, BatchError> {
    prepare(backend, request)?.run(backend, events)
}

// ============================================================================
// Report
// ============================================================================

/// JSON-friendly summary of a finished batch.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub operation: &'a str,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<ReportItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ReportItem<'a> {
    pub index: usize,
    pub source: &'a str,
    #[serde(skip_serializing_if = "no_outputs")]
    pub outputs: &'a [EncodedFile],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn no_outputs(outputs: &&[EncodedFile]) -> bool {
    outputs.is_empty()
}

impl<'a> BatchReport<'a> {
    pub fn new(operation: &'a str, results: &'a [BatchResult]) -> Self {
        let items: Vec<ReportItem<'a>> = results
            .iter()
            .map(|r| match &r.outcome {
                Ok(files) => ReportItem {
                    index: r.index,
                    source: &r.source,
                    outputs: files,
                    error: None,
                },
                Err(e) => ReportItem {
                    index: r.index,
                    source: &r.source,
                    outputs: &[],
                    error: Some(e.to_string()),
                },
            })
            .collect();
        let succeeded = items.iter().filter(|i| i.error.is_none()).count();
        Self {
            operation,
            succeeded,
            failed: items.len() - succeeded,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::FitPolicy;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{mock_image, mock_images, output_names};
    use std::sync::mpsc;

    fn resize(width: Option<u32>, height: Option<u32>) -> RequestKind {
        RequestKind::Resize(ResizeSpec {
            width,
            height,
            keep_aspect: true,
        })
    }

    fn preset(key: &str) -> RequestKind {
        RequestKind::IconPreset {
            preset: key.to_string(),
            custom_size: None,
        }
    }

    // =========================================================================
    // Validation before start
    // =========================================================================

    #[test]
    fn zero_custom_size_aborts_before_start() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(
            mock_images(&["100x100"]),
            RequestKind::IconPreset {
                preset: "custom".into(),
                custom_size: Some(0),
            },
        );
        let err = run_batch(&backend, request, None).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Catalog(CatalogError::Dimension(DimensionError::InvalidDimension(_)))
        ));
        assert!(backend.get_operations().is_empty(), "nothing may be decoded");
    }

    #[test]
    fn zero_resize_width_aborts_before_start() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(mock_images(&["100x100"]), resize(Some(0), Some(10)));
        assert!(matches!(
            run_batch(&backend, request, None),
            Err(BatchError::Dimension(DimensionError::InvalidDimension(_)))
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn resize_without_readable_reference_aborts() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(mock_images(&["junk", "junk"]), resize(Some(50), None));
        assert!(matches!(
            prepare(&backend, request),
            Err(BatchError::NoReference)
        ));
    }

    // =========================================================================
    // State machine
    // =========================================================================

    #[test]
    fn state_moves_pending_to_completed() {
        let backend = MockBackend::new();
        let batch = prepare(
            &backend,
            BatchRequest::new(mock_images(&["10x10"]), preset("apple")),
        )
        .unwrap();
        assert_eq!(batch.state(), BatchState::Pending);
        batch.run(&backend, None).unwrap();
        assert_eq!(batch.state(), BatchState::Completed);
    }

    #[test]
    fn batch_runs_only_once() {
        let backend = MockBackend::new();
        let batch = prepare(
            &backend,
            BatchRequest::new(mock_images(&["10x10"]), preset("apple")),
        )
        .unwrap();
        batch.run(&backend, None).unwrap();
        assert!(matches!(
            batch.run(&backend, None),
            Err(BatchError::AlreadyRun)
        ));
    }

    #[test]
    fn empty_batch_completes() {
        let backend = MockBackend::new();
        let batch = prepare(&backend, BatchRequest::new(vec![], preset("apple"))).unwrap();
        assert!(batch.is_empty());
        assert!(batch.run(&backend, None).unwrap().is_empty());
        assert_eq!(batch.state(), BatchState::Completed);
    }

    // =========================================================================
    // Isolation and ordering
    // =========================================================================

    #[test]
    fn corrupt_item_is_isolated() {
        let backend = MockBackend::new();
        let images = mock_images(&["40x30", "20x20", "corrupt", "64x64", "8x16"]);
        let request = BatchRequest::new(images, preset("twitter-profile"));

        let results = run_batch(&backend, request, None).unwrap();
        assert_eq!(results.len(), 5);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.index, i);
            if i == 2 {
                assert!(matches!(
                    result.outcome,
                    Err(ItemError::Backend(BackendError::Decode(_)))
                ));
            } else {
                assert!(result.is_ok(), "item {i} should succeed");
            }
        }
    }

    #[test]
    fn zero_area_source_is_item_failure() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(mock_images(&["0x10", "10x10"]), preset("apple"));
        let results = run_batch(&backend, request, None).unwrap();
        assert!(matches!(
            results[0].outcome,
            Err(ItemError::Backend(BackendError::Dimension(
                DimensionError::DegenerateSource(_)
            )))
        ));
        assert!(results[1].is_ok());
    }

    #[test]
    fn encode_failure_is_reported_per_item() {
        let backend = MockBackend::failing_encode();
        let request = BatchRequest::new(mock_images(&["10x10", "12x12"]), preset("android"));
        let results = run_batch(&backend, request, None).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(
            r.outcome,
            Err(ItemError::Backend(BackendError::Encode(_)))
        )));
    }

    #[test]
    fn results_follow_input_order() {
        let backend = MockBackend::new();
        let names: Vec<String> = (1..=40).map(|i| format!("{}x{}", i * 3, i * 2)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let request = BatchRequest::new(
            mock_images(&refs),
            RequestKind::Convert {
                format: OutputFormat::Webp,
                quality: Quality::default(),
            },
        );
        let results = run_batch(&backend, request, None).unwrap();
        let sources: Vec<&str> = results.iter().map(|r| r.source.as_str()).collect();
        let expected: Vec<String> = names.iter().map(|n| format!("{n}.png")).collect();
        assert_eq!(sources, expected);
    }

    // =========================================================================
    // Operations
    // =========================================================================

    #[test]
    fn resize_derives_height_from_first_image() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(mock_images(&["400x200", "100x100"]), resize(Some(100), None));
        let batch = prepare(&backend, request).unwrap();
        assert_eq!(batch.resize_target(), Some(Rect::new(100, 50)));

        let results = batch.run(&backend, None).unwrap();
        for result in &results {
            let files = result.outcome.as_ref().unwrap();
            assert_eq!(files[0].size, Rect::new(100, 50));
            assert_eq!(files[0].label, "100x50");
        }
    }

    #[test]
    fn resize_keeps_name_and_format() {
        let backend = MockBackend::new();
        let image = SourceImage::new("cat.jpg", "image/jpeg", b"30x30".to_vec());
        let request = BatchRequest::new(vec![image], RequestKind::Resize(ResizeSpec::exact(10, 20)));
        let results = run_batch(&backend, request, None).unwrap();
        let files = results[0].outcome.as_ref().unwrap();
        assert_eq!(files[0].filename, "cat.jpg");
        assert_eq!(files[0].format, OutputFormat::Jpeg);
        assert_eq!(files[0].bytes, b"jpeg:10x20");
        assert!(backend.get_operations().contains(&RecordedOp::Encode {
            width: 10,
            height: 20,
            format: OutputFormat::Jpeg,
            quality: 90,
        }));
    }

    #[test]
    fn convert_keeps_dimensions_and_swaps_extension() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(
            vec![mock_image("64x48")],
            RequestKind::Convert {
                format: OutputFormat::Webp,
                quality: Quality::from_percent(70),
            },
        );
        let results = run_batch(&backend, request, None).unwrap();
        let files = results[0].outcome.as_ref().unwrap();
        assert_eq!(files[0].filename, "64x48.webp");
        assert_eq!(files[0].size, Rect::new(64, 48));
        assert_eq!(files[0].label, "WEBP");
        assert!(backend.get_operations().contains(&RecordedOp::Encode {
            width: 64,
            height: 48,
            format: OutputFormat::Webp,
            quality: 70,
        }));
    }

    #[test]
    fn favicon_family_yields_one_result_with_three_files() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(vec![mock_image("300x200")], preset("favicon"));
        let results = run_batch(&backend, request, None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(
            output_names(&results[0]),
            ["favicon_16x16.png", "favicon_32x32.png", "favicon_48x48.png"]
        );
    }

    #[test]
    fn unknown_preset_uses_fallback_canvas() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(vec![mock_image("300x200")], preset("friendster"));
        let results = run_batch(&backend, request, None).unwrap();
        let files = results[0].outcome.as_ref().unwrap();
        assert_eq!(files[0].filename, "image_256x256.png");
        assert_eq!(files[0].size, Rect::square(256));
    }

    #[test]
    fn prepared_batch_exposes_preset_fallback() {
        let backend = MockBackend::new();
        let unknown = prepare(
            &backend,
            BatchRequest::new(vec![mock_image("10x10")], preset("friendster")),
        )
        .unwrap();
        let resolved = unknown.preset().unwrap();
        assert!(resolved.fallback);
        assert_eq!(resolved.key, "friendster");

        let known = prepare(
            &backend,
            BatchRequest::new(vec![mock_image("10x10")], preset("apple")),
        )
        .unwrap();
        assert!(!known.preset().unwrap().fallback);

        let resize = prepare(
            &backend,
            BatchRequest::new(vec![mock_image("10x10")], resize(Some(5), Some(5))),
        )
        .unwrap();
        assert!(resize.preset().is_none());
    }

    #[test]
    fn preset_policy_follows_catalog() {
        // FitWithin letterboxes, so the encoder still gets the full canvas
        let backend = MockBackend::new();
        let request = BatchRequest::new(vec![mock_image("400x200")], preset("youtube-thumbnail"));
        let results = run_batch(&backend, request, None).unwrap();
        let files = results[0].outcome.as_ref().unwrap();
        assert_eq!(files[0].filename, "youtube_thumbnail.png");
        assert_eq!(files[0].bytes, b"png:1280x720");
        assert_eq!(
            catalog::lookup("youtube-thumbnail").unwrap().policy,
            FitPolicy::FitWithin
        );
    }

    // =========================================================================
    // Cancellation and events
    // =========================================================================

    #[test]
    fn cancelled_batch_skips_unstarted_items() {
        let backend = MockBackend::new();
        let batch = prepare(
            &backend,
            BatchRequest::new(mock_images(&["10x10", "20x20", "30x30"]), preset("apple")),
        )
        .unwrap();
        batch.cancel_token().cancel();

        let results = batch.run(&backend, None).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results
            .iter()
            .all(|r| matches!(r.outcome, Err(ItemError::Cancelled))));
        assert!(backend.get_operations().is_empty());
        assert_eq!(batch.state(), BatchState::Completed);
    }

    #[test]
    fn events_bracket_the_run() {
        let backend = MockBackend::new();
        let (tx, rx) = mpsc::channel();
        let request = BatchRequest::new(mock_images(&["10x10", "bad"]), preset("apple"));
        run_batch(&backend, request, Some(tx)).unwrap();

        let events: Vec<BatchEvent> = rx.iter().collect();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            BatchEvent::Started {
                operation: "preset",
                total: 2
            }
        );
        assert_eq!(
            events[3],
            BatchEvent::Finished {
                succeeded: 1,
                failed: 1
            }
        );
        assert!(events.contains(&BatchEvent::ItemDone {
            index: 0,
            source: "10x10.png".into(),
            outputs: vec![("apple-touch-icon.png".into(), "180x180".into())],
        }));
        assert!(events
            .iter()
            .any(|e| matches!(e, BatchEvent::ItemFailed { index: 1, .. })));
    }

    // =========================================================================
    // Report
    // =========================================================================

    #[test]
    fn report_serializes_outcomes() {
        let backend = MockBackend::new();
        let request = BatchRequest::new(mock_images(&["10x10", "bad"]), preset("android"));
        let results = run_batch(&backend, request, None).unwrap();

        let report = BatchReport::new("preset", &results);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["items"][0]["outputs"][0]["filename"], "android-icon.png");
        assert_eq!(json["items"][0]["outputs"][0]["size"]["width"], 192);
        assert!(json["items"][0]["outputs"][0].get("bytes").is_none());
        assert!(json["items"][1]["error"].as_str().unwrap().contains("bad"));
        assert!(json["items"][1].get("outputs").is_none());
    }
}
