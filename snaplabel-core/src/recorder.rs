//! Image Recorder — the upload → detect → persist pipeline.
//!
//! For each image file in a directory: store the bytes in the object
//! store under a deterministic key, run label detection against the
//! stored object, and upsert a [`ResultRecord`] into the table selected
//! by the execution context. Strictly sequential, no retries; one
//! image's failure is logged and collected without stopping the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{ExecutionContext, TablesConfig};
use crate::error::SnaplabelError;
use crate::model::ResultRecord;
use crate::services::{LabelDetector, ObjectStore, RecordStore};

/// One failed image: which file, which step, and the underlying error.
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub filename: String,
    pub step: &'static str,
    pub message: String,
}

/// Outcome of a full run. The run itself only errors out before the
/// per-image loop (bad directory); per-image failures land here.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Object-store keys of the images that produced a persisted record.
    pub succeeded: Vec<String>,
    pub failed: Vec<ImageFailure>,
}

impl RunSummary {
    /// Success means every discovered image produced exactly one record.
    /// An empty directory is a successful no-op.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ImageRecorder {
    store: Arc<dyn ObjectStore>,
    detector: Arc<dyn LabelDetector>,
    records: Arc<dyn RecordStore>,
    key_prefix: String,
}

impl ImageRecorder {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        detector: Arc<dyn LabelDetector>,
        records: Arc<dyn RecordStore>,
        key_prefix: String,
    ) -> Self {
        Self {
            store,
            detector,
            records,
            key_prefix,
        }
    }

    /// Process every image in `images_dir` into the table selected by
    /// `context`. Errors only if the directory itself cannot be read;
    /// per-image failures are reported through the returned summary.
    pub async fn run(
        &self,
        images_dir: &Path,
        context: ExecutionContext,
        tables: &TablesConfig,
        branch: &str,
    ) -> Result<RunSummary, SnaplabelError> {
        let table = context.table_name(tables);
        let images = discover_images(images_dir)?;

        if images.is_empty() {
            tracing::warn!(dir = %images_dir.display(), "no image files found");
            return Ok(RunSummary::default());
        }

        tracing::info!(
            count = images.len(),
            context = %context,
            table = %table,
            branch = %branch,
            "starting image recording run"
        );

        let mut summary = RunSummary::default();
        for path in images {
            let name = file_name(&path);
            match self.process_image(&path, table, branch).await {
                Ok(record) => {
                    tracing::info!(
                        filename = %record.filename,
                        labels = record.labels.len(),
                        "image recorded"
                    );
                    summary.succeeded.push(record.filename);
                }
                Err(e) => {
                    tracing::error!(
                        filename = %name,
                        step = e.step(),
                        error = %e,
                        "image failed"
                    );
                    summary.failed.push(ImageFailure {
                        filename: name,
                        step: e.step(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            "run finished"
        );
        Ok(summary)
    }

    /// The three steps for one image, strictly in order. An early failure
    /// short-circuits the rest: no detection without an upload, no record
    /// without labels.
    async fn process_image(
        &self,
        path: &Path,
        table: &str,
        branch: &str,
    ) -> Result<ResultRecord, SnaplabelError> {
        let key = object_key(&self.key_prefix, &file_name(path));

        let bytes = tokio::fs::read(path).await?;
        self.store.put_object(&key, bytes).await?;
        tracing::debug!(key = %key, "uploaded");

        let labels = self.detector.detect_labels(&key).await?;

        let record = ResultRecord::new(key, branch.to_string(), labels);
        self.records.put_record(table, &record).await?;

        Ok(record)
    }
}

/// Object-store key for an image: conventional prefix + original filename.
fn object_key(prefix: &str, file_name: &str) -> String {
    format!("{}/{}", prefix, file_name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// All `.jpg` / `.png` files in `dir` (case-insensitive extension),
/// sorted by name so runs are deterministic. A missing or unreadable
/// directory is fatal; anything that is not an image file is skipped.
fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, SnaplabelError> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("png"))
            .unwrap_or(false);
        if is_image {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

// ============================================================================
// Tests
// ============================================================================
