pub mod aws;
pub mod config;
pub mod error;
pub mod model;
pub mod recorder;
pub mod services;

pub use config::{
    DetectionConfig, ExecutionContext, SnaplabelConfig, StorageConfig, TablesConfig,
};
pub use error::SnaplabelError;
pub use model::{Label, ResultRecord};
pub use recorder::{ImageFailure, ImageRecorder, RunSummary};
pub use services::{LabelDetector, ObjectStore, RecordStore};
