//! Service seams for the three managed dependencies.
//!
//! The recorder only sees these traits; production wires in the AWS
//! implementations from [`crate::aws`], tests wire in in-memory fakes.

use async_trait::async_trait;

use crate::error::SnaplabelError;
use crate::model::{Label, ResultRecord};

/// Durable blob storage addressed by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store raw image bytes under `key`. Overwrites any existing object.
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<(), SnaplabelError>;
}

/// Label detection against an already-stored object.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Returns the ordered label sequence for the object at `key`.
    async fn detect_labels(&self, key: &str) -> Result<Vec<Label>, SnaplabelError>;
}

/// Key-value table writes, keyed by `ResultRecord::filename`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert: a record for an existing filename replaces the old one.
    async fn put_record(&self, table: &str, record: &ResultRecord) -> Result<(), SnaplabelError>;
}
