//! AWS-backed implementations of the service traits.
//!
//! One shared `SdkConfig` (region + default credential chain) feeds all
//! three clients. Clients are constructed explicitly and handed to the
//! recorder; nothing here reads ambient state beyond the AWS provider
//! chain itself.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_rekognition::types::{Image, S3Object};
use aws_sdk_s3::primitives::ByteStream;

use crate::config::DetectionConfig;
use crate::error::SnaplabelError;
use crate::model::{Label, ResultRecord};
use crate::services::{LabelDetector, ObjectStore, RecordStore};

// ============================================================================
// S3 object store
// ============================================================================

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(conf: &SdkConfig, bucket: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(conf),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<(), SnaplabelError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| SnaplabelError::Upload {
                key: key.to_string(),
                message: format!("{}", aws_sdk_s3::error::DisplayErrorContext(e)),
            })?;

        tracing::debug!(bucket = %self.bucket, key = %key, "object stored");
        Ok(())
    }
}

// ============================================================================
// Rekognition label detector
// ============================================================================

pub struct RekognitionDetector {
    client: aws_sdk_rekognition::Client,
    bucket: String,
    max_labels: i32,
    min_confidence: f32,
}

impl RekognitionDetector {
    pub fn new(conf: &SdkConfig, bucket: impl Into<String>, detection: &DetectionConfig) -> Self {
        Self {
            client: aws_sdk_rekognition::Client::new(conf),
            bucket: bucket.into(),
            max_labels: detection.max_labels,
            min_confidence: detection.min_confidence,
        }
    }
}

#[async_trait]
impl LabelDetector for RekognitionDetector {
    async fn detect_labels(&self, key: &str) -> Result<Vec<Label>, SnaplabelError> {
        let object = S3Object::builder().bucket(&self.bucket).name(key).build();
        let image = Image::builder().s3_object(object).build();

        let resp = self
            .client
            .detect_labels()
            .image(image)
            .max_labels(self.max_labels)
            .min_confidence(self.min_confidence)
            .send()
            .await
            .map_err(|e| SnaplabelError::Detection {
                key: key.to_string(),
                message: format!("{}", aws_sdk_rekognition::error::DisplayErrorContext(e)),
            })?;

        // Service order is preserved; entries without a name or score are
        // dropped rather than stored half-empty.
        let labels: Vec<Label> = resp
            .labels
            .unwrap_or_default()
            .into_iter()
            .filter_map(|l| match (l.name, l.confidence) {
                (Some(name), Some(confidence)) => Some(Label::new(name, confidence)),
                _ => None,
            })
            .collect();

        tracing::debug!(key = %key, count = labels.len(), "labels detected");
        Ok(labels)
    }
}

// ============================================================================
// DynamoDB record store
// ============================================================================

pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoRecordStore {
    pub fn new(conf: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_dynamodb::Client::new(conf),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_record(&self, table: &str, record: &ResultRecord) -> Result<(), SnaplabelError> {
        let labels_json = record.labels_json()?;

        // PutItem is the upsert: same filename replaces the prior item.
        self.client
            .put_item()
            .table_name(table)
            .item("filename", AttributeValue::S(record.filename.clone()))
            .item("timestamp", AttributeValue::S(record.timestamp_iso8601()))
            .item("labels", AttributeValue::S(labels_json))
            .item("branch", AttributeValue::S(record.branch.clone()))
            .send()
            .await
            .map_err(|e| SnaplabelError::Persist {
                table: table.to_string(),
                message: format!("{}", aws_sdk_dynamodb::error::DisplayErrorContext(e)),
            })?;

        tracing::debug!(table = %table, filename = %record.filename, "record stored");
        Ok(())
    }
}
