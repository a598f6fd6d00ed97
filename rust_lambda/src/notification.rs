use aws_lambda_events::event::s3::S3EventRecord;

use crate::error::TransformError;

/// A single object-created record, as delivered by S3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadNotification {
    pub bucket: String,
    /// Key exactly as it appears in the event: percent-encoded, spaces as `+`.
    pub raw_key: String,
    pub event_name: Option<String>,
    pub size: Option<i64>,
}

impl UploadNotification {
    #[cfg(test)]
    pub fn new(bucket: impl Into<String>, raw_key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            raw_key: raw_key.into(),
            event_name: None,
            size: None,
        }
    }

    pub fn from_record(record: &S3EventRecord) -> Result<Self, TransformError> {
        let raw_key = record
            .s3
            .object
            .key
            .clone()
            .ok_or_else(|| TransformError::InvalidKey {
                key: String::new(),
                reason: "no object key in record".to_string(),
            })?;
        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or_else(|| TransformError::InvalidKey {
                key: raw_key.clone(),
                reason: "no bucket name in record".to_string(),
            })?;

        Ok(Self {
            bucket,
            raw_key,
            event_name: record.event_name.clone(),
            size: record.s3.object.size,
        })
    }

    /// The logical object key. `+` is replaced before decoding so that an
    /// encoded `%2B` still decodes to a literal plus.
    pub fn decoded_key(&self) -> Result<String, TransformError> {
        let key = self.raw_key.replace('+', " ");
        urlencoding::decode(&key)
            .map(|decoded| decoded.into_owned())
            .map_err(|e| TransformError::InvalidKey {
                key: self.raw_key.clone(),
                reason: e.to_string(),
            })
    }
}
