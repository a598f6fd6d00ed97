use lambda_runtime::tracing;

use crate::error::TransformError;
use crate::naming::{destination_bucket, destination_key};
use crate::notification::UploadNotification;
use crate::storage::S3;
use crate::thumbnail::{self, ImageKind, SkipReason};

/// What happened to a record that did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum Processed {
    Written {
        bucket: String,
        key: String,
        width: u32,
        height: u32,
        bytes: usize,
    },
    Skipped(SkipReason),
}

/// Fetches the uploaded image, resizes it and writes the thumbnail to the
/// derived destination. Each failure is logged where it happens.
#[tracing::instrument(
    skip(s3, notification),
    fields(bucket = %notification.bucket, raw_key = %notification.raw_key)
)]
pub async fn process(
    s3: &S3,
    notification: &UploadNotification,
) -> Result<Processed, TransformError> {
    let source_bucket = notification.bucket.as_str();
    let source_key = notification
        .decoded_key()
        .inspect_err(|e| tracing::error!(error=?e, "unable to decode key"))?;

    let kind = match ImageKind::from_key(&source_key) {
        Ok(kind) => kind,
        Err(reason) => {
            tracing::info!(key=%source_key, reason=%reason, "skipping object");
            return Ok(Processed::Skipped(reason));
        }
    };

    let dest_bucket = destination_bucket(source_bucket);
    let dest_key = destination_key(&source_key);

    let source = s3
        .get(source_bucket, &source_key)
        .await
        .map_err(|source| TransformError::FetchFailed {
            bucket: source_bucket.to_string(),
            key: source_key.clone(),
            source,
        })
        .inspect_err(|e| tracing::error!(error=?e, "unable to fetch source image"))?;

    tracing::trace!(
        size = source.body.len(),
        content_type = ?source.content_type,
        "source image retrieved"
    );

    let body = source.body;
    let thumb = tokio::task::spawn_blocking(move || thumbnail::generate(&body, kind))
        .await
        .map_err(|e| format!("resize task panicked: {e}"))
        .and_then(|generated| generated.map_err(|e| e.to_string()))
        .map_err(|reason| TransformError::DecodeOrResizeFailed {
            key: source_key.clone(),
            reason,
        })
        .inspect_err(|e| tracing::error!(error=?e, "unable to resize image"))?;

    let (width, height, bytes) = (thumb.width, thumb.height, thumb.data.len());
    s3.put(&dest_bucket, &dest_key, thumb.data, thumb.kind.content_type())
        .await
        .map_err(|source| TransformError::StoreFailed {
            bucket: dest_bucket.clone(),
            key: dest_key.clone(),
            source,
        })
        .inspect_err(|e| tracing::error!(error=?e, "unable to store thumbnail"))?;

    tracing::info!(
        "resized {}/{} and uploaded to {}/{}",
        source_bucket,
        source_key,
        dest_bucket,
        dest_key
    );

    Ok(Processed::Written {
        bucket: dest_bucket,
        key: dest_key,
        width,
        height,
        bytes,
    })
}
