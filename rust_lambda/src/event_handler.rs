use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{tracing, Error, LambdaEvent};

use crate::notification::UploadNotification;
use crate::storage::S3;
use crate::transform::{self, Processed};

/// Handles an S3 upload event. Only the first record is processed.
///
/// Always returns `Ok(())`: a failed record is logged and dropped rather than
/// handed back to the runtime for redelivery.
#[tracing::instrument(skip(event, s3), fields(request_id = %event.context.request_id))]
pub(crate) async fn function_handler(event: LambdaEvent<S3Event>, s3: &S3) -> Result<(), Error> {
    let payload = event.payload;
    let Some(record) = payload.records.first() else {
        tracing::warn!("No records found in S3 event");
        return Ok(());
    };
    if payload.records.len() > 1 {
        tracing::warn!(
            record_count = payload.records.len(),
            "ignoring all but the first record"
        );
    }

    let notification = match UploadNotification::from_record(record) {
        Ok(notification) => notification,
        Err(e) => {
            tracing::error!(error=?e, "unusable S3 record");
            return Ok(());
        }
    };
    tracing::info!(
        bucket=%notification.bucket,
        key=%notification.raw_key,
        event_name=?notification.event_name,
        size=?notification.size,
        "processing record"
    );

    match transform::process(s3, &notification).await {
        Ok(Processed::Written {
            bucket,
            key,
            width,
            height,
            bytes,
        }) => {
            tracing::info!(bucket=%bucket, key=%key, width, height, bytes, "thumbnail written");
        }
        Ok(Processed::Skipped(reason)) => {
            tracing::info!(reason=%reason, "no thumbnail produced");
        }
        // already logged where it failed
        Err(e) => {
            tracing::debug!(error=%e, "dropping record");
        }
    }
    Ok(())
}
