/// Failures that stop a record from producing a thumbnail.
///
/// None of these are surfaced to the Lambda runtime. The handler logs them and
/// reports success so the event is not redelivered.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("invalid object key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },
    #[error("unable to fetch {bucket}/{key}")]
    FetchFailed {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("unable to resize {key}: {reason}")]
    DecodeOrResizeFailed { key: String, reason: String },
    #[error("unable to store {bucket}/{key}")]
    StoreFailed {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },
}
