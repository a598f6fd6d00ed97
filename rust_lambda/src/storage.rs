use anyhow::Context;
use aws_sdk_s3::primitives::ByteStream;
use lambda_runtime::tracing;

/// An object fetched from S3.
#[derive(Debug)]
pub struct SourceObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Thin wrapper over the S3 client. Built once per process and shared by
/// reference across invocations.
#[derive(Clone, Debug)]
pub struct S3 {
    inner: aws_sdk_s3::Client,
}

impl S3 {
    pub fn new(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// Retrieves the provided key from the bucket.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, bucket: &str, key: &str) -> anyhow::Result<SourceObject> {
        let resp = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context(format!("could not get item {key} from bucket {bucket}"))?;

        let content_type = resp.content_type.clone();
        let body = resp
            .body
            .collect()
            .await
            .context("could not collect body")?;
        Ok(SourceObject {
            body: body.into_bytes().to_vec(),
            content_type,
        })
    }

    /// Puts the provided content into the bucket at the provided key.
    #[tracing::instrument(skip(self, content), fields(size = content.len()))]
    pub async fn put(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()> {
        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(content))
            .content_type(content_type)
            .send()
            .await
            .context(format!("could not put item {key} into bucket {bucket}"))?;
        Ok(())
    }
}
