use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, tracing, Error};
use tracing_subscriber::EnvFilter;

mod error;
mod event_handler;
mod naming;
mod notification;
mod storage;
mod thumbnail;
mod transform;

use event_handler::function_handler;
use storage::S3;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let s3 = S3::new(S3Client::new(&shared_config));
    run(service_fn(|event| function_handler(event, &s3))).await
}
