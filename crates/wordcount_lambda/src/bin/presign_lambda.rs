use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use wordcount_core::contract::PresignResponse;
use wordcount_lambda::aws::s3::S3UploadPresigner;
use wordcount_lambda::config::IssuerConfig;
use wordcount_lambda::handlers::issuer::handle_presign_event;
use wordcount_lambda::telemetry;

async fn handle_request(
    event: LambdaEvent<Value>,
    presigner: &S3UploadPresigner,
) -> Result<PresignResponse, Error> {
    Ok(handle_presign_event(&event.payload, presigner))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = IssuerConfig::from_env()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let presigner = S3UploadPresigner::new(aws_sdk_s3::Client::new(&aws_config), config.bucket);

    lambda_runtime::run(service_fn(|event| handle_request(event, &presigner))).await
}
