use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use wordcount_core::contract::TopWordEntry;
use wordcount_lambda::aws::dynamodb::DynamoWordCountTable;
use wordcount_lambda::config::ReaderConfig;
use wordcount_lambda::handlers::reader::handle_top_words_event;
use wordcount_lambda::telemetry;

async fn handle_request(
    event: LambdaEvent<Value>,
    table: &DynamoWordCountTable,
) -> Result<Vec<TopWordEntry>, Error> {
    Ok(handle_top_words_event(&event.payload, table)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = ReaderConfig::from_env()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let table = DynamoWordCountTable::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name,
        config.index_name,
    );

    lambda_runtime::run(service_fn(|event| handle_request(event, &table))).await
}
