use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use wordcount_core::sharding::ShardPolicy;
use wordcount_lambda::aws::dynamodb::DynamoWordCountTable;
use wordcount_lambda::config::{WriterConfig, DEFAULT_INDEX_NAME};
use wordcount_lambda::handlers::writer::handle_sqs_event;
use wordcount_lambda::telemetry;

struct RuntimeDependencies {
    shard_policy: ShardPolicy,
    table: DynamoWordCountTable,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<Value, Error> {
    let summary = handle_sqs_event(
        &event.payload,
        &deps.shard_policy,
        &deps.table,
        &mut rand::thread_rng(),
    )?;
    Ok(json!({ "status": "ok", "summary": summary }))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = WriterConfig::from_env()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        shard_policy: config.shard_policy,
        table: DynamoWordCountTable::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name,
            DEFAULT_INDEX_NAME,
        ),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
