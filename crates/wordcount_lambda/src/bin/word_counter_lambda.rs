use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{info, warn};
use wordcount_core::stopwords::{LanguageLoad, StopWords, DEFAULT_LANGUAGES};
use wordcount_lambda::aws::appsync::AppSyncNotifier;
use wordcount_lambda::aws::s3::S3UploadStore;
use wordcount_lambda::aws::sqs::SqsWriteQueue;
use wordcount_lambda::config::ProcessorConfig;
use wordcount_lambda::handlers::processor::{
    handle_s3_event, ProcessorResponse, ProcessorSettings,
};
use wordcount_lambda::telemetry;

struct RuntimeDependencies {
    settings: ProcessorSettings,
    stop_words: StopWords,
    store: S3UploadStore,
    notifier: AppSyncNotifier,
    queue: SqsWriteQueue,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<ProcessorResponse, Error> {
    let response = handle_s3_event(
        &event.payload,
        &deps.settings,
        &deps.stop_words,
        &deps.store,
        &deps.notifier,
        &deps.queue,
    )?;
    Ok(response)
}

fn load_stop_words(config: &ProcessorConfig) -> Result<StopWords, Error> {
    let load = StopWords::load_dir(&config.stopwords_dir, &DEFAULT_LANGUAGES)?;
    for language in &load.languages {
        match language {
            LanguageLoad::Loaded { language, words } => {
                info!(
                    component = "word_counter",
                    event = "stopwords_loaded",
                    language = %language,
                    words = *words,
                );
            }
            LanguageLoad::Missing { language } => {
                warn!(
                    component = "word_counter",
                    event = "stopwords_missing",
                    language = %language,
                );
            }
        }
    }
    Ok(load.stop_words)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = ProcessorConfig::from_env()?;
    let stop_words = load_stop_words(&config)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        settings: config.settings(),
        stop_words,
        store: S3UploadStore::new(aws_sdk_s3::Client::new(&aws_config)),
        notifier: AppSyncNotifier::new(&aws_config, &config.appsync_endpoint, &config.region)?,
        queue: SqsWriteQueue::new(aws_sdk_sqs::Client::new(&aws_config), &config.queue_url),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
