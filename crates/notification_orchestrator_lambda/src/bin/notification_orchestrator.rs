use std::sync::Arc;

use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use notification_orchestrator_core::aggregator::RelationshipRepository;
use notification_orchestrator_core::dispatch::{DispatchReport, NotificationOrchestrator};
use notification_orchestrator_lambda::adapters::aws::{dynamodb_client, load_sdk_config, sqs_client};
use notification_orchestrator_lambda::adapters::dynamo::DynamoRecordStore;
use notification_orchestrator_lambda::adapters::sqs::SqsQueuePublisher;
use notification_orchestrator_lambda::config::AppConfig;
use notification_orchestrator_lambda::handlers::scheduled::{
    dispatch_context_for_deadline, handle_scheduled_event, ScheduledEvent,
};
use notification_orchestrator_lambda::logging::init_logging;
use tracing::{error, info};

const FUNCTION_NAME: &str = "care-giver-notification-orchestrator";

type Orchestrator = NotificationOrchestrator<DynamoRecordStore, SqsQueuePublisher>;

/// Clients and configuration live for the whole process and are reused by
/// every invocation the runtime delivers to it.
async fn build_orchestrator(config: &AppConfig) -> Orchestrator {
    let sdk_config = load_sdk_config(config).await;

    info!(table_name = %config.relationship_table_name, "initializing relationship repository");
    let repository = RelationshipRepository::new(DynamoRecordStore::new(
        dynamodb_client(&sdk_config, config),
        config.relationship_table_name.clone(),
    ));

    NotificationOrchestrator::new(
        repository,
        SqsQueuePublisher::new(sqs_client(&sdk_config)),
        config.sqs_queue_url.clone(),
    )
}

async fn handle_request(
    orchestrator: &Orchestrator,
    event: LambdaEvent<ScheduledEvent>,
) -> Result<DispatchReport, Error> {
    let ctx = dispatch_context_for_deadline(event.context.deadline, Utc::now().timestamp_millis());

    handle_scheduled_event(&event.payload, orchestrator, &ctx)
        .await
        .map_err(|dispatch_error| {
            error!(error = %dispatch_error, "notification dispatch failed");
            Error::from(dispatch_error)
        })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!(env = %config.env, "initializing {FUNCTION_NAME}");

    let orchestrator = Arc::new(build_orchestrator(&config).await);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ScheduledEvent>| {
        let orchestrator = Arc::clone(&orchestrator);
        async move { handle_request(&orchestrator, event).await }
    }))
    .await
}
