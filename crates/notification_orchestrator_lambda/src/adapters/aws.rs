use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::config::{Credentials, Region};
use tracing::info;

use crate::config::AppConfig;

pub const AWS_REGION: &str = "us-east-2";
pub const LOCAL_DYNAMODB_ENDPOINT: &str = "http://dynamodb-local:8000";

/// Shared SDK configuration. The local environment uses static credentials;
/// their values are irrelevant to local DynamoDB.
pub async fn load_sdk_config(config: &AppConfig) -> SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(AWS_REGION));
    let loader = if config.is_local() {
        loader.credentials_provider(local_credentials())
    } else {
        loader
    };
    loader.load().await
}

fn local_credentials() -> Credentials {
    Credentials::new(
        "dummy",
        "dummy",
        Some("dummy".to_string()),
        None,
        "local-dynamodb",
    )
}

pub fn dynamodb_endpoint(config: &AppConfig) -> Option<&'static str> {
    config.is_local().then_some(LOCAL_DYNAMODB_ENDPOINT)
}

pub fn dynamodb_client(sdk_config: &SdkConfig, config: &AppConfig) -> aws_sdk_dynamodb::Client {
    let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);
    match dynamodb_endpoint(config) {
        Some(endpoint) => {
            info!(endpoint, "creating local dynamo db client");
            builder = builder.endpoint_url(endpoint);
        }
        None => info!("creating dynamo db client"),
    }
    aws_sdk_dynamodb::Client::from_conf(builder.build())
}

pub fn sqs_client(sdk_config: &SdkConfig) -> aws_sdk_sqs::Client {
    info!("creating sqs client");
    aws_sdk_sqs::Client::new(sdk_config)
}
