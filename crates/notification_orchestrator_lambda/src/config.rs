pub const LOCAL_ENV: &str = "local";

const DEFAULT_SQS_QUEUE_URL: &str =
    "https://sqs.us-east-1.amazonaws.com/123456789012/care-giver-notifications-local";

/// Process configuration resolved from the Lambda environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: String,
    pub user_table_name: String,
    pub relationship_table_name: String,
    pub sqs_queue_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves every setting through `lookup`, falling back to the local
    /// defaults for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: String| lookup(key).unwrap_or(default);

        Self {
            env: read("ENV", LOCAL_ENV.to_string()),
            user_table_name: read("USER_TABLE_NAME", format!("user-table-{LOCAL_ENV}")),
            relationship_table_name: read(
                "RELATIONSHIP_TABLE_NAME",
                format!("relationship-table-{LOCAL_ENV}"),
            ),
            sqs_queue_url: read("SQS_QUEUE_URL", DEFAULT_SQS_QUEUE_URL.to_string()),
        }
    }

    pub fn is_local(&self) -> bool {
        self.env == LOCAL_ENV
    }
}
