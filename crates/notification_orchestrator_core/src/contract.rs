use serde::{Deserialize, Serialize};

use crate::relationship::Relationship;

pub const REMINDER_NOTIFICATION_TYPE: &str = "reminder";
pub const EMAIL_CHANNEL: &str = "email";

/// Index queried for notification-eligible relationships.
pub const EMAIL_NOTIFICATIONS_INDEX: &str = "email_notifications";
/// Partition key of [`EMAIL_NOTIFICATIONS_INDEX`]; eligible items carry `1`.
pub const EMAIL_NOTIFICATIONS_INDEX_KEY: &str = "email_notifications_gsi_pk";
pub const EMAIL_NOTIFICATIONS_ELIGIBLE: i64 = 1;

/// One unit of dispatch work, serialized onto the notification queue.
///
/// Field names and nesting are read by the delivery consumers and must stay
/// stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationEnvelope {
    pub notification_type: String,
    #[serde(rename = "channel")]
    pub channels: Vec<String>,
    pub execution_data: ReminderExecutionData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderExecutionData {
    pub relationship: Relationship,
}

impl NotificationEnvelope {
    pub fn relationship(&self) -> &Relationship {
        &self.execution_data.relationship
    }

    pub fn to_wire(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_wire(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

pub fn to_envelope(relationship: Relationship) -> NotificationEnvelope {
    NotificationEnvelope {
        notification_type: REMINDER_NOTIFICATION_TYPE.to_string(),
        channels: vec![EMAIL_CHANNEL.to_string()],
        execution_data: ReminderExecutionData { relationship },
    }
}
