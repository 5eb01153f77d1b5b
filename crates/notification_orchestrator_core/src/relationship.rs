use serde::{Deserialize, Serialize};

/// A caregiving link between a user account and the party they care for.
///
/// The serde representation is the camelCase shape downstream consumers read
/// from the notification queue. The table item shape is [`RelationshipItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Relationship {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    #[serde(rename = "primaryCareGiver")]
    pub primary_care_giver: bool,
    #[serde(rename = "emailNotifications")]
    pub email_notifications: bool,
}

impl Relationship {
    pub fn new(
        user_id: impl Into<String>,
        receiver_id: impl Into<String>,
        primary_care_giver: bool,
        email_notifications: bool,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            receiver_id: receiver_id.into(),
            primary_care_giver,
            email_notifications,
        }
    }

    fn links(&self, user_id: &str, receiver_id: &str) -> bool {
        self.user_id == user_id && self.receiver_id == receiver_id
    }
}

/// Relationship as stored in the relationship table. Attributes not listed
/// here (index keys, audit columns) are ignored on decode; absent flags
/// decode as `false`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RelationshipItem {
    pub user_id: String,
    pub receiver_id: String,
    #[serde(default)]
    pub primary_care_giver: bool,
    #[serde(default)]
    pub email_notifications: bool,
}

impl From<RelationshipItem> for Relationship {
    fn from(item: RelationshipItem) -> Self {
        Self {
            user_id: item.user_id,
            receiver_id: item.receiver_id,
            primary_care_giver: item.primary_care_giver,
            email_notifications: item.email_notifications,
        }
    }
}

pub fn is_a_caregiver(user_id: &str, receiver_id: &str, relationships: &[Relationship]) -> bool {
    relationships
        .iter()
        .any(|relationship| relationship.links(user_id, receiver_id))
}

pub fn is_a_primary_caregiver(
    user_id: &str,
    receiver_id: &str,
    relationships: &[Relationship],
) -> bool {
    relationships.iter().any(|relationship| {
        relationship.links(user_id, receiver_id) && relationship.primary_care_giver
    })
}
