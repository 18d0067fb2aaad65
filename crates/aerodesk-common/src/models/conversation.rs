//! Customer-service conversations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Index row for one conversation; the message history lives server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationIndex {
    pub id: Option<i64>,
    pub user_id: i64,
    pub conversation_uuid: String,
    pub last_message: Option<String>,
    /// e.g. `active`, `transferred`, `closed`
    pub status: Option<String>,
    pub service_user_id: Option<i64>,
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub service_user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConversation {
    pub user_id: i64,
    pub initial_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub service_user_id: i64,
}
