use aerodesk_common::models::{ConversationIndex, NewConversation, TransferRequest};

use crate::error::Result;
use crate::rest::{segment, RestClient};

impl RestClient {
    pub async fn get_conversation(&self, uuid: &str) -> Result<ConversationIndex> {
        self.get(&format!("/conversation/{}", segment(uuid))).await
    }

    pub async fn list_conversations_by_user(&self, user_id: i64) -> Result<Vec<ConversationIndex>> {
        self.get(&format!("/conversation/user/{user_id}")).await
    }

    /// Conversations handed over to one service agent.
    pub async fn list_conversations_by_service_user(
        &self,
        service_user_id: i64,
    ) -> Result<Vec<ConversationIndex>> {
        self.get(&format!("/conversation/service/{service_user_id}")).await
    }

    /// The user's open conversation, if any.
    pub async fn get_active_conversation(&self, user_id: i64) -> Result<Option<ConversationIndex>> {
        self.get(&format!("/conversation/user/{user_id}/active")).await
    }

    pub async fn create_conversation(&self, request: &NewConversation) -> Result<ConversationIndex> {
        self.post("/conversation", request).await
    }

    pub async fn transfer_to_service(&self, uuid: &str, service_user_id: i64) -> Result<()> {
        self.put(
            &format!("/conversation/{}/transfer", segment(uuid)),
            &TransferRequest { service_user_id },
        )
        .await
    }

    pub async fn close_conversation(&self, uuid: &str) -> Result<()> {
        self.put_empty(&format!("/conversation/{}/close", segment(uuid))).await
    }

    pub async fn list_all_conversations(&self) -> Result<Vec<ConversationIndex>> {
        self.get("/conversation/admin/list").await
    }
}
