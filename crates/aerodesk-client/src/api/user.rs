use aerodesk_common::models::{ModifyPasswordRequest, UserProfile, UserUpdate};

use crate::error::Result;
use crate::rest::RestClient;

impl RestClient {
    pub async fn get_user_info(&self, id: i64) -> Result<UserProfile> {
        self.get(&format!("/user/{id}")).await
    }

    pub async fn update_user_info(&self, id: i64, update: &UserUpdate) -> Result<()> {
        self.put(&format!("/user/{id}"), update).await
    }

    /// A wrong old password comes back as a 401 that leaves the session intact.
    pub async fn modify_password(&self, request: &ModifyPasswordRequest) -> Result<()> {
        self.post("/user/modifyPassword", request).await
    }
}
