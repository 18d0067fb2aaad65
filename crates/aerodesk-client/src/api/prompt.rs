use aerodesk_common::models::{PromptTemplate, PromptUpdate};

use crate::error::Result;
use crate::rest::{segment, RestClient};

impl RestClient {
    pub async fn create_prompt(&self, prompt: &PromptTemplate) -> Result<PromptTemplate> {
        self.post("/prompt", prompt).await
    }

    pub async fn get_prompt_by_name(&self, name: &str) -> Result<PromptTemplate> {
        self.get(&format!("/prompt/name/{}", segment(name))).await
    }

    pub async fn list_prompts(&self) -> Result<Vec<PromptTemplate>> {
        self.get("/prompt").await
    }

    pub async fn update_prompt(&self, id: &str, update: &PromptUpdate) -> Result<()> {
        self.put(&format!("/prompt/{}", segment(id)), update).await
    }

    pub async fn delete_prompt(&self, id: &str) -> Result<()> {
        self.delete(&format!("/prompt/{}", segment(id))).await
    }
}
