use aerodesk_common::models::{KnowledgeDocument, KnowledgeUpdate};

use crate::error::Result;
use crate::rest::{segment, RestClient};

impl RestClient {
    pub async fn create_knowledge(&self, doc: &KnowledgeDocument) -> Result<KnowledgeDocument> {
        self.post("/knowledge", doc).await
    }

    /// Title search.
    pub async fn search_knowledge(&self, keyword: &str) -> Result<Vec<KnowledgeDocument>> {
        self.get_with("/knowledge/search", &[("keyword", keyword)]).await
    }

    pub async fn update_knowledge(&self, id: &str, update: &KnowledgeUpdate) -> Result<()> {
        self.put(&format!("/knowledge/{}", segment(id)), update).await
    }

    pub async fn delete_knowledge(&self, id: &str) -> Result<()> {
        self.delete(&format!("/knowledge/{}", segment(id))).await
    }

    pub async fn list_knowledge(&self) -> Result<Vec<KnowledgeDocument>> {
        self.get("/knowledge").await
    }
}
