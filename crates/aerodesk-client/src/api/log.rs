use aerodesk_common::models::{CleanLogsRequest, LogSearch, NewLog, SystemLog};
use chrono::NaiveDateTime;

use crate::error::Result;
use crate::rest::RestClient;

impl RestClient {
    pub async fn list_logs(&self) -> Result<Vec<SystemLog>> {
        self.get("/admin/log/list").await
    }

    pub async fn search_logs(&self, search: &LogSearch) -> Result<Vec<SystemLog>> {
        self.get_with("/admin/log/search", search).await
    }

    pub async fn get_log(&self, id: i64) -> Result<SystemLog> {
        self.get(&format!("/admin/log/{id}")).await
    }

    pub async fn add_log(&self, message: &str) -> Result<()> {
        self.post("/admin/log", &NewLog { message: message.to_owned() }).await
    }

    /// Delete every entry older than `before_time`; returns how many were removed.
    pub async fn clean_logs(&self, before_time: NaiveDateTime) -> Result<i64> {
        self.delete_with("/admin/log/clean", &CleanLogsRequest { before_time }).await
    }

    /// Raw export file contents.
    pub async fn export_logs(&self, search: &LogSearch) -> Result<Vec<u8>> {
        self.get_bytes("/admin/log/export", search).await
    }
}
