//! Audit log entries written by the backend.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLog {
    pub id: i64,
    pub operator_id: Option<i64>,
    pub class_name: Option<String>,
    pub method_name: Option<String>,
    /// Milliseconds spent in the logged call.
    pub execution_time: Option<i64>,
    pub message: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Query for log search and export, sent as flat query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLog {
    pub message: String,
}

/// Body of `DELETE /admin/log/clean`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanLogsRequest {
    pub before_time: NaiveDateTime,
}
