//! Admin dashboard overview.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub today_flights: i64,
    pub today_orders: i64,
    pub active_users: i64,
    pub service_tickets: i64,
    /// Day labels for the series below, oldest first.
    pub dates: Vec<String>,
    pub daily_flights: Vec<i64>,
    pub daily_orders: Vec<i64>,
}
