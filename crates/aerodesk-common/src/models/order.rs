//! Flight orders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Flight, UserProfile};

/// Order status codes as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum OrderStatus {
    Completed,
    Cancelled,
    Unknown(i64),
}

impl From<i64> for OrderStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Completed,
            2 => Self::Cancelled,
            other => Self::Unknown(other),
        }
    }
}

impl From<OrderStatus> for i64 {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Completed => 1,
            OrderStatus::Cancelled => 2,
            OrderStatus::Unknown(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOrder {
    pub id: i64,
    pub user_id: i64,
    pub flight_id: i64,
    pub seat_no: String,
    pub status: OrderStatus,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub flight: Option<Flight>,
}

/// Flattened order + flight + passenger row from `GET /order/user/{id}/detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOrderDetail {
    pub order_id: i64,
    pub seat_no: String,
    pub status: OrderStatus,
    pub created_at: Option<NaiveDateTime>,
    pub user_id: i64,
    pub username: Option<String>,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub flight_id: i64,
    pub flight_no: Option<String>,
    pub departure_city: Option<String>,
    pub arrival_city: Option<String>,
    pub scheduled_departure_time: Option<NaiveDateTime>,
    pub scheduled_arrival_time: Option<NaiveDateTime>,
    pub airline: Option<String>,
    pub aircraft_type: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: i64,
    pub flight_id: i64,
    pub seat_no: String,
}
