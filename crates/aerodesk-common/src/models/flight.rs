//! Flights and flight search.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A scheduled flight. `id` and the timestamps are assigned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub flight_no: String,
    pub airline: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub scheduled_departure_time: Option<NaiveDateTime>,
    pub scheduled_arrival_time: Option<NaiveDateTime>,
    pub aircraft_type: Option<String>,
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Query for `GET /flight/search`. Times are sent as ISO-8601 local date-times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
}
