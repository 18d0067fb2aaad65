use aerodesk_common::models::{Flight, FlightSearch};

use crate::error::Result;
use crate::rest::{segment, RestClient};

impl RestClient {
    pub async fn list_flights(&self) -> Result<Vec<Flight>> {
        self.get("/flight/list").await
    }

    pub async fn get_flight(&self, id: i64) -> Result<Flight> {
        self.get(&format!("/flight/{id}")).await
    }

    pub async fn get_flight_by_no(&self, flight_no: &str) -> Result<Flight> {
        self.get(&format!("/flight/no/{}", segment(flight_no))).await
    }

    pub async fn search_flights(&self, search: &FlightSearch) -> Result<Vec<Flight>> {
        self.get_with("/flight/search", search).await
    }

    pub async fn list_flights_by_airline(&self, airline: &str) -> Result<Vec<Flight>> {
        self.get(&format!("/flight/airline/{}", segment(airline))).await
    }

    pub async fn add_flight(&self, flight: &Flight) -> Result<Flight> {
        self.post("/flight", flight).await
    }

    pub async fn update_flight(&self, id: i64, flight: &Flight) -> Result<Flight> {
        self.put(&format!("/flight/{id}"), flight).await
    }

    pub async fn delete_flight(&self, id: i64) -> Result<()> {
        self.delete(&format!("/flight/{id}")).await
    }
}
