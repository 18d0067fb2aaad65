use aerodesk_common::models::{FlightOrder, FlightOrderDetail, NewOrder};

use crate::error::Result;
use crate::rest::RestClient;

impl RestClient {
    pub async fn get_order(&self, id: i64) -> Result<FlightOrder> {
        self.get(&format!("/order/{id}")).await
    }

    pub async fn list_orders_by_user(&self, user_id: i64) -> Result<Vec<FlightOrder>> {
        self.get(&format!("/order/user/{user_id}")).await
    }

    /// Orders joined with flight and passenger details.
    pub async fn list_order_details(&self, user_id: i64) -> Result<Vec<FlightOrderDetail>> {
        self.get(&format!("/order/user/{user_id}/detail")).await
    }

    pub async fn list_orders_by_flight(&self, flight_id: i64) -> Result<Vec<FlightOrder>> {
        self.get(&format!("/order/flight/{flight_id}")).await
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<FlightOrder> {
        self.post("/order", order).await
    }

    pub async fn cancel_order(&self, id: i64) -> Result<()> {
        self.put_empty(&format!("/order/{id}/cancel")).await
    }

    /// Every order on the platform (administrators).
    pub async fn list_all_orders(&self) -> Result<Vec<FlightOrder>> {
        self.get("/order/admin/list").await
    }
}
