use aerodesk_common::models::DashboardData;

use crate::error::Result;
use crate::rest::RestClient;

impl RestClient {
    pub async fn dashboard_overview(&self) -> Result<DashboardData> {
        self.get("/dashboard/overview").await
    }
}
