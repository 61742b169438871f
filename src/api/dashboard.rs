use crate::error::Result;
use crate::transport::{ApiRequest, ApiTransport};
use crate::types::DashboardStats;

pub struct DashboardApi<'a> {
    transport: &'a ApiTransport,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.transport
            .send(
                ApiRequest::get("/api/v1/dashboard/stats")
                    .fallback("Failed to fetch dashboard stats"),
            )
            .await
    }
}
