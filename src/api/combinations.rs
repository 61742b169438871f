use crate::error::Result;
use crate::transport::{ApiRequest, ApiTransport};
use crate::types::{ActivationStatus, Combination, CombinationCreate, CombinationUpdate};

pub struct CombinationsApi<'a> {
    transport: &'a ApiTransport,
}

impl<'a> CombinationsApi<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Combination>> {
        self.transport
            .send(ApiRequest::get("/api/v1/combinations").fallback("Failed to fetch combinations"))
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Combination> {
        self.transport
            .send(
                ApiRequest::get(format!("/api/v1/combinations/{id}"))
                    .fallback("Failed to fetch combination"),
            )
            .await
    }

    pub async fn create(&self, combination: &CombinationCreate) -> Result<Combination> {
        let request = ApiRequest::post("/api/v1/combinations")
            .json(combination)?
            .fallback("Failed to create combination");
        self.transport.send(request).await
    }

    pub async fn update(&self, id: i64, update: &CombinationUpdate) -> Result<Combination> {
        let request = ApiRequest::put(format!("/api/v1/combinations/{id}"))
            .json(update)?
            .fallback("Failed to update combination");
        self.transport.send(request).await
    }

    /// Sets only the status through the narrow status endpoint; other fields
    /// are not sent and cannot be clobbered.
    pub async fn set_status(&self, id: i64, status: ActivationStatus) -> Result<Combination> {
        let request = ApiRequest::patch(format!("/api/v1/combinations/{id}/status"))
            .query("status", status)
            .fallback("Failed to update combination status");
        self.transport.send(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .send_empty(
                ApiRequest::delete(format!("/api/v1/combinations/{id}"))
                    .fallback("Failed to delete combination"),
            )
            .await
    }
}
