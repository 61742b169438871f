use crate::error::Result;
use crate::transport::{ApiRequest, ApiTransport};
use crate::types::{Service, ServiceCreate, ServiceUpdate};

pub struct ServicesApi<'a> {
    transport: &'a ApiTransport,
}

impl<'a> ServicesApi<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Service>> {
        self.transport
            .send(ApiRequest::get("/api/v1/services").fallback("Failed to fetch services"))
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Service> {
        self.transport
            .send(
                ApiRequest::get(format!("/api/v1/services/{id}"))
                    .fallback("Failed to fetch service"),
            )
            .await
    }

    pub async fn create(&self, service: &ServiceCreate) -> Result<Service> {
        let request = ApiRequest::post("/api/v1/services")
            .json(service)?
            .fallback("Failed to create service");
        self.transport.send(request).await
    }

    pub async fn update(&self, id: i64, update: &ServiceUpdate) -> Result<Service> {
        let request = ApiRequest::put(format!("/api/v1/services/{id}"))
            .json(update)?
            .fallback("Failed to update service");
        self.transport.send(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .send_empty(
                ApiRequest::delete(format!("/api/v1/services/{id}"))
                    .fallback("Failed to delete service"),
            )
            .await
    }
}
