use crate::error::Result;
use crate::transport::{ApiRequest, ApiTransport};
use crate::types::{UserCreate, UserList, UserProfile, UserUpdate};

/// Account management. Every endpoint is admin-only on the server.
pub struct UsersApi<'a> {
    transport: &'a ApiTransport,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// Server defaults apply when `skip`/`limit` are omitted (0 and 100).
    pub async fn list(&self, skip: Option<u32>, limit: Option<u32>) -> Result<UserList> {
        let mut request = ApiRequest::get("/api/v1/users").fallback("Failed to fetch users");
        if let Some(skip) = skip {
            request = request.query("skip", skip);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        self.transport.send(request).await
    }

    pub async fn get(&self, id: i64) -> Result<UserProfile> {
        self.transport
            .send(ApiRequest::get(format!("/api/v1/users/{id}")).fallback("Failed to fetch user"))
            .await
    }

    pub async fn create(&self, user: &UserCreate) -> Result<UserProfile> {
        let request = ApiRequest::post("/api/v1/users")
            .json(user)?
            .fallback("Failed to create user");
        self.transport.send(request).await
    }

    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<UserProfile> {
        let request = ApiRequest::put(format!("/api/v1/users/{id}"))
            .json(update)?
            .fallback("Failed to update user");
        self.transport.send(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .send_empty(
                ApiRequest::delete(format!("/api/v1/users/{id}")).fallback("Failed to delete user"),
            )
            .await
    }
}
