use crate::error::Result;
use crate::transport::{ApiRequest, ApiTransport};
use crate::types::{LoginRequest, LoginResponse, MessageResponse, UserProfile};

pub struct AuthApi<'a> {
    transport: &'a ApiTransport,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// Exchanges credentials for a token and stores token and profile in
    /// the session. Wrong credentials surface as a rejection carrying the
    /// server's message; the existing session is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let request = ApiRequest::post("/api/v1/auth/login")
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })?
            .public()
            .fallback("Login failed");

        let response: LoginResponse = self.transport.send(request).await?;
        self.transport
            .session()
            .save(&response.access_token, &response.user)?;

        tracing::info!(
            "Logged in as {} ({:?})",
            response.user.username,
            response.user.role
        );
        Ok(response)
    }

    pub async fn current_user(&self) -> Result<UserProfile> {
        self.transport
            .send(ApiRequest::get("/api/v1/auth/me").fallback("Failed to fetch current user"))
            .await
    }

    /// Notifies the server only. Clearing the local session is up to the
    /// caller.
    pub async fn logout(&self) -> Result<MessageResponse> {
        self.transport
            .send(ApiRequest::post("/api/v1/auth/logout").fallback("Logout failed"))
            .await
    }
}
