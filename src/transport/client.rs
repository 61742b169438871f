use super::request::ApiRequest;
use super::{UnauthorizedEvent, UnauthorizedHandler};
use crate::config::ApiConfig;
use crate::error::{ConfigError, ConsoleError, Result};
use crate::session::SessionStore;
use arc_swap::ArcSwapOption;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

struct HandlerSlot(Box<dyn UnauthorizedHandler>);

struct Inner {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
    on_unauthorized: ArcSwapOption<HandlerSlot>,
}

/// The single chokepoint for credentialed calls to the console backend.
///
/// Cheap to clone; clones share the HTTP connection pool, the session and the
/// registered unauthorized hook. Requests never retry, never time out on
/// their own and are independent of each other.
#[derive(Clone)]
pub struct ApiTransport {
    inner: Arc<Inner>,
}

impl ApiTransport {
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    pub fn from_config(config: &ApiConfig, session: SessionStore) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder.build()?;
        Self::with_client(client, &config.base_url, session)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, session: SessionStore) -> Result<Self> {
        url::Url::parse(base_url).map_err(|e| {
            ConfigError::Validation(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                session,
                on_unauthorized: ArcSwapOption::empty(),
            }),
        })
    }

    /// Registers the hook run after a 401 has cleared the session. Replaces
    /// any previously registered hook.
    pub fn set_unauthorized_handler<H: UnauthorizedHandler>(&self, handler: H) {
        self.inner
            .on_unauthorized
            .store(Some(Arc::new(HandlerSlot(Box::new(handler)))));
    }

    pub fn clear_unauthorized_handler(&self) {
        self.inner.on_unauthorized.store(None);
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Sends the request and decodes the JSON body.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Sends the request and discards whatever body comes back.
    pub async fn send_empty(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: ApiRequest) -> Result<Bytes> {
        let url = self.url_for(&request.path)?;
        let token = if request.public {
            None
        } else {
            self.inner.session.current_token()
        };
        let headers = build_headers(token.as_deref(), &request.headers)?;

        let mut builder = self
            .inner
            .client
            .request(request.method.clone(), url)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "Received response"
        );

        if status.is_success() {
            return Ok(body);
        }

        if status == StatusCode::UNAUTHORIZED && !request.public {
            self.expire_session(&request);
            return Err(ConsoleError::Unauthorized);
        }

        Err(classify_failure(status, &body, &request.fallback))
    }

    fn expire_session(&self, request: &ApiRequest) {
        tracing::warn!(
            "Session rejected by server on {} {}, clearing local session",
            request.method,
            request.path
        );

        if let Err(e) = self.inner.session.clear() {
            tracing::error!("Failed to clear session after 401: {}", e);
        }

        if let Some(slot) = self.inner.on_unauthorized.load_full() {
            let event = UnauthorizedEvent {
                method: request.method.clone(),
                path: request.path.clone(),
            };
            slot.0.on_unauthorized(&event);
        }
    }

    fn url_for(&self, path: &str) -> Result<url::Url> {
        if !path.starts_with('/') {
            return Err(ConsoleError::InvalidRequest(format!(
                "request path must start with '/': {path}"
            )));
        }
        let joined = format!("{}{}", self.inner.base_url, path);
        url::Url::parse(&joined)
            .map_err(|e| ConsoleError::InvalidRequest(format!("invalid URL '{joined}': {e}")))
    }
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session)
            .finish()
    }
}

/// `Content-Type: application/json`, then the bearer token when present,
/// then caller overrides, which win on conflict.
pub fn build_headers(token: Option<&str>, overrides: &HeaderMap) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ConsoleError::InvalidRequest("session token is not a valid header value".to_string())
        })?;
        headers.insert(AUTHORIZATION, value);
    }

    for name in overrides.keys() {
        headers.remove(name);
    }
    for (name, value) in overrides.iter() {
        headers.append(name.clone(), value.clone());
    }

    Ok(headers)
}

/// Turns a non-2xx answer into a `Rejected` error.
///
/// Unparseable bodies yield `fallback`. Parsed bodies yield their `detail`
/// when present, else `HTTP error, status=<code>`.
pub fn classify_failure(status: StatusCode, body: &[u8], fallback: &str) -> ConsoleError {
    let message = match serde_json::from_slice::<Value>(body) {
        Ok(parsed) => match parsed.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                format!("HTTP error, status={}", status.as_u16())
            }
            Some(other) => other.to_string(),
        },
        Err(_) => fallback.to_string(),
    };

    ConsoleError::Rejected {
        status: status.as_u16(),
        message,
    }
}
