//! Authenticated HTTP transport.
//!
//! Every resource client goes through [`ApiTransport`]: it injects the bearer
//! token from the session, classifies failures and, on a 401, clears the
//! session and runs the registered [`UnauthorizedHandler`] before failing the
//! call with [`ConsoleError::Unauthorized`](crate::error::ConsoleError::Unauthorized).

mod client;
mod request;

pub use client::{build_headers, classify_failure, ApiTransport};
pub use request::{ApiRequest, DEFAULT_FALLBACK};

use reqwest::Method;

/// The request whose 401 answer expired the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedEvent {
    pub method: Method,
    pub path: String,
}

/// Hook the embedding application registers to react to session expiry,
/// typically by navigating to the login surface. Runs after the session has
/// been cleared and before the failing call returns.
pub trait UnauthorizedHandler: Send + Sync + 'static {
    fn on_unauthorized(&self, event: &UnauthorizedEvent);
}

impl<F> UnauthorizedHandler for F
where
    F: Fn(&UnauthorizedEvent) + Send + Sync + 'static,
{
    fn on_unauthorized(&self, event: &UnauthorizedEvent) {
        self(event)
    }
}
