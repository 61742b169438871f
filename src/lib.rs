//! Client library for the Synapse management console.
//!
//! The console talks to a REST backend that manages OpenAPI services,
//! endpoint combinations, MCP servers and users. This crate holds the client
//! half: a persisted bearer-token session, an authenticated transport that
//! expires the session on a 401, typed resource clients, and the route guard
//! that decides where a navigation lands.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod transport;
pub mod types;

pub use api::ConsoleClient;
pub use error::{ConsoleError, Result};
