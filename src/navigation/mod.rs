//! Client-side route guard.
//!
//! [`guard`] is the pure decision for one transition; [`Navigator`] applies it
//! (following static redirects) and doubles as the transport's unauthorized
//! hook.

mod guard;
mod navigator;
mod route;

pub use guard::{guard, NavigationDecision};
pub use navigator::Navigator;
pub use route::{Location, Route, RouteMeta, RouteTable, HOME_PATH, LOGIN_PATH};
