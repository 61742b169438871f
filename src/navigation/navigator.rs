use super::guard::{guard, NavigationDecision};
use super::route::{Location, RouteTable, HOME_PATH, LOGIN_PATH};
use crate::error::{ConsoleError, Result};
use crate::session::SessionStore;
use crate::transport::{UnauthorizedEvent, UnauthorizedHandler};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::{debug, info};

const MAX_REDIRECTS: usize = 8;

/// Tracks the current location and runs every transition through the guard.
///
/// Clones share state, so one clone can be registered as the transport's
/// unauthorized hook while another drives the UI.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<Inner>,
}

struct Inner {
    routes: RouteTable,
    session: SessionStore,
    current: ArcSwap<Location>,
}

impl Navigator {
    pub fn new(routes: RouteTable, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                routes,
                session,
                current: ArcSwap::from_pointee(Location::new(HOME_PATH)),
            }),
        }
    }

    pub fn console(session: SessionStore) -> Self {
        Self::new(RouteTable::console(), session)
    }

    pub fn current(&self) -> Location {
        Location::clone(&self.inner.current.load())
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    /// Where a navigation to `target` would land, without moving.
    pub fn resolve(&self, target: &str) -> Result<Location> {
        let mut location = Location::parse(target);

        for _ in 0..MAX_REDIRECTS {
            if let Some(redirect) = self
                .inner
                .routes
                .resolve(&location.path)
                .and_then(|route| route.redirect.as_deref())
            {
                location = Location::parse(redirect);
                continue;
            }

            let meta = self.inner.routes.meta_for(&location.path);
            match guard(&location, meta, self.inner.session.snapshot()) {
                NavigationDecision::Allow => return Ok(location),
                NavigationDecision::Redirect(next) => {
                    debug!("Guard redirected {} to {}", location, next);
                    location = next;
                }
            }
        }

        Err(ConsoleError::Navigation(format!(
            "too many redirects while resolving {}",
            target
        )))
    }

    pub fn navigate(&self, target: &str) -> Result<Location> {
        let location = self.resolve(target)?;
        debug!("Navigated to {}", location);
        self.inner.current.store(Arc::new(location.clone()));
        Ok(location)
    }

    /// Continues to the `redirect` target carried by the login location, or
    /// home when there is none.
    pub fn after_login(&self) -> Result<Location> {
        let current = self.current();
        let target = current
            .query_value("redirect")
            .filter(|target| target.starts_with('/'))
            .unwrap_or(HOME_PATH)
            .to_string();
        self.navigate(&target)
    }

    /// Moves to the login surface, remembering where the user was.
    pub fn force_login(&self) {
        let current = self.current();
        if current.is_login() {
            return;
        }
        let login = Location::new(LOGIN_PATH).with_query("redirect", &current.full_path());
        self.inner.current.store(Arc::new(login));
    }
}

impl UnauthorizedHandler for Navigator {
    fn on_unauthorized(&self, event: &UnauthorizedEvent) {
        info!(
            "Session rejected by {} {}, returning to login",
            event.method, event.path
        );
        self.force_login();
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current().full_path())
            .finish()
    }
}
