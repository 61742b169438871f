use url::form_urlencoded;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Per-route access requirements. Routes require a session unless marked
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl Default for RouteMeta {
    fn default() -> Self {
        Self {
            requires_auth: true,
            requires_admin: false,
        }
    }
}

impl RouteMeta {
    pub fn public() -> Self {
        Self {
            requires_auth: false,
            requires_admin: false,
        }
    }

    pub fn admin() -> Self {
        Self {
            requires_auth: true,
            requires_admin: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
    /// Static redirect applied before any guard runs.
    pub redirect: Option<String>,
}

impl Route {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            meta: RouteMeta::default(),
            redirect: None,
        }
    }

    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn redirect_to(mut self, path: &str) -> Self {
        self.redirect = Some(path.to_string());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// The console's own views.
    pub fn console() -> Self {
        Self::new()
            .with(Route::new(LOGIN_PATH, "Login").meta(RouteMeta::public()))
            .with(Route::new(HOME_PATH, "Home"))
            .with(Route::new("/services", "Services"))
            .with(Route::new("/mcp", "Mcp").redirect_to("/mcp/combination"))
            .with(Route::new("/mcp/combination", "McpCombination"))
            .with(Route::new("/mcp/management", "McpManagement"))
            .with(Route::new("/users", "Users").meta(RouteMeta::admin()))
    }

    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.path == path)
    }

    /// Unknown paths get the default metadata, so they require a session.
    pub fn meta_for(&self, path: &str) -> RouteMeta {
        self.resolve(path).map(|route| route.meta).unwrap_or_default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// A navigation target: path plus decoded query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            query: Vec::new(),
        }
    }

    /// Parses `/path?key=value#fragment`; the fragment is dropped and an
    /// empty path becomes `/`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };

        let path = if path.is_empty() { HOME_PATH } else { path };
        Self {
            path: path.to_string(),
            query: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }

    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let location = Location::parse("/services?tab=all&q=pet%20store#top");
        assert_eq!(location.path, "/services");
        assert_eq!(location.query_value("tab"), Some("all"));
        assert_eq!(location.query_value("q"), Some("pet store"));
        assert_eq!(location.query_value("missing"), None);

        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("?x=1").path, "/");
    }

    #[test]
    fn test_full_path_round_trip() {
        let location = Location::new("/login").with_query("redirect", "/mcp/management?id=3");
        let parsed = Location::parse(&location.full_path());
        assert_eq!(parsed, location);
        assert_eq!(Location::new("/services").full_path(), "/services");
    }

    #[test]
    fn test_login_match_is_literal() {
        assert!(Location::parse("/login?redirect=%2F").is_login());
        assert!(!Location::parse("/login/").is_login());
        assert!(!Location::parse("/auth/login").is_login());
    }

    #[test]
    fn test_console_table() {
        let table = RouteTable::console();
        assert!(!table.meta_for("/login").requires_auth);
        assert!(table.meta_for("/services").requires_auth);
        assert!(table.meta_for("/services/").requires_auth);
        assert!(table.meta_for("/users").requires_admin);
        assert_eq!(
            table.resolve("/mcp").unwrap().redirect.as_deref(),
            Some("/mcp/combination")
        );
        // unknown routes default to requiring a session
        assert_eq!(table.meta_for("/does-not-exist"), RouteMeta::default());
    }
}
