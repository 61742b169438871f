use super::route::{Location, RouteMeta, HOME_PATH, LOGIN_PATH};
use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(Location),
}

/// Decides a single route transition from local state only.
///
/// A present token is taken at face value here; a token the server no
/// longer accepts is caught by the transport's 401 handling on the first
/// credentialed call the view makes.
pub fn guard(target: &Location, meta: RouteMeta, session: SessionState) -> NavigationDecision {
    if meta.requires_auth {
        if !session.authenticated {
            return NavigationDecision::Redirect(
                Location::new(LOGIN_PATH).with_query("redirect", &target.full_path()),
            );
        }
        if meta.requires_admin && !session.admin {
            return NavigationDecision::Redirect(Location::new(HOME_PATH));
        }
        return NavigationDecision::Allow;
    }

    if session.authenticated && target.is_login() {
        return NavigationDecision::Redirect(Location::new(HOME_PATH));
    }

    NavigationDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANON: SessionState = SessionState {
        authenticated: false,
        admin: false,
    };
    const USER: SessionState = SessionState {
        authenticated: true,
        admin: false,
    };
    const ADMIN: SessionState = SessionState {
        authenticated: true,
        admin: true,
    };

    fn redirect_of(decision: NavigationDecision) -> Location {
        match decision {
            NavigationDecision::Redirect(location) => location,
            NavigationDecision::Allow => panic!("expected a redirect"),
        }
    }

    #[test]
    fn test_protected_route_without_session_redirects_to_login() {
        for raw in ["/", "/services", "/mcp/management?id=4", "/unknown/page"] {
            let target = Location::parse(raw);
            let location = redirect_of(guard(&target, RouteMeta::default(), ANON));
            assert_eq!(location.path, "/login");
            assert_eq!(location.query_value("redirect"), Some(target.full_path().as_str()));
        }
    }

    #[test]
    fn test_protected_route_with_session_is_allowed() {
        let target = Location::parse("/services");
        assert_eq!(
            guard(&target, RouteMeta::default(), USER),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn test_authenticated_user_cannot_reenter_login() {
        let target = Location::parse("/login?redirect=%2Fservices");
        let location = redirect_of(guard(&target, RouteMeta::public(), USER));
        assert_eq!(location, Location::new("/"));
    }

    #[test]
    fn test_public_routes_are_allowed() {
        let login = Location::parse("/login");
        assert_eq!(guard(&login, RouteMeta::public(), ANON), NavigationDecision::Allow);

        let about = Location::parse("/about");
        assert_eq!(guard(&about, RouteMeta::public(), ANON), NavigationDecision::Allow);
        assert_eq!(guard(&about, RouteMeta::public(), USER), NavigationDecision::Allow);
    }

    #[test]
    fn test_nested_login_path_is_not_treated_as_login() {
        let target = Location::parse("/login/help");
        assert_eq!(
            guard(&target, RouteMeta::public(), USER),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn test_admin_routes() {
        let target = Location::parse("/users");
        assert_eq!(guard(&target, RouteMeta::admin(), ADMIN), NavigationDecision::Allow);
        assert_eq!(
            redirect_of(guard(&target, RouteMeta::admin(), USER)),
            Location::new("/")
        );
        assert_eq!(
            redirect_of(guard(&target, RouteMeta::admin(), ANON)).path,
            "/login"
        );
    }
}
