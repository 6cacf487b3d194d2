//! Navigation guard.
//!
//! A pure function of the current session and the route's access class.
//! It performs no I/O and holds no state; forced sign-out on idle expiry
//! is the watchdog's job, which feeds its result back through here by
//! re-evaluating navigation with the cleared session.

use super::model::{GuardDecision, HOME_ROUTE, LOGIN_ROUTE, RouteAccess};
use crate::session::Session;
use once_cell::sync::Lazy;

/// Route table, most specific prefix first.
///
/// `/admin/login` must precede `/admin` so the admin sign-in form stays
/// reachable without a session.
static ROUTE_TABLE: Lazy<Vec<(&'static str, RouteAccess)>> = Lazy::new(|| {
    vec![
        ("/auth/login", RouteAccess::Public),
        ("/auth/signup", RouteAccess::Public),
        ("/admin/login", RouteAccess::Public),
        ("/admin", RouteAccess::AdminOnly),
        ("/aihelpcentre", RouteAccess::Protected),
        ("/chat", RouteAccess::Protected),
    ]
});

/// Classifies a path by longest matching table prefix.
///
/// Unlisted paths are public, matching the application's routing where
/// everything outside the guarded subtrees renders without a session.
pub fn classify(path: &str) -> RouteAccess {
    ROUTE_TABLE
        .iter()
        .filter(|(prefix, _)| {
            path == *prefix
                || (path.starts_with(prefix) && path[prefix.len()..].starts_with('/'))
        })
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, access)| *access)
        .unwrap_or(RouteAccess::Public)
}

/// Decides whether the session may enter the route.
///
/// - Unauthenticated access to a protected or admin route redirects to the
///   login route.
/// - Authenticated non-admin access to an admin-only route redirects to
///   the default authenticated landing route.
/// - Every other combination is allowed.
pub fn evaluate(path: &str, session: &Session) -> GuardDecision {
    match classify(path) {
        RouteAccess::Public => GuardDecision::Allow,
        RouteAccess::Protected => {
            if session.is_authenticated() {
                GuardDecision::Allow
            } else {
                GuardDecision::Redirect(LOGIN_ROUTE)
            }
        }
        RouteAccess::AdminOnly => {
            if !session.is_authenticated() {
                GuardDecision::Redirect(LOGIN_ROUTE)
            } else if session.is_admin() {
                GuardDecision::Allow
            } else {
                GuardDecision::Redirect(HOME_ROUTE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{User, UserRole};

    fn session_with_role(role: UserRole) -> Session {
        Session::authenticated(
            User {
                id: "u-1".to_string(),
                email: "sam@example.com".to_string(),
                name: "Sam".to_string(),
                role,
                is_active: None,
                created_at: None,
                last_login: None,
            },
            "tok".to_string(),
            0,
        )
    }

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(classify("/"), RouteAccess::Public);
        assert_eq!(classify("/auth/login"), RouteAccess::Public);
        assert_eq!(classify("/chat/billing"), RouteAccess::Protected);
        assert_eq!(classify("/aihelpcentre"), RouteAccess::Protected);
        assert_eq!(classify("/admin/metrics"), RouteAccess::AdminOnly);
        // The admin login form is public even though it shares the prefix.
        assert_eq!(classify("/admin/login"), RouteAccess::Public);
        // Prefix matching is segment-aware.
        assert_eq!(classify("/chattanooga"), RouteAccess::Public);
    }

    #[test]
    fn test_unauthenticated_protected_redirects_to_login() {
        let session = Session::unauthenticated(0);
        assert_eq!(
            evaluate("/chat/billing", &session),
            GuardDecision::Redirect(LOGIN_ROUTE)
        );
        assert_eq!(
            evaluate("/admin/users", &session),
            GuardDecision::Redirect(LOGIN_ROUTE)
        );
    }

    #[test]
    fn test_non_admin_on_admin_route_redirects_home() {
        let session = session_with_role(UserRole::User);
        assert_eq!(
            evaluate("/admin/users", &session),
            GuardDecision::Redirect(HOME_ROUTE)
        );
        // But regular protected routes are fine.
        assert_eq!(evaluate("/chat/billing", &session), GuardDecision::Allow);
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        let session = session_with_role(UserRole::Admin);
        assert_eq!(evaluate("/admin/logs", &session), GuardDecision::Allow);
        assert_eq!(evaluate("/aihelpcentre", &session), GuardDecision::Allow);
        assert_eq!(evaluate("/", &session), GuardDecision::Allow);
    }

    #[test]
    fn test_public_routes_never_redirect() {
        let session = Session::unauthenticated(0);
        assert_eq!(evaluate("/", &session), GuardDecision::Allow);
        assert_eq!(evaluate("/auth/signup", &session), GuardDecision::Allow);
        assert_eq!(evaluate("/admin/login", &session), GuardDecision::Allow);
    }
}
