//! Navigation policy for protected views.

use crate::session::SessionManager;

/// A navigable view that may require a signed-in session.
pub trait GuardedRoute {
    fn is_protected(&self) -> bool;
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Render the login entry point instead of the requested view.
    RedirectToLogin,
}

/// Decides whether a route may be rendered for the current session.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    session: SessionManager,
}

impl RouteGuard {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    pub fn allow<R: GuardedRoute + ?Sized>(&self, route: &R) -> bool {
        !route.is_protected() || self.session.is_authenticated()
    }

    pub fn check<R: GuardedRoute + ?Sized>(&self, route: &R) -> Access {
        if self.allow(route) {
            Access::Allow
        } else {
            Access::RedirectToLogin
        }
    }
}

#[cfg(test)]
mod tests {
    use store::{MemorySessionStore, SessionStore};

    use super::*;
    use crate::test_support::{admin, client_for};

    enum Page {
        Home,
        Upload,
    }

    impl GuardedRoute for Page {
        fn is_protected(&self) -> bool {
            matches!(self, Page::Upload)
        }
    }

    fn guard(store: &MemorySessionStore) -> RouteGuard {
        // Nothing is dispatched, the base URL is never contacted
        let client = client_for("http://127.0.0.1:9", store.clone());
        RouteGuard::new(SessionManager::new(client))
    }

    #[test]
    fn test_protected_route_requires_session() {
        let store = MemorySessionStore::new();
        let guard = guard(&store);

        assert!(!guard.allow(&Page::Upload));
        assert_eq!(guard.check(&Page::Upload), Access::RedirectToLogin);

        store.save("t1", &admin()).unwrap();
        assert!(guard.allow(&Page::Upload));
        assert_eq!(guard.check(&Page::Upload), Access::Allow);
    }

    #[test]
    fn test_open_route_always_allowed() {
        let store = MemorySessionStore::new();
        let guard = guard(&store);
        assert!(guard.allow(&Page::Home));

        store.save("t1", &admin()).unwrap();
        assert!(guard.allow(&Page::Home));
    }

    #[test]
    fn test_guard_follows_logout() {
        let store = MemorySessionStore::new();
        store.save("t1", &admin()).unwrap();
        let guard = guard(&store);
        assert!(guard.allow(&Page::Upload));

        guard.session.logout();
        assert!(!guard.allow(&Page::Upload));
    }
}
