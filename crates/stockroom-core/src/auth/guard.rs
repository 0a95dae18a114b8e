use tracing::debug;

use super::session::Session;
use crate::navigation::Route;

/// Where a guard stands after its last activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Not yet evaluated. Nothing is rendered.
    Checking,
    /// A token was present at activation. Children render.
    Authenticated,
    /// No token at activation. A redirect to login was issued and nothing
    /// renders.
    Redirecting,
}

/// Gate in front of a protected page.
///
/// The check runs once per activation, not continuously. A token removed
/// while the page is showing is noticed on the next activation or on the
/// next 401.
#[derive(Debug)]
pub struct SessionGuard {
    state: GuardState,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGuard {
    pub fn new() -> Self {
        Self {
            state: GuardState::Checking,
        }
    }

    /// Evaluate the session. Issues exactly one navigation to the login page
    /// when there is no token.
    /// The check is synchronous, so `Checking` is never observable
    /// after this returns.
    pub fn activate(&mut self, session: &Session) -> GuardState {
        self.state = if session.is_authenticated() {
            GuardState::Authenticated
        } else {
            debug!("No session, redirecting to login");
            session.navigate(Route::Login);
            GuardState::Redirecting
        };
        self.state
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn renders_children(&self) -> bool {
        self.state == GuardState::Authenticated
    }

    /// Run `children` only when authenticated.
    pub fn render<T>(&self, children: impl FnOnce() -> T) -> Option<T> {
        if self.renders_children() {
            Some(children())
        } else {
            None
        }
    }
}

/// For guest-only pages (login, register): send a visitor who already has a
/// session to the product list. Returns true when a redirect was issued.
pub fn redirect_if_authenticated(session: &Session) -> bool {
    if session.is_authenticated() {
        session.navigate(Route::Products);
        true
    } else {
        false
    }
}

/// Where the home page sends a visitor.
pub fn landing_route(session: &Session) -> Route {
    if session.is_authenticated() {
        Route::Products
    } else {
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::CredentialStore;
    use crate::navigation::RecordingNavigator;

    fn session() -> (Session, Arc<RecordingNavigator>) {
        let nav = Arc::new(RecordingNavigator::new());
        (Session::new(CredentialStore::in_memory(), nav.clone()), nav)
    }

    #[test]
    fn test_starts_checking_and_renders_nothing() {
        let guard = SessionGuard::new();
        assert_eq!(guard.state(), GuardState::Checking);
        assert!(!guard.renders_children());
        assert_eq!(guard.render(|| "page"), None);
    }

    #[test]
    fn test_empty_store_redirects_once() {
        let (session, nav) = session();
        let mut guard = SessionGuard::new();

        assert_eq!(guard.activate(&session), GuardState::Redirecting);
        assert_eq!(nav.routes(), vec![Route::Login]);
        assert!(!guard.renders_children());

        let mut mounted = false;
        guard.render(|| mounted = true);
        assert!(!mounted);
    }

    #[test]
    fn test_token_present_renders_children() {
        let (session, nav) = session();
        session.init("abc123", None);
        let mut guard = SessionGuard::new();

        assert_eq!(guard.activate(&session), GuardState::Authenticated);
        assert_eq!(guard.render(|| "page"), Some("page"));
        assert!(nav.routes().is_empty());
    }

    #[test]
    fn test_state_is_not_reevaluated_until_reactivated() {
        let (session, nav) = session();
        session.init("abc123", None);
        let mut guard = SessionGuard::new();
        guard.activate(&session);

        session.clear();
        assert!(guard.renders_children());
        assert!(nav.routes().is_empty());

        assert_eq!(guard.activate(&session), GuardState::Redirecting);
        assert_eq!(nav.routes(), vec![Route::Login]);
    }

    #[test]
    fn test_redirect_if_authenticated() {
        let (session, nav) = session();
        assert!(!redirect_if_authenticated(&session));
        assert!(nav.routes().is_empty());

        session.init("abc123", None);
        assert!(redirect_if_authenticated(&session));
        assert_eq!(nav.routes(), vec![Route::Products]);
    }

    #[test]
    fn test_landing_route() {
        let (session, _) = session();
        assert_eq!(landing_route(&session), Route::Login);
        session.init("abc123", None);
        assert_eq!(landing_route(&session), Route::Products);
    }
}
