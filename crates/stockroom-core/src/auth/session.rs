use std::sync::Arc;

use tracing::{debug, info};

use super::credentials::CredentialStore;
use crate::models::UserProfile;
use crate::navigation::{Navigator, Route};

/// The client-side session: credential storage plus the means to send the
/// user back to the login page.
///
/// One `Session` is created at startup and shared as `Arc<Session>` with the
/// API client, the guards and the pages.
pub struct Session {
    store: CredentialStore,
    navigator: Arc<dyn Navigator>,
}

impl Session {
    pub fn new(store: CredentialStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Start a session after a successful login.
    ///
    /// Token first, then profile. There is no transaction: if the profile
    /// write fails the token is still valid and the profile stays absent.
    pub fn init(&self, token: &str, user: Option<&UserProfile>) {
        self.store.set_token(token);
        if let Some(user) = user {
            self.store.set_user(user);
        }
        info!(username = ?user.map(|u| u.username.as_str()), "Session started");
    }

    /// Drop the token and cached profile without navigating.
    pub fn clear(&self) {
        self.store.remove_token();
        debug!("Session cleared");
    }

    /// End the session and go to the login page.
    ///
    /// Every path that ends a session goes through here.
    pub fn logout(&self) {
        self.clear();
        info!("Logged out");
        self.navigator.navigate(Route::Login);
    }

    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.store.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;

    fn session() -> (Session, Arc<RecordingNavigator>) {
        let nav = Arc::new(RecordingNavigator::new());
        (Session::new(CredentialStore::in_memory(), nav.clone()), nav)
    }

    #[test]
    fn test_init_stores_token_and_user() {
        let (session, nav) = session();
        session.init("abc123", Some(&UserProfile::from_username("ana")));

        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert_eq!(session.user().map(|u| u.username), Some("ana".to_string()));
        assert!(nav.routes().is_empty());
    }

    #[test]
    fn test_init_without_user_leaves_profile_absent() {
        let (session, _) = session();
        session.init("abc123", None);
        assert!(session.is_authenticated());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_clear_does_not_navigate() {
        let (session, nav) = session();
        session.init("abc123", None);
        session.clear();
        assert!(!session.is_authenticated());
        assert!(nav.routes().is_empty());
    }

    #[test]
    fn test_logout_clears_and_navigates_to_login() {
        let (session, nav) = session();
        session.init("abc123", Some(&UserProfile::from_username("ana")));

        session.logout();

        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
        assert_eq!(nav.routes(), vec![Route::Login]);
    }
}
