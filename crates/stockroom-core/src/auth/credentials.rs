use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use super::cookie::CookieJar;
use super::storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, NullStore};
use crate::models::UserProfile;

/// Durable storage key (and cookie name) for the session token
pub const TOKEN_KEY: &str = "token";

/// Durable storage key for the cached user profile
pub const USER_KEY: &str = "user";

/// Lifetime of the token cookie in days
pub const TOKEN_COOKIE_DAYS: i64 = 7;

/// Persistence for the session token and the cached user profile.
///
/// The token is written twice: to the durable store and to an expiring
/// cookie. Reads prefer the durable copy and fall back to the cookie. The
/// two are never reconciled if they diverge.
///
/// Write failures are logged and swallowed so a broken store can never take
/// the UI down; the next read simply sees the old state.
pub struct CredentialStore {
    durable: Arc<dyn KeyValueStore>,
    cookies: CookieJar,
}

impl CredentialStore {
    pub fn new(durable: Arc<dyn KeyValueStore>, cookie_backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            durable,
            cookies: CookieJar::new(cookie_backend),
        }
    }

    /// Open the on-disk store in `data_dir` with the keychain as cookie jar.
    /// Without a data directory the store is detached.
    pub fn open(data_dir: Option<PathBuf>) -> Self {
        match data_dir {
            Some(dir) => {
                debug!(?dir, "Opening credential store");
                Self::new(Arc::new(FileStore::new(dir)), Arc::new(KeyringStore::new()))
            }
            None => {
                warn!("No data directory available, credentials will not be kept");
                Self::detached()
            }
        }
    }

    /// Store with no backing storage: always unauthenticated.
    pub fn detached() -> Self {
        Self::new(Arc::new(NullStore), Arc::new(NullStore))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// The stored token, if any. Empty values count as absent.
    pub fn token(&self) -> Option<String> {
        self.durable
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .or_else(|| self.cookies.get(TOKEN_KEY).filter(|t| !t.is_empty()))
    }

    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.durable.set(TOKEN_KEY, token) {
            warn!(error = %e, "Failed to persist token");
        }
        if let Err(e) = self
            .cookies
            .set(TOKEN_KEY, token, Duration::days(TOKEN_COOKIE_DAYS))
        {
            warn!(error = %e, "Failed to write token cookie");
        }
    }

    /// Forget the token (both copies) and the cached profile.
    pub fn remove_token(&self) {
        if let Err(e) = self.durable.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove persisted token");
        }
        if let Err(e) = self.durable.remove(USER_KEY) {
            warn!(error = %e, "Failed to remove cached user");
        }
        if let Err(e) = self.cookies.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove token cookie");
        }
    }

    /// The cached profile, if present and parseable.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.durable.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring unparseable cached user");
                None
            }
        }
    }

    pub fn set_user(&self, user: &UserProfile) {
        let raw = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize user");
                return;
            }
        };
        if let Err(e) = self.durable.set(USER_KEY, &raw) {
            warn!(error = %e, "Failed to persist user");
        }
    }

    /// Presence check only; the backend is the judge of validity.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
