//! Authentication module for managing the client-side session.
//!
//! This module provides:
//! - `KeyValueStore` backends: a JSON file, the OS keychain, memory
//! - `CookieJar`: expiring entries layered over a store
//! - `CredentialStore`: token and cached profile persistence
//! - `Session`: the shared, explicitly owned session object
//! - `SessionGuard`: the gate in front of protected pages
//!
//! A token's presence means "believed authenticated". There is no local
//! expiry check; the backend decides on every request.

pub mod cookie;
pub mod credentials;
pub mod guard;
pub mod session;
pub mod storage;

pub use cookie::CookieJar;
pub use credentials::CredentialStore;
pub use guard::{landing_route, redirect_if_authenticated, GuardState, SessionGuard};
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, NullStore};
