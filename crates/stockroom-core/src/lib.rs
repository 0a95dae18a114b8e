//! Stockroom core library.
//!
//! Everything a front end needs to talk to the inventory backend:
//!
//! - `auth`: credential storage, the shared `Session` and the `SessionGuard`
//! - `api`: the authenticated `ApiClient` and its typed auth/product calls
//! - `navigation`: `Route`s and the `Navigator` seam front ends implement
//! - `models`: products, user profiles and form validation
//! - `config`: persisted settings and the backend base URL

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod navigation;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{CredentialStore, GuardState, Session, SessionGuard};
pub use config::Config;
pub use navigation::{Navigator, Route};
