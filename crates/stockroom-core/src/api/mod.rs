//! REST API client module for the inventory backend.
//!
//! `ApiClient` is the authenticated request layer: every call picks up the
//! session token on the way out, and any 401 on the way back ends the
//! session. The typed calls live in `auth` (login, register, current user)
//! and `products` (CRUD).

pub mod auth;
pub mod client;
pub mod error;
pub mod products;

pub use client::ApiClient;
pub use error::{extract_message, ApiError, SESSION_EXPIRED_MESSAGE};
