//! Data models for the inventory backend.
//!
//! - `Product`, `ProductDraft`: catalog entries and the editable form of one
//! - `UserProfile`, `Credentials`: who is logged in and how they log in
//! - `ValidationErrors`: per-field messages produced by form validation

pub mod product;
pub mod user;
pub mod validation;

pub use product::{filter_products, Product, ProductDraft};
pub use user::{Credentials, LoginResponse, UserProfile};
pub use validation::{Field, ValidationErrors};
