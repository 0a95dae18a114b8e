use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{Field, ValidationErrors};

/// Minimum username length for new accounts.
const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length for new accounts.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Snapshot of the logged-in user, cached next to the token for display.
/// Never re-validated against the backend, so it may be stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    /// Profile known only by username, as after a login that returns just a token.
    pub fn from_username(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
        }
    }
}

/// Username and password, used as the login and register request body.
#[derive(Clone, Default, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Rules for the login form: both fields present.
    pub fn validate_login(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.username.trim().is_empty() {
            errors.add(Field::Username, "Username is required");
        }
        if self.password.is_empty() {
            errors.add(Field::Password, "Password is required");
        }
        errors.into_result()
    }

    /// Rules for the register form: presence plus minimum lengths.
    pub fn validate_registration(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.username.trim().is_empty() {
            errors.add(Field::Username, "Username is required");
        } else if self.username.chars().count() < MIN_USERNAME_LENGTH {
            errors.add(
                Field::Username,
                format!("Username must be at least {} characters", MIN_USERNAME_LENGTH),
            );
        }

        if self.password.is_empty() {
            errors.add(Field::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                Field::Password,
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
        }

        errors.into_result()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parses_full_and_partial() {
        let full: UserProfile =
            serde_json::from_str(r#"{"id": 3, "username": "ana", "email": "ana@example.com"}"#)
                .unwrap();
        assert_eq!(full.id, Some(3));
        assert_eq!(full.email.as_deref(), Some("ana@example.com"));

        let partial: UserProfile = serde_json::from_str(r#"{"username": "ana"}"#).unwrap();
        assert_eq!(partial, UserProfile::from_username("ana"));
    }

    #[test]
    fn test_profile_round_trips_without_empty_fields() {
        let json = serde_json::to_string(&UserProfile::from_username("bo")).unwrap();
        assert_eq!(json, r#"{"username":"bo"}"#);
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("ana", "hunter22");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ana"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_login_validation() {
        assert!(Credentials::new("ana", "x").validate_login().is_ok());

        let errors = Credentials::new("   ", "").validate_login().unwrap_err();
        assert_eq!(errors.get(Field::Username), Some("Username is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
    }

    #[test]
    fn test_registration_validation() {
        assert!(Credentials::new("ana", "secret").validate_registration().is_ok());

        let errors = Credentials::new("al", "12345").validate_registration().unwrap_err();
        assert_eq!(
            errors.get(Field::Username),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );

        let errors = Credentials::new("", "").validate_registration().unwrap_err();
        assert_eq!(errors.get(Field::Username), Some("Username is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
    }
}
