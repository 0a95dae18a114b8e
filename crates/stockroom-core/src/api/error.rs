use reqwest::StatusCode;
use thiserror::Error;

/// Message shown for a 401 on any product call.
pub const SESSION_EXPIRED_MESSAGE: &str = "Authentication required. Please log in again.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("{message}")]
    Server { status: StatusCode, message: String },

    #[error("{context}")]
    Network {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Maximum length for raw text error bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data around
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Build the error for a non-success response.
    /// `fallback` is the operation message used when the body says nothing.
    pub fn from_status(status: StatusCode, body: &str, fallback: &str) -> Self {
        let message = extract_message(status, body).unwrap_or_else(|| fallback.to_string());
        match status.as_u16() {
            401 => ApiError::Unauthorized(message),
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Rejected { status, message },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ApiError::Rejected { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Network { source, .. } => source.status(),
            ApiError::InvalidResponse(_) | ApiError::InvalidRequest(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Replace the message of a 401 with a fixed one, leaving other errors alone.
    pub(crate) fn with_unauthorized_message(self, message: &str) -> Self {
        match self {
            ApiError::Unauthorized(_) => ApiError::Unauthorized(message.to_string()),
            other => other,
        }
    }
}

/// Best-effort human readable message from an error body.
///
/// A plain text body (or a JSON string) is used as-is. A JSON object
/// contributes its `message`, else its `error`. Any other JSON gets a
/// generic `Server error (<status>)`. An empty body gives `None`.
pub fn extract_message(status: StatusCode, body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: serde_json::Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return Some(ApiError::truncate_body(trimmed)),
    };

    match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Object(ref fields) => {
            let field = |name: &str| {
                fields
                    .get(name)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            Some(
                field("message")
                    .or_else(|| field("error"))
                    .unwrap_or_else(|| generic_message(status)),
            )
        }
        _ => Some(generic_message(status)),
    }
}

fn generic_message(status: StatusCode) -> String {
    format!("Server error ({})", status.as_u16())
}
