//! Error taxonomy for calls against the reporting backend.
//!
//! ERROR HANDLING
//! ==============
//! Transport problems and HTTP-level rejections are kept apart so the
//! session machine can decide between "redirect to sign-in" (authentication
//! failures) and "let the user retry" (connection failures).

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure returned by any backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    /// The server answered 200 but flagged the request as failed in the
    /// response envelope.
    #[error("{0}")]
    Service(String),
    /// The request never produced a server answer (network down, timeout,
    /// or running outside a browser).
    #[error("connection error: {0}")]
    Network(String),
}

impl ApiError {
    /// Whether this failure means the session is no longer valid.
    ///
    /// Classified by a 401 status or an "Unauthorized"-flavoured message,
    /// since some gateway layers rewrite the status but keep the text.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Status { status: 401, .. } => true,
            Self::Status { message, .. } | Self::Service(message) => {
                unauthorized_signature(message)
            }
            Self::Network(_) => false,
        }
    }
}

/// Message-based fallback classification for authentication failures.
fn unauthorized_signature(message: &str) -> bool {
    message.contains("401")
        || message.contains("Unauthorized")
        || message.contains("No authenticated user")
}
