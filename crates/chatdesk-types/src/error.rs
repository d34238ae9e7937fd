use thiserror::Error;

/// Failure of a single call against the conversation backend.
///
/// Every failure is terminal for the user action that caused it; nothing
/// in chatdesk retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response; `message` is the server's `error` field when it sent one
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body does not match the endpoint schema
    #[error("Malformed response from {endpoint}: {detail}")]
    Malformed {
        endpoint: &'static str,
        detail: String,
    },
}

impl ClientError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ClientError::Transport(err.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
