use thiserror::Error;

/// Top-level error type for the `roster-api` crate.
///
/// Covers every failure mode of the `/users` transport. `roster-core`
/// maps these into the messages shown on the user list.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    ///
    /// Displayed as the bare message shown to users; the reqwest error is
    /// kept as the source.
    #[error("Network Error")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The request was aborted through its cancellation token.
    #[error("Request canceled")]
    Cancelled,

    /// The task driving a spawned request panicked or was aborted.
    #[error("Request task failed: {0}")]
    Task(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status from the users API.
    #[error("Request failed with status code {status}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request was aborted by its caller rather
    /// than failing on its own.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_is_distinguishable() {
        assert!(Error::Cancelled.is_cancelled());
        let api = Error::Api {
            status: 500,
            message: String::new(),
        };
        assert!(!api.is_cancelled());
    }

    #[test]
    fn api_status_message_and_lookup() {
        let err = Error::Api {
            status: 404,
            message: "missing".into(),
        };
        assert_eq!(err.to_string(), "Request failed with status code 404");
        assert!(err.is_not_found());
    }
}
