// ── Core error types ──
//
// Errors returned to callers of the controller. The message an operation
// leaves on the screen is the transport error's own text; these variants
// carry the classification the CLI needs for diagnostics and exit codes.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach users API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Users API request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("User not found: {identifier}")]
    NotFound { identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered).
        status: Option<u16>,
    },

    #[error("Request canceled")]
    Cancelled,

    #[error("User list is not mounted")]
    NotMounted,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Map a failed request about user `id`; a 404 names that user.
    pub(crate) fn for_user(err: roster_api::Error, id: i64) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                identifier: id.to_string(),
            }
        } else {
            err.into()
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<roster_api::Error> for CoreError {
    fn from(err: roster_api::Error) -> Self {
        match err {
            roster_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            roster_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            roster_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            roster_api::Error::Cancelled => CoreError::Cancelled,
            roster_api::Error::Api { status: 404, .. } => CoreError::NotFound {
                identifier: "requested user".into(),
            },
            roster_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            roster_api::Error::Task(msg) => CoreError::Internal(msg),
            roster_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_api_errors() {
        let err = CoreError::from(roster_api::Error::Api {
            status: 503,
            message: "maintenance".into(),
        });
        assert!(
            matches!(
                err,
                CoreError::Api {
                    status: Some(503),
                    ..
                }
            ),
            "got {err:?}"
        );

        let err = CoreError::from(roster_api::Error::Api {
            status: 404,
            message: String::new(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn user_not_found_carries_id() {
        let err = CoreError::for_user(
            roster_api::Error::Api {
                status: 404,
                message: "Not Found".into(),
            },
            7,
        );
        assert!(
            matches!(&err, CoreError::NotFound { identifier } if identifier == "7"),
            "got {err:?}"
        );

        let err = CoreError::for_user(roster_api::Error::Cancelled, 7);
        assert!(err.is_cancelled());
    }

    #[test]
    fn cancellation_survives_mapping() {
        assert!(CoreError::from(roster_api::Error::Cancelled).is_cancelled());
    }
}
