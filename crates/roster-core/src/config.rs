// ── Runtime connection configuration ──
//
// Describes *where* the users API lives and how to talk to it.
// Never touches disk: the CLI constructs a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use roster_api::transport::{TlsMode, TransportConfig};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed dev servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single users API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the `users` collection is resolved against.
    pub api_url: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Translate into the api crate's transport settings.
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
