// roster-api: Async Rust client for a REST `/users` collection

pub mod client;
pub mod error;
pub mod fetch;
pub mod models;
pub mod transport;

pub use client::UsersClient;
pub use error::Error;
pub use fetch::{CancelHandle, PendingRequest};
pub use models::{Address, User};
pub use transport::{TlsMode, TransportConfig};
