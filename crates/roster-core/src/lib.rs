//! State layer between `roster-api` and UI consumers.
//!
//! - **[`UserListController`]**: owns the user list screen state and its
//!   lifecycle: [`mount()`](UserListController::mount) starts the one
//!   cancellable list fetch, [`unmount()`](UserListController::unmount)
//!   aborts it. Add, update and delete apply optimistically and roll back
//!   to the pre-operation snapshot when the API rejects them.
//!
//! - **[`ScreenState`]**: the observable `users` / `error` / `loading`
//!   triple, published through a `tokio::sync::watch` channel.
//!
//! - **[`ClientConfig`]**: runtime connection settings. Core never reads
//!   config files; the CLI builds one and hands it in.

pub mod config;
pub mod controller;
pub mod error;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use controller::UserListController;
pub use error::CoreError;
pub use state::ScreenState;

pub use roster_api::{Address, User};
