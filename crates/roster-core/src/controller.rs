// ── User list controller ──
//
// Owns the user list screen state: one cancellable list fetch per mount,
// and optimistic add / update / delete that roll back to the snapshot
// taken before the edit when the API rejects it.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use roster_api::{Address, User, UsersClient};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::state::{self, ScreenState};

/// City written by [`UserListController::update`].
pub const UPDATED_CITY: &str = "islamabad";

/// Record created by [`UserListController::add`].
pub fn default_draft() -> User {
    User::new(
        User::UNASSIGNED_ID,
        "hamza",
        "hamza@gmail.com",
        Address::new("f 26", "karachi"),
    )
}

// ── Controller ───────────────────────────────────────────────────

/// The user list screen.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Operations never fail
/// silently: each failure rolls the list back, records the message in
/// [`ScreenState::error`] and is also returned to the caller.
#[derive(Clone)]
pub struct UserListController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    client: UsersClient,
    state: watch::Sender<ScreenState>,
    mounted: Mutex<Option<Mounted>>,
}

/// Cancellation scope of one mount.
struct Mounted {
    cancel: CancellationToken,
    load: Option<JoinHandle<()>>,
}

impl UserListController {
    /// Create a controller from configuration. Does NOT fetch --
    /// call [`mount()`](Self::mount) to start the initial load.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let client = UsersClient::new(&config.api_url, &config.transport())?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing API client.
    pub fn with_client(client: UsersClient) -> Self {
        let (state, _) = watch::channel(ScreenState::default());
        Self {
            inner: Arc::new(ControllerInner {
                client,
                state,
                mounted: Mutex::new(None),
            }),
        }
    }

    pub fn client(&self) -> &UsersClient {
        &self.inner.client
    }

    // ── State observation ────────────────────────────────────────

    /// Current state snapshot.
    pub fn state(&self) -> ScreenState {
        self.inner.state.borrow().clone()
    }

    /// Current list (cheap `Arc` clone).
    pub fn users(&self) -> Arc<Vec<User>> {
        Arc::clone(&self.inner.state.borrow().users)
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.inner.state.subscribe()
    }

    /// Clear the error message. Nothing else clears it.
    pub fn dismiss_error(&self) {
        self.inner.state.send_if_modified(|s| {
            let had = s.has_error();
            s.error.clear();
            had
        });
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Start the initial list fetch in a fresh cancellation scope.
    ///
    /// No-op while already mounted.
    pub async fn mount(&self) {
        let mut mounted = self.inner.mounted.lock().await;
        if mounted.is_some() {
            debug!("user list already mounted");
            return;
        }

        let cancel = CancellationToken::new();
        let ctrl = self.clone();
        let token = cancel.clone();
        let load = tokio::spawn(async move {
            // The outcome is already reflected in the screen state.
            let _ = ctrl.load(&token).await;
        });

        *mounted = Some(Mounted {
            cancel,
            load: Some(load),
        });
        info!("user list mounted");
    }

    /// Abort the list fetch if it is still running and wait for it to
    /// wind down. A canceled fetch leaves the state as it was.
    pub async fn unmount(&self) {
        let Some(mut mounted) = self.inner.mounted.lock().await.take() else {
            return;
        };

        mounted.cancel.cancel();
        if let Some(load) = mounted.load.take() {
            if let Err(e) = load.await {
                warn!(error = %e, "user list load task failed");
            }
        }
        info!("user list unmounted");
    }

    /// Wait until the mounted list fetch has finished.
    pub async fn loaded(&self) -> Result<(), CoreError> {
        let load = {
            let mut mounted = self.inner.mounted.lock().await;
            let mounted = mounted.as_mut().ok_or(CoreError::NotMounted)?;
            mounted.load.take()
        };

        match load {
            Some(handle) => handle
                .await
                .map_err(|e| CoreError::Internal(format!("load task failed: {e}"))),
            None => Ok(()),
        }
    }

    // ── Initial load ─────────────────────────────────────────────

    /// Fetch the full list and replace `users` with it.
    ///
    /// Cancellation discards the result without touching the state.
    pub async fn load(&self, cancel: &CancellationToken) -> Result<(), CoreError> {
        self.inner.state.send_modify(|s| s.loading = true);

        match self.inner.client.list_users(cancel).await {
            Ok(users) => {
                debug!(count = users.len(), "user list loaded");
                self.inner.state.send_modify(|s| {
                    s.users = Arc::new(users);
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) if e.is_cancelled() => {
                debug!("user list load canceled");
                Err(CoreError::Cancelled)
            }
            Err(e) => {
                warn!(error = %e, "user list load failed");
                let message = e.to_string();
                self.inner.state.send_modify(|s| {
                    s.error = message;
                    s.loading = false;
                });
                Err(e.into())
            }
        }
    }

    // ── Optimistic operations ────────────────────────────────────

    /// Add the built-in draft record.
    pub async fn add(&self) -> Result<User, CoreError> {
        self.add_user(default_draft()).await
    }

    /// Show `draft` at the top of the list right away, then create it.
    ///
    /// On success the placeholder is swapped for the server's record,
    /// which carries the assigned id.
    pub async fn add_user(&self, draft: User) -> Result<User, CoreError> {
        let original = self.users();
        let placeholder = User {
            id: User::UNASSIGNED_ID,
            ..draft
        };
        self.publish(state::prepended(&original, placeholder.clone()));

        match self.inner.client.create_user(&placeholder).await {
            Ok(created) => {
                debug!(id = created.id, "user created");
                let settled = created.clone();
                self.inner.state.send_modify(|s| {
                    s.users = Arc::new(state::settled(&s.users, &placeholder, settled));
                });
                Ok(created)
            }
            Err(e) => Err(self.rollback("add", original, e, None)),
        }
    }

    /// Remove every record with the target's id, then delete it remotely.
    pub async fn delete(&self, target: &User) -> Result<(), CoreError> {
        let original = self.users();
        self.publish(state::without_id(&original, target.id));

        match self.inner.client.delete_user(target.id).await {
            Ok(()) => {
                debug!(id = target.id, "user deleted");
                Ok(())
            }
            Err(e) => Err(self.rollback("delete", original, e, Some(target.id))),
        }
    }

    /// Move the target to [`UPDATED_CITY`].
    pub async fn update(&self, target: &User) -> Result<User, CoreError> {
        self.update_city(target, UPDATED_CITY).await
    }

    /// Replace the target's `address.city` in place, then PATCH the
    /// updated record. Every other field, street included, is kept.
    pub async fn update_city(&self, target: &User, city: &str) -> Result<User, CoreError> {
        let original = self.users();
        let updated = target.with_city(city);
        self.publish(state::replaced_by_id(&original, target.id, &updated));

        match self.inner.client.update_user(target.id, &updated).await {
            Ok(()) => {
                debug!(id = target.id, city, "user updated");
                Ok(updated)
            }
            Err(e) => Err(self.rollback("update", original, e, Some(target.id))),
        }
    }

    // ── Internals ────────────────────────────────────────────────

    fn publish(&self, users: Vec<User>) {
        self.inner.state.send_modify(|s| s.users = Arc::new(users));
    }

    /// Restore the pre-operation snapshot and surface the failure.
    fn rollback(
        &self,
        op: &'static str,
        original: Arc<Vec<User>>,
        err: roster_api::Error,
        target: Option<i64>,
    ) -> CoreError {
        warn!(op, error = %err, "optimistic update rolled back");
        let message = err.to_string();
        self.inner.state.send_modify(|s| {
            s.users = original;
            s.error = message;
        });
        match target {
            Some(id) => CoreError::for_user(err, id),
            None => err.into(),
        }
    }
}

impl std::fmt::Debug for UserListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserListController")
            .field("base_url", &self.inner.client.base_url().as_str())
            .finish_non_exhaustive()
    }
}
