// Pending-result / cancel-handle pair returned by `UsersClient::get_all_users`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::Error;

/// An in-flight request. Await it to get the response or the failure.
///
/// The request starts as soon as this is handed out. It runs on its
/// own task, so dropping the `PendingRequest` does not stop it.
/// Use the paired [`CancelHandle`] for that. A canceled request resolves
/// to [`Error::Cancelled`].
pub struct PendingRequest<T> {
    task: JoinHandle<Result<T, Error>>,
}

impl<T: Send + 'static> PendingRequest<T> {
    /// Spawn `fut` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub(crate) fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        Self {
            task: tokio::spawn(fut),
        }
    }
}

impl<T> Future for PendingRequest<T> {
    type Output = Result<T, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.task.poll_unpin(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) => Err(Error::Task(e.to_string())),
        })
    }
}

impl<T> fmt::Debug for PendingRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest").finish_non_exhaustive()
    }
}

/// Aborts the [`PendingRequest`] it was issued with.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Abort the request if it is still in flight. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
