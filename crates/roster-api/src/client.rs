// Async HTTP client for the `/users` REST collection.
//
// Base path: whatever the configured base URL points at; `users` is
// joined relative to it.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::fetch::{CancelHandle, PendingRequest};
use crate::models::User;
use crate::transport::TransportConfig;

const USERS_PATH: &str = "users";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the users collection.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UsersClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ensure the base path ends with a slash so relative joins append
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Users endpoints ──────────────────────────────────────────────

    /// `GET /users`, aborted with [`Error::Cancelled`] once `cancel` fires.
    pub async fn list_users(&self, cancel: &CancellationToken) -> Result<Vec<User>, Error> {
        self.get_cancellable(USERS_PATH, cancel).await
    }

    /// Send a cancellable `GET /users` right away and hand back the
    /// pending result together with the handle that aborts it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn get_all_users(&self) -> (PendingRequest<Vec<User>>, CancelHandle) {
        let cancel = CancellationToken::new();
        let client = self.clone();
        let token = cancel.clone();
        let pending = PendingRequest::spawn(async move { client.list_users(&token).await });
        (pending, CancelHandle::new(cancel))
    }

    /// `POST /users`; returns the record with its server-assigned id.
    pub async fn create_user(&self, user: &User) -> Result<User, Error> {
        self.post(USERS_PATH, user).await
    }

    /// `PATCH /users/{id}`. The acknowledgement body is ignored.
    pub async fn update_user(&self, id: i64, user: &User) -> Result<(), Error> {
        self.patch(&format!("{USERS_PATH}/{id}"), user).await
    }

    /// `DELETE /users/{id}`. The acknowledgement body is ignored.
    pub async fn delete_user(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("{USERS_PATH}/{id}")).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_cancellable<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let request = async {
            let resp = self.http.get(url).send().await?;
            self.handle_response(resp).await
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("GET {path} canceled");
                Err(Error::Cancelled)
            }
            result = request => result,
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn patch<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .or_else(|| (!raw.trim().is_empty()).then(|| raw.trim().to_owned()))
            .unwrap_or_else(|| status.to_string());

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
