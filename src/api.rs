//! HTTP client core.
//!
//! One `ApiClient` per session: a reqwest client, the backend base URL, and
//! the bearer token when logged in. Endpoint wrappers live with their feature
//! modules (catalog, cart, orders, survey); this module owns construction,
//! the credential exchange, and the shared request plumbing.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{Credentials, LoginResponse};
use crate::storage::LocalStore;

/// Client for the CarbonCalc backend. The token is carried explicitly on the
/// client rather than read from ambient storage on each call, so tests can
/// construct sessions without touching disk.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token: None,
        }
    }

    /// Build a client from config plus any token already persisted locally.
    pub fn from_config(config: &Config, store: &LocalStore) -> Result<Self> {
        let mut client = Self::new(config.api_url.clone());
        client.token = store.token()?;
        Ok(client)
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer header when a token is present.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.post(self.url(path)))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.put(self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.authed(self.http.delete(self.url(path)))
    }

    /// Send and surface any non-2xx as an error. 404 is reported separately
    /// so single-record lookups can say "no matching record".
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(%status, url = %response.url(), "backend response");
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            warn!(%status, "backend rejected request");
            return Err(ApiError::Status { status });
        }
        Ok(response)
    }

    /// Create an account. The backend answers with a plain confirmation
    /// string.
    pub async fn register(&self, username: &str, password: &str) -> Result<String> {
        let builder = self.post("/auth/register").json(&json!({
            "username": username,
            "password": password,
        }));
        let response = self.send(builder).await?;
        Ok(response.text().await?)
    }

    /// Exchange credentials for a bearer token and arm this client with it.
    /// Persisting the token is the caller's business.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let builder = self.post("/auth/login").json(&credentials);
        let response = self.send(builder).await?;
        let body: LoginResponse = response.json().await?;
        self.token = Some(body.jwt.clone());
        Ok(body.jwt)
    }
}

/// Monotonic fetch generation for discarding stale responses.
///
/// Overlapping fetches from one view race, and without a guard whichever
/// response lands last wins regardless of which request was newest. A view
/// calls `begin()` before each fetch and checks `is_current` before applying
/// the result; a stale one is dropped instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Start a new fetch; every earlier generation becomes stale.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}
