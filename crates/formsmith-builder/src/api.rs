//! Clients for the two view endpoints the builder uses.
//!
//! [`ViewApi`] is the seam between the builder and the backend. The
//! [`HttpViewApi`] talks to a real server with `reqwest`; the
//! [`InMemoryViewApi`] keeps views in memory for tests and headless use.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use formsmith_core::{FormsmithError, FormsmithResult, Settings};
use formsmith_schema::{View, ViewLocator, ViewPatch};

/// Reads and updates form views.
#[async_trait]
pub trait ViewApi: Send + Sync {
    /// Fetches a view.
    async fn get_view(&self, locator: &ViewLocator) -> FormsmithResult<View>;

    /// Replaces a view's configuration and returns the updated view.
    async fn patch_view(&self, locator: &ViewLocator, patch: &ViewPatch) -> FormsmithResult<View>;
}

// ── HTTP ────────────────────────────────────────────────────────────────

/// A [`ViewApi`] backed by the REST endpoints under a base URL.
///
/// Requests are sent once, without retry or timeout; authentication is the
/// caller's concern (e.g. a preconfigured [`reqwest::Client`]).
#[derive(Debug, Clone)]
pub struct HttpViewApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpViewApi {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client that sends requests through `client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client for `settings.api_base_url`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base())
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the full URL of a view.
    pub fn url(&self, locator: &ViewLocator) -> String {
        format!("{}{}", self.base_url, locator.path())
    }

    async fn read_view(locator: &ViewLocator, response: reqwest::Response) -> FormsmithResult<View> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FormsmithError::NotFound(format!("view {locator}")));
        }
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(FormsmithError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn transport_error(err: reqwest::Error) -> FormsmithError {
    if err.is_decode() {
        FormsmithError::SerializationError(err.to_string())
    } else {
        FormsmithError::Network(err.to_string())
    }
}

#[async_trait]
impl ViewApi for HttpViewApi {
    async fn get_view(&self, locator: &ViewLocator) -> FormsmithResult<View> {
        let url = self.url(locator);
        tracing::debug!(%url, "GET view");
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        Self::read_view(locator, response).await
    }

    async fn patch_view(&self, locator: &ViewLocator, patch: &ViewPatch) -> FormsmithResult<View> {
        let url = self.url(locator);
        tracing::debug!(%url, fields = ?patch.config.fields, "PATCH view");
        let response = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(transport_error)?;
        Self::read_view(locator, response).await
    }
}

// ── In memory ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Failure {
    Network(String),
    Status(u16, String),
}

/// A [`ViewApi`] that keeps views in memory.
///
/// Failures and latency can be injected to exercise the builder's error
/// and teardown paths.
#[derive(Debug, Default)]
pub struct InMemoryViewApi {
    views: RwLock<HashMap<ViewLocator, View>>,
    failure: RwLock<Option<Failure>>,
    latency: RwLock<Option<Duration>>,
    get_count: AtomicUsize,
    patch_count: AtomicUsize,
}

impl InMemoryViewApi {
    /// Creates an API with no views.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a view and returns `self` for chaining.
    #[must_use]
    pub fn with_view(self, locator: ViewLocator, view: View) -> Self {
        self.insert_view(locator, view);
        self
    }

    /// Stores or replaces a view.
    pub fn insert_view(&self, locator: ViewLocator, view: View) {
        self.views
            .write()
            .expect("view store lock poisoned")
            .insert(locator, view);
    }

    /// Returns the stored view.
    pub fn view(&self, locator: &ViewLocator) -> Option<View> {
        self.views
            .read()
            .expect("view store lock poisoned")
            .get(locator)
            .cloned()
    }

    /// Makes every following request fail as a transport error.
    pub fn fail_with_network(&self, message: impl Into<String>) {
        *self.failure.write().expect("view store lock poisoned") =
            Some(Failure::Network(message.into()));
    }

    /// Makes every following request fail with an HTTP status.
    pub fn fail_with_status(&self, status: u16, message: impl Into<String>) {
        *self.failure.write().expect("view store lock poisoned") =
            Some(Failure::Status(status, message.into()));
    }

    /// Stops injecting failures.
    pub fn clear_failure(&self) {
        *self.failure.write().expect("view store lock poisoned") = None;
    }

    /// Delays every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.write().expect("view store lock poisoned") = Some(latency);
    }

    /// Returns the number of `get_view` calls.
    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }

    /// Returns the number of `patch_view` calls.
    pub fn patch_count(&self) -> usize {
        self.patch_count.load(Ordering::SeqCst)
    }

    async fn simulate(&self) -> FormsmithResult<()> {
        let latency = *self.latency.read().expect("view store lock poisoned");
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let failure = self.failure.read().expect("view store lock poisoned").clone();
        match failure {
            Some(Failure::Network(message)) => Err(FormsmithError::Network(message)),
            Some(Failure::Status(404, message)) => Err(FormsmithError::NotFound(message)),
            Some(Failure::Status(status, message)) => Err(FormsmithError::Http { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ViewApi for InMemoryViewApi {
    async fn get_view(&self, locator: &ViewLocator) -> FormsmithResult<View> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        self.view(locator)
            .ok_or_else(|| FormsmithError::NotFound(format!("view {locator}")))
    }

    async fn patch_view(&self, locator: &ViewLocator, patch: &ViewPatch) -> FormsmithResult<View> {
        self.patch_count.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        let mut views = self.views.write().expect("view store lock poisoned");
        let view = views
            .get_mut(locator)
            .ok_or_else(|| FormsmithError::NotFound(format!("view {locator}")))?;
        view.config = patch.config.clone();
        Ok(view.clone())
    }
}
