//! An in-process mock of the view API.
//!
//! [`MockViewApi`] stores views in memory and serves the two endpoints the
//! form builder uses:
//!
//! - `GET   /api/apps/{app}/objects/{object}/views/{view}/`
//! - `PATCH /api/apps/{app}/objects/{object}/views/{view}/`
//!
//! Every accepted `PATCH` body is recorded so tests can assert on exactly
//! what the client sent. A failure status can be forced for all requests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use http::StatusCode;
use serde_json::json;

use formsmith_schema::{View, ViewLocator, ViewPatch};

use crate::live_server::LiveServer;

/// Path prefix the mock routes are nested under.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Default)]
struct MockState {
    views: HashMap<ViewLocator, View>,
    patches: Vec<(ViewLocator, ViewPatch)>,
    failure: Option<(StatusCode, String)>,
    requests: usize,
}

/// Shared, cloneable state behind the mock endpoints.
#[derive(Debug, Clone, Default)]
pub struct MockViewApi {
    state: Arc<RwLock<MockState>>,
}

impl MockViewApi {
    /// Creates a mock with no views.
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
        self.state
            .write()
            .expect("mock api lock poisoned")
            .views
            .insert(locator, view);
    }

    /// Returns the stored view.
    pub fn view(&self, locator: &ViewLocator) -> Option<View> {
        self.state
            .read()
            .expect("mock api lock poisoned")
            .views
            .get(locator)
            .cloned()
    }

    /// Returns every accepted `PATCH` body, oldest first.
    pub fn patches(&self) -> Vec<ViewPatch> {
        self.state
            .read()
            .expect("mock api lock poisoned")
            .patches
            .iter()
            .map(|(_, patch)| patch.clone())
            .collect()
    }

    /// Returns the number of requests received, failed ones included.
    pub fn request_count(&self) -> usize {
        self.state.read().expect("mock api lock poisoned").requests
    }

    /// Makes every following request fail with `status`.
    pub fn fail_with(&self, status: u16, message: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state.write().expect("mock api lock poisoned").failure = Some((status, message.into()));
    }

    /// Stops forcing failures.
    pub fn clear_failure(&self) {
        self.state.write().expect("mock api lock poisoned").failure = None;
    }

    /// Returns the router, with routes nested under [`API_PREFIX`].
    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route(
                "/apps/{app_id}/objects/{object_id}/views/{view_id}/",
                get(get_view).patch(patch_view),
            )
            .with_state(self.clone());
        Router::new().nest(API_PREFIX, routes)
    }

    /// Serves the mock on a random port.
    pub async fn serve(&self) -> LiveServer {
        LiveServer::start(self.router()).await
    }

    /// Records a request and returns the forced failure, if any.
    fn begin_request(&self) -> Option<Response> {
        let mut state = self.state.write().expect("mock api lock poisoned");
        state.requests += 1;
        state
            .failure
            .clone()
            .map(|(status, message)| (status, message).into_response())
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
}

async fn get_view(
    State(api): State<MockViewApi>,
    Path((app_id, object_id, view_id)): Path<(String, String, String)>,
) -> Response {
    if let Some(failure) = api.begin_request() {
        return failure;
    }
    let locator = ViewLocator::new(app_id, object_id, view_id);
    tracing::debug!(%locator, "mock api: get view");
    api.view(&locator)
        .map_or_else(not_found, |view| Json(view).into_response())
}

async fn patch_view(
    State(api): State<MockViewApi>,
    Path((app_id, object_id, view_id)): Path<(String, String, String)>,
    Json(patch): Json<ViewPatch>,
) -> Response {
    if let Some(failure) = api.begin_request() {
        return failure;
    }
    let locator = ViewLocator::new(app_id, object_id, view_id);
    tracing::debug!(%locator, fields = ?patch.config.fields, "mock api: patch view");
    let mut state = api.state.write().expect("mock api lock poisoned");
    let Some(view) = state.views.get_mut(&locator) else {
        return not_found();
    };
    view.config = patch.config.clone();
    view.updated_at = Some(Utc::now());
    let updated = view.clone();
    state.patches.push((locator, patch));
    Json(updated).into_response()
}
